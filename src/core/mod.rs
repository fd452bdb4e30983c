pub mod pick;
pub mod processor;
pub mod registry;
pub mod spatial;
pub mod trace;

pub use pick::{pick, PickHit};
pub use processor::{DeltaOutcome, DeltaProcessor};
pub use registry::{
    CompositionGroup, EntityRegistry, GeometryLeaf, LeafGeometry, NodeIndex, Root, SceneNode,
};
pub use spatial::{recompute_bounds, union_bounds};
pub use trace::TraceBuffer;
