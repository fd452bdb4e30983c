pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod delta;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod loaders;
pub mod math;
pub mod project;
pub mod types;

pub use config::ViewerConfig;
pub use context::{BoundsOverlay, NcContext, NcState, NcTree};
pub use delta::{Delta, GeomEntry, Incremental, Keyframe};
pub use error::{NcError, Result};
pub use events::{EventQueue, EventSink, NcEvent};
pub use loaders::{DeferredDispatcher, FileDispatcher, LoadCompletion, LoadDispatcher, LoadRequest, Loader};
pub use project::PathMap;
pub use types::{GeomKind, Geometry, Mesh, Polyline, Usage};
