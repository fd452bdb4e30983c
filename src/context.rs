//! The NC context: one machining project's scene, composed from the
//! registry, trace, loader and spatial queries.
//!
//! All mutation happens on the caller's thread. Loader completions are
//! queued and only applied by [`NcContext::drain_completions`], which also
//! runs at the start of every [`NcContext::apply_delta`].

use glam::{Mat4, Vec2, Vec3};
use serde::Serialize;

use crate::config::ViewerConfig;
use crate::core::{
    pick, recompute_bounds, union_bounds, DeltaProcessor, EntityRegistry, NodeIndex, Root,
    SceneNode, TraceBuffer,
};
use crate::delta::{Delta, Keyframe};
use crate::diagnostics::DeltaHistory;
use crate::error::NcError;
use crate::events::{EventQueue, EventSink, NcEvent};
use crate::loaders::Loader;
use crate::math::{cursor_to_ndc, Ray, AABB};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NcState {
    pub selected: bool,
    pub highlighted: bool,
    pub visible: bool,
    pub opacity: f32,
    #[serde(rename = "explodeDistance")]
    pub explode_distance: f32,
    pub collapsed: bool,
}

impl Default for NcState {
    fn default() -> Self {
        Self {
            selected: false,
            highlighted: false,
            visible: true,
            opacity: 1.0,
            explode_distance: 0.0,
            collapsed: false,
        }
    }
}

/// Wireframe box drawn in the overlay while the context is selected
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsOverlay {
    pub bounds: AABB,
    pub edges: Vec<[Vec3; 2]>,
}

impl BoundsOverlay {
    pub fn build(bounds: AABB) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        Some(Self {
            bounds,
            edges: bounds.edges(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeState {
    pub selected: bool,
    pub highlighted: bool,
    pub visible: bool,
    pub opacity: f32,
    #[serde(rename = "explodeDistance")]
    pub explode_distance: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeChildState {
    pub disabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeChild {
    pub id: String,
    pub text: String,
    pub collapsed: bool,
    pub state: TreeChildState,
}

/// Read-only snapshot for tree views
#[derive(Debug, Clone, Serialize)]
pub struct NcTree {
    pub id: String,
    pub text: String,
    pub collapsed: bool,
    pub state: TreeState,
    pub children: Vec<TreeChild>,
}

#[derive(Debug)]
pub struct NcContext {
    project: String,
    workingstep: Option<i64>,
    registry: EntityRegistry,
    trace: TraceBuffer,
    trace_attached: bool,
    loader: Loader,
    history: DeltaHistory,
    events: EventQueue,
    state: NcState,
    bounding_box: Option<AABB>,
    bounds_overlay: Option<BoundsOverlay>,
    overlay_shows_bounds: bool,
}

impl NcContext {
    pub fn new(project: impl Into<String>, workingstep: Option<i64>, loader: Loader) -> Self {
        Self::with_config(project, workingstep, loader, &ViewerConfig::default())
    }

    pub fn with_config(
        project: impl Into<String>,
        workingstep: Option<i64>,
        loader: Loader,
        config: &ViewerConfig,
    ) -> Self {
        Self {
            project: project.into(),
            workingstep,
            registry: EntityRegistry::new(),
            trace: TraceBuffer::with_capacity(config.trace_capacity),
            trace_attached: false,
            loader,
            history: DeltaHistory::new(config.history_limit),
            events: EventQueue::default(),
            state: NcState::default(),
            bounding_box: None,
            bounds_overlay: None,
            overlay_shows_bounds: false,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn workingstep(&self) -> Option<i64> {
        self.workingstep
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.registry.get(id)
    }

    /// Mutable access for display toggles; shape changes go through deltas
    pub fn node_mut(&mut self, id: &str) -> Option<&mut SceneNode> {
        self.registry.get_mut(id)
    }

    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut TraceBuffer {
        &mut self.trace
    }

    /// Whether the trace line is currently part of the overlay
    pub fn is_trace_attached(&self) -> bool {
        self.trace_attached
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut Loader {
        &mut self.loader
    }

    pub fn history(&self) -> &DeltaHistory {
        &self.history
    }

    pub fn state(&self) -> &NcState {
        &self.state
    }

    pub fn drain_events(&mut self) -> Vec<NcEvent> {
        self.events.drain()
    }

    fn processor(&mut self) -> DeltaProcessor<'_> {
        DeltaProcessor {
            registry: &mut self.registry,
            trace: &mut self.trace,
            loader: &mut self.loader,
            history: &mut self.history,
            events: &mut self.events,
        }
    }

    /// Register a node outside the delta stream (initial project load)
    pub fn add_model(&mut self, node: SceneNode) -> NodeIndex {
        self.bounding_box = None;
        self.registry.add(node)
    }

    /// Apply every queued loader completion. Returns how many were applied.
    pub fn drain_completions(&mut self) -> usize {
        let completions = self.loader.take_completions();
        let count = completions.len();
        let mut rendered_set_changed = false;
        {
            let mut processor = self.processor();
            for completion in completions {
                rendered_set_changed |= processor.apply_completion(completion);
            }
        }
        if rendered_set_changed {
            self.bounding_box = None;
        }
        count
    }

    /// Apply one message. Returns whether any visible state changed.
    pub fn apply_delta(&mut self, delta: &Delta) -> bool {
        self.drain_completions();

        let outcome = self.processor().apply(delta);
        if let Delta::Keyframe(Keyframe {
            workingstep: Some(step),
            ..
        }) = delta
        {
            self.workingstep = Some(*step);
        }
        if outcome.rendered_set_changed {
            self.bounding_box = None;
        }
        if outcome.trace_extended {
            self.trace_attached = true;
        }

        // Immediate completions from the flush above land in the same turn
        self.drain_completions();
        outcome.changed
    }

    pub fn apply_delta_json(&mut self, text: &str) -> Result<bool, NcError> {
        let delta = Delta::parse(text)?;
        Ok(self.apply_delta(&delta))
    }

    /// Memoized union of rendered, non-polyline boxes
    pub fn get_bounding_box(&mut self) -> AABB {
        *self
            .bounding_box
            .get_or_insert_with(|| union_bounds(&self.registry))
    }

    /// Re-measure every rendered node from its loaded geometry, refresh the
    /// cache, and rebuild the overlay box
    pub fn calc_bounding_box(&mut self) -> AABB {
        let bounds = recompute_bounds(&mut self.registry);
        self.bounding_box = Some(bounds);
        self.bounds_overlay = BoundsOverlay::build(bounds);
        self.overlay_shows_bounds = self.state.selected && self.bounds_overlay.is_some();
        bounds
    }

    /// The overlay box if it is currently shown
    pub fn bounding_box_overlay(&self) -> Option<&BoundsOverlay> {
        self.bounds_overlay
            .as_ref()
            .filter(|_| self.overlay_shows_bounds)
    }

    pub fn toggle_selection(&mut self) {
        if self.state.selected {
            self.overlay_shows_bounds = false;
        } else {
            if self.bounds_overlay.is_none() {
                let bounds = self.get_bounding_box();
                self.bounds_overlay = BoundsOverlay::build(bounds);
            }
            self.overlay_shows_bounds = self.bounds_overlay.is_some();
        }
        self.state.selected = !self.state.selected;
    }

    pub fn clear_highlights(&mut self) {
        self.events.emit(NcEvent::ClearHighlights);
    }

    pub fn hide_all_bounding_boxes(&mut self) {
        self.events.emit(NcEvent::HideBounding);
    }

    pub fn pick(&self, ray: &Ray) -> Option<&SceneNode> {
        pick(&self.registry, ray).and_then(|hit| self.registry.node(hit.node))
    }

    /// Pick under a cursor given in pixels from the top-left of the viewport
    pub fn select(&self, inv_view_proj: &Mat4, cursor: Vec2, viewport: Vec2) -> Option<&SceneNode> {
        let ndc = cursor_to_ndc(cursor, viewport);
        self.pick(&Ray::from_ndc(inv_view_proj, ndc))
    }

    pub fn is_attached(&self, id: &str, root: Root) -> bool {
        self.registry
            .index_of(id)
            .is_some_and(|index| self.registry.is_attached(root, index))
    }

    pub fn get_tree(&self, root: impl Into<String>) -> NcTree {
        NcTree {
            id: root.into(),
            text: self.project.clone(),
            collapsed: self.state.collapsed,
            state: TreeState {
                selected: self.state.selected,
                highlighted: self.state.highlighted,
                visible: self.state.visible,
                opacity: self.state.opacity,
                explode_distance: self.state.explode_distance,
            },
            children: self
                .registry
                .iter()
                .map(|(_, node)| TreeChild {
                    id: node.id.clone(),
                    text: node.id.clone(),
                    collapsed: false,
                    state: TreeChildState {
                        disabled: false,
                        selected: false,
                    },
                })
                .collect(),
        }
    }
}
