pub mod json_geometry;

pub use json_geometry::{load_geometry_file, parse_geometry, FileDispatcher};

use std::collections::{HashMap, VecDeque};

use crate::core::NodeIndex;
use crate::types::{GeomKind, Geometry, Usage};

/// A geometry fetch, keyed by node id (shells) or annotation name (toolpaths)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub key: String,
    pub category: Usage,
    pub kind: GeomKind,
}

/// Finished geometry reported against the key it was requested under
#[derive(Clone, Debug, PartialEq)]
pub struct LoadCompletion {
    pub key: String,
    pub payload: Geometry,
}

/// Transport seam: receives each flushed batch.
/// Completions that are available immediately may be returned directly;
/// the rest arrive later through [`Loader::complete`].
pub trait LoadDispatcher {
    fn dispatch(&mut self, batch: &[LoadRequest]) -> Vec<LoadCompletion>;
}

/// Dispatcher for hosts that deliver every completion asynchronously
#[derive(Debug, Default)]
pub struct DeferredDispatcher;

impl LoadDispatcher for DeferredDispatcher {
    fn dispatch(&mut self, _batch: &[LoadRequest]) -> Vec<LoadCompletion> {
        Vec::new()
    }
}

/// Named toolpath polyline, fetched at most once
#[derive(Clone, Debug)]
pub struct AnnotationEntry {
    pub name: String,
    pub owner: NodeIndex,
    pub loaded: bool,
}

pub struct Loader {
    pending: Vec<LoadRequest>,
    completions: VecDeque<LoadCompletion>,
    annotations: HashMap<String, AnnotationEntry>,
    history: Vec<LoadRequest>,
    dispatcher: Box<dyn LoadDispatcher>,
}

impl Loader {
    pub fn new(dispatcher: Box<dyn LoadDispatcher>) -> Self {
        Self {
            pending: Vec::new(),
            completions: VecDeque::new(),
            annotations: HashMap::new(),
            history: Vec::new(),
            dispatcher,
        }
    }

    pub fn enqueue_load(&mut self, request: LoadRequest) {
        log::debug!("queue {:?} load for {}", request.kind, request.key);
        self.pending.push(request);
    }

    pub fn pending(&self) -> &[LoadRequest] {
        &self.pending
    }

    /// Hand the whole pending queue to the dispatcher in one batch.
    /// Returns how many requests were flushed.
    pub fn run_load_queue(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let batch = std::mem::take(&mut self.pending);
        log::info!("dispatching {} load request(s)", batch.len());
        let ready = self.dispatcher.dispatch(&batch);
        self.completions.extend(ready);
        let count = batch.len();
        self.history.extend(batch);
        count
    }

    /// Report finished geometry; applied at the next drain
    pub fn complete(&mut self, completion: LoadCompletion) {
        self.completions.push_back(completion);
    }

    pub fn take_completions(&mut self) -> Vec<LoadCompletion> {
        self.completions.drain(..).collect()
    }

    pub fn has_completions(&self) -> bool {
        !self.completions.is_empty()
    }

    /// Every request handed to the dispatcher so far, in order
    pub fn history(&self) -> &[LoadRequest] {
        &self.history
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationEntry> {
        self.annotations.get(name)
    }

    pub fn annotation_mut(&mut self, name: &str) -> Option<&mut AnnotationEntry> {
        self.annotations.get_mut(name)
    }

    pub fn annotations(&self) -> impl Iterator<Item = &AnnotationEntry> {
        self.annotations.values()
    }

    pub fn register_annotation(&mut self, name: impl Into<String>, owner: NodeIndex) {
        let name = name.into();
        self.annotations.insert(
            name.clone(),
            AnnotationEntry {
                name,
                owner,
                loaded: false,
            },
        );
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(Box::new(DeferredDispatcher))
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("pending", &self.pending.len())
            .field("completions", &self.completions.len())
            .field("annotations", &self.annotations.len())
            .field("dispatched", &self.history.len())
            .finish()
    }
}
