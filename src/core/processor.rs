use glam::Mat4;

use crate::core::registry::{EntityRegistry, NodeIndex, Root, SceneNode};
use crate::core::trace::TraceBuffer;
use crate::delta::{Delta, GeomEntry, Incremental, Keyframe};
use crate::diagnostics::DeltaHistory;
use crate::events::{EventSink, NcEvent};
use crate::loaders::{LoadCompletion, LoadRequest, Loader};
use crate::math::{CUTTER_TINT, NEUTRAL_TINT};
use crate::types::{GeomKind, Geometry, Usage};

/// What a single message changed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeltaOutcome {
    /// Any visible state changed
    pub changed: bool,
    /// Nodes entered or left the rendered set
    pub rendered_set_changed: bool,
    /// Points were appended to the trace
    pub trace_extended: bool,
}

/// Borrowed view of the mutable scene state one message is applied to
pub struct DeltaProcessor<'a> {
    pub registry: &'a mut EntityRegistry,
    pub trace: &'a mut TraceBuffer,
    pub loader: &'a mut Loader,
    pub history: &'a mut DeltaHistory,
    pub events: &'a mut dyn EventSink,
}

impl DeltaProcessor<'_> {
    pub fn apply(&mut self, delta: &Delta) -> DeltaOutcome {
        match delta {
            Delta::Keyframe(keyframe) => self.apply_keyframe(keyframe),
            Delta::Incremental(incremental) => self.apply_incremental(incremental),
        }
    }

    fn apply_keyframe(&mut self, keyframe: &Keyframe) -> DeltaOutcome {
        log::info!(
            "keyframe received: workingstep {:?}, {} geometries",
            keyframe.workingstep,
            keyframe.geom.len()
        );

        let transient: Vec<NodeIndex> = self
            .registry
            .iter()
            .filter(|(_, node)| node.usage.is_transient())
            .map(|(index, _)| index)
            .collect();
        for index in transient {
            self.registry.detach(Root::Primary, index);
            self.registry.detach(Root::Overlay, index);
            if let Some(node) = self.registry.node_mut(index) {
                node.rendered = false;
            }
        }

        let owners: Vec<NodeIndex> = self.loader.annotations().map(|a| a.owner).collect();
        for owner in owners {
            self.registry.detach(Root::Annotation, owner);
        }

        for entry in keyframe.geom.iter().filter(|g| g.is_toolpath()) {
            self.show_toolpath(entry);
        }
        for entry in keyframe.geom.iter().filter(|g| g.is_solid()) {
            self.show_solid(entry);
        }

        self.loader.run_load_queue();
        self.events.emit(NcEvent::WorkingstepChanged {
            workingstep: keyframe.workingstep,
        });

        DeltaOutcome {
            changed: true,
            rendered_set_changed: true,
            trace_extended: false,
        }
    }

    fn show_toolpath(&mut self, entry: &GeomEntry) {
        let Some(name) = entry.polyline_name() else {
            log::debug!("toolpath {} has no polyline reference", entry.id);
            return;
        };

        if let Some(existing) = self.loader.annotation(name) {
            let owner = existing.owner;
            self.registry.attach(Root::Annotation, owner);
            return;
        }

        let transform = entry.transform().unwrap_or(Mat4::IDENTITY);
        let node = SceneNode::new(entry.id.clone(), entry.usage, GeomKind::Polyline, transform, None);
        let index = self.registry.add(node);
        self.loader.register_annotation(name, index);
        self.loader.enqueue_load(LoadRequest {
            key: name.to_string(),
            category: entry.usage,
            kind: GeomKind::Polyline,
        });
    }

    fn show_solid(&mut self, entry: &GeomEntry) {
        if entry.usage == Usage::Asis {
            return;
        }

        if let Some(index) = self.registry.index_of(&entry.id) {
            let reattach = self.registry.node(index).is_some_and(|node| !node.rendered);
            if reattach {
                self.registry.attach(Root::Primary, index);
                self.registry.attach(Root::Overlay, index);
                if let Some(node) = self.registry.node_mut(index) {
                    node.rendered = true;
                    node.set_visible();
                }
            }
            return;
        }

        let tint = if entry.usage == Usage::Cutter {
            CUTTER_TINT
        } else {
            NEUTRAL_TINT
        };
        let transform = entry.transform().unwrap_or(Mat4::IDENTITY);
        let node = SceneNode::new(entry.id.clone(), entry.usage, GeomKind::Shell, transform, entry.bounds())
            .with_tint(tint);
        self.registry.add(node);
        self.loader.enqueue_load(LoadRequest {
            key: entry.id.clone(),
            category: entry.usage,
            kind: GeomKind::Shell,
        });
    }

    fn apply_incremental(&mut self, incremental: &Incremental) -> DeltaOutcome {
        let mut moved = false;

        for entry in &incremental.geom {
            self.history.record(entry);

            let Some(node) = self.registry.get_mut(&entry.id) else {
                log::debug!("update for unknown geometry {}", entry.id);
                continue;
            };
            if !node.rendered || node.usage != Usage::Cutter {
                continue;
            }
            let Some(transform) = entry.transform() else {
                log::debug!("cutter update {} has no transform", entry.id);
                continue;
            };
            let Some(position) = incremental.mtcoords else {
                log::debug!("cutter update {} has no machine coordinates", entry.id);
                continue;
            };

            let (_, rotation, _) = transform.to_scale_rotation_translation();
            node.translation = position;
            node.rotation = rotation;
            self.trace.push(position);
            moved = true;
        }

        DeltaOutcome {
            changed: moved,
            rendered_set_changed: false,
            trace_extended: moved,
        }
    }

    /// Hang finished geometry on the node that requested it.
    /// Returns whether the rendered set changed.
    pub fn apply_completion(&mut self, completion: LoadCompletion) -> bool {
        match completion.payload {
            Geometry::Shell(mesh) => {
                let Some(index) = self.registry.index_of(&completion.key) else {
                    log::warn!("shell {} finished loading but is not registered", completion.key);
                    return false;
                };
                self.registry.attach_mesh(index, mesh);
                match self.registry.node_mut(index) {
                    // As-is stock is loaded but hidden by default
                    Some(node) if node.usage == Usage::Asis => {
                        node.rendered = false;
                        node.set_invisible();
                        true
                    }
                    _ => false,
                }
            }
            Geometry::Polyline(lines) => {
                let Some(entry) = self.loader.annotation_mut(&completion.key) else {
                    log::warn!("annotation {} finished loading but is not tracked", completion.key);
                    return false;
                };
                entry.loaded = true;
                let owner = entry.owner;
                self.registry.attach_lines(owner, lines);
                false
            }
        }
    }
}
