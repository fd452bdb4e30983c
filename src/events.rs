use std::fmt;

/// Notifications from the NC context to the surrounding application
#[derive(Debug, Clone, PartialEq)]
pub enum NcEvent {
    WorkingstepChanged { workingstep: Option<i64> },
    ClearHighlights,
    HideBounding,
}

impl fmt::Display for NcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NcEvent::WorkingstepChanged { workingstep: Some(ws) } => {
                write!(f, "change-workingstep {ws}")
            }
            NcEvent::WorkingstepChanged { workingstep: None } => write!(f, "change-workingstep"),
            NcEvent::ClearHighlights => write!(f, "clear-highlights"),
            NcEvent::HideBounding => write!(f, "hide-bounding"),
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: NcEvent);
}

/// Buffers events until the host drains them
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<NcEvent>,
}

impl EventQueue {
    pub fn drain(&mut self) -> Vec<NcEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: NcEvent) {
        log::debug!("event: {event}");
        self.events.push(event);
    }
}
