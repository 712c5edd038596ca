//! Notifications for the rendering collaborator
//!
//! The model never looks at the canvas. Instead it hands out opaque
//! [`VisualHandle`]s and reports every completed mutation as a
//! [`ModelEvent`], which a canvas layer can replay to stay in sync.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Opaque identity of a class vertex or relation edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VisualHandle(u32);

impl VisualHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A completed model mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ModelEvent {
    ClassAdded {
        name: String,
        handle: VisualHandle,
        label: String,
    },
    ClassUpdated {
        old_name: String,
        name: String,
        handle: VisualHandle,
        label: String,
    },
    ClassDeleted {
        name: String,
        handle: VisualHandle,
    },
    RelationAdded {
        handle: VisualHandle,
        /// Handle of the source class vertex
        source: VisualHandle,
        /// Handle of the target class vertex
        target: VisualHandle,
        label: String,
    },
    RelationUpdated {
        handle: VisualHandle,
        label: String,
    },
    RelationDeleted {
        handle: VisualHandle,
    },
}

impl ModelEvent {
    /// Handle of the vertex or edge the event is about
    pub fn handle(&self) -> VisualHandle {
        match self {
            ModelEvent::ClassAdded { handle, .. }
            | ModelEvent::ClassUpdated { handle, .. }
            | ModelEvent::ClassDeleted { handle, .. }
            | ModelEvent::RelationAdded { handle, .. }
            | ModelEvent::RelationUpdated { handle, .. }
            | ModelEvent::RelationDeleted { handle } => *handle,
        }
    }
}

/// Receiver of model events
pub trait ModelObserver {
    fn notify(&mut self, event: &ModelEvent);
}

/// Observer that records events for later replay
///
/// Clones share the same buffer, so one clone can be subscribed to a model
/// while another is kept to drain it.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<ModelEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every recorded event
    pub fn take(&self) -> Vec<ModelEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl ModelObserver for EventLog {
    fn notify(&mut self, event: &ModelEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
