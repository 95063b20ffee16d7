//! Event dispatch
//!
//! Passive, single-threaded listener registry for the page-level events
//! (scroll, resize, pointer, keyboard). Listeners never cancel or consume
//! an event; every listener registered for a type sees it.
//!
//! Registration returns a `ListenerId` that must be handed back to
//! `remove_listener` when the owning component is torn down. Removing an
//! id twice is a no-op.

use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Point, Size};

new_key_type! {
    /// Handle to a registered event listener
    pub struct ListenerId;
}

/// Keyboard keys the page reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Enter,
    Tab,
    /// Any other key, by its raw platform code
    Other(u32),
}

/// Event categories used for listener registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    Scroll,
    Resize,
    PointerMove,
    PointerOver,
    KeyDown,
}

/// A page-level input event
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The document scrolled to a new vertical offset
    Scroll { offset_y: f32 },
    /// The viewport changed size
    Resize { size: Size },
    /// Pointer moved (viewport coordinates)
    PointerMove { position: Point },
    /// Pointer entered an element; `interactive` is true for links and buttons
    PointerOver { interactive: bool },
    /// Key pressed
    KeyDown { key: KeyCode },
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Scroll { .. } => EventType::Scroll,
            Event::Resize { .. } => EventType::Resize,
            Event::PointerMove { .. } => EventType::PointerMove,
            Event::PointerOver { .. } => EventType::PointerOver,
            Event::KeyDown { .. } => EventType::KeyDown,
        }
    }
}

/// Callback invoked for a dispatched event
pub type EventCallback = Box<dyn FnMut(&Event) + Send>;

struct Listener {
    event_type: EventType,
    callback: EventCallback,
}

/// Registry of passive event listeners
#[derive(Default)]
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event type
    pub fn add_listener<F>(&mut self, event_type: EventType, callback: F) -> ListenerId
    where
        F: FnMut(&Event) + Send + 'static,
    {
        let id = self.listeners.insert(Listener {
            event_type,
            callback: Box::new(callback),
        });
        tracing::trace!("EventDispatcher: added {:?} listener {:?}", event_type, id);
        id
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id).is_some();
        if removed {
            tracing::trace!("EventDispatcher: removed listener {:?}", id);
        }
        removed
    }

    /// Deliver an event to every listener registered for its type
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let event_type = event.event_type();
        let mut delivered = 0;
        for (_, listener) in self.listeners.iter_mut() {
            if listener.event_type == event_type {
                (listener.callback)(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Total number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners registered for one event type
    pub fn listener_count_for(&self, event_type: EventType) -> usize {
        self.listeners
            .values()
            .filter(|l| l.event_type == event_type)
            .count()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
