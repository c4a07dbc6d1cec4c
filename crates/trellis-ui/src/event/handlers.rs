use super::{Event, EventType};
use crate::tree::WidgetTree;
use std::fmt;
use std::rc::Rc;
use trellis_core::alloc::HashMap;

/// Callback invoked for a dispatched event.
///
/// Handlers receive the whole tree, so they can inspect or mutate any widget
/// (including the one they are registered on) while the event is delivered.
pub type EventHandler = Rc<dyn Fn(&mut WidgetTree, &mut Event<'_>)>;

/// Identity of a registered handler, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Per-widget registry mapping event types to handler lists.
#[derive(Default)]
pub struct Handlers {
    map: HashMap<EventType, Vec<(HandlerId, EventHandler)>>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `event_type` under `id`.
    pub fn add(&mut self, event_type: EventType, id: HandlerId, handler: EventHandler) {
        self.map.entry(event_type).or_default().push((id, handler));
    }

    /// Remove a handler by identity, preserving the order of the rest.
    /// Returns `false` if no such handler was registered for `event_type`.
    pub fn remove(&mut self, event_type: EventType, id: HandlerId) -> bool {
        let Some(list) = self.map.get_mut(&event_type) else {
            return false;
        };
        let Some(index) = list.iter().position(|(handler_id, _)| *handler_id == id) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.map.remove(&event_type);
        }
        true
    }

    /// Clones of the handlers registered for `event_type`, in registration
    /// order. Dispatch iterates this copy so handlers may add or remove
    /// registrations without disturbing the delivery in progress.
    pub fn snapshot(&self, event_type: EventType) -> Vec<EventHandler> {
        self.map
            .get(&event_type)
            .map(|list| list.iter().map(|(_, handler)| Rc::clone(handler)).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, event_type: EventType) -> usize {
        self.map.get(&event_type).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event_type, list) in &self.map {
            map.entry(event_type, &list.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> EventHandler {
        Rc::new(|_, _| {})
    }

    #[test]
    fn remove_compacts_and_keeps_order() {
        let mut handlers = Handlers::new();
        let (a, b, c) = (HandlerId(0), HandlerId(1), HandlerId(2));
        for id in [a, b, c] {
            handlers.add(EventType::Paint, id, noop());
        }
        assert!(handlers.remove(EventType::Paint, b));
        assert_eq!(handlers.count(EventType::Paint), 2);
        let ids: Vec<_> = handlers.map[&EventType::Paint].iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn removing_last_handler_drops_the_entry() {
        let mut handlers = Handlers::new();
        let id = HandlerId(7);
        handlers.add(EventType::KeyDown, id, noop());
        assert!(handlers.remove(EventType::KeyDown, id));
        assert!(handlers.is_empty());
        assert!(!handlers.remove(EventType::KeyDown, id));
    }

    #[test]
    fn remove_requires_matching_type() {
        let mut handlers = Handlers::new();
        let id = HandlerId(3);
        handlers.add(EventType::MouseDown, id, noop());
        assert!(!handlers.remove(EventType::MouseUp, id));
        assert_eq!(handlers.count(EventType::MouseDown), 1);
    }
}
