use std::cell::RefCell;
use std::fmt;

use crate::event::{EditorEvent, EventHandler};

/// Fans editor events out to subscribers in subscription order.
///
/// Emitting only needs `&self`, so tools can report through a shared
/// context. Handlers must not emit from inside `handle_event`.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    pub fn emit(&self, event: EditorEvent) {
        self.handlers
            .borrow_mut()
            .iter_mut()
            .for_each(|handler| handler.handle_event(&event));
    }
}
