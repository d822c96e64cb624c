mod bus;
mod events;

pub use bus::EventBus;
pub use events::EditorEvent;

pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

/// Forwards every event to the `log` facade
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        log::debug!("editor event: {:?}", event);
    }
}
