use crate::command::{CommandHistory, CommandResult};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::event::{EditorEvent, EventBus};
use crate::tools::ToolKind;

/// Everything a tool may read or change while handling input.
///
/// The document is only mutated through `history`, except for transient
/// flags such as a layer's draft status.
#[derive(Debug)]
pub struct EditorContext {
    /// The document being edited
    pub document: Document,
    pub history: CommandHistory,
    /// Shared tool configuration
    pub config: EditorConfig,
    /// The tool receiving canvas input, if any
    pub active_tool: Option<ToolKind>,
    /// Hash of the brush parameters the last brush layer was created with.
    /// Kept here so it outlives the tool instance.
    pub brush_params_hash: Option<u64>,
    /// The event bus for broadcasting editor events
    pub event_bus: EventBus,
    repaint_requested: bool,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        let document = Document::new(config.canvas_width as f32, config.canvas_height as f32);
        Self::with_document(document, config)
    }

    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        Self {
            document,
            history: CommandHistory::with_limit(config.history_limit),
            config,
            active_tool: None,
            brush_params_hash: None,
            event_bus: EventBus::new(),
            repaint_requested: false,
        }
    }

    /// Marks the canvas as needing a redraw
    pub fn request_repaint(&mut self) {
        if !self.repaint_requested {
            self.event_bus.emit(EditorEvent::RepaintRequested);
        }
        self.repaint_requested = true;
    }

    /// Returns and clears the pending repaint request
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    pub fn undo(&mut self) -> CommandResult {
        self.history.undo(&mut self.document)?;
        self.history_changed();
        Ok(())
    }

    pub fn redo(&mut self) -> CommandResult {
        self.history.redo(&mut self.document)?;
        self.history_changed();
        Ok(())
    }

    fn history_changed(&mut self) {
        self.event_bus.emit(EditorEvent::HistoryChanged {
            undo_len: self.history.undo_stack().len(),
            redo_len: self.history.redo_stack().len(),
        });
        self.request_repaint();
    }
}
