use std::path::PathBuf;

use egui::Key;
use log::warn;

use crate::command::CommandResult;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::input::{GestureTracker, InputEvent, InputLocation};
use crate::renderer::StrokePreview;
use crate::state::{EditorContext, EditorState, PersistenceResult, StatePersistence};
use crate::tools::{Tool, ToolKind, ToolType};

/// Routes input events to the active tool, in delivery order.
///
/// Each pointer event reaches the tool twice: first raw (for pressure
/// tracking), then as a [`crate::input::MouseInfo`] derived by the gesture
/// tracker.
#[derive(Debug)]
pub struct Editor {
    pub context: EditorContext,
    state: EditorState,
    gestures: GestureTracker,
}

impl Editor {
    /// Creates an editor with the brush selected
    pub fn new(config: EditorConfig) -> Self {
        Self::with_context(EditorContext::new(config))
    }

    pub fn with_context(mut context: EditorContext) -> Self {
        context.active_tool = Some(ToolKind::Brush);
        Self {
            context,
            state: EditorState::UsingTool {
                active_tool: ToolType::new(ToolKind::Brush),
            },
            gestures: GestureTracker::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.context.document
    }

    pub fn active_tool(&self) -> Option<&ToolType> {
        self.state.active_tool()
    }

    pub fn set_active_tool(&mut self, kind: Option<ToolKind>) -> CommandResult {
        self.state.set_active_tool(kind, &mut self.context)
    }

    /// Uncommitted stroke samples to draw over the document
    pub fn preview(&self) -> Option<StrokePreview<'_>> {
        self.state.active_tool().and_then(|tool| tool.preview())
    }

    pub fn undo(&mut self) -> CommandResult {
        self.context.undo()
    }

    pub fn redo(&mut self) -> CommandResult {
        self.context.redo()
    }

    /// Writes the document and configuration to snapshot `name`
    pub fn save_snapshot(&self, persistence: &StatePersistence, name: &str) -> PersistenceResult<PathBuf> {
        persistence.save_snapshot(&self.context, name)
    }

    /// Replaces the document and configuration with snapshot `name`.
    ///
    /// An open stroke is committed to the outgoing document first.
    pub fn load_snapshot(&mut self, persistence: &StatePersistence, name: &str) -> PersistenceResult<()> {
        let snapshot = persistence.load_snapshot(name)?;

        let tool = self.context.active_tool;
        if let Err(err) = self.set_active_tool(None).and_then(|()| self.set_active_tool(tool)) {
            warn!("failed to finish the open stroke: {}", err);
        }
        snapshot.restore(&mut self.context);
        Ok(())
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            if let Err(err) = self.handle_event(event) {
                warn!("failed to handle {:?}: {}", event, err);
            }
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> CommandResult {
        match event {
            InputEvent::KeyDown { key, modifiers } if modifiers.command => match key {
                Key::Z if modifiers.shift => self.redo(),
                Key::Z => self.undo(),
                Key::Y => self.redo(),
                _ => Ok(()),
            },
            InputEvent::KeyDown { .. } => Ok(()),
            InputEvent::PointerDown { location, button, pressure } => {
                let mouse = self.gestures.pointer_down(*location, *button);
                let Some(tool) = self.state.active_tool_mut() else {
                    return Ok(());
                };
                tool.on_raw_pointer_down(*pressure);
                tool.on_pointer_down(&mouse, &mut self.context)
            }
            InputEvent::PointerMove { location, pressure, .. } => {
                let mouse = self.gestures.pointer_move(*location);
                let Some(tool) = self.state.active_tool_mut() else {
                    return Ok(());
                };
                tool.on_raw_pointer_move(*pressure);
                tool.on_pointer_move(&mouse, &mut self.context)
            }
            InputEvent::PointerUp { location, .. } => self.release(*location),
            // The window lost the pointer mid-drag; no release will follow
            InputEvent::PointerLeave { last_known_location } => self.release(*last_known_location),
        }
    }

    fn release(&mut self, location: InputLocation) -> CommandResult {
        if !self.gestures.is_pressed() {
            return Ok(());
        }
        let mouse = self.gestures.pointer_up(location);
        match self.state.active_tool_mut() {
            Some(tool) => tool.on_pointer_up(&mouse, &mut self.context),
            None => Ok(()),
        }
    }
}
