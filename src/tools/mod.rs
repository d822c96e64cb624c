use serde::{Deserialize, Serialize};

use crate::command::CommandResult;
use crate::input::MouseInfo;
use crate::renderer::StrokePreview;
use crate::state::EditorContext;

pub mod brush;

pub use brush::BrushTool;

/// Identifies a tool without carrying its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Brush,
}

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    fn kind(&self) -> ToolKind;

    /// Called when the tool is selected (activated).
    fn activate(&mut self, _ctx: &mut EditorContext) {
        // default: do nothing
    }

    /// Called when the tool is deselected. Must finish any open gesture.
    fn deactivate(&mut self, ctx: &mut EditorContext) -> CommandResult;

    /// Raw pointer press, seen before the gesture-level [`Tool::on_pointer_down`].
    fn on_raw_pointer_down(&mut self, _pressure: Option<f32>) {}

    /// Raw pointer movement, seen before [`Tool::on_pointer_move`].
    fn on_raw_pointer_move(&mut self, _pressure: Option<f32>) {}

    /// Handle pointer press (e.g., mouse down) on the canvas.
    fn on_pointer_down(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult;

    /// Handle pointer movement, with or without a button held.
    fn on_pointer_move(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult;

    /// Handle pointer release (e.g., mouse up).
    fn on_pointer_up(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult;

    /// Uncommitted content to draw over the document
    fn preview(&self) -> Option<StrokePreview<'_>> {
        None
    }
}

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug, Clone)]
pub enum ToolType {
    Brush(BrushTool),
}

impl ToolType {
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Brush => Self::Brush(BrushTool::new()),
        }
    }

    pub fn as_brush(&self) -> Option<&BrushTool> {
        match self {
            Self::Brush(tool) => Some(tool),
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Brush(tool) => tool.name(),
        }
    }

    fn kind(&self) -> ToolKind {
        match self {
            Self::Brush(tool) => tool.kind(),
        }
    }

    fn activate(&mut self, ctx: &mut EditorContext) {
        match self {
            Self::Brush(tool) => tool.activate(ctx),
        }
    }

    fn deactivate(&mut self, ctx: &mut EditorContext) -> CommandResult {
        match self {
            Self::Brush(tool) => tool.deactivate(ctx),
        }
    }

    fn on_raw_pointer_down(&mut self, pressure: Option<f32>) {
        match self {
            Self::Brush(tool) => tool.on_raw_pointer_down(pressure),
        }
    }

    fn on_raw_pointer_move(&mut self, pressure: Option<f32>) {
        match self {
            Self::Brush(tool) => tool.on_raw_pointer_move(pressure),
        }
    }

    fn on_pointer_down(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult {
        match self {
            Self::Brush(tool) => tool.on_pointer_down(mouse, ctx),
        }
    }

    fn on_pointer_move(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult {
        match self {
            Self::Brush(tool) => tool.on_pointer_move(mouse, ctx),
        }
    }

    fn on_pointer_up(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult {
        match self {
            Self::Brush(tool) => tool.on_pointer_up(mouse, ctx),
        }
    }

    fn preview(&self) -> Option<StrokePreview<'_>> {
        match self {
            Self::Brush(tool) => tool.preview(),
        }
    }
}
