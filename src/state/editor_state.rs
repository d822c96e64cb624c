use crate::command::CommandResult;
use crate::state::EditorContext;
use crate::tools::{Tool, ToolKind, ToolType};

#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Idle,
    UsingTool {
        active_tool: ToolType,
    },
}

impl EditorState {
    /// Swaps in a fresh instance of `kind`, finishing the current tool first.
    pub fn set_active_tool(&mut self, kind: Option<ToolKind>, ctx: &mut EditorContext) -> CommandResult {
        // First deactivate the current tool if there is one
        if let Self::UsingTool { active_tool } = self {
            if Some(active_tool.kind()) == kind {
                return Ok(());
            }
            active_tool.deactivate(ctx)?;
        }

        ctx.active_tool = kind;
        *self = match kind {
            Some(kind) => {
                let mut new_tool = ToolType::new(kind);
                new_tool.activate(ctx);
                Self::UsingTool { active_tool: new_tool }
            }
            None => Self::Idle,
        };
        Ok(())
    }

    pub fn active_tool(&self) -> Option<&ToolType> {
        match self {
            Self::UsingTool { active_tool } => Some(active_tool),
            Self::Idle => None,
        }
    }

    pub fn active_tool_mut(&mut self) -> Option<&mut ToolType> {
        match self {
            Self::UsingTool { active_tool } => Some(active_tool),
            Self::Idle => None,
        }
    }
}
