mod commands;
mod history;

use thiserror::Error;

use crate::layer::LayerId;

pub use commands::Command;
pub use history::{CommandHistory, HistoryEntry};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("layer {0} not found")]
    LayerNotFound(LayerId),

    #[error("layer {0} already exists")]
    DuplicateLayer(LayerId),

    #[error("a history transaction is already open")]
    TransactionOpen,

    #[error("no history transaction is open")]
    NoTransaction,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}
