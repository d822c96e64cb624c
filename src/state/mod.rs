mod context;
mod editor;
mod editor_state;
mod persistence;

pub use context::EditorContext;
pub use editor::Editor;
pub use editor_state::EditorState;
pub use persistence::{DocumentSnapshot, PersistenceError, PersistenceResult, StatePersistence};
