use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EditorContext;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::util::time;

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write state: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read state file: {0}")]
    ReadError(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Serializable copy of the document and the configuration it was drawn with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSnapshot {
    pub document: Document,
    pub config: EditorConfig,
    /// Seconds since the UNIX epoch
    pub timestamp: u64,
    /// Version of the application when the snapshot was taken
    pub version: String,
}

impl DocumentSnapshot {
    pub fn new(ctx: &EditorContext) -> Self {
        Self {
            document: ctx.document.clone(),
            config: ctx.config.clone(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Replaces the context's document and configuration.
    ///
    /// History and the last brush parameters refer to the old document, so
    /// they are cleared.
    pub fn restore(self, ctx: &mut EditorContext) {
        if self.version != env!("CARGO_PKG_VERSION") {
            warn!(
                "Snapshot version {} differs from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        ctx.document = self.document;
        ctx.config = self.config;
        ctx.history.clear();
        ctx.brush_params_hash = None;
        ctx.request_repaint();
    }
}

/// Saves and loads document snapshots as JSON files in one directory
#[derive(Debug, Clone)]
pub struct StatePersistence {
    /// Directory where state files are stored
    state_dir: PathBuf,
}

impl StatePersistence {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.state_dir.join(format!("{}.json", name))
    }

    /// Save a snapshot of the current editor state
    pub fn save_snapshot(&self, ctx: &EditorContext, name: &str) -> PersistenceResult<PathBuf> {
        let path = self.path(name);

        // Create state directory if it doesn't exist
        fs::create_dir_all(&self.state_dir)?;

        let json = serde_json::to_string_pretty(&DocumentSnapshot::new(ctx))?;
        fs::write(&path, json)?;
        info!("saved snapshot to {}", path.display());

        Ok(path)
    }

    /// Load a snapshot by name
    pub fn load_snapshot(&self, name: &str) -> PersistenceResult<DocumentSnapshot> {
        Self::load_file(&self.path(name))
    }

    pub fn load_file(path: &Path) -> PersistenceResult<DocumentSnapshot> {
        let json = fs::read_to_string(path)
            .map_err(|e| PersistenceError::ReadError(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{BrushParams, Layer};
    use crate::stroke::StrokeSample;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("brush_paint_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_snapshot_survives_save_and_load() {
        let mut ctx = EditorContext::new(EditorConfig::default());
        let mut layer = Layer::new_brush(BrushParams::default(), 80, 800.0, 600.0);
        layer.data = vec![StrokeSample::point(0.0, 0.0, 5.0), StrokeSample::Break];
        ctx.document.insert_layer(layer, None).unwrap();

        let dir = temp_dir("roundtrip");
        let persistence = StatePersistence::new(&dir);
        persistence.save_snapshot(&ctx, "drawing").unwrap();

        let snapshot = persistence.load_snapshot("drawing").unwrap();
        assert_eq!(snapshot.document, ctx.document);
        assert_eq!(snapshot.version, env!("CARGO_PKG_VERSION"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_snapshot_is_read_error() {
        let persistence = StatePersistence::new(temp_dir("missing"));
        assert!(matches!(
            persistence.load_snapshot("nope"),
            Err(PersistenceError::ReadError(_))
        ));
    }

    #[test]
    fn test_restore_clears_history() {
        let mut ctx = EditorContext::new(EditorConfig::default());
        let snapshot = DocumentSnapshot::new(&ctx);
        ctx.history
            .execute(
                crate::command::Command::insert_layer(Layer::new_brush(BrushParams::default(), 100, 1.0, 1.0)),
                &mut ctx.document,
            )
            .unwrap();

        snapshot.clone().restore(&mut ctx);
        assert_eq!(ctx.document, snapshot.document);
        assert!(!ctx.history.can_undo());
    }
}
