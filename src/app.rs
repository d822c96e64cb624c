use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::document::Document;
use crate::event::LoggingEventHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{Editor, EditorContext, StatePersistence};

/// Directory and name of the snapshot behind the Save/Load buttons
const SNAPSHOT_DIR: &str = "snapshots";
const SNAPSHOT_NAME: &str = "latest";

/// What survives an app restart
#[derive(Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedState {
    config: EditorConfig,
    document: Document,
}

impl Default for PersistedState {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            document: Document::new(config.canvas_width as f32, config.canvas_height as f32),
            config,
        }
    }
}

pub struct PaintApp {
    pub(crate) editor: Editor,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    snapshots: StatePersistence,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::from_state(PersistedState::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// A `config` given explicitly (e.g. loaded from a file) replaces the
    /// persisted one; the persisted document is kept either way.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<EditorConfig>) -> Self {
        let mut state: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if let Some(config) = config {
            state.config = config;
        }
        Self::from_state(state)
    }

    fn from_state(state: PersistedState) -> Self {
        let context = EditorContext::with_document(state.document, state.config);
        context.event_bus.subscribe(LoggingEventHandler);
        Self {
            editor: Editor::with_context(context),
            renderer: Renderer::default(),
            input: InputHandler::new(Rect::from_min_size(Pos2::ZERO, egui::Vec2::ZERO)),
            snapshots: StatePersistence::new(SNAPSHOT_DIR),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.editor.context.config
    }

    pub fn undo(&mut self) {
        if let Err(err) = self.editor.undo() {
            log::warn!("undo failed: {}", err);
        }
    }

    pub fn redo(&mut self) {
        if let Err(err) = self.editor.redo() {
            log::warn!("redo failed: {}", err);
        }
    }

    pub fn save_snapshot(&self) {
        if let Err(err) = self.editor.save_snapshot(&self.snapshots, SNAPSHOT_NAME) {
            log::error!("failed to save snapshot: {}", err);
        }
    }

    pub fn load_snapshot(&mut self) {
        if let Err(err) = self.editor.load_snapshot(&self.snapshots, SNAPSHOT_NAME) {
            log::error!("failed to load snapshot: {}", err);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            config: self.editor.context.config.clone(),
            document: self.editor.context.document.clone(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &state);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);

        if self.editor.context.take_repaint_request() {
            ctx.request_repaint();
        }
    }
}
