#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod event;
pub mod input;
pub mod layer;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use command::{Command, CommandError, CommandHistory};
pub use config::EditorConfig;
pub use document::Document;
pub use input::{InputEvent, InputLocation};
pub use layer::{Layer, LayerId, LayerKind};
pub use renderer::Renderer;
pub use state::{Editor, EditorContext};
pub use stroke::StrokeSample;
pub use tools::{BrushTool, Tool};
