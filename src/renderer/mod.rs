use egui::{Color32, Painter, Rect};

use crate::document::Document;
use crate::layer::{Layer, LayerId, LayerKind};
use crate::stroke::StrokeSample;
use crate::tools::brush;

mod recording;
mod surface;

pub use recording::{Disc, DrawOp, RecordingSurface, Segment};
pub use surface::{DrawingSurface, LineCap, LineJoin, PainterSurface};

/// Something that can draw itself onto a [`DrawingSurface`]
pub trait Renderable {
    fn render(&self, surface: &mut dyn DrawingSurface);
}

impl Renderable for Layer {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        match self.kind {
            LayerKind::Brush => brush::render_strokes(surface, self, &self.data),
            LayerKind::Blank => {}
        }
    }
}

/// Samples of an open stroke session that have not reached the document yet
#[derive(Debug, Clone, Copy)]
pub struct StrokePreview<'a> {
    pub layer_id: LayerId,
    pub pending: &'a [StrokeSample],
}

#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Color32::WHITE)
    }
}

impl Renderer {
    pub fn new(background: Color32) -> Self {
        Self { background }
    }

    /// Draws every visible layer bottom-up with its opacity.
    ///
    /// Args:
    ///     surface: The target to draw on
    ///     document: The layers to draw
    ///     preview: Pending samples to show on top of their layer's data
    pub fn render_document(
        &self,
        surface: &mut dyn DrawingSurface,
        document: &Document,
        preview: Option<StrokePreview<'_>>,
    ) {
        for layer in document.layers().iter().filter(|layer| layer.visible) {
            surface.save();
            surface.set_global_alpha(f32::from(layer.opacity) / 100.0);

            match preview {
                Some(preview) if preview.layer_id == layer.id && !preview.pending.is_empty() => {
                    let mut samples = layer.data.clone();
                    samples.extend_from_slice(preview.pending);
                    brush::render_strokes(surface, layer, &samples);
                }
                _ => layer.render(surface),
            }

            surface.restore();
        }
    }

    /// Renders the canvas background and the document into `rect`
    ///
    /// Args:
    ///     painter: The painter to draw with
    ///     rect: Screen rectangle of the canvas
    pub fn render(
        &self,
        painter: &Painter,
        rect: Rect,
        document: &Document,
        preview: Option<StrokePreview<'_>>,
    ) {
        painter.rect_filled(rect, 0.0, self.background);
        let painter = painter.with_clip_rect(rect);
        let mut surface = PainterSurface::new(&painter, rect.min);
        self.render_document(&mut surface, document, preview);
    }
}
