use std::hash::{DefaultHasher, Hash, Hasher};

use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stroke::StrokeSample;

/// A unique identifier for a layer
pub type LayerId = Uuid;

/// What a layer holds, and therefore how it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Vector strokes drawn by the brush tool
    Brush,
    /// An empty layer, e.g. the document background
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerStatus {
    /// A stroke session is still writing into the layer
    Draft,
    #[default]
    Committed,
}

/// Brush settings captured when a stroke layer is created
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushParams {
    pub size: f32,
    pub pressure: bool,
    pub color: Color32,
}

impl Hash for BrushParams {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.to_bits().hash(state);
        self.pressure.hash(state);
        self.color.hash(state);
    }
}

impl BrushParams {
    /// Hash deciding whether new input continues the current layer.
    pub fn params_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for BrushParams {
    fn default() -> Self {
        Self {
            size: 5.0,
            pressure: false,
            color: Color32::BLACK,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    pub data: Vec<StrokeSample>,
    /// 0 - 100
    pub opacity: u8,
    pub params: BrushParams,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub status: LayerStatus,
    pub is_vector: bool,
    pub color: Color32,
}

impl Layer {
    pub fn new_blank(name: &str, width: f32, height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind: LayerKind::Blank,
            visible: true,
            data: Vec::new(),
            opacity: 100,
            params: BrushParams::default(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            status: LayerStatus::Committed,
            is_vector: false,
            color: Color32::TRANSPARENT,
        }
    }

    /// Creates an empty draft brush layer covering the whole canvas.
    pub fn new_brush(params: BrushParams, opacity: u8, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Brush".to_string(),
            kind: LayerKind::Brush,
            visible: true,
            data: Vec::new(),
            opacity,
            params,
            x: 0.0,
            y: 0.0,
            width: canvas_width,
            height: canvas_height,
            status: LayerStatus::Draft,
            is_vector: true,
            color: params.color,
        }
    }

    pub fn is_brush(&self) -> bool {
        self.kind == LayerKind::Brush
    }

    pub fn is_draft(&self) -> bool {
        self.status == LayerStatus::Draft
    }

    /// Applies the set fields of `update` and returns an update holding the
    /// values they replaced.
    pub fn apply_update(&mut self, update: &LayerUpdate) -> LayerUpdate {
        fn swap<T: Clone>(slot: &mut T, value: &Option<T>) -> Option<T> {
            value.as_ref().map(|v| std::mem::replace(slot, v.clone()))
        }

        LayerUpdate {
            x: swap(&mut self.x, &update.x),
            y: swap(&mut self.y, &update.y),
            width: swap(&mut self.width, &update.width),
            height: swap(&mut self.height, &update.height),
            data: swap(&mut self.data, &update.data),
            status: swap(&mut self.status, &update.status),
            opacity: swap(&mut self.opacity, &update.opacity),
        }
    }
}

/// Partial update of a layer; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub data: Option<Vec<StrokeSample>>,
    pub status: Option<LayerStatus>,
    pub opacity: Option<u8>,
}

impl LayerUpdate {
    pub fn data(data: Vec<StrokeSample>) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: LayerStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_hash_tracks_every_field() {
        let base = BrushParams { size: 10.0, pressure: false, color: Color32::RED };
        assert_eq!(base.params_hash(), base.params_hash());
        assert_ne!(base.params_hash(), BrushParams { size: 11.0, ..base }.params_hash());
        assert_ne!(base.params_hash(), BrushParams { pressure: true, ..base }.params_hash());
        assert_ne!(base.params_hash(), BrushParams { color: Color32::BLUE, ..base }.params_hash());
    }

    #[test]
    fn test_apply_update_returns_inverse() {
        let mut layer = Layer::new_brush(BrushParams::default(), 100, 800.0, 600.0);
        let original = layer.clone();

        let update = LayerUpdate {
            x: Some(12.0),
            data: Some(vec![StrokeSample::point(0.0, 0.0, 5.0)]),
            ..Default::default()
        }
        .with_status(LayerStatus::Committed);
        let inverse = layer.apply_update(&update);

        assert_eq!(layer.x, 12.0);
        assert_eq!(layer.data.len(), 1);
        assert_eq!(layer.status, LayerStatus::Committed);
        assert_eq!(inverse.y, None);

        layer.apply_update(&inverse);
        assert_eq!(layer, original);
    }

    #[test]
    fn test_new_brush_layer_is_draft_vector() {
        let layer = Layer::new_brush(BrushParams::default(), 50, 640.0, 480.0);
        assert!(layer.is_brush());
        assert!(layer.is_draft());
        assert!(layer.is_vector);
        assert_eq!((layer.x, layer.y, layer.width, layer.height), (0.0, 0.0, 640.0, 480.0));
    }
}
