use serde::{Deserialize, Serialize};

use crate::command::CommandError;
use crate::layer::{Layer, LayerId, LayerUpdate};

/// Ordered layer stack (bottom first) plus the active layer pointer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    layers: Vec<Layer>,
    active_layer: Option<LayerId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Document {
    /// Creates a document with a single blank background layer.
    pub fn new(width: f32, height: f32) -> Self {
        let background = Layer::new_blank("Background", width, height);
        Self {
            active_layer: Some(background.id),
            layers: vec![background],
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    pub fn layer_index(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active_layer
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.active_layer.and_then(|id| self.layer(id))
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        let id = self.active_layer?;
        self.layer_mut(id)
    }

    pub fn set_active_layer(&mut self, id: Option<LayerId>) {
        self.active_layer = id;
    }

    /// Inserts a layer at `index` (top of the stack when `None`) and makes it active.
    pub fn insert_layer(&mut self, layer: Layer, index: Option<usize>) -> Result<(), CommandError> {
        if self.layer(layer.id).is_some() {
            return Err(CommandError::DuplicateLayer(layer.id));
        }
        let index = index.unwrap_or(self.layers.len()).min(self.layers.len());
        self.active_layer = Some(layer.id);
        self.layers.insert(index, layer);
        Ok(())
    }

    /// Removes a layer, returning it together with its former index.
    ///
    /// When the removed layer was active, the layer below it (or the new
    /// bottom layer) becomes active.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<(Layer, usize), CommandError> {
        let index = self.layer_index(id).ok_or(CommandError::LayerNotFound(id))?;
        let layer = self.layers.remove(index);
        if self.active_layer == Some(id) {
            self.active_layer = self
                .layers
                .get(index.saturating_sub(1))
                .map(|layer| layer.id);
        }
        Ok((layer, index))
    }

    /// Applies a partial update, returning the values it replaced.
    pub fn update_layer(&mut self, id: LayerId, update: &LayerUpdate) -> Result<LayerUpdate, CommandError> {
        let layer = self.layer_mut(id).ok_or(CommandError::LayerNotFound(id))?;
        Ok(layer.apply_update(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{BrushParams, LayerKind};

    #[test]
    fn test_new_document_has_active_background() {
        let doc = Document::new(100.0, 50.0);
        let active = doc.active_layer().unwrap();
        assert_eq!(active.kind, LayerKind::Blank);
        assert_eq!(doc.layers().len(), 1);
    }

    #[test]
    fn test_insert_and_remove_restores_active() {
        let mut doc = Document::default();
        let background = doc.active_layer_id().unwrap();
        let layer = Layer::new_brush(BrushParams::default(), 100, 800.0, 600.0);
        let id = layer.id;

        doc.insert_layer(layer.clone(), None).unwrap();
        assert_eq!(doc.active_layer_id(), Some(id));
        assert!(matches!(doc.insert_layer(layer, None), Err(CommandError::DuplicateLayer(_))));

        let (_, index) = doc.remove_layer(id).unwrap();
        assert_eq!(index, 1);
        assert_eq!(doc.active_layer_id(), Some(background));
    }

    #[test]
    fn test_update_missing_layer_fails() {
        let mut doc = Document::default();
        let result = doc.update_layer(uuid::Uuid::new_v4(), &LayerUpdate::default());
        assert!(matches!(result, Err(CommandError::LayerNotFound(_))));
    }
}
