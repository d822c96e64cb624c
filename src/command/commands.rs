use serde::{Deserialize, Serialize};

use super::CommandError;
use crate::document::Document;
use crate::layer::{Layer, LayerId, LayerUpdate};

/// Undoable mutations of the document's layer stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Inserts a layer (on top when `index` is `None`) and makes it active
    InsertLayer {
        layer: Box<Layer>,
        index: Option<usize>,
    },
    /// Removes a layer; `restore_active` overrides the next active layer
    RemoveLayer {
        layer_id: LayerId,
        restore_active: Option<LayerId>,
    },
    /// Applies a partial update to a layer
    UpdateLayer {
        layer_id: LayerId,
        update: LayerUpdate,
    },
}

impl Command {
    pub fn insert_layer(layer: Layer) -> Self {
        Self::InsertLayer {
            layer: Box::new(layer),
            index: None,
        }
    }

    pub fn update_layer(layer_id: LayerId, update: LayerUpdate) -> Self {
        Self::UpdateLayer { layer_id, update }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertLayer { .. } => "Insert Layer",
            Self::RemoveLayer { .. } => "Remove Layer",
            Self::UpdateLayer { .. } => "Update Layer",
        }
    }

    /// Applies the command and returns the command that reverts it.
    pub fn apply(&self, document: &mut Document) -> Result<Command, CommandError> {
        match self {
            Self::InsertLayer { layer, index } => {
                let previous_active = document.active_layer_id();
                document.insert_layer(layer.as_ref().clone(), *index)?;
                Ok(Self::RemoveLayer {
                    layer_id: layer.id,
                    restore_active: previous_active,
                })
            }
            Self::RemoveLayer { layer_id, restore_active } => {
                let (layer, index) = document.remove_layer(*layer_id)?;
                if restore_active.is_some() {
                    document.set_active_layer(*restore_active);
                }
                Ok(Self::InsertLayer {
                    layer: Box::new(layer),
                    index: Some(index),
                })
            }
            Self::UpdateLayer { layer_id, update } => {
                let previous = document.update_layer(*layer_id, update)?;
                Ok(Self::UpdateLayer {
                    layer_id: *layer_id,
                    update: previous,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::BrushParams;
    use crate::stroke::StrokeSample;

    #[test]
    fn test_insert_inverse_restores_active_layer() {
        let mut doc = Document::default();
        let background = doc.active_layer_id();
        let layer = Layer::new_brush(BrushParams::default(), 100, 800.0, 600.0);
        let id = layer.id;

        let inverse = Command::insert_layer(layer).apply(&mut doc).unwrap();
        assert_eq!(doc.active_layer_id(), Some(id));

        let redo = inverse.apply(&mut doc).unwrap();
        assert!(doc.layer(id).is_none());
        assert_eq!(doc.active_layer_id(), background);

        redo.apply(&mut doc).unwrap();
        assert_eq!(doc.layer_index(id), Some(1));
    }

    #[test]
    fn test_update_inverse_restores_data() {
        let mut doc = Document::default();
        let layer = Layer::new_brush(BrushParams::default(), 100, 800.0, 600.0);
        let id = layer.id;
        doc.insert_layer(layer, None).unwrap();

        let update = LayerUpdate::data(vec![StrokeSample::point(1.0, 1.0, 5.0)]);
        let inverse = Command::update_layer(id, update).apply(&mut doc).unwrap();
        assert_eq!(doc.layer(id).unwrap().data.len(), 1);

        inverse.apply(&mut doc).unwrap();
        assert!(doc.layer(id).unwrap().data.is_empty());
    }
}
