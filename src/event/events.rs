use crate::layer::LayerId;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A press opened a stroke session on `layer_id`
    StrokeStarted {
        layer_id: LayerId,
        new_layer: bool,
    },
    /// A release committed the stroke session
    StrokeCommitted {
        layer_id: LayerId,
    },
    /// Drawn content changed and the canvas needs repainting
    RepaintRequested,
    /// Undo or redo changed the document
    HistoryChanged {
        undo_len: usize,
        redo_len: usize,
    },
}
