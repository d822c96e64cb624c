use brush_paint::command::{Command, CommandError, CommandHistory};
use brush_paint::config::EditorConfig;
use brush_paint::layer::{BrushParams, LayerStatus, LayerUpdate};
use brush_paint::{Document, Editor, InputEvent, InputLocation, Layer, StrokeSample};
use egui::{PointerButton, pos2};

fn location(x: f32, y: f32) -> InputLocation {
    InputLocation::new(pos2(x, y), true)
}

fn draw(editor: &mut Editor, path: &[(f32, f32)]) {
    let (first, last) = (path[0], path[path.len() - 1]);
    let mut events = vec![InputEvent::PointerDown {
        location: location(first.0, first.1),
        button: PointerButton::Primary,
        pressure: None,
    }];
    events.extend(path[..path.len() - 1].iter().map(|&(x, y)| InputEvent::PointerMove {
        location: location(x, y),
        held_buttons: vec![PointerButton::Primary],
        pressure: None,
    }));
    events.push(InputEvent::PointerUp {
        location: location(last.0, last.1),
        button: PointerButton::Primary,
    });
    for event in &events {
        editor.handle_event(event).unwrap();
    }
}

#[test]
fn test_whole_stroke_is_one_undo_step() {
    let mut editor = Editor::new(EditorConfig::default());
    let background = editor.document().active_layer_id();
    draw(&mut editor, &[(10.0, 10.0), (20.0, 15.0), (30.0, 30.0), (40.0, 10.0)]);

    let history = &editor.context.history;
    assert_eq!(history.undo_stack().len(), 1);
    assert_eq!(history.undo_stack()[0].name(), "new_brush_layer");
    assert_eq!(history.undo_stack()[0].label(), "New Brush Layer");

    let drawn = editor.document().active_layer().unwrap().clone();
    editor.undo().unwrap();
    assert_eq!(editor.document().layers().len(), 1);
    assert_eq!(editor.document().active_layer_id(), background);

    editor.redo().unwrap();
    assert_eq!(editor.document().active_layer(), Some(&drawn));
    assert_eq!(drawn.status, LayerStatus::Committed);
}

#[test]
fn test_undo_continuation_restores_previous_stroke() {
    let mut editor = Editor::new(EditorConfig::default());
    draw(&mut editor, &[(10.0, 10.0), (20.0, 20.0)]);
    let before = editor.document().active_layer().unwrap().clone();

    draw(&mut editor, &[(100.0, 5.0), (120.0, 90.0)]);
    let history = &editor.context.history;
    assert_eq!(history.undo_stack().len(), 2);
    assert_eq!(history.undo_stack()[1].name(), "update_brush_layer");
    assert!(editor.document().active_layer().unwrap().data.contains(&StrokeSample::Break));

    editor.undo().unwrap();
    assert_eq!(editor.document().active_layer(), Some(&before));
}

#[test]
fn test_undo_is_refused_mid_stroke() {
    let mut editor = Editor::new(EditorConfig::default());
    draw(&mut editor, &[(10.0, 10.0), (20.0, 20.0)]);

    editor
        .handle_event(&InputEvent::PointerDown {
            location: location(5.0, 5.0),
            button: PointerButton::Primary,
            pressure: None,
        })
        .unwrap();
    assert_eq!(editor.undo(), Err(CommandError::TransactionOpen));
    assert!(!editor.context.history.can_undo());
}

#[test]
fn test_keyboard_shortcuts_undo_and_redo() {
    let mut editor = Editor::new(EditorConfig::default());
    draw(&mut editor, &[(10.0, 10.0), (20.0, 20.0)]);

    let key = |key, shift| InputEvent::KeyDown {
        key,
        modifiers: egui::Modifiers {
            command: true,
            shift,
            ..Default::default()
        },
    };

    editor.handle_event(&key(egui::Key::Z, false)).unwrap();
    assert_eq!(editor.document().layers().len(), 1);
    editor.handle_event(&key(egui::Key::Z, true)).unwrap();
    assert_eq!(editor.document().layers().len(), 2);
}

#[test]
fn test_history_replays_layer_commands() {
    let mut doc = Document::new(200.0, 100.0);
    let mut history = CommandHistory::new();
    let layer = Layer::new_brush(BrushParams::default(), 100, 200.0, 100.0);
    let id = layer.id;

    history.execute(Command::insert_layer(layer), &mut doc).unwrap();
    let update = LayerUpdate {
        x: Some(4.0),
        data: Some(vec![StrokeSample::point(0.0, 0.0, 5.0)]),
        ..Default::default()
    };
    history.execute(Command::update_layer(id, update), &mut doc).unwrap();

    history.undo(&mut doc).unwrap();
    let layer = doc.layer(id).unwrap();
    assert_eq!(layer.x, 0.0);
    assert!(layer.data.is_empty());

    history.undo(&mut doc).unwrap();
    assert!(doc.layer(id).is_none());
    assert_eq!(history.undo(&mut doc), Err(CommandError::NothingToUndo));

    history.redo(&mut doc).unwrap();
    history.redo(&mut doc).unwrap();
    assert_eq!(doc.layer(id).unwrap().x, 4.0);
}

#[test]
fn test_update_of_missing_layer_is_an_error() {
    let mut doc = Document::default();
    let mut history = CommandHistory::new();
    let missing = uuid::Uuid::new_v4();

    let result = history.execute(Command::update_layer(missing, LayerUpdate::default()), &mut doc);
    assert_eq!(result, Err(CommandError::LayerNotFound(missing)));
    assert!(!history.can_undo());
}
