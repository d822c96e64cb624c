use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Checkbox, Slider};

use crate::PaintApp;
use crate::tools::{Tool, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor().active_tool().map(|tool| tool.kind());
            if ui
                .selectable_label(active == Some(ToolKind::Brush), "🖌 Brush")
                .clicked()
            {
                let next = if active == Some(ToolKind::Brush) { None } else { Some(ToolKind::Brush) };
                log::info!("Tool selected from UI: {:?}", next);
                if let Err(err) = app.editor.set_active_tool(next) {
                    log::warn!("failed to switch tool: {}", err);
                }
            }
            ui.separator();

            let config = app.config_mut();
            ui.horizontal(|ui| {
                ui.label("Color:");
                color_edit_button_srgba(ui, &mut config.color, Alpha::Opaque);
            });
            ui.horizontal(|ui| {
                ui.label("Size:");
                ui.add(Slider::new(&mut config.brush.size, 1.0..=100.0));
            });
            ui.horizontal(|ui| {
                ui.label("Alpha:");
                ui.add(Slider::new(&mut config.alpha, 0..=255));
            });
            ui.add(Checkbox::new(&mut config.brush.pressure, "Pressure"));

            if let Some(brush) = app.editor().active_tool().and_then(|tool| tool.as_brush()) {
                let pressure = brush.pressure();
                if pressure.is_supported() {
                    ui.label(format!("Pen pressure: {:.2}", pressure.pressure()));
                }
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let history = &app.editor().context.history;
                let (can_undo, can_redo) = (history.can_undo(), history.can_redo());

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.separator();

            let history = &app.editor().context.history;
            egui::Grid::new("command_history_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Undo Stack");
                    ui.strong("Redo Stack");
                    ui.end_row();

                    let undo_stack = history.undo_stack();
                    let redo_stack = history.redo_stack();
                    for i in 0..undo_stack.len().max(redo_stack.len()) {
                        ui.label(undo_stack.get(i).map_or("", |entry| entry.label()));
                        ui.label(redo_stack.get(i).map_or("", |entry| entry.label()));
                        ui.end_row();
                    }
                });

            ui.separator();
            ui.label(format!("Layers: {}", app.editor().document().layers().len()));

            // Snapshots are plain files, so only native builds offer them
            if cfg!(not(target_arch = "wasm32")) {
                ui.horizontal(|ui| {
                    if ui.button("Save snapshot").clicked() {
                        app.save_snapshot();
                    }
                    if ui.button("Load snapshot").clicked() {
                        app.load_snapshot();
                    }
                });
            }
        });
}
