use egui::{Sense, vec2};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let config = &app.editor.context.config;
        let size = vec2(config.canvas_width as f32, config.canvas_height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::drag());
        let canvas_rect = response.rect;

        // Handle input
        app.input.set_canvas_rect(canvas_rect);
        let events = app.input.process_input(ctx);
        app.editor.handle_events(&events);

        // Render the canvas
        app.renderer
            .render(&painter, canvas_rect, app.editor.document(), app.editor.preview());
    });
}
