use std::f32::consts::TAU;

use log::{debug, trace};

use crate::command::{Command, CommandError, CommandResult};
use crate::event::EditorEvent;
use crate::input::{MouseInfo, PressureTracker};
use crate::layer::{Layer, LayerId, LayerStatus, LayerUpdate};
use crate::renderer::{DrawingSurface, LineCap, LineJoin, StrokePreview};
use crate::state::EditorContext;
use crate::stroke::{self, StrokeSample};
use crate::tools::{Tool, ToolKind};

/// History entry for a press that creates a new layer
pub const NEW_LAYER_ACTION: (&str, &str) = ("new_brush_layer", "New Brush Layer");
/// History entry for a press that continues the active layer
pub const UPDATE_LAYER_ACTION: (&str, &str) = ("update_brush_layer", "Update Brush Layer");

/// The gesture in progress: its target layer and the samples dragged so far
#[derive(Debug, Clone)]
struct StrokeSession {
    layer_id: LayerId,
    pending: Vec<StrokeSample>,
}

/// Freehand brush drawing vector strokes into brush layers.
///
/// A press opens a history transaction and either inserts a new layer or
/// appends a break to the active one. Drag samples collect in a pending
/// buffer. The release folds them into the layer, re-bases the data onto its
/// bounding box and closes the transaction, so one stroke is one undo step.
#[derive(Debug, Clone, Default)]
pub struct BrushTool {
    pressure: PressureTracker,
    session: Option<StrokeSession>,
}

impl BrushTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressure(&self) -> &PressureTracker {
        &self.pressure
    }

    fn start_stroke(&mut self, ctx: &mut EditorContext) -> CommandResult {
        if self.session.is_some() {
            self.finish_stroke(ctx, None)?;
        }

        let params = ctx.config.brush_params();
        let params_hash = params.params_hash();
        let continued = ctx
            .document
            .active_layer()
            .filter(|layer| layer.is_brush() && ctx.brush_params_hash == Some(params_hash))
            .map(|layer| {
                let mut data = layer.data.clone();
                data.push(StrokeSample::Break);
                (layer.id, data)
            });

        let (layer_id, command, action, new_layer) = match continued {
            Some((layer_id, data)) => (
                layer_id,
                Command::update_layer(layer_id, LayerUpdate::data(data)),
                UPDATE_LAYER_ACTION,
                false,
            ),
            None => {
                let layer = Layer::new_brush(
                    params,
                    ctx.config.opacity(),
                    ctx.config.canvas_width as f32,
                    ctx.config.canvas_height as f32,
                );
                (layer.id, Command::insert_layer(layer), NEW_LAYER_ACTION, true)
            }
        };

        ctx.history.begin_transaction(action.0, action.1)?;
        if let Err(err) = ctx.history.execute(command, &mut ctx.document) {
            ctx.history.commit_transaction()?;
            return Err(err);
        }
        if new_layer {
            ctx.brush_params_hash = Some(params_hash);
        }

        debug!("stroke started on layer {} (new layer: {})", layer_id, new_layer);
        self.session = Some(StrokeSession {
            layer_id,
            pending: Vec::new(),
        });
        ctx.event_bus.emit(EditorEvent::StrokeStarted { layer_id, new_layer });
        Ok(())
    }

    /// Commits the open session, if any, re-basing the layer onto its samples.
    /// With a release position the final sample is appended first.
    fn finish_stroke(&mut self, ctx: &mut EditorContext, release: Option<&MouseInfo>) -> CommandResult {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        let layer_id = session.layer_id;
        let Some(layer) = ctx.document.layer(layer_id) else {
            ctx.history.commit_transaction()?;
            return Err(CommandError::LayerNotFound(layer_id));
        };

        if let Some(mouse) = release {
            let width = self.pressure.line_width(ctx.config.brush.size, ctx.config.brush.pressure);
            session.pending.push(sample_at(mouse, layer, width));
        }
        let mut data = layer.data.clone();
        data.append(&mut session.pending);

        let update = match stroke::normalize(&data) {
            Some(normalized) => LayerUpdate {
                x: Some(layer.x + normalized.min_x),
                y: Some(layer.y + normalized.min_y),
                width: Some(normalized.width),
                height: Some(normalized.height),
                data: Some(normalized.samples),
                ..Default::default()
            },
            None => LayerUpdate::data(data),
        }
        .with_status(LayerStatus::Committed);

        let result = ctx
            .history
            .execute(Command::update_layer(layer_id, update), &mut ctx.document);
        ctx.history.commit_transaction()?;
        result?;

        debug!("stroke committed on layer {}", layer_id);
        ctx.event_bus.emit(EditorEvent::StrokeCommitted { layer_id });
        ctx.request_repaint();
        Ok(())
    }
}

/// Sample for a pointer position, relative to the layer origin.
fn sample_at(mouse: &MouseInfo, layer: &Layer, width: f32) -> StrokeSample {
    StrokeSample::point((mouse.x - layer.x).ceil(), (mouse.y - layer.y).ceil(), width)
}

impl Tool for BrushTool {
    fn name(&self) -> &'static str {
        "Brush"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Brush
    }

    fn deactivate(&mut self, ctx: &mut EditorContext) -> CommandResult {
        self.finish_stroke(ctx, None)
    }

    fn on_raw_pointer_down(&mut self, pressure: Option<f32>) {
        self.pressure.pointer_down(pressure);
    }

    fn on_raw_pointer_move(&mut self, pressure: Option<f32>) {
        self.pressure.pointer_move(pressure);
    }

    fn on_pointer_down(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult {
        if !mouse.click_valid {
            return Ok(());
        }
        self.start_stroke(ctx)
    }

    fn on_pointer_move(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult {
        if !mouse.is_drag || !mouse.click_valid || ctx.active_tool != Some(ToolKind::Brush) {
            return Ok(());
        }
        let width = self.pressure.line_width(ctx.config.brush.size, ctx.config.brush.pressure);
        let Some(session) = &mut self.session else {
            return Ok(());
        };
        let Some(layer) = ctx.document.layer(session.layer_id) else {
            return Ok(());
        };

        let sample = sample_at(mouse, layer, width);
        trace!("brush sample {:?}", sample);
        session.pending.push(sample);
        ctx.request_repaint();
        Ok(())
    }

    fn on_pointer_up(&mut self, mouse: &MouseInfo, ctx: &mut EditorContext) -> CommandResult {
        if !mouse.click_valid {
            let draft = ctx
                .document
                .active_layer_mut()
                .filter(|layer| layer.is_brush() && layer.is_draft());
            if let Some(layer) = draft {
                layer.status = LayerStatus::Committed;
            }
            return self.finish_stroke(ctx, None);
        }
        self.finish_stroke(ctx, Some(mouse))
    }

    fn preview(&self) -> Option<StrokePreview<'_>> {
        self.session.as_ref().map(|session| StrokePreview {
            layer_id: session.layer_id,
            pending: &session.pending,
        })
    }
}

/// Draws brush `samples` with the color, size and origin of `layer`.
///
/// Consecutive points are joined by segments using the later point's width;
/// a point with breaks (or the ends of the data) on both sides is a disc of
/// the layer's base size.
pub fn render_strokes(surface: &mut dyn DrawingSurface, layer: &Layer, samples: &[StrokeSample]) {
    if samples.is_empty() {
        return;
    }
    let size = layer.params.size;

    surface.save();
    surface.set_fill_color(layer.color);
    surface.set_stroke_color(layer.color);
    surface.set_line_width(size);
    surface.set_line_cap(LineCap::Round);
    surface.set_line_join(LineJoin::Round);
    surface.translate(layer.x, layer.y);

    surface.begin_path();
    for (i, sample) in samples.iter().enumerate() {
        let Some((x, y, width)) = sample.as_point() else {
            surface.begin_path();
            continue;
        };
        let previous = i.checked_sub(1).and_then(|p| samples[p].as_point());
        let isolated = samples.get(i + 1).is_none_or(StrokeSample::is_break);

        match previous {
            Some((px, py, _)) => {
                surface.set_line_width(width);
                surface.begin_path();
                surface.move_to(px, py);
                surface.line_to(x, y);
                surface.stroke();
            }
            None if isolated => {
                surface.begin_path();
                surface.arc(x, y, size / 2.0, 0.0, TAU);
                surface.fill();
            }
            None => {}
        }
    }

    surface.translate(-layer.x, -layer.y);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::BrushParams;
    use crate::renderer::{DrawOp, RecordingSurface};
    use egui::{Color32, pos2};

    fn layer_with(data: Vec<StrokeSample>) -> Layer {
        let params = BrushParams { size: 10.0, pressure: false, color: Color32::RED };
        let mut layer = Layer::new_brush(params, 100, 800.0, 600.0);
        layer.data = data;
        layer
    }

    fn render(layer: &Layer) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        render_strokes(&mut surface, layer, &layer.data);
        surface
    }

    #[test]
    fn test_empty_layer_draws_nothing() {
        let surface = render(&layer_with(Vec::new()));
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_single_point_is_one_disc() {
        let mut layer = layer_with(vec![StrokeSample::point(3.0, 4.0, 7.0)]);
        layer.x = 100.0;
        layer.y = 200.0;
        let surface = render(&layer);

        assert!(surface.segments().is_empty());
        assert_eq!(surface.discs().len(), 1);
        assert_eq!(surface.discs()[0].center, pos2(103.0, 204.0));
        assert_eq!(surface.discs()[0].radius, 5.0);
        assert_eq!(surface.discs()[0].color, Color32::RED);
    }

    #[test]
    fn test_point_with_trailing_break_is_one_disc() {
        let surface = render(&layer_with(vec![StrokeSample::point(0.0, 0.0, 4.0), StrokeSample::Break]));
        assert!(surface.segments().is_empty());
        assert_eq!(surface.discs().len(), 1);
    }

    #[test]
    fn test_segments_use_current_sample_width() {
        let surface = render(&layer_with(vec![
            StrokeSample::point(0.0, 0.0, 2.0),
            StrokeSample::point(10.0, 0.0, 4.0),
            StrokeSample::point(10.0, 10.0, 6.0),
        ]));

        let widths: Vec<f32> = surface.segments().iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![4.0, 6.0]);
        assert_eq!(surface.segments()[1].from, pos2(10.0, 0.0));
        assert!(surface.discs().is_empty());
    }

    #[test]
    fn test_break_starts_fresh_path_without_connecting_line() {
        let surface = render(&layer_with(vec![
            StrokeSample::point(0.0, 0.0, 4.0),
            StrokeSample::Break,
            StrokeSample::point(5.0, 5.0, 6.0),
        ]));

        assert!(surface.segments().is_empty());
        assert!(!surface.ops().iter().any(|op| matches!(op, DrawOp::LineTo { .. })));
        let centers: Vec<_> = surface.discs().iter().map(|d| d.center).collect();
        assert_eq!(centers, vec![pos2(0.0, 0.0), pos2(5.0, 5.0)]);

        let arcs: Vec<usize> = surface
            .ops()
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, DrawOp::Arc { .. }))
            .map(|(i, _)| i)
            .collect();
        assert!(surface.ops()[arcs[0]..arcs[1]].contains(&DrawOp::BeginPath));
    }

    #[test]
    fn test_isolated_point_uses_base_size() {
        let surface = render(&layer_with(vec![
            StrokeSample::point(0.0, 0.0, 4.0),
            StrokeSample::point(5.0, 0.0, 4.0),
            StrokeSample::Break,
            StrokeSample::point(20.0, 20.0, 1.0),
            StrokeSample::Break,
            StrokeSample::point(30.0, 30.0, 4.0),
            StrokeSample::point(35.0, 30.0, 4.0),
        ]));

        assert_eq!(surface.segments().len(), 2);
        assert_eq!(surface.discs().len(), 1);
        assert_eq!(surface.discs()[0].radius, 5.0);
    }

    #[test]
    fn test_leading_break_is_tolerated() {
        let surface = render(&layer_with(vec![StrokeSample::Break, StrokeSample::point(1.0, 1.0, 4.0)]));
        assert_eq!(surface.discs().len(), 1);
    }

    #[test]
    fn test_render_restores_surface_state() {
        let mut layer = layer_with(vec![StrokeSample::point(0.0, 0.0, 4.0), StrokeSample::point(1.0, 1.0, 4.0)]);
        layer.x = 40.0;
        layer.y = 60.0;
        let surface = render(&layer);

        assert_eq!(surface.save_depth(), 0);
        assert_eq!(surface.translation(), egui::Vec2::ZERO);
        assert_eq!(surface.ops().first(), Some(&DrawOp::Save));
        assert_eq!(surface.ops().last(), Some(&DrawOp::Restore));
    }
}
