use egui::{Color32, Pos2, Vec2, pos2};

use super::surface::{DrawingSurface, LineCap, LineJoin};

/// One call made on a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    SetFillColor(Color32),
    SetStrokeColor(Color32),
    SetLineWidth(f32),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetGlobalAlpha(f32),
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Arc { x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32 },
    Fill,
    Stroke,
}

/// A stroked straight segment, in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Pos2,
    pub to: Pos2,
    pub width: f32,
    pub color: Color32,
}

/// A filled arc, in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Pos2,
    pub radius: f32,
    pub color: Color32,
}

#[derive(Debug, Clone, Copy)]
struct State {
    offset: Vec2,
    fill: Color32,
    stroke: Color32,
    line_width: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            fill: Color32::BLACK,
            stroke: Color32::BLACK,
            line_width: 1.0,
        }
    }
}

/// [`DrawingSurface`] that records every call and the geometry it produces.
///
/// Used to inspect rendering without a GPU.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    state: State,
    stack: Vec<State>,
    current: Option<Pos2>,
    path_lines: Vec<(Pos2, Pos2)>,
    path_arcs: Vec<(Pos2, f32)>,
    segments: Vec<Segment>,
    discs: Vec<Disc>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Segments actually stroked so far
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Arcs actually filled so far
    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    /// Current translation
    pub fn translation(&self) -> Vec2 {
        self.state.offset
    }

    /// Number of unmatched `save` calls
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn point(&self, x: f32, y: f32) -> Pos2 {
        pos2(x, y) + self.state.offset
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate { dx, dy });
        self.state.offset += Vec2::new(dx, dy);
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.ops.push(DrawOp::SetFillColor(color));
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.ops.push(DrawOp::SetStrokeColor(color));
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(DrawOp::SetLineWidth(width));
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(DrawOp::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ops.push(DrawOp::SetLineJoin(join));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::SetGlobalAlpha(alpha));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
        self.current = None;
        self.path_lines.clear();
        self.path_arcs.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::MoveTo { x, y });
        self.current = Some(self.point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(DrawOp::LineTo { x, y });
        let to = self.point(x, y);
        if let Some(from) = self.current {
            self.path_lines.push((from, to));
        }
        self.current = Some(to);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.ops.push(DrawOp::Arc { x, y, radius, start_angle, end_angle });
        let center = self.point(x, y);
        self.path_arcs.push((center, radius));
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
        let color = self.state.fill;
        self.discs.extend(
            self.path_arcs
                .iter()
                .map(|&(center, radius)| Disc { center, radius, color }),
        );
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
        let (width, color) = (self.state.line_width, self.state.stroke);
        self.segments.extend(
            self.path_lines
                .iter()
                .map(|&(from, to)| Segment { from, to, width, color }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_applies_to_recorded_geometry() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.translate(10.0, 20.0);
        surface.set_line_width(3.0);
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(5.0, 0.0);
        surface.stroke();
        surface.restore();

        assert_eq!(
            surface.segments(),
            &[Segment {
                from: pos2(10.0, 20.0),
                to: pos2(15.0, 20.0),
                width: 3.0,
                color: Color32::BLACK,
            }]
        );
        assert_eq!(surface.translation(), Vec2::ZERO);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_begin_path_discards_unstroked_lines() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(1.0, 1.0);
        surface.begin_path();
        surface.stroke();
        assert!(surface.segments().is_empty());
    }
}
