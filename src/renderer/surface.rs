use std::f32::consts::PI;

use egui::{Color32, Painter, Pos2, Shape, Stroke, Vec2, pos2};

/// Vertices per half circle of a round-capped segment
const CAP_STEPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

/// Immediate-mode 2D drawing target modelled on a canvas 2D context.
///
/// Coordinates passed to path methods are transformed by the current
/// translation at the time they are added. `save`/`restore` push and pop the
/// whole drawing state, translation included.
pub trait DrawingSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn set_fill_color(&mut self, color: Color32);
    fn set_stroke_color(&mut self, color: Color32);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    /// Multiplier in [0, 1] applied to every color drawn
    fn set_global_alpha(&mut self, alpha: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn fill(&mut self);
    fn stroke(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct SurfaceState {
    offset: Vec2,
    fill: Color32,
    stroke: Color32,
    line_width: f32,
    cap: LineCap,
    join: LineJoin,
    alpha: f32,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            fill: Color32::BLACK,
            stroke: Color32::BLACK,
            line_width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            alpha: 1.0,
        }
    }
}

/// [`DrawingSurface`] drawing onto an egui [`Painter`].
///
/// Arcs are drawn as full circles; filled polylines are drawn as convex
/// polygons. With round caps each segment is a single capsule shape, so
/// translucent strokes are blended once per segment.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    subpaths: Vec<Vec<Pos2>>,
    circles: Vec<(Pos2, f32)>,
}

impl<'a> PainterSurface<'a> {
    /// `origin` is the screen position of the canvas' top-left corner.
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            state: SurfaceState {
                offset: origin.to_vec2(),
                ..Default::default()
            },
            stack: Vec::new(),
            subpaths: Vec::new(),
            circles: Vec::new(),
        }
    }

    fn point(&self, x: f32, y: f32) -> Pos2 {
        pos2(x, y) + self.state.offset
    }

    fn stroke_color(&self) -> Color32 {
        self.state.stroke.gamma_multiply(self.state.alpha)
    }

    fn fill_color(&self) -> Color32 {
        self.state.fill.gamma_multiply(self.state.alpha)
    }
}

impl DrawingSurface for PainterSurface<'_> {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.offset += Vec2::new(dx, dy);
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.join = join;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
        self.circles.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let point = self.point(x, y);
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let point = self.point(x, y);
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, _start_angle: f32, _end_angle: f32) {
        let center = self.point(x, y);
        self.circles.push((center, radius));
    }

    fn fill(&mut self) {
        let color = self.fill_color();
        for &(center, radius) in &self.circles {
            self.painter.circle_filled(center, radius, color);
        }
        for subpath in self.subpaths.iter().filter(|subpath| subpath.len() > 2) {
            self.painter
                .add(Shape::convex_polygon(subpath.clone(), color, Stroke::NONE));
        }
    }

    fn stroke(&mut self) {
        let color = self.stroke_color();
        let width = self.state.line_width;
        let stroke = Stroke::new(width, color);

        for &(center, radius) in &self.circles {
            self.painter.circle_stroke(center, radius, stroke);
        }
        for subpath in self.subpaths.iter().filter(|subpath| subpath.len() > 1) {
            // egui lines have butt ends and miter joins
            if self.state.cap == LineCap::Round {
                for pair in subpath.windows(2) {
                    let outline = capsule(pair[0], pair[1], width / 2.0);
                    self.painter.add(Shape::convex_polygon(outline, color, Stroke::NONE));
                }
                continue;
            }

            self.painter.add(Shape::line(subpath.clone(), stroke));
            if self.state.join == LineJoin::Round {
                for &joint in &subpath[1..subpath.len() - 1] {
                    self.painter.circle_filled(joint, width / 2.0, color);
                }
            }
        }
    }
}

/// Outline of the segment `from`-`to` with round ends of `radius`, clockwise
/// on screen.
fn capsule(from: Pos2, to: Pos2, radius: f32) -> Vec<Pos2> {
    let direction = to - from;
    let heading = if direction == Vec2::ZERO { 0.0 } else { direction.angle() };

    let mut outline = Vec::with_capacity(2 * (CAP_STEPS + 1));
    for (center, start) in [(to, heading - PI / 2.0), (from, heading + PI / 2.0)] {
        for step in 0..=CAP_STEPS {
            let angle = start + PI * step as f32 / CAP_STEPS as f32;
            outline.push(center + radius * Vec2::angled(angle));
        }
    }
    outline
}
