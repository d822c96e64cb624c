use egui::PointerButton;

use super::InputLocation;

/// Pointer state derived for tools: where the pointer is and whether the
/// current gesture is a legitimate canvas drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInfo {
    pub x: f32,
    pub y: f32,
    /// The gesture started with the primary button inside the canvas
    pub click_valid: bool,
    /// A button is held
    pub is_drag: bool,
}

/// Follows press/move/release to derive [`MouseInfo`] for each pointer event
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    pressed: bool,
    click_valid: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, location: InputLocation, button: PointerButton) -> MouseInfo {
        self.pressed = true;
        self.click_valid = button == PointerButton::Primary && location.is_in_canvas;
        self.info(location)
    }

    pub fn pointer_move(&mut self, location: InputLocation) -> MouseInfo {
        self.info(location)
    }

    pub fn pointer_up(&mut self, location: InputLocation) -> MouseInfo {
        self.pressed = false;
        let info = self.info(location);
        self.click_valid = false;
        info
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn info(&self, location: InputLocation) -> MouseInfo {
        MouseInfo {
            x: location.position.x,
            y: location.position.y,
            click_valid: self.click_valid,
            is_drag: self.pressed,
        }
    }
}
