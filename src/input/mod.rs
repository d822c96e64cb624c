use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

mod gestures;
mod pressure;

pub use gestures::{GestureTracker, MouseInfo};
pub use pressure::PressureTracker;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position in canvas coordinates (canvas top-left is the origin)
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

impl InputLocation {
    pub fn new(position: Pos2, is_in_canvas: bool) -> Self {
        Self { position, is_in_canvas }
    }
}

/// Represents different types of input events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
        /// Pen pressure in [0, 1], if the device reported one
        pressure: Option<f32>,
    },
    /// Pointer button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Pointer moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
        pressure: Option<f32>,
    },
    /// Pointer left the application window
    PointerLeave {
        last_known_location: InputLocation,
    },
    /// Key was pressed
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location, .. } => location.is_in_canvas,
            InputEvent::PointerLeave { last_known_location } => last_known_location.is_in_canvas,
            InputEvent::KeyDown { .. } => false,
        }
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    held_buttons: Vec<PointerButton>,
    /// Force of the latest touch/pen contact, attached to the pointer events
    /// egui synthesizes from it
    last_force: Option<f32>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            held_buttons: Vec::new(),
            last_force: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Creates an InputLocation from a screen position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents, in delivery order
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let raw_events = ctx.input(|input| input.raw.events.clone());
        raw_events.iter().filter_map(|event| self.translate(event)).collect()
    }

    /// Translates a single egui event
    pub fn translate(&mut self, event: &egui::Event) -> Option<InputEvent> {
        match event {
            egui::Event::Touch { force, phase, .. } => {
                self.last_force = match phase {
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => None,
                    _ => *force,
                };
                None
            }
            egui::Event::PointerMoved(pos) => {
                self.last_pointer_pos = Some(*pos);
                Some(InputEvent::PointerMove {
                    location: self.make_location(*pos),
                    held_buttons: self.held_buttons.clone(),
                    pressure: self.last_force,
                })
            }
            egui::Event::PointerButton { pos, button, pressed, .. } => {
                self.last_pointer_pos = Some(*pos);
                let location = self.make_location(*pos);
                if *pressed {
                    if !self.held_buttons.contains(button) {
                        self.held_buttons.push(*button);
                    }
                    Some(InputEvent::PointerDown {
                        location,
                        button: *button,
                        pressure: self.last_force,
                    })
                } else {
                    self.held_buttons.retain(|held| held != button);
                    Some(InputEvent::PointerUp {
                        location,
                        button: *button,
                    })
                }
            }
            egui::Event::PointerGone => {
                self.held_buttons.clear();
                self.last_force = None;
                self.last_pointer_pos
                    .take()
                    .map(|pos| InputEvent::PointerLeave {
                        last_known_location: self.make_location(pos),
                    })
            }
            egui::Event::Key { key, pressed: true, modifiers, .. } => Some(InputEvent::KeyDown {
                key: *key,
                modifiers: *modifiers,
            }),
            _ => None,
        }
    }
}
