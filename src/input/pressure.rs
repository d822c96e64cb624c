/// Pressure reported by devices that do not actually sense pressure.
const DEFAULT_DEVICE_PRESSURE: f32 = 0.5;

/// Tracks whether the current pointer reports genuine pen pressure, and the
/// latest reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressureTracker {
    supported: bool,
    /// Range [0, 1]
    pressure: f32,
}

impl PressureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspects the pressure reported with a pointer press.
    ///
    /// Readings of exactly 0.5 are the default of pressure-less devices and
    /// count as unsupported, as do missing, zero or out-of-range readings.
    pub fn pointer_down(&mut self, pressure: Option<f32>) {
        match pressure {
            Some(p) if p != 0.0 && p != DEFAULT_DEVICE_PRESSURE && p <= 1.0 => {
                self.supported = true;
                self.pressure = p;
            }
            _ => self.supported = false,
        }
    }

    /// Updates the stored pressure while supported. Readings of 1.0 or more
    /// are ignored, some devices report a constant 1.0.
    pub fn pointer_move(&mut self, pressure: Option<f32>) {
        if !self.supported {
            return;
        }
        if let Some(p) = pressure.filter(|p| *p < 1.0) {
            self.pressure = p;
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    /// Line width for a brush of `size`, scaled by pressure when enabled and supported.
    pub fn line_width(&self, size: f32, pressure_enabled: bool) -> f32 {
        if pressure_enabled && self.supported {
            size * self.pressure * 2.0
        } else {
            size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genuine_pressure_is_supported() {
        let mut tracker = PressureTracker::new();
        tracker.pointer_down(Some(0.4));
        assert!(tracker.is_supported());
        assert_eq!(tracker.pressure(), 0.4);
    }

    #[test]
    fn test_default_pressure_values_are_unsupported() {
        for reading in [None, Some(0.0), Some(0.5), Some(1.5)] {
            let mut tracker = PressureTracker::new();
            tracker.pointer_down(Some(0.3));
            tracker.pointer_down(reading);
            assert!(!tracker.is_supported(), "reading {reading:?}");
        }
    }

    #[test]
    fn test_move_ignores_full_pressure() {
        let mut tracker = PressureTracker::new();
        tracker.pointer_down(Some(0.4));
        tracker.pointer_move(Some(1.0));
        assert_eq!(tracker.pressure(), 0.4);
        tracker.pointer_move(Some(0.7));
        assert_eq!(tracker.pressure(), 0.7);
        tracker.pointer_move(None);
        assert_eq!(tracker.pressure(), 0.7);
    }

    #[test]
    fn test_move_without_support_is_ignored() {
        let mut tracker = PressureTracker::new();
        tracker.pointer_down(Some(0.5));
        tracker.pointer_move(Some(0.2));
        assert_eq!(tracker.pressure(), 0.0);
    }

    #[test]
    fn test_line_width() {
        let mut tracker = PressureTracker::new();
        tracker.pointer_down(Some(0.4));
        assert_eq!(tracker.line_width(10.0, true), 8.0);
        assert_eq!(tracker.line_width(10.0, false), 10.0);

        tracker.pointer_down(None);
        assert_eq!(tracker.line_width(10.0, true), 10.0);
    }
}
