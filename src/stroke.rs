use serde::{Deserialize, Serialize};

/// One entry of a brush layer's sample sequence.
///
/// Points are stored relative to the owning layer's origin. A `Break` marks a
/// pen-up gap between two strokes that belong to the same layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<[f32; 3]>", into = "Option<[f32; 3]>")]
pub enum StrokeSample {
    Point { x: f32, y: f32, width: f32 },
    Break,
}

impl StrokeSample {
    pub fn point(x: f32, y: f32, width: f32) -> Self {
        Self::Point { x, y, width }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::Break)
    }

    /// Returns the `(x, y, width)` triple of a point, or `None` for a break.
    pub fn as_point(&self) -> Option<(f32, f32, f32)> {
        match *self {
            Self::Point { x, y, width } => Some((x, y, width)),
            Self::Break => None,
        }
    }
}

impl From<Option<[f32; 3]>> for StrokeSample {
    fn from(value: Option<[f32; 3]>) -> Self {
        match value {
            Some([x, y, width]) => Self::Point { x, y, width },
            None => Self::Break,
        }
    }
}

impl From<StrokeSample> for Option<[f32; 3]> {
    fn from(sample: StrokeSample) -> Self {
        sample.as_point().map(|(x, y, width)| [x, y, width])
    }
}

/// Result of re-basing a sample sequence onto its own bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Offset to add to the old layer origin.
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
    pub samples: Vec<StrokeSample>,
}

/// Computes the bounding box of all real samples and re-bases them so the
/// smallest x and y become zero.
///
/// Works on a copy; the input is left untouched. Returns `None` when there is
/// no real sample to bound.
pub fn normalize(samples: &[StrokeSample]) -> Option<Normalized> {
    let mut points = samples.iter().filter_map(StrokeSample::as_point);
    let (first_x, first_y, _) = points.next()?;

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first_x, first_y, first_x, first_y);
    for (x, y, _) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    let samples = samples
        .iter()
        .map(|sample| match *sample {
            StrokeSample::Point { x, y, width } => StrokeSample::Point {
                x: x - min_x,
                y: y - min_y,
                width,
            },
            StrokeSample::Break => StrokeSample::Break,
        })
        .collect();

    Some(Normalized {
        min_x,
        min_y,
        width: max_x - min_x,
        height: max_y - min_y,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rebases_to_zero() {
        let samples = vec![
            StrokeSample::point(15.0, 40.0, 5.0),
            StrokeSample::point(25.0, 30.0, 5.0),
            StrokeSample::Break,
            StrokeSample::point(10.0, 50.0, 3.0),
        ];

        let normalized = normalize(&samples).unwrap();
        assert_eq!(normalized.min_x, 10.0);
        assert_eq!(normalized.min_y, 30.0);
        assert_eq!(normalized.width, 15.0);
        assert_eq!(normalized.height, 20.0);
        assert_eq!(
            normalized.samples,
            vec![
                StrokeSample::point(5.0, 10.0, 5.0),
                StrokeSample::point(15.0, 0.0, 5.0),
                StrokeSample::Break,
                StrokeSample::point(0.0, 20.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_normalize_handles_negative_coordinates() {
        let samples = vec![StrokeSample::point(-4.0, 2.0, 1.0), StrokeSample::point(6.0, -8.0, 1.0)];
        let normalized = normalize(&samples).unwrap();
        assert_eq!((normalized.min_x, normalized.min_y), (-4.0, -8.0));
        assert_eq!((normalized.width, normalized.height), (10.0, 10.0));
    }

    #[test]
    fn test_normalize_empty_is_noop() {
        assert!(normalize(&[]).is_none());
        assert!(normalize(&[StrokeSample::Break, StrokeSample::Break]).is_none());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = vec![
            StrokeSample::point(0.0, 3.0, 2.0),
            StrokeSample::Break,
            StrokeSample::point(7.0, 0.0, 2.0),
        ];
        let normalized = normalize(&samples).unwrap();
        assert_eq!((normalized.min_x, normalized.min_y), (0.0, 0.0));
        assert_eq!(normalized.samples, samples);
    }

    #[test]
    fn test_sample_json_format() {
        let samples = vec![StrokeSample::point(1.0, 2.0, 3.0), StrokeSample::Break];
        let json = serde_json::to_string(&samples).unwrap();
        assert_eq!(json, "[[1.0,2.0,3.0],null]");

        let parsed: Vec<StrokeSample> = serde_json::from_str("[null,[4,5,6]]").unwrap();
        assert_eq!(parsed, vec![StrokeSample::Break, StrokeSample::point(4.0, 5.0, 6.0)]);
    }
}
