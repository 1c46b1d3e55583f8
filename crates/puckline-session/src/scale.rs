//! Logical-to-display coordinate scaling.

use puckline_protocol::DIMENSIONS;

/// Maps the server's logical table onto a square rendering surface.
///
/// The server works in a `DIMENSIONS.size`-unit square with Y growing
/// upward; the surface is `table_size` pixels square with Y growing
/// downward. X scales linearly, Y scales and then flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableScale {
    table_size: f64,
    logical_size: f64,
}

impl TableScale {
    /// A scale onto a surface of side `table_size`.
    ///
    /// Negative or non-finite sizes are clamped to 0.
    pub fn new(table_size: f64) -> Self {
        let table_size = if table_size.is_finite() {
            table_size.max(0.0)
        } else {
            0.0
        };
        Self {
            table_size,
            logical_size: f64::from(DIMENSIONS.size),
        }
    }

    /// A scale onto the largest square that fits the viewport.
    pub fn from_viewport(width: f64, height: f64) -> Self {
        Self::new(width.min(height))
    }

    /// Side of the rendering surface.
    pub fn table_size(&self) -> f64 {
        self.table_size
    }

    /// `logical * table_size / dimensions.size`.
    pub fn scale_x(&self, logical: f64) -> f64 {
        logical * self.table_size / self.logical_size
    }

    /// [`scale_x`](Self::scale_x), flipped so that Y grows downward.
    pub fn scale_y(&self, logical: f64) -> f64 {
        self.table_size - self.scale_x(logical)
    }

    /// Scales a logical `(x, y)` point.
    pub fn scale_point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.scale_x(x), self.scale_y(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        let scale = TableScale::new(640.0);
        assert_eq!(scale.scale_x(0.0), 0.0);
        assert_eq!(scale.scale_x(1000.0), 640.0);
    }

    #[test]
    fn test_scale_is_monotonic() {
        let scale = TableScale::new(731.0);
        let mut last = scale.scale_x(0.0);
        for c in 1..=1000 {
            let next = scale.scale_x(f64::from(c));
            assert!(next >= last, "scale({c}) = {next} < {last}");
            last = next;
        }
    }

    #[test]
    fn test_scale_y_flips() {
        let scale = TableScale::new(500.0);
        for c in [0.0, 1.0, 250.0, 999.0, 1000.0] {
            assert_eq!(scale.scale_y(c), 500.0 - scale.scale_x(c));
        }
        assert_eq!(scale.scale_y(0.0), 500.0);
        assert_eq!(scale.scale_y(1000.0), 0.0);
    }

    #[test]
    fn test_scale_point() {
        let scale = TableScale::new(500.0);
        assert_eq!(scale.scale_point(100.0, 200.0), (50.0, 400.0));
    }

    #[test]
    fn test_out_of_table_coordinates_extrapolate() {
        // The puck may sit up to one puck size outside the table.
        let scale = TableScale::new(1000.0);
        assert_eq!(scale.scale_x(-50.0), -50.0);
        assert_eq!(scale.scale_y(1050.0), -50.0);
    }

    #[test]
    fn test_from_viewport_uses_shorter_side() {
        assert_eq!(
            TableScale::from_viewport(1920.0, 1080.0).table_size(),
            1080.0
        );
        assert_eq!(TableScale::from_viewport(390.0, 844.0).table_size(), 390.0);
    }

    #[test]
    fn test_bad_table_size_clamps_to_zero() {
        assert_eq!(TableScale::new(-3.0).table_size(), 0.0);
        assert_eq!(TableScale::new(f64::NAN).table_size(), 0.0);
        assert_eq!(TableScale::new(f64::INFINITY).table_size(), 0.0);
    }
}
