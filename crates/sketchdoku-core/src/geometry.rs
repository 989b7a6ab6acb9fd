//! Continuous canvas coordinates and their mapping onto grid cells.

use serde::{Deserialize, Serialize};

use crate::{CellAddress, GridSize};

/// A point on the drawing canvas, in canvas pixels with the origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The extent of a canvas and the grid drawn over it.
///
/// The grid always covers the whole canvas, so each cell is
/// `width / N` by `height / N` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Grid drawn over the canvas.
    pub size: GridSize,
}

impl Canvas {
    /// Creates a canvas description.
    #[must_use]
    pub const fn new(width: f64, height: f64, size: GridSize) -> Self {
        Self {
            width,
            height,
            size,
        }
    }

    /// Returns the cell under `point`, or `None` if the point is off the grid.
    ///
    /// See [`point_to_cell`].
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<CellAddress> {
        point_to_cell(point, self.width, self.height, self.size)
    }
}

/// Maps a canvas point to the grid cell containing it.
///
/// The canvas is split into `N` equal columns and `N` equal rows. A point on a
/// shared edge belongs to the cell to its right or below it. Points outside
/// `[0, width) × [0, height)` map to `None`; they are never clamped to the
/// nearest cell. A degenerate canvas (non-positive or non-finite extent) has no cells.
///
/// # Examples
///
/// ```
/// use sketchdoku_core::{CellAddress, GridSize, Point, point_to_cell};
///
/// let size = GridSize::NINE;
/// assert_eq!(
///     point_to_cell(Point::new(150.0, 150.0), 900.0, 900.0, size),
///     Some(CellAddress::new(1, 1))
/// );
/// assert_eq!(point_to_cell(Point::new(900.0, 10.0), 900.0, 900.0, size), None);
/// ```
#[must_use]
pub fn point_to_cell(point: Point, width: f64, height: f64, size: GridSize) -> Option<CellAddress> {
    let col = axis_index(point.x, width, size)?;
    let row = axis_index(point.y, height, size)?;
    Some(CellAddress::new(row, col))
}

fn axis_index(value: f64, extent: f64, size: GridSize) -> Option<u8> {
    if !(extent.is_finite() && extent > 0.0) || !value.is_finite() {
        return None;
    }
    if !(0.0..extent).contains(&value) {
        return None;
    }
    let n = f64::from(size.get());
    let cell_extent = extent / n;
    // `value < extent` already holds; the quotient can still round up to N.
    let index = (value / cell_extent).floor().min(n - 1.0);
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(index as u8)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_cell_corners() {
        let canvas = Canvas::new(900.0, 900.0, GridSize::NINE);
        assert_eq!(canvas.cell_at(Point::new(0.0, 0.0)), Some(CellAddress::new(0, 0)));
        assert_eq!(canvas.cell_at(Point::new(99.9, 100.0)), Some(CellAddress::new(1, 0)));
        assert_eq!(canvas.cell_at(Point::new(899.9, 899.9)), Some(CellAddress::new(8, 8)));
        assert_eq!(canvas.cell_at(Point::new(150.0, 450.0)), Some(CellAddress::new(4, 1)));
    }

    #[test]
    fn test_outside_is_absent() {
        let canvas = Canvas::new(900.0, 600.0, GridSize::NINE);
        assert_eq!(canvas.cell_at(Point::new(-0.1, 10.0)), None);
        assert_eq!(canvas.cell_at(Point::new(10.0, 600.0)), None);
        assert_eq!(canvas.cell_at(Point::new(f64::NAN, 10.0)), None);
        assert_eq!(canvas.cell_at(Point::new(f64::INFINITY, 10.0)), None);
    }

    #[test]
    fn test_degenerate_canvas() {
        assert_eq!(point_to_cell(Point::new(0.0, 0.0), 0.0, 100.0, GridSize::NINE), None);
        assert_eq!(point_to_cell(Point::new(0.0, 0.0), 100.0, -5.0, GridSize::NINE), None);
    }

    #[test]
    fn test_non_square_grid_size() {
        let size = GridSize::new(4).unwrap();
        assert_eq!(
            point_to_cell(Point::new(399.0, 100.0), 400.0, 200.0, size),
            Some(CellAddress::new(2, 3))
        );
    }

    proptest! {
        #[test]
        fn inside_points_map_inside(
            n in 1u8..=31,
            width in 1.0f64..5000.0,
            height in 1.0f64..5000.0,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let size = GridSize::new(n).unwrap();
            let point = Point::new(fx * width, fy * height);
            prop_assume!(point.x < width && point.y < height);
            let cell = point_to_cell(point, width, height, size);
            prop_assert!(cell.is_some_and(|c| c.is_within(size)));
        }

        #[test]
        fn outside_points_map_to_none(
            n in 1u8..=31,
            width in 1.0f64..5000.0,
            height in 1.0f64..5000.0,
            dx in 0.0f64..1000.0,
            y in 0.0f64..1.0,
            left in any::<bool>(),
        ) {
            let size = GridSize::new(n).unwrap();
            let x = if left { -dx - f64::EPSILON } else { width + dx };
            let point = Point::new(x, y * height);
            prop_assert_eq!(point_to_cell(point, width, height, size), None);
        }
    }
}
