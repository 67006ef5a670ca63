//! Affine georeferencing of a grid

use serde::{Deserialize, Serialize};

/// Affine map from grid positions to map coordinates.
///
/// For a fractional grid position `(row, col)`:
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// North-up grids have zero rotations and a negative `pixel_height`. The
/// rotation terms may be omitted in serialized layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// Map x of the grid's upper-left corner
    pub origin_x: f64,
    /// Map y of the grid's upper-left corner
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
    #[serde(default)]
    pub row_rotation: f64,
    #[serde(default)]
    pub col_rotation: f64,
}

impl GeoTransform {
    /// North-up transform
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    fn apply(&self, row: f64, col: f64) -> (f64, f64) {
        (
            self.origin_x + col * self.pixel_width + row * self.row_rotation,
            self.origin_y + col * self.col_rotation + row * self.pixel_height,
        )
    }

    /// Map coordinates of the centre of cell `(row, col)`
    pub fn cell_centre(&self, row: usize, col: usize) -> (f64, f64) {
        self.apply(row as f64 + 0.5, col as f64 + 0.5)
    }

    /// Fractional grid position `(row, col)` of a map point, `None` when
    /// the transform cannot be inverted
    pub fn grid_position(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let det = self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation;
        if det.abs() < 1e-12 {
            return None;
        }
        let (dx, dy) = (x - self.origin_x, y - self.origin_y);
        let col = (self.pixel_height * dx - self.row_rotation * dy) / det;
        let row = (self.pixel_width * dy - self.col_rotation * dx) / det;
        Some((row, col))
    }

    /// Edge length of a cell. Channel distances assume square cells.
    pub fn cell_size(&self) -> f64 {
        self.pixel_width.abs()
    }
}

impl Default for GeoTransform {
    /// Unit cells with the origin at (0, 0)
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cell_centre_and_inverse() {
        let gt = GeoTransform::new(500_000.0, 4_200_000.0, 25.0, -25.0);

        let (x, y) = gt.cell_centre(8, 3);
        assert_relative_eq!(x, 500_000.0 + 3.5 * 25.0, epsilon = 1e-9);
        assert_relative_eq!(y, 4_200_000.0 - 8.5 * 25.0, epsilon = 1e-9);

        let (row, col) = gt.grid_position(x, y).unwrap();
        assert_relative_eq!(row, 8.5, epsilon = 1e-9);
        assert_relative_eq!(col, 3.5, epsilon = 1e-9);
        assert_relative_eq!(gt.cell_size(), 25.0);
    }

    #[test]
    fn test_rotated_inverse() {
        let gt = GeoTransform {
            row_rotation: 0.5,
            col_rotation: 0.25,
            ..GeoTransform::new(10.0, 20.0, 2.0, -2.0)
        };
        let (x, y) = gt.cell_centre(4, 6);
        let (row, col) = gt.grid_position(x, y).unwrap();
        assert_relative_eq!(row, 4.5, epsilon = 1e-9);
        assert_relative_eq!(col, 6.5, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_transform() {
        let gt = GeoTransform::new(0.0, 0.0, 0.0, 0.0);
        assert!(gt.grid_position(1.0, 1.0).is_none());
    }
}
