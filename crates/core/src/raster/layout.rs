//! Grid layout: dimensions, georeferencing and index conversions
//!
//! Cells are addressed three ways: a row-major linear index, a `(row, col)`
//! pair and the map coordinates `(x, y)` of the cell centre.

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};
use serde::{Deserialize, Serialize};

/// Geometry of a raster grid without any cell values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub transform: GeoTransform,
    #[serde(default)]
    pub crs: Option<CRS>,
}

impl GridLayout {
    /// Create a layout with no CRS
    pub fn new(rows: usize, cols: usize, transform: GeoTransform) -> Self {
        Self {
            rows,
            cols,
            transform,
            crs: None,
        }
    }

    /// Attach a CRS
    pub fn with_crs(mut self, crs: Option<CRS>) -> Self {
        self.crs = crs;
        self
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells
    pub fn ncells(&self) -> usize {
        self.rows * self.cols
    }

    /// Cell size (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.transform.cell_size()
    }

    /// `(row, col)` of a linear index
    #[inline]
    pub fn index_to_cell(&self, idx: usize) -> (usize, usize) {
        (idx / self.cols, idx % self.cols)
    }

    /// Linear index of `(row, col)`
    #[inline]
    pub fn cell_to_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Checked variant of [`GridLayout::cell_to_index`]
    pub fn try_cell_to_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.cell_to_index(row, col))
    }

    /// Map coordinates of the centre of `(row, col)`
    #[inline]
    pub fn cell_to_xy(&self, row: usize, col: usize) -> (f64, f64) {
        self.transform.cell_centre(row, col)
    }

    /// Map coordinates of the centre of a linear index
    #[inline]
    pub fn index_to_xy(&self, idx: usize) -> (f64, f64) {
        let (row, col) = self.index_to_cell(idx);
        self.cell_to_xy(row, col)
    }

    /// Cell containing a map position, `None` outside the grid
    pub fn xy_to_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (row, col) = self.transform.grid_position(x, y)?;
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (row, col) = (row.floor() as usize, col.floor() as usize);
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// New grid with this layout, filled with the element NoData value
    pub fn empty_raster<T: RasterElement>(&self) -> Raster<T> {
        let nodata = T::default_nodata();
        Raster::filled(self.clone(), nodata).with_nodata(Some(nodata))
    }

    /// Grid with this layout from row-major values
    pub fn raster_from_vec<T: RasterElement>(&self, data: Vec<T>, nodata: Option<T>) -> Result<Raster<T>> {
        Ok(Raster::from_vec(self.clone(), data)?.with_nodata(nodata))
    }
}
