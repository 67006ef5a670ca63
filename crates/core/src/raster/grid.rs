//! Output grid type

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, GridLayout, RasterElement};
use ndarray::Array2;

/// A georeferenced 2D grid of network products.
///
/// Channel masks, segment ids, stream orders and per-cell measurements are
/// handed to callers as `Raster<T>` sharing the flow graph's layout. Cells
/// outside the channel network hold the grid's NoData value.
///
/// # Example
///
/// ```ignore
/// use streamnet_core::{GridLayout, Raster};
///
/// let layout = GridLayout::new(100, 100, Default::default());
/// let mut mask: Raster<u8> = layout.empty_raster();
/// mask.set_index(42, 1)?;
/// ```
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    data: Array2<T>,
    layout: GridLayout,
    nodata: Option<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Grid with every cell set to `value` and no NoData marker
    pub fn filled(layout: GridLayout, value: T) -> Self {
        Self {
            data: Array2::from_elem(layout.shape(), value),
            layout,
            nodata: None,
        }
    }

    /// Grid from row-major values, one per layout cell
    pub fn from_vec(layout: GridLayout, data: Vec<T>) -> Result<Self> {
        if data.len() != layout.ncells() {
            return Err(Error::SizeMismatch {
                expected: layout.ncells(),
                actual: data.len(),
            });
        }
        let data = Array2::from_shape_vec(layout.shape(), data).map_err(|_| Error::InvalidDimensions {
            width: layout.cols,
            height: layout.rows,
        })?;
        Ok(Self {
            data,
            layout,
            nodata: None,
        })
    }

    /// Set the NoData marker
    pub fn with_nodata(mut self, nodata: Option<T>) -> Self {
        self.nodata = nodata;
        self
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        Error::IndexOutOfBounds {
            row,
            col,
            rows: self.rows(),
            cols: self.cols(),
        }
    }

    /// Value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Overwrite the value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(self.out_of_bounds(row, col));
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Value at a row-major linear index
    pub fn get_index(&self, idx: usize) -> Result<T> {
        let cols = self.cols().max(1);
        self.get(idx / cols, idx % cols)
    }

    /// Overwrite the value at a row-major linear index
    pub fn set_index(&mut self, idx: usize, value: T) -> Result<()> {
        let cols = self.cols().max(1);
        self.set(idx / cols, idx % cols, value)
    }

    /// Cell values, indexed `(row, col)`
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.layout.transform
    }

    pub fn crs(&self) -> Option<&CRS> {
        self.layout.crs.as_ref()
    }

    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    /// Number of cells holding data
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&v| !self.is_nodata(v)).count()
    }

    /// Linear indices of all cells holding data, in row-major order
    pub fn valid_indices(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| !self.is_nodata(v))
            .map(|(idx, _)| idx)
            .collect()
    }
}
