//! # streamnet core
//!
//! Core types shared by the streamnet drainage-network tools.
//!
//! This crate provides:
//! - `GridLayout`: raster geometry (dimensions, geotransform, CRS) and index conversions
//! - `FlowGraph`: a validated, topologically sorted single-receiver flow graph
//! - `Raster<T>`: raster-shaped output grids with NoData handling
//! - `Error`/`Result`: the error taxonomy used across the workspace
//! - `Algorithm`: the trait algorithms implement for a consistent API

pub mod crs;
pub mod error;
pub mod flow;
pub mod raster;

pub use crs::CRS;
pub use error::{Error, Result};
pub use flow::FlowGraph;
pub use raster::{GeoTransform, GridLayout, Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CRS;
    pub use crate::error::{Error, Result};
    pub use crate::flow::FlowGraph;
    pub use crate::raster::{GeoTransform, GridLayout, Raster, RasterElement};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in streamnet.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
