//! # streamnet algorithms
//!
//! Drainage network analysis over a topologically sorted flow graph.
//!
//! ## Components
//!
//! - **network**: channel extraction by accumulation threshold, drainage area,
//!   elevation, edge length and distance to outlet
//! - **topology**: heads, confluences and outlets, stream segments, Strahler
//!   and Shreeve order
//! - **geometry**: chi transform, point snapping, moving-window channel slope

pub mod geometry;
mod maybe_rayon;
pub mod network;
pub mod selector;
pub mod topology;

#[cfg(test)]
pub(crate) mod test_support;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::geometry::{
        fit_line, ChiParams, LineFit, SlopeEstimate, SlopeParams, SlopeResult, SnapTarget,
        INSUFFICIENT_DATA,
    };
    pub use crate::network::{DrainageNetwork, NetworkExtraction, NetworkParams};
    pub use crate::selector::Selector;
    pub use crate::topology::{CoordKind, OrderKind, PoiKind, PoiLocations};
    pub use streamnet_core::prelude::*;
}
