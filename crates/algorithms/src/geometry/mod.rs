//! Channel geometry analysis
//!
//! Read-only measurements along the channel network:
//! - Chi: area-normalised upstream distance, re-computable for any concavity
//! - Snapping: nearest channel cell or point of interest for query points
//! - Slope: moving-window least-squares slope along flow paths

mod chi;
mod regression;
mod slope;
mod snap;

pub(crate) use chi::integrate_chi;
pub use chi::ChiParams;
pub use regression::{fit_line, LineFit};
pub use slope::{SlopeEstimate, SlopeParams, SlopeResult, INSUFFICIENT_DATA};
pub use snap::SnapTarget;
