//! Channel network extraction
//!
//! Thresholds a flow graph down to its channel edges and derives the
//! per-channel-cell attributes every other analysis reads:
//! - drainage area (accumulation × cell size²)
//! - elevation
//! - giver-to-receiver edge length
//! - cumulative distance to the network outlet
//! - chi at the reference concavity

mod drainage;

pub use drainage::{DrainageNetwork, NetworkExtraction, NetworkParams};
