//! Network topology
//!
//! Degree-based classification of channel cells and downstream propagation
//! over the edge list:
//! - Points of interest: channel heads, confluences and outlets
//! - Stream segments: contiguous reaches between heads, confluences and outlets
//! - Stream order: Strahler and Shreeve numbering

mod order;
mod poi;
mod segments;

use crate::selector::{impl_selector_traits, Selector};

/// Kind of point of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PoiKind {
    /// Channel cells with no incoming channel edge
    #[default]
    Heads,
    /// Channel cells with two or more incoming channel edges
    Confluences,
    /// Channel cells with no outgoing channel edge
    Outlets,
}

impl Selector for PoiKind {
    const KIND: &'static str = "point of interest";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("heads", PoiKind::Heads),
        ("confluences", PoiKind::Confluences),
        ("outlets", PoiKind::Outlets),
    ];
}

impl_selector_traits!(PoiKind);

/// Coordinate system of returned locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CoordKind {
    /// `(row, col)` pairs
    #[default]
    Cell,
    /// Map coordinates of cell centres
    Xy,
    /// Row-major linear cell indices
    Index,
}

impl Selector for CoordKind {
    const KIND: &'static str = "coordinate";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("cell", CoordKind::Cell),
        ("rowcol", CoordKind::Cell),
        ("xy", CoordKind::Xy),
        ("ind", CoordKind::Index),
        ("index", CoordKind::Index),
    ];
}

impl_selector_traits!(CoordKind);

/// Stream ordering convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OrderKind {
    /// Increments only where two streams of equal order meet
    #[default]
    Strahler,
    /// Sum of incoming orders (link magnitude)
    Shreeve,
}

impl Selector for OrderKind {
    const KIND: &'static str = "stream order";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("strahler", OrderKind::Strahler),
        ("shreeve", OrderKind::Shreeve),
    ];
}

impl_selector_traits!(OrderKind);

/// Point-of-interest locations in the requested coordinate system
#[derive(Debug, Clone, PartialEq)]
pub enum PoiLocations {
    Cells(Vec<(usize, usize)>),
    Xy(Vec<(f64, f64)>),
    Indices(Vec<usize>),
}

impl PoiLocations {
    pub fn len(&self) -> usize {
        match self {
            PoiLocations::Cells(v) => v.len(),
            PoiLocations::Xy(v) => v.len(),
            PoiLocations::Indices(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
