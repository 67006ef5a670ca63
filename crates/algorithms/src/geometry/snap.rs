//! Point snapping
//!
//! Moves arbitrary map positions (gauging stations, sample sites, digitised
//! outlets) onto the drainage network: each query point is replaced by the
//! nearest reference point under Euclidean distance.

use crate::maybe_rayon::*;
use crate::network::DrainageNetwork;
use crate::selector::{impl_selector_traits, Selector};
use crate::topology::PoiKind;
use streamnet_core::{Error, Result};

/// Reference set points are snapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapTarget {
    /// Any channel cell with an outgoing channel edge
    #[default]
    Channel,
    Heads,
    Confluences,
    Outlets,
}

impl Selector for SnapTarget {
    const KIND: &'static str = "snap target";
    const NAMES: &'static [(&'static str, Self)] = &[
        ("channel", SnapTarget::Channel),
        ("heads", SnapTarget::Heads),
        ("confluences", SnapTarget::Confluences),
        ("outlets", SnapTarget::Outlets),
    ];
}

impl_selector_traits!(SnapTarget);

impl SnapTarget {
    fn poi_kind(self) -> Option<PoiKind> {
        match self {
            SnapTarget::Channel => None,
            SnapTarget::Heads => Some(PoiKind::Heads),
            SnapTarget::Confluences => Some(PoiKind::Confluences),
            SnapTarget::Outlets => Some(PoiKind::Outlets),
        }
    }
}

impl DrainageNetwork {
    /// Map coordinates of the reference points for `target`, in their
    /// natural order (edge order for channel cells, cell index for POIs)
    pub fn snap_reference(&self, target: SnapTarget) -> Vec<(f64, f64)> {
        let layout = self.layout();
        match target.poi_kind() {
            Some(kind) => self
                .stream_poi(kind)
                .into_iter()
                .map(|idx| layout.index_to_xy(idx))
                .collect(),
            None => self.givers().iter().map(|&idx| layout.index_to_xy(idx)).collect(),
        }
    }

    /// Snap every query point to its nearest reference point.
    ///
    /// Ties go to the reference point that comes first in
    /// [`snap_reference`](Self::snap_reference) order. Fails with
    /// `Error::EmptyReferenceSet` when the network has no point of the
    /// requested kind.
    pub fn snap_points(&self, points: &[(f64, f64)], target: SnapTarget) -> Result<Vec<(f64, f64)>> {
        let reference = self.snap_reference(target);
        if reference.is_empty() {
            return Err(Error::EmptyReferenceSet(target.name()));
        }

        Ok(points
            .into_par_iter()
            .map(|&(x, y)| nearest(&reference, x, y))
            .collect())
    }
}

/// Nearest point of a non-empty reference set, first one on ties
fn nearest(reference: &[(f64, f64)], x: f64, y: f64) -> (f64, f64) {
    let mut best = reference[0];
    let mut best_dist = (best.0 - x).powi(2) + (best.1 - y).powi(2);
    for &(rx, ry) in &reference[1..] {
        let dist = (rx - x).powi(2) + (ry - y).powi(2);
        if dist < best_dist {
            best = (rx, ry);
            best_dist = dist;
        }
    }
    best
}
