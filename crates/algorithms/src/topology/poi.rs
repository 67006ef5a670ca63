//! Heads, confluences and outlets
//!
//! Degrees are counted over channel edges only: a cell's in-degree is the
//! number of channel edges it receives, its out-degree is 1 when it is a
//! channel giver and 0 otherwise.

use super::{CoordKind, PoiKind, PoiLocations};
use crate::network::DrainageNetwork;
use tracing::debug;

/// Per-cell channel degrees
struct Degrees {
    incoming: Vec<u32>,
    giver: Vec<bool>,
    channel: Vec<bool>,
}

impl Degrees {
    fn matches(&self, cell: usize, kind: PoiKind) -> bool {
        match kind {
            PoiKind::Heads => self.giver[cell] && self.incoming[cell] == 0,
            PoiKind::Confluences => self.incoming[cell] >= 2,
            PoiKind::Outlets => self.channel[cell] && !self.giver[cell],
        }
    }
}

impl DrainageNetwork {
    fn degrees(&self) -> Degrees {
        let ncells = self.layout().ncells();
        let mut incoming = vec![0u32; ncells];
        let mut giver = vec![false; ncells];
        for (&g, &r) in self.givers().iter().zip(self.receivers()) {
            giver[g] = true;
            incoming[r] += 1;
        }
        Degrees {
            incoming,
            giver,
            channel: self.channel_cells(),
        }
    }

    /// Linear indices of all points of interest of one kind, ascending
    pub fn stream_poi(&self, kind: PoiKind) -> Vec<usize> {
        let degrees = self.degrees();
        let cells: Vec<usize> = (0..self.layout().ncells())
            .filter(|&cell| degrees.matches(cell, kind))
            .collect();
        debug!("{} channel {}", cells.len(), kind);
        cells
    }

    /// Points of interest of one kind in the requested coordinate system
    pub fn stream_poi_as(&self, kind: PoiKind, coords: CoordKind) -> PoiLocations {
        let cells = self.stream_poi(kind);
        let layout = self.layout();
        match coords {
            CoordKind::Cell => PoiLocations::Cells(cells.into_iter().map(|i| layout.index_to_cell(i)).collect()),
            CoordKind::Xy => PoiLocations::Xy(cells.into_iter().map(|i| layout.index_to_xy(i)).collect()),
            CoordKind::Index => PoiLocations::Indices(cells),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkParams;
    use crate::test_support::{flow_graph, straight_path, y_junction};

    fn network(flow: &streamnet_core::FlowGraph, threshold: f64) -> DrainageNetwork {
        DrainageNetwork::new(flow, NetworkParams { threshold, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_y_junction_poi() {
        let net = network(&y_junction(), 0.5);
        assert_eq!(net.stream_poi(PoiKind::Heads), vec![1, 3]);
        assert_eq!(net.stream_poi(PoiKind::Confluences), vec![17]);
        assert_eq!(net.stream_poi(PoiKind::Outlets), vec![22]);
    }

    #[test]
    fn test_straight_path_poi() {
        let net = network(&straight_path(), 0.5);
        assert_eq!(net.stream_poi(PoiKind::Heads), vec![10]);
        assert!(net.stream_poi(PoiKind::Confluences).is_empty());
        assert_eq!(net.stream_poi(PoiKind::Outlets), vec![14]);
    }

    #[test]
    fn test_single_edge_has_distinct_head_and_outlet() {
        let mut elevation = vec![10.0; 4];
        elevation[1] = 9.0;
        let net = network(&flow_graph(2, 2, &[(0, 1)], elevation), 0.5);
        assert_eq!(net.stream_poi(PoiKind::Heads), vec![0]);
        assert_eq!(net.stream_poi(PoiKind::Outlets), vec![1]);
        assert!(net.stream_poi(PoiKind::Confluences).is_empty());
    }

    #[test]
    fn test_threshold_moves_heads_downstream() {
        // Accumulation along the path is 1..5, so > 2 keeps givers 12 and 13
        let net = network(&straight_path(), 2.0);
        assert_eq!(net.stream_poi(PoiKind::Heads), vec![12]);
        assert_eq!(net.stream_poi(PoiKind::Outlets), vec![14]);
    }

    #[test]
    fn test_coordinate_systems() {
        let net = network(&y_junction(), 0.5);
        assert_eq!(
            net.stream_poi_as(PoiKind::Heads, CoordKind::Cell),
            PoiLocations::Cells(vec![(0, 1), (0, 3)])
        );
        assert_eq!(
            net.stream_poi_as(PoiKind::Confluences, CoordKind::Xy),
            PoiLocations::Xy(vec![(2.5, 1.5)])
        );
        let outlets = net.stream_poi_as(PoiKind::Outlets, CoordKind::Index);
        assert_eq!(outlets, PoiLocations::Indices(vec![22]));
        assert_eq!(outlets.len(), 1);
    }

    #[test]
    fn test_empty_network_has_no_poi() {
        let net = network(&y_junction(), 1e6);
        for kind in [PoiKind::Heads, PoiKind::Confluences, PoiKind::Outlets] {
            assert!(net.stream_poi_as(kind, CoordKind::Xy).is_empty());
        }
    }
}
