//! Strahler and Shreeve stream order

use super::OrderKind;
use crate::network::DrainageNetwork;
use streamnet_core::{Raster, Result};
use tracing::debug;

impl DrainageNetwork {
    /// Stream order of every grid cell, `0` outside the channel network.
    ///
    /// Channel cells start at order 1. Edges are walked donors first, so
    /// every incoming edge of a cell is merged before the cell passes its
    /// order on.
    pub fn order_values(&self, kind: OrderKind) -> Vec<u32> {
        let channel = self.channel_cells();
        let mut order: Vec<u32> = channel.iter().map(|&c| u32::from(c)).collect();
        let mut visited = vec![false; order.len()];

        for (&g, &r) in self.givers().iter().zip(self.receivers()) {
            let incoming = order[g];
            match kind {
                OrderKind::Strahler if visited[r] && order[r] == incoming => order[r] += 1,
                OrderKind::Shreeve if visited[r] => order[r] += incoming,
                _ => {
                    order[r] = order[r].max(incoming);
                    visited[r] = true;
                }
            }
        }

        debug!(
            "{} order: maximum {}",
            kind,
            order.iter().copied().max().unwrap_or(0)
        );
        order
    }

    /// Stream order as a grid with NoData = 0
    pub fn stream_order(&self, kind: OrderKind) -> Result<Raster<u32>> {
        self.layout().raster_from_vec(self.order_values(kind), Some(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkParams;
    use crate::test_support::{flow_graph, straight_path, y_junction};

    fn network(flow: &streamnet_core::FlowGraph) -> DrainageNetwork {
        DrainageNetwork::new(flow, NetworkParams { threshold: 0.5, ..Default::default() }).unwrap()
    }

    /// Heads 0 and 2 meet at 7, heads 4 and 13 (through 14) meet at 9, and
    /// both trunks join at 18 above outlet 23, on a 6 x 5 grid.
    fn double_junction() -> DrainageNetwork {
        let mut elevation = vec![30.0; 30];
        for (cell, z) in [(0, 12.0), (2, 12.0), (7, 10.0), (4, 12.0), (14, 11.0), (9, 10.0), (13, 12.5), (18, 5.0), (23, 4.0)] {
            elevation[cell] = z;
        }
        let edges = [(0, 7), (2, 7), (4, 9), (13, 14), (14, 9), (7, 18), (9, 18), (18, 23)];
        network(&flow_graph(6, 5, &edges, elevation))
    }

    #[test]
    fn test_y_junction_orders() {
        let net = network(&y_junction());
        let strahler = net.order_values(OrderKind::Strahler);
        let shreeve = net.order_values(OrderKind::Shreeve);
        for cell in [1, 6, 11, 3, 8, 13] {
            assert_eq!(strahler[cell], 1);
            assert_eq!(shreeve[cell], 1);
        }
        assert_eq!(strahler[17], 2);
        assert_eq!(strahler[22], 2);
        assert_eq!(shreeve[17], 2);
        assert_eq!(shreeve[22], 2);
        assert_eq!(strahler[0], 0);
    }

    #[test]
    fn test_straight_path_is_first_order() {
        let net = network(&straight_path());
        for kind in [OrderKind::Strahler, OrderKind::Shreeve] {
            let order = net.order_values(kind);
            assert!((10..15).all(|cell| order[cell] == 1));
        }
    }

    #[test]
    fn test_nested_confluences() {
        let net = double_junction();
        let strahler = net.order_values(OrderKind::Strahler);
        let shreeve = net.order_values(OrderKind::Shreeve);

        assert_eq!(strahler[7], 2);
        assert_eq!(strahler[9], 2);
        assert_eq!(strahler[18], 3);
        assert_eq!(strahler[23], 3);

        assert_eq!(shreeve[7], 2);
        assert_eq!(shreeve[9], 2);
        assert_eq!(shreeve[18], 4);
        assert_eq!(shreeve[23], 4);
    }

    #[test]
    fn test_unequal_orders_keep_maximum() {
        // A first-order side stream 19 -> 24 joins the second-order trunk at 24
        let mut elevation = vec![30.0; 30];
        for (cell, z) in [(0, 12.0), (2, 12.0), (7, 10.0), (18, 6.0), (19, 7.0), (24, 4.0), (29, 3.0)] {
            elevation[cell] = z;
        }
        let edges = [(0, 7), (2, 7), (7, 18), (18, 24), (19, 24), (24, 29)];
        let net = network(&flow_graph(6, 5, &edges, elevation));

        let strahler = net.order_values(OrderKind::Strahler);
        assert_eq!(strahler[24], 2);
        assert_eq!(strahler[29], 2);

        let shreeve = net.order_values(OrderKind::Shreeve);
        assert_eq!(shreeve[24], 3);
        assert_eq!(shreeve[29], 3);
    }

    #[test]
    fn test_order_grid() {
        let net = network(&y_junction());
        let grid = net.stream_order(OrderKind::Shreeve).unwrap();
        assert_eq!(grid.nodata(), Some(0));
        assert_eq!(grid.get(4, 2).unwrap(), 2);
        assert_eq!(grid.valid_count(), 8);
    }
}
