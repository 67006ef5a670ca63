//! Stream segment labelling

use super::PoiKind;
use crate::network::DrainageNetwork;
use streamnet_core::{Raster, Result};
use tracing::debug;

impl DrainageNetwork {
    /// Segment id of every grid cell, `0` outside the channel network.
    ///
    /// Heads are numbered `1..=H` in ascending cell index, confluences
    /// continue from `H + 1`. Ids are then carried downstream so each id
    /// covers one reach that starts at a head or confluence and ends just
    /// above the next confluence or at an outlet.
    pub fn segment_ids(&self) -> Vec<i32> {
        let mut ids = vec![0i32; self.layout().ncells()];
        let starts = self
            .stream_poi(PoiKind::Heads)
            .into_iter()
            .chain(self.stream_poi(PoiKind::Confluences));
        let mut count = 0;
        for (id, cell) in (1..).zip(starts) {
            ids[cell] = id;
            count = id;
        }

        for (&g, &r) in self.givers().iter().zip(self.receivers()) {
            if ids[r] == 0 {
                ids[r] = ids[g];
            }
        }
        debug!("{} stream segments", count);
        ids
    }

    /// Segment ids as a grid with NoData = 0
    pub fn stream_segments(&self) -> Result<Raster<i32>> {
        self.layout().raster_from_vec(self.segment_ids(), Some(0))
    }
}
