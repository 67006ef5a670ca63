//! Drainage network construction

use crate::geometry::{integrate_chi, ChiParams};
use streamnet_core::{Algorithm, Error, FlowGraph, GridLayout, Raster, Result};
use tracing::debug;

/// Fraction of the grid used as accumulation threshold when none is given
const DEFAULT_THRESHOLD_FRACTION: f64 = 0.005;

/// Parameters for network extraction
#[derive(Debug, Clone)]
pub struct NetworkParams {
    /// Flow accumulation threshold (in cell counts). Cells draining more
    /// than this many cells start or continue a channel.
    /// `0.0` selects 0.5% of the total number of cells.
    pub threshold: f64,
    /// Reference concavity used for the construction-time chi values.
    /// Default: 0.45
    pub thetaref: f64,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            thetaref: 0.45,
        }
    }
}

impl NetworkParams {
    /// Reject thresholds and concavities outside their domain
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::invalid_parameter(
                "threshold",
                self.threshold,
                "must be a finite, non-negative cell count",
            ));
        }
        ChiParams {
            thetaref: self.thetaref,
            ..ChiParams::default()
        }
        .validate()
    }
}

/// Channel network extracted from a flow graph.
///
/// Per-channel arrays are parallel to [`givers`](Self::givers): the value at
/// position `n` describes the cell `givers()[n]`, whose single downstream
/// neighbour is `receivers()[n]`. Edges keep the flow graph's donors-first
/// order. Everything here is computed once in [`DrainageNetwork::new`];
/// slope, segments and stream order are produced by explicit queries.
#[derive(Debug, Clone)]
pub struct DrainageNetwork {
    layout: GridLayout,
    threshold: f64,
    thetaref: f64,
    givers: Vec<usize>,
    receivers: Vec<usize>,
    area: Vec<f64>,
    elevation: Vec<f64>,
    edge_length: Vec<f64>,
    distance: Vec<f64>,
    chi: Vec<f64>,
}

impl DrainageNetwork {
    /// Extract the channel network of `flow`.
    ///
    /// A flow edge is kept when its giver drains more than `threshold`
    /// cells. A threshold above every accumulation value yields a valid,
    /// empty network.
    pub fn new(flow: &FlowGraph, params: NetworkParams) -> Result<Self> {
        params.validate()?;

        let layout = flow.layout().clone();
        let ncells = layout.ncells();
        let threshold = if params.threshold == 0.0 {
            ncells as f64 * DEFAULT_THRESHOLD_FRACTION
        } else {
            params.threshold
        };

        let accumulation = flow.accumulation();
        let (givers, receivers): (Vec<usize>, Vec<usize>) = flow
            .givers()
            .iter()
            .zip(flow.receivers())
            .filter(|&(&giver, _)| accumulation[giver] > threshold)
            .map(|(&giver, &receiver)| (giver, receiver))
            .unzip();

        let cell_area = layout.cell_size() * layout.cell_size();
        let area: Vec<f64> = givers.iter().map(|&g| accumulation[g] * cell_area).collect();
        let elevation: Vec<f64> = givers.iter().map(|&g| flow.elevation()[g]).collect();

        // Outlet-first pass: a receiver's distance is final before its givers read it
        let mut downstream = vec![0.0; ncells];
        let mut edge_length = vec![0.0; givers.len()];
        for n in (0..givers.len()).rev() {
            let (gx, gy) = layout.index_to_xy(givers[n]);
            let (rx, ry) = layout.index_to_xy(receivers[n]);
            edge_length[n] = (gx - rx).hypot(gy - ry);
            downstream[givers[n]] = downstream[receivers[n]] + edge_length[n];
        }
        let distance: Vec<f64> = givers.iter().map(|&g| downstream[g]).collect();

        let chi = integrate_chi(
            ncells,
            &givers,
            &receivers,
            &edge_length,
            &area,
            ChiParams {
                thetaref: params.thetaref,
                ..ChiParams::default()
            },
        );

        debug!(
            "channel network: {} of {} flow edges kept (threshold {} cells, {} cells in grid)",
            givers.len(),
            flow.len(),
            threshold,
            ncells
        );

        Ok(Self {
            layout,
            threshold,
            thetaref: params.thetaref,
            givers,
            receivers,
            area,
            elevation,
            edge_length,
            distance,
            chi,
        })
    }

    // Attributes

    /// Grid layout shared with the flow graph
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Accumulation threshold actually applied (after defaulting)
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Reference concavity of [`chi`](Self::chi)
    pub fn thetaref(&self) -> f64 {
        self.thetaref
    }

    /// Number of channel edges
    pub fn len(&self) -> usize {
        self.givers.len()
    }

    /// Whether the threshold left no channel edges
    pub fn is_empty(&self) -> bool {
        self.givers.is_empty()
    }

    /// Giver cell of every channel edge
    pub fn givers(&self) -> &[usize] {
        &self.givers
    }

    /// Receiver cell of every channel edge
    pub fn receivers(&self) -> &[usize] {
        &self.receivers
    }

    /// Drainage area in map units
    pub fn area(&self) -> &[f64] {
        &self.area
    }

    /// Elevation of each giver cell
    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    /// Planar giver-to-receiver distance
    pub fn edge_length(&self) -> &[f64] {
        &self.edge_length
    }

    /// Downstream path length from each giver cell to its network outlet
    pub fn distance_to_outlet(&self) -> &[f64] {
        &self.distance
    }

    /// Chi at the construction-time reference concavity, `a0 = 1`
    pub fn chi(&self) -> &[f64] {
        &self.chi
    }

    // Cell lookups

    /// Edge position of a giver cell, `None` for cells without an outgoing
    /// channel edge (outlets and non-channel cells)
    pub fn position_of(&self, cell: usize) -> Option<usize> {
        self.givers.iter().position(|&g| g == cell)
    }

    /// Edge position of every grid cell that is a channel giver
    pub(crate) fn positions(&self) -> Vec<Option<usize>> {
        let mut positions = vec![None; self.layout.ncells()];
        for (n, &g) in self.givers.iter().enumerate() {
            positions[g] = Some(n);
        }
        positions
    }

    /// Grid mask of cells touched by a channel edge (givers and receivers)
    pub(crate) fn channel_cells(&self) -> Vec<bool> {
        let mut channel = vec![false; self.layout.ncells()];
        for (&g, &r) in self.givers.iter().zip(&self.receivers) {
            channel[g] = true;
            channel[r] = true;
        }
        channel
    }

    /// Pick the value of each channel giver out of a full-grid array
    pub fn gather<T: Copy>(&self, cell_values: &[T]) -> Result<Vec<T>> {
        if cell_values.len() != self.layout.ncells() {
            return Err(Error::SizeMismatch {
                expected: self.layout.ncells(),
                actual: cell_values.len(),
            });
        }
        Ok(self.givers.iter().map(|&g| cell_values[g]).collect())
    }

    // Output grids

    /// Channel mask grid: 1 on channel cells, NoData (0) elsewhere
    pub fn channel_mask(&self) -> Result<Raster<u8>> {
        let data = self.channel_cells().into_iter().map(u8::from).collect();
        self.layout.raster_from_vec(data, Some(0))
    }

    /// Scatter a per-edge array (chi, slope, area, ...) onto a grid with
    /// NaN NoData outside the channel givers
    pub fn to_grid(&self, values: &[f64]) -> Result<Raster<f64>> {
        if values.len() != self.len() {
            return Err(Error::SizeMismatch {
                expected: self.len(),
                actual: values.len(),
            });
        }
        let mut grid = self.layout.empty_raster::<f64>();
        for (&cell, &value) in self.givers.iter().zip(values) {
            grid.set_index(cell, value)?;
        }
        Ok(grid)
    }
}

/// Network extraction as an [`Algorithm`]
#[derive(Debug, Clone, Default)]
pub struct NetworkExtraction;

impl Algorithm for NetworkExtraction {
    type Input = FlowGraph;
    type Output = DrainageNetwork;
    type Params = NetworkParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Drainage Network"
    }

    fn description(&self) -> &'static str {
        "Extract channel cells from a sorted flow graph by accumulation threshold"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        DrainageNetwork::new(&input, params)
    }
}
