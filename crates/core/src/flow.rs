//! Topologically sorted single-receiver flow graph
//!
//! A `FlowGraph` is the hand-over point from flow routing to network
//! analysis. It carries, for a whole grid:
//! - the edge list `(givers[n], receivers[n])`, one edge per draining cell
//! - per-cell flow accumulation (upstream cell count)
//! - per-cell elevation
//!
//! Edges are ordered donors first: every edge that feeds a cell comes
//! before that cell's own outgoing edge. Iterating forward therefore walks
//! downstream, iterating in reverse walks from the outlets upstream.

use crate::error::{Error, Result};
use crate::raster::GridLayout;
use serde::{Deserialize, Serialize};

/// Validated flow-routing graph over a grid layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FlowGraphDocument")]
pub struct FlowGraph {
    layout: GridLayout,
    givers: Vec<usize>,
    receivers: Vec<usize>,
    accumulation: Vec<f64>,
    elevation: Vec<f64>,
}

/// Unvalidated serialized form of a [`FlowGraph`]
#[derive(Deserialize)]
struct FlowGraphDocument {
    layout: GridLayout,
    givers: Vec<usize>,
    receivers: Vec<usize>,
    accumulation: Vec<f64>,
    elevation: Vec<f64>,
}

impl TryFrom<FlowGraphDocument> for FlowGraph {
    type Error = Error;

    fn try_from(doc: FlowGraphDocument) -> Result<Self> {
        FlowGraph::new(
            doc.layout,
            doc.givers,
            doc.receivers,
            doc.accumulation,
            doc.elevation,
        )
    }
}

impl FlowGraph {
    /// Build a flow graph, checking shape, index range, single-receiver
    /// routing and the donors-first edge order.
    pub fn new(
        layout: GridLayout,
        givers: Vec<usize>,
        receivers: Vec<usize>,
        accumulation: Vec<f64>,
        elevation: Vec<f64>,
    ) -> Result<Self> {
        let ncells = layout.ncells();
        if ncells == 0 {
            return Err(Error::InvalidDimensions {
                width: layout.cols,
                height: layout.rows,
            });
        }
        let cell_size = layout.cell_size();
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(Error::invalid_parameter(
                "cell_size",
                cell_size,
                "cell size must be positive and finite",
            ));
        }

        if receivers.len() != givers.len() {
            return Err(Error::SizeMismatch {
                expected: givers.len(),
                actual: receivers.len(),
            });
        }
        for values in [&accumulation, &elevation] {
            if values.len() != ncells {
                return Err(Error::SizeMismatch {
                    expected: ncells,
                    actual: values.len(),
                });
            }
        }

        // Edge position of each giver cell
        let mut position: Vec<Option<usize>> = vec![None; ncells];
        for (n, (&giver, &receiver)) in givers.iter().zip(&receivers).enumerate() {
            if giver >= ncells || receiver >= ncells {
                return Err(Error::InvalidFlowGraph(format!(
                    "edge {} ({} -> {}) outside grid of {} cells",
                    n, giver, receiver, ncells
                )));
            }
            if giver == receiver {
                return Err(Error::InvalidFlowGraph(format!(
                    "edge {} drains cell {} into itself",
                    n, giver
                )));
            }
            if let Some(first) = position[giver] {
                return Err(Error::InvalidFlowGraph(format!(
                    "cell {} drains twice (edges {} and {})",
                    giver, first, n
                )));
            }
            position[giver] = Some(n);
        }

        for (n, &receiver) in receivers.iter().enumerate() {
            if let Some(m) = position[receiver] {
                if m < n {
                    return Err(Error::InvalidFlowGraph(format!(
                        "edge {} feeds cell {} after its outgoing edge {}",
                        n, receiver, m
                    )));
                }
            }
        }

        Ok(Self {
            layout,
            givers,
            receivers,
            accumulation,
            elevation,
        })
    }

    /// Grid layout the graph is defined on
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Giver cell of every edge
    pub fn givers(&self) -> &[usize] {
        &self.givers
    }

    /// Receiver cell of every edge
    pub fn receivers(&self) -> &[usize] {
        &self.receivers
    }

    /// Flow accumulation per cell (cell counts)
    pub fn accumulation(&self) -> &[f64] {
        &self.accumulation
    }

    /// Elevation per cell
    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.givers.len()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.givers.is_empty()
    }

    /// Number of cells in the grid
    pub fn ncells(&self) -> usize {
        self.layout.ncells()
    }
}
