//! Synthetic flow graphs for unit tests

use std::collections::VecDeque;
use streamnet_core::{FlowGraph, GeoTransform, GridLayout};

/// Build a flow graph on a unit-cell grid from unordered `(giver, receiver)`
/// pairs. Edges are emitted donors first and accumulation counts every
/// upstream cell including the cell itself.
pub(crate) fn flow_graph(
    rows: usize,
    cols: usize,
    edges: &[(usize, usize)],
    elevation: Vec<f64>,
) -> FlowGraph {
    let layout = GridLayout::new(rows, cols, GeoTransform::new(0.0, rows as f64, 1.0, -1.0));
    let ncells = layout.ncells();

    let mut receiver = vec![None; ncells];
    let mut in_degree = vec![0usize; ncells];
    for &(g, r) in edges {
        receiver[g] = Some(r);
        in_degree[r] += 1;
    }

    let mut accumulation = vec![1.0; ncells];
    let mut givers = Vec::new();
    let mut receivers = Vec::new();
    let mut queue: VecDeque<usize> = (0..ncells).filter(|&i| in_degree[i] == 0).collect();
    while let Some(cell) = queue.pop_front() {
        if let Some(r) = receiver[cell] {
            givers.push(cell);
            receivers.push(r);
            accumulation[r] += accumulation[cell];
            in_degree[r] -= 1;
            if in_degree[r] == 0 {
                queue.push_back(r);
            }
        }
    }

    FlowGraph::new(layout, givers, receivers, accumulation, elevation).unwrap()
}

/// Single east-flowing path along row 2 of a 5x5 grid: cells 10 -> 14.
pub(crate) fn straight_path() -> FlowGraph {
    let mut elevation = vec![50.0; 25];
    for (i, cell) in (10..15).enumerate() {
        elevation[cell] = 10.0 - i as f64;
    }
    flow_graph(5, 5, &[(10, 11), (11, 12), (12, 13), (13, 14)], elevation)
}

/// Two three-cell tributaries (heads 1 and 3) meeting at cell 17, which
/// drains into outlet 22, on a 5x5 grid.
pub(crate) fn y_junction() -> FlowGraph {
    let mut elevation = vec![50.0; 25];
    for (cell, z) in [(1, 10.0), (6, 9.0), (11, 8.0), (3, 11.0), (8, 10.0), (13, 9.0), (17, 5.0), (22, 4.0)] {
        elevation[cell] = z;
    }
    flow_graph(
        5,
        5,
        &[(1, 6), (6, 11), (11, 17), (3, 8), (8, 13), (13, 17), (17, 22)],
        elevation,
    )
}
