//! Channel slope by moving-window regression
//!
//! For every channel cell, elevation is regressed against distance to
//! outlet over `2·npoints + 1` consecutive cells of the same flow path,
//! centred on the cell. Paths are walked from each channel head downstream:
//!
//! - heads are processed from highest to lowest, and the first path to
//!   reach a cell keeps its value, so at a confluence the trunk slope comes
//!   from the highest-sourced tributary and lower paths stop there
//! - near the head the window is shorter and grows by two cells per step
//!   until it reaches full length
//! - near the outlet the window shrinks by two cells per step; the last
//!   channel cell gets [`SlopeEstimate::InsufficientData`]
//!
//! Windows are kept in a deque of edge positions with the downstream end at
//! the front, so the centre cell is always `window[(len - 1) / 2]`.

use crate::geometry::regression::fit_line;
use crate::network::DrainageNetwork;
use crate::topology::PoiKind;
use std::collections::VecDeque;
use streamnet_core::{Error, Result};
use tracing::{debug, trace};

/// Flattened slope and R² of cells too close to an outlet to be fitted
pub const INSUFFICIENT_DATA: f64 = 0.00001;

/// Parameters for channel slope estimation
#[derive(Debug, Clone)]
pub struct SlopeParams {
    /// Cells on each side of the centre cell. The full regression window
    /// holds `2·npoints + 1` cells. Default: 4
    pub npoints: usize,
}

impl Default for SlopeParams {
    fn default() -> Self {
        Self { npoints: 4 }
    }
}

impl SlopeParams {
    /// Reject empty windows and windows whose length overflows
    pub fn validate(&self) -> Result<()> {
        if self.npoints == 0 {
            return Err(Error::invalid_parameter(
                "npoints",
                self.npoints,
                "regression window needs at least one cell on each side",
            ));
        }
        if self.npoints.checked_mul(2).and_then(|w| w.checked_add(1)).is_none() {
            return Err(Error::invalid_parameter(
                "npoints",
                self.npoints,
                "regression window length overflows",
            ));
        }
        Ok(())
    }

    fn window_len(&self) -> usize {
        self.npoints.saturating_mul(2).saturating_add(1)
    }
}

/// Slope estimate of one channel cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlopeEstimate {
    /// No path centred a window on this cell (channel heads, skipped paths)
    #[default]
    Unset,
    /// Least-squares slope of elevation against distance, with its R²
    Fitted { slope: f64, r2: f64 },
    /// Last channel cell of a path; too close to the outlet for a window
    InsufficientData,
}

impl SlopeEstimate {
    /// Slope value, `0` when unset and [`INSUFFICIENT_DATA`] near outlets
    pub fn slope(&self) -> f64 {
        match *self {
            SlopeEstimate::Unset => 0.0,
            SlopeEstimate::Fitted { slope, .. } => slope,
            SlopeEstimate::InsufficientData => INSUFFICIENT_DATA,
        }
    }

    /// R² value, flattened like [`SlopeEstimate::slope`]
    pub fn r2(&self) -> f64 {
        match *self {
            SlopeEstimate::Unset => 0.0,
            SlopeEstimate::Fitted { r2, .. } => r2,
            SlopeEstimate::InsufficientData => INSUFFICIENT_DATA,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, SlopeEstimate::Unset)
    }
}

/// Output of [`DrainageNetwork::channel_slope`]
#[derive(Debug, Clone)]
pub struct SlopeResult {
    /// One estimate per channel edge, parallel to `givers()`
    pub estimates: Vec<SlopeEstimate>,
    /// Heads whose path is too short to seed a three-cell window
    pub skipped_heads: usize,
}

impl SlopeResult {
    /// Flattened slopes, parallel to `givers()`
    pub fn slopes(&self) -> Vec<f64> {
        self.estimates.iter().map(SlopeEstimate::slope).collect()
    }

    /// Flattened R² values, parallel to `givers()`
    pub fn r2(&self) -> Vec<f64> {
        self.estimates.iter().map(SlopeEstimate::r2).collect()
    }

    /// Number of cells with a fitted slope
    pub fn fitted_count(&self) -> usize {
        self.estimates
            .iter()
            .filter(|e| matches!(e, SlopeEstimate::Fitted { .. }))
            .count()
    }
}

/// What the next downstream cell does to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowState {
    /// Window shorter than full length: take up to two downstream cells
    GrowingAtHead(usize),
    /// Full length: slide one cell downstream
    Steady(usize),
    /// No channel edge downstream of the front: drop two upstream cells
    ShrinkingAtTerminus,
}

/// Result of advancing a window one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Centre moved one cell downstream
    Moved,
    /// Path exhausted; `refit` when the window changed in this step
    Finished { refit: bool },
}

/// Regression window over one flow path, as edge positions.
#[derive(Debug)]
struct SlopeWindow {
    cells: VecDeque<usize>,
    full_len: usize,
}

impl SlopeWindow {
    fn seed(head: usize, mid: usize, far: usize, full_len: usize) -> Self {
        let cells = VecDeque::from([far, mid, head]);
        Self { cells, full_len }
    }

    /// Downstream end of the window
    fn front(&self) -> usize {
        self.cells[0]
    }

    fn middle(&self) -> usize {
        self.cells[(self.cells.len() - 1) / 2]
    }

    fn state(&self, next: &[Option<usize>]) -> WindowState {
        match next[self.front()] {
            Some(cell) if self.cells.len() < self.full_len => WindowState::GrowingAtHead(cell),
            Some(cell) => WindowState::Steady(cell),
            None => WindowState::ShrinkingAtTerminus,
        }
    }

    /// Move the window centre one cell downstream
    fn advance(&mut self, next: &[Option<usize>]) -> Step {
        match self.state(next) {
            WindowState::GrowingAtHead(cell) => {
                self.cells.push_front(cell);
                match next[cell] {
                    Some(after) => self.cells.push_front(after),
                    // One cell short of growing: slide instead
                    None => {
                        self.cells.pop_back();
                    }
                }
                Step::Moved
            }
            WindowState::Steady(cell) => {
                self.cells.push_front(cell);
                self.cells.pop_back();
                Step::Moved
            }
            WindowState::ShrinkingAtTerminus if self.cells.len() > 3 => {
                self.cells.pop_back();
                self.cells.pop_back();
                if self.cells.len() == 3 {
                    Step::Finished { refit: true }
                } else {
                    Step::Moved
                }
            }
            WindowState::ShrinkingAtTerminus => Step::Finished { refit: false },
        }
    }

    fn fit(&self, distance: &[f64], elevation: &[f64]) -> Result<SlopeEstimate> {
        let x: Vec<f64> = self.cells.iter().map(|&p| distance[p]).collect();
        let y: Vec<f64> = self.cells.iter().map(|&p| elevation[p]).collect();
        let line = fit_line(&x, &y)?;
        Ok(SlopeEstimate::Fitted {
            slope: line.slope,
            r2: line.r2,
        })
    }
}

/// Set an estimate unless another path got there first
fn claim(estimates: &mut [SlopeEstimate], pos: usize, estimate: SlopeEstimate) -> bool {
    if estimates[pos].is_set() {
        return false;
    }
    estimates[pos] = estimate;
    true
}

impl DrainageNetwork {
    /// Estimate local channel slope and R² for every channel cell.
    ///
    /// Fails with `Error::DegenerateRegression` if a window's cells all lie
    /// at the same distance to outlet (zero-length edges).
    pub fn channel_slope(&self, params: SlopeParams) -> Result<SlopeResult> {
        params.validate()?;

        let positions = self.positions();
        let next: Vec<Option<usize>> = self.receivers().iter().map(|&r| positions[r]).collect();
        let distance = self.distance_to_outlet();
        let elevation = self.elevation();

        let mut heads: Vec<usize> = self
            .stream_poi(PoiKind::Heads)
            .into_iter()
            .filter_map(|cell| positions[cell])
            .collect();
        heads.sort_by(|&a, &b| elevation[b].total_cmp(&elevation[a]));

        let mut estimates = vec![SlopeEstimate::Unset; self.len()];
        let mut skipped_heads = 0;

        for head in heads {
            let Some((mid, far)) = next[head].and_then(|mid| next[mid].map(|far| (mid, far))) else {
                debug!(cell = self.givers()[head], "channel head too close to an outlet, skipped");
                skipped_heads += 1;
                continue;
            };

            let mut window = SlopeWindow::seed(head, mid, far, params.window_len());
            if !claim(&mut estimates, window.middle(), window.fit(distance, elevation)?) {
                trace!(cell = self.givers()[head], "path joins a processed path at its seed");
                continue;
            }

            loop {
                match window.advance(&next) {
                    Step::Moved => {
                        let estimate = window.fit(distance, elevation)?;
                        if !claim(&mut estimates, window.middle(), estimate) {
                            trace!(cell = self.givers()[window.middle()], "path converged");
                            break;
                        }
                    }
                    Step::Finished { refit } => {
                        if refit {
                            let estimate = window.fit(distance, elevation)?;
                            claim(&mut estimates, window.middle(), estimate);
                        }
                        claim(&mut estimates, window.front(), SlopeEstimate::InsufficientData);
                        trace!(cell = self.givers()[window.front()], "path reached outlet");
                        break;
                    }
                }
            }
        }

        let result = SlopeResult {
            estimates,
            skipped_heads,
        };
        debug!(
            "channel slope: {} of {} cells fitted, {} heads skipped",
            result.fitted_count(),
            self.len(),
            result.skipped_heads
        );
        Ok(result)
    }
}
