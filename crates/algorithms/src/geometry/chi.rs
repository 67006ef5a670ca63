//! Chi transform
//!
//! Chi integrates `(a0 / A)^θ` along the flow path from the network outlet:
//! ```text
//! χ(giver) = χ(receiver) + a0 · Δd / A(giver)^θ
//! ```
//! Plotting elevation against chi linearises channel profiles in steady
//! state when θ matches the channel concavity.
//!
//! Reference:
//! Perron, J.T., Royden, L. (2013). An integral approach to bedrock river
//! profile analysis. *Earth Surface Processes and Landforms*, 38, 570–576.

use crate::network::DrainageNetwork;
use streamnet_core::{Error, Result};

/// Parameters for the chi transform
#[derive(Debug, Clone, Copy)]
pub struct ChiParams {
    /// Reference concavity θ (m/n). Default: 0.45
    pub thetaref: f64,
    /// Reference drainage area, only rescales chi. Default: 1.0
    pub a0: f64,
}

impl Default for ChiParams {
    fn default() -> Self {
        Self {
            thetaref: 0.45,
            a0: 1.0,
        }
    }
}

impl ChiParams {
    /// Reject non-finite or negative concavities and non-positive reference areas
    pub fn validate(&self) -> Result<()> {
        if !self.thetaref.is_finite() || self.thetaref < 0.0 {
            return Err(Error::invalid_parameter(
                "thetaref",
                self.thetaref,
                "must be finite and non-negative",
            ));
        }
        if !self.a0.is_finite() || self.a0 <= 0.0 {
            return Err(Error::invalid_parameter(
                "a0",
                self.a0,
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// Outlet-first chi accumulation over a channel edge list.
///
/// `edge_length` and `area` are parallel to `givers`.
pub(crate) fn integrate_chi(
    ncells: usize,
    givers: &[usize],
    receivers: &[usize],
    edge_length: &[f64],
    area: &[f64],
    params: ChiParams,
) -> Vec<f64> {
    let mut chi = vec![0.0; ncells];
    for n in (0..givers.len()).rev() {
        chi[givers[n]] =
            chi[receivers[n]] + params.a0 * edge_length[n] / area[n].powf(params.thetaref);
    }
    givers.iter().map(|&g| chi[g]).collect()
}

impl DrainageNetwork {
    /// Chi for every channel giver at another concavity or reference area.
    ///
    /// Returns a fresh array; [`DrainageNetwork::chi`] keeps the
    /// construction-time values.
    pub fn compute_chi(&self, params: ChiParams) -> Result<Vec<f64>> {
        params.validate()?;
        Ok(integrate_chi(
            self.layout().ncells(),
            self.givers(),
            self.receivers(),
            self.edge_length(),
            self.area(),
            params,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkParams;
    use crate::test_support::{straight_path, y_junction};
    use approx::assert_relative_eq;

    fn network(flow: &streamnet_core::FlowGraph) -> DrainageNetwork {
        DrainageNetwork::new(flow, NetworkParams { threshold: 0.5, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_chi_matches_closed_form_on_straight_path() {
        let net = network(&straight_path());
        // Areas 1..4, unit edges: chi(13) = 1/4^θ, chi(12) = chi(13) + 1/3^θ, ...
        let theta = 0.45;
        let mut expected = 0.0;
        for n in (0..4).rev() {
            expected += 1.0 / ((n + 1) as f64).powf(theta);
            assert_relative_eq!(net.chi()[n], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_concavity_gives_distance() {
        let net = network(&y_junction());
        let chi = net
            .compute_chi(ChiParams { thetaref: 0.0, a0: 1.0 })
            .unwrap();
        for (c, d) in chi.iter().zip(net.distance_to_outlet()) {
            assert_relative_eq!(c, d, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_a0_scales_linearly() {
        let net = network(&y_junction());
        let base = net.compute_chi(ChiParams::default()).unwrap();
        let scaled = net.compute_chi(ChiParams { a0: 3.0, ..Default::default() }).unwrap();
        for (b, s) in base.iter().zip(&scaled) {
            assert_relative_eq!(3.0 * b, *s, epsilon = 1e-12);
        }
        assert_eq!(base, net.chi());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let net = network(&straight_path());
        assert!(net.compute_chi(ChiParams { thetaref: f64::INFINITY, a0: 1.0 }).is_err());
        assert!(net.compute_chi(ChiParams { thetaref: 0.45, a0: 0.0 }).is_err());
    }
}
