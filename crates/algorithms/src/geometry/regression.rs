//! Ordinary least-squares line fit

use streamnet_core::{Error, Result};

/// Result of fitting `y = slope · x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, `1 − SS_res / SS_tot`
    pub r2: f64,
}

/// Fit a straight line through `(x[i], y[i])` by least squares.
///
/// A window whose `x` values all coincide has no defined slope and yields
/// `Error::DegenerateRegression`. A window whose `y` values all coincide is
/// fitted exactly by a horizontal line and gets `r2 = 1`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit> {
    if x.len() != y.len() {
        return Err(Error::SizeMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(Error::DegenerateRegression { points: n });
    }

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 || !sxx.is_finite() {
        return Err(Error::DegenerateRegression { points: n });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let r = yi - (slope * xi + intercept);
            r * r
        })
        .sum();

    let r2 = if syy > 0.0 { 1.0 - ss_res / syy } else { 1.0 };

    Ok(LineFit { slope, intercept, r2 })
}
