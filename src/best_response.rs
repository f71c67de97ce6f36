//! Borrower best-response solver.
//!
//! The borrower's objective is discontinuous at the approval cutoff, so the
//! optimum is one of two candidates: stay at a = 0, or pay the minimal
//! adjustment a = t - z that exactly reaches the threshold. Negative
//! adjustments are never payoff-improving and are excluded outright.

use crate::error::{Error, Result};
use crate::params::ParameterSet;

/// Quadratic adjustment cost (k/2) * a^2.
pub fn adjustment_cost(k: f64, a: f64) -> f64 {
    0.5 * k * a * a
}

/// Optimal adjustment a* for a borrower of type (z, k) facing lender
/// threshold `t`.
///
/// Exact ties between adjusting and staying break toward no manipulation.
/// A good borrower (z >= theta) who stays below t bears `denial_harm`,
/// which makes marginal adjustments worthwhile that a zero-harm borrower
/// would skip.
pub fn best_response(z: f64, k: f64, t: f64, params: &ParameterSet) -> Result<f64> {
    if !k.is_finite() || k <= 0.0 {
        return Err(Error::Domain(format!(
            "adjustment cost coefficient must be finite and > 0, got {k}"
        )));
    }

    // Already approved: any adjustment is pure cost.
    if z >= t {
        return Ok(0.0);
    }

    let delta = t - z;
    let stay = if z >= params.theta {
        -params.denial_harm
    } else {
        0.0
    };
    let adjust = params.benefit - adjustment_cost(k, delta);

    if adjust > stay {
        Ok(delta)
    } else {
        Ok(0.0)
    }
}
