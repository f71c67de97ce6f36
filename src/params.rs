//! Model parameters shared by every stage of the simulation.

use crate::error::{Error, Result};

/// Immutable parameter bundle for one scenario run.
///
/// `theta` partitions borrowers into good (z >= theta) and bad; `pi_good`
/// and `pi_bad` are the lender's expected profit per accepted borrower of
/// each kind. `benefit` is the borrower-side utility of approval and is an
/// explicit input, never derived from the lender-side profits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    /// Truth threshold: a borrower is good iff z >= theta.
    pub theta: f64,
    /// Lender profit per accepted good borrower (> 0).
    pub pi_good: f64,
    /// Lender profit per accepted bad borrower (< 0).
    pub pi_bad: f64,
    /// Borrower benefit from approval (>= 0).
    pub benefit: f64,
    /// Harm to a good borrower who ends up denied (>= 0). Zero disables
    /// the harm term and the solver reduces to the plain benefit/cost
    /// comparison.
    pub denial_harm: f64,
}

impl ParameterSet {
    pub fn new(
        theta: f64,
        pi_good: f64,
        pi_bad: f64,
        benefit: f64,
        denial_harm: f64,
    ) -> Result<Self> {
        let params = Self {
            theta,
            pi_good,
            pi_bad,
            benefit,
            denial_harm,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.theta.is_finite() {
            return Err(Error::Configuration(format!(
                "theta must be finite, got {}",
                self.theta
            )));
        }
        if !self.pi_good.is_finite() || self.pi_good <= 0.0 {
            return Err(Error::Configuration(format!(
                "pi_good must be finite and > 0, got {}",
                self.pi_good
            )));
        }
        if !self.pi_bad.is_finite() || self.pi_bad >= 0.0 {
            return Err(Error::Configuration(format!(
                "pi_bad must be finite and < 0, got {}",
                self.pi_bad
            )));
        }
        if !self.benefit.is_finite() || self.benefit < 0.0 {
            return Err(Error::Configuration(format!(
                "benefit must be finite and >= 0, got {}",
                self.benefit
            )));
        }
        if !self.denial_harm.is_finite() || self.denial_harm < 0.0 {
            return Err(Error::Configuration(format!(
                "denial_harm must be finite and >= 0, got {}",
                self.denial_harm
            )));
        }
        Ok(())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            theta: 0.0,
            pi_good: 0.2,
            pi_bad: -0.6,
            benefit: 1.0,
            denial_harm: 0.1,
        }
    }
}
