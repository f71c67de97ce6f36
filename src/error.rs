//! Error taxonomy for the simulation core.
//!
//! Every failure is raised at the point of detection and propagated to the
//! caller unchanged; the core never substitutes defaults for invalid input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed `ParameterSet`, `BorrowerPopulation`, or search grid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A per-borrower computation hit an undefined state (e.g. k <= 0
    /// reaching the solver despite population-level validation).
    #[error("domain error: {0}")]
    Domain(String),

    /// The equilibrium search found no admissible maximizer.
    #[error("no feasible threshold: {0}")]
    NoFeasibleThreshold(String),
}

pub type Result<T> = std::result::Result<T, Error>;
