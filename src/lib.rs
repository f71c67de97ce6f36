//! Regulated Strategic Lending Simulation
//!
//! One-shot game between strategic borrowers, a lender, and a regulator:
//! borrowers can pay a quadratic cost to inflate their reported score
//! s = z + a, the lender approves reports at or above a threshold t, and the
//! regulator penalizes denials of good borrowers with weight lambda. The
//! engine computes borrower best responses, aggregates lender profit Pi(t)
//! and penalty P(t), and searches for t* = argmax Pi(t) - lambda * P(t)
//! across a sweep of lambda values.
//!
//! ## Modules
//!
//! - `params`: immutable model parameters
//! - `population`: borrower type enumeration (grid, sampled, quadrature)
//! - `best_response`: per-borrower optimal score adjustment
//! - `profit`: lender profit / regulator penalty aggregation
//! - `equilibrium`: threshold search and lambda sweep
//!
//! ## Usage
//!
//! ```bash
//! # Run the lambda sweep with the default experiment parameters
//! cargo run --bin sweep --release
//!
//! # Rank unregulated parameter regimes by good-denial mass
//! cargo run --bin regimes --release
//! ```

pub mod best_response;
pub mod equilibrium;
pub mod error;
pub mod params;
pub mod population;
pub mod profit;

pub use equilibrium::{run_scenario, sweep, RegulationScenario, ThresholdGrid};
pub use error::{Error, Result};
pub use params::ParameterSet;
pub use population::{BorrowerPopulation, BorrowerType, TwoGroupMixture};
pub use profit::{evaluate_threshold, ThresholdOutcome, WelfareStats};
