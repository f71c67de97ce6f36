//! Borrower population backends.
//!
//! The population is always a finite, ordered list of `(z, k, weight)`
//! records with weights summing to 1. Three constructors feed the same
//! representation:
//! - `from_grid`: explicit discretized types
//! - `sample_two_group`: seeded Monte Carlo draw from a normal/two-point
//!   mixture (the original experiment's setup)
//! - `quadrature_two_group`: midpoint-rule discretization of the same
//!   mixture, for continuum populations without sampling noise

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::error::{Error, Result};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// One borrower type: true creditworthiness, adjustment-cost coefficient,
/// and probability mass. Immutable once the population is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorrowerType {
    pub z: f64,
    pub k: f64,
    pub weight: f64,
}

/// Mixture generating the two-group population: z ~ Normal(z_mean, z_std),
/// k is k_low with probability p_low and k_high otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwoGroupMixture {
    pub z_mean: f64,
    pub z_std: f64,
    pub p_low: f64,
    pub k_low: f64,
    pub k_high: f64,
}

impl TwoGroupMixture {
    pub fn validate(&self) -> Result<()> {
        if !self.z_mean.is_finite() || !self.z_std.is_finite() || self.z_std <= 0.0 {
            return Err(Error::Configuration(format!(
                "z distribution must have finite mean and std > 0, got mean={} std={}",
                self.z_mean, self.z_std
            )));
        }
        if !(0.0..=1.0).contains(&self.p_low) {
            return Err(Error::Configuration(format!(
                "p_low must lie in [0, 1], got {}",
                self.p_low
            )));
        }
        if self.k_low <= 0.0 || self.k_high <= 0.0 {
            return Err(Error::Configuration(format!(
                "cost coefficients must be > 0, got k_low={} k_high={}",
                self.k_low, self.k_high
            )));
        }
        Ok(())
    }
}

impl Default for TwoGroupMixture {
    fn default() -> Self {
        Self {
            z_mean: 0.0,
            z_std: 1.0,
            p_low: 0.3,
            k_low: 0.1,
            k_high: 0.3,
        }
    }
}

/// Read-only after construction; all queries are pure.
#[derive(Clone, Debug, PartialEq)]
pub struct BorrowerPopulation {
    types: Vec<BorrowerType>,
}

impl BorrowerPopulation {
    /// Build from an explicit list of types. An empty list fails the
    /// weight-sum check (0 != 1) and is therefore rejected.
    pub fn from_grid(types: Vec<BorrowerType>) -> Result<Self> {
        let mut total = 0.0;
        for (i, ty) in types.iter().enumerate() {
            if !ty.z.is_finite() {
                return Err(Error::Configuration(format!(
                    "borrower {i}: z must be finite, got {}",
                    ty.z
                )));
            }
            if !ty.k.is_finite() || ty.k <= 0.0 {
                return Err(Error::Configuration(format!(
                    "borrower {i}: k must be finite and > 0, got {}",
                    ty.k
                )));
            }
            if !ty.weight.is_finite() || ty.weight < 0.0 {
                return Err(Error::Configuration(format!(
                    "borrower {i}: weight must be finite and >= 0, got {}",
                    ty.weight
                )));
            }
            total += ty.weight;
        }
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::Configuration(format!(
                "weights must sum to 1, got {total}"
            )));
        }
        Ok(Self { types })
    }

    /// Monte Carlo backend: draw `n` borrowers from the mixture with equal
    /// weights 1/n. The seed is an explicit input so runs are reproducible.
    pub fn sample_two_group(n: usize, mixture: &TwoGroupMixture, seed: u64) -> Result<Self> {
        mixture.validate()?;
        if n == 0 {
            return Err(Error::Configuration(
                "sampled population must have n >= 1".to_string(),
            ));
        }
        let normal = Normal::new(mixture.z_mean, mixture.z_std)
            .map_err(|e| Error::Configuration(format!("invalid z distribution: {e}")))?;
        let mut rng = StdRng::seed_from_u64(seed);
        let weight = 1.0 / n as f64;
        let types = (0..n)
            .map(|_| {
                let z = normal.sample(&mut rng);
                let k = if rng.gen::<f64>() < mixture.p_low {
                    mixture.k_low
                } else {
                    mixture.k_high
                };
                BorrowerType { z, k, weight }
            })
            .collect();
        Ok(Self { types })
    }

    /// Numerical-integration backend: midpoint rule over +/- 4 std of the
    /// z-normal crossed with the two-point k mixture. Weights are normal
    /// pdf mass, renormalized so they sum to exactly 1.
    pub fn quadrature_two_group(nodes: usize, mixture: &TwoGroupMixture) -> Result<Self> {
        mixture.validate()?;
        if nodes < 2 {
            return Err(Error::Configuration(
                "quadrature population needs at least 2 nodes".to_string(),
            ));
        }
        let lo = mixture.z_mean - 4.0 * mixture.z_std;
        let width = 8.0 * mixture.z_std;
        let dz = width / nodes as f64;
        let norm = 1.0 / (mixture.z_std * (2.0 * PI).sqrt());

        let mut types = Vec::with_capacity(2 * nodes);
        let mut total = 0.0;
        for i in 0..nodes {
            let z = lo + (i as f64 + 0.5) * dz;
            let u = (z - mixture.z_mean) / mixture.z_std;
            let mass = norm * (-0.5 * u * u).exp() * dz;
            for (k, share) in [
                (mixture.k_low, mixture.p_low),
                (mixture.k_high, 1.0 - mixture.p_low),
            ] {
                if share > 0.0 {
                    types.push(BorrowerType {
                        z,
                        k,
                        weight: mass * share,
                    });
                    total += mass * share;
                }
            }
        }
        for ty in &mut types {
            ty.weight /= total;
        }
        Ok(Self { types })
    }

    pub fn types(&self) -> &[BorrowerType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Probability mass of good borrowers (z >= theta).
    pub fn good_mass(&self, theta: f64) -> f64 {
        self.types
            .iter()
            .filter(|ty| ty.z >= theta)
            .map(|ty| ty.weight)
            .sum()
    }

    /// Probability mass of bad borrowers (z < theta).
    pub fn bad_mass(&self, theta: f64) -> f64 {
        self.types
            .iter()
            .filter(|ty| ty.z < theta)
            .map(|ty| ty.weight)
            .sum()
    }

    /// (min z, max z) over the population, for deriving the threshold
    /// search range.
    pub fn z_support(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for ty in &self.types {
            min = min.min(ty.z);
            max = max.max(ty.z);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_population() {
        let err = BorrowerPopulation::from_grid(vec![]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rejects_bad_weight_sum() {
        let types = vec![
            BorrowerType { z: 0.0, k: 1.0, weight: 0.5 },
            BorrowerType { z: 1.0, k: 1.0, weight: 0.3 },
        ];
        let err = BorrowerPopulation::from_grid(types).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rejects_nonpositive_cost() {
        let types = vec![BorrowerType { z: 0.0, k: 0.0, weight: 1.0 }];
        let err = BorrowerPopulation::from_grid(types).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn sampling_is_reproducible() {
        let mixture = TwoGroupMixture::default();
        let a = BorrowerPopulation::sample_two_group(500, &mixture, 42).unwrap();
        let b = BorrowerPopulation::sample_two_group(500, &mixture, 42).unwrap();
        assert_eq!(a, b);

        let c = BorrowerPopulation::sample_two_group(500, &mixture, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn quadrature_masses_match_normal() {
        let mixture = TwoGroupMixture::default();
        let pop = BorrowerPopulation::quadrature_two_group(400, &mixture).unwrap();

        let total: f64 = pop.types().iter().map(|ty| ty.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);

        // Symmetric normal: half the mass lies at or above the mean.
        assert!((pop.good_mass(0.0) - 0.5).abs() < 0.01);
        assert!((pop.good_mass(0.0) + pop.bad_mass(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn z_support_brackets_all_types() {
        let types = vec![
            BorrowerType { z: -2.0, k: 0.1, weight: 0.25 },
            BorrowerType { z: 0.5, k: 0.3, weight: 0.5 },
            BorrowerType { z: 3.0, k: 0.3, weight: 0.25 },
        ];
        let pop = BorrowerPopulation::from_grid(types).unwrap();
        assert_eq!(pop.z_support(), (-2.0, 3.0));
    }
}
