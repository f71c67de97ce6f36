//! Lender profit and regulator penalty aggregation.
//!
//! Pure functions of (population, params, t, lambda): every call recomputes
//! each borrower's best response for the given threshold, so no state ever
//! leaks between threshold evaluations.

use crate::best_response::{adjustment_cost, best_response};
use crate::error::{Error, Result};
use crate::params::ParameterSet;
use crate::population::BorrowerPopulation;

/// Aggregate outcome of one threshold evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdOutcome {
    pub threshold: f64,
    pub lambda: f64,
    /// Regulated objective R(t) = profit - lambda * penalty.
    pub objective: f64,
    /// Expected lender profit Pi(t).
    pub profit: f64,
    /// Good-but-denied probability mass P(t).
    pub penalty: f64,
    pub stats: WelfareStats,
}

/// Welfare measures accompanying the lender-side quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WelfareStats {
    /// Accepted mass among good borrowers, as a share of good mass.
    pub accept_rate_good: f64,
    /// Accepted mass among bad borrowers, as a share of bad mass.
    pub accept_rate_bad: f64,
    /// Total adjustment cost burned across the population.
    pub adjustment_cost: f64,
    /// Probability mass of borrowers choosing a* > 0.
    pub manipulating_mass: f64,
}

/// Evaluate Pi(t), P(t), and the regulated objective at threshold `t`.
pub fn evaluate_threshold(
    population: &BorrowerPopulation,
    params: &ParameterSet,
    t: f64,
    lambda: f64,
) -> Result<ThresholdOutcome> {
    if !t.is_finite() {
        return Err(Error::Domain(format!("threshold must be finite, got {t}")));
    }
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(Error::Configuration(format!(
            "lambda must be finite and >= 0, got {lambda}"
        )));
    }

    let mut profit = 0.0;
    let mut penalty = 0.0;
    let mut good_mass = 0.0;
    let mut bad_mass = 0.0;
    let mut accepted_good = 0.0;
    let mut accepted_bad = 0.0;
    let mut total_cost = 0.0;
    let mut manipulating = 0.0;

    for ty in population.types() {
        let a = best_response(ty.z, ty.k, t, params)?;
        // a* > 0 is the minimal adjustment that exactly reaches t, so an
        // adjusting borrower is approved by construction; summing z + a
        // can round one ulp below t and must not decide acceptance.
        let accepted = ty.z >= t || a > 0.0;
        let good = ty.z >= params.theta;

        if good {
            good_mass += ty.weight;
        } else {
            bad_mass += ty.weight;
        }

        if accepted {
            profit += ty.weight * if good { params.pi_good } else { params.pi_bad };
            if good {
                accepted_good += ty.weight;
            } else {
                accepted_bad += ty.weight;
            }
        } else if good {
            penalty += ty.weight;
        }

        if a > 0.0 {
            manipulating += ty.weight;
            total_cost += ty.weight * adjustment_cost(ty.k, a);
        }
    }

    let stats = WelfareStats {
        accept_rate_good: if good_mass > 0.0 { accepted_good / good_mass } else { 0.0 },
        accept_rate_bad: if bad_mass > 0.0 { accepted_bad / bad_mass } else { 0.0 },
        adjustment_cost: total_cost,
        manipulating_mass: manipulating,
    };

    Ok(ThresholdOutcome {
        threshold: t,
        lambda,
        objective: profit - lambda * penalty,
        profit,
        penalty,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::BorrowerType;

    fn heterogeneous_population() -> BorrowerPopulation {
        BorrowerPopulation::from_grid(vec![
            BorrowerType { z: -1.5, k: 0.1, weight: 0.2 },
            BorrowerType { z: -0.5, k: 0.3, weight: 0.2 },
            BorrowerType { z: 0.2, k: 0.1, weight: 0.2 },
            BorrowerType { z: 0.8, k: 0.3, weight: 0.2 },
            BorrowerType { z: 1.6, k: 0.3, weight: 0.2 },
        ])
        .unwrap()
    }

    #[test]
    fn penalty_is_nondecreasing_in_threshold() {
        let pop = heterogeneous_population();
        let params = ParameterSet::default();

        let mut prev = 0.0;
        let mut t = -2.0;
        while t <= 6.0 {
            let out = evaluate_threshold(&pop, &params, t, 0.5).unwrap();
            assert!(
                out.penalty >= prev - 1e-12,
                "P(t) decreased at t={t}: {} -> {}",
                prev,
                out.penalty
            );
            prev = out.penalty;
            t += 0.05;
        }
    }

    #[test]
    fn far_threshold_denies_all_good_mass() {
        let pop = heterogeneous_population();
        let params = ParameterSet::default();

        // t far above support: cost of reaching it dwarfs the benefit, so
        // nobody adjusts and every good borrower is denied.
        let out = evaluate_threshold(&pop, &params, 50.0, 1.0).unwrap();
        assert!((out.penalty - pop.good_mass(params.theta)).abs() < 1e-12);
        assert_eq!(out.profit, 0.0);
        assert_eq!(out.stats.manipulating_mass, 0.0);
    }

    #[test]
    fn low_threshold_accepts_everyone() {
        let pop = heterogeneous_population();
        let params = ParameterSet::default();

        let out = evaluate_threshold(&pop, &params, -2.0, 1.0).unwrap();
        assert_eq!(out.penalty, 0.0);
        assert_eq!(out.stats.accept_rate_good, 1.0);
        assert_eq!(out.stats.accept_rate_bad, 1.0);

        let expected = pop.good_mass(params.theta) * params.pi_good
            + pop.bad_mass(params.theta) * params.pi_bad;
        assert!((out.profit - expected).abs() < 1e-12);
    }

    #[test]
    fn objective_subtracts_weighted_penalty() {
        let pop = heterogeneous_population();
        let params = ParameterSet::default();

        let out = evaluate_threshold(&pop, &params, 1.0, 0.7).unwrap();
        assert!((out.objective - (out.profit - 0.7 * out.penalty)).abs() < 1e-15);
    }

    #[test]
    fn manipulation_burns_cost_and_crosses_threshold() {
        // Single cheap manipulator below the cutoff.
        let pop = BorrowerPopulation::from_grid(vec![BorrowerType {
            z: 0.0,
            k: 0.1,
            weight: 1.0,
        }])
        .unwrap();
        let params = ParameterSet::new(0.5, 0.2, -0.6, 1.0, 0.0).unwrap();

        let out = evaluate_threshold(&pop, &params, 1.0, 0.0).unwrap();
        assert_eq!(out.stats.manipulating_mass, 1.0);
        assert!((out.stats.adjustment_cost - 0.05).abs() < 1e-12);
        // Bad borrower (z < theta) bought approval.
        assert_eq!(out.stats.accept_rate_bad, 1.0);
        assert!((out.profit - params.pi_bad).abs() < 1e-12);
    }

    #[test]
    fn adjuster_is_accepted_despite_rounding() {
        // z + (t - z) can land one ulp below t. The borrower paid to
        // reach the threshold, so the engine must count the approval,
        // not charge the penalty.
        let z = 0.2;
        let t = 0.95000000000000162;
        assert!(z + (t - z) < t, "need a rounding-down (z, t) pair");

        let pop = BorrowerPopulation::from_grid(vec![BorrowerType {
            z,
            k: 0.1,
            weight: 1.0,
        }])
        .unwrap();
        let params = ParameterSet::new(0.0, 0.2, -0.6, 1.0, 0.0).unwrap();

        let out = evaluate_threshold(&pop, &params, t, 1.0).unwrap();
        assert_eq!(out.stats.manipulating_mass, 1.0);
        assert_eq!(out.penalty, 0.0);
        assert_eq!(out.stats.accept_rate_good, 1.0);
        assert!((out.profit - params.pi_good).abs() < 1e-15);
    }

    #[test]
    fn rejects_negative_lambda() {
        let pop = heterogeneous_population();
        let params = ParameterSet::default();
        let err = evaluate_threshold(&pop, &params, 0.0, -0.1).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
