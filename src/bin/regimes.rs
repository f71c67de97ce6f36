//! Parameter Regime Exploration
//!
//! Sweeps borrower and lender parameters at lambda = 0 (no regulation),
//! finds the unregulated profit-maximizing threshold for each regime, and
//! ranks regimes by the good-but-denied mass at that optimum. Shows where
//! manipulation hurts good borrowers the most before a regulator steps in.
//!
//! ## Usage
//! ```bash
//! cargo run --bin regimes --release
//! ```

use lending_simulation::{
    run_scenario, BorrowerPopulation, ParameterSet, RegulationScenario, ThresholdGrid,
    TwoGroupMixture,
};

const POPULATION_SIZE: usize = 10_000;
// Fixed seed so regimes stay comparable.
const SEED: u64 = 0;
const TOP_K: usize = 15;

struct Regime {
    p_low: f64,
    benefit: f64,
    denial_harm: f64,
    k_high: f64,
    pi_bad: f64,
    scenario: RegulationScenario,
}

fn run() -> lending_simulation::Result<()> {
    let t_grid = ThresholdGrid::linspace(-1.5, 4.0, 281)?;

    let p_low_grid = [0.3, 0.5];
    let benefit_grid = [0.8, 1.0];
    let harm_grid = [0.1, 0.3, 0.5];
    let k_low = 0.1;
    let k_high_grid = [0.3, 0.7, 1.0];
    let pi_good = 0.2;
    let pi_bad_grid = [-0.2, -0.4, -0.6];

    let mut results = Vec::new();
    for &p_low in &p_low_grid {
        for &k_high in &k_high_grid {
            let mixture = TwoGroupMixture {
                p_low,
                k_low,
                k_high,
                ..TwoGroupMixture::default()
            };
            let population =
                BorrowerPopulation::sample_two_group(POPULATION_SIZE, &mixture, SEED)?;

            for &benefit in &benefit_grid {
                for &denial_harm in &harm_grid {
                    for &pi_bad in &pi_bad_grid {
                        let params =
                            ParameterSet::new(0.0, pi_good, pi_bad, benefit, denial_harm)?;
                        let scenario = run_scenario(&params, &population, &t_grid, 0.0)?;
                        results.push(Regime {
                            p_low,
                            benefit,
                            denial_harm,
                            k_high,
                            pi_bad,
                            scenario,
                        });
                    }
                }
            }
        }
    }

    results.sort_by(|a, b| b.scenario.penalty.partial_cmp(&a.scenario.penalty).unwrap());

    println!("=======================================================");
    println!("  Unregulated regimes ranked by good-denial mass");
    println!("  N = {POPULATION_SIZE}, seed = {SEED}, lambda = 0");
    println!("=======================================================\n");

    println!("idx    P      Pi      t*    p_L   b    h    k_H  pi_B  acc_G  acc_B");
    println!("{}", "-".repeat(68));
    for (i, r) in results.iter().take(TOP_K).enumerate() {
        println!(
            "{:3}  {:5.3}  {:6.3}  {:5.2}  {:4.2}  {:4.2}  {:4.2}  {:4.2}  {:5.2}  {:5.3}  {:5.3}",
            i,
            r.scenario.penalty,
            r.scenario.profit,
            r.scenario.t_star,
            r.p_low,
            r.benefit,
            r.denial_harm,
            r.k_high,
            r.pi_bad,
            r.scenario.stats.accept_rate_good,
            r.scenario.stats.accept_rate_bad,
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
