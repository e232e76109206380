use colored::Colorize;
use serde::Serialize;
use std::time::{Duration, Instant};

use super::scenarios::{
    DeathTally, ScenarioKind, run_invariants, run_smoke, run_stale_resolution,
};
use super::simulation::{Pacing, iteration_seed, play_to_death};

/// Upper-tail chi-square critical value for 5 degrees of freedom at p = 0.001.
pub const CHI_SQUARE_CRITICAL: f64 = 20.515;

/// Sessions below this count make the chi-square approximation unreliable.
pub const MIN_DISTRIBUTION_SAMPLES: usize = 60;

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub death_rounds: Vec<usize>,
    pub chi_square: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(serialize_with = "serialize_micros")]
    pub average_duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSummary>,
}

fn serialize_micros<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u128(duration.as_micros())
}

#[derive(Debug, Clone, Copy)]
pub struct LogicTester {
    verbose: bool,
    pacing: Pacing,
}

impl LogicTester {
    pub const fn new(verbose: bool, pacing: Pacing) -> Self {
        Self { verbose, pacing }
    }

    pub async fn run_scenario(
        &self,
        kind: ScenarioKind,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {seed})",
                    kind.key().bright_white()
                );
            }
            let result = match kind {
                ScenarioKind::Distribution => self.run_distribution(seed, iterations).await,
                _ => self.run_iterations(kind, seed, iterations).await,
            };
            log::debug!(
                "{} seed {seed}: {}/{} iterations passed",
                kind.key(),
                result.successful_iterations,
                result.iterations_run
            );
            results.push(result);
        }
        results
    }

    async fn run_iterations(
        &self,
        kind: ScenarioKind,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut durations = Vec::with_capacity(iterations);

        for i in 0..iterations {
            let start = Instant::now();
            let session_seed = iteration_seed(seed, i);
            let outcome = match kind {
                ScenarioKind::Smoke => run_smoke(session_seed, self.pacing).await.map(|_| ()),
                ScenarioKind::Invariants => run_invariants(session_seed, self.pacing).await,
                ScenarioKind::StaleResolution => {
                    run_stale_resolution(session_seed, self.pacing).await
                }
                ScenarioKind::Distribution => Ok(()),
            };
            durations.push(start.elapsed());

            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            err.as_str().red()
                        );
                    }
                    failures.push(format!(
                        "Iteration {} (session seed {session_seed:#x}): {err}",
                        i + 1
                    ));
                }
            }
        }

        ScenarioResult {
            scenario_name: kind.key().to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration: average(&durations),
            distribution: None,
        }
    }

    async fn run_distribution(&self, seed: u64, iterations: usize) -> ScenarioResult {
        let samples = iterations.max(MIN_DISTRIBUTION_SAMPLES);
        if samples > iterations && self.verbose {
            println!("🔁 Distribution sweep needs {samples} sessions; raising iterations from {iterations}");
        }

        let mut tally = DeathTally::default();
        let mut failures = Vec::new();
        let mut durations = Vec::with_capacity(samples);
        for i in 0..samples {
            let start = Instant::now();
            let session_seed = iteration_seed(seed, i);
            let recorded = match play_to_death(session_seed, self.pacing).await {
                Ok(summary) => tally.record(&summary),
                Err(err) => Err(err),
            };
            durations.push(start.elapsed());
            if let Err(err) = recorded {
                failures.push(format!("Session {} (seed {session_seed:#x}): {err}", i + 1));
            }
        }

        let chi_square = tally.chi_square();
        if chi_square > CHI_SQUARE_CRITICAL {
            failures.push(format!(
                "death rounds {:?} are not uniform: chi-square {chi_square:.3} > {CHI_SQUARE_CRITICAL}",
                tally.counts()
            ));
        }

        ScenarioResult {
            scenario_name: ScenarioKind::Distribution.key().to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: samples,
            successful_iterations: tally.total(),
            failures,
            average_duration: average(&durations),
            distribution: Some(DistributionSummary {
                death_rounds: tally.counts().to_vec(),
                chi_square,
                critical: CHI_SQUARE_CRITICAL,
            }),
        }
    }
}

fn average(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        Duration::ZERO
    } else {
        durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;
    use twox_hash::XxHash64;

    fn run(kind: ScenarioKind, seeds: &[u64], iterations: usize) -> Vec<ScenarioResult> {
        let tester = LogicTester::new(false, Pacing::Instant);
        tokio_test::block_on(tester.run_scenario(kind, seeds, iterations))
    }

    fn fingerprint(results: &[ScenarioResult]) -> u64 {
        let mut stable = results.to_vec();
        for result in &mut stable {
            result.average_duration = Duration::ZERO;
        }
        let json = serde_json::to_string(&stable).unwrap();
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(json.as_bytes());
        hasher.finish()
    }

    #[test]
    fn scripted_scenarios_pass() {
        for kind in [
            ScenarioKind::Smoke,
            ScenarioKind::Invariants,
            ScenarioKind::StaleResolution,
        ] {
            let results = run(kind, &[1337, 7], 25);
            assert_eq!(results.len(), 2);
            for result in results {
                assert!(result.passed, "{kind:?} failed: {:?}", result.failures);
                assert_eq!(result.successful_iterations, 25);
            }
        }
    }

    #[test]
    fn distribution_raises_small_sample_counts() {
        let results = run(ScenarioKind::Distribution, &[1337], 5);
        let result = &results[0];
        assert_eq!(result.iterations_run, MIN_DISTRIBUTION_SAMPLES);
        let summary = result.distribution.as_ref().unwrap();
        assert_eq!(summary.death_rounds.iter().sum::<usize>(), MIN_DISTRIBUTION_SAMPLES);
        assert_eq!(summary.death_rounds.len(), 6);
    }

    #[test]
    fn reports_are_reproducible_for_a_seed() {
        let a = run(ScenarioKind::Distribution, &[42], 120);
        let b = run(ScenarioKind::Distribution, &[42], 120);
        assert_eq!(fingerprint(&a), fingerprint(&b));
        let c = run(ScenarioKind::Distribution, &[43], 120);
        assert_ne!(fingerprint(&a), fingerprint(&c));
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average(&[]), Duration::ZERO);
        assert_eq!(
            average(&[Duration::from_millis(2), Duration::from_millis(4)]),
            Duration::from_millis(3)
        );
    }
}
