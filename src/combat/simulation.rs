//! Monte Carlo kill simulation against a finite pool of multi-wound models
//!
//! Each trial walks the attacks in order: one save roll per attack, then one
//! feel-no-pain roll per damage point. Damage lands on the current model
//! only. Once a model drops, the rest of that attack's damage is lost.
//!
//! Trials are split into fixed-size shards. Each shard owns its RNG, its
//! wound buffer and its frequency table, so shards run on the rayon pool
//! with nothing shared but the read-only trial parameters.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::profile::CombatProfile;
use crate::combat::statistics::{
    proportion_standard_error, standard_error, ConfidenceInterval, SampleMoments,
};
use crate::combat::target::TargetPool;
use crate::core::config::EngineConfig;
use crate::core::error::{OddsError, Result};
use crate::distribution::binomial::{binomial_mean, binomial_std_dev};
use crate::distribution::outcome::TrialOutcomeDistribution;

/// Aggregate statistics of one kill simulation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub expected_kills: f64,
    pub kill_std_dev: f64,
    pub kill_ci: ConfidenceInterval,

    /// Closed form over the save roll alone
    pub expected_unsaved_attacks: f64,
    pub unsaved_std_dev: f64,
    pub unsaved_ci: ConfidenceInterval,

    /// Percent of trials that wiped the pool
    pub kill_all_probability: f64,
    /// Standard error of `kill_all_probability`, in percent
    pub kill_all_std_error: f64,
    /// In percent
    pub kill_all_ci: ConfidenceInterval,

    /// Kill counts 0..=model_count, in percent
    pub distribution: TrialOutcomeDistribution,
    /// Most kills the attack budget can ever reach
    pub max_achievable_kills: u32,
    /// Trials actually run
    pub iterations: u32,
}

impl SimulationSummary {
    /// Result for a simulation with no attacks
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Upper bound on kills given the attack budget
///
/// A model needs `ceil(wounds / damage)` unsaved attacks, and overkill never
/// carries over, so no run can beat `attacks / needed`.
pub fn max_achievable_kills(attacks: u32, damage: u32, wounds_per_model: u32, model_count: u32) -> u32 {
    if wounds_per_model == 0 {
        return model_count;
    }
    if damage == 0 {
        return 0;
    }
    let attacks_per_model = wounds_per_model.div_ceil(damage);
    model_count.min(attacks / attacks_per_model)
}

/// Read-only inputs shared by every trial
#[derive(Debug, Clone, Copy)]
struct TrialParams {
    attacks: u32,
    damage: u32,
    wounds_per_model: u32,
    model_count: usize,
    save_chance: f64,
    fnp_chance: f64,
}

/// One shard's kill-count frequencies
#[derive(Debug, Clone)]
struct ShardTally {
    frequencies: Vec<u64>,
    completed: u32,
}

impl ShardTally {
    fn new(model_count: usize) -> Self {
        Self {
            frequencies: vec![0; model_count + 1],
            completed: 0,
        }
    }

    fn merge(mut self, other: ShardTally) -> Self {
        for (mine, theirs) in self.frequencies.iter_mut().zip(other.frequencies) {
            *mine += theirs;
        }
        self.completed += other.completed;
        self
    }
}

/// Run one trial, returning the number of models slain
///
/// `remaining` is the caller's per-model wound buffer; it is reset here.
fn run_trial<R: Rng>(rng: &mut R, params: &TrialParams, remaining: &mut [u32]) -> u32 {
    remaining.fill(params.wounds_per_model);
    let mut current = 0;
    let mut dealt = 0;

    for _ in 0..params.attacks {
        if current >= remaining.len() {
            break;
        }

        if params.save_chance > 0.0 && rng.gen::<f64>() < params.save_chance {
            continue;
        }

        for _ in 0..params.damage {
            if params.fnp_chance > 0.0 && rng.gen::<f64>() < params.fnp_chance {
                continue;
            }

            dealt += 1;
            if dealt >= remaining[current] {
                remaining[current] = 0;
                current += 1;
                dealt = 0;
                // Overkill is discarded
                break;
            }
        }
    }

    remaining.iter().filter(|&&wounds| wounds == 0).count() as u32
}

/// Monte Carlo simulator for kill counts
#[derive(Debug, Clone)]
pub struct KillSimulator {
    iterations: u32,
    seed: Option<u64>,
    shard_size: u32,
    parallel_threshold: u32,
    confidence_z: f64,
}

impl KillSimulator {
    /// Simulator with default settings and the given trial count
    pub fn new(iterations: u32) -> Self {
        Self::from_config(&EngineConfig::default().with_iterations(iterations))
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            iterations: config.iterations,
            seed: config.seed,
            shard_size: config.shard_size.max(1),
            parallel_threshold: config.parallel_threshold,
            confidence_z: config.confidence_z,
        }
    }

    /// Fix the seed for reproducible results
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Run every trial
    pub fn simulate(&self, profile: &CombatProfile, pool: &TargetPool) -> SimulationSummary {
        match self.prepare(profile, pool) {
            Some(params) => {
                let tally = self.sample(&params, None);
                self.summarize(&params, tally)
            }
            None => SimulationSummary::empty(),
        }
    }

    /// Run trials until done or until `cancel` is raised
    ///
    /// The flag is checked before every trial.
    pub fn simulate_cancellable(
        &self,
        profile: &CombatProfile,
        pool: &TargetPool,
        cancel: &AtomicBool,
    ) -> Result<SimulationSummary> {
        let Some(params) = self.prepare(profile, pool) else {
            return Ok(SimulationSummary::empty());
        };

        let tally = self.sample(&params, Some(cancel));
        if tally.completed < self.iterations {
            tracing::debug!(
                "Kill simulation cancelled after {} of {} trials",
                tally.completed,
                self.iterations
            );
            return Err(OddsError::Cancelled {
                completed: tally.completed,
                requested: self.iterations,
            });
        }

        Ok(self.summarize(&params, tally))
    }

    /// Trial parameters, or `None` when there is nothing to simulate
    fn prepare(&self, profile: &CombatProfile, pool: &TargetPool) -> Option<TrialParams> {
        if profile.has_no_attacks() || self.iterations == 0 {
            return None;
        }

        Some(TrialParams {
            attacks: profile.attack_count as u32,
            damage: profile.damage_per_attack.max(0) as u32,
            wounds_per_model: pool.wounds_per_model,
            model_count: pool.model_count as usize,
            save_chance: pool.save_chance(),
            fnp_chance: pool.feel_no_pain_chance(),
        })
    }

    fn sample(&self, params: &TrialParams, cancel: Option<&AtomicBool>) -> ShardTally {
        let base_seed = self.seed.unwrap_or_else(rand::random);
        let shard_count = self.iterations.div_ceil(self.shard_size);
        let parallel = self.iterations >= self.parallel_threshold;

        tracing::debug!(
            "Simulating {} trials in {} shards (parallel: {}, seed: {})",
            self.iterations,
            shard_count,
            parallel,
            base_seed
        );

        let run_shard = |shard: u32| {
            let start = shard * self.shard_size;
            let trials = self.shard_size.min(self.iterations - start);
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(shard as u64));
            let mut remaining = vec![0u32; params.model_count];
            let mut tally = ShardTally::new(params.model_count);

            for _ in 0..trials {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    break;
                }
                let kills = run_trial(&mut rng, params, &mut remaining);
                tally.frequencies[kills as usize] += 1;
                tally.completed += 1;
            }

            tracing::trace!("Shard {} finished {} of {} trials", shard, tally.completed, trials);
            tally
        };

        let empty = || ShardTally::new(params.model_count);
        if parallel {
            (0..shard_count)
                .into_par_iter()
                .map(run_shard)
                .reduce(empty, ShardTally::merge)
        } else {
            (0..shard_count).map(run_shard).fold(empty(), ShardTally::merge)
        }
    }

    fn summarize(&self, params: &TrialParams, tally: ShardTally) -> SimulationSummary {
        let z = self.confidence_z;
        let trials = tally.completed as u64;
        let model_count = params.model_count as u32;
        let ceiling = max_achievable_kills(
            params.attacks,
            params.damage,
            params.wounds_per_model,
            model_count,
        );

        let distribution =
            TrialOutcomeDistribution::from_frequencies(&tally.frequencies, trials, Some(ceiling));

        let kills = SampleMoments::from_frequencies(&tally.frequencies);
        let expected_kills = kills.mean();
        let kill_std_dev = kills.std_dev();
        let kill_ci = ConfidenceInterval::normal(
            expected_kills,
            standard_error(kill_std_dev, trials),
            z,
            0.0,
            model_count as f64,
        );

        let attacks = params.attacks as f64;
        let unsaved_chance = 1.0 - params.save_chance;
        let expected_unsaved_attacks = binomial_mean(attacks, unsaved_chance);
        let unsaved_std_dev = binomial_std_dev(attacks, unsaved_chance);
        let unsaved_ci = ConfidenceInterval::normal(
            expected_unsaved_attacks,
            standard_error(unsaved_std_dev, trials),
            z,
            0.0,
            attacks,
        );

        let wiped = tally.frequencies.last().copied().unwrap_or(0);
        let p_kill_all = if trials == 0 { 0.0 } else { wiped as f64 / trials as f64 };
        let kill_all_se = proportion_standard_error(p_kill_all, trials);
        let kill_all_ci = ConfidenceInterval::normal(p_kill_all, kill_all_se, z, 0.0, 1.0);

        tracing::debug!(
            "Kill simulation done: {:.2} expected kills, {:.2}% wipe chance over {} trials",
            expected_kills,
            p_kill_all * 100.0,
            trials
        );

        SimulationSummary {
            expected_kills,
            kill_std_dev,
            kill_ci,
            expected_unsaved_attacks,
            unsaved_std_dev,
            unsaved_ci,
            kill_all_probability: p_kill_all * 100.0,
            kill_all_std_error: kill_all_se * 100.0,
            kill_all_ci: kill_all_ci.scaled(100.0),
            distribution,
            max_achievable_kills: ceiling,
            iterations: tally.completed,
        }
    }
}

impl Default for KillSimulator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Simulate kills with the settings in `config`
pub fn simulate_kills(
    profile: &CombatProfile,
    pool: &TargetPool,
    config: &EngineConfig,
) -> SimulationSummary {
    KillSimulator::from_config(config).simulate(profile, pool)
}
