//! Combat Odds - command line front end
//!
//! Runs the analytic hit → wound chain, the kill simulation, or prints the
//! quick-reference dice tables. Output is pretty JSON or plain text.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use combat_odds::combat::{
    estimate_expected_kills, resolve_combat_chain, ChainResult, KillEstimate, KillSimulator,
    SimulationSummary,
};
use combat_odds::core::{EngineConfig, Result, RerollPolicy};
use combat_odds::dice::{d6_table, two_d6_table, D6Row, TwoD6Row};
use combat_odds::distribution::TrialOutcomeDistribution;
use combat_odds::input::{ChainRequest, KillRequest, NumericInput};

/// Dice odds for tabletop wargame combat
#[derive(Parser, Debug)]
#[command(name = "combat-odds")]
#[command(about = "Hit/wound odds and Monte Carlo kill probabilities")]
struct Args {
    /// Engine settings (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expected hits and wounds with the wound distribution
    Chain {
        /// Full request as JSON; overrides the individual flags
        #[arg(long)]
        request: Option<String>,

        #[arg(long, default_value_t = 0)]
        attacks: i64,

        #[arg(long, default_value_t = 3)]
        to_hit: i64,

        /// no-reroll, reroll-one, reroll-fail or reroll-non-critical
        #[arg(long)]
        hit_reroll: Option<String>,

        /// Natural roll that counts as a critical hit
        #[arg(long)]
        critical_hit: Option<i64>,

        #[arg(long, default_value_t = 4)]
        to_wound: i64,

        #[arg(long)]
        wound_reroll: Option<String>,

        /// Every attack hits automatically
        #[arg(long)]
        torrent: bool,

        #[arg(long)]
        lethal_hits: bool,

        /// Extra hits per critical hit
        #[arg(long)]
        sustained_hits: Option<i64>,

        #[arg(long)]
        devastating_wounds: bool,

        /// Critical wound threshold granted by an anti rule
        #[arg(long)]
        anti: Option<i64>,
    },

    /// Simulated kills against a pool of multi-wound models
    Kills {
        /// Full request as JSON; overrides the individual flags
        #[arg(long)]
        request: Option<String>,

        /// Attacks that reached the save step
        #[arg(long, default_value_t = 0)]
        attacks: i64,

        #[arg(long, default_value_t = 1)]
        damage: i64,

        #[arg(long, default_value_t = 1)]
        models: i64,

        #[arg(long, default_value_t = 1)]
        wounds: i64,

        #[arg(long)]
        save: Option<i64>,

        #[arg(long)]
        save_reroll: Option<String>,

        #[arg(long)]
        feel_no_pain: Option<i64>,

        /// Trials to run (overrides the config)
        #[arg(long)]
        iterations: Option<u32>,

        /// Random seed for deterministic runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Quick-reference D6 and 2D6 tables
    Table,
}

#[derive(Serialize)]
struct KillsOutput {
    seed: u64,
    estimate: KillEstimate,
    summary: SimulationSummary,
}

#[derive(Serialize)]
struct TablesOutput {
    d6: Vec<D6Row>,
    two_d6: Vec<TwoD6Row>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("combat_odds=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let json = args.format == "json";

    match args.command {
        Command::Chain {
            request,
            attacks,
            to_hit,
            hit_reroll,
            critical_hit,
            to_wound,
            wound_reroll,
            torrent,
            lethal_hits,
            sustained_hits,
            devastating_wounds,
            anti,
        } => {
            let request = match request {
                Some(raw) => ChainRequest::from_json(&raw)?,
                None => ChainRequest {
                    attacks: Some(attacks.into()),
                    torrent,
                    to_hit: Some(to_hit.into()),
                    hit_reroll,
                    critical_hit: critical_hit.map(NumericInput::from),
                    lethal_hits,
                    sustained_hits: sustained_hits.is_some(),
                    sustained_hits_value: sustained_hits.map(NumericInput::from),
                    to_wound: Some(to_wound.into()),
                    wound_reroll,
                    devastating_wounds,
                    anti_enabled: anti.is_some(),
                    anti_value: anti.map(NumericInput::from),
                },
            };
            let profile = request.to_profile(&config);
            tracing::info!(
                "Resolving chain: {} attacks, {} to hit ({}), {} to wound ({})",
                profile.attack_count,
                profile.to_hit,
                profile.hit_reroll,
                profile.to_wound,
                profile.wound_reroll
            );

            let result = resolve_combat_chain(&profile, &config);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_chain(&result);
            }
        }

        Command::Kills {
            request,
            attacks,
            damage,
            models,
            wounds,
            save,
            save_reroll,
            feel_no_pain,
            iterations,
            seed,
        } => {
            let request = match request {
                Some(raw) => KillRequest::from_json(&raw)?,
                None => KillRequest {
                    attacks: Some(attacks.into()),
                    damage: Some(damage.into()),
                    models: Some(models.into()),
                    wounds: Some(wounds.into()),
                    save: save.map(NumericInput::from),
                    save_reroll,
                    feel_no_pain: feel_no_pain.map(NumericInput::from),
                },
            };

            let mut config = config;
            if let Some(iterations) = iterations {
                config = config.with_iterations(iterations);
            }
            config.validate()?;

            let seed = seed.or(config.seed).unwrap_or_else(|| rand::random());
            let profile = request.to_profile();
            let pool = request.to_pool();
            tracing::info!(
                "Simulating {} attacks (damage {}) into {} models x {} wounds, seed {}",
                profile.attack_count,
                profile.damage_per_attack,
                pool.model_count,
                pool.wounds_per_model,
                seed
            );

            let summary = KillSimulator::from_config(&config)
                .with_seed(seed)
                .simulate(&profile, &pool);
            let output = KillsOutput {
                seed,
                estimate: estimate_expected_kills(&profile, &pool),
                summary,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_kills(&output);
            }
        }

        Command::Table => {
            let output = TablesOutput {
                d6: d6_table(),
                two_d6: two_d6_table(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_tables(&output);
            }
        }
    }

    Ok(())
}

fn print_distribution(label: &str, distribution: &TrialOutcomeDistribution) {
    println!("{:>8} {:>10} {:>10}", label, "P(=k) %", "P(<=k) %");
    for entry in distribution.iter() {
        println!(
            "{:>8} {:>10.2} {:>10.2}",
            entry.count, entry.probability, entry.cumulative_probability
        );
    }
}

fn print_chain(result: &ChainResult) {
    println!("Hit → Wound Chain");
    println!("=================");
    println!("Hits:     {:.2} ± {:.2}", result.expected_hits, result.hit_std_dev);
    println!(
        "Crit hits: {:.2} ± {:.2}",
        result.expected_critical_hits, result.critical_hit_std_dev
    );
    println!("Wounds:   {:.2} ± {:.2}", result.expected_wounds, result.wound_std_dev);
    if result.devastating_wounds {
        println!(
            "Devastating: {:.2} ± {:.2}",
            result.expected_devastating_wounds, result.devastating_wound_std_dev
        );
    }
    println!();
    println!(
        "Per die: hit {:.2}% (crit {:.2}%), wound {:.2}% (crit {:.2}%)",
        result.hit_chance,
        result.critical_hit_chance,
        result.wound_chance,
        result.critical_wound_chance
    );
    println!();
    print_distribution("wounds", &result.distribution);
}

fn print_kills(output: &KillsOutput) {
    let summary = &output.summary;
    println!("Kill Simulation");
    println!("===============");
    println!(
        "Expected kills: {:.2} ± {:.2} (CI {:.2} - {:.2})",
        summary.expected_kills, summary.kill_std_dev, summary.kill_ci.low, summary.kill_ci.high
    );
    println!(
        "Unsaved attacks: {:.2} ± {:.2} (CI {:.2} - {:.2})",
        summary.expected_unsaved_attacks,
        summary.unsaved_std_dev,
        summary.unsaved_ci.low,
        summary.unsaved_ci.high
    );
    println!(
        "Kill all: {:.2}% ± {:.2}% (CI {:.2}% - {:.2}%)",
        summary.kill_all_probability,
        summary.kill_all_std_error,
        summary.kill_all_ci.low,
        summary.kill_all_ci.high
    );
    println!("Max achievable kills: {}", summary.max_achievable_kills);
    println!(
        "Naive estimate: {:.2} kills from {:.2} damage",
        output.estimate.expected_kills, output.estimate.expected_damage
    );
    println!();
    print_distribution("kills", &summary.distribution);
    println!();
    println!("Iterations: {}  Seed: {}", summary.iterations, output.seed);
}

fn print_tables(output: &TablesOutput) {
    println!("Single D6");
    println!(
        "{:>6} {:>5} {:>8} {:>10} {:>11}  {}",
        "target", "ways", "chance", "reroll 1s", "reroll fail", "band"
    );
    for row in &output.d6 {
        println!(
            "{:>6} {:>5} {:>7.2}% {:>9.2}% {:>10.2}%  {}",
            row.target.to_string(),
            format!("{}/6", row.ways),
            row.chance,
            row.reroll_ones_chance,
            row.reroll_fail_chance,
            row.band.label()
        );
    }

    println!();
    println!("2D6");
    println!(
        "{:>6} {:>6} {:>8} {:>9}  {}",
        "target", "ways", "chance", "reroll", "band (reroll)"
    );
    for row in &output.two_d6 {
        println!(
            "{:>6} {:>6} {:>7.2}% {:>8.2}%  {} ({})",
            format!("{}+", row.target),
            format!("{}/36", row.ways),
            row.chance,
            row.reroll_chance,
            row.band.label(),
            row.reroll_band.label()
        );
    }

    println!();
    println!(
        "Reroll policies: {}",
        RerollPolicy::all()
            .iter()
            .map(|policy| policy.token())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
