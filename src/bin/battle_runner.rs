//! Headless Battle Runner
//!
//! Resolves a scenario file and prints the battle report. With `--trials`
//! the scenario is fought many times in parallel and the outcomes tallied.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use eldoria::battle::{BattleReport, BattleResult, BattleUnit};
use eldoria::core::error::Result;
use eldoria::creature::CreatureCatalog;
use eldoria::scenario::Scenario;

/// Headless Battle Runner - resolve auto-battles from scenario files
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Resolve an auto-battle scenario and print the outcome")]
struct Args {
    /// Scenario TOML file
    scenario: PathBuf,

    /// Creature catalog TOML file
    #[arg(long, default_value = "data/creatures.toml")]
    catalog: PathBuf,

    /// Random seed (overrides the scenario's seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of battles to fight; trial i uses seed + i
    #[arg(long, default_value_t = 1)]
    trials: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print the battle log (single trial only)
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Outcome tally over many trials
#[derive(Debug, Default, Serialize)]
struct TrialSummary {
    trials: u32,
    seed: u64,
    victories: u32,
    defeats: u32,
    flees: u32,
    round_cap_hits: u32,
    average_rounds: f64,
    average_experience: f64,
}

impl TrialSummary {
    fn from_reports(seed: u64, reports: &[BattleReport]) -> Self {
        let mut summary = Self {
            trials: reports.len() as u32,
            seed,
            ..Self::default()
        };
        if reports.is_empty() {
            return summary;
        }

        for report in reports {
            match report.result {
                BattleResult::Victory => summary.victories += 1,
                BattleResult::Defeat => summary.defeats += 1,
                BattleResult::Flee => summary.flees += 1,
            }
            if report.hit_round_cap {
                summary.round_cap_hits += 1;
            }
        }

        let n = reports.len() as f64;
        summary.average_rounds = reports.iter().map(|r| f64::from(r.rounds)).sum::<f64>() / n;
        summary.average_experience = reports.iter().map(|r| r.experience as f64).sum::<f64>() / n;
        summary
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eldoria=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Battle runner failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let catalog = CreatureCatalog::load_file(&args.catalog)?;
    let scenario = Scenario::load_file(&args.scenario)?;

    let seed = args
        .seed
        .or(scenario.seed)
        .unwrap_or_else(rand::random);

    if args.trials <= 1 {
        run_single(&args, &catalog, &scenario, seed)
    } else {
        run_trials(&args, &catalog, &scenario, seed)
    }
}

fn run_single(args: &Args, catalog: &CreatureCatalog, scenario: &Scenario, seed: u64) -> Result<()> {
    let mut engine = scenario.build_engine(catalog, seed)?;
    engine.execute_auto_battle();
    let report = engine.report();

    if args.verbose {
        for event in &engine.events().events {
            eprintln!("  [{}] {}", event.round, event.description);
        }
        eprintln!();
    }

    match args.format.as_str() {
        "text" => {
            let title = scenario.name.as_deref().unwrap_or("Battle");
            println!("{}", title);
            println!("{}", "=".repeat(title.len()));
            println!("Result: {:?}", report.result);
            println!("Rounds: {}", report.rounds);
            if report.hit_round_cap {
                println!("(round cap reached)");
            }
            println!("Attacker casualties: {}", report.attacker_casualties);
            println!("Defender casualties: {}", report.defender_casualties);
            println!("Experience: {}", report.experience);
            println!();
            print_survivors("Attacker survivors", &report.attacker_survivors, catalog);
            print_survivors("Defender survivors", &report.defender_survivors, catalog);
            println!("Seed: {}", seed);
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn run_trials(args: &Args, catalog: &CreatureCatalog, scenario: &Scenario, seed: u64) -> Result<()> {
    let reports = (0..args.trials)
        .into_par_iter()
        .map(|i| -> Result<BattleReport> {
            let mut engine = scenario.build_engine(catalog, seed.wrapping_add(u64::from(i)))?;
            engine.execute_auto_battle();
            Ok(engine.report())
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = TrialSummary::from_reports(seed, &reports);

    match args.format.as_str() {
        "text" => {
            println!("Trials: {} (seeds {}..)", summary.trials, summary.seed);
            println!("Victories: {}", summary.victories);
            println!("Defeats: {}", summary.defeats);
            println!("Flees: {}", summary.flees);
            println!("Round cap hits: {}", summary.round_cap_hits);
            println!("Average rounds: {:.2}", summary.average_rounds);
            println!("Average experience: {:.1}", summary.average_experience);
        }
        _ => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn print_survivors(label: &str, units: &[BattleUnit], catalog: &CreatureCatalog) {
    println!("{}:", label);
    if units.is_empty() {
        println!("  (none)");
    }
    for unit in units {
        let name = catalog
            .get(unit.creature_id)
            .map_or_else(|| unit.creature_id.to_string(), |c| c.name.clone());
        println!("  {} x{} (lead at {} hp)", name, unit.count, unit.current_health);
    }
}
