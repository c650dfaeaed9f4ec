//! Heroes Battle - command line entry point
//!
//! Plans armies from a unit catalog and inspects the targeting and
//! pathfinding decisions the combat AI would be offered.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use heroes_battle::battle::{path_cost, Army, ArmyPlanner, Battlefield, GridCoord, UnitCatalog};
use heroes_battle::core::error::Result;
use heroes_battle::core::types::Side;
use heroes_battle::core::BattleConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "heroes-battle")]
#[command(about = "Plan armies and inspect battle decisions")]
struct Args {
    /// Optional battle config (TOML); defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one army and print it
    Plan {
        /// Unit catalog (TOML)
        #[arg(long, default_value = "data/units.toml")]
        catalog: PathBuf,

        /// Point budget
        #[arg(long, default_value_t = 1500)]
        budget: u32,

        /// Random seed for deterministic placement
        #[arg(long)]
        seed: Option<u64>,

        /// Use the fixed preset composition instead of the budget planner
        #[arg(long)]
        preset: bool,

        /// Deploy on this side (left or right)
        #[arg(long, default_value = "left")]
        side: Side,

        /// Output format: json or text
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Plan both armies and print the exposed targets for each side
    Targets {
        /// Unit catalog (TOML)
        #[arg(long, default_value = "data/units.toml")]
        catalog: PathBuf,

        /// Point budget for each side
        #[arg(long, default_value_t = 1500)]
        budget: u32,

        /// Random seed for deterministic placement
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// JSON output for the targets command
#[derive(Serialize)]
struct TargetReport {
    seed: u64,
    left_targets: Vec<String>,
    right_targets: Vec<String>,
    sample_attacker: Option<String>,
    sample_target: Option<String>,
    sample_path: Vec<GridCoord>,
    sample_steps: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    config.validate()?;
    let planner = ArmyPlanner::new(&config);

    match args.command {
        Command::Plan {
            catalog,
            budget,
            seed,
            preset,
            side,
            format,
        } => {
            let catalog = UnitCatalog::load_from_toml(&catalog)?;
            let seed = seed.or(config.seed).unwrap_or_else(rand::random);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            tracing::info!("Planning {} army with seed {}", side, seed);

            let mut army = if preset {
                planner.generate_preset(catalog.templates(), budget, &mut rng)?
            } else {
                planner.generate(catalog.templates(), budget, &mut rng)?
            };
            if side == Side::Right {
                army.mirror_horizontally();
            }

            match format.as_str() {
                "text" => print_army(&army),
                "json" => println!("{}", serde_json::to_string_pretty(&army)?),
                other => {
                    eprintln!("Unknown format '{}', defaulting to json", other);
                    println!("{}", serde_json::to_string_pretty(&army)?);
                }
            }
        }

        Command::Targets {
            catalog,
            budget,
            seed,
        } => {
            let catalog = UnitCatalog::load_from_toml(&catalog)?;
            let seed = seed.or(config.seed).unwrap_or_else(rand::random);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let left = planner.generate(catalog.templates(), budget, &mut rng)?;
            let mut right = planner.generate(catalog.templates(), budget, &mut rng)?;
            right.mirror_horizontally();
            let field = Battlefield::new(left, right);

            let describe = |side: Side| -> Vec<String> {
                field
                    .suitable_targets(side)
                    .iter()
                    .map(|u| format!("{} {}", u.name, u.position))
                    .collect()
            };

            // Strongest left unit against the first exposed right unit
            let attacker = field.left.alive_units().max_by_key(|u| u.base_attack);
            let target = field.suitable_targets(Side::Right).first().copied();
            let sample_path = match (attacker, target) {
                (Some(a), Some(t)) => field.path_between(a.id, t.id),
                _ => Vec::new(),
            };

            let report = TargetReport {
                seed,
                left_targets: describe(Side::Left),
                right_targets: describe(Side::Right),
                sample_attacker: attacker.map(|u| u.name.clone()),
                sample_target: target.map(|u| u.name.clone()),
                sample_steps: path_cost(&sample_path),
                sample_path,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_army(army: &Army) {
    println!("Army ({} points, {} units)", army.points, army.units.len());
    println!("=========================");
    for unit in &army.units {
        println!(
            "{:<14} {:>4} hp {:>3} atk  at {}",
            unit.name, unit.health, unit.base_attack, unit.position
        );
    }
}
