//! Diamond CLI
//!
//! Simulate single games or run a saved season from the terminal.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use diamond_core::season::{
    standings_table, try_create_season, ScheduleConfig, SeasonOrchestrator,
};
use diamond_core::{EngineConfig, GameSimulator, SeasonStore, Team};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "diamond")]
#[command(about = "Baseball game and season simulator", long_about = None)]
struct Cli {
    /// Engine tuning overrides (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repeat for more log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game between two teams
    Game {
        /// JSON file holding an array of teams
        #[arg(long)]
        teams: PathBuf,

        /// Home team id (defaults to the first team in the file)
        #[arg(long)]
        home: Option<String>,

        /// Away team id (defaults to the second team in the file)
        #[arg(long)]
        away: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        /// Print the box score
        #[arg(long, default_value = "false")]
        box_score: bool,

        /// Print the play-by-play log
        #[arg(long, default_value = "false")]
        log: bool,
    },

    /// Manage the saved season
    Season {
        #[command(flatten)]
        store: StoreArgs,

        #[command(subcommand)]
        command: SeasonCommands,
    },
}

#[derive(Args)]
struct StoreArgs {
    /// Directory holding the season save
    #[arg(long, default_value = "saves", global = true)]
    save_dir: PathBuf,

    /// Save record name
    #[arg(long, default_value = diamond_core::save::DEFAULT_SAVE_NAME, global = true)]
    save_name: String,
}

#[derive(Subcommand)]
enum SeasonCommands {
    /// Start a new season, replacing any existing save
    New {
        /// JSON file holding an array of teams
        #[arg(long)]
        teams: PathBuf,

        #[arg(long, default_value_t = 2024)]
        year: u16,

        /// Minimum number of fixtures to schedule
        #[arg(long, default_value_t = 100)]
        target_games: usize,
    },

    /// Play the current day (or several)
    Advance {
        #[arg(long, default_value_t = 1)]
        days: u32,

        /// Play every remaining day
        #[arg(long, default_value = "false")]
        all: bool,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the standings table
    Standings,

    /// Delete the saved season
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Game { teams, home, away, seed, box_score, log } => {
            let request = GameArgs { teams, home, away, seed, box_score, log };
            print!("{}", run_game(&request, &config)?);
        }

        Commands::Season { store, command } => {
            let store = SeasonStore::with_name(&store.save_dir, &store.save_name)?;
            run_season(&store, command, &config)?;
        }
    }

    Ok(())
}

struct GameArgs {
    teams: PathBuf,
    home: Option<String>,
    away: Option<String>,
    seed: Option<u64>,
    box_score: bool,
    log: bool,
}

fn run_game(args: &GameArgs, config: &EngineConfig) -> Result<String> {
    let teams = read_teams(&args.teams)?;
    let home = pick_team(&teams, args.home.as_deref(), 0)?;
    let away = pick_team(&teams, args.away.as_deref(), 1)?;
    if home.id == away.id {
        bail!("home and away must be different teams (both are {})", home.id);
    }

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, home = %home.id, away = %away.id, "simulating game");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let result = GameSimulator::new(config).simulate(home, away, &mut rng);

    let mut out = render::line_score(&result, &away.name, &home.name);
    if args.box_score {
        out.push('\n');
        out.push_str(&render::box_score(&result, &away.name, &home.name));
    }
    if args.log {
        out.push('\n');
        for line in result.log() {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(&format!("seed: {seed}\n"));
    Ok(out)
}

fn run_season(store: &SeasonStore, command: SeasonCommands, config: &EngineConfig) -> Result<()> {
    match command {
        SeasonCommands::New { teams, year, target_games } => {
            let teams = read_teams(&teams)?;
            let schedule = ScheduleConfig { target_games, ..Default::default() };
            let season = try_create_season(year, teams, &schedule)?;
            store.save(&season)?;
            println!(
                "Created {} with {} fixtures over {} days",
                season.id,
                season.schedule.len(),
                season.last_day()
            );
        }

        SeasonCommands::Advance { days, all, seed } => {
            let mut season = load_season(store)?;
            let orchestrator = SeasonOrchestrator::new(config);
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            let mut seeds = ChaCha8Rng::seed_from_u64(seed);
            info!(seed, "advancing season");

            let mut played_days = 0;
            while (all || played_days < days) && !season.is_complete() {
                let report = orchestrator.advance_day_parallel(&season, seeds.gen());
                for outcome in &report.results {
                    let r = &outcome.result;
                    println!(
                        "Day {:>3}  {} {} @ {} {}",
                        report.day, r.away_team_id, r.score.away, r.home_team_id, r.score.home
                    );
                }
                for skipped in &report.skipped {
                    println!("Day {:>3}  {skipped} skipped (unknown team)", report.day);
                }
                season = report.season;
                played_days += 1;
            }

            store.save(&season)?;
            if season.is_complete() {
                println!("Season complete after day {}", season.last_day());
            } else {
                println!("Next up: day {}", season.current_day);
            }
        }

        SeasonCommands::Standings => {
            let season = load_season(store)?;
            println!("{} (day {})", season.id, season.current_day);
            print!("{}", render::standings(&standings_table(&season)));
        }

        SeasonCommands::Clear => {
            store.clear()?;
            println!("Cleared {}", store.path().display());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn read_teams(path: &Path) -> Result<Vec<Team>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let teams: Vec<Team> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of teams", path.display()))?;
    for team in &teams {
        if let Err(reason) = team.validate() {
            tracing::warn!(team = %team.id, %reason, "team failed validation, simulating anyway");
        }
    }
    Ok(teams)
}

fn pick_team<'a>(teams: &'a [Team], id: Option<&str>, fallback: usize) -> Result<&'a Team> {
    match id {
        Some(id) => {
            teams.iter().find(|t| t.id == id).with_context(|| format!("No team with id {id}"))
        }
        None => teams
            .get(fallback)
            .with_context(|| format!("Teams file needs at least {} teams", fallback + 1)),
    }
}

fn load_season(store: &SeasonStore) -> Result<diamond_core::Season> {
    match store.load()? {
        Some(season) => Ok(season),
        None => bail!(
            "No saved season at {} (run `diamond season new` first)",
            store.path().display()
        ),
    }
}
