//! Tournament CLI
//!
//! Generate a league, play the bracket and inspect stored results.

use anyhow::{bail, Context};
use league_core::{print_leaderboard, MemoryStore, PlayerId, RosterGenerator, TeamId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::env;
use std::path::{Path, PathBuf};
use tournament::{
    audit, league_leaderboard, player_details, shuffle_seeds, AuditLimits, Bracket, BracketView,
    ScoreSimulator, TeamDetails, TiePolicy, TournamentConfig,
};
use tracing_subscriber::EnvFilter;

const LEADERBOARD_SIZE: usize = 10;

fn print_usage() {
    println!("ML-league Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament simulate [--config FILE] [--teams N] [--players N] [--seed S]");
    println!("                      [--shuffle] [--lower-id-ties] [--out FILE]");
    println!("  tournament report <FILE>");
    println!("  tournament verify <FILE> [--config FILE]");
    println!("  tournament team <FILE> <TEAM_ID>");
    println!("  tournament player <FILE> <PLAYER_ID>");
    println!();
    println!("Examples:");
    println!("  tournament simulate --teams 16 --players 10 --seed 7 --out league.json");
    println!("  tournament team league.json 3");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tournament=info,league_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> anyhow::Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn run_simulate(args: &[String]) -> anyhow::Result<()> {
    // The config file is the base layer, flags override it
    let mut config = match args.iter().position(|a| a == "--config" || a == "-c") {
        Some(i) => {
            let path = flag_value(args, i, "--config")?;
            TournamentConfig::load(Path::new(path))
                .with_context(|| format!("loading {path}"))?
        }
        None => TournamentConfig::default(),
    };
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => i += 1,
            "--teams" | "-t" => {
                config.team_count = flag_value(args, i, "--teams")?
                    .parse()
                    .context("--teams expects a number")?;
                i += 1;
            }
            "--players" | "-p" => {
                config.players_per_team = flag_value(args, i, "--players")?
                    .parse()
                    .context("--players expects a number")?;
                i += 1;
            }
            "--seed" | "-s" => {
                config.seed = Some(
                    flag_value(args, i, "--seed")?
                        .parse()
                        .context("--seed expects a number")?,
                );
                i += 1;
            }
            "--shuffle" => config.shuffle_seeds = true,
            "--lower-id-ties" => config.tie_policy = TiePolicy::LowerTeamId,
            "--out" | "-o" => {
                out = Some(PathBuf::from(flag_value(args, i, "--out")?));
                i += 1;
            }
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }
    config.validate()?;

    println!(
        "=== League: {} teams x {} players ===",
        config.team_count, config.players_per_team
    );
    match config.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: entropy"),
    }
    println!();

    let store = match config.seed {
        Some(seed) => play(&config, ChaCha8Rng::seed_from_u64(seed))?,
        None => play(&config, StdRng::from_entropy())?,
    };

    BracketView::load(&store)?.print_report();
    print_leaderboard(&league_leaderboard(&store)?, LEADERBOARD_SIZE);

    let report = audit(&store, &config.audit_limits())?;
    println!(
        "Audit passed: {} rounds, {} games, {} player rows",
        report.rounds, report.games, report.game_players
    );

    if let Some(path) = out {
        store
            .save(&path)
            .with_context(|| format!("saving league to {}", path.display()))?;
        println!("League saved to {}", path.display());
    }
    Ok(())
}

/// Set up a fresh league and play it to the end.
fn play<R: Rng + SeedableRng>(config: &TournamentConfig, mut rng: R) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::new();
    let teams = RosterGenerator::new(config.to_roster_config()).generate(&mut store, &mut rng)?;

    let mut seeds: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    if config.shuffle_seeds {
        shuffle_seeds(&mut seeds, &mut rng);
    }

    let simulator = ScoreSimulator::new(config.to_simulation_config(), R::from_rng(&mut rng)?)?;
    let mut bracket = Bracket::new(store, seeds, simulator, config.tie_policy)?;
    let outcome = bracket.run()?;

    let replays: u32 = outcome.rounds.iter().map(|r| r.replays).sum();
    if replays > 0 {
        println!("Tied games replayed: {}", replays);
    }
    Ok(bracket.into_store())
}

/// Arguments that are not flags, with `--config FILE` pairs skipped.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => i += 1,
            flag if flag.starts_with('-') => {}
            arg => out.push(arg),
        }
        i += 1;
    }
    out
}

fn load_store(args: &[&str], command: &str) -> anyhow::Result<MemoryStore> {
    let Some(path) = args.first() else {
        bail!("{command} requires a league file");
    };
    MemoryStore::load(Path::new(path)).with_context(|| format!("loading league from {path}"))
}

fn run_report(args: &[String]) -> anyhow::Result<()> {
    let store = load_store(&positionals(args), "report")?;
    BracketView::load(&store)?.print_report();
    print_leaderboard(&league_leaderboard(&store)?, LEADERBOARD_SIZE);
    Ok(())
}

fn run_verify(args: &[String]) -> anyhow::Result<()> {
    let store = load_store(&positionals(args), "verify")?;
    let limits = match args.iter().position(|a| a == "--config" || a == "-c") {
        Some(i) => TournamentConfig::load(Path::new(flag_value(args, i, "--config")?))?
            .audit_limits(),
        None => AuditLimits::default(),
    };

    let report = audit(&store, &limits)?;
    println!(
        "OK: {} teams, {} players, {} rounds, {} games, {} player rows",
        report.teams, report.players, report.rounds, report.games, report.game_players
    );
    Ok(())
}

fn run_team(args: &[String]) -> anyhow::Result<()> {
    let args = positionals(args);
    let store = load_store(&args, "team")?;
    let id: u32 = args
        .get(1)
        .context("team requires a team id")?
        .parse()
        .context("team id must be a number")?;
    let details = TeamDetails::load(&store, TeamId(id))?;
    println!("{}", details.generate_report());
    Ok(())
}

fn run_player(args: &[String]) -> anyhow::Result<()> {
    let args = positionals(args);
    let store = load_store(&args, "player")?;
    let id: u32 = args
        .get(1)
        .context("player requires a player id")?
        .parse()
        .context("player id must be a number")?;
    let stats = player_details(&store, PlayerId(id))?;

    println!("=== {} ===", stats.name);
    println!("Team:        {}", stats.team.0);
    println!("Height:      {} cm", stats.height);
    println!("Games:       {}", stats.games_played);
    println!("Points:      {}", stats.total_score);
    println!("Average:     {:.2}", stats.average_score);
    Ok(())
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "simulate" | "sim" => run_simulate(&args[2..]),
        "report" => run_report(&args[2..]),
        "verify" | "audit" => run_verify(&args[2..]),
        "team" => run_team(&args[2..]),
        "player" => run_player(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
