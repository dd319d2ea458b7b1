//! Bracket simulation for ML-league
//!
//! This crate provides infrastructure for:
//! - Pairing surviving teams into single-elimination rounds
//! - Simulating games from random lineups and per-player scores
//! - Resolving winners with an explicit tie policy
//! - Persisting each round atomically and reporting on the result
//!
//! # Usage
//!
//! ```bash
//! # Play a 16-team bracket with a fixed seed and keep the league
//! cargo run -p tournament -- simulate --teams 16 --players 10 --seed 7 --out league.json
//!
//! # Check the stored league afterwards
//! cargo run -p tournament -- verify league.json
//! ```

pub mod audit;
pub mod bracket;
pub mod config;
mod error;
pub mod resolver;
mod results;
pub mod runner;
pub mod simulator;

pub use audit::{audit, AuditError, AuditLimits, AuditReport};
pub use bracket::{pair_round, shuffle_seeds, GameSheet, Participation, ScheduledRound, Side};
pub use config::{ConfigError, TournamentConfig};
pub use error::*;
pub use resolver::{resolve, Resolution, TiePolicy};
pub use results::*;
pub use runner::{Bracket, BracketOutcome, BracketState, RoundBatch, RoundSummary};
pub use simulator::{ScoreSimulator, SimulationConfig};
