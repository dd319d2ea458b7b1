//! Bracket error types

use league_core::{PlayerId, RosterError, StoreError, TeamId};
use thiserror::Error;

/// Anything that aborts a round.
#[derive(Error, Debug)]
pub enum BracketError {
    #[error("team count {0} is not a power of two")]
    InvalidBracketSize(usize),

    #[error("cannot pair an odd number of teams ({teams}) for round {round_number}")]
    InvalidBracket { round_number: u32, teams: usize },

    #[error("{team} appears more than once in round {round_number}")]
    DuplicateTeam { round_number: u32, team: TeamId },

    #[error("{team} has {size} players, at least {required} are needed to field a lineup")]
    InsufficientRoster {
        team: TeamId,
        size: usize,
        required: usize,
    },

    #[error("{player} was selected in more than one game of round {round_number}")]
    PlayerConflict { round_number: u32, player: PlayerId },

    #[error("game {team1} vs {team2} in round {round_number} has no winner yet")]
    UnresolvedGame {
        round_number: u32,
        team1: TeamId,
        team2: TeamId,
    },

    #[error("store already holds {0} round(s), a new bracket must start empty")]
    AlreadyStarted(usize),

    #[error("no round is scheduled")]
    NothingScheduled,

    #[error("the bracket already has a champion")]
    Complete,

    #[error("invalid simulation settings: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl From<RosterError> for BracketError {
    fn from(e: RosterError) -> Self {
        match e {
            RosterError::InvalidBracketSize(n) => BracketError::InvalidBracketSize(n),
            RosterError::InvalidHeightRange { min, max } => {
                BracketError::InvalidConfig(format!("height range {min}..={max} is empty"))
            }
            RosterError::Store(e) => BracketError::Persistence(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, BracketError>;
