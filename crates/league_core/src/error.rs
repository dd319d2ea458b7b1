//! Error types for the store and roster setup

use thiserror::Error;

use crate::types::{GameId, TeamId};

/// Failure reported by a [`Store`](crate::Store) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("round number {0} already exists")]
    DuplicateRoundNumber(u32),

    #[error("a game needs two distinct teams, got {0} twice")]
    SameTeam(TeamId),

    #[error("winner {winner} did not play in {game}")]
    InvalidWinner { game: GameId, winner: TeamId },

    #[error("no transaction in progress")]
    NoTransaction,

    #[error("a transaction is already in progress")]
    TransactionActive,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        StoreError::NotFound { entity, id }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure while generating the league universe.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("team count {0} is not a power of two")]
    InvalidBracketSize(usize),

    #[error("height range {min}..={max} is empty")]
    InvalidHeightRange { min: u32, max: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}
