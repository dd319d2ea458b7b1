//! Core league entities.
//!
//! Every entity is a plain record owned by a [`Store`](crate::Store) and refers
//! to the others only through typed identifiers. Identifiers are assigned by the
//! store when a record is created and are never reused.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Position of this record in a zero-based arena.
            #[inline]
            pub fn index(self) -> usize {
                (self.0 as usize).wrapping_sub(1)
            }

            /// Identifier of the record stored at a zero-based arena position.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                Self(index as u32 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a [`Team`]
    TeamId,
    "team"
);
id_type!(
    /// Identifier of a [`Coach`]
    CoachId,
    "coach"
);
id_type!(
    /// Identifier of a [`Player`]
    PlayerId,
    "player"
);
id_type!(
    /// Identifier of a [`Round`]
    RoundId,
    "round"
);
id_type!(
    /// Identifier of a [`Game`]
    GameId,
    "game"
);
id_type!(
    /// Identifier of a [`GamePlayer`] row
    GamePlayerId,
    "game-player"
);

/// A team taking part in the league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

/// The single coach attached to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub id: CoachId,
    pub team: TeamId,
    pub name: String,
}

/// A rostered player together with its career totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team: TeamId,
    pub name: String,
    /// Height in centimetres
    pub height: u32,
    pub games_played: u32,
    pub total_score: u32,
}

impl Player {
    /// Career scoring average, 0 for a player who has not played yet.
    pub fn average_score(&self) -> f64 {
        crate::stats::average_score(self)
    }

    /// Record one game in which this player scored `score` points.
    pub fn record_game(&mut self, score: u32) {
        self.games_played += 1;
        self.total_score += score;
    }
}

/// One level of the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub round_number: u32,
}

/// A played game between two distinct teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub round: RoundId,
    pub team1: TeamId,
    pub team2: TeamId,
    pub score_team1: u32,
    pub score_team2: u32,
    pub winner: Option<TeamId>,
}

impl Game {
    /// Score of `team` in this game, `None` if it did not take part.
    pub fn score_of(&self, team: TeamId) -> Option<u32> {
        if team == self.team1 {
            Some(self.score_team1)
        } else if team == self.team2 {
            Some(self.score_team2)
        } else {
            None
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team1 == team || self.team2 == team
    }
}

/// One player's contribution to one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub id: GamePlayerId,
    pub game: GameId,
    pub player: PlayerId,
    pub score: u32,
}

// =============================================================================
// Insert records, handed to the store before ids exist
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoach {
    pub team: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub team: TeamId,
    pub name: String,
    pub height: u32,
}

/// A game row written once, with its final scores and winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub round: RoundId,
    pub team1: TeamId,
    pub team2: TeamId,
    pub score_team1: u32,
    pub score_team2: u32,
    pub winner: Option<TeamId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGamePlayer {
    pub game: GameId,
    pub player: PlayerId,
    pub score: u32,
}
