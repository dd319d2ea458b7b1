//! Winner resolution.
//!
//! The higher score wins. Level scores are settled by an explicit
//! [`TiePolicy`]; a tie never silently goes to either side.

use league_core::TeamId;
use serde::{Deserialize, Serialize};

use crate::bracket::GameSheet;

/// Default number of replays before [`TiePolicy::Replay`] falls back to the
/// lower team id.
pub const DEFAULT_MAX_REPLAYS: u32 = 16;

/// How a level game is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TiePolicy {
    /// Play the whole game again with fresh lineups and scores. After
    /// `max_replays` further ties the lower team id wins.
    Replay { max_replays: u32 },
    /// The team with the lower id wins immediately.
    LowerTeamId,
}

impl Default for TiePolicy {
    fn default() -> Self {
        TiePolicy::Replay {
            max_replays: DEFAULT_MAX_REPLAYS,
        }
    }
}

/// Outcome of looking at a simulated sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The sheet now carries this winner
    Winner(TeamId),
    /// Level, and the policy asks for the game to be replayed
    Replay,
}

/// Decide the winner of a simulated sheet.
///
/// `replays_so_far` is how many times this game has already been replayed
/// because of a tie. On [`Resolution::Winner`] the sheet's `winner` is set.
pub fn resolve(sheet: &mut GameSheet, policy: TiePolicy, replays_so_far: u32) -> Resolution {
    let (team1, team2) = (sheet.team1.team, sheet.team2.team);

    let winner = if sheet.team1.score > sheet.team2.score {
        team1
    } else if sheet.team2.score > sheet.team1.score {
        team2
    } else {
        match policy {
            TiePolicy::Replay { max_replays } if replays_so_far < max_replays => {
                tracing::debug!(
                    round = sheet.round_number,
                    %team1,
                    %team2,
                    score = sheet.team1.score,
                    replay = replays_so_far + 1,
                    "tied game, replaying"
                );
                return Resolution::Replay;
            }
            TiePolicy::Replay { max_replays } => {
                tracing::warn!(
                    round = sheet.round_number,
                    %team1,
                    %team2,
                    max_replays,
                    "still tied after replays, lower team id advances"
                );
                team1.min(team2)
            }
            TiePolicy::LowerTeamId => team1.min(team2),
        }
    };

    sheet.winner = Some(winner);
    Resolution::Winner(winner)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
