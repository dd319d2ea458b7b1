//! Player career statistics.
//!
//! Everything here is derived from the running totals stored on [`Player`];
//! there is no separate statistics state to keep in sync.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::{Player, PlayerId, TeamId};

/// Career scoring average: `total_score / games_played`, or 0 before the
/// first game.
pub fn average_score(player: &Player) -> f64 {
    if player.games_played == 0 {
        return 0.0;
    }
    player.total_score as f64 / player.games_played as f64
}

/// Snapshot of one player's career numbers, suitable for reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    pub team: TeamId,
    pub height: u32,
    pub games_played: u32,
    pub total_score: u32,
    pub average_score: f64,
}

impl From<&Player> for PlayerStats {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            team: player.team,
            height: player.height,
            games_played: player.games_played,
            total_score: player.total_score,
            average_score: average_score(player),
        }
    }
}

/// Players ranked by total score, then by average, then by id.
pub fn leaderboard<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<PlayerStats> {
    let mut entries: Vec<PlayerStats> = players.into_iter().map(PlayerStats::from).collect();
    entries.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| {
                b.average_score
                    .partial_cmp(&a.average_score)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.id.cmp(&b.id))
    });
    entries
}

/// Print a leaderboard to stdout
pub fn print_leaderboard(entries: &[PlayerStats], limit: usize) {
    println!("\n=== Scoring Leaders ===");
    println!(
        "{:<24} {:>6} {:>6} {:>8} {:>8}",
        "Player", "Team", "Games", "Points", "Avg"
    );
    println!("{}", "-".repeat(56));
    for entry in entries.iter().take(limit) {
        println!(
            "{:<24} {:>6} {:>6} {:>8} {:>8.2}",
            entry.name, entry.team.0, entry.games_played, entry.total_score, entry.average_score
        );
    }
    println!();
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
