//! Consistency checks over a stored league.
//!
//! Walks every round, game and per-player row and verifies the bookkeeping:
//! side scores equal their lineup totals, player career totals equal their
//! per-game rows, lineups stay within bounds, every team plays at most once
//! per round and winners advance.

use league_core::{GameId, Player, PlayerId, Store, StoreError, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Bounds the stored data is checked against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLimits {
    pub min_lineup: usize,
    pub max_lineup: usize,
    pub score_range: RangeInclusive<u32>,
    pub height_range: RangeInclusive<u32>,
}

impl Default for AuditLimits {
    fn default() -> Self {
        Self {
            min_lineup: 5,
            max_lineup: 10,
            score_range: 2..=20,
            height_range: 175..=225,
        }
    }
}

/// Counts of what was checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub teams: usize,
    pub players: usize,
    pub rounds: usize,
    pub games: usize,
    pub game_players: usize,
}

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("expected round number {expected}, found {found}")]
    RoundNumbering { expected: u32, found: u32 },

    #[error("round {round_number} has {games} games, expected {expected}")]
    BracketShape {
        round_number: u32,
        games: usize,
        expected: usize,
    },

    #[error("{team} plays more than once in round {round_number}")]
    RepeatedTeam { round_number: u32, team: TeamId },

    #[error("{team} plays in round {round_number} without winning the previous round")]
    NotAdvanced { round_number: u32, team: TeamId },

    #[error("{0} has no winner")]
    MissingWinner(GameId),

    #[error("{game} names {winner} as winner, who did not play")]
    WinnerNotInGame { game: GameId, winner: TeamId },

    #[error("{player} has a row in {game} but plays for neither team")]
    ForeignParticipant { game: GameId, player: PlayerId },

    #[error("{player} scored {score} in {game}, outside the allowed range")]
    ScoreOutOfRange {
        game: GameId,
        player: PlayerId,
        score: u32,
    },

    #[error("{team} in {game}: recorded score {recorded}, lineup total {summed}")]
    SideScoreMismatch {
        game: GameId,
        team: TeamId,
        recorded: u32,
        summed: u32,
    },

    #[error("{team} in {game} fielded {size} players from a roster of {roster}")]
    LineupSize {
        game: GameId,
        team: TeamId,
        size: usize,
        roster: usize,
    },

    #[error(
        "{player}: recorded {games_played} games / {total_score} points, \
         rows say {rows} games / {summed} points"
    )]
    PlayerTotals {
        player: PlayerId,
        games_played: u32,
        total_score: u32,
        rows: u32,
        summed: u32,
    },

    #[error("{player} is {height}cm, outside the allowed range")]
    HeightOutOfRange { player: PlayerId, height: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Verify the whole store. Stops at the first violation.
pub fn audit<S: Store + ?Sized>(store: &S, limits: &AuditLimits) -> Result<AuditReport, AuditError> {
    let mut report = AuditReport::default();

    let teams = store.all_teams()?;
    report.teams = teams.len();

    let mut roster_sizes: HashMap<TeamId, usize> = HashMap::new();
    let mut players: Vec<Player> = Vec::new();
    for team in &teams {
        let roster = store.players_by_team(team.id)?;
        roster_sizes.insert(team.id, roster.len());
        players.extend(roster);
    }
    report.players = players.len();

    for player in &players {
        if !limits.height_range.contains(&player.height) {
            return Err(AuditError::HeightOutOfRange {
                player: player.id,
                height: player.height,
            });
        }
    }
    let team_of: HashMap<PlayerId, TeamId> = players.iter().map(|p| (p.id, p.team)).collect();

    // (rows, points) per player, from the game rows
    let mut tallies: HashMap<PlayerId, (u32, u32)> = HashMap::new();
    let mut previous_winners: Option<HashSet<TeamId>> = None;

    for (i, round) in store.rounds_ordered_by_number()?.iter().enumerate() {
        let expected = i as u32 + 1;
        if round.round_number != expected {
            return Err(AuditError::RoundNumbering {
                expected,
                found: round.round_number,
            });
        }
        report.rounds += 1;

        let games = store.games_by_round(round.id)?;
        let mut playing = HashSet::new();
        for game in &games {
            for team in [game.team1, game.team2] {
                if !playing.insert(team) {
                    return Err(AuditError::RepeatedTeam {
                        round_number: round.round_number,
                        team,
                    });
                }
            }
        }

        // Round 1 seats every team, later rounds the previous winners
        let field = previous_winners.as_ref().map_or(teams.len(), HashSet::len);
        if games.len() * 2 != field {
            return Err(AuditError::BracketShape {
                round_number: round.round_number,
                games: games.len(),
                expected: field / 2,
            });
        }
        if let Some(prev) = &previous_winners {
            for game in &games {
                for team in [game.team1, game.team2] {
                    if !prev.contains(&team) {
                        return Err(AuditError::NotAdvanced {
                            round_number: round.round_number,
                            team,
                        });
                    }
                }
            }
        }

        let mut winners = HashSet::new();
        for game in &games {
            report.games += 1;
            let winner = game.winner.ok_or(AuditError::MissingWinner(game.id))?;
            if !game.involves(winner) {
                return Err(AuditError::WinnerNotInGame {
                    game: game.id,
                    winner,
                });
            }
            winners.insert(winner);

            let mut sums = [0u32; 2];
            let mut sizes = [0usize; 2];
            for row in store.game_players_by_game(game.id)? {
                report.game_players += 1;
                let side = match team_of.get(&row.player) {
                    Some(&team) if team == game.team1 => 0,
                    Some(&team) if team == game.team2 => 1,
                    _ => {
                        return Err(AuditError::ForeignParticipant {
                            game: game.id,
                            player: row.player,
                        })
                    }
                };
                if !limits.score_range.contains(&row.score) {
                    return Err(AuditError::ScoreOutOfRange {
                        game: game.id,
                        player: row.player,
                        score: row.score,
                    });
                }
                sums[side] += row.score;
                sizes[side] += 1;

                let tally = tallies.entry(row.player).or_default();
                tally.0 += 1;
                tally.1 += row.score;
            }

            let sides = [
                (game.team1, game.score_team1),
                (game.team2, game.score_team2),
            ];
            for (side, (team, recorded)) in sides.into_iter().enumerate() {
                if sums[side] != recorded {
                    return Err(AuditError::SideScoreMismatch {
                        game: game.id,
                        team,
                        recorded,
                        summed: sums[side],
                    });
                }
                let roster = roster_sizes.get(&team).copied().unwrap_or(0);
                let bounds = limits.min_lineup..=limits.max_lineup.min(roster);
                if !bounds.contains(&sizes[side]) {
                    return Err(AuditError::LineupSize {
                        game: game.id,
                        team,
                        size: sizes[side],
                        roster,
                    });
                }
            }
        }
        previous_winners = Some(winners);
    }

    for player in &players {
        let (rows, summed) = tallies.get(&player.id).copied().unwrap_or((0, 0));
        if rows != player.games_played || summed != player.total_score {
            return Err(AuditError::PlayerTotals {
                player: player.id,
                games_played: player.games_played,
                total_score: player.total_score,
                rows,
                summed,
            });
        }
    }

    tracing::debug!(?report, "audit passed");
    Ok(report)
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod audit_tests;
