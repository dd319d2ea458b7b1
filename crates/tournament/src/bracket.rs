//! Round pairing.
//!
//! Pairing is purely positional: the first two teams meet, then the next two,
//! and so on. Any randomised seeding happens before, see [`shuffle_seeds`].

use league_core::{PlayerId, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{BracketError, Result};

/// One selected player's contribution to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    pub player: PlayerId,
    pub score: u32,
}

/// One team's half of a game sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    pub team: TeamId,
    pub score: u32,
    pub lineup: Vec<Participation>,
}

impl Side {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            score: 0,
            lineup: Vec::new(),
        }
    }

    /// Forget any previous simulation of this side.
    pub fn clear(&mut self) {
        self.score = 0;
        self.lineup.clear();
    }
}

/// A game that has been scheduled but not yet written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSheet {
    pub round_number: u32,
    pub team1: Side,
    pub team2: Side,
    pub winner: Option<TeamId>,
}

impl GameSheet {
    pub fn new(round_number: u32, team1: TeamId, team2: TeamId) -> Self {
        Self {
            round_number,
            team1: Side::new(team1),
            team2: Side::new(team2),
            winner: None,
        }
    }

    pub fn score_team1(&self) -> u32 {
        self.team1.score
    }

    pub fn score_team2(&self) -> u32 {
        self.team2.score
    }

    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }

    /// Reset scores, lineups and winner so the game can be played again.
    pub fn reset(&mut self) {
        self.team1.clear();
        self.team2.clear();
        self.winner = None;
    }

    /// Every participation on both sides
    pub fn participations(&self) -> impl Iterator<Item = &Participation> {
        self.team1.lineup.iter().chain(self.team2.lineup.iter())
    }
}

/// All games of one bracket level, in pairing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledRound {
    pub round_number: u32,
    pub games: Vec<GameSheet>,
}

impl ScheduledRound {
    /// Winners in the relative order of their games, `None` until every game
    /// is resolved.
    pub fn winners(&self) -> Option<Vec<TeamId>> {
        self.games.iter().map(|g| g.winner).collect()
    }
}

/// Pair `teams` positionally into the games of round `round_number`.
pub fn pair_round(round_number: u32, teams: &[TeamId]) -> Result<ScheduledRound> {
    if teams.is_empty() || teams.len() % 2 != 0 {
        return Err(BracketError::InvalidBracket {
            round_number,
            teams: teams.len(),
        });
    }

    let mut seen = HashSet::with_capacity(teams.len());
    for &team in teams {
        if !seen.insert(team) {
            return Err(BracketError::DuplicateTeam { round_number, team });
        }
    }

    let games = teams
        .chunks_exact(2)
        .map(|pair| GameSheet::new(round_number, pair[0], pair[1]))
        .collect();

    Ok(ScheduledRound {
        round_number,
        games,
    })
}

/// Randomise the first round's matchups.
pub fn shuffle_seeds<R: Rng>(teams: &mut [TeamId], rng: &mut R) {
    teams.shuffle(rng);
}

#[cfg(test)]
#[path = "bracket_tests.rs"]
mod bracket_tests;
