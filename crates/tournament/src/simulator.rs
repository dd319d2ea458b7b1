//! Score simulation for a single game.
//!
//! For each side a random lineup is drawn from the roster and every selected
//! player is given a random score. The side's score is the lineup total.

use league_core::{Player, TeamId};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::bracket::{GameSheet, Participation, Side};
use crate::error::{BracketError, Result};

/// Lineup and scoring limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Smallest lineup a team may field; smaller rosters cannot play
    pub min_lineup: usize,
    /// Largest lineup, further capped by the roster size
    pub max_lineup: usize,
    /// Inclusive per-player score range for one game
    pub score_range: RangeInclusive<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_lineup: 5,
            max_lineup: 10,
            score_range: 2..=20,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_lineup == 0 {
            return Err(BracketError::InvalidConfig(
                "min_lineup must be at least 1".into(),
            ));
        }
        if self.min_lineup > self.max_lineup {
            return Err(BracketError::InvalidConfig(format!(
                "min_lineup {} exceeds max_lineup {}",
                self.min_lineup, self.max_lineup
            )));
        }
        if self.score_range.is_empty() {
            return Err(BracketError::InvalidConfig(format!(
                "score range {}..={} is empty",
                self.score_range.start(),
                self.score_range.end()
            )));
        }
        Ok(())
    }

    /// Inclusive bounds of the lineup size for a roster of `roster_size`.
    pub fn lineup_bounds(&self, roster_size: usize) -> RangeInclusive<usize> {
        self.min_lineup..=self.max_lineup.min(roster_size)
    }
}

/// Plays games by drawing lineups and scores from an injected RNG.
#[derive(Debug, Clone)]
pub struct ScoreSimulator<R> {
    config: SimulationConfig,
    rng: R,
}

impl ScoreSimulator<ChaCha8Rng> {
    /// Reproducible simulator for a given seed.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> ScoreSimulator<R> {
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play `sheet` between the two given rosters.
    ///
    /// Any earlier result on the sheet is discarded. Selected players have
    /// their in-memory totals updated; the rest of each roster is untouched.
    /// Both rosters are checked before anything is drawn, so a failure leaves
    /// the sheet and rosters as they were.
    pub fn simulate_game(
        &mut self,
        sheet: &mut GameSheet,
        roster1: &mut [Player],
        roster2: &mut [Player],
    ) -> Result<()> {
        self.check_roster(sheet.team1.team, roster1)?;
        self.check_roster(sheet.team2.team, roster2)?;

        sheet.reset();
        self.simulate_side(&mut sheet.team1, roster1);
        self.simulate_side(&mut sheet.team2, roster2);

        tracing::debug!(
            round = sheet.round_number,
            team1 = %sheet.team1.team,
            team2 = %sheet.team2.team,
            score_team1 = sheet.team1.score,
            score_team2 = sheet.team2.score,
            "game simulated"
        );
        Ok(())
    }

    fn check_roster(&self, team: TeamId, roster: &[Player]) -> Result<()> {
        if roster.len() < self.config.min_lineup {
            return Err(BracketError::InsufficientRoster {
                team,
                size: roster.len(),
                required: self.config.min_lineup,
            });
        }
        Ok(())
    }

    fn simulate_side(&mut self, side: &mut Side, roster: &mut [Player]) {
        let lineup_size = self.rng.gen_range(self.config.lineup_bounds(roster.len()));
        let selected = index::sample(&mut self.rng, roster.len(), lineup_size);

        for idx in selected.iter() {
            let score = self.rng.gen_range(self.config.score_range.clone());
            let player = &mut roster[idx];
            player.record_game(score);
            side.lineup.push(Participation {
                player: player.id,
                score,
            });
            side.score += score;
        }
    }
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod simulator_tests;
