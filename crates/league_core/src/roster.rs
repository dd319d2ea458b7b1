//! League universe generation: teams, coaches and rostered players.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::RosterError;
use crate::store::{Store, Transaction};
use crate::types::{NewCoach, NewPlayer, NewTeam, Team};

/// Shape of the generated league
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Number of teams; must be a power of two so the bracket halves cleanly
    pub team_count: usize,
    /// Players generated per team
    pub players_per_team: usize,
    /// Inclusive player height range in centimetres
    pub height_range: RangeInclusive<u32>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            team_count: 16,
            players_per_team: 10,
            height_range: 175..=225,
        }
    }
}

impl RosterConfig {
    pub fn validate(&self) -> Result<(), RosterError> {
        if !self.team_count.is_power_of_two() {
            return Err(RosterError::InvalidBracketSize(self.team_count));
        }
        if self.height_range.is_empty() {
            return Err(RosterError::InvalidHeightRange {
                min: *self.height_range.start(),
                max: *self.height_range.end(),
            });
        }
        Ok(())
    }
}

/// Seeds a store with a fresh league.
#[derive(Debug, Clone, Default)]
pub struct RosterGenerator {
    config: RosterConfig,
}

impl RosterGenerator {
    pub fn new(config: RosterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Create every team with its coach and players.
    ///
    /// All rows are written in one transaction: on error nothing is left in
    /// the store. Returns the teams in creation order, which is also the
    /// first round's seeding order.
    pub fn generate<S, R>(&self, store: &mut S, rng: &mut R) -> Result<Vec<Team>, RosterError>
    where
        S: Store + ?Sized,
        R: Rng,
    {
        self.config.validate()?;

        let mut tx = Transaction::begin(store)?;
        let mut teams = Vec::with_capacity(self.config.team_count);

        for i in 0..self.config.team_count {
            let team = tx.create_team(NewTeam {
                name: format!("Team{}", i + 1),
            })?;
            tx.create_coach(NewCoach {
                team: team.id,
                name: format!("Coach {}", team.name),
            })?;

            for k in 0..self.config.players_per_team {
                let height = rng.gen_range(self.config.height_range.clone());
                tx.create_player(NewPlayer {
                    team: team.id,
                    name: format!("Player {}_{}", k + 1, team.name),
                    height,
                })?;
            }

            teams.push(team);
        }

        tx.commit()?;

        tracing::info!(
            teams = teams.len(),
            players_per_team = self.config.players_per_team,
            "generated league"
        );
        Ok(teams)
    }
}

/// Generate a league with the given shape in one call.
pub fn generate<S, R>(
    store: &mut S,
    rng: &mut R,
    team_count: usize,
    players_per_team: usize,
    height_range: RangeInclusive<u32>,
) -> Result<Vec<Team>, RosterError>
where
    S: Store + ?Sized,
    R: Rng,
{
    RosterGenerator::new(RosterConfig {
        team_count,
        players_per_team,
        height_range,
    })
    .generate(store, rng)
}

#[cfg(test)]
#[path = "roster_tests.rs"]
mod roster_tests;
