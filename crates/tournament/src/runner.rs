//! Bracket driver.
//!
//! [`Bracket`] walks the single-elimination state machine
//!
//! ```text
//! Seeded -> Pending(1) -> Resolved(1) -> Pending(2) -> ... -> Champion(team)
//! ```
//!
//! A round is simulated entirely in memory and written to the store as one
//! [`RoundBatch`] inside a transaction. If anything fails the bracket stays in
//! `Pending(n)` with the same pairing and the store holds nothing from that
//! round, so calling [`Bracket::play_scheduled`] again replays it from scratch.

use league_core::{Game, NewGame, NewGamePlayer, Player, Store, TeamId, Transaction};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::bracket::{pair_round, GameSheet, ScheduledRound};
use crate::error::{BracketError, Result};
use crate::resolver::{resolve, Resolution, TiePolicy};
use crate::simulator::ScoreSimulator;

/// Where the bracket currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketState {
    /// Teams are known, nothing scheduled yet
    Seeded,
    /// The round is paired and waiting to be played
    Pending(ScheduledRound),
    /// Every game of this round number is stored
    Resolved(u32),
    /// Only this team is left
    Champion(TeamId),
}

/// What one played round produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    /// Stored games, in pairing order
    pub games: Vec<Game>,
    /// Winners in the relative order of their games
    pub advancing: Vec<TeamId>,
    /// Total number of tie replays across the round
    pub replays: u32,
}

/// Result of running a bracket to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketOutcome {
    pub champion: TeamId,
    pub rounds: Vec<RoundSummary>,
}

/// A fully resolved round, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundBatch {
    round_number: u32,
    games: Vec<GameSheet>,
}

impl RoundBatch {
    /// Check that every game has a winner and that no player took part in
    /// more than one game of the round.
    pub fn new(round: ScheduledRound) -> Result<Self> {
        let mut seen = HashSet::new();
        for sheet in &round.games {
            if !sheet.is_resolved() {
                return Err(BracketError::UnresolvedGame {
                    round_number: round.round_number,
                    team1: sheet.team1.team,
                    team2: sheet.team2.team,
                });
            }
            for participation in sheet.participations() {
                if !seen.insert(participation.player) {
                    return Err(BracketError::PlayerConflict {
                        round_number: round.round_number,
                        player: participation.player,
                    });
                }
            }
        }

        Ok(Self {
            round_number: round.round_number,
            games: round.games,
        })
    }

    /// Write the round, its games, the per-player rows and the stat deltas in
    /// a single transaction.
    pub fn commit<S: Store + ?Sized>(&self, store: &mut S) -> Result<Vec<Game>> {
        let mut tx = Transaction::begin(store)?;
        let round = tx.create_round(self.round_number)?;

        let mut games = Vec::with_capacity(self.games.len());
        for sheet in &self.games {
            let game = tx.create_game(NewGame {
                round: round.id,
                team1: sheet.team1.team,
                team2: sheet.team2.team,
                score_team1: sheet.score_team1(),
                score_team2: sheet.score_team2(),
                winner: sheet.winner,
            })?;

            for participation in sheet.participations() {
                tx.create_game_player(NewGamePlayer {
                    game: game.id,
                    player: participation.player,
                    score: participation.score,
                })?;
                tx.update_player_stats(participation.player, 1, participation.score)?;
            }
            games.push(game);
        }

        tx.commit()?;
        Ok(games)
    }
}

/// Single-elimination bracket over a store.
#[derive(Debug)]
pub struct Bracket<S, R> {
    store: S,
    simulator: ScoreSimulator<R>,
    tie_policy: TiePolicy,
    survivors: Vec<TeamId>,
    state: BracketState,
}

impl<S: Store, R: Rng> Bracket<S, R> {
    /// Start a bracket with `teams` in seeding order.
    ///
    /// The team count must be a power of two and the store must not hold any
    /// rounds yet. A single team is champion straight away.
    pub fn new(
        store: S,
        teams: Vec<TeamId>,
        simulator: ScoreSimulator<R>,
        tie_policy: TiePolicy,
    ) -> Result<Self> {
        if !teams.len().is_power_of_two() {
            return Err(BracketError::InvalidBracketSize(teams.len()));
        }

        let existing = store.rounds_ordered_by_number()?;
        if !existing.is_empty() {
            return Err(BracketError::AlreadyStarted(existing.len()));
        }
        store.teams_by_id(&teams)?;

        let state = match teams.as_slice() {
            [only] => BracketState::Champion(*only),
            _ => BracketState::Seeded,
        };

        Ok(Self {
            store,
            simulator,
            tie_policy,
            survivors: teams,
            state,
        })
    }

    pub fn state(&self) -> &BracketState {
        &self.state
    }

    /// Teams still in the competition, in pairing order
    pub fn survivors(&self) -> &[TeamId] {
        &self.survivors
    }

    pub fn champion(&self) -> Option<TeamId> {
        match self.state {
            BracketState::Champion(team) => Some(team),
            _ => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store, e.g. to repair it before a retry
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Pair the survivors into the next round.
    ///
    /// Idempotent while a round is pending. Fails with
    /// [`BracketError::Complete`] once there is a champion.
    pub fn schedule_round(&mut self) -> Result<&ScheduledRound> {
        let next = match self.state {
            BracketState::Seeded => Some(1),
            BracketState::Resolved(n) => Some(n + 1),
            BracketState::Pending(_) | BracketState::Champion(_) => None,
        };

        if let Some(round_number) = next {
            // Parity is re-checked at every boundary, the field halves each round
            let round = pair_round(round_number, &self.survivors)?;
            tracing::debug!(
                round = round_number,
                games = round.games.len(),
                "round scheduled"
            );
            self.state = BracketState::Pending(round);
        }

        match &self.state {
            BracketState::Pending(round) => Ok(round),
            _ => Err(BracketError::Complete),
        }
    }

    /// Schedule if needed, then simulate, resolve and persist one round.
    pub fn play_round(&mut self) -> Result<RoundSummary> {
        self.schedule_round()?;
        self.play_scheduled()
    }

    /// Simulate, resolve and persist the pending round.
    ///
    /// On error the round stays pending with the same pairing; calling this
    /// again plays it from scratch.
    pub fn play_scheduled(&mut self) -> Result<RoundSummary> {
        let mut round = match &self.state {
            BracketState::Pending(round) => round.clone(),
            BracketState::Champion(_) => return Err(BracketError::Complete),
            BracketState::Seeded | BracketState::Resolved(_) => {
                return Err(BracketError::NothingScheduled)
            }
        };
        let round_number = round.round_number;

        let replays = self.simulate_round(&mut round)?;
        let batch = RoundBatch::new(round)?;
        let games = batch.commit(&mut self.store).map_err(|e| {
            tracing::warn!(round = round_number, error = %e, "round commit rolled back");
            e
        })?;

        let advancing: Vec<TeamId> = games.iter().filter_map(|g| g.winner).collect();
        self.survivors = advancing.clone();
        self.state = match advancing.as_slice() {
            [champion] => BracketState::Champion(*champion),
            _ => BracketState::Resolved(round_number),
        };

        tracing::info!(
            round = round_number,
            games = games.len(),
            advancing = advancing.len(),
            replays,
            "round resolved"
        );
        if let Some(champion) = self.champion() {
            tracing::info!(%champion, "champion determined");
        }

        Ok(RoundSummary {
            round_number,
            games,
            advancing,
            replays,
        })
    }

    /// Play rounds until a single team remains.
    pub fn run(&mut self) -> Result<BracketOutcome> {
        let mut rounds = Vec::new();
        loop {
            if let Some(champion) = self.champion() {
                return Ok(BracketOutcome { champion, rounds });
            }
            rounds.push(self.play_round()?);
        }
    }

    fn simulate_round(&mut self, round: &mut ScheduledRound) -> Result<u32> {
        let mut replays = 0;
        for sheet in &mut round.games {
            let roster1 = self.store.players_by_team(sheet.team1.team)?;
            let roster2 = self.store.players_by_team(sheet.team2.team)?;
            replays += self.play_game(sheet, &roster1, &roster2)?;
        }
        Ok(replays)
    }

    /// Simulate until the tie policy accepts a winner. Returns the number of
    /// replays. Rosters are copied per attempt so a discarded attempt leaves
    /// no trace.
    fn play_game(
        &mut self,
        sheet: &mut GameSheet,
        roster1: &[Player],
        roster2: &[Player],
    ) -> Result<u32> {
        let mut replays = 0;
        loop {
            let mut lineup_pool1 = roster1.to_vec();
            let mut lineup_pool2 = roster2.to_vec();
            self.simulator
                .simulate_game(sheet, &mut lineup_pool1, &mut lineup_pool2)?;

            match resolve(sheet, self.tie_policy, replays) {
                Resolution::Winner(_) => return Ok(replays),
                Resolution::Replay => replays += 1,
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
