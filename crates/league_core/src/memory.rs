//! In-memory store backed by per-entity arenas.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use crate::types::*;

/// Every table of the league, indexed by `id - 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    pub teams: Vec<Team>,
    pub coaches: Vec<Coach>,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub games: Vec<Game>,
    pub game_players: Vec<GamePlayer>,
}

/// [`Store`] that keeps everything in memory.
///
/// Transactions snapshot the tables on `begin` and restore the snapshot on
/// `rollback`. Nested transactions are rejected.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Tables,
    snapshot: Option<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Tables) -> Self {
        Self {
            tables,
            snapshot: None,
        }
    }

    /// Read-only view of the committed and pending rows.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Load a store from a JSON file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let tables: Tables = serde_json::from_str(&contents)?;
        Ok(Self::from_tables(tables))
    }

    /// Save the store to a JSON file
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        if self.in_transaction() {
            return Err(StoreError::TransactionActive);
        }
        let json = serde_json::to_string_pretty(&self.tables)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn team(&self, id: TeamId) -> StoreResult<&Team> {
        self.tables
            .teams
            .get(id.index())
            .ok_or_else(|| StoreError::not_found("team", id.0))
    }

    fn player_mut(&mut self, id: PlayerId) -> StoreResult<&mut Player> {
        self.tables
            .players
            .get_mut(id.index())
            .ok_or_else(|| StoreError::not_found("player", id.0))
    }
}

impl Store for MemoryStore {
    fn create_team(&mut self, team: NewTeam) -> StoreResult<Team> {
        let team = Team {
            id: TeamId::from_index(self.tables.teams.len()),
            name: team.name,
        };
        self.tables.teams.push(team.clone());
        Ok(team)
    }

    fn create_coach(&mut self, coach: NewCoach) -> StoreResult<Coach> {
        self.team(coach.team)?;
        let coach = Coach {
            id: CoachId::from_index(self.tables.coaches.len()),
            team: coach.team,
            name: coach.name,
        };
        self.tables.coaches.push(coach.clone());
        Ok(coach)
    }

    fn create_player(&mut self, player: NewPlayer) -> StoreResult<Player> {
        self.team(player.team)?;
        let player = Player {
            id: PlayerId::from_index(self.tables.players.len()),
            team: player.team,
            name: player.name,
            height: player.height,
            games_played: 0,
            total_score: 0,
        };
        self.tables.players.push(player.clone());
        Ok(player)
    }

    fn create_round(&mut self, round_number: u32) -> StoreResult<Round> {
        if self
            .tables
            .rounds
            .iter()
            .any(|r| r.round_number == round_number)
        {
            return Err(StoreError::DuplicateRoundNumber(round_number));
        }
        let round = Round {
            id: RoundId::from_index(self.tables.rounds.len()),
            round_number,
        };
        self.tables.rounds.push(round.clone());
        Ok(round)
    }

    fn create_game(&mut self, game: NewGame) -> StoreResult<Game> {
        if self.tables.rounds.get(game.round.index()).is_none() {
            return Err(StoreError::not_found("round", game.round.0));
        }
        self.team(game.team1)?;
        self.team(game.team2)?;
        if game.team1 == game.team2 {
            return Err(StoreError::SameTeam(game.team1));
        }

        let id = GameId::from_index(self.tables.games.len());
        if let Some(winner) = game.winner {
            if winner != game.team1 && winner != game.team2 {
                return Err(StoreError::InvalidWinner { game: id, winner });
            }
        }

        let game = Game {
            id,
            round: game.round,
            team1: game.team1,
            team2: game.team2,
            score_team1: game.score_team1,
            score_team2: game.score_team2,
            winner: game.winner,
        };
        self.tables.games.push(game.clone());
        Ok(game)
    }

    fn create_game_player(&mut self, row: NewGamePlayer) -> StoreResult<GamePlayer> {
        if self.tables.games.get(row.game.index()).is_none() {
            return Err(StoreError::not_found("game", row.game.0));
        }
        if self.tables.players.get(row.player.index()).is_none() {
            return Err(StoreError::not_found("player", row.player.0));
        }
        let row = GamePlayer {
            id: GamePlayerId::from_index(self.tables.game_players.len()),
            game: row.game,
            player: row.player,
            score: row.score,
        };
        self.tables.game_players.push(row.clone());
        Ok(row)
    }

    fn update_player_stats(
        &mut self,
        player: PlayerId,
        delta_games_played: u32,
        delta_score: u32,
    ) -> StoreResult<()> {
        let player = self.player_mut(player)?;
        player.games_played += delta_games_played;
        player.total_score += delta_score;
        Ok(())
    }

    fn teams_by_id(&self, ids: &[TeamId]) -> StoreResult<Vec<Team>> {
        ids.iter().map(|&id| self.team(id).cloned()).collect()
    }

    fn all_teams(&self) -> StoreResult<Vec<Team>> {
        Ok(self.tables.teams.clone())
    }

    fn players_by_team(&self, team: TeamId) -> StoreResult<Vec<Player>> {
        self.team(team)?;
        Ok(self
            .tables
            .players
            .iter()
            .filter(|p| p.team == team)
            .cloned()
            .collect())
    }

    fn player(&self, id: PlayerId) -> StoreResult<Player> {
        self.tables
            .players
            .get(id.index())
            .cloned()
            .ok_or_else(|| StoreError::not_found("player", id.0))
    }

    fn coach_by_team(&self, team: TeamId) -> StoreResult<Option<Coach>> {
        self.team(team)?;
        Ok(self.tables.coaches.iter().find(|c| c.team == team).cloned())
    }

    fn rounds_ordered_by_number(&self) -> StoreResult<Vec<Round>> {
        let mut rounds = self.tables.rounds.clone();
        rounds.sort_by_key(|r| r.round_number);
        Ok(rounds)
    }

    fn games_by_round(&self, round: RoundId) -> StoreResult<Vec<Game>> {
        Ok(self
            .tables
            .games
            .iter()
            .filter(|g| g.round == round)
            .cloned()
            .collect())
    }

    fn game_players_by_game(&self, game: GameId) -> StoreResult<Vec<GamePlayer>> {
        Ok(self
            .tables
            .game_players
            .iter()
            .filter(|gp| gp.game == game)
            .cloned()
            .collect())
    }

    fn begin(&mut self) -> StoreResult<()> {
        if self.snapshot.is_some() {
            return Err(StoreError::TransactionActive);
        }
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.snapshot
            .take()
            .map(|_| ())
            .ok_or(StoreError::NoTransaction)
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.tables = snapshot;
        }
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
