//! Shared helpers for the bracket integration tests

#![allow(dead_code)]

use league_core::*;

/// Store wrapper that fails one chosen write, once.
///
/// The failure disarms itself so a retry of the same work goes through.
pub struct FlakyStore {
    pub inner: MemoryStore,
    /// Fail the n-th (0-based) `create_game_player` call
    pub fail_game_player_at: Option<usize>,
    /// Fail the n-th (0-based) `create_player` call
    pub fail_player_at: Option<usize>,
    game_player_calls: usize,
    player_calls: usize,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_game_player_at: None,
            fail_player_at: None,
            game_player_calls: 0,
            player_calls: 0,
        }
    }

    fn injected() -> StoreError {
        StoreError::Backend("injected failure".into())
    }
}

impl Store for FlakyStore {
    fn create_team(&mut self, team: NewTeam) -> StoreResult<Team> {
        self.inner.create_team(team)
    }

    fn create_coach(&mut self, coach: NewCoach) -> StoreResult<Coach> {
        self.inner.create_coach(coach)
    }

    fn create_player(&mut self, player: NewPlayer) -> StoreResult<Player> {
        let call = self.player_calls;
        self.player_calls += 1;
        if self.fail_player_at == Some(call) {
            self.fail_player_at = None;
            return Err(Self::injected());
        }
        self.inner.create_player(player)
    }

    fn create_round(&mut self, round_number: u32) -> StoreResult<Round> {
        self.inner.create_round(round_number)
    }

    fn create_game(&mut self, game: NewGame) -> StoreResult<Game> {
        self.inner.create_game(game)
    }

    fn create_game_player(&mut self, row: NewGamePlayer) -> StoreResult<GamePlayer> {
        let call = self.game_player_calls;
        self.game_player_calls += 1;
        if self.fail_game_player_at == Some(call) {
            self.fail_game_player_at = None;
            return Err(Self::injected());
        }
        self.inner.create_game_player(row)
    }

    fn update_player_stats(
        &mut self,
        player: PlayerId,
        delta_games_played: u32,
        delta_score: u32,
    ) -> StoreResult<()> {
        self.inner
            .update_player_stats(player, delta_games_played, delta_score)
    }

    fn teams_by_id(&self, ids: &[TeamId]) -> StoreResult<Vec<Team>> {
        self.inner.teams_by_id(ids)
    }

    fn all_teams(&self) -> StoreResult<Vec<Team>> {
        self.inner.all_teams()
    }

    fn players_by_team(&self, team: TeamId) -> StoreResult<Vec<Player>> {
        self.inner.players_by_team(team)
    }

    fn player(&self, id: PlayerId) -> StoreResult<Player> {
        self.inner.player(id)
    }

    fn coach_by_team(&self, team: TeamId) -> StoreResult<Option<Coach>> {
        self.inner.coach_by_team(team)
    }

    fn rounds_ordered_by_number(&self) -> StoreResult<Vec<Round>> {
        self.inner.rounds_ordered_by_number()
    }

    fn games_by_round(&self, round: RoundId) -> StoreResult<Vec<Game>> {
        self.inner.games_by_round(round)
    }

    fn game_players_by_game(&self, game: GameId) -> StoreResult<Vec<GamePlayer>> {
        self.inner.game_players_by_game(game)
    }

    fn begin(&mut self) -> StoreResult<()> {
        self.inner.begin()
    }

    fn commit(&mut self) -> StoreResult<()> {
        self.inner.commit()
    }

    fn rollback(&mut self) {
        self.inner.rollback()
    }
}
