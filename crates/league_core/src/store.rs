//! Persistence seam for the league.
//!
//! The simulation never holds references into stored data. Everything it needs
//! is read through the query methods below, and everything it produces is
//! written through the create/update methods, grouped in a [`Transaction`].

use std::ops::{Deref, DerefMut};

use crate::error::StoreResult;
use crate::types::*;

/// Trait implemented by every persistence backend.
///
/// Writes made between [`Store::begin`] and [`Store::commit`] must become
/// visible all together or, after [`Store::rollback`], not at all.
pub trait Store {
    // ---- writes --------------------------------------------------------------

    fn create_team(&mut self, team: NewTeam) -> StoreResult<Team>;

    fn create_coach(&mut self, coach: NewCoach) -> StoreResult<Coach>;

    fn create_player(&mut self, player: NewPlayer) -> StoreResult<Player>;

    /// Create a round. Round numbers are unique across the store.
    fn create_round(&mut self, round_number: u32) -> StoreResult<Round>;

    /// Create a game. The two teams must differ and the winner, if any, must be
    /// one of them.
    fn create_game(&mut self, game: NewGame) -> StoreResult<Game>;

    fn create_game_player(&mut self, row: NewGamePlayer) -> StoreResult<GamePlayer>;

    /// Add to a player's career totals.
    fn update_player_stats(
        &mut self,
        player: PlayerId,
        delta_games_played: u32,
        delta_score: u32,
    ) -> StoreResult<()>;

    // ---- queries -------------------------------------------------------------

    /// Teams for the given ids, in the same order. Fails if any id is unknown.
    fn teams_by_id(&self, ids: &[TeamId]) -> StoreResult<Vec<Team>>;

    /// All teams ordered by id.
    fn all_teams(&self) -> StoreResult<Vec<Team>>;

    /// Roster of a team, ordered by player id.
    fn players_by_team(&self, team: TeamId) -> StoreResult<Vec<Player>>;

    fn player(&self, id: PlayerId) -> StoreResult<Player>;

    fn coach_by_team(&self, team: TeamId) -> StoreResult<Option<Coach>>;

    fn rounds_ordered_by_number(&self) -> StoreResult<Vec<Round>>;

    /// Games of a round, in creation order.
    fn games_by_round(&self, round: RoundId) -> StoreResult<Vec<Game>>;

    fn game_players_by_game(&self, game: GameId) -> StoreResult<Vec<GamePlayer>>;

    // ---- transactions --------------------------------------------------------

    fn begin(&mut self) -> StoreResult<()>;

    fn commit(&mut self) -> StoreResult<()>;

    /// Discard every write since [`Store::begin`]. A no-op outside a transaction.
    fn rollback(&mut self);
}

/// Scoped transaction over a store.
///
/// Dereferences to the store so writes go through it directly. Unless
/// [`Transaction::commit`] succeeds, dropping the guard rolls back.
pub struct Transaction<'a, S: Store + ?Sized> {
    store: &'a mut S,
    finished: bool,
}

impl<'a, S: Store + ?Sized> Transaction<'a, S> {
    pub fn begin(store: &'a mut S) -> StoreResult<Self> {
        store.begin()?;
        Ok(Self {
            store,
            finished: false,
        })
    }

    pub fn commit(mut self) -> StoreResult<()> {
        // Drop must not roll back again after this point
        self.finished = true;
        if let Err(e) = self.store.commit() {
            self.store.rollback();
            return Err(e);
        }
        Ok(())
    }
}

impl<S: Store + ?Sized> Deref for Transaction<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S: Store + ?Sized> DerefMut for Transaction<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.store
    }
}

impl<S: Store + ?Sized> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!("transaction dropped without commit, rolling back");
            self.store.rollback();
        }
    }
}
