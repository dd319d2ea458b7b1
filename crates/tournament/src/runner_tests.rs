use super::*;
use crate::audit::{audit, AuditLimits};
use crate::bracket::Participation;
use crate::simulator::SimulationConfig;
use league_core::{roster, MemoryStore, PlayerId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn league(teams: usize, players: usize, seed: u64) -> (MemoryStore, Vec<TeamId>) {
    let mut store = MemoryStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let teams = roster::generate(&mut store, &mut rng, teams, players, 175..=225).unwrap();
    (store, teams.iter().map(|t| t.id).collect())
}

fn bracket(
    store: MemoryStore,
    teams: Vec<TeamId>,
    seed: u64,
) -> Bracket<MemoryStore, ChaCha8Rng> {
    let sim = ScoreSimulator::seeded(SimulationConfig::default(), seed).unwrap();
    Bracket::new(store, teams, sim, TiePolicy::default()).unwrap()
}

#[test]
fn walks_the_state_machine() {
    let (store, teams) = league(4, 10, 1);
    let mut bracket = bracket(store, teams.clone(), 1);
    assert_eq!(bracket.state(), &BracketState::Seeded);

    let scheduled = bracket.schedule_round().unwrap().clone();
    assert_eq!(scheduled.round_number, 1);
    assert_eq!(bracket.state(), &BracketState::Pending(scheduled.clone()));

    // Scheduling again while pending keeps the same pairing
    assert_eq!(bracket.schedule_round().unwrap(), &scheduled);

    let first = bracket.play_round().unwrap();
    assert_eq!(first.games.len(), 2);
    assert_eq!(bracket.state(), &BracketState::Resolved(1));
    assert_eq!(bracket.survivors(), first.advancing.as_slice());

    let last = bracket.play_round().unwrap();
    assert_eq!(last.round_number, 2);
    assert_eq!(last.games.len(), 1);
    assert_eq!(bracket.champion(), Some(last.advancing[0]));
    assert!(teams.contains(&last.advancing[0]));

    assert!(matches!(bracket.play_round(), Err(BracketError::Complete)));
    assert!(matches!(bracket.schedule_round(), Err(BracketError::Complete)));
    assert_eq!(bracket.store().rounds_ordered_by_number().unwrap().len(), 2);
}

#[test]
fn play_scheduled_needs_a_pending_round() {
    let (store, teams) = league(2, 5, 9);
    let mut bracket = bracket(store, teams, 9);

    assert!(matches!(
        bracket.play_scheduled(),
        Err(BracketError::NothingScheduled)
    ));
    assert_eq!(bracket.state(), &BracketState::Seeded);

    bracket.schedule_round().unwrap();
    let summary = bracket.play_scheduled().unwrap();
    assert_eq!(summary.round_number, 1);
    assert!(matches!(
        bracket.play_scheduled(),
        Err(BracketError::Complete)
    ));
}

#[test]
fn winners_advance_in_game_order() {
    let (store, teams) = league(8, 10, 2);
    let mut bracket = bracket(store, teams, 2);

    let round = bracket.play_round().unwrap();
    let winners: Vec<TeamId> = round.games.iter().map(|g| g.winner.unwrap()).collect();
    assert_eq!(round.advancing, winners);

    for game in &round.games {
        let winner = game.winner.unwrap();
        assert!(winner == game.team1 || winner == game.team2);
        if game.score_team1 != game.score_team2 {
            let expected = if game.score_team1 > game.score_team2 {
                game.team1
            } else {
                game.team2
            };
            assert_eq!(winner, expected);
        }
    }

    let next = bracket.schedule_round().unwrap();
    assert_eq!(next.games[0].team1.team, winners[0]);
    assert_eq!(next.games[0].team2.team, winners[1]);
}

#[test]
fn single_team_is_champion_without_rounds() {
    let (store, teams) = league(1, 5, 3);
    let mut bracket = bracket(store, teams.clone(), 3);

    let outcome = bracket.run().unwrap();
    assert_eq!(outcome.champion, teams[0]);
    assert!(outcome.rounds.is_empty());
    assert!(bracket.store().rounds_ordered_by_number().unwrap().is_empty());
}

#[test]
fn rejects_bad_team_counts() {
    let (store, teams) = league(4, 5, 4);
    let sim = ScoreSimulator::seeded(SimulationConfig::default(), 0).unwrap();
    let err = Bracket::new(store, teams[..3].to_vec(), sim, TiePolicy::default()).unwrap_err();
    assert!(matches!(err, BracketError::InvalidBracketSize(3)));
}

#[test]
fn rejects_unknown_teams() {
    let (store, _) = league(2, 5, 4);
    let sim = ScoreSimulator::seeded(SimulationConfig::default(), 0).unwrap();
    let err = Bracket::new(store, vec![TeamId(1), TeamId(42)], sim, TiePolicy::default())
        .unwrap_err();
    assert!(matches!(err, BracketError::Persistence(_)));
}

#[test]
fn refuses_a_store_that_already_has_rounds() {
    let (mut store, teams) = league(2, 5, 5);
    store.create_round(1).unwrap();

    let sim = ScoreSimulator::seeded(SimulationConfig::default(), 0).unwrap();
    let err = Bracket::new(store, teams, sim, TiePolicy::default()).unwrap_err();
    assert!(matches!(err, BracketError::AlreadyStarted(1)));
}

#[test]
fn short_roster_aborts_round_without_writes() {
    let (store, teams) = league(2, 4, 6);
    let mut bracket = bracket(store, teams, 6);

    let err = bracket.play_round().unwrap_err();
    assert!(matches!(err, BracketError::InsufficientRoster { size: 4, .. }));
    assert!(matches!(bracket.state(), BracketState::Pending(_)));
    assert!(bracket.store().tables().games.is_empty());
    assert!(bracket.store().tables().rounds.is_empty());
}

#[test]
fn batch_rejects_unresolved_games() {
    let round = pair_round(1, &[TeamId(1), TeamId(2)]).unwrap();
    let err = RoundBatch::new(round).unwrap_err();
    assert!(matches!(err, BracketError::UnresolvedGame { round_number: 1, .. }));
}

#[test]
fn batch_rejects_player_in_two_games() {
    let mut round = pair_round(1, &[TeamId(1), TeamId(2), TeamId(3), TeamId(4)]).unwrap();
    let shared = Participation {
        player: PlayerId(7),
        score: 10,
    };
    for sheet in &mut round.games {
        sheet.team1.lineup.push(shared);
        sheet.team1.score = 10;
        sheet.winner = Some(sheet.team1.team);
    }

    let err = RoundBatch::new(round).unwrap_err();
    assert!(matches!(
        err,
        BracketError::PlayerConflict {
            player: PlayerId(7),
            ..
        }
    ));
}

#[test]
fn batch_commit_writes_rows_and_stats() {
    let (mut store, teams) = league(2, 5, 7);
    let players = store.players_by_team(teams[0]).unwrap();

    let mut round = pair_round(1, &teams).unwrap();
    let sheet = &mut round.games[0];
    sheet.team1.lineup = vec![
        Participation {
            player: players[0].id,
            score: 12,
        },
        Participation {
            player: players[1].id,
            score: 3,
        },
    ];
    sheet.team1.score = 15;
    sheet.winner = Some(teams[0]);

    let games = RoundBatch::new(round).unwrap().commit(&mut store).unwrap();

    assert_eq!(games.len(), 1);
    assert_eq!(games[0].score_team1, 15);
    assert_eq!(games[0].score_team2, 0);
    assert_eq!(store.game_players_by_game(games[0].id).unwrap().len(), 2);
    assert_eq!(store.player(players[0].id).unwrap().total_score, 12);
    assert_eq!(store.player(players[1].id).unwrap().games_played, 1);
    assert_eq!(store.player(players[2].id).unwrap().games_played, 0);
    assert!(!store.in_transaction());
}

#[test]
fn same_seeds_same_champion() {
    let run = || {
        let (store, teams) = league(16, 10, 8);
        bracket(store, teams, 8).run().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn level_games_are_replayed_then_go_to_lower_id() {
    let (store, teams) = league(4, 7, 10);
    // Five players scoring 2 each: every game ends 10-10
    let config = SimulationConfig {
        min_lineup: 5,
        max_lineup: 5,
        score_range: 2..=2,
    };
    let sim = ScoreSimulator::seeded(config, 10).unwrap();
    let mut bracket =
        Bracket::new(store, teams.clone(), sim, TiePolicy::Replay { max_replays: 3 }).unwrap();

    let outcome = bracket.run().unwrap();

    let replays: Vec<u32> = outcome.rounds.iter().map(|r| r.replays).collect();
    assert_eq!(replays, vec![6, 3]);
    assert_eq!(outcome.rounds[0].advancing, vec![teams[0], teams[2]]);
    assert_eq!(outcome.champion, teams[0]);

    // Discarded attempts leave no rows and no stat deltas behind
    let tables = bracket.store().tables();
    assert_eq!(tables.games.len(), 3);
    assert_eq!(tables.game_players.len(), 30);
    assert!(tables.players.iter().all(|p| p.games_played <= 2));
    let points: u32 = tables.players.iter().map(|p| p.total_score).sum();
    assert_eq!(points, 60);

    let limits = AuditLimits {
        min_lineup: 5,
        max_lineup: 5,
        score_range: 2..=2,
        ..Default::default()
    };
    audit(bracket.store(), &limits).unwrap();
}
