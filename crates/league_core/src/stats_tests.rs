use super::*;
use proptest::prelude::*;

fn player(id: u32, games_played: u32, total_score: u32) -> Player {
    Player {
        id: PlayerId(id),
        team: TeamId(1),
        name: format!("Player {id}"),
        height: 200,
        games_played,
        total_score,
    }
}

#[test]
fn unplayed_player_averages_zero() {
    assert_eq!(average_score(&player(1, 0, 0)), 0.0);
}

#[test]
fn average_is_total_over_games() {
    assert!((average_score(&player(1, 4, 30)) - 7.5).abs() < 1e-9);
    assert!((player(1, 3, 30).average_score() - 10.0).abs() < 1e-9);
}

#[test]
fn leaderboard_orders_by_total_then_average_then_id() {
    let players = vec![
        player(1, 2, 20),
        player(2, 1, 20),
        player(3, 3, 45),
        player(4, 2, 20),
    ];

    let ids: Vec<u32> = leaderboard(&players).iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![3, 2, 1, 4]);
}

proptest! {
    #[test]
    fn average_is_idempotent_and_bounded(games in 0u32..500, per_game in 0u32..=20) {
        let p = player(1, games, games * per_game);
        let first = average_score(&p);
        let second = average_score(&p);
        prop_assert_eq!(first, second);
        prop_assert!(first >= 0.0);
        prop_assert!(first <= 20.0);
    }
}
