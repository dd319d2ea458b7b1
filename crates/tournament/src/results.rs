//! Bracket views and reporting

use league_core::{leaderboard, PlayerId, PlayerStats, Store, StoreError, StoreResult, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A team as shown in one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub score: u32,
}

/// A stored game with both sides resolved to names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub team1: TeamSummary,
    pub team2: TeamSummary,
    pub winner: Option<TeamId>,
}

impl GameView {
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            Some(id) if id == self.team1.id => Some(&self.team1.name),
            Some(id) if id == self.team2.id => Some(&self.team2.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub round_number: u32,
    pub games: Vec<GameView>,
}

/// Champion entry shown after the final round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionView {
    pub id: TeamId,
    pub name: String,
}

/// Complete bracket as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketView {
    /// Rounds ordered by round number
    pub rounds: Vec<RoundView>,
    /// Winner of the final, absent while the bracket is incomplete
    pub champion: Option<ChampionView>,
}

impl BracketView {
    /// Build the view from the store's rounds and games.
    pub fn load<S: Store + ?Sized>(store: &S) -> StoreResult<Self> {
        let names: HashMap<TeamId, String> = store
            .all_teams()?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();
        let summary = |id: TeamId, score: u32| -> StoreResult<TeamSummary> {
            let name = names
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::not_found("team", id.0))?;
            Ok(TeamSummary { id, name, score })
        };

        let mut rounds = Vec::new();
        for round in store.rounds_ordered_by_number()? {
            let mut games = Vec::new();
            for game in store.games_by_round(round.id)? {
                games.push(GameView {
                    team1: summary(game.team1, game.score_team1)?,
                    team2: summary(game.team2, game.score_team2)?,
                    winner: game.winner,
                });
            }
            rounds.push(RoundView {
                round_number: round.round_number,
                games,
            });
        }

        // The final is the only round with a single game
        let champion = match rounds.last().map(|r| r.games.as_slice()) {
            Some([final_game]) => final_game.winner.map(|id| ChampionView {
                id,
                name: final_game.winner_name().unwrap_or_default().to_string(),
            }),
            _ => None,
        };

        Ok(Self { rounds, champion })
    }

    /// Save the view to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load a view from a JSON file
    pub fn load_file(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Bracket ===\n");

        for round in &self.rounds {
            report.push_str(&format!(
                "\nRound {} ({} game{})\n",
                round.round_number,
                round.games.len(),
                if round.games.len() == 1 { "" } else { "s" }
            ));
            report.push_str(&"-".repeat(60));
            report.push('\n');
            for game in &round.games {
                report.push_str(&format!(
                    "{:<14} {:>4} - {:<4} {:<14} -> {}\n",
                    game.team1.name,
                    game.team1.score,
                    game.team2.score,
                    game.team2.name,
                    game.winner_name().unwrap_or("tbd")
                ));
            }
        }

        match &self.champion {
            Some(champion) => {
                report.push_str(&format!("\nChampionship: {}\n", champion.name));
            }
            None => report.push_str("\nChampionship: undecided\n"),
        }
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

/// Team page: coach and roster with career numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDetails {
    pub id: TeamId,
    pub team_name: String,
    pub coach: Option<String>,
    pub players: Vec<PlayerStats>,
}

impl TeamDetails {
    pub fn load<S: Store + ?Sized>(store: &S, team: TeamId) -> StoreResult<Self> {
        let team_name = store
            .teams_by_id(&[team])?
            .into_iter()
            .next()
            .map(|t| t.name)
            .ok_or_else(|| StoreError::not_found("team", team.0))?;
        let coach = store.coach_by_team(team)?.map(|c| c.name);
        let players = store
            .players_by_team(team)?
            .iter()
            .map(PlayerStats::from)
            .collect();

        Ok(Self {
            id: team,
            team_name,
            coach,
            players,
        })
    }

    pub fn generate_report(&self) -> String {
        let mut report = format!("=== {} ===\n", self.team_name);
        report.push_str(&format!(
            "Coach: {}\n\n",
            self.coach.as_deref().unwrap_or("none")
        ));
        report.push_str(&format!(
            "{:<8} {:<24} {:>6} {:>6} {:>8} {:>8}\n",
            "Id", "Player", "Height", "Games", "Points", "Avg"
        ));
        report.push_str(&"-".repeat(64));
        report.push('\n');
        for p in &self.players {
            report.push_str(&format!(
                "{:<8} {:<24} {:>6} {:>6} {:>8} {:>8.2}\n",
                p.id.0, p.name, p.height, p.games_played, p.total_score, p.average_score
            ));
        }
        report
    }
}

/// Career numbers for one player
pub fn player_details<S: Store + ?Sized>(store: &S, player: PlayerId) -> StoreResult<PlayerStats> {
    store.player(player).map(|p| PlayerStats::from(&p))
}

/// Every player in the store, ranked
pub fn league_leaderboard<S: Store + ?Sized>(store: &S) -> StoreResult<Vec<PlayerStats>> {
    let mut players = Vec::new();
    for team in store.all_teams()? {
        players.extend(store.players_by_team(team.id)?);
    }
    Ok(leaderboard(&players))
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
