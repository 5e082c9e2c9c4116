use crate::config::SeasonRules;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub id: u32,
    pub week: u8,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub result: Option<FinalScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub home_score: u32,
    pub away_score: u32,
    /// `None` for a tie.
    pub winner_id: Option<u32>,
}

impl ScheduledGame {
    pub fn new(id: u32, week: u8, home_team_id: u32, away_team_id: u32) -> Self {
        ScheduledGame {
            id,
            week,
            home_team_id,
            away_team_id,
            result: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn opponent_of(&self, team_id: u32) -> Option<u32> {
        if self.home_team_id == team_id {
            Some(self.away_team_id)
        } else if self.away_team_id == team_id {
            Some(self.home_team_id)
        } else {
            None
        }
    }

    /// Marks the game final. The winner is derived from the score so the
    /// stored result can never disagree with itself.
    pub fn complete(&mut self, home_score: u32, away_score: u32) {
        let winner_id = if home_score > away_score {
            Some(self.home_team_id)
        } else if away_score > home_score {
            Some(self.away_team_id)
        } else {
            None
        };

        self.result = Some(FinalScore {
            home_score,
            away_score,
            winner_id,
        });
    }

    /// Points scored and conceded from `team_id`'s point of view.
    pub fn score_for(&self, team_id: u32) -> Option<(u32, u32)> {
        let result = self.result.as_ref()?;

        if self.home_team_id == team_id {
            Some((result.home_score, result.away_score))
        } else if self.away_team_id == team_id {
            Some((result.away_score, result.home_score))
        } else {
            None
        }
    }

    pub fn loser_id(&self) -> Option<u32> {
        let winner = self.result.as_ref()?.winner_id?;
        self.opponent_of(winner)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub games: Vec<ScheduledGame>,
}

impl Schedule {
    pub fn new(games: Vec<ScheduledGame>) -> Self {
        Schedule { games }
    }

    pub fn game(&self, game_id: u32) -> Option<&ScheduledGame> {
        self.games.iter().find(|g| g.id == game_id)
    }

    pub fn games_in_week(&self, week: u8) -> impl Iterator<Item = &ScheduledGame> {
        self.games.iter().filter(move |g| g.week == week)
    }

    pub fn has_games_in_week(&self, week: u8) -> bool {
        self.games.iter().any(|g| g.week == week)
    }

    pub fn completed_games(&self) -> impl Iterator<Item = &ScheduledGame> {
        self.games.iter().filter(|g| g.is_complete())
    }

    /// Completed regular-season games in week order; the input for standings.
    pub fn completed_regular_season(&self, rules: &SeasonRules) -> Vec<&ScheduledGame> {
        let mut games: Vec<&ScheduledGame> = self
            .completed_games()
            .filter(|g| rules.is_regular_season_week(g.week))
            .collect();

        games.sort_by_key(|g| (g.week, g.id));
        games
    }

    pub fn games_for_team(&self, team_id: u32) -> impl Iterator<Item = &ScheduledGame> {
        self.games.iter().filter(move |g| g.involves(team_id))
    }

    pub fn next_game_id(&self) -> u32 {
        self.games.iter().map(|g| g.id).max().map_or(1, |id| id + 1)
    }

    pub fn add_games(&mut self, games: impl IntoIterator<Item = ScheduledGame>) {
        self.games.extend(games);
    }

    /// Drops playoff games and clears every regular-season result so the
    /// fixture list can be replayed next year.
    pub fn reset_for_new_season(&mut self, rules: &SeasonRules) {
        self.games.retain(|g| rules.is_regular_season_week(g.week));

        for game in &mut self.games {
            game.result = None;
        }
    }
}
