use crate::league::Team;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub week: u8,
    pub is_playoff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInjury {
    pub player_id: u32,
    pub player_name: String,
    pub team_id: u32,
    pub injury_type: String,
    pub weeks_out: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub home_score: u32,
    pub away_score: u32,
    pub winner_id: Option<u32>,
    pub is_tie: bool,
    pub injuries: Vec<GameInjury>,
}

impl GameOutcome {
    pub fn from_score(config: &GameConfig, home_score: u32, away_score: u32) -> Self {
        let winner_id = if home_score > away_score {
            Some(config.home_team_id)
        } else if away_score > home_score {
            Some(config.away_team_id)
        } else {
            None
        };

        GameOutcome {
            home_score,
            away_score,
            winner_id,
            is_tie: winner_id.is_none(),
            injuries: Vec::new(),
        }
    }

    pub fn with_injuries(mut self, injuries: Vec<GameInjury>) -> Self {
        self.injuries = injuries;
        self
    }
}

/// Play-by-play collaborator. Turns two rosters into a final score; the
/// season engine never decides a game itself. Games of one week may be
/// played concurrently, hence `Sync`.
pub trait GameEngine: Sync {
    fn play(&self, config: &GameConfig, home: &Team, away: &Team) -> GameOutcome;
}
