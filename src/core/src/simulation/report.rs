use crate::league::{ScheduledGame, Team};
use crate::simulation::GameInjury;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryStatus {
    Probable,
    Questionable,
    Doubtful,
    Out,
}

impl InjuryStatus {
    pub fn from_weeks_out(weeks_out: u8) -> Self {
        match weeks_out {
            0 => InjuryStatus::Probable,
            1 => InjuryStatus::Questionable,
            2 => InjuryStatus::Doubtful,
            _ => InjuryStatus::Out,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryReportEntry {
    pub player_id: u32,
    pub player_name: String,
    pub team_id: u32,
    pub injury_type: String,
    pub weeks_out: u8,
    pub status: InjuryStatus,
}

pub fn injury_report(injuries: &[GameInjury]) -> Vec<InjuryReportEntry> {
    injuries
        .iter()
        .map(|injury| InjuryReportEntry {
            player_id: injury.player_id,
            player_name: injury.player_name.clone(),
            team_id: injury.team_id,
            injury_type: injury.injury_type.clone(),
            weeks_out: injury.weeks_out,
            status: InjuryStatus::from_weeks_out(injury.weeks_out),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineImportance {
    Minor,
    Notable,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadlineCategory {
    Shootout,
    Shutout,
    Thriller,
    Blowout,
    Deadlock,
}

impl HeadlineCategory {
    pub fn importance(&self) -> HeadlineImportance {
        match self {
            HeadlineCategory::Shootout | HeadlineCategory::Shutout => HeadlineImportance::Major,
            HeadlineCategory::Thriller | HeadlineCategory::Blowout => HeadlineImportance::Notable,
            HeadlineCategory::Deadlock => HeadlineImportance::Minor,
        }
    }

    /// First matching category for a final score, most newsworthy first.
    pub fn classify(home_score: u32, away_score: u32) -> Option<Self> {
        let total = home_score + away_score;
        let margin = home_score.abs_diff(away_score);

        if total >= SHOOTOUT_TOTAL {
            Some(HeadlineCategory::Shootout)
        } else if home_score == 0 || away_score == 0 {
            Some(HeadlineCategory::Shutout)
        } else if margin > 0 && margin <= THRILLER_MARGIN {
            Some(HeadlineCategory::Thriller)
        } else if margin >= BLOWOUT_MARGIN {
            Some(HeadlineCategory::Blowout)
        } else if margin == 0 {
            Some(HeadlineCategory::Deadlock)
        } else {
            None
        }
    }
}

const SHOOTOUT_TOTAL: u32 = 70;
const THRILLER_MARGIN: u32 = 3;
const BLOWOUT_MARGIN: u32 = 21;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub game_id: u32,
    pub category: HeadlineCategory,
    pub importance: HeadlineImportance,
    pub text: String,
}

/// At most `limit` headlines for the week's games, major stories first and
/// schedule order within the same importance.
pub fn headlines(games: &[ScheduledGame], teams: &[Team], limit: usize) -> Vec<Headline> {
    let name = |id: u32| {
        teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("Team {}", id))
    };

    let mut stories: Vec<Headline> = games
        .iter()
        .filter_map(|game| {
            let result = game.result.as_ref()?;
            let category = HeadlineCategory::classify(result.home_score, result.away_score)?;

            let (winner, loser, high, low) = match result.winner_id {
                Some(id) if id == game.away_team_id => (
                    name(game.away_team_id),
                    name(game.home_team_id),
                    result.away_score,
                    result.home_score,
                ),
                _ => (
                    name(game.home_team_id),
                    name(game.away_team_id),
                    result.home_score,
                    result.away_score,
                ),
            };

            let text = match category {
                HeadlineCategory::Shootout if result.winner_id.is_none() => {
                    format!("{} and {} trade blows in a {}-{} shootout", winner, loser, high, low)
                }
                HeadlineCategory::Shootout => {
                    format!("{} outguns {} {}-{} in a shootout", winner, loser, high, low)
                }
                HeadlineCategory::Shutout if result.winner_id.is_none() => {
                    format!("{} and {} play to a scoreless tie", winner, loser)
                }
                HeadlineCategory::Shutout => {
                    format!("{} blanks {} {}-{}", winner, loser, high, low)
                }
                HeadlineCategory::Thriller => {
                    format!("{} edges {} {}-{} in a thriller", winner, loser, high, low)
                }
                HeadlineCategory::Blowout => {
                    format!("{} routs {} {}-{}", winner, loser, high, low)
                }
                HeadlineCategory::Deadlock => {
                    format!("{} and {} settle for a {}-{} tie", winner, loser, high, low)
                }
            };

            Some(Headline {
                game_id: game.id,
                category,
                importance: category.importance(),
                text,
            })
        })
        .collect();

    // stable: keeps schedule order inside an importance band
    stories.sort_by(|a, b| b.importance.cmp(&a.importance));
    stories.truncate(limit);
    stories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: u32, home_score: u32, away_score: u32) -> ScheduledGame {
        let mut game = ScheduledGame::new(id, 1, 1, 2);
        game.complete(home_score, away_score);
        game
    }

    #[test]
    fn test_injury_status_mapping() {
        assert_eq!(InjuryStatus::from_weeks_out(0), InjuryStatus::Probable);
        assert_eq!(InjuryStatus::from_weeks_out(1), InjuryStatus::Questionable);
        assert_eq!(InjuryStatus::from_weeks_out(2), InjuryStatus::Doubtful);
        assert_eq!(InjuryStatus::from_weeks_out(3), InjuryStatus::Out);
        assert_eq!(InjuryStatus::from_weeks_out(12), InjuryStatus::Out);
    }

    #[test]
    fn test_classify_scores() {
        assert_eq!(HeadlineCategory::classify(38, 35), Some(HeadlineCategory::Shootout));
        assert_eq!(HeadlineCategory::classify(17, 0), Some(HeadlineCategory::Shutout));
        assert_eq!(HeadlineCategory::classify(20, 17), Some(HeadlineCategory::Thriller));
        assert_eq!(HeadlineCategory::classify(42, 14), Some(HeadlineCategory::Blowout));
        assert_eq!(HeadlineCategory::classify(20, 20), Some(HeadlineCategory::Deadlock));
        assert_eq!(HeadlineCategory::classify(24, 14), None);
    }

    #[test]
    fn test_headlines_ranked_and_capped() {
        let teams = vec![
            Team::new(1, "Harbor City Gulls", "HCG", "East", "North"),
            Team::new(2, "Mesa Drivers", "MES", "East", "North"),
        ];
        let games = vec![
            game(1, 20, 17),
            game(2, 24, 14),
            game(3, 42, 14),
            game(4, 0, 13),
            game(5, 10, 10),
            game(6, 40, 38),
            game(7, 23, 21),
        ];

        let stories = headlines(&games, &teams, 5);
        let ids: Vec<u32> = stories.iter().map(|h| h.game_id).collect();

        assert_eq!(ids, vec![4, 6, 1, 3, 7]);
        assert_eq!(stories[0].text, "Mesa Drivers blanks Harbor City Gulls 13-0");
        assert_eq!(stories[0].importance, HeadlineImportance::Major);
    }
}
