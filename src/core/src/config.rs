use serde::{Deserialize, Serialize};

/// League-wide constants. A rule change (season length, playoff field,
/// roster cap) is made here and nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRules {
    pub preseason_weeks: u8,
    pub regular_season_weeks: u8,
    /// Last playoff week; playoffs start the week after the regular season.
    pub final_playoff_week: u8,
    /// Decisive games per team. One of the scheduled weeks is a bye.
    pub games_per_team: u8,

    pub implications_from_week: u8,
    pub elimination_from_week: u8,
    pub division_clinch_from_week: u8,
    pub wildcard_clinch_from_week: u8,

    pub playoff_seeds: usize,
    pub active_roster_limit: usize,
    pub max_headlines: usize,

    pub initial_patience: u8,
    pub patience_firing_threshold: u8,
    pub housecleaning_probability: f64,
}

impl SeasonRules {
    pub fn first_playoff_week(&self) -> u8 {
        self.regular_season_weeks + 1
    }

    pub fn is_regular_season_week(&self, week: u8) -> bool {
        week >= 1 && week <= self.regular_season_weeks
    }

    pub fn is_playoff_week(&self, week: u8) -> bool {
        week > self.regular_season_weeks && week <= self.final_playoff_week
    }

    /// Decisive games a team still has to play given how many it already played.
    pub fn games_remaining(&self, played: u32) -> u32 {
        (self.games_per_team as u32).saturating_sub(played)
    }
}

impl Default for SeasonRules {
    fn default() -> Self {
        SeasonRules {
            preseason_weeks: 4,
            regular_season_weeks: 18,
            final_playoff_week: 22,
            games_per_team: 17,
            implications_from_week: 10,
            elimination_from_week: 12,
            division_clinch_from_week: 14,
            wildcard_clinch_from_week: 15,
            playoff_seeds: 7,
            active_roster_limit: 53,
            max_headlines: 5,
            initial_patience: 50,
            patience_firing_threshold: 20,
            housecleaning_probability: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_classification() {
        let rules = SeasonRules::default();

        assert!(rules.is_regular_season_week(1));
        assert!(rules.is_regular_season_week(18));
        assert!(!rules.is_regular_season_week(19));
        assert!(rules.is_playoff_week(19));
        assert!(rules.is_playoff_week(22));
        assert!(!rules.is_playoff_week(23));
        assert_eq!(rules.first_playoff_week(), 19);
    }

    #[test]
    fn test_games_remaining_never_underflows() {
        let rules = SeasonRules::default();

        assert_eq!(rules.games_remaining(0), 17);
        assert_eq!(rules.games_remaining(15), 2);
        assert_eq!(rules.games_remaining(20), 0);
    }
}
