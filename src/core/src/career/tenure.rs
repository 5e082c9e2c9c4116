use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Cumulative record of a GM's current job. Created at hire, updated once
/// per completed season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenureStats {
    pub seasons: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_percentage: f64,
    pub playoff_appearances: u32,
    pub division_titles: u32,
    pub conference_championships: u32,
    pub super_bowl_appearances: u32,
    pub super_bowl_wins: u32,
    pub coaches_hired: u32,
    pub coaches_fired: u32,
    pub free_agent_signings: u32,
    pub first_round_picks: u32,
}

/// What one finished season adds to a tenure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub made_playoffs: bool,
    pub division_title: bool,
    pub conference_title: bool,
    pub championship_appearance: bool,
    pub championship_win: bool,
}

impl SeasonSummary {
    pub fn is_losing(&self) -> bool {
        let played = self.wins + self.losses + self.ties;
        played > 0 && (self.wins as f64 + self.ties as f64 * 0.5) / (played as f64) < 0.5
    }
}

impl TenureStats {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    fn computed_win_percentage(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => (self.wins as f64 + self.ties as f64 * 0.5) / games as f64,
        }
    }

    pub fn record_season(&mut self, season: &SeasonSummary) {
        self.seasons += 1;
        self.wins += season.wins;
        self.losses += season.losses;
        self.ties += season.ties;
        self.win_percentage = self.computed_win_percentage();

        self.playoff_appearances += season.made_playoffs as u32;
        self.division_titles += season.division_title as u32;
        self.conference_championships += season.conference_title as u32;
        self.super_bowl_appearances += season.championship_appearance as u32;
        self.super_bowl_wins += season.championship_win as u32;
    }

    pub fn playoff_rate(&self) -> f64 {
        if self.seasons == 0 {
            return 0.0;
        }

        self.playoff_appearances as f64 / self.seasons as f64
    }

    /// The single gate for tenure data: nothing downstream (severance,
    /// legacy, display) may use a tenure that fails here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.win_percentage.is_finite() || !(0.0..=1.0).contains(&self.win_percentage) {
            return Err(ValidationError::WinPercentageOutOfRange(self.win_percentage));
        }

        if self.super_bowl_wins > self.super_bowl_appearances {
            return Err(ValidationError::ChampionshipWinsExceedAppearances {
                wins: self.super_bowl_wins,
                appearances: self.super_bowl_appearances,
            });
        }

        for (field, value) in [
            ("playoff appearances", self.playoff_appearances),
            ("division titles", self.division_titles),
            ("conference championships", self.conference_championships),
            ("championship appearances", self.super_bowl_appearances),
        ] {
            if value > self.seasons {
                return Err(ValidationError::ExceedsSeasons {
                    field,
                    value,
                    seasons: self.seasons,
                });
            }
        }

        if self.games() > 0 {
            let expected = self.computed_win_percentage();
            if (expected - self.win_percentage).abs() > WIN_PERCENTAGE_TOLERANCE {
                return Err(ValidationError::WinPercentageMismatch {
                    recorded: self.win_percentage,
                    expected,
                });
            }
        }

        Ok(())
    }
}

/// Stored percentages are often rounded to three places.
const WIN_PERCENTAGE_TOLERANCE: f64 = 0.001;
