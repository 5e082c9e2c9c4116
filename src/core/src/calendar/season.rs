use crate::config::SeasonRules;
use crate::offseason::OffSeasonPhase;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStage {
    Preseason { week: u8 },
    RegularSeason { week: u8 },
    /// Weeks continue from the regular season (19-22 by default).
    Playoffs { week: u8 },
    Offseason { phase: OffSeasonPhase },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    pub year: u16,
    pub stage: SeasonStage,
}

impl SeasonCalendar {
    pub fn new(year: u16) -> Self {
        SeasonCalendar {
            year,
            stage: SeasonStage::Preseason { week: 1 },
        }
    }

    pub fn at(year: u16, stage: SeasonStage) -> Self {
        SeasonCalendar { year, stage }
    }

    /// Schedule week with games, if the calendar is in one.
    pub fn game_week(&self) -> Option<u8> {
        match self.stage {
            SeasonStage::RegularSeason { week } | SeasonStage::Playoffs { week } => Some(week),
            _ => None,
        }
    }

    pub fn is_offseason(&self) -> bool {
        matches!(self.stage, SeasonStage::Offseason { .. })
    }

    /// Where the calendar lands once the current week is done. The offseason
    /// never moves by week.
    pub fn after_week(&self, rules: &SeasonRules) -> Self {
        let stage = match self.stage {
            SeasonStage::Preseason { week } if week >= rules.preseason_weeks => SeasonStage::RegularSeason { week: 1 },
            SeasonStage::Preseason { week } => SeasonStage::Preseason { week: week + 1 },
            SeasonStage::RegularSeason { week } if week >= rules.regular_season_weeks => SeasonStage::Playoffs {
                week: rules.first_playoff_week(),
            },
            SeasonStage::RegularSeason { week } => SeasonStage::RegularSeason { week: week + 1 },
            SeasonStage::Playoffs { week } if week >= rules.final_playoff_week => SeasonStage::Offseason {
                phase: OffSeasonPhase::first(),
            },
            SeasonStage::Playoffs { week } => SeasonStage::Playoffs { week: week + 1 },
            offseason @ SeasonStage::Offseason { .. } => offseason,
        };

        SeasonCalendar { year: self.year, stage }
    }

    pub fn with_phase(&self, phase: OffSeasonPhase) -> Self {
        SeasonCalendar {
            year: self.year,
            stage: SeasonStage::Offseason { phase },
        }
    }

    pub fn start_of_next_season(&self) -> Self {
        SeasonCalendar::new(self.year + 1)
    }
}

impl fmt::Display for SeasonCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            SeasonStage::Preseason { week } => write!(f, "{} preseason week {}", self.year, week),
            SeasonStage::RegularSeason { week } => write!(f, "{} week {}", self.year, week),
            SeasonStage::Playoffs { week } => write!(f, "{} playoffs week {}", self.year, week),
            SeasonStage::Offseason { phase } => write!(f, "{} offseason: {}", self.year, phase.label()),
        }
    }
}
