use crate::career::TenureStats;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyTier {
    Disastrous,
    Poor,
    Average,
    Good,
    Excellent,
    Legendary,
}

impl LegacyTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 90 => LegacyTier::Legendary,
            s if s >= 75 => LegacyTier::Excellent,
            s if s >= 60 => LegacyTier::Good,
            s if s >= 40 => LegacyTier::Average,
            s if s >= 20 => LegacyTier::Poor,
            _ => LegacyTier::Disastrous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LegacyTier::Legendary => "legendary",
            LegacyTier::Excellent => "excellent",
            LegacyTier::Good => "good",
            LegacyTier::Average => "average",
            LegacyTier::Poor => "poor",
            LegacyTier::Disastrous => "disastrous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRating {
    pub score: u8,
    pub tier: LegacyTier,
}

const BASE_SCORE: i32 = 50;

pub struct LegacyCalculator;

impl LegacyCalculator {
    pub fn rate(tenure: &TenureStats) -> LegacyRating {
        let score = Self::raw_score(tenure).clamp(0, 100) as u8;

        LegacyRating {
            score,
            tier: LegacyTier::from_score(score),
        }
    }

    /// Unclamped sum of all adjustments.
    pub fn raw_score(tenure: &TenureStats) -> i32 {
        let mut score = BASE_SCORE;

        // Titles
        score += tenure.super_bowl_wins as i32 * 20;
        score += tenure.super_bowl_appearances.saturating_sub(tenure.super_bowl_wins) as i32 * 5;
        score += tenure.conference_championships as i32 * 10;
        score += tenure.division_titles as i32 * 5;

        // Playoff regularity
        let playoff_rate = tenure.playoff_rate();
        if playoff_rate >= 0.7 {
            score += 15;
        } else if playoff_rate >= 0.5 {
            score += 8;
        } else if playoff_rate < 0.2 && tenure.seasons >= 3 {
            score -= 10;
        }

        // Winning
        let win_percentage = tenure.win_percentage;
        if win_percentage >= 0.65 {
            score += 15;
        } else if win_percentage >= 0.55 {
            score += 8;
        } else if win_percentage < 0.40 {
            score -= 15;
        } else if win_percentage < 0.45 {
            score -= 8;
        }

        // Longevity
        if tenure.seasons >= 10 {
            score += 10;
        } else if tenure.seasons >= 5 {
            score += 5;
        } else if tenure.seasons <= 2 {
            score -= 5;
        }

        // Coaching stability
        if tenure.coaches_fired >= 3 {
            score -= 5;
        } else if tenure.coaches_fired == 0 && tenure.seasons >= 3 {
            score += 5;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_year_tenure() -> TenureStats {
        TenureStats {
            seasons: 5,
            wins: 40,
            losses: 40,
            win_percentage: 0.5,
            playoff_appearances: 3,
            division_titles: 1,
            ..TenureStats::default()
        }
    }

    #[test]
    fn test_tier_cutoffs() {
        assert_eq!(LegacyTier::from_score(100), LegacyTier::Legendary);
        assert_eq!(LegacyTier::from_score(90), LegacyTier::Legendary);
        assert_eq!(LegacyTier::from_score(89), LegacyTier::Excellent);
        assert_eq!(LegacyTier::from_score(75), LegacyTier::Excellent);
        assert_eq!(LegacyTier::from_score(60), LegacyTier::Good);
        assert_eq!(LegacyTier::from_score(59), LegacyTier::Average);
        assert_eq!(LegacyTier::from_score(40), LegacyTier::Average);
        assert_eq!(LegacyTier::from_score(20), LegacyTier::Poor);
        assert_eq!(LegacyTier::from_score(19), LegacyTier::Disastrous);
    }

    #[test]
    fn test_five_year_middling_tenure() {
        // 50 base, +5 division title, +8 playoff rate 0.6, +5 five seasons,
        // +5 no coaching firings over three or more seasons.
        let rating = LegacyCalculator::rate(&five_year_tenure());

        assert_eq!(LegacyCalculator::raw_score(&five_year_tenure()), 73);
        assert_eq!(rating.score, 73);
        assert_eq!(rating.tier, LegacyTier::Good);
    }

    #[test]
    fn test_short_losing_tenure() {
        let tenure = TenureStats {
            seasons: 2,
            wins: 9,
            losses: 25,
            win_percentage: 9.0 / 34.0,
            coaches_fired: 3,
            ..TenureStats::default()
        };

        // 50 - 15 - 5 - 5
        assert_eq!(LegacyCalculator::rate(&tenure).score, 25);
        assert_eq!(LegacyCalculator::rate(&tenure).tier, LegacyTier::Poor);
    }

    #[test]
    fn test_playoff_drought_penalty() {
        let tenure = TenureStats {
            seasons: 6,
            wins: 45,
            losses: 57,
            win_percentage: 45.0 / 102.0,
            playoff_appearances: 1,
            coaches_fired: 1,
            ..TenureStats::default()
        };

        // 50 - 10 (rate 0.17) - 8 (win% 0.44) + 5 (six seasons)
        assert_eq!(LegacyCalculator::raw_score(&tenure), 37);
    }

    #[test]
    fn test_score_is_clamped() {
        let dynasty = TenureStats {
            seasons: 12,
            wins: 160,
            losses: 44,
            win_percentage: 160.0 / 204.0,
            playoff_appearances: 12,
            division_titles: 11,
            conference_championships: 6,
            super_bowl_appearances: 6,
            super_bowl_wins: 4,
            ..TenureStats::default()
        };

        assert!(LegacyCalculator::raw_score(&dynasty) > 100);
        assert_eq!(LegacyCalculator::rate(&dynasty).score, 100);
        assert_eq!(LegacyCalculator::rate(&dynasty).tier, LegacyTier::Legendary);
    }

    #[test]
    fn test_monotonic_in_championships() {
        let mut previous = 0;

        for wins in 0..6 {
            let tenure = TenureStats {
                seasons: 8,
                wins: 70,
                losses: 66,
                win_percentage: 70.0 / 136.0,
                playoff_appearances: 6,
                conference_championships: 6,
                super_bowl_appearances: 6,
                super_bowl_wins: wins,
                ..TenureStats::default()
            };

            let score = LegacyCalculator::rate(&tenure).score;
            assert!(score >= previous);
            previous = score;
        }
    }
}
