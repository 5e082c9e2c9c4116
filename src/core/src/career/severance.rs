use crate::career::{GmContract, TenureStats};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

const CHAMPIONSHIP_BONUS: u64 = 500_000;
const CONFERENCE_TITLE_BONUS: u64 = 200_000;
const WINNING_BONUS: u64 = 100_000;
const WINNING_BONUS_THRESHOLD: f64 = 0.6;

const FORCED_MODIFIER: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverancePackage {
    pub base: u64,
    pub bonus: u64,
    pub total: u64,
    pub description: String,
}

impl SeverancePackage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        // base and bonus are rounded on their own, so the total may differ by one
        if self.total.abs_diff(self.base + self.bonus) > 1 {
            return Err(ValidationError::SeveranceMismatch { total: self.total });
        }

        Ok(())
    }
}

pub struct SeveranceCalculator;

impl SeveranceCalculator {
    pub fn calculate(
        contract: &GmContract,
        tenure: &TenureStats,
        was_forced: bool,
    ) -> Result<SeverancePackage, ValidationError> {
        tenure.validate()?;

        let modifier = if was_forced { FORCED_MODIFIER } else { 1.0 };

        let base = contract.years_remaining as u64 * contract.annual_salary;
        let bonus = Self::performance_bonus(tenure);

        let total = ((base + bonus) as f64 * modifier).round() as u64;

        Ok(SeverancePackage {
            base: (base as f64 * modifier).round() as u64,
            bonus: (bonus as f64 * modifier).round() as u64,
            total,
            description: Self::describe(total).to_string(),
        })
    }

    pub fn performance_bonus(tenure: &TenureStats) -> u64 {
        let mut bonus = tenure.super_bowl_wins as u64 * CHAMPIONSHIP_BONUS
            + tenure.conference_championships as u64 * CONFERENCE_TITLE_BONUS;

        if tenure.win_percentage >= WINNING_BONUS_THRESHOLD {
            bonus += WINNING_BONUS;
        }

        bonus
    }

    pub fn describe(total: u64) -> &'static str {
        match total {
            0 => "no severance due",
            t if t < 1_000_000 => "modest severance package",
            t if t < 5_000_000 => "standard severance package",
            t if t < 10_000_000 => "substantial severance package",
            _ => "golden parachute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(annual_salary: u64, years_remaining: u32) -> GmContract {
        GmContract {
            annual_salary,
            years_remaining,
        }
    }

    fn champion_tenure() -> TenureStats {
        TenureStats {
            seasons: 4,
            wins: 13,
            losses: 7,
            win_percentage: 0.65,
            playoff_appearances: 2,
            conference_championships: 1,
            super_bowl_appearances: 1,
            super_bowl_wins: 1,
            ..TenureStats::default()
        }
    }

    #[test]
    fn test_single_championship_payout() {
        let tenure = TenureStats {
            conference_championships: 0,
            ..champion_tenure()
        };

        let package = SeveranceCalculator::calculate(&contract(3_000_000, 2), &tenure, false).unwrap();

        // 2 x 3,000,000 + 500,000 + 100,000
        assert_eq!(package.base, 6_000_000);
        assert_eq!(package.bonus, 600_000);
        assert_eq!(package.total, 6_600_000);
        assert_eq!(package.description, "substantial severance package");
    }

    #[test]
    fn test_conference_titles_add_to_bonus() {
        let package = SeveranceCalculator::calculate(&contract(3_000_000, 2), &champion_tenure(), false).unwrap();

        assert_eq!(package.bonus, 800_000);
        assert_eq!(package.total, 6_800_000);
    }

    #[test]
    fn test_forced_departure_is_discounted() {
        let tenure = champion_tenure();

        for years in 0..5 {
            let unforced = SeveranceCalculator::calculate(&contract(2_500_000, years), &tenure, false).unwrap();
            let forced = SeveranceCalculator::calculate(&contract(2_500_000, years), &tenure, true).unwrap();

            assert!(forced.total <= unforced.total);
            assert!(forced.validate().is_ok());
        }

        let forced = SeveranceCalculator::calculate(&contract(4_000_000, 1), &TenureStats::default(), true).unwrap();
        assert_eq!(forced.base, 3_000_000);
        assert_eq!(forced.total, 3_000_000);
        assert_eq!(forced.description, "standard severance package");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(SeveranceCalculator::describe(0), "no severance due");
        assert_eq!(SeveranceCalculator::describe(999_999), "modest severance package");
        assert_eq!(SeveranceCalculator::describe(1_000_000), "standard severance package");
        assert_eq!(SeveranceCalculator::describe(9_999_999), "substantial severance package");
        assert_eq!(SeveranceCalculator::describe(10_000_000), "golden parachute");
    }

    #[test]
    fn test_expired_contract_pays_nothing() {
        let package = SeveranceCalculator::calculate(&contract(3_000_000, 0), &TenureStats::default(), false).unwrap();

        assert_eq!(package.total, 0);
        assert_eq!(package.description, "no severance due");
    }

    #[test]
    fn test_invalid_tenure_is_rejected() {
        let tenure = TenureStats {
            super_bowl_wins: 1,
            ..TenureStats::default()
        };

        assert!(SeveranceCalculator::calculate(&contract(1_000_000, 1), &tenure, false).is_err());
    }
}
