use crate::career::{FiringReason, LegacyRating, SeverancePackage, TenureStats};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Snapshot taken once, at the moment a GM is let go. Never updated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringRecord {
    pub gm_id: u32,
    pub gm_name: String,
    pub team_id: u32,
    pub owner_id: u32,
    pub year: u16,
    pub week: u8,
    pub reason: FiringReason,
    pub tenure: TenureStats,
    pub severance: SeverancePackage,
    pub legacy: LegacyRating,
    pub final_patience: u8,
    pub forced: bool,
    pub immediate: bool,
}

impl FiringRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tenure.validate()?;
        self.severance.validate()?;

        if self.legacy.score > 100 {
            return Err(ValidationError::ScoreOutOfRange {
                field: "legacy score",
                value: self.legacy.score as i64,
            });
        }

        if self.final_patience > 100 {
            return Err(ValidationError::ScoreOutOfRange {
                field: "final patience",
                value: self.final_patience as i64,
            });
        }

        if self.reason.public_statement.trim().is_empty() {
            return Err(ValidationError::MissingStatement("public statement"));
        }

        if self.reason.internal_reason.trim().is_empty() {
            return Err(ValidationError::MissingStatement("internal reason"));
        }

        Ok(())
    }

    /// Text safe to show outside the front office.
    pub fn public_summary(&self) -> String {
        let record = if self.tenure.ties > 0 {
            format!("{}-{}-{}", self.tenure.wins, self.tenure.losses, self.tenure.ties)
        } else {
            format!("{}-{}", self.tenure.wins, self.tenure.losses)
        };

        let seasons = match self.tenure.seasons {
            1 => "1 season".to_string(),
            n => format!("{} seasons", n),
        };

        format!(
            "{} dismissed after {} ({}). {} Severance: {}. Legacy: {} ({}).",
            self.gm_name,
            seasons,
            record,
            self.reason.public_statement,
            self.severance.description,
            self.legacy.tier.label(),
            self.legacy.score
        )
    }
}
