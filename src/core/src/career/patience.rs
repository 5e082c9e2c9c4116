use crate::league::TeamRecord;
use serde::{Deserialize, Serialize};

pub const PATIENCE_MIN: u8 = 0;
pub const PATIENCE_MAX: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatienceHistoryEntry {
    pub week: u8,
    pub year: u16,
    pub delta: i32,
    pub description: String,
}

/// The owner's tolerance for the current GM. Lives from the first weekly
/// update with this owner until a new GM is hired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatienceMeterState {
    pub owner_id: u32,
    pub current_value: u8,
    pub history: Vec<PatienceHistoryEntry>,
    pub consecutive_declines: u32,
}

impl PatienceMeterState {
    pub fn new(owner_id: u32, initial_value: u8) -> Self {
        PatienceMeterState {
            owner_id,
            current_value: initial_value.min(PATIENCE_MAX),
            history: Vec::new(),
            consecutive_declines: 0,
        }
    }

    /// Applies a change and records it. The value is clamped to [0, 100].
    pub fn apply(&mut self, delta: i32, week: u8, year: u16, description: impl Into<String>) {
        let next = (self.current_value as i32).saturating_add(delta).clamp(PATIENCE_MIN as i32, PATIENCE_MAX as i32);
        self.current_value = next as u8;

        if delta < 0 {
            self.consecutive_declines += 1;
        } else {
            self.consecutive_declines = 0;
        }

        self.history.push(PatienceHistoryEntry {
            week,
            year,
            delta,
            description: description.into(),
        });
    }

    /// One week of owner reaction to the team's record.
    pub fn weekly_update(&mut self, record: &TeamRecord, owner_patience: u8, week: u8, year: u16) -> i32 {
        let win_percentage = record.win_percentage();
        let delta = PatienceMeter::weekly_delta(win_percentage, owner_patience);

        let description = format!(
            "Week {}: {} ({})",
            week,
            PatienceMeter::describe(win_percentage),
            record
        );

        self.apply(delta, week, year, description);
        delta
    }

    pub fn is_sliding(&self) -> bool {
        self.consecutive_declines >= DECLINE_STREAK
    }
}

/// Declines in a row that count as a slide in internal reports.
pub const DECLINE_STREAK: u32 = 3;

pub struct PatienceMeter;

impl PatienceMeter {
    pub fn base_delta(win_percentage: f64) -> i32 {
        match win_percentage {
            p if p >= 0.70 => 3,
            p if p >= 0.50 => 1,
            p if p >= 0.35 => -2,
            _ => -4,
        }
    }

    pub fn trait_multiplier(owner_patience: u8) -> f64 {
        match owner_patience {
            p if p < 30 => 1.5,
            p if p > 70 => 0.5,
            _ => 1.0,
        }
    }

    pub fn weekly_delta(win_percentage: f64, owner_patience: u8) -> i32 {
        let scaled = Self::base_delta(win_percentage) as f64 * Self::trait_multiplier(owner_patience);
        scaled.round() as i32
    }

    pub fn describe(win_percentage: f64) -> &'static str {
        match win_percentage {
            p if p >= 0.70 => "owner thrilled with results",
            p if p >= 0.50 => "owner satisfied",
            p if p >= 0.35 => "owner growing concerned",
            _ => "owner frustrated by losing",
        }
    }
}
