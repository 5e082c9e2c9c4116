use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub id: u32,
    pub name: String,
    /// 0-100, low values react harder to every result.
    pub patience: u8,
    /// 0-100, how much the owner expects to be obeyed.
    pub control: u8,
    pub pr_sensitive: bool,
}

impl OwnerProfile {
    pub fn new(id: u32, name: impl Into<String>, patience: u8, control: u8, pr_sensitive: bool) -> Self {
        OwnerProfile {
            id,
            name: name.into(),
            patience: patience.min(100),
            control: control.min(100),
            pr_sensitive,
        }
    }
}

/// Off-field events the owner keeps score of during a GM's tenure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRelations {
    pub major_scandals: u32,
    pub defiance_events: u32,
    /// Set when the franchise changes hands; cleared once the season-end
    /// review has considered it.
    pub ownership_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralManager {
    pub id: u32,
    pub name: String,
    pub team_id: u32,
}

impl GeneralManager {
    pub fn new(id: u32, name: impl Into<String>, team_id: u32) -> Self {
        GeneralManager {
            id,
            name: name.into(),
            team_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmContract {
    pub annual_salary: u64,
    pub years_remaining: u32,
}
