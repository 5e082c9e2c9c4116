use crate::config::SeasonRules;
use crate::league::Team;
use serde::{Deserialize, Serialize};

/// External facts a gated task or phase is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateContext {
    pub active_roster_size: usize,
    pub roster_limit: usize,
}

impl GateContext {
    pub fn for_team(team: &Team, rules: &SeasonRules) -> Self {
        GateContext {
            active_roster_size: team.active_roster_size(),
            roster_limit: rules.active_roster_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRule {
    RosterWithinLimit,
}

impl GateRule {
    pub fn check(&self, context: &GateContext) -> Result<(), String> {
        match self {
            GateRule::RosterWithinLimit => {
                if context.active_roster_size > context.roster_limit {
                    Err(format!(
                        "Active roster has {} players; cut down to {} before the season starts",
                        context.active_roster_size, context.roster_limit
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Done once the phase screen is visited.
    View,
    /// Done once the user finishes the task's flow.
    Navigate,
    /// Done only while the rule holds.
    Validate(GateRule),
    /// Done on phase entry.
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffSeasonTask {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub action: TaskAction,
    pub completed: bool,
}

impl OffSeasonTask {
    pub fn is_blocking(&self) -> bool {
        self.required && !self.completed
    }
}

/// Static row of the phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub action: TaskAction,
}

impl TaskDefinition {
    pub const fn new(id: &'static str, label: &'static str, required: bool, action: TaskAction) -> Self {
        TaskDefinition {
            id,
            label,
            required,
            action,
        }
    }

    pub fn instantiate(&self) -> OffSeasonTask {
        OffSeasonTask {
            id: self.id.to_string(),
            label: self.label.to_string(),
            required: self.required,
            action: self.action,
            completed: false,
        }
    }
}
