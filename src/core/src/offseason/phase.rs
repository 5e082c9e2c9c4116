use crate::offseason::TaskAction::{Auto, Navigate, Validate, View};
use crate::offseason::{GateRule, TaskDefinition};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffSeasonPhase {
    SeasonReview,
    CoachingDecisions,
    ContractDecisions,
    Combine,
    FreeAgency,
    DraftPreparation,
    Draft,
    UndraftedFreeAgency,
    RookieCamp,
    OrganizedTeamActivities,
    TrainingCamp,
    FinalCuts,
}

pub struct PhaseDefinition {
    pub phase: OffSeasonPhase,
    pub label: &'static str,
    pub tasks: &'static [TaskDefinition],
    /// Checked on top of the task list before the phase may be left.
    pub gate: Option<GateRule>,
}

/// The offseason in order. Reordering or adding phases is an edit here.
pub static PHASES: [PhaseDefinition; 12] = [
    PhaseDefinition {
        phase: OffSeasonPhase::SeasonReview,
        label: "Season Review",
        tasks: &[
            TaskDefinition::new("archive_season", "Archive season statistics", true, Auto),
            TaskDefinition::new("review_season", "Review the season recap", true, View),
            TaskDefinition::new("owner_meeting", "Meet with ownership", false, View),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::CoachingDecisions,
        label: "Coaching Decisions",
        tasks: &[
            TaskDefinition::new("evaluate_staff", "Evaluate the coaching staff", true, Navigate),
            TaskDefinition::new("hire_coordinators", "Fill coordinator vacancies", false, Navigate),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::ContractDecisions,
        label: "Contract Decisions",
        tasks: &[
            TaskDefinition::new("expiring_contracts", "Resolve expiring contracts", true, Navigate),
            TaskDefinition::new("franchise_tag", "Apply the franchise tag", false, Navigate),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::Combine,
        label: "Scouting Combine",
        tasks: &[
            TaskDefinition::new("grade_prospects", "Grade combine prospects", true, Auto),
            TaskDefinition::new("combine_results", "View combine results", true, View),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::FreeAgency,
        label: "Free Agency",
        tasks: &[
            TaskDefinition::new("free_agent_market", "Review the free agent market", true, View),
            TaskDefinition::new("sign_free_agents", "Sign free agents", false, Navigate),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::DraftPreparation,
        label: "Draft Preparation",
        tasks: &[
            TaskDefinition::new("draft_board", "Review the draft board", true, View),
            TaskDefinition::new("prospect_visits", "Schedule prospect visits", false, Navigate),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::Draft,
        label: "Draft",
        tasks: &[TaskDefinition::new("complete_draft", "Complete the draft", true, Navigate)],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::UndraftedFreeAgency,
        label: "Undrafted Free Agency",
        tasks: &[
            TaskDefinition::new("release_unsigned", "Release unsigned prospects", true, Auto),
            TaskDefinition::new("sign_undrafted", "Sign undrafted players", false, Navigate),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::RookieCamp,
        label: "Rookie Camp",
        tasks: &[
            TaskDefinition::new("run_rookie_camp", "Run rookie camp", true, Auto),
            TaskDefinition::new("rookie_reports", "Read rookie reports", false, View),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::OrganizedTeamActivities,
        label: "Organized Team Activities",
        tasks: &[
            TaskDefinition::new("run_otas", "Run organized team activities", true, Auto),
            TaskDefinition::new("depth_chart_preview", "Preview the depth chart", false, View),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::TrainingCamp,
        label: "Training Camp",
        tasks: &[
            TaskDefinition::new("run_training_camp", "Run training camp", true, Auto),
            TaskDefinition::new("set_depth_chart", "Set the depth chart", true, Navigate),
        ],
        gate: None,
    },
    PhaseDefinition {
        phase: OffSeasonPhase::FinalCuts,
        label: "Final Cuts",
        tasks: &[
            TaskDefinition::new(
                "cut_to_limit",
                "Cut the roster to the active limit",
                true,
                Validate(GateRule::RosterWithinLimit),
            ),
            TaskDefinition::new("practice_squad", "Sign a practice squad", false, Navigate),
        ],
        gate: Some(GateRule::RosterWithinLimit),
    },
];

impl OffSeasonPhase {
    pub fn first() -> Self {
        PHASES[0].phase
    }

    pub fn definition(&self) -> &'static PhaseDefinition {
        &PHASES[self.index()]
    }

    /// Zero-based position in the offseason.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// One-based, as shown to the user.
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    pub fn next(&self) -> Option<Self> {
        PHASES.get(self.index() + 1).map(|definition| definition.phase)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn label(&self) -> &'static str {
        self.definition().label
    }
}
