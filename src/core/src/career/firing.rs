use crate::config::SeasonRules;
use crate::random::RandomSource;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything the owner weighs when deciding a GM's fate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FiringContext {
    pub current_patience: u8,
    pub patience_sliding: bool,
    pub owner_patience: u8,
    pub owner_control: u8,
    pub pr_sensitive: bool,
    pub major_scandals: u32,
    pub defiance_events: u32,
    pub consecutive_losing_seasons: u32,
    pub ownership_changed: bool,
}

const SCANDAL_LIMIT: u32 = 2;
const DEFIANCE_LIMIT: u32 = 3;
const CONTROLLING_OWNER: u8 = 70;
const LOSING_SEASON_LIMIT: u32 = 3;
const IMPATIENT_OWNER: u8 = 40;
const HOUSECLEANING_PATIENCE: u8 = 60;

impl FiringContext {
    fn patience_exhausted(&self, threshold: u8) -> bool {
        self.current_patience < threshold
    }

    fn scandal_fallout(&self) -> bool {
        self.major_scandals >= SCANDAL_LIMIT && self.pr_sensitive
    }

    fn repeated_defiance(&self) -> bool {
        self.defiance_events >= DEFIANCE_LIMIT && self.owner_control >= CONTROLLING_OWNER
    }

    fn losing_culture(&self) -> bool {
        self.consecutive_losing_seasons >= LOSING_SEASON_LIMIT && self.owner_patience <= IMPATIENT_OWNER
    }

    fn housecleaning_candidate(&self) -> bool {
        self.ownership_changed && self.current_patience < HOUSECLEANING_PATIENCE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringTrigger {
    PatienceExhausted,
    ScandalFallout,
    RepeatedDefiance,
    LosingSeasons,
    Housecleaning,
}

impl FiringTrigger {
    pub fn reason(&self) -> &'static str {
        match self {
            FiringTrigger::PatienceExhausted => "Patience exhausted",
            FiringTrigger::ScandalFallout => "Repeated scandals embarrassed the franchise",
            FiringTrigger::RepeatedDefiance => "Repeatedly defied ownership",
            FiringTrigger::LosingSeasons => "Consecutive losing seasons",
            FiringTrigger::Housecleaning => "New ownership housecleaning",
        }
    }

    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            FiringTrigger::PatienceExhausted | FiringTrigger::ScandalFallout | FiringTrigger::RepeatedDefiance
        )
    }

    /// Departures the GM had no say in. These pay reduced severance.
    pub fn is_forced(&self) -> bool {
        matches!(self, FiringTrigger::Housecleaning)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringDecision {
    pub should_fire: bool,
    pub is_immediate: bool,
    pub reason: Option<String>,
    pub trigger: Option<FiringTrigger>,
}

impl FiringDecision {
    pub fn retain() -> Self {
        FiringDecision {
            should_fire: false,
            is_immediate: false,
            reason: None,
            trigger: None,
        }
    }

    fn fire(trigger: FiringTrigger) -> Self {
        FiringDecision {
            should_fire: true,
            is_immediate: trigger.is_immediate(),
            reason: Some(trigger.reason().to_string()),
            trigger: Some(trigger),
        }
    }
}

pub struct FiringEngine {
    patience_threshold: u8,
    housecleaning_probability: f64,
}

impl FiringEngine {
    pub fn new(rules: &SeasonRules) -> Self {
        FiringEngine {
            patience_threshold: rules.patience_firing_threshold,
            housecleaning_probability: rules.housecleaning_probability,
        }
    }

    /// First matching rule wins. The random source is only consulted for the
    /// housecleaning check, after every deterministic rule has passed.
    pub fn evaluate(&self, context: &FiringContext, rng: &mut dyn RandomSource) -> FiringDecision {
        let trigger = if context.patience_exhausted(self.patience_threshold) {
            Some(FiringTrigger::PatienceExhausted)
        } else if context.scandal_fallout() {
            Some(FiringTrigger::ScandalFallout)
        } else if context.repeated_defiance() {
            Some(FiringTrigger::RepeatedDefiance)
        } else if context.losing_culture() {
            Some(FiringTrigger::LosingSeasons)
        } else if context.housecleaning_candidate() && rng.chance(self.housecleaning_probability) {
            Some(FiringTrigger::Housecleaning)
        } else {
            None
        };

        match trigger {
            Some(trigger) => {
                debug!("firing triggered: {:?} (patience {})", trigger, context.current_patience);
                FiringDecision::fire(trigger)
            }
            None => FiringDecision::retain(),
        }
    }

    pub fn build_reason(&self, context: &FiringContext, rng: &mut dyn RandomSource) -> FiringReason {
        let category = self.category(context);

        let templates = category.public_templates();
        let public_statement = templates[rng.pick(templates.len()) % templates.len()].to_string();

        FiringReason {
            category,
            public_statement,
            internal_reason: Self::internal_reason(category, context),
        }
    }

    /// Scans categories in fixed priority order and returns the first whose
    /// condition held.
    pub fn category(&self, context: &FiringContext) -> FiringCategory {
        if context.scandal_fallout() {
            FiringCategory::PublicRelations
        } else if context.repeated_defiance() {
            FiringCategory::Relationship
        } else if context.losing_culture() {
            FiringCategory::Expectations
        } else if context.patience_exhausted(self.patience_threshold) {
            FiringCategory::Performance
        } else if context.housecleaning_candidate() {
            FiringCategory::OwnershipChange
        } else {
            FiringCategory::Other
        }
    }

    fn internal_reason(category: FiringCategory, context: &FiringContext) -> String {
        let mut factors = vec![
            format!("{} consecutive losing seasons", context.consecutive_losing_seasons),
            format!("{} defiance events", context.defiance_events),
        ];

        if context.major_scandals > 0 {
            factors.push(format!("{} major scandals", context.major_scandals));
        }

        factors.push(if context.patience_sliding {
            "owner patience in steady decline".to_string()
        } else {
            "no sustained patience decline".to_string()
        });

        format!(
            "{}: {}; final patience {}",
            category.label(),
            factors.join("; "),
            context.current_patience
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringCategory {
    PublicRelations,
    Relationship,
    Expectations,
    Performance,
    OwnershipChange,
    Other,
}

impl FiringCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FiringCategory::PublicRelations => "public relations",
            FiringCategory::Relationship => "relationship with ownership",
            FiringCategory::Expectations => "unmet expectations",
            FiringCategory::Performance => "performance",
            FiringCategory::OwnershipChange => "ownership change",
            FiringCategory::Other => "other",
        }
    }

    fn public_templates(&self) -> &'static [&'static str] {
        match self {
            FiringCategory::PublicRelations => &[
                "The organization has decided a change in leadership is necessary to restore the franchise's reputation.",
                "Recent off-field matters have made it clear that we need to move in a new direction.",
                "We hold ourselves to a standard both on and off the field, and we have decided to make a change.",
            ],
            FiringCategory::Relationship => &[
                "We have decided to part ways due to differences in organizational philosophy.",
                "Ownership and the front office were no longer aligned on the direction of the team.",
                "After careful consideration, we believe new leadership is best for the organization.",
            ],
            FiringCategory::Expectations => &[
                "The results over the past several seasons have not met the expectations of this organization.",
                "Our fans deserve a winning team, and we have not delivered one.",
                "We thank our general manager for their effort, but it is time for a new direction.",
            ],
            FiringCategory::Performance => &[
                "The performance of the team this season has been unacceptable.",
                "We have made the difficult decision to relieve our general manager of their duties.",
                "The on-field product has not reflected the standard we expect.",
            ],
            FiringCategory::OwnershipChange => &[
                "As part of the ownership transition, we are restructuring the front office.",
                "New ownership has chosen to bring in its own leadership team.",
                "With the change in ownership comes a fresh start for the front office.",
            ],
            FiringCategory::Other => &[
                "The organization has decided to make a change at general manager.",
                "We wish our former general manager the best in future endeavors.",
            ],
        }
    }
}

/// Two narratives for the same dismissal. Only `public_statement` is ever
/// shown outside the front office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringReason {
    pub category: FiringCategory,
    pub public_statement: String,
    pub internal_reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;

    fn engine() -> FiringEngine {
        FiringEngine::new(&SeasonRules::default())
    }

    fn calm() -> FiringContext {
        FiringContext {
            current_patience: 55,
            owner_patience: 50,
            owner_control: 50,
            ..FiringContext::default()
        }
    }

    #[test]
    fn test_exhausted_patience_fires_immediately() {
        let contexts = [
            FiringContext {
                current_patience: 15,
                ..calm()
            },
            FiringContext {
                current_patience: 15,
                pr_sensitive: true,
                major_scandals: 4,
                defiance_events: 5,
                owner_control: 90,
                consecutive_losing_seasons: 6,
                owner_patience: 10,
                ownership_changed: true,
                ..calm()
            },
        ];

        for context in contexts {
            let mut rng = FixedRandom::new(false, 0);
            let decision = engine().evaluate(&context, &mut rng);

            assert!(decision.should_fire);
            assert!(decision.is_immediate);
            assert_eq!(decision.reason.as_deref(), Some("Patience exhausted"));
            assert_eq!(rng.chance_calls, 0);
        }
    }

    #[test]
    fn test_scandals_need_pr_sensitive_owner() {
        let mut rng = FixedRandom::new(true, 0);
        let context = FiringContext {
            major_scandals: 2,
            ..calm()
        };

        assert!(!engine().evaluate(&context, &mut rng).should_fire);

        let sensitive = FiringContext {
            pr_sensitive: true,
            ..context
        };
        let decision = engine().evaluate(&sensitive, &mut rng);

        assert!(decision.is_immediate);
        assert_eq!(decision.trigger, Some(FiringTrigger::ScandalFallout));
    }

    #[test]
    fn test_defiance_needs_controlling_owner() {
        let mut rng = FixedRandom::new(true, 0);
        let context = FiringContext {
            defiance_events: 3,
            owner_control: 69,
            ..calm()
        };
        assert!(!engine().evaluate(&context, &mut rng).should_fire);

        let controlling = FiringContext {
            owner_control: 70,
            ..context
        };
        assert_eq!(
            engine().evaluate(&controlling, &mut rng).trigger,
            Some(FiringTrigger::RepeatedDefiance)
        );
    }

    #[test]
    fn test_losing_seasons_fire_at_season_end() {
        let mut rng = FixedRandom::new(true, 0);
        let context = FiringContext {
            consecutive_losing_seasons: 3,
            owner_patience: 40,
            ..calm()
        };

        let decision = engine().evaluate(&context, &mut rng);
        assert!(decision.should_fire);
        assert!(!decision.is_immediate);
        assert_eq!(decision.trigger, Some(FiringTrigger::LosingSeasons));

        let patient_owner = FiringContext {
            owner_patience: 41,
            ..context
        };
        assert!(!engine().evaluate(&patient_owner, &mut rng).should_fire);
    }

    #[test]
    fn test_housecleaning_follows_coin_flip() {
        let context = FiringContext {
            ownership_changed: true,
            current_patience: 59,
            ..calm()
        };

        let mut heads = FixedRandom::new(true, 0);
        let decision = engine().evaluate(&context, &mut heads);
        assert!(decision.should_fire);
        assert!(!decision.is_immediate);
        assert_eq!(decision.trigger, Some(FiringTrigger::Housecleaning));
        assert_eq!(heads.chance_calls, 1);

        let mut tails = FixedRandom::new(false, 0);
        assert_eq!(engine().evaluate(&context, &mut tails), FiringDecision::retain());

        let mut unused = FixedRandom::new(true, 0);
        let secure = FiringContext {
            current_patience: 60,
            ..context
        };
        assert!(!engine().evaluate(&secure, &mut unused).should_fire);
        assert_eq!(unused.chance_calls, 0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let context = FiringContext {
            ownership_changed: true,
            current_patience: 40,
            defiance_events: 2,
            ..calm()
        };

        let first = engine().evaluate(&context, &mut FixedRandom::new(true, 2));
        let second = engine().evaluate(&context, &mut FixedRandom::new(true, 2));

        assert_eq!(first, second);
    }

    #[test]
    fn test_reason_category_priority() {
        let context = FiringContext {
            current_patience: 10,
            pr_sensitive: true,
            major_scandals: 2,
            defiance_events: 3,
            owner_control: 80,
            ..calm()
        };
        assert_eq!(engine().category(&context), FiringCategory::PublicRelations);

        let no_scandal = FiringContext {
            major_scandals: 0,
            ..context
        };
        assert_eq!(engine().category(&no_scandal), FiringCategory::Relationship);

        let performance_only = FiringContext {
            current_patience: 10,
            ..calm()
        };
        assert_eq!(engine().category(&performance_only), FiringCategory::Performance);

        assert_eq!(engine().category(&calm()), FiringCategory::Other);
    }

    #[test]
    fn test_reason_narratives() {
        let context = FiringContext {
            current_patience: 12,
            patience_sliding: true,
            consecutive_losing_seasons: 2,
            defiance_events: 1,
            ..calm()
        };

        let reason = engine().build_reason(&context, &mut FixedRandom::new(false, 1));

        assert_eq!(reason.category, FiringCategory::Performance);
        assert_eq!(
            reason.public_statement,
            "We have made the difficult decision to relieve our general manager of their duties."
        );
        assert_eq!(
            reason.internal_reason,
            "performance: 2 consecutive losing seasons; 1 defiance events; owner patience in steady decline; final patience 12"
        );
        assert!(!reason.public_statement.contains("defiance"));
    }

    #[test]
    fn test_public_template_pick_wraps() {
        let context = FiringContext {
            current_patience: 5,
            ..calm()
        };

        let reason = engine().build_reason(&context, &mut FixedRandom::new(false, 7));
        assert!(FiringCategory::Performance.public_templates().contains(&reason.public_statement.as_str()));
    }
}
