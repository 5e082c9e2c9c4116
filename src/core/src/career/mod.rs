mod firing;
mod legacy;
mod owner;
mod patience;
mod record;
mod severance;
mod tenure;

pub use firing::*;
pub use legacy::*;
pub use owner::*;
pub use patience::*;
pub use record::*;
pub use severance::*;
pub use tenure::*;

use crate::config::SeasonRules;
use crate::error::ValidationError;
use crate::league::TeamRecord;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The controlled GM's job: who they work for, how long they have lasted
/// and how the owner feels about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerState {
    pub gm: GeneralManager,
    pub owner: OwnerProfile,
    pub contract: GmContract,
    pub tenure: TenureStats,
    pub patience_meters: BTreeMap<u32, PatienceMeterState>,
    pub relations: OwnerRelations,
    pub consecutive_losing_seasons: u32,
    pub dismissal: Option<FiringRecord>,
}

impl CareerState {
    pub fn new(gm: GeneralManager, owner: OwnerProfile, contract: GmContract) -> Self {
        CareerState {
            gm,
            owner,
            contract,
            tenure: TenureStats::default(),
            patience_meters: BTreeMap::new(),
            relations: OwnerRelations::default(),
            consecutive_losing_seasons: 0,
            dismissal: None,
        }
    }

    /// Starts a fresh job. Everything tied to the previous tenure is dropped.
    pub fn hire(&mut self, gm: GeneralManager, owner: OwnerProfile, contract: GmContract) {
        info!("{} hired as general manager of team {}", gm.name, gm.team_id);

        *self = CareerState::new(gm, owner, contract);
    }

    pub fn is_employed(&self) -> bool {
        self.dismissal.is_none()
    }

    pub fn controlled_team_id(&self) -> u32 {
        self.gm.team_id
    }

    /// Meter for the current owner, if one has been started.
    pub fn patience(&self) -> Option<&PatienceMeterState> {
        self.patience_meters.get(&self.owner.id)
    }

    pub fn current_patience(&self, rules: &SeasonRules) -> u8 {
        self.patience()
            .map(|meter| meter.current_value)
            .unwrap_or(rules.initial_patience)
    }

    fn patience_meter_mut(&mut self, rules: &SeasonRules) -> &mut PatienceMeterState {
        let owner_id = self.owner.id;

        self.patience_meters
            .entry(owner_id)
            .or_insert_with(|| PatienceMeterState::new(owner_id, rules.initial_patience))
    }

    pub fn apply_weekly_patience(&mut self, record: &TeamRecord, week: u8, year: u16, rules: &SeasonRules) -> i32 {
        let owner_patience = self.owner.patience;

        self.patience_meter_mut(rules)
            .weekly_update(record, owner_patience, week, year)
    }

    /// Folds a finished season into the tenure.
    pub fn close_season(&mut self, season: &SeasonSummary) {
        self.tenure.record_season(season);

        if season.is_losing() {
            self.consecutive_losing_seasons += 1;
        } else {
            self.consecutive_losing_seasons = 0;
        }
    }

    pub fn firing_context(&self, rules: &SeasonRules) -> FiringContext {
        FiringContext {
            current_patience: self.current_patience(rules),
            patience_sliding: self.patience().is_some_and(|meter| meter.is_sliding()),
            owner_patience: self.owner.patience,
            owner_control: self.owner.control,
            pr_sensitive: self.owner.pr_sensitive,
            major_scandals: self.relations.major_scandals,
            defiance_events: self.relations.defiance_events,
            consecutive_losing_seasons: self.consecutive_losing_seasons,
            ownership_changed: self.relations.ownership_changed,
        }
    }

    pub fn build_firing_record(
        &self,
        decision: &FiringDecision,
        reason: FiringReason,
        year: u16,
        week: u8,
        rules: &SeasonRules,
    ) -> Result<FiringRecord, ValidationError> {
        let forced = decision.trigger.is_some_and(|trigger| trigger.is_forced());
        let severance = SeveranceCalculator::calculate(&self.contract, &self.tenure, forced)?;

        let record = FiringRecord {
            gm_id: self.gm.id,
            gm_name: self.gm.name.clone(),
            team_id: self.gm.team_id,
            owner_id: self.owner.id,
            year,
            week,
            reason,
            tenure: self.tenure.clone(),
            severance,
            legacy: LegacyCalculator::rate(&self.tenure),
            final_patience: self.current_patience(rules),
            forced,
            immediate: decision.is_immediate,
        };

        record.validate()?;

        Ok(record)
    }

    /// New owner takes over. Their meter starts fresh the first time it is
    /// used, and the next review considers housecleaning.
    pub fn change_ownership(&mut self, owner: OwnerProfile) {
        info!("ownership of team {} changed to {}", self.gm.team_id, owner.name);

        self.owner = owner;
        self.relations.ownership_changed = true;
    }

    pub fn record_scandal(&mut self) {
        self.relations.major_scandals += 1;
    }

    pub fn record_defiance(&mut self) {
        self.relations.defiance_events += 1;
    }

    pub fn record_coach_hired(&mut self) {
        self.tenure.coaches_hired += 1;
    }

    pub fn record_coach_fired(&mut self) {
        self.tenure.coaches_fired += 1;
    }

    pub fn record_free_agent_signing(&mut self) {
        self.tenure.free_agent_signings += 1;
    }

    pub fn record_first_round_pick(&mut self) {
        self.tenure.first_round_picks += 1;
    }
}
