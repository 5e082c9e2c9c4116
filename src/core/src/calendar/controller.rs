use crate::calendar::{SeasonCalendar, SeasonStage};
use crate::career::{FiringContext, FiringDecision, FiringEngine, FiringRecord, SeasonSummary};
use crate::config::SeasonRules;
use crate::error::SeasonError;
use crate::league::{PlayoffBracket, ScheduledGame, Standings, TeamRecord};
use crate::offseason::{GateContext, OffSeasonState, PhaseAdvance};
use crate::random::RandomSource;
use crate::simulation::{GameEngine, WeekRequest, WeekResults, WeekSimulator};
use crate::state::LeagueState;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceReport {
    pub from: SeasonCalendar,
    pub to: SeasonCalendar,
    pub week_results: Option<WeekResults>,
    pub patience_delta: Option<i32>,
    /// A non-immediate firing decision reached mid-season. It only takes
    /// effect at the season-end review.
    pub owner_warning: Option<String>,
}

impl AdvanceReport {
    fn transition(from: SeasonCalendar, to: SeasonCalendar) -> Self {
        AdvanceReport {
            from,
            to,
            week_results: None,
            patience_delta: None,
            owner_warning: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdvanceOutcome {
    Continue {
        state: LeagueState,
        report: AdvanceReport,
    },
    /// The state is the one passed in, untouched apart from the dismissal
    /// stored on the career.
    Fired {
        state: LeagueState,
        record: FiringRecord,
    },
    /// Nothing happened; the reason is meant for the user.
    Blocked {
        reason: String,
    },
}

pub struct SeasonController {
    rules: SeasonRules,
    simulate_own_game: bool,
}

impl SeasonController {
    pub fn new(rules: SeasonRules, simulate_own_game: bool) -> Self {
        SeasonController {
            rules,
            simulate_own_game,
        }
    }

    pub fn rules(&self) -> &SeasonRules {
        &self.rules
    }

    /// One "advance" action: a preseason week, a simulated week or an
    /// offseason phase.
    pub fn advance(
        &self,
        state: &LeagueState,
        engine: &dyn GameEngine,
        rng: &mut dyn RandomSource,
    ) -> Result<AdvanceOutcome, SeasonError> {
        if let Some(record) = &state.career.dismissal {
            return Ok(AdvanceOutcome::Blocked {
                reason: format!(
                    "{} was dismissed in {} week {}; hire a new general manager before advancing",
                    record.gm_name, record.year, record.week
                ),
            });
        }

        let team_id = state.career.controlled_team_id();
        let Some(team) = state.team(team_id) else {
            return Err(SeasonError::UnknownControlledTeam(team_id));
        };

        match state.calendar.stage {
            SeasonStage::Preseason { .. } => Ok(self.advance_preseason(state)),
            SeasonStage::RegularSeason { week } | SeasonStage::Playoffs { week } => {
                self.advance_week(state, week, engine, rng)
            }
            SeasonStage::Offseason { .. } => {
                let gate = GateContext::for_team(team, &self.rules);
                Ok(self.advance_offseason(state, &gate))
            }
        }
    }

    fn advance_preseason(&self, state: &LeagueState) -> AdvanceOutcome {
        let mut next = state.clone();
        next.calendar = state.calendar.after_week(&self.rules);

        info!("{} -> {}", state.calendar, next.calendar);

        AdvanceOutcome::Continue {
            report: AdvanceReport::transition(state.calendar, next.calendar),
            state: next,
        }
    }

    fn advance_week(
        &self,
        state: &LeagueState,
        week: u8,
        engine: &dyn GameEngine,
        rng: &mut dyn RandomSource,
    ) -> Result<AdvanceOutcome, SeasonError> {
        let rules = &self.rules;
        let team_id = state.career.controlled_team_id();
        let is_playoff = rules.is_playoff_week(week);

        let mut next = state.clone();

        if is_playoff {
            schedule_playoff_week(&mut next, week, rules);
        }

        if !self.simulate_own_game {
            if let Some(game) = next
                .schedule
                .games_in_week(week)
                .find(|g| g.involves(team_id) && !g.is_complete())
            {
                let opponent = game
                    .opponent_of(team_id)
                    .and_then(|id| next.team(id))
                    .map(|t| t.name.as_str())
                    .unwrap_or("an unknown opponent");

                return Ok(AdvanceOutcome::Blocked {
                    reason: format!("Week {}: your game against {} has not been played yet", week, opponent),
                });
            }
        }

        let request = WeekRequest {
            week,
            controlled_team_id: team_id,
            simulate_controlled_game: self.simulate_own_game,
        };

        let simulation = WeekSimulator::new(rules, engine).simulate(&next.teams, &next.schedule, &request);

        next.teams = simulation.teams;
        next.schedule = simulation.schedule;
        next.standings = simulation.results.standings.clone();
        next.implications = simulation.results.implications.clone();

        if is_playoff {
            let played: Vec<ScheduledGame> = next
                .schedule
                .games_in_week(week)
                .filter(|g| g.is_complete())
                .cloned()
                .collect();

            if let Some(bracket) = next.playoffs.as_mut() {
                bracket.record_results(&played, rules);
            }
        }

        let mut patience_delta = None;
        if rules.is_regular_season_week(week) {
            let record = next.team(team_id).map(|t| t.record).unwrap_or_default();
            let delta = next
                .career
                .apply_weekly_patience(&record, week, next.calendar.year, rules);

            debug!("week {}: owner patience {:+}", week, delta);
            patience_delta = Some(delta);
        }

        let firing = FiringEngine::new(rules);
        let context = next.career.firing_context(rules);
        let decision = firing.evaluate(&context, rng);
        let mut owner_warning = None;

        if decision.should_fire {
            if decision.is_immediate {
                return self.fire(state, &next, &decision, &context, week, rng);
            }

            let reason = decision.reason.unwrap_or_default();
            warn!("owner of team {} is losing faith: {}", team_id, reason);
            owner_warning = Some(reason);
        }

        next.calendar = state.calendar.after_week(rules);

        match next.calendar.stage {
            SeasonStage::Playoffs { week: upcoming } => schedule_playoff_week(&mut next, upcoming, rules),
            SeasonStage::Offseason { .. } => {
                if let Some(fired) = self.close_season(state, &mut next, week, rng)? {
                    return Ok(fired);
                }
            }
            _ => {}
        }

        info!("{} -> {}", state.calendar, next.calendar);

        Ok(AdvanceOutcome::Continue {
            report: AdvanceReport {
                from: state.calendar,
                to: next.calendar,
                week_results: Some(simulation.results),
                patience_delta,
                owner_warning,
            },
            state: next,
        })
    }

    /// Season-end review: tenure bookkeeping, then the one firing check where
    /// non-immediate decisions take effect.
    fn close_season(
        &self,
        state: &LeagueState,
        next: &mut LeagueState,
        week: u8,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<AdvanceOutcome>, SeasonError> {
        let summary = season_summary(next);
        next.career.close_season(&summary);

        info!(
            "{} season over for team {}: {}-{}-{}, {} losing seasons in a row",
            next.calendar.year,
            next.career.controlled_team_id(),
            summary.wins,
            summary.losses,
            summary.ties,
            next.career.consecutive_losing_seasons
        );

        let context = next.career.firing_context(&self.rules);
        let decision = FiringEngine::new(&self.rules).evaluate(&context, rng);
        next.career.relations.ownership_changed = false;

        if decision.should_fire {
            return self.fire(state, next, &decision, &context, week, rng).map(Some);
        }

        if next.offseason.is_none() {
            next.offseason = Some(OffSeasonState::begin(next.calendar.year));
        }

        Ok(None)
    }

    fn fire(
        &self,
        state: &LeagueState,
        next: &LeagueState,
        decision: &FiringDecision,
        context: &FiringContext,
        week: u8,
        rng: &mut dyn RandomSource,
    ) -> Result<AdvanceOutcome, SeasonError> {
        let reason = FiringEngine::new(&self.rules).build_reason(context, rng);
        let record = next
            .career
            .build_firing_record(decision, reason, next.calendar.year, week, &self.rules)?;

        info!(
            "{} fired by {} in {} week {}: {}",
            record.gm_name,
            next.career.owner.name,
            record.year,
            record.week,
            decision.reason.as_deref().unwrap_or("no reason given")
        );

        let mut fired = state.clone();
        fired.career.dismissal = Some(record.clone());

        Ok(AdvanceOutcome::Fired { state: fired, record })
    }

    fn advance_offseason(&self, state: &LeagueState, gate: &GateContext) -> AdvanceOutcome {
        let Some(offseason) = &state.offseason else {
            let offseason = OffSeasonState::begin(state.calendar.year);

            let mut next = state.clone();
            next.calendar = state.calendar.with_phase(offseason.current_phase);
            next.offseason = Some(offseason);

            return AdvanceOutcome::Continue {
                report: AdvanceReport::transition(state.calendar, next.calendar),
                state: next,
            };
        };

        if offseason.is_complete {
            return self.start_new_season(state);
        }

        let mut offseason = offseason.clone();

        match offseason.advance_phase(gate) {
            PhaseAdvance::Refused(reason) => {
                debug!("offseason advance refused: {}", reason);
                AdvanceOutcome::Blocked { reason }
            }
            PhaseAdvance::Advanced { to, .. } => {
                let mut next = state.clone();
                next.calendar = state.calendar.with_phase(to);
                next.offseason = Some(offseason);

                AdvanceOutcome::Continue {
                    report: AdvanceReport::transition(state.calendar, next.calendar),
                    state: next,
                }
            }
            PhaseAdvance::Completed => self.start_new_season(state),
        }
    }

    fn start_new_season(&self, state: &LeagueState) -> AdvanceOutcome {
        let rules = &self.rules;
        let mut next = state.clone();

        next.calendar = state.calendar.start_of_next_season();
        next.offseason = None;
        next.playoffs = None;
        next.implications.clear();

        // A schedule with results is last year's; a fresh one is kept as is.
        if next.schedule.completed_games().next().is_some() {
            next.schedule.reset_for_new_season(rules);
        }

        for team in &mut next.teams {
            team.record = TeamRecord::default();
        }
        next.standings = Standings::compute(&next.teams, &next.schedule, rules);

        info!("season {} begins", next.calendar.year);

        AdvanceOutcome::Continue {
            report: AdvanceReport::transition(state.calendar, next.calendar),
            state: next,
        }
    }
}

/// Adds the bracket's games for a playoff week unless the schedule already
/// has games that week. Seeds the bracket on first use.
fn schedule_playoff_week(state: &mut LeagueState, week: u8, rules: &SeasonRules) {
    if state.schedule.has_games_in_week(week) {
        return;
    }

    if state.playoffs.is_none() {
        state.playoffs = Some(PlayoffBracket::seed(&state.standings, rules));
    }

    if let Some(bracket) = &state.playoffs {
        let games = bracket.games_for_week(week, rules, state.schedule.next_game_id());
        debug!("week {}: {} playoff games scheduled", week, games.len());
        state.schedule.add_games(games);
    }
}

fn season_summary(state: &LeagueState) -> SeasonSummary {
    let team_id = state.career.controlled_team_id();
    let entry = state.standings.entry(team_id);
    let record = entry.map(|e| e.record).unwrap_or_default();
    let bracket = state.playoffs.as_ref();

    SeasonSummary {
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        made_playoffs: bracket.is_some_and(|b| b.is_seeded(team_id)),
        division_title: entry.is_some_and(|e| e.is_division_leader() && e.record.games_played() > 0),
        conference_title: bracket.is_some_and(|b| b.is_conference_champion(team_id)),
        championship_appearance: bracket.is_some_and(|b| b.is_finalist(team_id)),
        championship_win: bracket.is_some_and(|b| b.is_champion(team_id)),
    }
}
