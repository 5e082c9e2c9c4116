mod demo;

use color_eyre::eyre::eyre;
use demo::{DemoEngine, LeagueGenerator};
use env_logger::Env;
use gm_core::offseason::{GateContext, TaskAction};
use gm_core::simulation::{GameConfig, GameEngine};
use gm_core::{AdvanceOutcome, AdvanceReport, LeagueState, SeasonController, SeasonRules, SeededRandom};
use log::{info, warn};
use std::env;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let seed = env_number("SEED", 2025);
    let seasons = season_count(env_number("SEASONS", 3));
    let simulate_own_game = env::var("MODE") != Ok(String::from("MANUAL"));

    let rules = SeasonRules::default();
    let mut state = LeagueGenerator::new(seed).generate(2025, &rules);

    let controller = SeasonController::new(rules.clone(), simulate_own_game);
    let engine = DemoEngine::new(seed);
    let mut rng = SeededRandom::new(seed);

    if let Some(team) = state.controlled_team() {
        info!(
            "{} takes over the {} (owner {}, patience {}, control {})",
            state.career.gm.name, team.name, state.career.owner.name, state.career.owner.patience, state.career.owner.control
        );
    }

    let final_year = state.calendar.year.saturating_add(seasons);

    while state.calendar.year < final_year {
        if state.calendar.is_offseason() {
            complete_offseason_tasks(&mut state, &rules);
        } else if !simulate_own_game {
            play_own_game(&mut state, &engine, &rules);
        }

        match controller.advance(&state, &engine, &mut rng)? {
            AdvanceOutcome::Continue { state: next, report } => {
                log_report(&next, &report, &rules);
                state = next;
            }
            AdvanceOutcome::Fired { record, .. } => {
                info!("{}", record.public_summary());
                println!("{}", serde_json::to_string_pretty(&record)?);

                return Ok(());
            }
            AdvanceOutcome::Blocked { reason } => {
                return Err(eyre!("advance blocked at {}: {}", state.calendar, reason));
            }
        }
    }

    info!(
        "{} survived {} seasons: {}-{}-{}",
        state.career.gm.name,
        state.career.tenure.seasons,
        state.career.tenure.wins,
        state.career.tenure.losses,
        state.career.tenure.ties
    );

    Ok(())
}

fn env_number(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Out-of-range counts fall back to the default rather than wrapping.
fn season_count(requested: u64) -> u16 {
    u16::try_from(requested).unwrap_or(3)
}

fn log_report(state: &LeagueState, report: &AdvanceReport, rules: &SeasonRules) {
    if let Some(results) = &report.week_results {
        info!("{}: {} games played", report.from, results.games.len());

        for headline in &results.headlines {
            info!("  {}", headline.text);
        }

        for implication in &results.implications {
            info!("  {}", implication.description);
        }

        for failure in &results.failures {
            warn!("  game {} skipped: {}", failure.game_id, failure.reason);
        }
    }

    if let Some(delta) = report.patience_delta {
        info!("  owner patience {:+} -> {}", delta, state.career.current_patience(rules));
    }

    if let Some(warning) = &report.owner_warning {
        warn!("  owner warning: {}", warning);
    }

    if let Some(champion) = state.playoffs.as_ref().and_then(|b| b.champion) {
        if report.to.is_offseason() && !report.from.is_offseason() {
            let name = state.team(champion).map(|t| t.name.as_str()).unwrap_or("unknown");
            info!("{} champions: {}", report.from.year, name);
        }
    }
}

/// Manual mode: the controlled team's game is played outside the season
/// engine before the rest of the week is simulated.
fn play_own_game(state: &mut LeagueState, engine: &DemoEngine, rules: &SeasonRules) {
    let Some(week) = state.calendar.game_week() else {
        return;
    };

    let team_id = state.career.controlled_team_id();
    let Some(idx) = state
        .schedule
        .games
        .iter()
        .position(|g| g.week == week && g.involves(team_id) && !g.is_complete())
    else {
        return;
    };

    let game = &state.schedule.games[idx];
    let config = GameConfig {
        home_team_id: game.home_team_id,
        away_team_id: game.away_team_id,
        week,
        is_playoff: rules.is_playoff_week(week),
    };

    let outcome = match (state.team(config.home_team_id), state.team(config.away_team_id)) {
        (Some(home), Some(away)) => engine.play(&config, home, away),
        _ => return,
    };

    info!("week {}: played own game {} - {}", week, outcome.home_score, outcome.away_score);
    state.schedule.games[idx].complete(outcome.home_score, outcome.away_score);
}

/// Plays through the current offseason phase the way a user clicking
/// through every screen would.
fn complete_offseason_tasks(state: &mut LeagueState, rules: &SeasonRules) {
    let Some(gate) = state.controlled_team().map(|team| GateContext::for_team(team, rules)) else {
        return;
    };

    let Some(offseason) = state.offseason.as_mut() else {
        return;
    };

    offseason.visit_phase();

    let pending: Vec<(String, TaskAction)> = offseason
        .tasks
        .iter()
        .filter(|task| !task.completed)
        .map(|task| (task.id.clone(), task.action))
        .collect();

    for (id, action) in pending {
        match action {
            TaskAction::Navigate => {
                if offseason.complete_task(&id) {
                    match id.as_str() {
                        "complete_draft" => state.career.record_first_round_pick(),
                        "sign_free_agents" => state.career.record_free_agent_signing(),
                        "hire_coordinators" => state.career.record_coach_hired(),
                        _ => {}
                    }
                }
            }
            TaskAction::Validate(_) => {
                if let Err(reason) = offseason.validate_task(&id, &gate) {
                    warn!("{}", reason);
                }
            }
            TaskAction::View | TaskAction::Auto => {}
        }
    }

    offseason.advance_day();
}
