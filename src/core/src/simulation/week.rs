use crate::config::SeasonRules;
use crate::league::{PlayoffImplication, PlayoffImplicationAnalyzer, Schedule, ScheduledGame, Standings, Team};
use crate::simulation::{
    headlines, injury_report, GameConfig, GameEngine, GameInjury, GameOutcome, Headline,
    InjuryReportEntry,
};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRequest {
    pub week: u8,
    pub controlled_team_id: u32,
    /// Also hand the controlled team's own game to the engine.
    pub simulate_controlled_game: bool,
}

/// A game that could not be played because one of its teams is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationFailure {
    pub game_id: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResults {
    pub week: u8,
    /// Games completed by this simulation pass.
    pub games: Vec<ScheduledGame>,
    pub standings: Standings,
    pub implications: Vec<PlayoffImplication>,
    pub injury_report: Vec<InjuryReportEntry>,
    pub headlines: Vec<Headline>,
    pub failures: Vec<SimulationFailure>,
}

/// Updated copies of the inputs plus the week's report.
#[derive(Debug, Clone)]
pub struct WeekSimulation {
    pub teams: Vec<Team>,
    pub schedule: Schedule,
    pub results: WeekResults,
}

pub struct WeekSimulator<'a> {
    rules: &'a SeasonRules,
    engine: &'a dyn GameEngine,
}

impl<'a> WeekSimulator<'a> {
    pub fn new(rules: &'a SeasonRules, engine: &'a dyn GameEngine) -> Self {
        WeekSimulator { rules, engine }
    }

    pub fn simulate(&self, teams: &[Team], schedule: &Schedule, request: &WeekRequest) -> WeekSimulation {
        let week = request.week;
        let is_playoff = self.rules.is_playoff_week(week);

        let mut failures = Vec::new();
        let mut jobs: Vec<(usize, GameConfig, &Team, &Team)> = Vec::new();

        for (idx, game) in schedule.games.iter().enumerate() {
            if game.week != week || game.is_complete() {
                continue;
            }

            if game.involves(request.controlled_team_id) && !request.simulate_controlled_game {
                debug!("week {}: leaving game {} to the controlled team", week, game.id);
                continue;
            }

            let home = teams.iter().find(|t| t.id == game.home_team_id);
            let away = teams.iter().find(|t| t.id == game.away_team_id);

            match (home, away) {
                (Some(home), Some(away)) => {
                    let config = GameConfig {
                        home_team_id: home.id,
                        away_team_id: away.id,
                        week,
                        is_playoff,
                    };
                    jobs.push((idx, config, home, away));
                }
                _ => {
                    let missing = if home.is_none() {
                        game.home_team_id
                    } else {
                        game.away_team_id
                    };

                    warn!("week {}: skipping game {}, team {} not found", week, game.id, missing);

                    failures.push(SimulationFailure {
                        game_id: game.id,
                        home_team_id: game.home_team_id,
                        away_team_id: game.away_team_id,
                        reason: format!("team {} not found", missing),
                    });
                }
            }
        }

        // Games only touch their own two teams, so play them in parallel and
        // merge in schedule order afterwards.
        let engine = self.engine;
        let outcomes: Vec<(usize, GameOutcome)> = jobs
            .par_iter()
            .map(|(idx, config, home, away)| (*idx, engine.play(config, home, away)))
            .collect();

        let mut teams = teams.to_vec();
        let mut schedule = schedule.clone();
        let mut injuries: Vec<GameInjury> = Vec::new();
        let mut played = Vec::with_capacity(outcomes.len());

        for team in &mut teams {
            team.tick_injuries();
        }

        for (idx, outcome) in outcomes {
            let game = &mut schedule.games[idx];
            game.complete(outcome.home_score, outcome.away_score);

            debug!(
                "week {}: {} {} - {} {}",
                week, game.home_team_id, outcome.home_score, outcome.away_score, game.away_team_id
            );

            if !is_playoff {
                fold_result(&mut teams, game);
            }

            for injury in &outcome.injuries {
                let applied = teams
                    .iter_mut()
                    .find(|t| t.id == injury.team_id)
                    .map(|t| t.apply_injury(injury.player_id, injury.weeks_out))
                    .unwrap_or(false);

                if !applied {
                    debug!("injury for unknown player {} ({})", injury.player_id, injury.player_name);
                }
            }

            injuries.extend(outcome.injuries);
            played.push(game.clone());
        }

        let standings = Standings::compute(&teams, &schedule, self.rules);
        sync_records(&mut teams, &standings);

        let implications = PlayoffImplicationAnalyzer::new(self.rules).analyze(&standings, week);
        let headlines = headlines(&played, &teams, self.rules.max_headlines);

        WeekSimulation {
            teams,
            schedule,
            results: WeekResults {
                week,
                games: played,
                standings,
                implications,
                injury_report: injury_report(&injuries),
                headlines,
                failures,
            },
        }
    }
}

fn fold_result(teams: &mut [Team], game: &ScheduledGame) {
    for team in teams.iter_mut().filter(|t| game.involves(t.id)) {
        if let Some((scored, conceded)) = game.score_for(team.id) {
            team.record.record_game(scored, conceded);
        }
    }
}

/// Standings are derived from the completed games; a stored record that
/// disagrees with them has drifted and is replaced.
fn sync_records(teams: &mut [Team], standings: &Standings) {
    for team in teams.iter_mut() {
        if let Some(entry) = standings.entry(team.id) {
            if entry.record != team.record {
                warn!("team {} record drifted from completed games, resyncing", team.id);
                team.record = entry.record;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::RosterPlayer;
    use crate::simulation::engine::testing::ScriptedEngine;
    use crate::simulation::InjuryStatus;

    fn teams() -> Vec<Team> {
        (1..=4)
            .map(|id| {
                Team::new(id, format!("Team {}", id), format!("T{}", id), "East", "North")
                    .with_roster(vec![RosterPlayer::new(id * 100, format!("Player {}", id), "QB")])
            })
            .collect()
    }

    fn request(week: u8, simulate_controlled_game: bool) -> WeekRequest {
        WeekRequest {
            week,
            controlled_team_id: 1,
            simulate_controlled_game,
        }
    }

    #[test]
    fn test_simulates_only_target_week() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::home_wins();
        let schedule = Schedule::new(vec![
            ScheduledGame::new(1, 1, 1, 2),
            ScheduledGame::new(2, 1, 3, 4),
            ScheduledGame::new(3, 2, 1, 3),
        ]);

        let sim = WeekSimulator::new(&rules, &engine).simulate(&teams(), &schedule, &request(1, true));

        assert_eq!(sim.results.games.len(), 2);
        assert!(sim.schedule.game(1).unwrap().is_complete());
        assert!(sim.schedule.game(2).unwrap().is_complete());
        assert!(!sim.schedule.game(3).unwrap().is_complete());
        assert_eq!(sim.teams[0].record.wins, 1);
        assert_eq!(sim.teams[1].record.losses, 1);
    }

    #[test]
    fn test_controlled_game_left_alone_without_flag() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::home_wins();
        let schedule = Schedule::new(vec![ScheduledGame::new(1, 1, 1, 2), ScheduledGame::new(2, 1, 3, 4)]);

        let sim = WeekSimulator::new(&rules, &engine).simulate(&teams(), &schedule, &request(1, false));

        assert!(!sim.schedule.game(1).unwrap().is_complete());
        assert!(sim.schedule.game(2).unwrap().is_complete());
    }

    #[test]
    fn test_missing_team_skips_only_that_game() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::home_wins();
        let schedule = Schedule::new(vec![ScheduledGame::new(1, 1, 1, 99), ScheduledGame::new(2, 1, 3, 4)]);

        let sim = WeekSimulator::new(&rules, &engine).simulate(&teams(), &schedule, &request(1, true));

        assert_eq!(sim.results.failures.len(), 1);
        assert_eq!(sim.results.failures[0].game_id, 1);
        assert!(sim.results.failures[0].reason.contains("99"));
        assert!(!sim.schedule.game(1).unwrap().is_complete());
        assert!(sim.schedule.game(2).unwrap().is_complete());
    }

    #[test]
    fn test_already_completed_games_are_not_replayed() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::home_wins();
        let mut done = ScheduledGame::new(1, 1, 1, 2);
        done.complete(3, 30);
        let mut league = teams();
        league[1].record.record_game(30, 3);
        league[0].record.record_game(3, 30);

        let schedule = Schedule::new(vec![done, ScheduledGame::new(2, 1, 3, 4)]);
        let sim = WeekSimulator::new(&rules, &engine).simulate(&league, &schedule, &request(1, true));

        assert_eq!(sim.results.games.len(), 1);
        assert_eq!(sim.schedule.game(1).unwrap().result.unwrap().away_score, 30);
        assert_eq!(sim.teams[0].record.losses, 1);
    }

    #[test]
    fn test_standings_cover_whole_season() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::away_wins();
        let mut earlier = ScheduledGame::new(1, 1, 1, 2);
        earlier.complete(21, 7);
        let mut league = teams();
        league[0].record.record_game(21, 7);
        league[1].record.record_game(7, 21);

        let schedule = Schedule::new(vec![earlier, ScheduledGame::new(2, 2, 2, 1)]);
        let sim = WeekSimulator::new(&rules, &engine).simulate(&league, &schedule, &request(2, true));

        let entry = sim.results.standings.entry(1).unwrap();
        assert_eq!(entry.record.wins, 2);
        assert_eq!(entry.record.streak, 2);

        for team in &sim.teams {
            let completed = sim.schedule.completed_games().filter(|g| g.involves(team.id)).count() as u32;
            assert_eq!(team.record.games_played(), completed);
        }
    }

    #[test]
    fn test_drifted_record_is_resynced() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::home_wins();
        let mut league = teams();
        league[2].record.wins = 9;

        let schedule = Schedule::new(vec![ScheduledGame::new(1, 1, 1, 2)]);
        let sim = WeekSimulator::new(&rules, &engine).simulate(&league, &schedule, &request(1, true));

        assert_eq!(sim.teams[2].record.wins, 0);
    }

    #[test]
    fn test_injuries_reported_and_applied() {
        let rules = SeasonRules::default();
        let mut engine = ScriptedEngine::home_wins();
        engine.injuries = vec![GameInjury {
            player_id: 300,
            player_name: "Player 3".to_string(),
            team_id: 3,
            injury_type: "Hamstring".to_string(),
            weeks_out: 2,
        }];

        let schedule = Schedule::new(vec![ScheduledGame::new(1, 1, 3, 4)]);
        let sim = WeekSimulator::new(&rules, &engine).simulate(&teams(), &schedule, &request(1, true));

        assert_eq!(sim.results.injury_report.len(), 1);
        assert_eq!(sim.results.injury_report[0].status, InjuryStatus::Doubtful);
        assert_eq!(sim.teams[2].player(300).unwrap().weeks_out, 2);
    }

    #[test]
    fn test_playoff_games_do_not_touch_records() {
        let rules = SeasonRules::default();
        let engine = ScriptedEngine::home_wins();
        let schedule = Schedule::new(vec![ScheduledGame::new(1, 19, 1, 2)]);

        let sim = WeekSimulator::new(&rules, &engine).simulate(&teams(), &schedule, &request(19, true));

        assert!(sim.schedule.game(1).unwrap().is_complete());
        assert_eq!(sim.teams[0].record.games_played(), 0);
        assert!(sim.results.implications.is_empty());
    }
}
