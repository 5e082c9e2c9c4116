use crate::calendar::SeasonCalendar;
use crate::career::{CareerState, GeneralManager, GmContract, OwnerProfile};
use crate::config::SeasonRules;
use crate::league::{PlayoffBracket, PlayoffImplication, Schedule, Standings, Team};
use crate::offseason::OffSeasonState;
use serde::{Deserialize, Serialize};

/// Everything one advance reads and produces. The controller never mutates
/// a state it was given; it returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueState {
    pub calendar: SeasonCalendar,
    pub teams: Vec<Team>,
    pub schedule: Schedule,
    pub standings: Standings,
    pub implications: Vec<PlayoffImplication>,
    pub playoffs: Option<PlayoffBracket>,
    pub career: CareerState,
    pub offseason: Option<OffSeasonState>,
}

impl LeagueState {
    pub fn new(
        calendar: SeasonCalendar,
        mut teams: Vec<Team>,
        schedule: Schedule,
        career: CareerState,
        rules: &SeasonRules,
    ) -> Self {
        let standings = Standings::compute(&teams, &schedule, rules);

        for team in &mut teams {
            if let Some(entry) = standings.entry(team.id) {
                team.record = entry.record;
            }
        }

        LeagueState {
            calendar,
            teams,
            schedule,
            standings,
            implications: Vec::new(),
            playoffs: None,
            career,
            offseason: None,
        }
    }

    pub fn team(&self, team_id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn team_mut(&mut self, team_id: u32) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    pub fn controlled_team(&self) -> Option<&Team> {
        self.team(self.career.controlled_team_id())
    }

    /// Resolves a dismissal (or a voluntary move) by installing a new GM.
    pub fn hire_general_manager(&mut self, gm: GeneralManager, owner: OwnerProfile, contract: GmContract) {
        self.career.hire(gm, owner, contract);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::ScheduledGame;

    fn state() -> LeagueState {
        let rules = SeasonRules::default();
        let teams = vec![
            Team::new(1, "Harbor City Gulls", "HCG", "East", "North"),
            Team::new(2, "Ridgeline Elk", "RDE", "East", "North"),
        ];
        let mut schedule = Schedule::new(vec![ScheduledGame::new(1, 1, 1, 2)]);
        schedule.games[0].complete(20, 10);

        let career = CareerState::new(
            GeneralManager::new(1, "Dana Whitfield", 2),
            OwnerProfile::new(5, "R. Castellano", 50, 50, false),
            GmContract {
                annual_salary: 1_000_000,
                years_remaining: 2,
            },
        );

        LeagueState::new(SeasonCalendar::new(2025), teams, schedule, career, &rules)
    }

    #[test]
    fn test_new_computes_standings() {
        let state = state();

        assert_eq!(state.standings.entry(1).map(|e| e.record.wins), Some(1));
        assert_eq!(state.standings.entry(2).map(|e| e.record.losses), Some(1));
        assert_eq!(state.controlled_team().map(|t| t.record.losses), Some(1));
    }

    #[test]
    fn test_hire_moves_controlled_team() {
        let mut state = state();

        state.hire_general_manager(
            GeneralManager::new(2, "Sam Iverson", 1),
            OwnerProfile::new(6, "L. Marsh", 60, 40, false),
            GmContract {
                annual_salary: 1_500_000,
                years_remaining: 4,
            },
        );

        assert_eq!(state.controlled_team().map(|t| t.abbreviation.as_str()), Some("HCG"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let state = state();
        let json = serde_json::to_string(&state).unwrap();
        let back: LeagueState = serde_json::from_str(&json).unwrap();

        assert_eq!(back, state);
    }
}
