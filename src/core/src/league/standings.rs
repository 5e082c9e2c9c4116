use crate::config::SeasonRules;
use crate::league::{Schedule, ScheduledGame, Team, TeamRecord};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived every recompute; never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub team_id: u32,
    pub team_name: String,
    pub conference: String,
    pub division: String,
    pub record: TeamRecord,
    pub division_rank: usize,
    pub conference_rank: usize,
}

impl StandingEntry {
    pub fn is_division_leader(&self) -> bool {
        self.division_rank == 1
    }
}

/// Entries ordered by conference name, then conference rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub entries: Vec<StandingEntry>,
}

impl Standings {
    /// Recomputes everything from the completed regular-season games.
    pub fn compute(teams: &[Team], schedule: &Schedule, rules: &SeasonRules) -> Self {
        let games = schedule.completed_regular_season(rules);
        let records = fold_records(teams, &games);

        Self::rank(teams, &records, &games)
    }

    /// Ranks teams by win percentage, then head-to-head among the tied
    /// group, then point differential, then points scored, then team id.
    pub fn rank(
        teams: &[Team],
        records: &HashMap<u32, TeamRecord>,
        games: &[&ScheduledGame],
    ) -> Self {
        let mut entries: Vec<StandingEntry> = teams
            .iter()
            .map(|team| StandingEntry {
                team_id: team.id,
                team_name: team.name.clone(),
                conference: team.conference.clone(),
                division: team.division.clone(),
                record: records.get(&team.id).copied().unwrap_or_default(),
                division_rank: 0,
                conference_rank: 0,
            })
            .collect();

        let index: HashMap<u32, usize> = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.team_id, idx))
            .collect();

        let conferences = teams.iter().into_group_map_by(|t| t.conference.as_str());
        for members in conferences.values() {
            let ids: Vec<u32> = members.iter().map(|t| t.id).collect();

            for (position, team_id) in rank_teams(&ids, records, games).into_iter().enumerate() {
                entries[index[&team_id]].conference_rank = position + 1;
            }
        }

        let divisions = teams
            .iter()
            .into_group_map_by(|t| (t.conference.as_str(), t.division.as_str()));
        for members in divisions.values() {
            let ids: Vec<u32> = members.iter().map(|t| t.id).collect();

            for (position, team_id) in rank_teams(&ids, records, games).into_iter().enumerate() {
                entries[index[&team_id]].division_rank = position + 1;
            }
        }

        entries.sort_by(|a, b| {
            a.conference
                .cmp(&b.conference)
                .then(a.conference_rank.cmp(&b.conference_rank))
        });

        Standings { entries }
    }

    pub fn entry(&self, team_id: u32) -> Option<&StandingEntry> {
        self.entries.iter().find(|e| e.team_id == team_id)
    }

    pub fn conferences(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.conference.as_str())
            .unique()
            .collect()
    }

    pub fn divisions(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.conference.as_str(), e.division.as_str()))
            .unique()
            .sorted()
            .collect()
    }

    pub fn conference_table(&self, conference: &str) -> Vec<&StandingEntry> {
        self.entries
            .iter()
            .filter(|e| e.conference == conference)
            .sorted_by_key(|e| e.conference_rank)
            .collect()
    }

    pub fn division_table(&self, conference: &str, division: &str) -> Vec<&StandingEntry> {
        self.entries
            .iter()
            .filter(|e| e.conference == conference && e.division == division)
            .sorted_by_key(|e| e.division_rank)
            .collect()
    }
}

/// Folds games (in the given order) into per-team records. Games naming an
/// unregistered team are ignored.
pub fn fold_records(teams: &[Team], games: &[&ScheduledGame]) -> HashMap<u32, TeamRecord> {
    let mut records: HashMap<u32, TeamRecord> =
        teams.iter().map(|t| (t.id, TeamRecord::default())).collect();

    for game in games {
        for team_id in [game.home_team_id, game.away_team_id] {
            if let (Some(record), Some((scored, conceded))) =
                (records.get_mut(&team_id), game.score_for(team_id))
            {
                record.record_game(scored, conceded);
            }
        }
    }

    records
}

fn rank_teams(
    ids: &[u32],
    records: &HashMap<u32, TeamRecord>,
    games: &[&ScheduledGame],
) -> Vec<u32> {
    let record = |id: &u32| records.get(id).copied().unwrap_or_default();

    let by_percentage: Vec<u32> = ids
        .iter()
        .copied()
        .sorted_by(|a, b| {
            record(b)
                .win_percentage()
                .total_cmp(&record(a).win_percentage())
                .then(a.cmp(b))
        })
        .collect();

    let mut ranked = Vec::with_capacity(ids.len());
    let chunks = by_percentage
        .into_iter()
        .chunk_by(|id| record(id).win_percentage().to_bits());

    for (_, tied) in &chunks {
        let tied: Vec<u32> = tied.collect();

        if tied.len() == 1 {
            ranked.extend(tied);
        } else {
            ranked.extend(break_tie(&tied, records, games));
        }
    }

    ranked
}

fn break_tie(
    tied: &[u32],
    records: &HashMap<u32, TeamRecord>,
    games: &[&ScheduledGame],
) -> Vec<u32> {
    let record = |id: &u32| records.get(id).copied().unwrap_or_default();
    let head_to_head: HashMap<u32, f64> = tied
        .iter()
        .map(|id| (*id, head_to_head_percentage(*id, tied, games)))
        .collect();

    let mut order = tied.to_vec();
    order.sort_by(|a, b| {
        head_to_head[b]
            .total_cmp(&head_to_head[a])
            .then_with(|| record(b).point_differential().cmp(&record(a).point_differential()))
            .then_with(|| record(b).points_for.cmp(&record(a).points_for))
            .then_with(|| a.cmp(b))
    });

    order
}

/// Win percentage in games against the rest of the tied group; 0.5 when the
/// team never met any of them.
fn head_to_head_percentage(team_id: u32, group: &[u32], games: &[&ScheduledGame]) -> f64 {
    let mut record = TeamRecord::default();

    for game in games {
        let Some(opponent) = game.opponent_of(team_id) else {
            continue;
        };

        if !group.contains(&opponent) {
            continue;
        }

        if let Some((scored, conceded)) = game.score_for(team_id) {
            record.record_game(scored, conceded);
        }
    }

    if record.games_played() == 0 {
        0.5
    } else {
        record.win_percentage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: u32, division: &str) -> Team {
        Team::new(id, format!("Team {}", id), format!("T{}", id), "East", division)
    }

    fn played(id: u32, week: u8, home: u32, away: u32, home_score: u32, away_score: u32) -> ScheduledGame {
        let mut game = ScheduledGame::new(id, week, home, away);
        game.complete(home_score, away_score);
        game
    }

    #[test]
    fn test_rank_by_win_percentage() {
        let teams = vec![team(1, "North"), team(2, "North"), team(3, "North")];
        let schedule = Schedule::new(vec![
            played(1, 1, 1, 2, 10, 20),
            played(2, 2, 2, 3, 30, 0),
            played(3, 3, 3, 1, 14, 7),
        ]);

        let standings = Standings::compute(&teams, &schedule, &SeasonRules::default());
        let order: Vec<u32> = standings
            .division_table("East", "North")
            .iter()
            .map(|e| e.team_id)
            .collect();

        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(standings.entry(2).unwrap().record.wins, 2);
        assert_eq!(standings.entry(1).unwrap().record.streak, -2);
    }

    #[test]
    fn test_head_to_head_breaks_tie_before_point_differential() {
        let teams = vec![team(1, "North"), team(2, "North"), team(3, "South"), team(4, "South")];
        // Teams 1 and 2 both finish 1-1; team 2 won the meeting but team 1
        // has the far better point differential.
        let schedule = Schedule::new(vec![
            played(1, 1, 1, 2, 10, 13),
            played(2, 2, 1, 3, 50, 0),
            played(3, 2, 2, 4, 0, 3),
        ]);

        let standings = Standings::compute(&teams, &schedule, &SeasonRules::default());

        assert_eq!(standings.entry(2).unwrap().division_rank, 1);
        assert_eq!(standings.entry(1).unwrap().division_rank, 2);
    }

    #[test]
    fn test_point_differential_then_id_without_meetings() {
        let teams = vec![team(1, "North"), team(2, "North"), team(3, "South"), team(4, "South")];
        let schedule = Schedule::new(vec![
            played(1, 1, 1, 3, 21, 20),
            played(2, 1, 2, 4, 35, 3),
        ]);

        let standings = Standings::compute(&teams, &schedule, &SeasonRules::default());
        assert_eq!(standings.entry(2).unwrap().conference_rank, 1);
        assert_eq!(standings.entry(1).unwrap().conference_rank, 2);

        let empty = Standings::compute(&teams, &Schedule::default(), &SeasonRules::default());
        let order: Vec<u32> = empty.conference_table("East").iter().map(|e| e.team_id).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let teams = vec![team(1, "North"), team(2, "North"), team(3, "South"), team(4, "South")];
        let schedule = Schedule::new(vec![
            played(1, 1, 1, 2, 17, 17),
            played(2, 1, 3, 4, 24, 21),
            played(3, 2, 1, 3, 9, 6),
            played(4, 2, 2, 4, 28, 31),
        ]);
        let rules = SeasonRules::default();

        let first = Standings::compute(&teams, &schedule, &rules);
        let second = Standings::compute(&teams, &schedule, &rules);

        assert_eq!(first, second);
    }

    #[test]
    fn test_records_match_completed_game_counts() {
        let teams = vec![team(1, "North"), team(2, "North"), team(3, "South")];
        let schedule = Schedule::new(vec![
            played(1, 1, 1, 2, 17, 17),
            played(2, 2, 1, 3, 10, 6),
            ScheduledGame::new(3, 3, 2, 3),
        ]);
        let rules = SeasonRules::default();
        let standings = Standings::compute(&teams, &schedule, &rules);

        for t in &teams {
            let completed = schedule
                .completed_games()
                .filter(|g| g.involves(t.id))
                .count() as u32;
            assert_eq!(standings.entry(t.id).unwrap().record.games_played(), completed);
        }
    }

    #[test]
    fn test_divisions_and_conferences_listing() {
        let mut west = team(5, "North");
        west.conference = "West".to_string();
        let teams = vec![team(1, "North"), team(2, "South"), west];

        let standings = Standings::compute(&teams, &Schedule::default(), &SeasonRules::default());

        assert_eq!(standings.conferences().len(), 2);
        assert_eq!(
            standings.divisions(),
            vec![("East", "North"), ("East", "South"), ("West", "North")]
        );
    }
}
