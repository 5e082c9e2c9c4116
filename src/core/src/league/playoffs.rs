use crate::config::SeasonRules;
use crate::league::{ScheduledGame, Standings, TeamRecord};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffSeed {
    pub conference: String,
    pub seed: u8,
    pub team_id: u32,
    pub record: TeamRecord,
}

/// Single-elimination bracket per conference, re-seeded every round, with
/// the conference champions meeting in the final playoff week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayoffBracket {
    pub seeds: Vec<PlayoffSeed>,
    pub eliminated: BTreeSet<u32>,
    pub conference_champions: BTreeMap<String, u32>,
    pub finalists: Vec<u32>,
    pub champion: Option<u32>,
}

impl PlayoffBracket {
    /// Division leaders take the top seeds in conference order, the best
    /// remaining teams fill the wildcard spots.
    pub fn seed(standings: &Standings, rules: &SeasonRules) -> Self {
        let mut seeds = Vec::new();

        for conference in standings.conferences() {
            let (leaders, others): (Vec<_>, Vec<_>) = standings
                .conference_table(conference)
                .into_iter()
                .partition(|e| e.is_division_leader());

            for (position, entry) in leaders
                .into_iter()
                .chain(others)
                .take(rules.playoff_seeds)
                .enumerate()
            {
                seeds.push(PlayoffSeed {
                    conference: conference.to_string(),
                    seed: (position + 1) as u8,
                    team_id: entry.team_id,
                    record: entry.record,
                });
            }
        }

        let mut bracket = PlayoffBracket {
            seeds,
            ..PlayoffBracket::default()
        };
        bracket.refresh_conference_champions();

        info!("playoff field set: {} teams", bracket.seeds.len());

        bracket
    }

    pub fn seed_of(&self, team_id: u32) -> Option<&PlayoffSeed> {
        self.seeds.iter().find(|s| s.team_id == team_id)
    }

    pub fn is_seeded(&self, team_id: u32) -> bool {
        self.seed_of(team_id).is_some()
    }

    pub fn is_conference_champion(&self, team_id: u32) -> bool {
        self.conference_champions.values().any(|id| *id == team_id)
    }

    pub fn is_finalist(&self, team_id: u32) -> bool {
        self.finalists.contains(&team_id)
    }

    pub fn is_champion(&self, team_id: u32) -> bool {
        self.champion == Some(team_id)
    }

    fn conferences(&self) -> BTreeSet<&str> {
        self.seeds.iter().map(|s| s.conference.as_str()).collect()
    }

    fn alive(&self, conference: &str) -> Vec<&PlayoffSeed> {
        let mut alive: Vec<&PlayoffSeed> = self
            .seeds
            .iter()
            .filter(|s| s.conference == conference && !self.eliminated.contains(&s.team_id))
            .collect();

        alive.sort_by_key(|s| s.seed);
        alive
    }

    /// Games the bracket needs for `week`, numbered from `first_id`.
    pub fn games_for_week(&self, week: u8, rules: &SeasonRules, first_id: u32) -> Vec<ScheduledGame> {
        let pairings = if week == rules.final_playoff_week {
            self.championship_pairing().into_iter().collect()
        } else {
            self.conference_pairings()
        };

        pairings
            .into_iter()
            .enumerate()
            .map(|(offset, (home, away))| ScheduledGame::new(first_id + offset as u32, week, home, away))
            .collect()
    }

    /// Top seeds sit out until the field is a power of two; the rest play
    /// highest against lowest.
    fn conference_pairings(&self) -> Vec<(u32, u32)> {
        let mut pairings = Vec::new();

        for conference in self.conferences() {
            let alive = self.alive(conference);
            if alive.len() < 2 {
                continue;
            }

            let byes = alive.len().next_power_of_two() - alive.len();
            let playing = &alive[byes..];

            for i in 0..playing.len() / 2 {
                let home = playing[i];
                let away = playing[playing.len() - 1 - i];
                pairings.push((home.team_id, away.team_id));
            }
        }

        pairings
    }

    fn championship_pairing(&self) -> Option<(u32, u32)> {
        let mut champions: Vec<&PlayoffSeed> = self
            .conference_champions
            .values()
            .filter_map(|id| self.seed_of(*id))
            .take(2)
            .collect();

        if champions.len() < 2 {
            return None;
        }

        champions.sort_by(|a, b| {
            b.record
                .win_percentage()
                .total_cmp(&a.record.win_percentage())
                .then_with(|| b.record.point_differential().cmp(&a.record.point_differential()))
                .then_with(|| a.team_id.cmp(&b.team_id))
        });

        Some((champions[0].team_id, champions[1].team_id))
    }

    /// Knocks out losers of the given completed playoff games. A tie sends
    /// the home (higher) seed through.
    pub fn record_results(&mut self, games: &[ScheduledGame], rules: &SeasonRules) {
        for game in games.iter().filter(|g| g.is_complete()) {
            if !self.is_seeded(game.home_team_id) || !self.is_seeded(game.away_team_id) {
                continue;
            }

            let loser = game.loser_id().unwrap_or(game.away_team_id);
            let winner = game.opponent_of(loser).unwrap_or(game.home_team_id);
            self.eliminated.insert(loser);

            if game.week == rules.final_playoff_week {
                self.finalists = vec![game.home_team_id, game.away_team_id];
                self.champion = Some(winner);
                info!("team {} won the championship", winner);
            }
        }

        self.refresh_conference_champions();
    }

    fn refresh_conference_champions(&mut self) {
        let decided: Vec<(String, u32)> = self
            .conferences()
            .into_iter()
            .filter_map(|conference| {
                let alive = self.alive(conference);
                match alive.as_slice() {
                    [only] => Some((conference.to_string(), only.team_id)),
                    _ => None,
                }
            })
            .collect();

        for (conference, team_id) in decided {
            self.conference_champions.entry(conference).or_insert(team_id);
        }
    }
}
