use crate::config::SeasonRules;
use crate::league::{StandingEntry, Standings};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationKind {
    ClinchedDivision,
    ClinchedPlayoff,
    Eliminated,
    ControlsDestiny,
}

/// Recomputed from scratch every week; never merged with last week's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffImplication {
    pub team_id: u32,
    pub kind: ImplicationKind,
    pub description: String,
}

impl PlayoffImplication {
    fn new(entry: &StandingEntry, kind: ImplicationKind) -> Self {
        let description = match kind {
            ImplicationKind::ClinchedDivision => {
                format!("{} clinched the {} {} title", entry.team_name, entry.conference, entry.division)
            }
            ImplicationKind::ClinchedPlayoff => {
                format!("{} clinched a playoff berth", entry.team_name)
            }
            ImplicationKind::Eliminated => {
                format!("{} has been eliminated from playoff contention", entry.team_name)
            }
            ImplicationKind::ControlsDestiny => {
                format!("{} controls its own playoff destiny", entry.team_name)
            }
        };

        PlayoffImplication {
            team_id: entry.team_id,
            kind,
            description,
        }
    }
}

pub struct PlayoffImplicationAnalyzer<'r> {
    rules: &'r SeasonRules,
}

impl<'r> PlayoffImplicationAnalyzer<'r> {
    pub fn new(rules: &'r SeasonRules) -> Self {
        PlayoffImplicationAnalyzer { rules }
    }

    pub fn analyze(&self, standings: &Standings, week: u8) -> Vec<PlayoffImplication> {
        if week < self.rules.implications_from_week || week > self.rules.regular_season_weeks {
            return Vec::new();
        }

        let mut implications = Vec::new();

        if week >= self.rules.division_clinch_from_week {
            self.division_clinches(standings, &mut implications);
        }

        if week >= self.rules.wildcard_clinch_from_week {
            self.wildcard_clinches(standings, &mut implications);
        }

        if week >= self.rules.elimination_from_week {
            self.eliminations(standings, &mut implications);
        }

        self.destiny(standings, &mut implications);

        for implication in &implications {
            if implication.kind != ImplicationKind::ControlsDestiny {
                info!("week {}: {}", week, implication.description);
            }
        }

        implications
    }

    /// The leader clinches once its win gap over second place exceeds
    /// everything second place can still win.
    fn division_clinches(&self, standings: &Standings, out: &mut Vec<PlayoffImplication>) {
        for (conference, division) in standings.divisions() {
            let table = standings.division_table(conference, division);

            let Some(leader) = table.first() else {
                continue;
            };

            let clinched = match table.get(1) {
                Some(second) => {
                    let gap = leader.record.wins as i64 - second.record.wins as i64;
                    gap > second.record.games_remaining(self.rules) as i64
                }
                None => true,
            };

            if clinched {
                out.push(PlayoffImplication::new(leader, ImplicationKind::ClinchedDivision));
            }
        }
    }

    fn wildcard_clinches(&self, standings: &Standings, out: &mut Vec<PlayoffImplication>) {
        let seeds = self.rules.playoff_seeds;

        for conference in standings.conferences() {
            let table = standings.conference_table(conference);
            let first_out = table
                .get(seeds)
                .map(|e| e.record.max_possible_wins(self.rules));

            for entry in table.iter().take(seeds) {
                if entry.is_division_leader() {
                    continue;
                }

                let clinched = match first_out {
                    Some(ceiling) => entry.record.wins > ceiling,
                    None => true,
                };

                if clinched {
                    out.push(PlayoffImplication::new(entry, ImplicationKind::ClinchedPlayoff));
                }
            }
        }
    }

    fn eliminations(&self, standings: &Standings, out: &mut Vec<PlayoffImplication>) {
        let seeds = self.rules.playoff_seeds;
        if seeds == 0 {
            return;
        }

        for conference in standings.conferences() {
            let table = standings.conference_table(conference);

            let Some(last_in) = table.get(seeds - 1) else {
                continue;
            };

            let clinched: HashSet<u32> = out.iter().map(|i| i.team_id).collect();

            for entry in &table {
                if entry.is_division_leader() || clinched.contains(&entry.team_id) {
                    continue;
                }

                let ceiling = entry.record.max_possible_wins(self.rules);

                // Winning the division still means a seed.
                let leader_wins = standings
                    .division_table(&entry.conference, &entry.division)
                    .first()
                    .map_or(0, |leader| leader.record.wins);

                if ceiling < last_in.record.wins && ceiling < leader_wins {
                    out.push(PlayoffImplication::new(entry, ImplicationKind::Eliminated));
                }
            }
        }
    }

    /// A seeded team that has not clinched yet controls its destiny when
    /// winning out keeps it ahead of everything the first team outside can reach.
    fn destiny(&self, standings: &Standings, out: &mut Vec<PlayoffImplication>) {
        let seeds = self.rules.playoff_seeds;
        let settled: HashSet<u32> = out.iter().map(|i| i.team_id).collect();

        for conference in standings.conferences() {
            let table = standings.conference_table(conference);
            let first_out = table
                .get(seeds)
                .map(|e| e.record.max_possible_wins(self.rules));

            for entry in table.iter().take(seeds) {
                if settled.contains(&entry.team_id) {
                    continue;
                }

                let in_control = match first_out {
                    Some(ceiling) => entry.record.max_possible_wins(self.rules) > ceiling,
                    None => true,
                };

                if in_control {
                    out.push(PlayoffImplication::new(entry, ImplicationKind::ControlsDestiny));
                }
            }
        }
    }
}
