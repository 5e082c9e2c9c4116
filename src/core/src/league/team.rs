use crate::config::SeasonRules;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub abbreviation: String,
    pub conference: String,
    pub division: String,
    pub record: TeamRecord,
    pub roster: Vec<RosterPlayer>,
}

impl Team {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        conference: impl Into<String>,
        division: impl Into<String>,
    ) -> Self {
        Team {
            id,
            name: name.into(),
            abbreviation: abbreviation.into(),
            conference: conference.into(),
            division: division.into(),
            record: TeamRecord::default(),
            roster: Vec::new(),
        }
    }

    pub fn with_roster(mut self, roster: Vec<RosterPlayer>) -> Self {
        self.roster = roster;
        self
    }

    /// Players counting against the active roster limit (injured reserve excluded).
    pub fn active_roster_size(&self) -> usize {
        self.roster.iter().filter(|p| !p.injured_reserve).count()
    }

    pub fn player(&self, player_id: u32) -> Option<&RosterPlayer> {
        self.roster.iter().find(|p| p.id == player_id)
    }

    pub fn apply_injury(&mut self, player_id: u32, weeks_out: u8) -> bool {
        match self.roster.iter_mut().find(|p| p.id == player_id) {
            Some(player) => {
                player.weeks_out = player.weeks_out.max(weeks_out);
                true
            }
            None => false,
        }
    }

    /// One week of recovery for everybody on the roster.
    pub fn tick_injuries(&mut self) {
        for player in &mut self.roster {
            player.weeks_out = player.weeks_out.saturating_sub(1);
        }
    }

    pub fn is_same_division(&self, other: &Team) -> bool {
        self.conference == other.conference && self.division == other.division
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: u32,
    pub name: String,
    pub position: String,
    pub weeks_out: u8,
    pub injured_reserve: bool,
}

impl RosterPlayer {
    pub fn new(id: u32, name: impl Into<String>, position: impl Into<String>) -> Self {
        RosterPlayer {
            id,
            name: name.into(),
            position: position.into(),
            weeks_out: 0,
            injured_reserve: false,
        }
    }

    pub fn is_injured(&self) -> bool {
        self.weeks_out > 0
    }
}

/// Win/loss record of a team. Only ever changed by folding game results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// Positive for a winning streak, negative for a losing one.
    pub streak: i32,
}

impl TeamRecord {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Ties count as half a win. A team without games sits at 0.
    pub fn win_percentage(&self) -> f64 {
        let played = self.games_played();
        if played == 0 {
            return 0.0;
        }

        (self.wins as f64 + self.ties as f64 * 0.5) / played as f64
    }

    pub fn point_differential(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    pub fn games_remaining(&self, rules: &SeasonRules) -> u32 {
        rules.games_remaining(self.games_played())
    }

    pub fn max_possible_wins(&self, rules: &SeasonRules) -> u32 {
        self.wins + self.games_remaining(rules)
    }

    pub fn is_losing(&self) -> bool {
        self.games_played() > 0 && self.win_percentage() < 0.5
    }

    pub fn record_game(&mut self, scored: u32, conceded: u32) {
        self.points_for += scored;
        self.points_against += conceded;

        if scored > conceded {
            self.wins += 1;
            self.streak = if self.streak > 0 { self.streak + 1 } else { 1 };
        } else if scored < conceded {
            self.losses += 1;
            self.streak = if self.streak < 0 { self.streak - 1 } else { -1 };
        } else {
            self.ties += 1;
            self.streak = 0;
        }
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ties > 0 {
            write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            write!(f, "{}-{}", self.wins, self.losses)
        }
    }
}
