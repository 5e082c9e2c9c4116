use gm_core::career::{CareerState, GeneralManager, GmContract, OwnerProfile};
use gm_core::league::{RosterPlayer, Schedule, ScheduledGame, Team};
use gm_core::simulation::{GameConfig, GameEngine, GameInjury, GameOutcome};
use gm_core::{LeagueState, SeasonCalendar, SeasonRules};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const CONFERENCES: [&str; 2] = ["Atlantic", "Pacific"];
const DIVISIONS: [&str; 4] = ["North", "South", "East", "West"];

const CITIES: [&str; 32] = [
    "Harbor City", "Ridgeline", "Prairie View", "Canyon Falls", "Lakeport", "Iron Bay", "Summit", "Riverbend",
    "Granite Hills", "Bayside", "Northgate", "Fort Aldous", "Cedar Point", "Mesa Verde", "Stonebridge", "Port Wren",
    "Silver Lake", "Redwater", "Kingsford", "Maple Grove", "Dunmore", "Coral Springs", "Highmoor", "Westfield",
    "Ashford", "Blue Ridge", "Elm Harbor", "Falcon Heights", "Glenwood", "Holloway", "Ironwood", "Juniper Flats",
];

const NICKNAMES: [&str; 32] = [
    "Gulls", "Elk", "Storm", "Forge", "Pilots", "Anchors", "Peaks", "Otters", "Rams", "Sharks", "Knights",
    "Sentinels", "Comets", "Scorpions", "Masons", "Wrens", "Foxes", "Raiders", "Crowns", "Lumberjacks", "Badgers",
    "Barracudas", "Moors", "Pioneers", "Stallions", "Hawks", "Mariners", "Falcons", "Wolves", "Hounds", "Titans",
    "Coyotes",
];

const POSITIONS: [(&str, usize); 11] = [
    ("QB", 3),
    ("RB", 4),
    ("WR", 6),
    ("TE", 3),
    ("OL", 9),
    ("DL", 8),
    ("LB", 6),
    ("CB", 6),
    ("S", 4),
    ("K", 1),
    ("P", 1),
];

const INJURIES: [&str; 6] = ["hamstring", "ankle sprain", "concussion", "knee", "shoulder", "turf toe"];

pub struct LeagueGenerator {
    rng: StdRng,
    next_player_id: u32,
}

impl LeagueGenerator {
    pub fn new(seed: u64) -> Self {
        LeagueGenerator {
            rng: StdRng::seed_from_u64(seed),
            next_player_id: 1,
        }
    }

    pub fn generate(&mut self, year: u16, rules: &SeasonRules) -> LeagueState {
        let teams = self.generate_teams();
        let schedule = Self::generate_schedule(&teams, rules);

        let controlled = self.rng.random_range(0..teams.len()) as u32 + 1;
        let career = CareerState::new(
            GeneralManager::new(1, "Alex Mercer", controlled),
            OwnerProfile::new(
                1,
                "J. Hartley",
                self.rng.random_range(20..80),
                self.rng.random_range(30..95),
                self.rng.random_bool(0.5),
            ),
            GmContract {
                annual_salary: 2_500_000,
                years_remaining: 4,
            },
        );

        LeagueState::new(SeasonCalendar::new(year), teams, schedule, career, rules)
    }

    fn generate_teams(&mut self) -> Vec<Team> {
        let mut teams = Vec::with_capacity(CITIES.len());

        for (idx, (city, nickname)) in CITIES.iter().zip(NICKNAMES.iter()).enumerate() {
            let conference = CONFERENCES[idx / 16];
            let division = DIVISIONS[(idx / 4) % 4];
            let abbreviation: String = city.chars().filter(|c| c.is_ascii_uppercase()).chain(nickname.chars().take(2)).collect();

            let roster = self.generate_roster();

            teams.push(
                Team::new(
                    idx as u32 + 1,
                    format!("{} {}", city, nickname),
                    abbreviation.to_uppercase(),
                    conference,
                    division,
                )
                .with_roster(roster),
            );
        }

        teams
    }

    fn generate_roster(&mut self) -> Vec<RosterPlayer> {
        let mut roster = Vec::new();

        for (position, count) in POSITIONS {
            for depth in 1..=count {
                let id = self.next_player_id;
                self.next_player_id += 1;

                roster.push(RosterPlayer::new(id, format!("{} #{}", position, depth), position));
            }
        }

        roster
    }

    /// Circle-method round robin: 17 rounds spread over the regular season
    /// with one league-wide bye week in the middle.
    fn generate_schedule(teams: &[Team], rules: &SeasonRules) -> Schedule {
        let mut rotation: Vec<u32> = teams.iter().map(|t| t.id).collect();
        let n = rotation.len();
        let bye_week = rules.regular_season_weeks / 2;

        let weeks = (1..=rules.regular_season_weeks).filter(|week| *week != bye_week);

        let mut games = Vec::new();
        let mut next_id = 1;

        for (round, week) in weeks.take(rules.games_per_team as usize).enumerate() {
            for i in 0..n / 2 {
                let (a, b) = (rotation[i], rotation[n - 1 - i]);
                let (home, away) = if (round + i) % 2 == 0 { (a, b) } else { (b, a) };

                games.push(ScheduledGame::new(next_id, week, home, away));
                next_id += 1;
            }

            rotation[1..].rotate_right(1);
        }

        Schedule::new(games)
    }
}

/// Score generator standing in for a real play-by-play engine. Each game
/// gets its own RNG derived from the seed and the matchup, so results do not
/// depend on the order rayon plays them in.
pub struct DemoEngine {
    seed: u64,
}

impl DemoEngine {
    pub fn new(seed: u64) -> Self {
        DemoEngine { seed }
    }

    fn game_rng(&self, config: &GameConfig) -> StdRng {
        let identity = ((config.week as u64) << 40) ^ ((config.home_team_id as u64) << 20) ^ config.away_team_id as u64;

        StdRng::seed_from_u64(self.seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ identity)
    }

    fn team_strength(team: &Team) -> u32 {
        // healthy depth is all the demo knows about a team
        team.roster.iter().filter(|p| !p.is_injured()).count() as u32
    }
}

impl GameEngine for DemoEngine {
    fn play(&self, config: &GameConfig, home: &Team, away: &Team) -> GameOutcome {
        let mut rng = self.game_rng(config);

        let home_edge = Self::team_strength(home) / 10 + 3;
        let away_edge = Self::team_strength(away) / 10;

        let home_score = rng.random_range(0..35) + home_edge;
        let mut away_score = rng.random_range(0..35) + away_edge;

        if config.is_playoff && home_score == away_score {
            away_score = away_score.saturating_sub(3);
        }

        let mut injuries = Vec::new();
        for team in [home, away] {
            if rng.random_bool(0.3) && !team.roster.is_empty() {
                let player = &team.roster[rng.random_range(0..team.roster.len())];

                injuries.push(GameInjury {
                    player_id: player.id,
                    player_name: player.name.clone(),
                    team_id: team.id,
                    injury_type: INJURIES[rng.random_range(0..INJURIES.len())].to_string(),
                    weeks_out: rng.random_range(0..5),
                });
            }
        }

        GameOutcome::from_score(config, home_score, away_score).with_injuries(injuries)
    }
}
