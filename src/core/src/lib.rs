pub mod calendar;
pub mod career;
pub mod config;
pub mod error;
pub mod league;
pub mod offseason;
pub mod random;
pub mod simulation;
pub mod state;

pub use calendar::{AdvanceOutcome, AdvanceReport, SeasonCalendar, SeasonController, SeasonStage};
pub use career::{CareerState, FiringRecord, GeneralManager, GmContract, OwnerProfile};
pub use config::SeasonRules;
pub use error::{SeasonError, ValidationError};
pub use random::{RandomSource, SeededRandom};
pub use simulation::{GameConfig, GameEngine, GameInjury, GameOutcome, WeekResults};
pub use state::LeagueState;
