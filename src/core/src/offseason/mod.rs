mod phase;
mod state;
mod task;

pub use phase::*;
pub use state::*;
pub use task::*;
