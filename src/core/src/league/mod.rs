mod implications;
mod playoffs;
mod schedule;
mod standings;
mod team;

pub use implications::*;
pub use playoffs::*;
pub use schedule::*;
pub use standings::*;
pub use team::*;
