mod engine;
mod report;
mod week;

pub use engine::*;
pub use report::*;
pub use week::*;

#[cfg(test)]
pub(crate) use engine::testing;
