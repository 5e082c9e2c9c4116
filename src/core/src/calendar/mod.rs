mod controller;
mod season;

pub use controller::*;
pub use season::*;
