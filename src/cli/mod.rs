pub mod args;
pub mod exit;

pub use args::{Cli, Command, WitnessAction};
pub use exit::Outcome;
