pub mod cli;
pub mod config;
pub mod events;
pub mod state;

pub use state::*;
