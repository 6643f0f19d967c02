//! Command implementations for the BragginRights CLI

pub mod common;
pub mod leaderboard;
pub mod lineup;
pub mod players;
pub mod standings;


pub use common::CommandContext;
