//! Lineup construction: slots, the assignment engine and editing sessions.

pub mod engine;
pub mod session;
pub mod slots;


pub use engine::{Lineup, LineupEngine};
pub use session::{EditingSession, SessionState};
pub use slots::{LineupRules, RosterConfig, SlotKind, SlotLabel, SALARY_CAP};
