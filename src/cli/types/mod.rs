//! Type-safe wrappers and enums for league data.

pub mod filters;
pub mod ids;
pub mod position;
pub mod time;

pub use filters::StoreBackend;
pub use ids::ManagerName;
pub use position::Position;
pub use time::{Season, Week, WeekKey};
