//! Player Registry - the pool of rosterable football players
//!
//! Holds each player's position, quality category and fatigue between
//! GameWeeks. The scoring engine reads from it; quality refreshes and
//! fatigue write-backs are applied to it by the host.

pub mod registry;
pub mod types;

pub use registry::PlayerRegistry;
pub use types::{
    Category, Player, PlayerData, PlayerId, PlayerLookupError, Position, FULL_FITNESS,
};
