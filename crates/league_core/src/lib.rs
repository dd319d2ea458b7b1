pub mod error;
pub mod memory;
pub mod roster;
pub mod stats;
pub mod store;
pub mod types;

// Re-export the league model and the persistence seam
pub use error::*;
pub use memory::*;
pub use roster::{RosterConfig, RosterGenerator};
pub use stats::{average_score, leaderboard, print_leaderboard, PlayerStats};
pub use store::*;
pub use types::*;
