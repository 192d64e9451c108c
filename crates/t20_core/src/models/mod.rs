pub mod slot;
pub mod team;
pub mod topology;

pub use slot::SlotRef;
pub use team::{Roster, TeamId, TeamIdx};
pub use topology::{KnockoutConfig, Super8Config, Topology, DEFAULT_TOURNAMENT_NAME};
