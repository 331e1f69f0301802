//! # Holloway
//!
//! A procedurally generated maze-dungeon crawl with ranged combat and a
//! smell-based monster proximity model.
//!
//! ## Architecture Overview
//!
//! The crate is a pure simulation core; rendering, windowing, and input
//! translation are left to external front-ends that read the query surface
//! and inject discrete commands. The main pieces are:
//!
//! - **Generation**: a randomized Kruskal's spanning tree over the 4-neighbor
//!   grid (optionally toroidal), plus a configurable number of extra edges for
//!   interconnectivity, then start/end selection and content placement
//! - **Game State**: locations, items, monsters, and a player cursor, all
//!   exclusively owned by one [`AdventureGame`] engine
//! - **Simulation**: movement, item pickup, arrow traversal physics, monster
//!   encounters, and a two-hop breadth-first smell recomputation
//!
//! All randomness flows through one explicitly passed, seeded `StdRng`, so a
//! fixed seed reproduces the same dungeon and the same game, draw for draw.

pub mod game;
pub mod generation;

pub use game::{
    AdventureGame, CellKind, CellView, Direction, Item, Location, Otyugh, Player, Position,
    Smell, Treasure,
};
pub use generation::{Dungeon, DungeonConfig};

/// Core error type for the Holloway simulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Generation parameters rejected before any randomness is consumed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested dungeon cannot be built from valid parameters
    #[error("dungeon build failed: {0}")]
    BuildFailed(String),

    /// Movement in a direction that is not open from the current location
    #[error("cannot move {0} from the current location")]
    BlockedMove(Direction),

    /// Shot aimed at a direction that is not open from the current location
    #[error("cannot shoot {0} from the current location")]
    BlockedShot(Direction),

    /// Shot distance must cover at least one cave
    #[error("shot distance {0} is too short, arrows travel at least 1 cave")]
    ShotTooShort(u32),

    /// Shot distance beyond the arrow's maximum range
    #[error("shot distance {0} is too far, arrows travel at most {max} caves", max = config::MAX_SHOT_DISTANCE)]
    ShotTooFar(u32),

    /// Attempted to shoot with an empty quiver
    #[error("no arrows left, explore and pick some up")]
    OutOfArrows,

    /// Attempted to pick an item the current location does not hold
    #[error("cannot pick {}, item not present at the current location", .0.name())]
    ItemNotPresent(Item),
}

/// Result type used throughout the Holloway codebase.
pub type GameResult<T> = Result<T, GameError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game rule constants.
pub mod config {
    /// Minimum BFS distance between the start and end caves
    pub const MIN_START_END_DISTANCE: usize = 5;

    /// Arrows in the player's quiver at the start of a game
    pub const STARTING_ARROWS: u32 = 3;

    /// Maximum number of caves an arrow can travel
    pub const MAX_SHOT_DISTANCE: u32 = 5;

    /// Arrow hits required to kill a monster
    pub const HITS_TO_KILL: u8 = 2;
}
