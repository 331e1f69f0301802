//! # Game Module
//!
//! Core vocabulary types and runtime game state.
//!
//! This module defines the directions, coordinates, items, and smell levels
//! shared by generation and simulation, along with the location, player,
//! monster, and engine types that make up a running game.

pub mod engine;
pub mod location;
pub mod monster;
pub mod player;

pub use engine::{AdventureGame, CellKind, CellView};
pub use location::Location;
pub use monster::Otyugh;
pub use player::Player;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cardinal direction on the dungeon grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in a fixed order used for deterministic traversal.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The direction pointing the opposite way.
    ///
    /// # Examples
    ///
    /// ```
    /// use holloway::Direction;
    ///
    /// assert_eq!(Direction::North.opposite(), Direction::South);
    /// assert_eq!(Direction::East.opposite(), Direction::West);
    /// ```
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// A 0-indexed (row, col) coordinate on the dungeon grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a new grid position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Strength of the monster-proximity signal at a location.
///
/// Recomputed by the engine after every move or shot; never set externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Smell {
    None,
    LessPungent,
    MorePungent,
}

/// A kind of treasure found in caves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Treasure {
    Diamond,
    Ruby,
    Sapphire,
}

impl Treasure {
    /// All treasure kinds, used for uniform random placement draws.
    pub const ALL: [Treasure; 3] = [Treasure::Diamond, Treasure::Ruby, Treasure::Sapphire];

    /// Display name of the treasure kind.
    pub fn name(self) -> &'static str {
        match self {
            Treasure::Diamond => "diamond",
            Treasure::Ruby => "ruby",
            Treasure::Sapphire => "sapphire",
        }
    }
}

/// An item that can lie in a dungeon location.
///
/// Treasure appears only in caves; arrows appear in caves and tunnels alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Treasure(Treasure),
    Arrow,
}

impl Item {
    /// Display name of the item.
    pub fn name(&self) -> &'static str {
        match self {
            Item::Treasure(t) => t.name(),
            Item::Arrow => "arrow",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites_are_symmetric() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn test_item_names() {
        assert_eq!(Item::Treasure(Treasure::Diamond).name(), "diamond");
        assert_eq!(Item::Treasure(Treasure::Ruby).name(), "ruby");
        assert_eq!(Item::Treasure(Treasure::Sapphire).name(), "sapphire");
        assert_eq!(Item::Arrow.name(), "arrow");
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(2, 7).to_string(), "(2, 7)");
    }

    #[test]
    fn test_direction_serde_round_trip() {
        let json = serde_json::to_string(&Direction::West).unwrap();
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::West);
    }
}
