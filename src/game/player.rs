//! The player: a mutable cursor over the dungeon grid.

use crate::config::STARTING_ARROWS;
use crate::game::{Position, Treasure};
use std::collections::HashMap;

/// The adventurer navigating the dungeon.
///
/// Holds only a coordinate into the dungeon's location graph, never ownership
/// of any part of it; moving the player never touches the grid structure.
#[derive(Debug, Clone)]
pub struct Player {
    location: Position,
    treasure: HashMap<Treasure, u32>,
    arrows: u32,
    alive: bool,
}

impl Player {
    pub(crate) fn new(start: Position) -> Self {
        Self {
            location: start,
            treasure: HashMap::new(),
            arrows: STARTING_ARROWS,
            alive: true,
        }
    }

    /// Coordinate of the player's current location.
    pub fn location(&self) -> Position {
        self.location
    }

    /// Treasure collected so far, keyed by kind.
    pub fn treasure_collected(&self) -> &HashMap<Treasure, u32> {
        &self.treasure
    }

    /// Arrows remaining in the quiver.
    pub fn arrows_left(&self) -> u32 {
        self.arrows
    }

    /// False once a monster has eaten the player; never reset.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn move_to(&mut self, location: Position) {
        self.location = location;
    }

    pub(crate) fn collect_treasure(&mut self, kind: Treasure) {
        *self.treasure.entry(kind).or_insert(0) += 1;
    }

    pub(crate) fn collect_arrow(&mut self) {
        self.arrows += 1;
    }

    /// Takes one arrow from the quiver; the engine checks emptiness first.
    pub(crate) fn spend_arrow(&mut self) {
        debug_assert!(self.arrows > 0, "spend_arrow with empty quiver");
        self.arrows -= 1;
    }

    pub(crate) fn die(&mut self) {
        self.alive = false;
    }
}
