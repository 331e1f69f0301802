//! A single cell of the dungeon grid.
//!
//! A location with exactly two open directions is a tunnel; every other
//! direction count makes it a cave. Caves may hold treasure, arrows, and at
//! most one monster; tunnels hold arrows only.

use crate::game::{Direction, Item, Otyugh, Position, Smell};
use std::collections::HashMap;

/// A grid cell: exits, contents, occupant, smell, and visited flag.
///
/// Created once during dungeon build and never destroyed; only its contents,
/// occupant, smell, and visited flag mutate over a game. All mutation is
/// crate-internal — external collaborators see a read-only view.
#[derive(Debug, Clone)]
pub struct Location {
    position: Position,
    exits: HashMap<Direction, Position>,
    contents: Vec<Item>,
    occupant: Option<Otyugh>,
    smell: Smell,
    visited: bool,
}

impl Location {
    pub(crate) fn new(position: Position, exits: HashMap<Direction, Position>) -> Self {
        Self {
            position,
            exits,
            contents: Vec::new(),
            occupant: None,
            smell: Smell::None,
            visited: false,
        }
    }

    /// The cell's own grid coordinate.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Directions that lead away from this cell.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.exits.contains_key(d))
    }

    /// Whether the given direction is open from this cell.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.exits.contains_key(&direction)
    }

    /// The neighbouring coordinate reached by leaving through `direction`,
    /// if that direction is open.
    pub fn neighbour(&self, direction: Direction) -> Option<Position> {
        self.exits.get(&direction).copied()
    }

    /// Items currently lying in this cell.
    pub fn contents(&self) -> &[Item] {
        &self.contents
    }

    /// Number of copies of `item` lying in this cell.
    pub fn count_of(&self, item: Item) -> usize {
        self.contents.iter().filter(|&&i| i == item).count()
    }

    /// True iff this cell is a cave (any exit count other than exactly two).
    pub fn is_cave(&self) -> bool {
        self.exits.len() != 2
    }

    /// Whether a monster dwells here, dead or alive.
    pub fn has_monster(&self) -> bool {
        self.occupant.is_some()
    }

    /// The dwelling monster, if any.
    pub fn monster(&self) -> Option<&Otyugh> {
        self.occupant.as_ref()
    }

    /// Current smell level at this cell.
    pub fn smell(&self) -> Smell {
        self.smell
    }

    /// Whether the player has ever entered this cell.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn fill(&mut self, item: Item) {
        self.contents.push(item);
    }

    /// Removes one copy of `item`. Returns false if none was present.
    pub(crate) fn pop(&mut self, item: Item) -> bool {
        match self.contents.iter().position(|&i| i == item) {
            Some(idx) => {
                self.contents.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Installs a monster. The dungeon builder never targets an occupied cave
    /// or a tunnel, so both are treated as builder bugs.
    pub(crate) fn put_monster(&mut self, monster: Otyugh) {
        debug_assert!(self.is_cave(), "monsters dwell in caves only");
        debug_assert!(self.occupant.is_none(), "cave already occupied");
        self.occupant = Some(monster);
    }

    pub(crate) fn monster_mut(&mut self) -> Option<&mut Otyugh> {
        self.occupant.as_mut()
    }

    pub(crate) fn set_smell(&mut self, smell: Smell) {
        self.smell = smell;
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Treasure;

    fn exits(dirs: &[(Direction, Position)]) -> HashMap<Direction, Position> {
        dirs.iter().copied().collect()
    }

    #[test]
    fn test_two_exits_is_tunnel_everything_else_is_cave() {
        let one = Location::new(
            Position::new(0, 0),
            exits(&[(Direction::East, Position::new(0, 1))]),
        );
        let two = Location::new(
            Position::new(0, 1),
            exits(&[
                (Direction::West, Position::new(0, 0)),
                (Direction::East, Position::new(0, 2)),
            ]),
        );
        let three = Location::new(
            Position::new(1, 1),
            exits(&[
                (Direction::North, Position::new(0, 1)),
                (Direction::East, Position::new(1, 2)),
                (Direction::West, Position::new(1, 0)),
            ]),
        );

        assert!(one.is_cave());
        assert!(!two.is_cave());
        assert!(three.is_cave());
    }

    #[test]
    fn test_contents_frequency_and_pop() {
        let mut cell = Location::new(
            Position::new(0, 0),
            exits(&[(Direction::East, Position::new(0, 1))]),
        );
        cell.fill(Item::Arrow);
        cell.fill(Item::Arrow);
        cell.fill(Item::Treasure(Treasure::Ruby));

        assert_eq!(cell.count_of(Item::Arrow), 2);
        assert_eq!(cell.count_of(Item::Treasure(Treasure::Ruby)), 1);

        assert!(cell.pop(Item::Arrow));
        assert_eq!(cell.count_of(Item::Arrow), 1);
        assert!(!cell.pop(Item::Treasure(Treasure::Diamond)));
    }

    #[test]
    fn test_neighbour_lookup() {
        let cell = Location::new(
            Position::new(1, 1),
            exits(&[(Direction::North, Position::new(0, 1))]),
        );
        assert_eq!(cell.neighbour(Direction::North), Some(Position::new(0, 1)));
        assert_eq!(cell.neighbour(Direction::South), None);
        assert!(cell.is_open(Direction::North));
        assert!(!cell.is_open(Direction::West));
    }
}
