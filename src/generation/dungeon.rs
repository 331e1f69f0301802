//! Dungeon construction and ownership of the location grid.
//!
//! A dungeon is built in four steps once the configuration passes validation:
//! topology (spanning tree + interconnectivity), start/end cave selection
//! under the minimum-distance constraint, then treasure, arrow, and monster
//! placement.
//! The placement order is fixed; together with the seeded random stream it
//! makes every build reproducible.

use crate::config::MIN_START_END_DISTANCE;
use crate::game::{Direction, Item, Location, Otyugh, Position, Treasure};
use crate::generation::topology::GridTopologyBuilder;
use crate::generation::DungeonConfig;
use crate::{GameError, GameResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashSet, VecDeque};

/// The finalized grid of locations, with designated start and end caves.
///
/// Owns every [`Location`] and every monster. External collaborators read
/// cells through [`Dungeon::location`]; all mutation goes through the engine.
#[derive(Debug, Clone)]
pub struct Dungeon {
    grid: Vec<Vec<Location>>,
    rows: usize,
    cols: usize,
    start: Position,
    end: Position,
}

impl Dungeon {
    /// Builds a dungeon from a configuration and a seeded random stream.
    ///
    /// Fails with [`GameError::InvalidConfig`] on out-of-range parameters,
    /// before any random draw. Fails with [`GameError::BuildFailed`] when the
    /// grid cannot host the requested interconnectivity or no start/end cave
    /// pair lies at least `MIN_START_END_DISTANCE` apart.
    pub fn generate(config: &DungeonConfig, rng: &mut StdRng) -> GameResult<Self> {
        config.validate()?;

        let builder = GridTopologyBuilder::new(
            config.rows,
            config.cols,
            config.wrapping,
            config.interconnectivity,
        );
        let adjacency = builder.build(rng)?;

        let grid: Vec<Vec<Location>> = adjacency
            .into_iter()
            .enumerate()
            .map(|(row, exits_row)| {
                exits_row
                    .into_iter()
                    .enumerate()
                    .map(|(col, exits)| Location::new(Position::new(row, col), exits))
                    .collect()
            })
            .collect();

        let mut dungeon = Self {
            rows: config.rows,
            cols: config.cols,
            grid,
            start: Position::new(0, 0),
            end: Position::new(0, 0),
        };

        let (start, end) = dungeon.select_endpoints(rng)?;
        dungeon.start = start;
        dungeon.end = end;

        dungeon.place_treasure(config.treasure_percent, rng);
        dungeon.place_arrows(config.treasure_percent, rng);
        dungeon.place_monsters(config.monster_count, rng);

        debug!(
            "dungeon built: {}x{}, start {}, end {}, {} caves / {} tunnels",
            dungeon.rows,
            dungeon.cols,
            dungeon.start,
            dungeon.end,
            dungeon.cave_count(),
            dungeon.tunnel_count()
        );

        Ok(dungeon)
    }

    /// Picks a random start cave, then scans the remaining caves for an end
    /// at BFS distance >= `MIN_START_END_DISTANCE`. Start candidates that
    /// admit no such end are discarded; exhausting them is a build failure.
    fn select_endpoints(&self, rng: &mut StdRng) -> GameResult<(Position, Position)> {
        let mut caves = self.cave_positions();

        while !caves.is_empty() {
            let pick = rng.gen_range(0..caves.len());
            let start = caves[pick];

            for &end in caves.iter().filter(|&&c| c != start) {
                if let Some(distance) = self.shortest_distance(start, end) {
                    if distance >= MIN_START_END_DISTANCE {
                        return Ok((start, end));
                    }
                }
            }

            caves.remove(pick);
        }

        Err(GameError::BuildFailed(format!(
            "no start/end cave pair at distance {} exists; try a larger grid \
             or lower interconnectivity",
            MIN_START_END_DISTANCE
        )))
    }

    /// Fills random caves with random treasure until the target number of
    /// distinct caves holds treasure. A cave counts toward the target only
    /// the first time it is filled; later draws may still add more items.
    fn place_treasure(&mut self, percent: f64, rng: &mut StdRng) {
        let caves = self.cave_positions();
        let mut remaining = ((percent / 100.0) * caves.len() as f64).ceil() as usize;

        while remaining > 0 {
            let cave = caves[rng.gen_range(0..caves.len())];
            let kind = Treasure::ALL[rng.gen_range(0..Treasure::ALL.len())];

            let cell = &mut self.grid[cave.row][cave.col];
            if cell.contents().is_empty() {
                remaining -= 1;
            }
            cell.fill(Item::Treasure(kind));
        }
    }

    /// Drops 1-3 arrows at random locations (caves and tunnels alike) until
    /// the target number of distinct locations holds arrows. The end cave is
    /// skipped once it already holds an arrow; any location counts toward the
    /// target only on its first fill, though later draws may refill it.
    fn place_arrows(&mut self, percent: f64, rng: &mut StdRng) {
        let total_cells = self.rows * self.cols;
        let mut remaining = ((percent / 100.0) * total_cells as f64).ceil() as usize;

        while remaining > 0 {
            let row = rng.gen_range(0..self.rows);
            let col = rng.gen_range(0..self.cols);
            let is_end = Position::new(row, col) == self.end;

            let cell = &mut self.grid[row][col];
            if is_end && cell.count_of(Item::Arrow) > 0 {
                continue;
            }

            let count = rng.gen_range(1..=3);
            if cell.count_of(Item::Arrow) == 0 {
                remaining -= 1;
            }
            for _ in 0..count {
                cell.fill(Item::Arrow);
            }
        }
    }

    /// Puts exactly one monster in the end cave, then scatters the rest over
    /// random caves, one per cave, never the start. The count is clamped so
    /// it can never exceed the eligible caves.
    fn place_monsters(&mut self, count: usize, rng: &mut StdRng) {
        let mut caves = self.cave_positions();
        caves.retain(|&c| c != self.start);

        let mut remaining = if count > caves.len() {
            caves.len().saturating_sub(1)
        } else {
            count
        };

        let end = self.end;
        self.grid[end.row][end.col].put_monster(Otyugh::new(end));
        caves.retain(|&c| c != end);
        remaining = remaining.saturating_sub(1);

        while remaining > 0 {
            let pick = rng.gen_range(0..caves.len());
            let cave = caves.remove(pick);
            self.grid[cave.row][cave.col].put_monster(Otyugh::new(cave));
            remaining -= 1;
        }
    }

    fn cave_positions(&self) -> Vec<Position> {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_cave())
            .map(|cell| cell.position())
            .collect()
    }

    /// The location at `position`, if it lies on the grid.
    pub fn location(&self, position: Position) -> Option<&Location> {
        self.grid.get(position.row).and_then(|row| row.get(position.col))
    }

    /// Engine-side mutable access. The engine only passes coordinates it
    /// obtained from the grid itself.
    pub(crate) fn location_mut(&mut self, position: Position) -> &mut Location {
        &mut self.grid[position.row][position.col]
    }

    /// Coordinate of the start cave.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Coordinate of the end cave.
    pub fn end(&self) -> Position {
        self.end
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of caves (cells with an exit count other than two).
    pub fn cave_count(&self) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_cave())
            .count()
    }

    /// Number of tunnels (cells with exactly two exits).
    pub fn tunnel_count(&self) -> usize {
        self.rows * self.cols - self.cave_count()
    }

    /// Unweighted shortest-path distance between two cells, or `None` when
    /// either coordinate is off the grid or no path exists.
    pub fn shortest_distance(&self, from: Position, to: Position) -> Option<usize> {
        self.location(from)?;
        self.location(to)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 0));

        while let Some((position, depth)) = queue.pop_front() {
            if position == to {
                return Some(depth);
            }

            let cell = &self.grid[position.row][position.col];
            for direction in Direction::ALL {
                if let Some(next) = cell.neighbour(direction) {
                    if visited.insert(next) {
                        queue.push_back((next, depth + 1));
                    }
                }
            }
        }

        None
    }

    #[cfg(test)]
    pub(crate) fn from_parts(grid: Vec<Vec<Location>>, start: Position, end: Position) -> Self {
        let rows = grid.len();
        let cols = grid[0].len();
        Self {
            grid,
            rows,
            cols,
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(config: &DungeonConfig) -> Dungeon {
        let mut rng = config.create_rng();
        Dungeon::generate(config, &mut rng).expect("build should succeed")
    }

    #[test]
    fn test_cave_and_tunnel_counts_cover_grid() {
        let config = DungeonConfig {
            rows: 6,
            cols: 6,
            wrapping: false,
            interconnectivity: 2,
            treasure_percent: 50.0,
            monster_count: 3,
            seed: 42,
        };
        let dungeon = build(&config);

        assert_eq!(dungeon.cave_count() + dungeon.tunnel_count(), 36);
    }

    #[test]
    fn test_generate_rejects_invalid_config_before_building() {
        // an unchecked over-100 percentage would never let the treasure loop
        // reach its fill target
        let config = DungeonConfig {
            treasure_percent: 150.0,
            ..DungeonConfig::default()
        };
        let mut rng = config.create_rng();
        assert!(matches!(
            Dungeon::generate(&config, &mut rng),
            Err(GameError::InvalidConfig(_))
        ));

        let config = DungeonConfig {
            rows: 0,
            ..DungeonConfig::default()
        };
        let mut rng = config.create_rng();
        assert!(matches!(
            Dungeon::generate(&config, &mut rng),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_start_and_end_are_distant_caves() {
        for seed in [1, 7, 42, 1000] {
            let config = DungeonConfig {
                seed,
                ..DungeonConfig::default()
            };
            let dungeon = build(&config);

            assert_ne!(dungeon.start(), dungeon.end());
            assert!(dungeon.location(dungeon.start()).unwrap().is_cave());
            assert!(dungeon.location(dungeon.end()).unwrap().is_cave());

            let distance = dungeon
                .shortest_distance(dungeon.start(), dungeon.end())
                .expect("start and end must be connected");
            assert!(distance >= MIN_START_END_DISTANCE);
        }
    }

    #[test]
    fn test_end_cave_has_monster_start_never() {
        let config = DungeonConfig {
            monster_count: 4,
            ..DungeonConfig::default()
        };
        let dungeon = build(&config);

        let end = dungeon.location(dungeon.end()).unwrap();
        assert!(end.has_monster());
        assert_eq!(end.monster().unwrap().hits_taken(), 0);

        let start = dungeon.location(dungeon.start()).unwrap();
        assert!(!start.has_monster());
    }

    #[test]
    fn test_monsters_dwell_in_caves_only() {
        let config = DungeonConfig {
            rows: 7,
            cols: 7,
            monster_count: 6,
            ..DungeonConfig::default()
        };
        let dungeon = build(&config);

        let mut monsters = 0;
        for row in 0..7 {
            for col in 0..7 {
                let cell = dungeon.location(Position::new(row, col)).unwrap();
                if cell.has_monster() {
                    monsters += 1;
                    assert!(cell.is_cave(), "monster in a tunnel at {}", cell.position());
                    assert_eq!(cell.monster().unwrap().dwelling(), cell.position());
                }
            }
        }
        assert_eq!(monsters, 6);
    }

    #[test]
    fn test_monster_count_clamped_to_available_caves() {
        let config = DungeonConfig {
            rows: 6,
            cols: 6,
            monster_count: 10_000,
            ..DungeonConfig::default()
        };
        // must terminate and never double-occupy a cave
        let dungeon = build(&config);
        assert!(dungeon.location(dungeon.end()).unwrap().has_monster());
    }

    #[test]
    fn test_treasure_fills_requested_cave_fraction() {
        let config = DungeonConfig {
            rows: 8,
            cols: 8,
            treasure_percent: 50.0,
            ..DungeonConfig::default()
        };
        let dungeon = build(&config);

        let caves = dungeon.cave_count();
        let target = ((50.0 / 100.0) * caves as f64).ceil() as usize;

        let mut treasure_caves = 0;
        for row in 0..8 {
            for col in 0..8 {
                let cell = dungeon.location(Position::new(row, col)).unwrap();
                let has_treasure = cell
                    .contents()
                    .iter()
                    .any(|item| matches!(item, Item::Treasure(_)));
                if has_treasure {
                    assert!(cell.is_cave(), "treasure in a tunnel at {}", cell.position());
                    treasure_caves += 1;
                }
            }
        }

        assert!(treasure_caves >= target);
    }

    #[test]
    fn test_zero_percent_places_nothing() {
        let config = DungeonConfig {
            treasure_percent: 0.0,
            ..DungeonConfig::default()
        };
        let dungeon = build(&config);

        for row in 0..dungeon.rows() {
            for col in 0..dungeon.cols() {
                let cell = dungeon.location(Position::new(row, col)).unwrap();
                assert!(cell.contents().is_empty());
            }
        }
    }

    #[test]
    fn test_arrows_appear_in_tunnels_too() {
        // with 100% arrow coverage every cell holds arrows, tunnels included
        let config = DungeonConfig {
            rows: 6,
            cols: 6,
            treasure_percent: 100.0,
            ..DungeonConfig::default()
        };
        let dungeon = build(&config);

        for row in 0..6 {
            for col in 0..6 {
                let cell = dungeon.location(Position::new(row, col)).unwrap();
                assert!(
                    cell.count_of(Item::Arrow) >= 1,
                    "cell {} received no arrows",
                    cell.position()
                );
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_dungeon() {
        let config = DungeonConfig::default();
        let a = build(&config);
        let b = build(&config);

        assert_eq!(a.start(), b.start());
        assert_eq!(a.end(), b.end());
        for row in 0..a.rows() {
            for col in 0..a.cols() {
                let pos = Position::new(row, col);
                let ca = a.location(pos).unwrap();
                let cb = b.location(pos).unwrap();
                assert_eq!(ca.contents(), cb.contents());
                assert_eq!(ca.has_monster(), cb.has_monster());
                assert_eq!(ca.is_cave(), cb.is_cave());
            }
        }
    }

    #[test]
    fn test_out_of_bounds_location_is_none() {
        let dungeon = build(&DungeonConfig::default());
        assert!(dungeon.location(Position::new(99, 0)).is_none());
        assert!(dungeon.location(Position::new(0, 99)).is_none());
        assert!(dungeon.shortest_distance(Position::new(0, 0), Position::new(99, 99)).is_none());
    }
}
