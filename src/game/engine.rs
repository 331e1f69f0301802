//! The adventure game engine: a single player embedded in a single dungeon.
//!
//! The engine holds exclusive mutation rights over the dungeon and player.
//! Commands (`move_player`, `pick_item`, `shoot_arrow`) fully resolve before
//! returning; queries are read-only and safe to call at any time. Terminal
//! states are "player reached the end alive" and "player eaten".

use crate::config::MAX_SHOT_DISTANCE;
use crate::game::{Direction, Item, Location, Player, Position, Smell};
use crate::generation::{Dungeon, DungeonConfig};
use crate::{GameError, GameResult};
use log::{debug, info};
use rand::rngs::StdRng;
use std::collections::{HashSet, VecDeque};

/// What a grid cell looks like from the outside, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Cave holding no items
    EmptyCave,
    /// Cave holding treasure and/or arrows
    StockedCave,
    /// Cave occupied by a still-dangerous monster
    MonsterCave,
    /// Passage with exactly two exits
    Tunnel,
}

/// Row-major cell descriptor for external renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub position: Position,
    pub kind: CellKind,
    pub is_start: bool,
    pub is_end: bool,
    pub has_player: bool,
    pub visited: bool,
    pub smell: Smell,
}

/// The simulation engine orchestrating movement, pickup, combat, and smell.
#[derive(Debug)]
pub struct AdventureGame {
    dungeon: Dungeon,
    player: Player,
    game_over: bool,
    rng: StdRng,
}

impl AdventureGame {
    /// Builds the dungeon from `config` and drops the player at the start
    /// cave.
    ///
    /// # Examples
    ///
    /// ```
    /// use holloway::{AdventureGame, DungeonConfig};
    ///
    /// let game = AdventureGame::new(&DungeonConfig::default()).unwrap();
    /// assert!(!game.is_game_over());
    /// assert!(game.player().is_alive());
    /// ```
    pub fn new(config: &DungeonConfig) -> GameResult<Self> {
        config.validate()?;

        let mut rng = config.create_rng();
        let dungeon = Dungeon::generate(config, &mut rng)?;
        let start = dungeon.start();

        let mut game = Self {
            dungeon,
            player: Player::new(start),
            game_over: false,
            rng,
        };
        game.dungeon.location_mut(start).mark_visited();
        game.refresh_smell();

        info!(
            "game started: seed {}, start {}, end {}",
            config.seed,
            start,
            game.dungeon.end()
        );
        Ok(game)
    }

    /// Moves the player one cell in `direction`.
    ///
    /// Entering a cave with a healthy monster is certain death; a once-wounded
    /// monster kills half the time. Reaching the end cave alive wins and ends
    /// the game.
    pub fn move_player(&mut self, direction: Direction) -> GameResult<()> {
        let next = self
            .current_location()
            .neighbour(direction)
            .ok_or(GameError::BlockedMove(direction))?;

        self.player.move_to(next);
        self.dungeon.location_mut(next).mark_visited();
        self.refresh_smell();

        let devoured = match self.dungeon.location(next).and_then(Location::monster) {
            Some(monster) => monster.devours_player(&mut self.rng),
            None => false,
        };

        if devoured {
            self.player.die();
            self.game_over = true;
            info!("player devoured at {}", next);
        } else if next == self.dungeon.end() {
            self.game_over = true;
            info!("player reached the end cave alive");
        }

        Ok(())
    }

    /// Picks one copy of `item` from the current location into the player's
    /// treasure tally or quiver.
    pub fn pick_item(&mut self, item: Item) -> GameResult<()> {
        let here = self.player.location();
        if !self.dungeon.location_mut(here).pop(item) {
            return Err(GameError::ItemNotPresent(item));
        }

        match item {
            Item::Treasure(kind) => self.player.collect_treasure(kind),
            Item::Arrow => self.player.collect_arrow(),
        }
        debug!("picked {} at {}", item, here);
        Ok(())
    }

    /// Shoots an arrow `distance` caves in `direction`. Returns whether a
    /// monster was struck.
    ///
    /// The arrow bends freely through tunnels but continues past a cave only
    /// in a straight line. One arrow is spent per shot regardless of outcome;
    /// all precondition failures leave the quiver untouched.
    pub fn shoot_arrow(&mut self, direction: Direction, distance: u32) -> GameResult<bool> {
        if !self.current_location().is_open(direction) {
            return Err(GameError::BlockedShot(direction));
        }
        if distance == 0 {
            return Err(GameError::ShotTooShort(distance));
        }
        if distance > MAX_SHOT_DISTANCE {
            return Err(GameError::ShotTooFar(distance));
        }
        if self.player.arrows_left() == 0 {
            return Err(GameError::OutOfArrows);
        }

        self.player.spend_arrow();
        let hit = self.arrow_flight(self.player.location(), direction, distance);
        self.refresh_smell();

        debug!(
            "shot {} for {} caves: {}",
            direction,
            distance,
            if hit { "hit" } else { "miss" }
        );
        Ok(hit)
    }

    /// Simulates projectile traversal. Tunnels redirect the arrow through
    /// their single remaining exit without consuming distance; each cave
    /// consumes one unit. A hit lands only when distance runs out inside a
    /// cave holding a still-dangerous monster.
    fn arrow_flight(&mut self, start: Position, direction: Direction, distance: u32) -> bool {
        let mut here = start;
        let mut heading = direction;
        let mut remaining = distance;

        while remaining > 0 {
            let next = match self
                .dungeon
                .location(here)
                .and_then(|cell| cell.neighbour(heading))
            {
                Some(next) => next,
                None => return false,
            };

            let (is_cave, continues_straight, tunnel_exit) = {
                let cell = self.dungeon.location(next).expect("neighbour is on the grid");
                let entry = heading.opposite();
                let exit = cell.open_directions().find(|&d| d != entry);
                (cell.is_cave(), cell.is_open(heading), exit)
            };

            if is_cave {
                remaining -= 1;

                if remaining == 0 {
                    if let Some(monster) = self.dungeon.location_mut(next).monster_mut() {
                        if monster.is_alive() {
                            monster.take_hit();
                            return true;
                        }
                    }
                    return false;
                }
                if !continues_straight {
                    return false;
                }
                here = next;
            } else {
                // tunnels have exactly two exits and the entry side is always
                // open, so exactly one exit remains
                heading = match tunnel_exit {
                    Some(exit) => exit,
                    None => return false,
                };
                here = next;
            }
        }

        false
    }

    /// Recomputes the smell at the player's current location from two
    /// depth-capped breadth-first sweeps.
    fn refresh_smell(&mut self) {
        let here = self.player.location();
        let depth_one = self.dangerous_monsters_within(here, 1);
        let depth_two = self.dangerous_monsters_within(here, 2);

        let smell = if depth_one > 0 || depth_two > 1 {
            Smell::MorePungent
        } else if depth_two == 1 {
            Smell::LessPungent
        } else {
            Smell::None
        };

        self.dungeon.location_mut(here).set_smell(smell);
    }

    /// Counts distinct locations within `max_depth` hops that hold a monster
    /// with fewer than two hits taken.
    fn dangerous_monsters_within(&self, from: Position, max_depth: usize) -> usize {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 0usize));

        let mut count = 0;
        while let Some((position, depth)) = queue.pop_front() {
            let cell = match self.dungeon.location(position) {
                Some(cell) => cell,
                None => continue,
            };

            if cell.monster().is_some_and(|m| m.is_alive()) {
                count += 1;
            }

            if depth < max_depth {
                for direction in Direction::ALL {
                    if let Some(next) = cell.neighbour(direction) {
                        if visited.insert(next) {
                            queue.push_back((next, depth + 1));
                        }
                    }
                }
            }
        }

        count
    }

    /// The player, read-only.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The dungeon, read-only.
    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// The location the player currently stands in.
    pub fn current_location(&self) -> &Location {
        self.dungeon
            .location(self.player.location())
            .expect("player location is always on the grid")
    }

    /// True once the player has been eaten or has reached the end cave alive.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Row-major cell descriptors for external renderers.
    pub fn snapshot(&self) -> Vec<CellView> {
        let mut cells = Vec::with_capacity(self.dungeon.rows() * self.dungeon.cols());

        for row in 0..self.dungeon.rows() {
            for col in 0..self.dungeon.cols() {
                let position = Position::new(row, col);
                let cell = self.dungeon.location(position).expect("grid coordinate");

                let kind = if !cell.is_cave() {
                    CellKind::Tunnel
                } else if cell.monster().is_some_and(|m| m.is_alive()) {
                    CellKind::MonsterCave
                } else if !cell.contents().is_empty() {
                    CellKind::StockedCave
                } else {
                    CellKind::EmptyCave
                };

                cells.push(CellView {
                    position,
                    kind,
                    is_start: position == self.dungeon.start(),
                    is_end: position == self.dungeon.end(),
                    has_player: position == self.player.location(),
                    visited: cell.is_visited(),
                    smell: cell.smell(),
                });
            }
        }

        cells
    }

    /// A bird's-eye text rendering of the whole dungeon with the player,
    /// start, and end marked. Useful for console front-ends and debugging.
    pub fn render_map(&self) -> String {
        let rows = self.dungeon.rows();
        let cols = self.dungeon.cols();
        let mut layout: Vec<Vec<Option<String>>> = vec![vec![None; cols * 3]; rows * 3];

        for view in self.snapshot() {
            let row = 1 + view.position.row * 3;
            let col = 1 + view.position.col * 3;

            let glyph = match view.kind {
                CellKind::Tunnel => " + ",
                CellKind::MonsterCave => "<M>",
                CellKind::StockedCave => "{X}",
                CellKind::EmptyCave => "(C)",
            };
            layout[row][col] = Some(glyph.to_string());

            let cell = self.dungeon.location(view.position).expect("grid coordinate");
            for direction in cell.open_directions() {
                match direction {
                    Direction::North => layout[row - 1][col] = Some("| |".to_string()),
                    Direction::South => layout[row + 1][col] = Some("| |".to_string()),
                    Direction::East => layout[row][col + 1] = Some("===".to_string()),
                    Direction::West => layout[row][col - 1] = Some("===".to_string()),
                }
            }
        }

        let mark = |layout: &mut Vec<Vec<Option<String>>>, position: Position, marker: char| {
            let row = 1 + position.row * 3;
            let col = 1 + position.col * 3;
            let glyph = layout[row][col].take().unwrap_or_else(|| "   ".to_string());
            layout[row][col] = Some(format!("{}{}{}", &glyph[0..1], marker, &glyph[2..3]));
        };

        mark(&mut layout, self.dungeon.start(), 'S');
        mark(&mut layout, self.dungeon.end(), 'G');
        if self.current_location().is_cave() {
            mark(&mut layout, self.player.location(), 'P');
        } else {
            let row = 1 + self.player.location().row * 3;
            let col = 1 + self.player.location().col * 3;
            layout[row][col] = Some(" P ".to_string());
        }

        let mut output = String::new();
        for layout_row in &layout {
            for slot in layout_row {
                if let Some(glyph) = slot {
                    output.push_str(glyph);
                }
                output.push('\t');
            }
            output.push('\n');
        }

        output.push_str(
            "Legend to the game state:\n\
             P\t\t==> Player\n\
             (C)\t\t==> Cave with no treasure\n\
             {X}\t\t==> Cave with items\n\
             <M>\t\t==> Cave with monster\n\
             +\t\t==> Tunnel\n\
             S\t\t==> Start Cave\n\
             G\t\t==> End Cave\n\
             | or ---\t==> Paths",
        );

        output
    }

    #[cfg(test)]
    pub(crate) fn with_dungeon(dungeon: Dungeon, seed: u64) -> Self {
        use rand::SeedableRng;

        let start = dungeon.start();
        let mut game = Self {
            dungeon,
            player: Player::new(start),
            game_over: false,
            rng: StdRng::seed_from_u64(seed),
        };
        game.dungeon.location_mut(start).mark_visited();
        game.refresh_smell();
        game
    }
}
