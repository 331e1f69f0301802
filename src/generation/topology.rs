//! Randomized grid topology construction.
//!
//! Builds the maze graph with a randomized Kruskal's algorithm: enumerate
//! every candidate edge of the (optionally wrapping) 4-neighbor grid, draw
//! edges uniformly at random, keep the ones that merge two components, and
//! defer the redundant ones. The deferred pool then supplies the requested
//! number of interconnectivity edges.

use crate::game::{Direction, Position};
use crate::{GameError, GameResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Per-cell mapping of open directions to neighbour coordinates.
pub(crate) type AdjacencyGrid = Vec<Vec<HashMap<Direction, Position>>>;

/// An undirected candidate edge between two adjacent cells.
type Edge = (Position, Position);

/// Disjoint-set forest with path compression and union by rank.
///
/// Tracks which cells are already connected while the spanning tree grows.
#[derive(Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            components: size,
        }
    }

    pub(crate) fn find(&mut self, node: usize) -> usize {
        if self.parent[node] != node {
            let root = self.find(self.parent[node]);
            self.parent[node] = root;
        }
        self.parent[node]
    }

    /// Merges the sets holding `a` and `b`. Returns false if they were
    /// already in the same set.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.components -= 1;
        true
    }

    pub(crate) fn components(&self) -> usize {
        self.components
    }
}

/// Builds the adjacency structure for a dungeon grid: a spanning tree over
/// all cells plus a fixed number of extra edges.
pub(crate) struct GridTopologyBuilder {
    rows: usize,
    cols: usize,
    wrapping: bool,
    interconnectivity: usize,
}

impl GridTopologyBuilder {
    pub(crate) fn new(rows: usize, cols: usize, wrapping: bool, interconnectivity: usize) -> Self {
        Self {
            rows,
            cols,
            wrapping,
            interconnectivity,
        }
    }

    /// Runs the randomized edge selection and returns the finished adjacency
    /// grid, or a build error when the grid cannot satisfy the request.
    pub(crate) fn build(&self, rng: &mut StdRng) -> GameResult<AdjacencyGrid> {
        let mut adjacency: AdjacencyGrid = vec![vec![HashMap::new(); self.cols]; self.rows];
        let mut candidates = self.candidate_edges();
        let mut partition = DisjointSet::new(self.rows * self.cols);
        let mut leftovers: Vec<Edge> = Vec::new();

        let total_candidates = candidates.len();

        // Tree phase: random draws until one candidate remains. Redundant
        // draws become the pool for interconnectivity edges.
        while candidates.len() > 1 {
            let pick = rng.gen_range(0..candidates.len());
            let (a, b) = candidates.remove(pick);

            if partition.union(self.cell_index(a), self.cell_index(b)) {
                self.connect(&mut adjacency, a, b);
            } else {
                leftovers.push((a, b));
            }
        }

        if partition.components() != 1 {
            return Err(GameError::BuildFailed(format!(
                "{}x{} grid cannot form a connected maze ({} components left)",
                self.rows,
                self.cols,
                partition.components()
            )));
        }

        if self.interconnectivity > leftovers.len() {
            return Err(GameError::BuildFailed(format!(
                "interconnectivity {} exceeds the {} spare edges of a {}x{} grid",
                self.interconnectivity,
                leftovers.len(),
                self.rows,
                self.cols
            )));
        }

        let mut remaining = self.interconnectivity;
        while remaining > 0 {
            let pick = rng.gen_range(0..leftovers.len());
            let (a, b) = leftovers.remove(pick);
            self.connect(&mut adjacency, a, b);
            remaining -= 1;
        }

        debug!(
            "topology built: {}x{}, wrapping={}, {} candidate edges, {} extra edges",
            self.rows, self.cols, self.wrapping, total_candidates, self.interconnectivity
        );

        Ok(adjacency)
    }

    /// Enumerates every undirected candidate edge exactly once, in row-major
    /// cell order. Wrap edges are discovered from the 0-boundary side.
    fn candidate_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut seen: HashSet<Edge> = HashSet::new();

        let mut push = |edges: &mut Vec<Edge>, a: Position, b: Position| {
            if a != b && !seen.contains(&(a, b)) && !seen.contains(&(b, a)) {
                seen.insert((a, b));
                edges.push((a, b));
            }
        };

        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = Position::new(row, col);

                if row + 1 < self.rows {
                    push(&mut edges, here, Position::new(row + 1, col));
                }
                if row >= 1 {
                    push(&mut edges, here, Position::new(row - 1, col));
                }
                if col + 1 < self.cols {
                    push(&mut edges, here, Position::new(row, col + 1));
                }
                if col >= 1 {
                    push(&mut edges, here, Position::new(row, col - 1));
                }

                if self.wrapping {
                    if row == 0 {
                        push(&mut edges, here, Position::new(self.rows - 1, col));
                    }
                    if col == 0 {
                        push(&mut edges, here, Position::new(row, self.cols - 1));
                    }
                }
            }
        }

        edges
    }

    /// Opens an edge in both directions.
    fn connect(&self, adjacency: &mut AdjacencyGrid, a: Position, b: Position) {
        adjacency[a.row][a.col].insert(self.direction_between(a, b), b);
        adjacency[b.row][b.col].insert(self.direction_between(b, a), a);
    }

    /// Maps a coordinate delta onto the logical travel direction. Wrap-around
    /// deltas of magnitude rows-1 / cols-1 invert the naive sign.
    fn direction_between(&self, from: Position, to: Position) -> Direction {
        let dr = to.row as i64 - from.row as i64;
        let dc = to.col as i64 - from.col as i64;
        let wrap_rows = self.rows as i64 - 1;
        let wrap_cols = self.cols as i64 - 1;

        if dr == -1 && dc == 0 {
            Direction::North
        } else if dr == 1 && dc == 0 {
            Direction::South
        } else if dc == 1 && dr == 0 {
            Direction::East
        } else if dc == -1 && dr == 0 {
            Direction::West
        } else if dr == wrap_rows && dc == 0 {
            Direction::North
        } else if dr == -wrap_rows && dc == 0 {
            Direction::South
        } else if dc == -wrap_cols && dr == 0 {
            Direction::East
        } else {
            Direction::West
        }
    }

    fn cell_index(&self, position: Position) -> usize {
        position.row * self.cols + position.col
    }
}
