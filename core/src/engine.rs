use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use rand::Rng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Chance that a hit mine turns out to be a dud and play continues.
const DUD_CHANCE: f64 = 0.5;

/// One game's playing surface: a fixed mine layout plus the per-cell
/// reveal state. Lifecycle (won/lost bookkeeping) lives in [`GameSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    cells: Array2<BoardCell>,
}

impl Board {
    pub fn new(layout: MineLayout) -> Self {
        let cells = Array2::default(layout.size().to_nd_index());
        Self { layout, cells }
    }

    /// Generates a fresh layout for `config` and wraps it in a board.
    pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        RandomLayoutGenerator.generate(config, rng).map(Self::new)
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.layout.safe_cell_count()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<BoardCell> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Mine lookup, for rendering a finished game.
    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.layout.contains_mine(coords))
    }

    /// True once every safe cell has been opened. Mine cells, opened or
    /// not, never affect the result.
    pub fn is_won(&self) -> bool {
        let (size_x, size_y) = self.size();
        for x in 0..size_x {
            for y in 0..size_y {
                let coords = (x, y);
                if !self.layout.contains_mine(coords)
                    && !self.cells[coords.to_nd_index()].is_cleared()
                {
                    return false;
                }
            }
        }
        true
    }

    /// Opens one cell. Hitting a mine draws the dud coin from `rng`;
    /// opening a zero-count cell cascades through its whole zero region.
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        coords: Coord2,
        rng: &mut R,
    ) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if !self.cells[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::AlreadyOpen);
        }

        if self.layout.contains_mine(coords) {
            return Ok(self.reveal_mine(coords, rng));
        }

        self.open_cell(coords);
        if self.layout.neighbor_count(coords) == 0 {
            self.flood_open(coords);
        }
        Ok(RevealOutcome::Opened)
    }

    fn reveal_mine<R: Rng + ?Sized>(&mut self, coords: Coord2, rng: &mut R) -> RevealOutcome {
        if rng.random_bool(DUD_CHANCE) {
            log::debug!("mine at {:?} was a dud", coords);
            self.cells[coords.to_nd_index()] = BoardCell::Dud;
            RevealOutcome::Dud
        } else {
            log::debug!("mine at {:?} went off", coords);
            self.cells[coords.to_nd_index()] = BoardCell::Exploded;
            RevealOutcome::Exploded
        }
    }

    fn open_cell(&mut self, coords: Coord2) {
        let count = self.layout.neighbor_count(coords);
        self.cells[coords.to_nd_index()] = BoardCell::Revealed(count);
        log::trace!("opened {:?}, neighbor mines: {}", coords, count);
    }

    /// Breadth-first cascade from an opened zero-count cell. Every cell is
    /// visited at most once; mines are never enqueued.
    fn flood_open(&mut self, start: Coord2) {
        let mut visited: HashSet<Coord2> = HashSet::new();
        visited.insert(start);

        let mut to_visit: VecDeque<Coord2> = self
            .layout
            .iter_neighbors(start)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden())
            .filter(|&pos| !self.layout.contains_mine(pos))
            .collect();

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }
            if !self.cells[coords.to_nd_index()].is_hidden() {
                continue;
            }

            self.open_cell(coords);

            if self.layout.neighbor_count(coords) == 0 {
                let next = self
                    .layout
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden())
                    .filter(|&pos| !self.layout.contains_mine(pos))
                    .filter(|pos| !visited.contains(pos));
                to_visit.extend(next);
            }
        }
    }
}
