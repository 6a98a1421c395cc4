#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod types;

#[cfg(test)]
mod testing;

/// Board dimensions and mine total for one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated configuration: both dimensions positive, at least one safe
    /// cell left over.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    /// The fixed 6x6 board with 8 mines the game ships with.
    fn default() -> Self {
        Self::new_unchecked((6, 6), 8)
    }
}

/// Mine placement plus the neighbor counts derived from it. Both grids are
/// fixed at construction; the rest of the crate only reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    neighbor_counts: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from an explicit mask, computing the neighbor count
    /// of every safe cell. Rejects empty grids and grids with no safe cell.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let dim = mine_mask.dim();
        let size: Coord2 = (
            dim.0.try_into().map_err(|_| GameError::InvalidSize)?,
            dim.1.try_into().map_err(|_| GameError::InvalidSize)?,
        );
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if mine_count >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }

        let mut neighbor_counts = Array2::from_elem(dim, 0u8);
        for x in 0..size.0 {
            for y in 0..size.1 {
                let coords = (x, y);
                if mine_mask[coords.to_nd_index()] {
                    continue;
                }
                neighbor_counts[coords.to_nd_index()] = NeighborIter::new(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
            }
        }

        Ok(Self {
            mine_mask,
            neighbor_counts,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        // dimensions were checked to fit Coord at construction
        let (size_x, size_y) = self.mine_mask.dim();
        (size_x as Coord, size_y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Stored adjacent-mine count; meaningful only for safe cells.
    pub fn neighbor_count(&self, coords: Coord2) -> u8 {
        self.neighbor_counts[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result tag of a single reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already open; nothing changed.
    AlreadyOpen,
    /// A safe cell, possibly a whole zero region, was opened.
    Opened,
    /// A mine was hit and failed to go off.
    Dud,
    /// A mine was hit and went off.
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::AlreadyOpen)
    }

    /// Whether play can continue after this outcome.
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Exploded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_six_by_six_with_eight_mines() {
        let config = GameConfig::default();
        assert_eq!(config.size, (6, 6));
        assert_eq!(config.mines, 8);
        assert_eq!(config.total_cells(), 36);
        assert_eq!(config.safe_cells(), 28);
    }

    #[test]
    fn config_rejects_zero_dimensions() {
        assert_eq!(GameConfig::new((0, 5), 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::new((5, 0), 1), Err(GameError::InvalidSize));
    }

    #[test]
    fn config_rejects_boards_without_a_safe_cell() {
        assert_eq!(GameConfig::new((2, 2), 4), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new((2, 2), 5), Err(GameError::TooManyMines));
        assert!(GameConfig::new((2, 2), 3).is_ok());
    }

    #[test]
    fn mineless_single_cell_config_is_valid() {
        let config = GameConfig::new((1, 1), 0).unwrap();
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn layout_counts_match_a_brute_force_rescan() {
        let mines = [
            (0, 0),
            (2, 1),
            (3, 3),
            (5, 5),
            (1, 4),
            (4, 0),
            (0, 5),
            (2, 2),
        ];
        let layout = MineLayout::from_mine_coords((6, 6), &mines).unwrap();
        assert_eq!(layout.mine_count(), 8);

        for x in 0..6 {
            for y in 0..6 {
                let coords = (x, y);
                if layout.contains_mine(coords) {
                    continue;
                }
                let mut expected = 0;
                for dx in -1i16..=1 {
                    for dy in -1i16..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = i16::from(x) + dx;
                        let ny = i16::from(y) + dy;
                        if (0..6).contains(&nx)
                            && (0..6).contains(&ny)
                            && layout.contains_mine((nx as Coord, ny as Coord))
                        {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(
                    layout.neighbor_count(coords),
                    expected,
                    "count mismatch at {:?}",
                    coords
                );
            }
        }
    }

    #[test]
    fn layout_rejects_out_of_range_mines() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn layout_rejects_fully_mined_grids() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 1), &[(0, 0), (1, 0)]),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn duplicate_mine_coords_collapse_into_one_mine() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.safe_cell_count(), 8);
    }

    #[test]
    fn coords_validation_matches_the_grid_bounds() {
        let layout = MineLayout::from_mine_coords((4, 2), &[(0, 0)]).unwrap();
        assert_eq!(layout.validate_coords((3, 1)), Ok((3, 1)));
        assert_eq!(layout.validate_coords((4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(layout.validate_coords((0, 2)), Err(GameError::InvalidCoords));
    }
}
