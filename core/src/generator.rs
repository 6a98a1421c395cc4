use ndarray::Array2;
use rand::Rng;
use rand::RngExt;

use crate::*;

/// Seam between board setup and the mine-placement strategy.
pub trait LayoutGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: GameConfig, rng: &mut R) -> Result<MineLayout>;
}

/// Uniform placement: draws grid coordinates with replacement until the
/// requested number of distinct cells is mined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RandomLayoutGenerator;

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: GameConfig, rng: &mut R) -> Result<MineLayout> {
        // the placement loop below only terminates with a free cell left over
        let config = GameConfig::new(config.size, config.mines)?;
        let (size_x, size_y) = config.size;

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut placed: CellCount = 0;
        while placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!("placed {} mines on a {}x{} board", placed, size_x, size_y);
        MineLayout::from_mine_mask(mine_mask)
    }
}
