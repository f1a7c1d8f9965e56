use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Purely random placement: every arrangement of the configured mines is equally likely.
///
/// The board is laid out as a flat row-major sequence holding `mines` markers which is then
/// Fisher-Yates shuffled, so the result only depends on the config and the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = usize::from(config.total_cells());
        let requested = usize::from(config.mines);
        if requested > total_cells {
            log::warn!(
                "Minefield overfull, requested {} mines but only {} cells fit",
                requested,
                total_cells
            );
        }

        let mut markers: Vec<bool> = (0..total_cells).map(|i| i < requested).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        markers.shuffle(&mut rng);

        let cols = usize::from(config.size.1);
        let mine_mask = Array2::from_shape_fn(config.size.nd(), |(row, col)| {
            markers[row * cols + col]
        });
        let layout = MineLayout::from_mine_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {:?} minefield with {} mines from seed {}",
            config.size,
            layout.mine_count(),
            self.seed
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord2, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        for (size, mines) in [((1, 2), 1), ((3, 3), 0), ((10, 8), 10), ((24, 20), 99), ((4, 4), 15)] {
            for seed in 0..16 {
                let layout = RandomMinefieldGenerator::new(seed).generate(config(size, mines));

                assert_eq!(layout.size(), size);
                assert_eq!(layout.mine_count(), mines);
                assert_eq!(layout.iter_mines().count(), usize::from(mines));
            }
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let cfg = Difficulty::Medium.config();

        let first = RandomMinefieldGenerator::new(42).generate(cfg);
        let second = RandomMinefieldGenerator::new(42).generate(cfg);

        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_give_different_layouts() {
        let cfg = Difficulty::Hard.config();

        let layouts: Vec<_> = (0..4)
            .map(|seed| RandomMinefieldGenerator::new(seed).generate(cfg))
            .collect();

        assert!(layouts.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn single_mine_lands_everywhere_about_equally() {
        let cfg = config((1, 4), 1);
        let mut hits = [0u32; 4];

        for seed in 0..4000 {
            let layout = RandomMinefieldGenerator::new(seed).generate(cfg);
            let (_, col) = layout.iter_mines().next().unwrap();
            hits[usize::from(col)] += 1;
        }

        for count in hits {
            assert!((850..=1150).contains(&count), "skewed placement: {hits:?}");
        }
    }
}
