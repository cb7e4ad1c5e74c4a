//! Double-buffered simulation engine that reports per-cell changes.
//!
//! Each call to [`Engine::advance`] computes one generation into the scratch
//! buffer, swaps the buffers, and hands back a lazy [`Changes`] iterator that
//! diffs the new generation against the retired one. The first call seeds the
//! grid instead and reports every cell once.

use super::{CellChange, Coord, Grid, InitialState, Neighborhood, Strategy};
use crate::config::EngineConfig;
use crate::error::Result;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Toroidal Game of Life with change-stream output.
#[derive(Debug)]
pub struct Engine {
    /// Last committed generation
    current: Grid,
    /// Scratch buffer; after an advance it holds the previous generation
    next: Grid,
    neighborhood: Neighborhood,
    strategy: Strategy,
    initial_state: InitialState,
    bootstrapped: bool,
}

impl Engine {
    /// Engine with random 1/3-density seeding and default settings.
    /// Fails if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_config(&EngineConfig::new(width, height))
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let initial_state = config.initial_state.clone().resolve((config.width, config.height))?;

        debug!(
            width = config.width,
            height = config.height,
            neighborhood = config.neighborhood.name(),
            strategy = config.strategy.name(),
            "engine created"
        );

        Ok(Self {
            current: Grid::new(config.width, config.height),
            next: Grid::new(config.width, config.height),
            neighborhood: config.neighborhood,
            strategy: config.strategy,
            initial_state,
            bootstrapped: false,
        })
    }

    /// Replace the bootstrap source. Only meaningful before the first advance.
    pub fn with_initial_state(mut self, initial_state: InitialState) -> Result<Self> {
        self.initial_state = initial_state.resolve(self.dimensions())?;
        Ok(self)
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        self.current.dimensions()
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether the first advance has seeded the grid
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Last committed generation. All dead until the first advance.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Advance one generation and return the cells that changed, row-major.
    ///
    /// The first call seeds the grid and reports every coordinate. The
    /// returned iterator borrows the engine, so no other advance or read can
    /// overlap it.
    pub fn advance(&mut self) -> Changes<'_> {
        let changed = if self.bootstrapped {
            self.step()
        } else {
            self.bootstrap()
        };

        Changes::new(&self.current, &self.next, changed)
    }

    /// Seed the first generation and make the retired buffer its inverse,
    /// so the diff reports every cell exactly once.
    fn bootstrap(&mut self) -> usize {
        self.initial_state.apply(&mut self.next);
        self.current.fill_inverse_of(&self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.bootstrapped = true;

        let (width, height) = self.dimensions();
        debug!(population = self.current.population(), "grid seeded");
        width * height
    }

    fn step(&mut self) -> usize {
        let changed = match self.strategy {
            Strategy::Serial => self.current.evolve_into(&mut self.next, self.neighborhood),
            Strategy::Parallel => {
                self.current.evolve_into_parallel(&mut self.next, self.neighborhood)
            }
        };
        std::mem::swap(&mut self.current, &mut self.next);

        trace!(changed, "generation committed");
        changed
    }
}

/// Lazy diff between two consecutive generations.
///
/// Yields a [`CellChange`] for each coordinate whose state differs, in
/// row-major order. The total is known up front, so the iterator is exact-size
/// and stops scanning once the last change is found. Cloning restarts nothing:
/// a clone continues from the same position.
#[derive(Clone, Debug)]
pub struct Changes<'a> {
    current: &'a Grid,
    previous: &'a Grid,
    index: usize,
    remaining: usize,
}

impl<'a> Changes<'a> {
    fn new(current: &'a Grid, previous: &'a Grid, remaining: usize) -> Self {
        Self { current, previous, index: 0, remaining }
    }
}

impl Iterator for Changes<'_> {
    type Item = CellChange;

    fn next(&mut self) -> Option<CellChange> {
        if self.remaining == 0 {
            return None;
        }

        let (width, _) = self.current.dimensions();
        let current = self.current.cells();
        let previous = self.previous.cells();

        while self.index < current.len() {
            let i = self.index;
            self.index += 1;

            if current[i] != previous[i] {
                self.remaining -= 1;
                return Some(CellChange {
                    coord: Coord::new(i % width, i / width),
                    alive: current[i].is_alive(),
                });
            }
        }

        unreachable!("change count exceeded the cells that differ");
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Changes<'_> {}

impl FusedIterator for Changes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, Strategy};
    use crate::error::Error;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn engine_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Engine {
        let cells = alive.iter().map(|&c| Coord::from(c)).collect();
        Engine::new(width, height)
            .unwrap()
            .with_initial_state(InitialState::Cells { cells })
            .unwrap()
    }

    fn alive_set(engine: &Engine) -> HashSet<Coord> {
        engine.current().alive_coords().into_iter().collect()
    }

    fn coords(list: &[(usize, usize)]) -> HashSet<Coord> {
        list.iter().map(|&c| Coord::from(c)).collect()
    }

    fn change(x: usize, y: usize, alive: bool) -> CellChange {
        CellChange { coord: Coord::new(x, y), alive }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(Engine::new(0, 5), Err(Error::InvalidDimensions { width: 0, height: 5 })));
        assert!(matches!(Engine::new(5, 0), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Engine::new(usize::MAX, 2),
            Err(Error::InvalidDimensions { width: usize::MAX, height: 2 })
        ));
    }

    #[test]
    fn test_not_seeded_at_construction() {
        let engine = Engine::new(10, 10).unwrap();
        assert!(!engine.is_bootstrapped());
        assert_eq!(engine.current().population(), 0);
    }

    #[test]
    fn test_first_advance_reports_every_cell_once() {
        let mut engine = Engine::new(7, 5).unwrap();
        let changes: Vec<_> = engine.advance().collect();

        assert_eq!(changes.len(), 35);
        let unique: HashSet<_> = changes.iter().map(|c| c.coord).collect();
        assert_eq!(unique.len(), 35);
        assert!(engine.is_bootstrapped());

        // Reported values are the seeded state, not the inverted scratch
        for c in &changes {
            assert_eq!(engine.current().is_alive(c.coord), c.alive);
        }
    }

    #[test]
    fn test_first_advance_row_major_order() {
        let mut engine = engine_with(3, 2, &[]);
        let order: Vec<_> = engine.advance().map(|c| (c.coord.x, c.coord.y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_same_seed_same_history() {
        let build = || {
            Engine::new(30, 20)
                .unwrap()
                .with_initial_state(InitialState::seeded(1234))
                .unwrap()
        };
        let mut a = build();
        let mut b = build();

        for _ in 0..5 {
            let changes_a: Vec<_> = a.advance().collect();
            let changes_b: Vec<_> = b.advance().collect();
            assert_eq!(changes_a, changes_b);
        }
        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn test_random_density_roughly_one_third() {
        let mut engine = Engine::new(100, 100)
            .unwrap()
            .with_initial_state(InitialState::seeded(5))
            .unwrap();
        let alive = engine.advance().filter(|c| c.alive).count();
        assert!((2_800..3_900).contains(&alive), "alive = {alive}");
    }

    #[test]
    fn test_three_by_three_wrap_moore() {
        let mut engine = engine_with(3, 3, &[(1, 1), (0, 0)]);
        engine.advance().for_each(drop);

        let changes: Vec<_> = engine.advance().collect();

        // Every cell sees the whole torus: the two live cells have one
        // neighbor each and die, the rest see two and stay dead
        assert_eq!(changes, vec![change(0, 0, false), change(1, 1, false)]);
        assert_eq!(engine.current().population(), 0);
    }

    #[test]
    fn test_three_by_three_wrap_legacy() {
        let mut engine =
            engine_with(3, 3, &[(1, 1), (0, 0)]).with_neighborhood(Neighborhood::Legacy);
        engine.advance().for_each(drop);

        let changes: Vec<_> = engine.advance().collect();

        assert_eq!(
            changes,
            vec![
                change(0, 0, false),
                change(1, 1, false),
                change(2, 1, true),
                change(0, 2, true),
            ]
        );
    }

    #[test]
    fn test_block_is_still_life() {
        let mut engine = engine_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(engine.advance().len(), 16);

        for _ in 0..5 {
            assert_eq!(engine.advance().count(), 0);
        }
        assert_eq!(alive_set(&engine), coords(&[(1, 1), (2, 1), (1, 2), (2, 2)]));
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = [(1, 2), (2, 2), (3, 2)];
        let vertical = [(2, 1), (2, 2), (2, 3)];
        let mut engine = engine_with(5, 5, &horizontal);

        engine.advance().for_each(drop);
        assert_eq!(alive_set(&engine), coords(&horizontal));

        let changes: Vec<_> = engine.advance().collect();
        assert_eq!(alive_set(&engine), coords(&vertical));
        assert_eq!(
            changes,
            vec![
                change(2, 1, true),
                change(1, 2, false),
                change(3, 2, false),
                change(2, 3, true),
            ]
        );

        engine.advance().for_each(drop);
        assert_eq!(alive_set(&engine), coords(&horizontal));
    }

    #[test]
    fn test_glider_wraps_back_to_start() {
        let mut engine = Engine::new(8, 8)
            .unwrap()
            .with_initial_state(InitialState::Pattern { name: "glider".into(), x: 0, y: 0 })
            .unwrap();
        engine.advance().for_each(drop);
        let start = alive_set(&engine);

        // One diagonal cell every 4 generations; 8 cells round the torus
        for _ in 0..32 {
            engine.advance().for_each(drop);
        }
        assert_eq!(alive_set(&engine), start);
    }

    #[test]
    fn test_pattern_anchor_past_grid_wraps() {
        let mut config = EngineConfig::new(8, 8);
        config.initial_state = InitialState::Pattern { name: "glider".into(), x: usize::MAX, y: 0 };
        let mut engine = Engine::from_config(&config).unwrap();
        engine.advance().for_each(drop);

        let mut expected = Engine::new(8, 8)
            .unwrap()
            .with_initial_state(InitialState::Pattern { name: "glider".into(), x: 7, y: 0 })
            .unwrap();
        expected.advance().for_each(drop);

        assert_eq!(alive_set(&engine), alive_set(&expected));
        assert_eq!(engine.current().population(), 5);
    }

    #[test]
    fn test_empty_grid_stays_quiet() {
        let mut engine = engine_with(6, 6, &[]);
        assert_eq!(engine.advance().filter(|c| c.alive).count(), 0);
        assert_eq!(engine.advance().len(), 0);
    }

    #[test]
    fn test_changes_is_exact_size_and_cloneable() {
        let mut engine = engine_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        engine.advance().for_each(drop);

        let mut changes = engine.advance();
        assert_eq!(changes.len(), 4);
        let replay = changes.clone();

        let first = changes.next();
        assert_eq!(changes.len(), 3);
        assert_eq!(replay.clone().next(), first);
        assert_eq!(replay.count(), 4);
        assert_eq!(changes.by_ref().count(), 3);
        assert_eq!(changes.next(), None);
    }

    #[test]
    fn test_each_advance_is_a_new_generation() {
        let mut engine = engine_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        engine.advance().for_each(drop);

        let second: Vec<_> = engine.advance().collect();
        let third: Vec<_> = engine.advance().collect();
        assert_ne!(second, third);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let build = |strategy| {
            Engine::new(40, 25)
                .unwrap()
                .with_initial_state(InitialState::seeded(99))
                .unwrap()
                .with_strategy(strategy)
        };
        let mut serial = build(Strategy::Serial);
        let mut parallel = build(Strategy::Parallel);

        for _ in 0..10 {
            let s: Vec<_> = serial.advance().collect();
            let p: Vec<_> = parallel.advance().collect();
            assert_eq!(s, p);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_changes_are_symmetric_difference(
            width in 1usize..12,
            height in 1usize..12,
            seed in any::<u64>(),
            steps in 1usize..8,
            legacy in any::<bool>(),
        ) {
            let neighborhood = if legacy { Neighborhood::Legacy } else { Neighborhood::Moore };
            let mut engine = Engine::new(width, height)
                .unwrap()
                .with_initial_state(InitialState::seeded(seed))
                .unwrap()
                .with_neighborhood(neighborhood);
            engine.advance().for_each(drop);

            for _ in 0..steps {
                let before = engine.current().clone();
                let changes: Vec<_> = engine.advance().collect();

                let expected: Vec<_> = engine
                    .current()
                    .iter_cells()
                    .zip(before.iter_cells())
                    .filter(|((_, new), (_, old))| new != old)
                    .map(|((coord, new), _)| CellChange { coord, alive: new.is_alive() })
                    .collect();
                prop_assert_eq!(changes, expected);
            }
        }

        #[test]
        fn prop_replaying_changes_rebuilds_grid(
            width in 1usize..16,
            height in 1usize..16,
            seed in any::<u64>(),
            steps in 0usize..10,
        ) {
            let mut engine = Engine::new(width, height)
                .unwrap()
                .with_initial_state(InitialState::seeded(seed))
                .unwrap();
            let mut replayed = Grid::new(width, height);

            for _ in 0..=steps {
                for c in engine.advance() {
                    replayed.set_wrapped(c.coord.x, c.coord.y, Cell::from(c.alive));
                }
            }
            prop_assert_eq!(&replayed, engine.current());
        }
    }
}
