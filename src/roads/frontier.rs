//! Frontier expansion
//!
//! Grows the road network breadth-first from the seed cell. Each frontier
//! entry asks to grow into one cell, arriving from one direction. Entries are
//! processed oldest first, so growth spreads around the seed instead of
//! running down a single branch.

use std::collections::VecDeque;

use rand::Rng;

use crate::core::config::GeneratorConfig;
use crate::core::types::{Direction, GridCoord, SegmentKind};
use crate::roads::decoration::DecorationPlanner;
use crate::roads::grid::GridAuthority;
use crate::world::objects::PlacementSink;

/// A pending claim: grow into `target`, arriving while heading `heading`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub target: GridCoord,
    pub heading: Direction,
}

/// How an intersection continued the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub at: GridCoord,
    pub incoming: Direction,
    /// Non-reverse directions whose next cell was free, in consideration order
    pub eligible: Vec<Direction>,
    pub enqueued: Vec<Direction>,
}

/// Counters for one expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Cells claimed, seed included
    pub placed: usize,
    /// Frontier entries popped from the queue
    pub processed: usize,
    /// Entries dropped because their target was already occupied
    pub discarded: usize,
    pub intersections: usize,
    pub decoration_candidates: usize,
    pub branches: Vec<BranchRecord>,
}

pub struct FrontierExpander {
    queue: VecDeque<FrontierEntry>,
    target_count: usize,
    spacing: i32,
    upgrade_chance: f32,
    branch_chance: f32,
    initial_direction: Direction,
}

impl FrontierExpander {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            target_count: config.target_road_count as usize,
            spacing: config.grid_spacing,
            upgrade_chance: config.intersection_upgrade_chance,
            branch_chance: config.branch_chance,
            initial_direction: config.initial_direction,
        }
    }

    /// Entries still waiting in the queue
    pub fn pending(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.queue.iter()
    }

    /// Claim the seed cell at the origin and push the cell ahead of it
    pub fn seed<S, R>(
        &mut self,
        grid: &mut GridAuthority,
        sink: &mut S,
        decorations: &mut DecorationPlanner,
        rng: &mut R,
        stats: &mut ExpansionStats,
    ) where
        S: PlacementSink + ?Sized,
        R: Rng + ?Sized,
    {
        let origin = GridCoord::ORIGIN;
        let heading = self.initial_direction;
        let position = origin.to_world(self.spacing);

        if grid.try_claim(origin, SegmentKind::Straight, heading, || {
            sink.place_segment(SegmentKind::Straight, position, heading)
        }) {
            stats.placed += 1;
            stats.decoration_candidates += decorations.propose(origin, heading, rng);
        }

        self.queue.push_back(FrontierEntry {
            target: origin.step(heading),
            heading,
        });
    }

    /// Seed the grid, then expand until the target count is reached or the
    /// frontier runs dry
    pub fn run<S, R>(
        &mut self,
        grid: &mut GridAuthority,
        sink: &mut S,
        decorations: &mut DecorationPlanner,
        rng: &mut R,
    ) -> ExpansionStats
    where
        S: PlacementSink + ?Sized,
        R: Rng + ?Sized,
    {
        let mut stats = ExpansionStats::default();
        self.queue.clear();
        self.seed(grid, sink, decorations, rng, &mut stats);

        while stats.placed < self.target_count {
            let Some(FrontierEntry { target, heading }) = self.queue.pop_front() else {
                tracing::debug!(
                    "Frontier exhausted after {} of {} cells",
                    stats.placed,
                    self.target_count
                );
                break;
            };
            stats.processed += 1;

            if grid.is_occupied(target) {
                stats.discarded += 1;
                continue;
            }

            let upgrade =
                target.is_aligned_to(self.spacing) && rng.gen::<f32>() < self.upgrade_chance;
            let kind = if upgrade {
                SegmentKind::Intersection
            } else {
                SegmentKind::Straight
            };

            let position = target.to_world(self.spacing);
            if !grid.try_claim(target, kind, heading, || {
                sink.place_segment(kind, position, heading)
            }) {
                stats.discarded += 1;
                continue;
            }
            stats.placed += 1;

            match kind {
                SegmentKind::Intersection => {
                    stats.intersections += 1;
                    let record = self.branch(grid, target, heading, rng);
                    stats.branches.push(record);
                }
                SegmentKind::Straight => {
                    let next = target.step(heading);
                    if !grid.is_occupied(next) {
                        self.queue.push_back(FrontierEntry { target: next, heading });
                    }
                }
            }

            stats.decoration_candidates += decorations.propose(target, heading, rng);
        }

        stats
    }

    /// Enqueue the continuations of a freshly placed intersection
    ///
    /// The first eligible direction is always taken; every later one needs a
    /// branch roll. The reverse of `incoming` is never eligible.
    fn branch<R: Rng + ?Sized>(
        &mut self,
        grid: &GridAuthority,
        at: GridCoord,
        incoming: Direction,
        rng: &mut R,
    ) -> BranchRecord {
        let mut record = BranchRecord {
            at,
            incoming,
            eligible: Vec::new(),
            enqueued: Vec::new(),
        };

        for dir in Direction::ALL {
            if dir == incoming.opposite() {
                continue;
            }
            let next = at.step(dir);
            if grid.is_occupied(next) {
                continue;
            }
            record.eligible.push(dir);

            if record.enqueued.is_empty() || rng.gen::<f32>() < self.branch_chance {
                self.queue.push_back(FrontierEntry { target: next, heading: dir });
                record.enqueued.push(dir);
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::objects::SceneRecorder;
    use ahash::AHashMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn expand(config: &GeneratorConfig, seed: u64) -> (GridAuthority, ExpansionStats, FrontierExpander) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = GridAuthority::new();
        let mut scene = SceneRecorder::new();
        let mut decorations = DecorationPlanner::new(config);
        let mut expander = FrontierExpander::new(config);
        let stats = expander.run(&mut grid, &mut scene, &mut decorations, &mut rng);
        (grid, stats, expander)
    }

    #[test]
    fn test_single_cell_target_places_only_seed() {
        let config = GeneratorConfig {
            target_road_count: 1,
            ..Default::default()
        };
        let (grid, stats, expander) = expand(&config, 0);

        assert_eq!(grid.len(), 1);
        assert!(grid.is_occupied(GridCoord::ORIGIN));
        assert_eq!(stats.placed, 1);
        assert_eq!(stats.processed, 0);
        assert_eq!(
            expander.pending().copied().collect::<Vec<_>>(),
            vec![FrontierEntry {
                target: GridCoord::new(0, 1),
                heading: Direction::North,
            }]
        );
    }

    #[test]
    fn test_straight_line_without_intersections() {
        let config = GeneratorConfig {
            target_road_count: 30,
            intersection_upgrade_chance: 0.0,
            branch_chance: 0.0,
            initial_direction: Direction::East,
            ..Default::default()
        };
        let (grid, stats, _) = expand(&config, 42);

        assert_eq!(stats.placed, 30);
        assert_eq!(stats.intersections, 0);
        let cells: Vec<GridCoord> = grid.iter_in_claim_order().map(|(c, _)| c).collect();
        let expected: Vec<GridCoord> = (0..30).map(|x| GridCoord::new(x, 0)).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_spacing_one_makes_every_cell_an_intersection() {
        let config = GeneratorConfig {
            target_road_count: 40,
            grid_spacing: 1,
            intersection_upgrade_chance: 1.0,
            branch_chance: 0.0,
            ..Default::default()
        };
        let (grid, stats, _) = expand(&config, 7);

        // Only the seed is a straight
        assert_eq!(stats.intersections, stats.placed - 1);
        assert_eq!(grid.get(GridCoord::ORIGIN).unwrap().kind, SegmentKind::Straight);
        for record in &stats.branches {
            assert!(!record.enqueued.contains(&record.incoming.opposite()));
            // With no branch rolls passing, exactly the first eligible direction is taken
            assert_eq!(record.enqueued.len(), record.eligible.len().min(1));
        }
    }

    #[test]
    fn test_full_branching_terminates_within_target() {
        let config = GeneratorConfig {
            target_road_count: 200,
            grid_spacing: 1,
            intersection_upgrade_chance: 1.0,
            branch_chance: 1.0,
            ..Default::default()
        };
        let (grid, stats, _) = expand(&config, 11);

        assert_eq!(stats.placed, 200);
        assert_eq!(grid.len(), 200);
        for record in &stats.branches {
            assert_eq!(record.enqueued, record.eligible);
        }
    }

    #[test]
    fn test_eligible_matches_free_neighbours_at_claim_time() {
        let config = GeneratorConfig {
            target_road_count: 150,
            grid_spacing: 1,
            intersection_upgrade_chance: 1.0,
            branch_chance: 0.5,
            ..Default::default()
        };

        for seed in [3, 19, 64] {
            let (grid, stats, _) = expand(&config, seed);
            assert!(!stats.branches.is_empty());

            let claimed_at: AHashMap<GridCoord, usize> = grid
                .iter_in_claim_order()
                .enumerate()
                .map(|(index, (coord, _))| (coord, index))
                .collect();

            for record in &stats.branches {
                let own = claimed_at[&record.at];
                let free: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|dir| *dir != record.incoming.opposite())
                    .filter(|dir| {
                        claimed_at
                            .get(&record.at.step(*dir))
                            .map_or(true, |&index| index > own)
                    })
                    .collect();

                assert_eq!(record.eligible, free, "at {}", record.at);
                assert_eq!(record.enqueued.first(), free.first());
                assert!(record.enqueued.iter().all(|dir| free.contains(dir)));
            }
        }
    }
}
