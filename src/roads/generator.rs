//! Road network generation entry point
//!
//! Every call to [`RoadNetworkGenerator::generate`] starts from scratch: the
//! previous run's objects, occupancy, frontier and decoration state are all
//! discarded first.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::GeneratorConfig;
use crate::core::error::ConfigError;
use crate::core::types::{Direction, GridCoord, SegmentKind};
use crate::roads::decoration::{CommittedDecoration, DecorationPlanner};
use crate::roads::frontier::{BranchRecord, FrontierExpander};
use crate::roads::grid::GridAuthority;
use crate::world::objects::PlacementSink;

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub placed: usize,
    pub frontier_processed: usize,
    pub frontier_discarded: usize,
    pub intersections: usize,
    pub branches: Vec<BranchRecord>,
    pub decoration_candidates: usize,
    pub decorations_committed: usize,
    pub decorations_rejected_on_road: usize,
    pub decorations_rejected_duplicate: usize,
}

/// A claimed road cell as seen by consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadPiece {
    pub coord: GridCoord,
    pub kind: SegmentKind,
    pub facing: Direction,
}

/// Final scene description: enough to rebuild it without the generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadNetwork {
    /// Road cells in claim order
    pub roads: Vec<RoadPiece>,
    /// Decorations in commit order
    pub decorations: Vec<CommittedDecoration>,
}

impl RoadNetwork {
    pub fn intersection_count(&self) -> usize {
        self.roads
            .iter()
            .filter(|r| r.kind == SegmentKind::Intersection)
            .count()
    }
}

pub struct RoadNetworkGenerator<S: PlacementSink> {
    config: GeneratorConfig,
    sink: S,
    grid: GridAuthority,
    decorations: DecorationPlanner,
}

impl<S: PlacementSink> RoadNetworkGenerator<S> {
    /// Validates `config` before taking ownership of anything
    pub fn new(config: GeneratorConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let decorations = DecorationPlanner::new(&config);
        Ok(Self {
            config,
            sink,
            grid: GridAuthority::new(),
            decorations,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration used by the next run
    ///
    /// On error the current configuration and state are left untouched.
    pub fn set_config(&mut self, config: GeneratorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn grid(&self) -> &GridAuthority {
        &self.grid
    }

    pub fn decorations(&self) -> &DecorationPlanner {
        &self.decorations
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run a full generation with the given random source
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GenerationReport {
        self.sink.clear_all();
        self.grid.clear();
        self.decorations.reset(&self.config);

        let mut expander = FrontierExpander::new(&self.config);
        let expansion = expander.run(&mut self.grid, &mut self.sink, &mut self.decorations, rng);

        // Roads are final from here on
        let reconciliation = self.decorations.commit(&self.grid, &mut self.sink, rng);

        tracing::info!(
            "Road generation completed. Total placed: {} ({} intersections, {} decorations)",
            expansion.placed,
            expansion.intersections,
            reconciliation.committed
        );

        GenerationReport {
            placed: expansion.placed,
            frontier_processed: expansion.processed,
            frontier_discarded: expansion.discarded,
            intersections: expansion.intersections,
            branches: expansion.branches,
            decoration_candidates: expansion.decoration_candidates,
            decorations_committed: reconciliation.committed,
            decorations_rejected_on_road: reconciliation.rejected_on_road,
            decorations_rejected_duplicate: reconciliation.rejected_duplicate,
        }
    }

    /// Run a full generation driven by a ChaCha stream seeded from `seed`
    pub fn generate_seeded(&mut self, seed: u64) -> GenerationReport {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    /// Snapshot of the current run's output
    pub fn network(&self) -> RoadNetwork {
        RoadNetwork {
            roads: self
                .grid
                .iter_in_claim_order()
                .map(|(coord, cell)| RoadPiece {
                    coord,
                    kind: cell.kind,
                    facing: cell.facing,
                })
                .collect(),
            decorations: self.decorations.committed().to_vec(),
        }
    }

    /// World position of a road cell under the current spacing
    pub fn world_position(&self, coord: GridCoord) -> Vec3 {
        coord.to_world(self.config.grid_spacing)
    }
}
