//! Deferred decoration placement
//!
//! Candidates are proposed while roads are still being laid, but nothing is
//! placed until the road graph is final. A road placed later can cover the
//! cell an earlier candidate snaps to; reconciling afterwards keeps every
//! decoration off the final road surface.

use ahash::AHashSet;
use glam::Vec3;
use rand::Rng;

use crate::core::config::GeneratorConfig;
use crate::core::types::{Direction, GridCoord, PlacedHandle};
use crate::roads::grid::GridAuthority;
use crate::world::objects::PlacementSink;

/// A proposed decoration position, not yet committed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationCandidate {
    /// Continuous world position (not grid-snapped)
    pub position: Vec3,
    /// Road cell the candidate was proposed for
    pub source: GridCoord,
}

/// A decoration that survived reconciliation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommittedDecoration {
    pub position: Vec3,
    /// Grid cell the position snaps to
    pub cell: GridCoord,
    pub yaw_degrees: f32,
    pub handle: PlacedHandle,
}

/// Outcome counts of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconciliationStats {
    pub committed: usize,
    pub rejected_on_road: usize,
    pub rejected_duplicate: usize,
}

#[derive(Debug, Clone)]
pub struct DecorationPlanner {
    density: f32,
    lateral_offset: f32,
    jitter: f32,
    spacing: i32,
    candidates: Vec<DecorationCandidate>,
    /// Snapped cells already holding a decoration
    occupied: AHashSet<GridCoord>,
    committed: Vec<CommittedDecoration>,
}

impl DecorationPlanner {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            density: config.decoration_density,
            lateral_offset: config.decoration_lateral_offset,
            jitter: config.decoration_jitter,
            spacing: config.grid_spacing,
            candidates: Vec::new(),
            occupied: AHashSet::new(),
            committed: Vec::new(),
        }
    }

    /// Propose up to two candidates beside the road cell at `source`
    ///
    /// One per lateral side, each gated by the density roll and jittered on
    /// both horizontal axes. Returns how many were proposed.
    pub fn propose<R: Rng + ?Sized>(
        &mut self,
        source: GridCoord,
        facing: Direction,
        rng: &mut R,
    ) -> usize {
        if self.density <= 0.0 {
            return 0;
        }

        let center = source.to_world(self.spacing);
        let side = facing.lateral();
        let mut proposed = 0;

        for sign in [-1.0f32, 1.0] {
            if rng.gen::<f32>() >= self.density {
                continue;
            }

            let jitter = Vec3::new(
                rng.gen_range(-self.jitter..=self.jitter),
                0.0,
                rng.gen_range(-self.jitter..=self.jitter),
            );
            self.candidates.push(DecorationCandidate {
                position: center + side * sign * self.lateral_offset + jitter,
                source,
            });
            proposed += 1;
        }

        proposed
    }

    /// Resolve every candidate against the final road occupancy
    ///
    /// Runs once per generation, after the frontier is exhausted. Accepted
    /// decorations keep their unsnapped position and get a random yaw.
    pub fn commit<S, R>(
        &mut self,
        grid: &GridAuthority,
        sink: &mut S,
        rng: &mut R,
    ) -> ReconciliationStats
    where
        S: PlacementSink + ?Sized,
        R: Rng + ?Sized,
    {
        let mut stats = ReconciliationStats::default();

        for candidate in &self.candidates {
            let cell = GridCoord::from_world(candidate.position, self.spacing);

            if grid.is_occupied(cell) {
                tracing::debug!("Decoration from {} overlaps road at {}", candidate.source, cell);
                stats.rejected_on_road += 1;
                continue;
            }
            if self.occupied.contains(&cell) {
                stats.rejected_duplicate += 1;
                continue;
            }

            let yaw_degrees = rng.gen_range(0.0..360.0);
            let handle = sink.place_decoration(candidate.position, yaw_degrees);
            self.occupied.insert(cell);
            self.committed.push(CommittedDecoration {
                position: candidate.position,
                cell,
                yaw_degrees,
                handle,
            });
            stats.committed += 1;
        }

        stats
    }

    /// Candidates whose snapped cell is covered by a road
    pub fn overlapping_candidates<'a>(
        &'a self,
        grid: &'a GridAuthority,
    ) -> impl Iterator<Item = &'a DecorationCandidate> + 'a {
        self.candidates
            .iter()
            .filter(move |c| grid.is_occupied(GridCoord::from_world(c.position, self.spacing)))
    }

    pub fn candidates(&self) -> &[DecorationCandidate] {
        &self.candidates
    }

    pub fn committed(&self) -> &[CommittedDecoration] {
        &self.committed
    }

    /// Drop all candidates and decorations and adopt `config` for the next run
    pub fn reset(&mut self, config: &GeneratorConfig) {
        self.density = config.decoration_density;
        self.lateral_offset = config.decoration_lateral_offset;
        self.jitter = config.decoration_jitter;
        self.spacing = config.grid_spacing;
        self.candidates.clear();
        self.occupied.clear();
        self.committed.clear();
    }
}
