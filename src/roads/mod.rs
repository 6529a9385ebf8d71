//! Procedural road network generation on a uniform grid

pub mod decoration;
pub mod frontier;
pub mod generator;
pub mod grid;

pub use decoration::{CommittedDecoration, DecorationCandidate, DecorationPlanner, ReconciliationStats};
pub use frontier::{BranchRecord, ExpansionStats, FrontierEntry, FrontierExpander};
pub use generator::{GenerationReport, RoadNetwork, RoadNetworkGenerator, RoadPiece};
pub use grid::{GridAuthority, RoadCell};
