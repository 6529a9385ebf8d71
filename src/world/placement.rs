//! JSON export format for generated networks
//!
//! A network file carries every road piece and committed decoration with
//! world positions already resolved, so renderers and exporters can rebuild
//! the scene without running the generator.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::config::GeneratorConfig;
use crate::core::error::Result;
use crate::core::types::{Direction, SegmentKind};
use crate::roads::generator::RoadNetwork;

pub const NETWORK_FILE_VERSION: u32 = 1;

/// Root structure for network JSON files
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkFile {
    /// Schema version (currently 1)
    pub version: u32,
    pub metadata: NetworkMetadata,
    pub roads: Vec<RoadPlacement>,
    #[serde(default)]
    pub decorations: Vec<DecorationPlacement>,
}

/// How the network was produced
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkMetadata {
    /// Seed of the run, when it was seeded
    #[serde(default)]
    pub seed: Option<u64>,
    pub grid_spacing: i32,
    pub target_road_count: u32,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoadPlacement {
    /// Grid cell [x, y]
    pub cell: [i32; 2],
    /// World position [x, y, z]
    pub position: [f32; 3],
    pub kind: SegmentKind,
    pub facing: Direction,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DecorationPlacement {
    /// World position [x, y, z], not grid-snapped
    pub position: [f32; 3],
    /// Grid cell the decoration reserves
    pub cell: [i32; 2],
    pub rotation_deg: f32,
}

impl NetworkFile {
    pub fn from_network(network: &RoadNetwork, config: &GeneratorConfig, seed: Option<u64>) -> Self {
        let roads = network
            .roads
            .iter()
            .map(|r| RoadPlacement {
                cell: [r.coord.x, r.coord.y],
                position: r.coord.to_world(config.grid_spacing).to_array(),
                kind: r.kind,
                facing: r.facing,
            })
            .collect();

        let decorations = network
            .decorations
            .iter()
            .map(|d| DecorationPlacement {
                position: d.position.to_array(),
                cell: [d.cell.x, d.cell.y],
                rotation_deg: d.yaw_degrees,
            })
            .collect();

        Self {
            version: NETWORK_FILE_VERSION,
            metadata: NetworkMetadata {
                seed,
                grid_spacing: config.grid_spacing,
                target_road_count: config.target_road_count,
                created_by: Some(format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))),
            },
            roads,
            decorations,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GridCoord, PlacedHandle};
    use crate::roads::decoration::CommittedDecoration;
    use crate::roads::generator::RoadPiece;
    use glam::Vec3;

    #[test]
    fn test_export_resolves_world_positions() {
        let network = RoadNetwork {
            roads: vec![
                RoadPiece {
                    coord: GridCoord::ORIGIN,
                    kind: SegmentKind::Straight,
                    facing: Direction::North,
                },
                RoadPiece {
                    coord: GridCoord::new(0, 1),
                    kind: SegmentKind::Intersection,
                    facing: Direction::North,
                },
            ],
            decorations: vec![CommittedDecoration {
                position: Vec3::new(-5.5, 0.0, 0.25),
                cell: GridCoord::new(-1, 0),
                yaw_degrees: 123.0,
                handle: PlacedHandle(3),
            }],
        };

        let file = NetworkFile::from_network(&network, &GeneratorConfig::default(), Some(42));

        assert_eq!(file.version, NETWORK_FILE_VERSION);
        assert_eq!(file.metadata.seed, Some(42));
        assert_eq!(file.roads[1].position, [0.0, 0.0, 10.0]);
        assert_eq!(file.roads[1].kind, SegmentKind::Intersection);
        assert_eq!(file.decorations[0].cell, [-1, 0]);
        assert_eq!(file.decorations[0].rotation_deg, 123.0);
    }

    #[test]
    fn test_enums_serialize_as_snake_case() {
        let json = r#"{
            "version": 1,
            "metadata": { "grid_spacing": 10, "target_road_count": 2 },
            "roads": [
                { "cell": [0, 0], "position": [0.0, 0.0, 0.0], "kind": "intersection", "facing": "west" }
            ]
        }"#;

        let file = NetworkFile::from_json(json).unwrap();
        assert_eq!(file.roads[0].kind, SegmentKind::Intersection);
        assert_eq!(file.roads[0].facing, Direction::West);
        assert!(file.decorations.is_empty());
        assert_eq!(file.metadata.seed, None);
    }
}
