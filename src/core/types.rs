//! Core type definitions used throughout the codebase

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One cell of the generation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `dir`
    pub fn step(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// World position of the cell center (grid y maps to world z)
    pub fn to_world(&self, spacing: i32) -> Vec3 {
        Vec3::new(self.x as f32, 0.0, self.y as f32) * spacing as f32
    }

    /// Snap a continuous world position to the nearest cell
    ///
    /// Halfway values round to the even cell.
    pub fn from_world(pos: Vec3, spacing: i32) -> Self {
        let s = spacing as f32;
        Self::new(
            (pos.x / s).round_ties_even() as i32,
            (pos.z / s).round_ties_even() as i32,
        )
    }

    /// True when both coordinates are exact multiples of `period`
    pub fn is_aligned_to(&self, period: i32) -> bool {
        self.x.rem_euclid(period) == 0 && self.y.rem_euclid(period) == 0
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction in grid space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Order in which intersections consider their continuations
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Grid offset of one step
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
        }
    }

    /// Unit vector in world space
    pub fn to_world(&self) -> Vec3 {
        let (dx, dy) = self.offset();
        Vec3::new(dx as f32, 0.0, dy as f32)
    }

    /// World-space unit vector perpendicular to travel (up × forward)
    pub fn lateral(&self) -> Vec3 {
        let (dx, dy) = self.offset();
        Vec3::new(dy as f32, 0.0, -dx as f32)
    }
}

/// Kind of road piece occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Straight,
    Intersection,
}

/// Opaque identity of an object materialized by a placement sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlacedHandle(pub u64);
