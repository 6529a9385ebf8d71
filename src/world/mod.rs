//! Scene-side collaborators and export format

pub mod objects;
pub mod placement;

pub use objects::{PlacementSink, SceneObject, SceneObjectKind, SceneRecorder};
pub use placement::{DecorationPlacement, NetworkFile, NetworkMetadata, RoadPlacement};
