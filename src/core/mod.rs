pub mod config;
pub mod error;
pub mod types;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenError, Result};
pub use types::{Direction, GridCoord, PlacedHandle, SegmentKind};
