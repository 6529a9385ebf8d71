//! Road Network Gen - grid road networks with deferred decoration placement

pub mod core;
pub mod roads;
pub mod world;
