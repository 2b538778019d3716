//! Decorative prop placement over generated terrain.

pub mod placer;

pub use placer::{PropPlacement, place_props};
