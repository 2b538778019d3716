//! Chunk streaming: the tick-driven loaded-set manager.

pub mod manager;

pub use manager::{ChunkStreamingManager, TickDelta};
