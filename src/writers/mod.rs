//! Writer implementations

pub mod noop;
pub mod production;
pub mod recorder;

pub use noop::NoOpWriter;
pub use production::ProductionWriter;
pub use recorder::Recorder;

// Re-export the trait alongside its implementations
pub use crate::core::Writer;
