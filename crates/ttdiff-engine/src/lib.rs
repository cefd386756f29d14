//! ttdiff Engine - Orchestration layer
//!
//! Loads dumps from disk or readers, applies the engine configuration, and
//! runs diff sessions over the pure `ttdiff-core` kernel. Every public
//! operation owns its start/end/error logging.

pub mod commands;
pub mod config;
pub mod errors;

pub use config::EngineConfig;
