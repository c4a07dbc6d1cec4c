//! Trellis Core
//!
//! Shared building blocks for the Trellis widget toolkit: geometry value
//! types, colors, collection aliases, logging and profiling setup.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;

pub use color::Color;
pub use config::{Config, ProfilingMode};

/// Initialize logging and profiling according to `config`.
///
/// Call once at startup, before any window is opened.
pub fn init(config: &Config) {
    logging::init_with_filter(&config.log_filter);
    match config.profiling {
        ProfilingMode::Off => {}
        ProfilingMode::On => profiling::enable_scopes(),
        #[cfg(feature = "profiling")]
        ProfilingMode::WithServer => profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp),
    }
}
