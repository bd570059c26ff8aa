//! Configuration module for footstep-interpolator.
//!
//! Provides the interpolator configuration, its per-parameter setters and
//! validation, and TOML loading (with `std` feature).

mod interpolator;
#[cfg(feature = "std")]
mod loader;
mod pause;
mod references;
mod validation;

pub use interpolator::InterpolatorConfig;
pub use pause::{PauseConditions, PauseTimings};
pub use references::{ComHeightSettings, ZmpOffsets};
pub use validation::{validate_config, validate_sampling_time};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
