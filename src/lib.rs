//! # footstep-interpolator
//!
//! Dense walking references from discrete biped footsteps, with continuity
//! across online replanning.
//!
//! ## Features
//!
//! - **Phase timeline**: per-sample Stance / SwitchIn / SwitchOut / Swing
//!   labels, phase shifts and merge points
//! - **Swing feet**: spline foot poses with configurable apex height and timing
//! - **Weight and ZMP**: weight distribution, local and global ZMP
//! - **CoM height**: height profile and its second derivative
//! - **DCM mode**: Divergent Component of Motion references as an alternative
//! - **Replanning**: measured-step correction and seamless splicing at merge points
//! - **no_std compatible**: core library works with `alloc` only
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use footstep_interpolator::{
//!     FixedPlan, Foot, FootstepSequence, GenerationMode, Step, TrajectoryGenerator,
//! };
//!
//! let config = footstep_interpolator::load_config("walking.toml")?;
//! let mut generator = TrajectoryGenerator::new(config, FixedPlan::new())?;
//!
//! let left = FootstepSequence::from_steps(Foot::Left, [Step::new(0.0, 0.1, 0.0, 0.0)])?;
//! let right = FootstepSequence::from_steps(
//!     Foot::Right,
//!     [Step::new(0.0, -0.1, 0.0, 0.0), Step::new(0.2, -0.1, 0.0, 1.0)],
//! )?;
//!
//! let trajectory =
//!     generator.generate_at_rest(left, right, 0.0, 0.01, 1.0, GenerationMode::Weight)?;
//! println!("{} samples", trajectory.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod footstep;
pub mod generator;
pub mod interpolation;
pub mod spline;

// Re-exports for ergonomic API
pub use config::{validate_config, InterpolatorConfig, PauseConditions, ZmpOffsets};
pub use error::{Error, Result};
pub use footstep::{FixedPlan, Foot, FootstepPlanner, FootstepSequence, Step};
pub use generator::{GeneratorState, MeasuredFeet, MeasuredPose, TrajectoryGenerator};
pub use interpolation::{
    BoundaryCondition, DcmInitialState, FeetInterpolator, GeneratedTrajectory, GenerationMode,
    InitialState, PhaseTimeline, References, StepPhase, SwingTrajectory, WeightBoundary,
    MAX_SAMPLES,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
