//! Footstep module for footstep-interpolator.
//!
//! Provides steps, per-foot footstep sequences and the planner seam.

mod planner;
mod sequence;
mod step;

pub use planner::{FixedPlan, FootstepPlanner};
pub use sequence::FootstepSequence;
pub use step::{Foot, Step};
