//! Error types for footstep-interpolator.
//!
//! Provides unified error handling across configuration, footstep sequencing,
//! timeline feasibility and the external footstep planner.

use core::fmt;

use crate::footstep::Foot;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all footstep-interpolator operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or parameter domain error
    Config(ConfigError),
    /// Footstep ordering or start-time error
    Sequencing(SequencingError),
    /// The requested timing cannot produce a sane timeline
    Infeasible(FeasibilityError),
    /// The external footstep planner failed
    Planner(PlannerError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Switch ratio must lie in (0, 1)
    InvalidSwitchRatio(f64),
    /// Terminal half switch time must be >= 0
    InvalidTerminalHalfSwitchTime(f64),
    /// Step height must be >= 0
    InvalidStepHeight(f64),
    /// Swing apex ratio must lie in (0, 1)
    InvalidApexRatio(f64),
    /// Pause conditions must satisfy max >= nominal > 0
    InvalidPauseConditions {
        /// Requested maximum step time
        max_step_time: f64,
        /// Requested nominal step time
        nominal_step_time: f64,
    },
    /// A ZMP offset is not finite
    InvalidZmpOffset,
    /// CoM nominal height must be > 0
    InvalidComHeight(f64),
    /// CoM stance delta must be finite
    InvalidComHeightDelta(f64),
    /// Sampling period must be > 0
    InvalidSamplingTime(f64),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Footstep ordering and start-time errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SequencingError {
    /// The footstep sequence of a foot is empty
    EmptySequence(Foot),
    /// A step does not land strictly after the previous one of the same foot
    UnorderedSteps {
        /// Foot owning the sequence
        foot: Foot,
        /// Impact time of the last committed step
        previous: f64,
        /// Impact time of the rejected step
        next: f64,
    },
    /// A step carries a non-finite position, angle or impact time
    NonFiniteStep(Foot),
    /// Both feet have a step landing at the same instant
    SimultaneousImpacts(f64),
    /// The start time precedes the moment both feet are grounded
    InitTimeBeforeGrounding {
        /// Requested start time
        init_time: f64,
        /// Later of the two first impact times
        grounded_at: f64,
    },
    /// A step other than the present one lands at or before the start time
    StepBeforeInitTime {
        /// Foot owning the step
        foot: Foot,
        /// Impact time of the offending step
        impact_time: f64,
    },
    /// No step lands after the start time
    NothingToInterpolate,
    /// No step of this foot has landed at the requested time
    NoPresentStep {
        /// Foot without a present step
        foot: Foot,
        /// Requested time
        time: f64,
    },
    /// Replanning was requested before any fresh generation
    NotInitialized,
    /// Replanning start time is earlier than the previous one
    NonMonotonicStart {
        /// Start time of the previous call
        previous: f64,
        /// Requested start time
        requested: f64,
    },
    /// End of the planning horizon precedes its start
    EndBeforeInit {
        /// Requested start time
        init_time: f64,
        /// Requested end time
        end_time: f64,
    },
    /// A measured step is not usable as the present step of a foot
    InvalidMeasuredStep(Foot),
    /// The sample is not a merge point of the previous trajectory
    NotAMergePoint(usize),
}

/// Timeline or spline feasibility errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FeasibilityError {
    /// The swing before this impact does not hold a single sample
    SwingTooShort {
        /// Impact time closing the swing
        impact_time: f64,
        /// Swing duration in seconds
        duration: f64,
    },
    /// A weight switch does not hold a single sample
    SwitchTooShort {
        /// Start of the switch
        start_time: f64,
        /// Switch duration in seconds
        duration: f64,
    },
    /// Spline knots are missing, unordered or not finite
    DegenerateSpline,
    /// Spline boundary conditions produce a singular system
    SingularSpline,
    /// The horizon holds more samples than a timeline accepts
    TooManySamples {
        /// Time between the first sample and the end of the plan
        horizon: f64,
        /// Sampling period
        dt: f64,
    },
}

/// Errors reported by a footstep planner.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// The planner could not extend the footsteps
    Failed(heapless::String<64>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Sequencing(e) => write!(f, "Sequencing error: {}", e),
            Error::Infeasible(e) => write!(f, "Infeasible timing: {}", e),
            Error::Planner(e) => write!(f, "Planner error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidSwitchRatio(v) => {
                write!(f, "Invalid switch ratio: {}. Must be in (0, 1)", v)
            }
            ConfigError::InvalidTerminalHalfSwitchTime(v) => {
                write!(f, "Invalid terminal half switch time: {}. Must be >= 0", v)
            }
            ConfigError::InvalidStepHeight(v) => {
                write!(f, "Invalid step height: {}. Must be >= 0", v)
            }
            ConfigError::InvalidApexRatio(v) => {
                write!(f, "Invalid swing apex ratio: {}. Must be in (0, 1)", v)
            }
            ConfigError::InvalidPauseConditions { max_step_time, nominal_step_time } => write!(
                f,
                "Invalid pause conditions: max step time ({}) must be >= \
                 nominal step time ({}) > 0",
                max_step_time, nominal_step_time
            ),
            ConfigError::InvalidZmpOffset => write!(f, "ZMP offsets must be finite"),
            ConfigError::InvalidComHeight(v) => write!(f, "Invalid CoM height: {}. Must be > 0", v),
            ConfigError::InvalidComHeightDelta(v) => {
                write!(f, "Invalid CoM height delta: {}. Must be finite", v)
            }
            ConfigError::InvalidSamplingTime(v) => {
                write!(f, "Invalid sampling time: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for SequencingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencingError::EmptySequence(foot) => write!(f, "No steps for the {} foot", foot),
            SequencingError::UnorderedSteps { foot, previous, next } => write!(
                f,
                "{} foot step at {} does not land after the previous one at {}",
                foot, next, previous
            ),
            SequencingError::NonFiniteStep(foot) => {
                write!(f, "Non-finite step for the {} foot", foot)
            }
            SequencingError::SimultaneousImpacts(t) => {
                write!(f, "Both feet cannot land at the same time ({})", t)
            }
            SequencingError::InitTimeBeforeGrounding { init_time, grounded_at } => write!(
                f,
                "Start time {} precedes the moment both feet are grounded ({})",
                init_time, grounded_at
            ),
            SequencingError::StepBeforeInitTime { foot, impact_time } => write!(
                f,
                "{} foot step at {} lands at or before the start time",
                foot, impact_time
            ),
            SequencingError::NothingToInterpolate => {
                write!(f, "No step lands after the start time")
            }
            SequencingError::NoPresentStep { foot, time } => write!(
                f,
                "The {} foot has no step landed at {}; call a fresh generation instead",
                foot, time
            ),
            SequencingError::NotInitialized => {
                write!(f, "Replanning requires a previous fresh generation")
            }
            SequencingError::NonMonotonicStart { previous, requested } => write!(
                f,
                "Start time {} precedes the previous start time {}",
                requested, previous
            ),
            SequencingError::EndBeforeInit { init_time, end_time } => {
                write!(f, "End time {} precedes start time {}", end_time, init_time)
            }
            SequencingError::InvalidMeasuredStep(foot) => {
                write!(f, "Invalid measured step for the {} foot", foot)
            }
            SequencingError::NotAMergePoint(index) => {
                write!(f, "Sample {} is not a merge point of the previous trajectory", index)
            }
        }
    }
}

impl fmt::Display for FeasibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityError::SwingTooShort { impact_time, duration } => write!(
                f,
                "Swing of {} s before the impact at {} holds no sample",
                duration, impact_time
            ),
            FeasibilityError::SwitchTooShort { start_time, duration } => write!(
                f,
                "Switch of {} s starting at {} holds no sample",
                duration, start_time
            ),
            FeasibilityError::DegenerateSpline => write!(f, "Spline knots are degenerate"),
            FeasibilityError::SingularSpline => {
                write!(f, "Spline boundary conditions are singular")
            }
            FeasibilityError::TooManySamples { horizon, dt } => write!(
                f,
                "Horizon of {} s sampled every {} s exceeds {} samples",
                horizon,
                dt,
                crate::interpolation::MAX_SAMPLES
            ),
        }
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::Failed(msg) => write!(f, "Footstep planning failed: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SequencingError> for Error {
    fn from(e: SequencingError) -> Self {
        Error::Sequencing(e)
    }
}

impl From<FeasibilityError> for Error {
    fn from(e: FeasibilityError) -> Self {
        Error::Infeasible(e)
    }
}

impl From<PlannerError> for Error {
    fn from(e: PlannerError) -> Self {
        Error::Planner(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SequencingError {}

#[cfg(feature = "std")]
impl std::error::Error for FeasibilityError {}

#[cfg(feature = "std")]
impl std::error::Error for PlannerError {}
