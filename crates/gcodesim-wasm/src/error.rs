//! Error types for the parsing and toolpath pipeline.

use thiserror::Error;

/// Errors that abort an interpretation run.
///
/// Every line-level variant carries the 1-based line number and the raw text
/// of the offending line so a caller can point the user at it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolpathError {
    /// A word could not be parsed, or its letter is not allowed here.
    #[error("line {line}: invalid word `{token}` in `{text}`: {reason}")]
    ParseError {
        /// 1-based line number.
        line: usize,
        /// Raw text of the line.
        text: String,
        /// The offending token.
        token: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// An arc opcode is missing its I or J center offset.
    #[error("line {line}: arc command is missing {missing} in `{text}`")]
    MissingArcCenter {
        /// 1-based line number.
        line: usize,
        /// Raw text of the line.
        text: String,
        /// The missing word letters, e.g. `"J"` or `"I and J"`.
        missing: &'static str,
    },

    /// The arc start/end points are inconsistent with the derived center.
    #[error("line {line}: invalid arc geometry in `{text}`: {source}")]
    InvalidArcGeometry {
        /// 1-based line number.
        line: usize,
        /// Raw text of the line.
        text: String,
        /// Underlying geometry failure.
        source: ArcError,
    },

    /// The interpreter configuration is unusable.
    #[error("invalid interpreter config: {0}")]
    InvalidConfig(String),
}

impl ToolpathError {
    /// Returns the 1-based line number for line-level errors.
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::ParseError { line, .. }
            | Self::MissingArcCenter { line, .. }
            | Self::InvalidArcGeometry { line, .. } => Some(*line),
            Self::InvalidConfig(_) => None,
        }
    }
}

/// Geometry failures raised while expanding a single arc.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ArcError {
    /// The center offset is zero, so the arc has no radius.
    #[error("arc has zero radius")]
    ZeroRadius,

    /// The end point does not lie on the circle through the start point.
    #[error("start radius {start_radius} and end radius {end_radius} differ beyond tolerance")]
    RadiusMismatch {
        /// Distance from the center to the start point.
        start_radius: f64,
        /// Distance from the center to the end point.
        end_radius: f64,
    },

    /// The sample count is outside `2..=MAX_ARC_SAMPLES`.
    #[error("arc sample count must be between 2 and {max}, got {0}", max = crate::config::MAX_ARC_SAMPLES)]
    InvalidSampleCount(usize),

    /// A coordinate, offset or radius overflowed to infinity or NaN.
    #[error("arc geometry is not finite")]
    NonFinite,

    /// An arc opcode reached the interpreter without a center offset.
    #[error("arc command has no center offset")]
    MissingCenter,

    /// A linear opcode reached the interpreter with a center offset.
    #[error("center offset given on a linear move")]
    UnexpectedCenter,
}
