//! Interpreter configuration.

use serde::Deserialize;

use crate::error::ToolpathError;

/// Number of angle samples taken along every arc.
///
/// An arc expands into `DEFAULT_ARC_SAMPLES - 1` chord segments regardless of
/// its sweep.
pub const DEFAULT_ARC_SAMPLES: usize = 32;

/// Upper bound on [`InterpreterConfig::arc_samples`].
pub const MAX_ARC_SAMPLES: usize = 65_536;

/// Allowed relative difference between an arc's start and end radius.
pub const DEFAULT_RADIUS_TOLERANCE: f64 = 0.01;

/// What an arc does when its end point equals its start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullCirclePolicy {
    /// Sweep a full turn in the commanded direction.
    #[default]
    FullTurn,
    /// Keep a zero sweep; every chord collapses onto the start point.
    Degenerate,
}

/// Tunables for a single interpretation run.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Angle samples per arc, inclusive of both ends, in `2..=MAX_ARC_SAMPLES`.
    pub arc_samples: usize,
    /// Relative radius mismatch accepted before an arc is rejected.
    pub radius_tolerance: f64,
    /// Handling of arcs whose start and end coincide.
    pub full_circle: FullCirclePolicy,
}

impl InterpreterConfig {
    /// Checks that the configuration can drive an interpretation run.
    ///
    /// # Errors
    ///
    /// Returns [`ToolpathError::InvalidConfig`] when `arc_samples` is outside
    /// `2..=MAX_ARC_SAMPLES` or the tolerance is negative or not finite.
    pub fn validate(&self) -> Result<(), ToolpathError> {
        if !(2..=MAX_ARC_SAMPLES).contains(&self.arc_samples) {
            return Err(ToolpathError::InvalidConfig(format!(
                "arc_samples must be between 2 and {MAX_ARC_SAMPLES}, got {}",
                self.arc_samples
            )));
        }

        if !self.radius_tolerance.is_finite() || self.radius_tolerance < 0.0 {
            return Err(ToolpathError::InvalidConfig(format!(
                "radius_tolerance must be a finite non-negative number, got {}",
                self.radius_tolerance
            )));
        }

        Ok(())
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            arc_samples: DEFAULT_ARC_SAMPLES,
            radius_tolerance: DEFAULT_RADIUS_TOLERANCE,
            full_circle: FullCirclePolicy::default(),
        }
    }
}
