//! Arc expansion for G2/G3 circular interpolation.
//!
//! An arc is resolved into a center, radius, start angle and signed sweep,
//! then sampled at a fixed number of evenly spaced angles. Consecutive samples
//! become chord segments tagged with the arc's [`MotionKind`].

use std::f64::consts::TAU;

use crate::config::{FullCirclePolicy, InterpreterConfig, MAX_ARC_SAMPLES};
use crate::error::ArcError;
use crate::gcode::{CenterOffset, MotionKind};

use super::types::{Point, Segment, ToolpathBuilder};

const POINT_EQUALITY_EPSILON: f64 = 1e-9;
/// Relative radius drift worth a warning even when it is within tolerance.
const RADIUS_WARNING_THRESHOLD: f64 = 1e-6;

/// Arc sweep direction for G2/G3 interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    /// Clockwise interpolation (G2); the sweep is negative.
    Clockwise,
    /// Counter-clockwise interpolation (G3); the sweep is positive.
    CounterClockwise,
}

impl ArcDirection {
    /// Direction of an arc opcode, or `None` for linear kinds.
    pub const fn from_kind(kind: MotionKind) -> Option<Self> {
        match kind {
            MotionKind::ArcClockwise => Some(Self::Clockwise),
            MotionKind::ArcCounterClockwise => Some(Self::CounterClockwise),
            MotionKind::RapidMove | MotionKind::LinearMove => None,
        }
    }

    /// Segment tag for chords of this arc.
    pub const fn kind(self) -> MotionKind {
        match self {
            Self::Clockwise => MotionKind::ArcClockwise,
            Self::CounterClockwise => MotionKind::ArcCounterClockwise,
        }
    }
}

/// Center, radius and angular span of a resolved arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Arc center, `start + (I, J)`.
    pub center: Point,
    /// Distance from the center to the start point.
    pub radius: f64,
    /// Distance from the center to the end point.
    pub end_radius: f64,
    /// Angle of the start point around the center, in `[-π, π]`.
    pub start_angle: f64,
    /// Signed sweep; negative for clockwise.
    pub sweep: f64,
}

impl ArcGeometry {
    /// Resolve the arc from `start` to `end` around `start + center_offset`.
    ///
    /// # Errors
    ///
    /// Returns [`ArcError::NonFinite`] when the center or either radius
    /// overflows, [`ArcError::ZeroRadius`] for a zero center offset and
    /// [`ArcError::RadiusMismatch`] when `end` is off the circle by more than
    /// `config.radius_tolerance` times the radius.
    pub fn resolve(
        start: Point,
        end: Point,
        center_offset: CenterOffset,
        direction: ArcDirection,
        config: &InterpreterConfig,
    ) -> Result<Self, ArcError> {
        let center = Point::new(start.x + center_offset.i, start.y + center_offset.j);
        let radius = start.distance(center);
        let end_radius = end.distance(center);
        if !(center.x.is_finite()
            && center.y.is_finite()
            && radius.is_finite()
            && end_radius.is_finite())
        {
            return Err(ArcError::NonFinite);
        }

        if radius <= f64::EPSILON {
            return Err(ArcError::ZeroRadius);
        }

        if (end_radius - radius).abs() > config.radius_tolerance * radius {
            return Err(ArcError::RadiusMismatch {
                start_radius: radius,
                end_radius,
            });
        }

        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let sweep = if points_approx_equal(start, end) {
            full_circle_sweep(direction, config.full_circle)
        } else {
            let end_angle = (end.y - center.y).atan2(end.x - center.x);
            unwrap_end_angle(start_angle, end_angle, direction) - start_angle
        };

        Ok(Self {
            center,
            radius,
            end_radius,
            start_angle,
            sweep,
        })
    }

    /// Angles of `samples` evenly spaced points from the start angle to the
    /// end of the sweep, inclusive.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_angles(&self, samples: usize) -> Vec<f64> {
        let last = samples.saturating_sub(1).max(1) as f64;
        (0..samples)
            .map(|step| self.sweep.mul_add(step as f64 / last, self.start_angle))
            .collect()
    }

    /// Point on the circle at `angle`.
    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.radius.mul_add(angle.cos(), self.center.x),
            self.radius.mul_add(angle.sin(), self.center.y),
        )
    }
}

/// Tessellate an arc into `config.arc_samples` points.
///
/// The first point is exactly `start` and the last is exactly `end`, so the
/// chords join the surrounding segments without gaps.
///
/// # Errors
///
/// Propagates [`ArcGeometry::resolve`] failures and returns
/// [`ArcError::InvalidSampleCount`] when `config.arc_samples` is outside
/// `2..=MAX_ARC_SAMPLES`.
pub fn arc_points(
    start: Point,
    end: Point,
    center_offset: CenterOffset,
    direction: ArcDirection,
    config: &InterpreterConfig,
) -> Result<Vec<Point>, ArcError> {
    let samples = checked_samples(config)?;
    let geometry = ArcGeometry::resolve(start, end, center_offset, direction, config)?;
    Ok(chord_points(&geometry, start, end, samples))
}

/// Expand an arc into chord segments appended to `builder`.
///
/// Always emits `config.arc_samples - 1` segments, whatever the sweep.
///
/// # Errors
///
/// Returns an [`ArcError`] when the arc geometry is invalid; nothing is
/// appended in that case.
pub fn expand_arc(
    builder: &mut ToolpathBuilder,
    start: Point,
    end: Point,
    center_offset: CenterOffset,
    direction: ArcDirection,
    config: &InterpreterConfig,
) -> Result<(), ArcError> {
    let samples = checked_samples(config)?;
    let geometry = ArcGeometry::resolve(start, end, center_offset, direction, config)?;
    let drift = (geometry.end_radius - geometry.radius).abs();
    if drift > RADIUS_WARNING_THRESHOLD * geometry.radius {
        builder.warn(format!(
            "arc end radius {} differs from start radius {}; snapping to end point",
            geometry.end_radius, geometry.radius
        ));
    }

    let points = chord_points(&geometry, start, end, samples);
    let kind = direction.kind();
    builder.extend_segments(
        points
            .iter()
            .zip(points.iter().skip(1))
            .map(|(&from, &to)| Segment {
                start: from,
                end: to,
                kind,
            }),
    );
    Ok(())
}

fn checked_samples(config: &InterpreterConfig) -> Result<usize, ArcError> {
    if !(2..=MAX_ARC_SAMPLES).contains(&config.arc_samples) {
        return Err(ArcError::InvalidSampleCount(config.arc_samples));
    }
    Ok(config.arc_samples)
}

fn chord_points(geometry: &ArcGeometry, start: Point, end: Point, samples: usize) -> Vec<Point> {
    let last = samples.saturating_sub(1);
    geometry
        .sample_angles(samples)
        .into_iter()
        .enumerate()
        .map(|(step, angle)| match step {
            0 => start,
            s if s == last => end,
            _ => geometry.point_at(angle),
        })
        .collect()
}

/// Moves `end_angle` onto the commanded side of `start_angle`.
///
/// Counter-clockwise arcs need `end > start`, clockwise arcs `end < start`;
/// otherwise the end angle is shifted by one full turn.
fn unwrap_end_angle(start_angle: f64, end_angle: f64, direction: ArcDirection) -> f64 {
    match direction {
        ArcDirection::CounterClockwise if end_angle <= start_angle => end_angle + TAU,
        ArcDirection::Clockwise if end_angle >= start_angle => end_angle - TAU,
        _ => end_angle,
    }
}

const fn full_circle_sweep(direction: ArcDirection, policy: FullCirclePolicy) -> f64 {
    match (policy, direction) {
        (FullCirclePolicy::Degenerate, _) => 0.0,
        (FullCirclePolicy::FullTurn, ArcDirection::Clockwise) => -TAU,
        (FullCirclePolicy::FullTurn, ArcDirection::CounterClockwise) => TAU,
    }
}

fn points_approx_equal(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= POINT_EQUALITY_EPSILON && (a.y - b.y).abs() <= POINT_EQUALITY_EPSILON
}
