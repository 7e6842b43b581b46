//! Core toolpath types and the `ToolpathBuilder` accumulator.

use serde::Serialize;

use crate::gcode::MotionKind;

/// 2D point in machine coordinates, millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// The machine origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

/// Controller state carried from one command to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MachineState {
    /// Current absolute tool position.
    pub position: Point,
}

impl MachineState {
    /// Creates a state at `position`.
    pub const fn at(position: Point) -> Self {
        Self { position }
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::at(Point::ORIGIN)
    }
}

/// One straight piece of the toolpath.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Opcode that produced the segment.
    pub kind: MotionKind,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates an empty bounding box that will expand with the first `update` call.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Expands the bounding box to include the given point.
    pub fn update(&mut self, point: Point) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    /// Returns `true` until the first point is added.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one interpretation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolpath {
    /// Segments in traversal order.
    pub segments: Vec<Segment>,
    /// State after the last command.
    pub final_state: MachineState,
    /// Bounds of every segment endpoint.
    pub bounds: BoundingBox,
    /// Number of motion commands processed.
    pub command_count: u32,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
}

impl Toolpath {
    /// Interleaved `[x0, y0, x1, y1, ...]` endpoints, two vertices per segment.
    #[allow(clippy::cast_possible_truncation)]
    pub fn positions(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.segments.len() * 4);
        for segment in &self.segments {
            flat.push(segment.start.x as f32);
            flat.push(segment.start.y as f32);
            flat.push(segment.end.x as f32);
            flat.push(segment.end.y as f32);
        }
        flat
    }

    /// One [`MotionKind::code`] per segment.
    pub fn kind_codes(&self) -> Vec<u8> {
        self.segments.iter().map(|segment| segment.kind.code()).collect()
    }

    /// Summary handed to JavaScript.
    pub fn meta(&self) -> ToolpathMeta {
        ToolpathMeta {
            bounds: self.bounds,
            segment_count: saturate_u32(self.segments.len()),
            command_count: self.command_count,
            final_position: self.final_state.position,
            warning_count: saturate_u32(self.warnings.len()),
            warnings: self.warnings.clone(),
        }
    }
}

/// Metadata returned to JavaScript for an interpreted program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolpathMeta {
    /// Axis-aligned bounding box.
    pub bounds: BoundingBox,
    /// Number of segments.
    pub segment_count: u32,
    /// Number of motion commands processed.
    pub command_count: u32,
    /// Final machine position.
    pub final_position: Point,
    /// Number of warnings.
    pub warning_count: u32,
    /// Warning messages.
    pub warnings: Vec<String>,
}

/// Accumulator for building a toolpath incrementally.
#[derive(Debug, Default)]
pub struct ToolpathBuilder {
    segments: Vec<Segment>,
    bounds: BoundingBox,
    command_count: u32,
    warnings: Vec<String>,
}

impl ToolpathBuilder {
    /// Creates an empty builder.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            bounds: BoundingBox::new(),
            command_count: 0,
            warnings: Vec::new(),
        }
    }

    /// Appends a segment and grows the bounds.
    pub fn push_segment(&mut self, segment: Segment) {
        self.bounds.update(segment.start);
        self.bounds.update(segment.end);
        self.segments.push(segment);
    }

    /// Appends segments in order.
    pub fn extend_segments(&mut self, segments: impl IntoIterator<Item = Segment>) {
        for segment in segments {
            self.push_segment(segment);
        }
    }

    /// Counts one processed motion command.
    pub fn count_command(&mut self) {
        self.command_count = self.command_count.saturating_add(1);
    }

    /// Records a warning message.
    pub fn warn(&mut self, msg: String) {
        self.warnings.push(msg);
    }

    /// Returns the number of segments pushed so far.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Consumes the builder and produces a [`Toolpath`] ending at `final_state`.
    pub fn build(self, final_state: MachineState) -> Toolpath {
        Toolpath {
            segments: self.segments,
            final_state,
            bounds: self.bounds,
            command_count: self.command_count,
            warnings: self.warnings,
        }
    }
}

/// Converts a `usize` count to `u32`, saturating at `u32::MAX`.
pub fn saturate_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
