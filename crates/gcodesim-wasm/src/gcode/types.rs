//! Parsed G-code command types.

use serde::Serialize;

/// Motion opcode of a parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    /// Rapid positioning (G0).
    RapidMove,
    /// Linear feed (G1).
    LinearMove,
    /// Clockwise circular interpolation (G2).
    ArcClockwise,
    /// Counter-clockwise circular interpolation (G3).
    ArcCounterClockwise,
}

impl MotionKind {
    /// Maps a normalized opcode (`G0`..`G3`, optionally zero-padded) to a kind.
    pub fn from_opcode(opcode: &str) -> Option<Self> {
        let number = opcode.strip_prefix('G')?;
        if number.is_empty() || !number.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }

        match number.trim_start_matches('0') {
            "" => Some(Self::RapidMove),
            "1" => Some(Self::LinearMove),
            "2" => Some(Self::ArcClockwise),
            "3" => Some(Self::ArcCounterClockwise),
            _ => None,
        }
    }

    /// Returns `true` for G2/G3.
    pub const fn is_arc(self) -> bool {
        matches!(self, Self::ArcClockwise | Self::ArcCounterClockwise)
    }

    /// Numeric tag handed to renderers; equals the G number.
    pub const fn code(self) -> u8 {
        match self {
            Self::RapidMove => 0,
            Self::LinearMove => 1,
            Self::ArcClockwise => 2,
            Self::ArcCounterClockwise => 3,
        }
    }
}

/// Typed word values of a motion line. Absent words are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisWords {
    /// Absolute X target.
    pub x: Option<f64>,
    /// Absolute Y target.
    pub y: Option<f64>,
    /// X offset from the arc start to its center.
    pub i: Option<f64>,
    /// Y offset from the arc start to its center.
    pub j: Option<f64>,
}

/// Optional absolute end coordinates of a move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Target {
    /// X coordinate, or `None` to hold the current value.
    pub x: Option<f64>,
    /// Y coordinate, or `None` to hold the current value.
    pub y: Option<f64>,
}

/// Vector from an arc's start point to its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterOffset {
    /// I word.
    pub i: f64,
    /// J word.
    pub j: f64,
}

/// One motion command. Arc kinds always carry a center offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    /// Motion opcode.
    pub kind: MotionKind,
    /// End coordinates, possibly partial.
    pub target: Target,
    /// Center offset; `Some` exactly when `kind.is_arc()`.
    pub center_offset: Option<CenterOffset>,
}

/// Classification of one source line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Blank or comment-only line.
    Empty,
    /// A motion command.
    Motion(MotionCommand),
    /// Program end (`M30`).
    ProgramEnd,
    /// Any other opcode, carried uppercased for diagnostics.
    Ignored(String),
}
