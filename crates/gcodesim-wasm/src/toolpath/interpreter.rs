//! Motion interpreter: folds parsed commands into a [`Toolpath`].
//!
//! The interpreter is a pure function of `(lines, initial state, config)`.
//! Machine state is threaded through the loop by value and returned in the
//! resulting [`Toolpath`]; nothing is retained between runs.

use crate::config::InterpreterConfig;
use crate::error::{ArcError, ToolpathError};
use crate::gcode::{parse_line, MotionCommand, ParsedLine};

use super::arc::{expand_arc, ArcDirection};
use super::types::{MachineState, Point, Segment, Toolpath, ToolpathBuilder};

/// Absolute end point of `command` when executed from `state`.
///
/// Omitted axes keep their current value.
pub fn resolve_position(command: &MotionCommand, state: MachineState) -> Point {
    Point {
        x: command.target.x.unwrap_or(state.position.x),
        y: command.target.y.unwrap_or(state.position.y),
    }
}

/// Interpret a whole program from the origin with the default config.
///
/// # Errors
///
/// See [`interpret`].
pub fn interpret_program(source: &str) -> Result<Toolpath, ToolpathError> {
    interpret(
        source.lines(),
        MachineState::default(),
        &InterpreterConfig::default(),
    )
}

/// Interpret `lines` in order starting from `initial`.
///
/// Rapid and linear moves emit one segment each; arcs emit
/// `config.arc_samples - 1` chords. Blank, comment, `M30` and unsupported
/// lines emit nothing and leave the state unchanged.
///
/// # Errors
///
/// Returns the first [`ToolpathError`] encountered, tagged with its 1-based
/// line number. No partial toolpath is returned.
pub fn interpret<'a, I>(
    lines: I,
    initial: MachineState,
    config: &InterpreterConfig,
) -> Result<Toolpath, ToolpathError>
where
    I: IntoIterator<Item = &'a str>,
{
    config.validate()?;

    let mut builder = ToolpathBuilder::new();
    let mut state = initial;
    let mut program_end_line: Option<usize> = None;

    for (index, raw) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        match parse_line(line_number, raw)? {
            ParsedLine::Empty => {}
            ParsedLine::ProgramEnd => {
                program_end_line.get_or_insert(line_number);
            }
            ParsedLine::Ignored(opcode) => {
                builder.warn(format!(
                    "line {line_number}: unsupported opcode `{opcode}` ignored"
                ));
            }
            ParsedLine::Motion(command) => {
                if let Some(end_line) = program_end_line {
                    builder.warn(format!(
                        "line {line_number}: motion after program end on line {end_line}"
                    ));
                }
                state = execute(&mut builder, &command, state, config).map_err(|source| {
                    ToolpathError::InvalidArcGeometry {
                        line: line_number,
                        text: raw.to_string(),
                        source,
                    }
                })?;
                builder.count_command();
            }
        }
    }

    Ok(builder.build(state))
}

/// Runs one motion command and returns the next machine state.
///
/// Arc kinds need a center offset and linear kinds must not carry one.
fn execute(
    builder: &mut ToolpathBuilder,
    command: &MotionCommand,
    state: MachineState,
    config: &InterpreterConfig,
) -> Result<MachineState, ArcError> {
    let start = state.position;
    let end = resolve_position(command, state);

    match (ArcDirection::from_kind(command.kind), command.center_offset) {
        (Some(direction), Some(center_offset)) => {
            expand_arc(builder, start, end, center_offset, direction, config)?;
        }
        (None, None) => builder.push_segment(Segment {
            start,
            end,
            kind: command.kind,
        }),
        (Some(_), None) => return Err(ArcError::MissingCenter),
        (None, Some(_)) => return Err(ArcError::UnexpectedCenter),
    }

    Ok(MachineState::at(end))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ARC_SAMPLES;
    use crate::gcode::{CenterOffset, MotionKind, Target};

    fn run(lines: &[&str]) -> Result<Toolpath, ToolpathError> {
        interpret(
            lines.iter().copied(),
            MachineState::default(),
            &InterpreterConfig::default(),
        )
    }

    #[test]
    fn resolve_position_keeps_omitted_axes() {
        let command = MotionCommand {
            kind: MotionKind::LinearMove,
            target: Target {
                x: None,
                y: Some(180.0),
            },
            center_offset: None,
        };
        let state = MachineState::at(Point::new(320.0, 0.0));
        assert_eq!(resolve_position(&command, state), Point::new(320.0, 180.0));
    }

    #[test]
    fn single_linear_move() {
        let path = run(&["G1 X320 Y0"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            path.segments,
            vec![Segment {
                start: Point::ORIGIN,
                end: Point::new(320.0, 0.0),
                kind: MotionKind::LinearMove,
            }]
        );
        assert_eq!(path.final_state.position, Point::new(320.0, 0.0));
        assert_eq!(path.command_count, 1);
    }

    #[test]
    fn axis_carry_over_from_initial_state() {
        let path = interpret(
            ["G1 Y180"],
            MachineState::at(Point::new(320.0, 0.0)),
            &InterpreterConfig::default(),
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.segments[0].start, Point::new(320.0, 0.0));
        assert_eq!(path.segments[0].end, Point::new(320.0, 180.0));
    }

    #[test]
    fn rapid_segments_are_tagged_rapid() {
        let path = run(&["G0 X10", "G1 Y10"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.segments[0].kind, MotionKind::RapidMove);
        assert_eq!(path.segments[1].kind, MotionKind::LinearMove);
    }

    #[test]
    fn arc_emits_samples_minus_one_chords() {
        let path = run(&["G1 X160 Y45", "G2 X160 Y45 I0 J45"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.segments.len(), 1 + DEFAULT_ARC_SAMPLES - 1);
        assert_eq!(path.final_state.position, Point::new(160.0, 45.0));
        assert_eq!(path.command_count, 2);
    }

    #[test]
    fn no_command_lines_do_not_move() {
        let path = run(&["", "; comment", "PROGRAM1", "G1 X5", "M30"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.segments.len(), 1);
        assert_eq!(path.final_state.position, Point::new(5.0, 0.0));
    }

    #[test]
    fn unsupported_opcode_warns_but_program_end_does_not() {
        let path = run(&["G90", "G1 X5", "M30"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.warnings.len(), 1);
        assert!(path.warnings[0].contains("`G90`"));
    }

    #[test]
    fn motion_after_program_end_warns() {
        let path = run(&["G1 X5", "M30", "G1 X10"]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.segments.len(), 2);
        assert!(path
            .warnings
            .iter()
            .any(|warning| warning.contains("after program end on line 2")));
    }

    #[test]
    fn parse_error_aborts_with_line_number() {
        let result = run(&["G1 X10", "G1 Y10", "G1 XABC"]);
        match result {
            Err(ToolpathError::ParseError { line, text, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "G1 XABC");
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn arc_geometry_error_carries_line() {
        let result = run(&["G0 X0 Y90", "G2 X160 Y45 I0 J45"]);
        match result {
            Err(err @ ToolpathError::InvalidArcGeometry { .. }) => {
                assert_eq!(err.line(), Some(2));
            }
            other => panic!("expected InvalidArcGeometry, got {other:?}"),
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_parsing() {
        let config = InterpreterConfig {
            arc_samples: 0,
            ..InterpreterConfig::default()
        };
        let result = interpret(["G1 XABC"], MachineState::default(), &config);
        assert!(matches!(result, Err(ToolpathError::InvalidConfig(_))));
    }

    #[test]
    fn execute_rejects_mismatched_center_offset() {
        let state = MachineState::at(Point::new(10.0, 0.0));
        let config = InterpreterConfig::default();
        let target = Target {
            x: Some(-10.0),
            y: Some(0.0),
        };

        let arc_without_center = MotionCommand {
            kind: MotionKind::ArcCounterClockwise,
            target,
            center_offset: None,
        };
        let linear_with_center = MotionCommand {
            kind: MotionKind::LinearMove,
            target,
            center_offset: Some(CenterOffset { i: -10.0, j: 0.0 }),
        };

        let mut builder = ToolpathBuilder::new();
        assert_eq!(
            execute(&mut builder, &arc_without_center, state, &config),
            Err(ArcError::MissingCenter)
        );
        assert_eq!(
            execute(&mut builder, &linear_with_center, state, &config),
            Err(ArcError::UnexpectedCenter)
        );
        assert_eq!(builder.segment_count(), 0);

        let linear = MotionCommand {
            center_offset: None,
            ..linear_with_center
        };
        assert_eq!(
            execute(&mut builder, &linear, state, &config),
            Ok(MachineState::at(Point::new(-10.0, 0.0)))
        );
        assert_eq!(builder.segment_count(), 1);
    }

    #[test]
    fn oversized_sample_count_is_invalid_config() {
        let config = InterpreterConfig {
            arc_samples: usize::MAX,
            ..InterpreterConfig::default()
        };
        let result = interpret(
            ["G0 X10 Y0", "G3 X-10 Y0 I-10 J0"],
            MachineState::default(),
            &config,
        );
        assert!(matches!(result, Err(ToolpathError::InvalidConfig(_))));
    }

    #[test]
    fn interpret_program_splits_lines() {
        let path = interpret_program("G1 X1\r\nG1 Y1\n\nG1 X0\n").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.final_state.position, Point::new(0.0, 1.0));
    }
}
