//! Single-line G-code parser.

use crate::error::ToolpathError;

use super::types::{AxisWords, CenterOffset, MotionCommand, MotionKind, ParsedLine, Target};

const COMMENT_MARKER: char = ';';
const PROGRAM_END: &str = "M30";

/// Parse one source line.
///
/// Everything from the first `;` onward is a comment. The first token is the
/// opcode; only `G0`..`G3` produce a [`MotionCommand`], and their remaining
/// tokens must be `X`, `Y`, `I` or `J` words. Other opcodes are classified
/// without inspecting their words.
///
/// # Errors
///
/// Returns [`ToolpathError::ParseError`] for a malformed, duplicated or
/// disallowed word and [`ToolpathError::MissingArcCenter`] for an arc without
/// both I and J.
pub fn parse_line(line_number: usize, raw: &str) -> Result<ParsedLine, ToolpathError> {
    let code = raw
        .split_once(COMMENT_MARKER)
        .map_or(raw, |(code, _comment)| code)
        .trim();

    let mut tokens = code.split_whitespace();
    let Some(opcode_token) = tokens.next() else {
        return Ok(ParsedLine::Empty);
    };

    let opcode = opcode_token.to_ascii_uppercase();
    let Some(kind) = MotionKind::from_opcode(&opcode) else {
        if opcode == PROGRAM_END {
            return Ok(ParsedLine::ProgramEnd);
        }
        return Ok(ParsedLine::Ignored(opcode));
    };

    let mut words = AxisWords::default();
    for token in tokens {
        parse_word(line_number, raw, token, &mut words)?;
    }

    build_command(line_number, raw, kind, words).map(ParsedLine::Motion)
}

fn parse_word(
    line_number: usize,
    raw: &str,
    token: &str,
    words: &mut AxisWords,
) -> Result<(), ToolpathError> {
    let reject = |reason: &str| ToolpathError::ParseError {
        line: line_number,
        text: raw.to_string(),
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = token.chars();
    let Some(letter) = chars.next() else {
        return Err(reject("empty word"));
    };
    let value_raw = chars.as_str();

    let slot = match letter.to_ascii_uppercase() {
        'X' => &mut words.x,
        'Y' => &mut words.y,
        'I' => &mut words.i,
        'J' => &mut words.j,
        _ => return Err(reject("expected an X, Y, I or J word")),
    };

    if slot.is_some() {
        return Err(reject("word appears more than once"));
    }

    let value = parse_number(value_raw).ok_or_else(|| reject("not a decimal number"))?;
    *slot = Some(value);
    Ok(())
}

/// Parses `[+-]digits[.digits]`, also tolerating `.5` and `5.`.
///
/// Values that overflow `f64` are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let unsigned = raw
        .strip_prefix('-')
        .or_else(|| raw.strip_prefix('+'))
        .unwrap_or(raw);

    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn build_command(
    line_number: usize,
    raw: &str,
    kind: MotionKind,
    words: AxisWords,
) -> Result<MotionCommand, ToolpathError> {
    let target = Target {
        x: words.x,
        y: words.y,
    };

    if !kind.is_arc() {
        if words.i.is_some() || words.j.is_some() {
            let token = raw
                .split_whitespace()
                .skip(1)
                .find(|token| token.starts_with(['I', 'i', 'J', 'j']))
                .unwrap_or_default();
            return Err(ToolpathError::ParseError {
                line: line_number,
                text: raw.to_string(),
                token: token.to_string(),
                reason: "center offsets are only valid on G2/G3".to_string(),
            });
        }

        return Ok(MotionCommand {
            kind,
            target,
            center_offset: None,
        });
    }

    let center_offset = match (words.i, words.j) {
        (Some(i), Some(j)) => CenterOffset { i, j },
        (i, j) => {
            let missing = match (i.is_none(), j.is_none()) {
                (true, true) => "I and J",
                (true, false) => "I",
                _ => "J",
            };
            return Err(ToolpathError::MissingArcCenter {
                line: line_number,
                text: raw.to_string(),
                missing,
            });
        }
    };

    Ok(MotionCommand {
        kind,
        target,
        center_offset: Some(center_offset),
    })
}
