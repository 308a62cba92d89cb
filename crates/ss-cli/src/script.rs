//! Parser for command scripts.
//!
//! One command per line: a key, then an optional integer or cell pair.
//! `#` starts a comment that runs to the end of the line.
//!
//! ```text
//! # 4×2 grid with one wide screen
//! cols 4
//! addScreen 0,0 1,1
//! deleteAllScreens
//! ```

use ss_core::CellCoord;
use ss_editor::CommandValue;
use winnow::ascii::{digit1, space0, space1};
use winnow::combinator::{alt, opt, separated_pair};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

/// A parsed, not yet resolved, script line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// 1-based line number in the script.
    pub line: usize,
    pub key: String,
    pub value: Option<CommandValue>,
}

/// Parse a whole script. Blank and comment-only lines are skipped.
pub fn parse_script(input: &str) -> Result<Vec<ScriptLine>, String> {
    let mut lines = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let (key, value) = parse_command
            .parse(text)
            .map_err(|e| format!("line {}: cannot parse `{text}`: {e}", idx + 1))?;
        lines.push(ScriptLine {
            line: idx + 1,
            key: key.to_string(),
            value,
        });
    }
    Ok(lines)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

// ─── Line parsers ───────────────────────────────────────────────────────

fn parse_command<'a>(input: &mut &'a str) -> ModalResult<(&'a str, Option<CommandValue>)> {
    let key = parse_key.parse_next(input)?;
    skip_space(input);
    let value = opt(alt((parse_cells, parse_int))).parse_next(input)?;
    skip_space(input);
    Ok((key, value))
}

fn parse_key<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

fn parse_int(input: &mut &str) -> ModalResult<CommandValue> {
    (opt('-'), digit1)
        .take()
        .try_map(str::parse::<i64>)
        .map(CommandValue::Int)
        .parse_next(input)
}

/// `col,row`
fn parse_cell(input: &mut &str) -> ModalResult<CellCoord> {
    separated_pair(
        digit1.try_map(str::parse::<u32>),
        ',',
        digit1.try_map(str::parse::<u32>),
    )
    .map(|(col, row)| CellCoord::new(col, row))
    .parse_next(input)
}

fn parse_cells(input: &mut &str) -> ModalResult<CommandValue> {
    separated_pair(parse_cell, space1, parse_cell)
        .map(|(start, end)| CommandValue::Cells(start, end))
        .parse_next(input)
}

/// Consume optional whitespace (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    let _: Result<&str, winnow::error::ErrMode<ContextError>> = space0.parse_next(input);
}
