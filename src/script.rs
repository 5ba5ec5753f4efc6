//! Command scripts.
//!
//! One command per line:
//!
//! ```text
//! # comment
//! A1: 5
//! A2: =A1*2
//! clear A1
//! print values
//! ```

use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

use crate::error::{CliError, Result};
use tabula_core::{Position, Sheet};

/// What to render when printing the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    Values,
    Texts,
}

impl FromStr for PrintMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "values" => Ok(PrintMode::Values),
            "texts" => Ok(PrintMode::Texts),
            other => Err(format!("Unknown print mode: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Set(Position, String),
    Clear(Position),
    Print(PrintMode),
}

/// Parse one script line. Blank lines and `#` comments give None.
pub fn parse_command(line: &str, line_num: usize) -> Result<Option<Command>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parse_error = |message: String| CliError::Parse {
        line: line_num,
        message,
    };

    if let Some(target) = trimmed.strip_prefix("clear ") {
        return Ok(Some(Command::Clear(parse_position(target, line_num)?)));
    }
    if let Some(mode) = trimmed.strip_prefix("print ") {
        let mode = mode.trim().parse::<PrintMode>().map_err(parse_error)?;
        return Ok(Some(Command::Print(mode)));
    }

    // "POSITION: TEXT" format; text keeps everything after one optional space
    let Some((target, text)) = line.split_once(':') else {
        return Err(parse_error(
            "Expected 'POSITION: TEXT', 'clear POSITION' or 'print values|texts'".to_string(),
        ));
    };
    let text = text.strip_prefix(' ').unwrap_or(text);
    Ok(Some(Command::Set(
        parse_position(target, line_num)?,
        text.to_string(),
    )))
}

// Range checking is left to the sheet so out-of-grid positions surface as
// sheet errors.
fn parse_position(text: &str, line_num: usize) -> Result<Position> {
    let text = text.trim();
    Position::from_a1(text).ok_or_else(|| CliError::Parse {
        line: line_num,
        message: format!("Invalid cell reference: {}", text),
    })
}

/// Write the sheet in the given mode.
pub fn print_sheet(sheet: &Sheet, mode: PrintMode, out: &mut impl Write) -> Result<()> {
    match mode {
        PrintMode::Values => sheet.print_values(out)?,
        PrintMode::Texts => sheet.print_texts(out)?,
    }
    Ok(())
}

/// Outcome of running a script.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub commands: usize,
    pub errors: usize,
}

/// Run every command in `content` against `sheet`.
///
/// Failed commands are reported to `err` and skipped, unless `stop_on_error`
/// is set, in which case the first failure is returned.
pub fn run_script(
    sheet: &mut Sheet,
    content: &str,
    stop_on_error: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<ScriptReport> {
    let mut report = ScriptReport::default();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let outcome = parse_command(line, line_num).and_then(|command| match command {
            None => Ok(false),
            Some(command) => execute(sheet, command, line_num, out).map(|_| true),
        });

        match outcome {
            Ok(ran) => report.commands += usize::from(ran),
            Err(e) if stop_on_error => return Err(e),
            Err(e) => {
                report.errors += 1;
                writeln!(err, "Error: {}", e)?;
            }
        }
    }

    Ok(report)
}

fn execute(sheet: &mut Sheet, command: Command, line: usize, out: &mut impl Write) -> Result<()> {
    let sheet_error = |source| CliError::Sheet { line, source };
    match command {
        Command::Set(pos, text) => sheet.set_cell(pos, &text).map_err(sheet_error),
        Command::Clear(pos) => sheet.clear_cell(pos).map_err(sheet_error),
        Command::Print(mode) => print_sheet(sheet, mode, out),
    }
}
