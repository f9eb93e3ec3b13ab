//! Problem input: a target on the first line, then one comma-separated row per line.
//!
//! ```text
//! 6
//! 1
//! 2,3
//! 1,6,2
//! ```

use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};

#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub target: f64,
    pub rows: Vec<Vec<f64>>,
}

impl Problem {
    pub fn new(target: f64, rows: Vec<Vec<f64>>) -> Self {
        Self { target, rows }
    }

    /// Parse problem text. Blank lines are ignored; line numbers in errors are 1-based.
    #[instrument(level = "debug", skip(text))]
    pub fn parse(text: &str) -> ApplicationResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (target_line, target_text) = lines
            .next()
            .ok_or_else(|| ApplicationError::input(1, "missing target"))?;
        let target = parse_number(target_text).ok_or_else(|| {
            ApplicationError::input(
                target_line,
                format!("target is not a number: '{}'", target_text),
            )
        })?;

        let rows = lines
            .map(|(line_no, line)| parse_row(line_no, line))
            .collect::<ApplicationResult<Vec<_>>>()?;
        if rows.is_empty() {
            return Err(ApplicationError::input(
                target_line + 1,
                "expected at least one row after the target",
            ));
        }

        debug!(goal = target, rows = rows.len(), "problem parsed");
        Ok(Self { target, rows })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> ApplicationResult<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .with_path_context("read problem", Path::new("<stdin>"))?;
        Self::parse(&text)
    }

    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        let text = std::fs::read_to_string(path).with_path_context("read problem", path)?;
        Self::parse(&text)
    }
}

fn parse_row(line_no: usize, line: &str) -> ApplicationResult<Vec<f64>> {
    line.split(',')
        .enumerate()
        .map(|(col, cell)| {
            let cell = cell.trim();
            parse_number(cell).ok_or_else(|| {
                ApplicationError::input(
                    line_no,
                    format!("cell {} is not a number: '{}'", col + 1, cell),
                )
            })
        })
        .collect()
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
