//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

use crate::application::ReplayStep;
use crate::domain::TraceEvent;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Write success status indented (green checkmark with leading spaces)
pub fn success_detail(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {} {}", "✓".green(), msg)
}

/// Write failure status (red X, indented)
pub fn failure(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {} {}", "✗".red(), msg)
}

/// Write section header (cyan bold)
pub fn header(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Write plain output (no color, for data lines)
pub fn info(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Write one replay step; nodes after a GOOD marker are green
pub fn step(out: &mut dyn Write, step: &ReplayStep) -> io::Result<()> {
    let label = format!("{:>4}", step.index).dimmed();
    match step.event {
        TraceEvent::Good => writeln!(out, "{} {}", label, "GOOD".green().bold()),
        TraceEvent::Bad => writeln!(out, "{} {}", label, "BAD".red().bold()),
        TraceEvent::Visit(id) if step.highlighted => {
            writeln!(out, "{} {}", label, id.to_string().green())
        }
        TraceEvent::Visit(id) => writeln!(out, "{} {}", label, id),
    }
}
