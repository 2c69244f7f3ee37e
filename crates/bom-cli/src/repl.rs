// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Line loop: read a command, print its result or error, repeat.
use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::session::{Outcome, Session};

/// Loop behaviour knobs, usually filled from `CliPrefs` and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOptions {
    /// Prepended to every error message.
    pub error_prefix: String,
    /// Print each command line to stdout before its result.
    pub echo_commands: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            error_prefix: "Error, ".to_owned(),
            echo_commands: false,
        }
    }
}

/// Tally of one loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines handled, including the final `quit`.
    pub commands: usize,
    /// Lines that produced an error.
    pub errors: usize,
    /// Whether the loop stopped on `quit` rather than end of input.
    pub quit: bool,
}

/// Drives `session` from `input` until `quit` or end of input.
///
/// Results go to `out`, errors to `err`. A failed command never stops the
/// loop; only I/O failures on the streams are returned.
pub fn run<R, W, E>(
    session: &mut Session,
    input: R,
    out: &mut W,
    err: &mut E,
    options: &ReplOptions,
) -> io::Result<RunSummary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = RunSummary::default();
    for line in input.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        summary.commands += 1;
        if options.echo_commands {
            writeln!(out, "> {line}")?;
        }
        match session.handle_line(line) {
            Ok(Outcome::Output(text)) => writeln!(out, "{text}")?,
            Ok(Outcome::Quit) => {
                summary.quit = true;
                break;
            }
            Err(e) => {
                summary.errors += 1;
                debug!(error = %e, "command failed");
                // Keep stdout ordered before the error text on shared terminals.
                out.flush()?;
                writeln!(err, "{}{e}", options.error_prefix)?;
            }
        }
    }
    out.flush()?;
    info!(
        commands = summary.commands,
        errors = summary.errors,
        quit = summary.quit,
        "session finished"
    );
    Ok(summary)
}
