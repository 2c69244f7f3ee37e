// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command dispatch against one owned [`Registry`].
use bom_core::{BomError, Registry};
use thiserror::Error;
use tracing::debug;

use crate::format::format_totals;
use crate::parse::{parse_line, Command, ParseError};

/// Acknowledgement printed by successful mutations.
pub const OK: &str = "OK";

/// Anything that makes a console line fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The line is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The registry rejected the command.
    #[error(transparent)]
    Bom(#[from] BomError),
}

/// What a handled line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print on stdout.
    Output(String),
    /// The loop should stop.
    Quit,
}

/// A console session: the registry plus the dispatcher that drives it.
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
}

impl Session {
    /// Session over an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over an existing registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// Current registry state.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parses and executes one line.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome, CliError> {
        let command = parse_line(line)?;
        debug!(?command, "dispatching");
        self.execute(command)
    }

    /// Executes an already parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, CliError> {
        let output = match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::AddAssembly { name, parts } => {
                self.registry.add_assembly(&name, parts.into_iter().collect())?;
                OK.to_owned()
            }
            Command::RemoveAssembly(name) => {
                self.registry.remove_assembly(&name)?;
                OK.to_owned()
            }
            Command::PrintAssembly(name) => self.registry.stringify(&name)?,
            Command::GetAssemblies(name) => format_totals(&self.registry.explode_assemblies(&name)?),
            Command::GetComponents(name) => format_totals(&self.registry.explode_components(&name)?),
            Command::AddPart { name, parts } => {
                // Each pair commits on its own; a failure keeps earlier ones.
                for (child, amount) in parts {
                    self.registry.increment(&name, &child, amount)?;
                }
                OK.to_owned()
            }
            Command::RemovePart {
                name,
                part: (child, amount),
            } => {
                self.registry.decrement(&name, &child, amount)?;
                OK.to_owned()
            }
        };
        Ok(Outcome::Output(output))
    }
}
