// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line tokenization and parameter-shape validation.
//!
//! Only the *shape* of a line is checked here: separators, amounts that parse
//! as integers, and identifiers made of ASCII letters. Whether a name exists
//! or an amount is in range is left to the registry.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Characters a parameter list may not end with.
const TRAILING_FORBIDDEN: [char; 5] = [';', ':', '=', '+', '-'];

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The keyword is not a known command.
    #[error("command doesn't exist: {0:?}")]
    UnknownCommand(String),
    /// Leading blank, or more than one blank on the line.
    #[error("command and parameters must be separated by exactly one blank")]
    Blanks,
    /// A command that needs parameters was given none.
    #[error("{0} expects parameters but none were given")]
    MissingParameters(Keyword),
    /// `quit` was given parameters.
    #[error("{0} takes no parameters")]
    UnexpectedParameters(Keyword),
    /// The parameter list ends with a separator.
    #[error("parameters can't end with {0:?}")]
    TrailingSeparator(char),
    /// The separator between name and part list is missing or repeated.
    #[error("expected exactly one {0:?} in the parameters")]
    Separator(char),
    /// A part entry is not `<amount>:<name>`.
    #[error("expected <amount>:<name>, got {0:?}")]
    MalformedPair(String),
    /// An amount is not a 32-bit integer.
    #[error("amount {0:?} is not a number")]
    InvalidAmount(String),
    /// A name contains something other than ASCII letters.
    #[error("name {0:?} must consist of the letters a-z and A-Z only")]
    InvalidName(String),
    /// The same part appears twice in one list.
    #[error("part {0} appears more than once")]
    DuplicatePart(String),
    /// `removePart` was given more than one part.
    #[error("{0} takes exactly one part")]
    SinglePartExpected(Keyword),
}

/// Command keywords as typed on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `addAssembly`
    AddAssembly,
    /// `removeAssembly`
    RemoveAssembly,
    /// `printAssembly`
    PrintAssembly,
    /// `getAssemblies`
    GetAssemblies,
    /// `getComponents`
    GetComponents,
    /// `addPart`
    AddPart,
    /// `removePart`
    RemovePart,
    /// `quit`
    Quit,
}

impl Keyword {
    /// Every keyword, in help order.
    pub const ALL: [Self; 8] = [
        Self::AddAssembly,
        Self::RemoveAssembly,
        Self::PrintAssembly,
        Self::GetAssemblies,
        Self::GetComponents,
        Self::AddPart,
        Self::RemovePart,
        Self::Quit,
    ];

    /// Console spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddAssembly => "addAssembly",
            Self::RemoveAssembly => "removeAssembly",
            Self::PrintAssembly => "printAssembly",
            Self::GetAssemblies => "getAssemblies",
            Self::GetComponents => "getComponents",
            Self::AddPart => "addPart",
            Self::RemovePart => "removePart",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseError::UnknownCommand(s.to_owned()))
    }
}

/// A part reference with its raw (not yet range-checked) amount.
pub type PartAmount = (String, i64);

/// A shape-validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `addAssembly name=q:c;q:c...`
    AddAssembly {
        /// Assembly to define.
        name: String,
        /// Parts in input order.
        parts: Vec<PartAmount>,
    },
    /// `removeAssembly name`
    RemoveAssembly(String),
    /// `printAssembly name`
    PrintAssembly(String),
    /// `getAssemblies name`
    GetAssemblies(String),
    /// `getComponents name`
    GetComponents(String),
    /// `addPart name+q:c;q:c...`
    AddPart {
        /// Assembly to extend.
        name: String,
        /// Increments, applied in input order.
        parts: Vec<PartAmount>,
    },
    /// `removePart name-q:c`
    RemovePart {
        /// Assembly to shrink.
        name: String,
        /// Part and amount to remove.
        part: PartAmount,
    },
    /// `quit`
    Quit,
}

/// Parses one console line into a [`Command`].
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let (keyword, params) = match line.split_once(' ') {
        Some((keyword, params)) => (keyword, Some(params)),
        None => (line, None),
    };
    if params.is_some_and(|p| p.contains(' ')) || (keyword.is_empty() && params.is_some()) {
        return Err(ParseError::Blanks);
    }
    let keyword: Keyword = keyword.parse()?;

    if keyword == Keyword::Quit {
        return match params {
            Some(_) => Err(ParseError::UnexpectedParameters(keyword)),
            None => Ok(Command::Quit),
        };
    }
    let params = params
        .filter(|p| !p.is_empty())
        .ok_or(ParseError::MissingParameters(keyword))?;
    if let Some(last) = params.chars().last().filter(|c| TRAILING_FORBIDDEN.contains(c)) {
        return Err(ParseError::TrailingSeparator(last));
    }

    match keyword {
        Keyword::AddAssembly => {
            let (name, list) = split_once_exactly(params, '=')?;
            Ok(Command::AddAssembly {
                name: identifier(name)?,
                parts: part_list(list)?,
            })
        }
        Keyword::AddPart => {
            let (name, list) = split_once_exactly(params, '+')?;
            Ok(Command::AddPart {
                name: identifier(name)?,
                parts: part_list(list)?,
            })
        }
        Keyword::RemovePart => {
            let (name, list) = split_once_exactly(params, '-')?;
            let name = identifier(name)?;
            let mut parts = part_list(list)?;
            if parts.len() != 1 {
                return Err(ParseError::SinglePartExpected(keyword));
            }
            let part = parts.remove(0);
            Ok(Command::RemovePart { name, part })
        }
        Keyword::RemoveAssembly => Ok(Command::RemoveAssembly(identifier(params)?)),
        Keyword::PrintAssembly => Ok(Command::PrintAssembly(identifier(params)?)),
        Keyword::GetAssemblies => Ok(Command::GetAssemblies(identifier(params)?)),
        Keyword::GetComponents => Ok(Command::GetComponents(identifier(params)?)),
        Keyword::Quit => Ok(Command::Quit),
    }
}

/// Returns `name` if it is a non-empty run of ASCII letters.
pub fn identifier(name: &str) -> Result<String, ParseError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(name.to_owned())
    } else {
        Err(ParseError::InvalidName(name.to_owned()))
    }
}

fn split_once_exactly(params: &str, separator: char) -> Result<(&str, &str), ParseError> {
    match params.split_once(separator) {
        Some((head, tail)) if !tail.contains(separator) => Ok((head, tail)),
        _ => Err(ParseError::Separator(separator)),
    }
}

fn part_list(list: &str) -> Result<Vec<PartAmount>, ParseError> {
    let mut parts: Vec<PartAmount> = Vec::new();
    for entry in list.split(';') {
        let (amount, name) = entry
            .split_once(':')
            .filter(|(_, name)| !name.contains(':'))
            .ok_or_else(|| ParseError::MalformedPair(entry.to_owned()))?;
        let amount: i32 = amount
            .parse()
            .map_err(|_| ParseError::InvalidAmount(amount.to_owned()))?;
        let name = identifier(name)?;
        if parts.iter().any(|(existing, _)| *existing == name) {
            return Err(ParseError::DuplicatePart(name));
        }
        parts.push((name, i64::from(amount)));
    }
    Ok(parts)
}
