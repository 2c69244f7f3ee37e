// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! bom-cli: line-oriented console over a [`bom_core::Registry`].
//!
//! Each input line is tokenized and shape-checked by [`parse`], executed by a
//! [`Session`], and rendered by [`format`]. [`repl::run`] ties the pieces to a
//! pair of output streams so the loop can be driven from stdin, a script, or
//! a byte buffer in tests.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

pub mod format;
pub mod parse;
pub mod repl;
pub mod session;
pub mod settings;

pub use repl::{run, ReplOptions, RunSummary};
pub use session::{CliError, Outcome, Session};
