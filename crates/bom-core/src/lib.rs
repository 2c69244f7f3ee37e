// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! bom-core: acyclic bill-of-materials graph.
//!
//! A [`Registry`] owns named entities. An entity without parts is a
//! component; an entity with parts is an assembly whose edges carry a
//! [`Quantity`] in `1..=1000`. Every topology change is replayed on a deep copy
//! and re-validated over the whole graph by the [`Validator`] before it is
//! committed, so no entity can ever become its own descendant. The
//! [`Aggregator`] answers exploded component and sub-assembly totals.
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
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod aggregator;
mod entity;
mod error;
mod mutation;
mod registry;
mod validator;

/// Exploded-total queries.
pub use aggregator::{Aggregator, Totals};
/// Graph nodes and bounded edge quantities.
pub use entity::{Entity, Quantity};
/// Operation errors and invariant violations.
pub use error::{BomError, InvariantViolation};
/// Candidate mutations checked before commit.
pub use mutation::Mutation;
/// The entity store.
pub use registry::Registry;
/// Whole-graph cycle checking.
pub use validator::Validator;
