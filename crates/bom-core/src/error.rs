// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types returned by registry mutations and aggregate queries.

use thiserror::Error;

/// Errors emitted by [`crate::Registry`] and [`crate::Aggregator`].
///
/// Every failing operation leaves the registry exactly as it was before the
/// call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BomError {
    /// No entity with this name is registered.
    #[error("part {0} does not exist")]
    NotFound(String),
    /// The entity exists but is a component (it has no parts).
    #[error("{0} is a component, not an assembly")]
    NotAnAssembly(String),
    /// An assembly with this name is already defined.
    #[error("assembly {0} already exists")]
    AlreadyExists(String),
    /// An assembly definition lists no parts.
    #[error("assembly {0} must contain at least one part")]
    EmptyAssembly(String),
    /// A quantity in an assembly definition is outside `1..=1000`.
    #[error("quantity {quantity} of part {child} is outside 1..=1000")]
    InvalidQuantity {
        /// Part the quantity was given for.
        child: String,
        /// Offending quantity.
        quantity: i64,
    },
    /// An increment/decrement amount is below 1.
    #[error("amount must be at least 1, got {0}")]
    InvalidAmount(i64),
    /// An increment would push the edge quantity above 1000.
    #[error("assembly {assembly} cannot contain more than 1000 of part {child}")]
    QuantityOverflow {
        /// Assembly being modified.
        assembly: String,
        /// Part whose quantity would overflow.
        child: String,
    },
    /// A decrement asks for more than the edge currently holds.
    #[error("assembly {assembly} contains only {available} of part {child}, cannot remove {requested}")]
    InsufficientQuantity {
        /// Assembly being modified.
        assembly: String,
        /// Part being removed.
        child: String,
        /// Quantity currently on the edge.
        available: u16,
        /// Amount requested for removal.
        requested: i64,
    },
    /// A decrement names a part the assembly does not contain.
    #[error("assembly {assembly} does not contain part {child}")]
    ChildNotFound {
        /// Assembly being modified.
        assembly: String,
        /// Missing part.
        child: String,
    },
    /// The change would make an assembly contain itself.
    #[error("changing {0} would create a cycle")]
    CycleDetected(String),
    /// An exploded total does not fit in 64 bits.
    #[error("total quantity below {0} exceeds the supported range")]
    TotalOverflow(String),
}

/// A broken structural invariant found by [`crate::Registry::check_invariants`].
///
/// None of these can be produced through the public mutation API; they exist
/// so tests can assert that fact after arbitrary operation sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A cycle is reachable from the named entity.
    #[error("entity {0} reaches a cycle")]
    Cycle(String),
    /// An assembly references a part that is not registered.
    #[error("assembly {assembly} references unknown part {child}")]
    DanglingChild {
        /// Referencing assembly.
        assembly: String,
        /// Unregistered part name.
        child: String,
    },
    /// The registry key and the stored entity name disagree.
    #[error("entity registered as {key} is named {name}")]
    NameMismatch {
        /// Registry key.
        key: String,
        /// Name stored on the entity.
        name: String,
    },
}
