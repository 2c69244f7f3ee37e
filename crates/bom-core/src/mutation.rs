// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Candidate graph mutations.
//!
//! A [`Mutation`] is a plain value: the validator replays it on a disposable
//! copy of the entity map and the registry replays the very same value on the
//! live map once the copy passed. Both go through [`Mutation::apply_to`], so the
//! change that was checked is exactly the change that is committed.
use std::collections::BTreeMap;

use crate::entity::{Entity, Quantity};

/// Name-keyed entity storage shared by the registry and the validator sandbox.
pub(crate) type Entities = BTreeMap<String, Entity>;

/// A topology-changing edit that must pass the cycle check before it commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert or overwrite `name` as an assembly with exactly `children`.
    ///
    /// Unknown part names are created as components.
    Define {
        /// Assembly name.
        name: String,
        /// Parts with their (already range-checked) quantities.
        children: BTreeMap<String, Quantity>,
    },
    /// Set the `assembly -> child` edge to `quantity`.
    ///
    /// An unknown `child` is created as a component first.
    SetEdge {
        /// Assembly being edited.
        assembly: String,
        /// Part on the edge.
        child: String,
        /// Resulting edge quantity.
        quantity: Quantity,
    },
}

impl Mutation {
    /// The entity whose definition this mutation rewrites.
    pub fn target(&self) -> &str {
        match self {
            Self::Define { name, .. } => name,
            Self::SetEdge { assembly, .. } => assembly,
        }
    }

    pub(crate) fn apply_to(&self, entities: &mut Entities) {
        match self {
            Self::Define { name, children } => {
                for child in children.keys() {
                    ensure_leaf(entities, child);
                }
                entities.insert(name.clone(), Entity::assembly(name.clone(), children.clone()));
            }
            Self::SetEdge {
                assembly,
                child,
                quantity,
            } => {
                ensure_leaf(entities, child);
                if let Some(entity) = entities.get_mut(assembly) {
                    entity.set_quantity(child, *quantity);
                }
            }
        }
    }
}

fn ensure_leaf(entities: &mut Entities, name: &str) {
    if !entities.contains_key(name) {
        entities.insert(name.to_owned(), Entity::leaf(name));
    }
}
