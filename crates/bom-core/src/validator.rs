// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Speculative cycle checking.
//!
//! Acyclicity is re-derived over the *whole* graph for every candidate
//! mutation. Nothing is assumed about the state before the mutation, so a
//! cycle anywhere in the copy rejects the change, not only one passing
//! through the edited entity.
use std::collections::BTreeSet;

use tracing::debug;

use crate::mutation::{Entities, Mutation};
use crate::registry::Registry;

/// Stateless clone-apply-check validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Returns `true` if committing `mutation` to `registry` keeps the graph
    /// acyclic.
    ///
    /// The registry itself is never touched: the mutation is applied to a deep
    /// copy that is dropped before returning.
    pub fn is_acyclic_after(registry: &Registry, mutation: &Mutation) -> bool {
        let mut sandbox = registry.entities().clone();
        mutation.apply_to(&mut sandbox);

        // The edited entity is the most likely cycle member; check it first.
        let verdict = !Self::cycle_from(&sandbox, mutation.target()) && Self::all_acyclic(&sandbox);
        debug!(
            entity = mutation.target(),
            acyclic = verdict,
            "validated candidate mutation"
        );
        verdict
    }

    /// Returns `true` if no entity in `registry` is its own descendant.
    pub fn is_acyclic(registry: &Registry) -> bool {
        Self::all_acyclic(registry.entities())
    }

    /// Returns `true` if a cycle is reachable from `node` through its parts.
    ///
    /// This includes cycles `node` is not a member of: `A -> B -> C -> B`
    /// reports `true` for `A`. Use [`Validator::is_acyclic`] for the
    /// whole-graph answer.
    pub fn has_cycle_from(registry: &Registry, node: &str) -> bool {
        Self::cycle_from(registry.entities(), node)
    }

    pub(crate) fn all_acyclic(entities: &Entities) -> bool {
        entities.keys().all(|name| !Self::cycle_from(entities, name))
    }

    /// Expands a frontier starting at `{node}`: every assembly in the frontier
    /// is replaced by its direct parts while components stay put. The search
    /// stops with a cycle as soon as `node` reappears, and without one once the
    /// frontier holds only components.
    ///
    /// Assemblies in the frontier after round `r` sit at depth exactly `r`, so
    /// one still present after `entities.len()` rounds lies on a path longer
    /// than the entity count. Such a path repeats some entity, which means a
    /// cycle is reachable from `node` even if `node` itself is not on it.
    pub(crate) fn cycle_from(entities: &Entities, node: &str) -> bool {
        let is_leaf = |name: &str| entities.get(name).is_none_or(|e| e.is_leaf());
        if is_leaf(node) {
            return false;
        }

        let mut frontier: BTreeSet<&str> = BTreeSet::from([node]);
        for _ in 0..entities.len() {
            let mut next = BTreeSet::new();
            for &member in &frontier {
                match entities.get(member) {
                    Some(entity) if !entity.is_leaf() => {
                        next.extend(entity.children().keys().map(String::as_str));
                    }
                    _ => {
                        next.insert(member);
                    }
                }
            }
            if next.contains(node) {
                return true;
            }
            if next.iter().all(|&member| is_leaf(member)) {
                return false;
            }
            frontier = next;
        }
        true
    }
}
