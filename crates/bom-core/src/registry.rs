// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoritative name → entity store.
use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument};

use crate::aggregator::Aggregator;
use crate::entity::{Entity, Quantity};
use crate::error::{BomError, InvariantViolation};
use crate::mutation::{Entities, Mutation};
use crate::validator::Validator;

/// Owns every entity of one BOM graph.
///
/// Mutations are all-or-nothing: an operation that returns `Err` leaves the
/// registry unchanged. Topology changes are validated against a speculative
/// copy (see [`Validator`]) before they are applied here.
///
/// # Invariants
/// - No entity is its own descendant.
/// - Every part named by an assembly is registered.
/// - Edge quantities lie in `1..=1000` (enforced by [`Quantity`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entities: Entities,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entities(&self) -> &Entities {
        &self.entities
    }

    /// Returns the entity named `name`, if registered.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// `true` if some entity other than `excluding` lists `name` as a part.
    pub fn has_parent(&self, name: &str, excluding: Option<&str>) -> bool {
        self.entities
            .iter()
            .any(|(key, entity)| entity.contains(name) && Some(key.as_str()) != excluding)
    }

    /// Looks up `name` and requires it to be an assembly.
    fn assembly(&self, name: &str) -> Result<&Entity, BomError> {
        let entity = self
            .entities
            .get(name)
            .ok_or_else(|| BomError::NotFound(name.to_owned()))?;
        if entity.is_leaf() {
            return Err(BomError::NotAnAssembly(name.to_owned()));
        }
        Ok(entity)
    }

    /// Defines `name` as an assembly containing `children`.
    ///
    /// A name currently known only as a component is promoted in place, so
    /// existing parents keep referencing it. Unknown part names are created as
    /// components.
    #[instrument(level = "debug", skip(self, children))]
    pub fn add_assembly(
        &mut self,
        name: &str,
        children: BTreeMap<String, i64>,
    ) -> Result<(), BomError> {
        if self.entities.get(name).is_some_and(|e| !e.is_leaf()) {
            return Err(BomError::AlreadyExists(name.to_owned()));
        }
        if children.is_empty() {
            return Err(BomError::EmptyAssembly(name.to_owned()));
        }
        let mut parts = BTreeMap::new();
        for (child, quantity) in children {
            let Some(q) = Quantity::new(quantity) else {
                return Err(BomError::InvalidQuantity { child, quantity });
            };
            parts.insert(child, q);
        }
        self.commit(Mutation::Define {
            name: name.to_owned(),
            children: parts,
        })
    }

    /// Removes the assembly `name`.
    ///
    /// Direct parts that end up unreferenced components are deleted; deeper
    /// parts are left alone. If another assembly still lists `name`, it stays
    /// registered as a component, otherwise it is deleted.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_assembly(&mut self, name: &str) -> Result<(), BomError> {
        let parts: Vec<String> = self.assembly(name)?.children().keys().cloned().collect();

        for part in &parts {
            let is_leaf = self.entities.get(part).is_some_and(Entity::is_leaf);
            if is_leaf && !self.has_parent(part, Some(name)) {
                self.entities.remove(part);
                debug!(part = %part, "swept orphaned component");
            }
        }

        if self.has_parent(name, Some(name)) {
            if let Some(entity) = self.entities.get_mut(name) {
                entity.demote();
            }
            debug!("assembly still referenced, demoted to component");
        } else {
            self.entities.remove(name);
            debug!("assembly deleted");
        }
        Ok(())
    }

    /// Adds `amount` units of `child` to `assembly`.
    ///
    /// Creates the edge when absent and `child` when unknown.
    #[instrument(level = "debug", skip(self))]
    pub fn increment(&mut self, assembly: &str, child: &str, amount: i64) -> Result<(), BomError> {
        let current = self.assembly(assembly)?.quantity_of(child);
        if amount < 1 {
            return Err(BomError::InvalidAmount(amount));
        }
        let quantity = match current {
            Some(q) => q.checked_add(amount),
            None => Quantity::new(amount),
        }
        .ok_or_else(|| BomError::QuantityOverflow {
            assembly: assembly.to_owned(),
            child: child.to_owned(),
        })?;
        self.commit(Mutation::SetEdge {
            assembly: assembly.to_owned(),
            child: child.to_owned(),
            quantity,
        })
    }

    /// Removes `amount` units of `child` from `assembly`.
    ///
    /// When the edge drops to zero it is removed; then `assembly` is deleted
    /// if nothing references it, and `child` is deleted if it is a component
    /// nothing references. Other parts of a deleted `assembly` stay registered.
    /// Removing edges cannot close a cycle, so no validation runs.
    #[instrument(level = "debug", skip(self))]
    pub fn decrement(&mut self, assembly: &str, child: &str, amount: i64) -> Result<(), BomError> {
        let current = self.assembly(assembly)?.quantity_of(child);
        if amount < 1 {
            return Err(BomError::InvalidAmount(amount));
        }
        let Some(current) = current else {
            return Err(BomError::ChildNotFound {
                assembly: assembly.to_owned(),
                child: child.to_owned(),
            });
        };
        if i64::from(current.get()) < amount {
            return Err(BomError::InsufficientQuantity {
                assembly: assembly.to_owned(),
                child: child.to_owned(),
                available: current.get(),
                requested: amount,
            });
        }

        let Some(entity) = self.entities.get_mut(assembly) else {
            return Err(BomError::NotFound(assembly.to_owned()));
        };
        if let Some(remaining) = current.checked_sub(amount) {
            entity.set_quantity(child, remaining);
            debug!(remaining = remaining.get(), "edge decremented");
            return Ok(());
        }

        entity.remove_child(child);
        debug!("edge removed");
        if !self.has_parent(assembly, None) {
            self.entities.remove(assembly);
            debug!("unreferenced assembly deleted");
        }
        let child_is_leaf = self.entities.get(child).is_some_and(Entity::is_leaf);
        if child_is_leaf && !self.has_parent(child, None) {
            self.entities.remove(child);
            debug!("orphaned component deleted");
        }
        Ok(())
    }

    /// Renders `name`: `COMPONENT` for a leaf, `part:qty;...` for an assembly.
    pub fn stringify(&self, name: &str) -> Result<String, BomError> {
        self.entities
            .get(name)
            .map(ToString::to_string)
            .ok_or_else(|| BomError::NotFound(name.to_owned()))
    }

    /// Exploded leaf totals below `root`. See [`Aggregator::explode_components`].
    pub fn explode_components(&self, root: &str) -> Result<BTreeMap<String, u64>, BomError> {
        Aggregator::new(self).explode_components(root)
    }

    /// Exploded sub-assembly totals below `root`. See
    /// [`Aggregator::explode_assemblies`].
    pub fn explode_assemblies(&self, root: &str) -> Result<BTreeMap<String, u64>, BomError> {
        Aggregator::new(self).explode_assemblies(root)
    }

    /// Re-derives every structural invariant, returning the first violation.
    ///
    /// Checks key/name agreement, that every part is registered, and
    /// acyclicity. Edge quantities are not re-checked: [`Quantity`] cannot hold
    /// a value outside `1..=1000`.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (key, entity) in &self.entities {
            if entity.name() != key {
                return Err(InvariantViolation::NameMismatch {
                    key: key.clone(),
                    name: entity.name().to_owned(),
                });
            }
            if let Some(child) = entity.children().keys().find(|c| !self.contains(c)) {
                return Err(InvariantViolation::DanglingChild {
                    assembly: key.clone(),
                    child: child.clone(),
                });
            }
        }
        if let Some(name) = self
            .entities
            .keys()
            .find(|name| Validator::cycle_from(&self.entities, name))
        {
            return Err(InvariantViolation::Cycle(name.clone()));
        }
        Ok(())
    }

    fn commit(&mut self, mutation: Mutation) -> Result<(), BomError> {
        if !Validator::is_acyclic_after(self, &mutation) {
            return Err(BomError::CycleDetected(mutation.target().to_owned()));
        }
        mutation.apply_to(&mut self.entities);
        debug!(entity = mutation.target(), "mutation committed");
        Ok(())
    }
}

/// Renders every entity as `name:rendering`, joined by `;`, in name order.
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, entity)) in self.entities.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{name}:{entity}")?;
        }
        Ok(())
    }
}
