// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only quantity explosion over a [`Registry`].
use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::error::BomError;
use crate::registry::Registry;

/// Exploded totals keyed by entity name.
pub type Totals = BTreeMap<String, u64>;

/// Recursive multiply-and-accumulate queries rooted at one assembly.
///
/// The multiplier for a node is the product of every edge quantity on the
/// path from the root; totals reached over several paths are summed.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    registry: &'a Registry,
}

impl<'a> Aggregator<'a> {
    /// Borrows `registry` for querying.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Total count of every component reachable from `root`.
    ///
    /// Only leaves appear in the result.
    pub fn explode_components(&self, root: &str) -> Result<Totals, BomError> {
        let entity = self.root(root)?;
        let mut totals = Totals::new();
        self.walk_components(root, entity, 1, &mut totals)?;
        Ok(totals)
    }

    /// Total count of every sub-assembly reachable from `root`.
    ///
    /// Components are ignored at every level; only assembly-to-assembly edges
    /// are followed. `root` itself is not included.
    pub fn explode_assemblies(&self, root: &str) -> Result<Totals, BomError> {
        let entity = self.root(root)?;
        let mut totals = Totals::new();
        self.walk_assemblies(root, entity, 1, &mut totals)?;
        Ok(totals)
    }

    fn root(&self, name: &str) -> Result<&'a Entity, BomError> {
        let entity = self
            .registry
            .entity(name)
            .ok_or_else(|| BomError::NotFound(name.to_owned()))?;
        if entity.is_leaf() {
            return Err(BomError::NotAnAssembly(name.to_owned()));
        }
        Ok(entity)
    }

    fn walk_components(
        &self,
        root: &str,
        entity: &Entity,
        multiplier: u64,
        totals: &mut Totals,
    ) -> Result<(), BomError> {
        for (name, quantity) in entity.children() {
            let count = scale(root, multiplier, quantity.get())?;
            match self.registry.entity(name) {
                Some(child) if !child.is_leaf() => {
                    self.walk_components(root, child, count, totals)?;
                }
                _ => accumulate(root, totals, name, count)?,
            }
        }
        Ok(())
    }

    fn walk_assemblies(
        &self,
        root: &str,
        entity: &Entity,
        multiplier: u64,
        totals: &mut Totals,
    ) -> Result<(), BomError> {
        for (name, quantity) in entity.children() {
            let Some(child) = self.registry.entity(name).filter(|c| !c.is_leaf()) else {
                continue;
            };
            let count = scale(root, multiplier, quantity.get())?;
            accumulate(root, totals, name, count)?;
            if self.has_sub_assembly(child) {
                self.walk_assemblies(root, child, count, totals)?;
            }
        }
        Ok(())
    }

    fn has_sub_assembly(&self, entity: &Entity) -> bool {
        entity
            .children()
            .keys()
            .any(|name| self.registry.entity(name).is_some_and(|c| !c.is_leaf()))
    }
}

fn scale(root: &str, multiplier: u64, quantity: u16) -> Result<u64, BomError> {
    multiplier
        .checked_mul(u64::from(quantity))
        .ok_or_else(|| BomError::TotalOverflow(root.to_owned()))
}

fn accumulate(root: &str, totals: &mut Totals, name: &str, count: u64) -> Result<(), BomError> {
    let slot = totals.entry(name.to_owned()).or_insert(0);
    *slot = slot
        .checked_add(count)
        .ok_or_else(|| BomError::TotalOverflow(root.to_owned()))?;
    Ok(())
}
