// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Entity records and the bounded edge quantity.
use std::collections::BTreeMap;
use std::fmt;

/// Number of units of one part contained in an assembly.
///
/// # Invariants
/// - Always within [`Quantity::MIN`]`..=`[`Quantity::MAX`]; a zero quantity is
///   never stored, the edge is removed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u16);

impl Quantity {
    /// Smallest quantity an edge may carry.
    pub const MIN: Self = Self(1);
    /// Largest quantity an edge may carry.
    pub const MAX: Self = Self(1000);

    /// Returns `Some` when `value` lies in `1..=1000`.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            u16::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Adds `amount`, returning `None` if the result leaves the valid range.
    #[must_use]
    pub fn checked_add(self, amount: i64) -> Option<Self> {
        i64::from(self.0).checked_add(amount).and_then(Self::new)
    }

    /// Subtracts `amount`, returning `None` if the result drops below 1.
    #[must_use]
    pub fn checked_sub(self, amount: i64) -> Option<Self> {
        i64::from(self.0).checked_sub(amount).and_then(Self::new)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named node of the BOM graph.
///
/// Components and assemblies share this one type: an entity with no parts is
/// a component (leaf), anything else is an assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name: String,
    children: BTreeMap<String, Quantity>,
}

impl Entity {
    /// Creates a component (an entity without parts).
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    /// Creates an entity with the given parts.
    pub fn assembly(name: impl Into<String>, children: BTreeMap<String, Quantity>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct parts in name order.
    pub fn children(&self) -> &BTreeMap<String, Quantity> {
        &self.children
    }

    /// `true` when the entity has no parts.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// `true` when `child` is a direct part.
    pub fn contains(&self, child: &str) -> bool {
        self.children.contains_key(child)
    }

    /// Quantity of a direct part, if present.
    pub fn quantity_of(&self, child: &str) -> Option<Quantity> {
        self.children.get(child).copied()
    }

    pub(crate) fn set_quantity(&mut self, child: &str, quantity: Quantity) {
        self.children.insert(child.to_owned(), quantity);
    }

    pub(crate) fn remove_child(&mut self, child: &str) -> Option<Quantity> {
        self.children.remove(child)
    }

    /// Drops every part, turning the entity into a component.
    pub(crate) fn demote(&mut self) {
        self.children.clear();
    }
}

/// Renders `COMPONENT` for a leaf, otherwise `part:qty;part:qty` in name order.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return f.write_str("COMPONENT");
        }
        for (i, (child, quantity)) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{child}:{quantity}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn quantity_bounds_are_inclusive() {
        assert_eq!(Quantity::new(1), Some(Quantity::MIN));
        assert_eq!(Quantity::new(1000), Some(Quantity::MAX));
        assert_eq!(Quantity::new(0), None);
        assert_eq!(Quantity::new(1001), None);
        assert_eq!(Quantity::new(-5), None);
    }

    #[test]
    fn quantity_arithmetic_stays_in_range() {
        let q = Quantity::new(999).unwrap();
        assert_eq!(q.checked_add(1), Some(Quantity::MAX));
        assert_eq!(q.checked_add(2), None);
        assert_eq!(q.checked_add(i64::MAX), None);
        assert_eq!(q.checked_sub(998), Some(Quantity::MIN));
        assert_eq!(q.checked_sub(999), None);
    }

    #[test]
    fn leaf_renders_as_component() {
        assert_eq!(Entity::leaf("Bolt").to_string(), "COMPONENT");
    }

    #[test]
    fn assembly_renders_parts_in_name_order() {
        let children = BTreeMap::from([
            ("Wheel".to_owned(), Quantity::new(4).unwrap()),
            ("Engine".to_owned(), Quantity::MIN),
        ]);
        let car = Entity::assembly("Car", children);
        assert!(!car.is_leaf());
        assert_eq!(car.to_string(), "Engine:1;Wheel:4");
    }

    #[test]
    fn demote_turns_assembly_into_leaf() {
        let mut e = Entity::assembly("A", BTreeMap::from([("B".to_owned(), Quantity::MIN)]));
        e.demote();
        assert!(e.is_leaf());
        assert_eq!(e.name(), "A");
    }
}
