// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests: arbitrary operation sequences never break the registry
//! invariants, and failed operations never leave partial changes behind.

#![allow(missing_docs, clippy::unwrap_used)]
use std::collections::BTreeMap;

use bom_core::{Registry, Validator};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

#[derive(Debug, Clone)]
enum Op {
    Add(usize, Vec<(usize, i64)>),
    Remove(usize),
    Increment(usize, usize, i64),
    Decrement(usize, usize, i64),
}

fn name() -> impl Strategy<Value = usize> {
    0..NAMES.len()
}

fn amount() -> impl Strategy<Value = i64> {
    prop_oneof![
        8 => 1i64..20,
        1 => -2i64..1,
        1 => 990i64..1003,
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (name(), prop::collection::vec((name(), amount()), 0..4)).prop_map(|(n, p)| Op::Add(n, p)),
        1 => name().prop_map(Op::Remove),
        3 => (name(), name(), amount()).prop_map(|(a, c, q)| Op::Increment(a, c, q)),
        2 => (name(), name(), amount()).prop_map(|(a, c, q)| Op::Decrement(a, c, q)),
    ]
}

fn apply(reg: &mut Registry, op: &Op) -> bool {
    let result = match op {
        Op::Add(n, parts) => {
            let parts: BTreeMap<String, i64> = parts
                .iter()
                .map(|&(c, q)| (NAMES[c].to_owned(), q))
                .collect();
            reg.add_assembly(NAMES[*n], parts)
        }
        Op::Remove(n) => reg.remove_assembly(NAMES[*n]),
        Op::Increment(a, c, q) => reg.increment(NAMES[*a], NAMES[*c], *q),
        Op::Decrement(a, c, q) => reg.decrement(NAMES[*a], NAMES[*c], *q),
    };
    result.is_ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 1..40)) {
        let mut reg = Registry::new();
        for op in &ops {
            let before = reg.clone();
            let ok = apply(&mut reg, op);
            if !ok {
                prop_assert_eq!(&reg, &before, "failed {:?} left partial changes", op);
            }
            prop_assert!(reg.check_invariants().is_ok(), "after {:?}: {:?}", op, reg.check_invariants());
            prop_assert!(Validator::is_acyclic(&reg));
        }
    }

    #[test]
    fn explosion_is_pure_and_covers_only_leaves(ops in prop::collection::vec(op(), 1..40)) {
        let mut reg = Registry::new();
        for op in &ops {
            apply(&mut reg, op);
        }
        for root in NAMES {
            let Some(entity) = reg.entity(root) else { continue };
            if entity.is_leaf() {
                continue;
            }
            let components = reg.explode_components(root).unwrap();
            prop_assert_eq!(&components, &reg.explode_components(root).unwrap());
            for (leaf, total) in &components {
                prop_assert!(reg.entity(leaf).unwrap().is_leaf());
                prop_assert!(*total >= 1);
            }
            let assemblies = reg.explode_assemblies(root).unwrap();
            for sub in assemblies.keys() {
                prop_assert!(!reg.entity(sub).unwrap().is_leaf());
                prop_assert_ne!(sub.as_str(), root);
            }
        }
    }
}
