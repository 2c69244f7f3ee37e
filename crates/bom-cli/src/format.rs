// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Console rendering of exploded totals.
use bom_core::Totals;

/// Rendering of a mapping with no entries.
pub const EMPTY: &str = "EMPTY";

/// Renders `totals` as `name:qty;...`, largest quantity first, ties by name.
pub fn format_totals(totals: &Totals) -> String {
    if totals.is_empty() {
        return EMPTY.to_owned();
    }
    let mut entries: Vec<(&String, &u64)> = totals.iter().collect();
    entries.sort_by(|(a_name, a_qty), (b_name, b_qty)| {
        b_qty.cmp(a_qty).then_with(|| a_name.cmp(b_name))
    });
    entries
        .into_iter()
        .map(|(name, qty)| format!("{name}:{qty}"))
        .collect::<Vec<_>>()
        .join(";")
}
