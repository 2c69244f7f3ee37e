// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for BOM tools (config, prefs).
//! Keeps the console front end and its adapters thin.

pub mod config;
pub mod prefs;
