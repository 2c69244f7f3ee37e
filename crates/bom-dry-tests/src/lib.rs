// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for BOM crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Registry builder and canned product structures

pub mod config;
pub mod fixtures;

pub use config::InMemoryConfigStore;
pub use fixtures::{bicycle_registry, car_registry, RegistryBuilder};
