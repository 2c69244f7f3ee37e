// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registry builder and canned product structures for tests.

use std::collections::BTreeMap;

use bom_core::{BomError, Registry};

/// Builder that replays assembly definitions through [`Registry::add_assembly`].
///
/// Definitions are applied in the order they were added, so the usual
/// validation (cycles, quantity range) still runs.
///
/// # Example
///
/// ```
/// use bom_dry_tests::RegistryBuilder;
///
/// let reg = RegistryBuilder::new()
///     .assembly("Car", &[("Wheel", 4), ("Engine", 1)])
///     .assembly("Engine", &[("Piston", 2)])
///     .build()
///     .unwrap();
/// assert_eq!(reg.stringify("Car").unwrap(), "Engine:1;Wheel:4");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    definitions: Vec<(String, BTreeMap<String, i64>)>,
}

impl RegistryBuilder {
    /// Create a builder with no definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `name` as an assembly of `(part, quantity)` pairs.
    pub fn assembly(mut self, name: &str, parts: &[(&str, i64)]) -> Self {
        let parts = parts
            .iter()
            .map(|&(part, quantity)| (part.to_owned(), quantity))
            .collect();
        self.definitions.push((name.to_owned(), parts));
        self
    }

    /// Apply every queued definition to a fresh registry.
    pub fn build(self) -> Result<Registry, BomError> {
        let mut registry = Registry::new();
        for (name, parts) in self.definitions {
            registry.add_assembly(&name, parts)?;
        }
        Ok(registry)
    }
}

/// `Car = 4 Wheel + 1 Engine`, `Engine = 2 Piston`.
pub fn car_registry() -> Result<Registry, BomError> {
    RegistryBuilder::new()
        .assembly("Car", &[("Wheel", 4), ("Engine", 1)])
        .assembly("Engine", &[("Piston", 2)])
        .build()
}

/// A three-level bicycle with shared fasteners.
///
/// - `Bicycle = 1 Frame + 2 Wheel + 1 Drivetrain + 4 Bolt`
/// - `Wheel = 1 Rim + 1 Hub + 32 Spoke`
/// - `Hub = 1 Axle + 2 Bearing + 2 Bolt`
/// - `Drivetrain = 1 Chain + 2 Pedal + 1 Crank`
/// - `Crank = 2 Arm + 2 Bolt`
pub fn bicycle_registry() -> Result<Registry, BomError> {
    RegistryBuilder::new()
        .assembly(
            "Bicycle",
            &[("Frame", 1), ("Wheel", 2), ("Drivetrain", 1), ("Bolt", 4)],
        )
        .assembly("Wheel", &[("Rim", 1), ("Hub", 1), ("Spoke", 32)])
        .assembly("Hub", &[("Axle", 1), ("Bearing", 2), ("Bolt", 2)])
        .assembly("Drivetrain", &[("Chain", 1), ("Pedal", 2), ("Crank", 1)])
        .assembly("Crank", &[("Arm", 2), ("Bolt", 2)])
        .build()
}
