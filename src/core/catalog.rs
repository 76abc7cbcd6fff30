//! Catalog store - loaded engines, motors and parts plus build resolution
//!
//! The catalog is loaded fresh for every command invocation; there is no
//! cache layer. Resolution turns a saved [`Build`] (which references
//! records by ID or slug) into the fully-formed [`Selection`] and
//! [`EngineFamily`] the engines consume.

use miette::{miette, Result};

use crate::compat::EngineFamily;
use crate::core::entity::find_record;
use crate::core::loader::load_all;
use crate::core::project::Project;
use crate::entities::build::Build;
use crate::entities::engine::GasEngine;
use crate::entities::motor::ElectricMotor;
use crate::entities::part::Part;
use crate::entities::power_source::PowerSource;
use crate::entities::selection::Selection;

/// All catalog records for a project
#[derive(Debug, Default)]
pub struct Catalog {
    pub engines: Vec<GasEngine>,
    pub motors: Vec<ElectricMotor>,
    pub parts: Vec<Part>,
}

impl Catalog {
    /// Load every catalog record under the project root
    pub fn load(project: &Project) -> Result<Self> {
        Ok(Self {
            engines: load_all(&project.engines_dir())?,
            motors: load_all(&project.motors_dir())?,
            parts: load_all(&project.parts_dir())?,
        })
    }

    /// Find an engine by ID or slug
    pub fn find_engine(&self, reference: &str) -> Option<&GasEngine> {
        find_record(&self.engines, reference)
    }

    /// Find a motor by ID or slug
    pub fn find_motor(&self, reference: &str) -> Option<&ElectricMotor> {
        find_record(&self.motors, reference)
    }

    /// Find a part by ID or slug
    pub fn find_part(&self, reference: &str) -> Option<&Part> {
        find_record(&self.parts, reference)
    }

    /// Resolve a saved build into the selection and engine family the
    /// compatibility and performance engines consume.
    ///
    /// Dangling references are a hard error here - the engines are
    /// guaranteed fully-formed records, so data problems surface as one
    /// diagnostic instead of misleading findings.
    pub fn resolve(&self, build: &Build) -> Result<(Selection, EngineFamily)> {
        let mut selection = Selection::new();
        let mut family = EngineFamily::empty();
        let mut missing: Vec<String> = Vec::new();

        if let (Some(engine_ref), Some(motor_ref)) = (&build.engine, &build.motor) {
            return Err(miette!(
                "build '{}' references both an engine ({}) and a motor ({}); a build has exactly one power source",
                build.title,
                engine_ref,
                motor_ref
            ));
        }

        if let Some(engine_ref) = &build.engine {
            match self.find_engine(engine_ref) {
                Some(engine) => {
                    family = EngineFamily::for_engine(engine);
                    selection.power_source = Some(PowerSource::Gas(engine.clone()));
                }
                None => missing.push(format!("engine '{}'", engine_ref)),
            }
        } else if let Some(motor_ref) = &build.motor {
            match self.find_motor(motor_ref) {
                Some(motor) => {
                    selection.power_source = Some(PowerSource::Electric(motor.clone()));
                }
                None => missing.push(format!("motor '{}'", motor_ref)),
            }
        }

        for (category, references) in &build.parts {
            for reference in references {
                match self.find_part(reference) {
                    Some(part) if part.category == *category => {
                        selection.add_part(part.clone());
                    }
                    Some(part) => missing.push(format!(
                        "part '{}' is a {}, but the build lists it under {}",
                        reference, part.category, category
                    )),
                    None => missing.push(format!("part '{}'", reference)),
                }
            }
        }

        if !missing.is_empty() {
            return Err(miette!(
                "build '{}' references records the catalog does not have: {}",
                build.title,
                missing.join(", ")
            ));
        }

        Ok((selection, family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::part::PartCategory;

    fn sample_catalog() -> Catalog {
        let mut engine = GasEngine::new("Predator 212", "predator-212", 212.0, 6.5, 0.75);
        engine.clones = vec!["gx200".to_string()];

        Catalog {
            engines: vec![engine],
            motors: vec![ElectricMotor::new("MY1020", "my1020", 48.0, 1.0, 1.3)],
            parts: vec![
                Part::new("Max-Torque Clutch", "max-torque-clutch", PartCategory::Clutch),
                Part::new("60T Sprocket", "60t-sprocket", PartCategory::Sprocket),
            ],
        }
    }

    #[test]
    fn test_resolve_by_slug() {
        let catalog = sample_catalog();
        let mut build = Build::new("Racer", "Author");
        build.engine = Some("predator-212".to_string());
        build.add_part_ref(PartCategory::Clutch, "max-torque-clutch");

        let (selection, family) = catalog.resolve(&build).unwrap();
        assert!(selection.power_source.as_ref().unwrap().is_gas());
        assert_eq!(selection.part_count(), 1);
        assert!(family.matches_any(["gx200"]));
    }

    #[test]
    fn test_resolve_dangling_part_reference() {
        let catalog = sample_catalog();
        let mut build = Build::new("Racer", "Author");
        build.engine = Some("predator-212".to_string());
        build.add_part_ref(PartCategory::Chain, "no-such-chain");

        let err = catalog.resolve(&build).unwrap_err();
        assert!(err.to_string().contains("no-such-chain"));
    }

    #[test]
    fn test_resolve_category_mismatch() {
        let catalog = sample_catalog();
        let mut build = Build::new("Racer", "Author");
        // The sprocket is filed under the clutch category
        build.add_part_ref(PartCategory::Clutch, "60t-sprocket");

        let err = catalog.resolve(&build).unwrap_err();
        assert!(err.to_string().contains("sprocket"));
    }

    #[test]
    fn test_resolve_rejects_two_power_sources() {
        let catalog = sample_catalog();
        let mut build = Build::new("Confused", "Author");
        build.engine = Some("predator-212".to_string());
        build.motor = Some("my1020".to_string());

        assert!(catalog.resolve(&build).is_err());
    }

    #[test]
    fn test_resolve_motor_build_has_empty_family() {
        let catalog = sample_catalog();
        let mut build = Build::new("EV", "Author");
        build.motor = Some("my1020".to_string());

        let (selection, family) = catalog.resolve(&build).unwrap();
        assert!(selection.power_source.as_ref().unwrap().is_electric());
        assert!(family.is_empty());
    }
}
