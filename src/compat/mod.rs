//! Build compatibility evaluation
//!
//! [`evaluate`] runs an ordered list of independent rule functions over a
//! [`Selection`] and returns findings sorted error → warning → info, with
//! stable insertion order inside each severity band. That ordering is a
//! contract: consumers rely on errors surfacing first.
//!
//! The evaluator never fails. A rule whose specification fields are
//! absent contributes zero findings - incomplete catalog data is
//! expected, and a data-quality gap is not a compatibility problem.

pub mod rules;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::entities::engine::GasEngine;
use crate::entities::selection::Selection;

/// Finding severity, in surfacing order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Physically incompatible - blocks build completion
    Error,
    /// Works but suboptimal or risky
    Warning,
    /// Neutral note
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single compatibility finding between two named endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity class
    pub severity: Severity,

    /// Source endpoint label (e.g. "Clutch")
    pub source: String,

    /// Target endpoint label (e.g. "Predator 212 shaft")
    pub target: String,

    /// Human-readable explanation
    pub message: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        source: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            source: source.into(),
            target: target.into(),
            message: message.into(),
        }
    }
}

/// The set of declared-compatible engine identifiers for the selected
/// engine: its own ID and slug plus every entry in its `clones` list.
///
/// Supplied by the caller as precomputed data; the evaluator never
/// fetches relationship data itself.
#[derive(Debug, Clone, Default)]
pub struct EngineFamily {
    identifiers: BTreeSet<String>,
}

impl EngineFamily {
    /// An empty family (no gas engine selected)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the family for a catalog engine
    pub fn for_engine(engine: &GasEngine) -> Self {
        let mut identifiers = BTreeSet::new();
        identifiers.insert(engine.id.to_string().to_lowercase());
        identifiers.insert(engine.slug.to_lowercase());
        for clone in &engine.clones {
            identifiers.insert(clone.to_lowercase());
        }
        Self { identifiers }
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Whether any of the given identifiers belongs to this family
    pub fn matches_any<'a, I: IntoIterator<Item = &'a str>>(&self, identifiers: I) -> bool {
        identifiers
            .into_iter()
            .any(|id| self.identifiers.contains(&id.to_lowercase()))
    }
}

/// Evaluate every compatibility rule against a selection.
///
/// Findings come back sorted error → warning → info; within a severity,
/// rules contribute in their fixed evaluation order.
pub fn evaluate(selection: &Selection, family: &EngineFamily) -> Vec<Finding> {
    let mut findings = Vec::new();

    findings.extend(rules::shaft_bore_fit(selection));
    findings.extend(rules::paired_interfaces(selection));
    findings.extend(rules::power_source_categories(selection));
    findings.extend(rules::engine_family_fit(selection, family));
    findings.extend(rules::drivetrain_selection(selection));
    findings.extend(rules::required_categories(selection));

    // Stable sort preserves insertion order within a severity band
    findings.sort_by_key(|f| f.severity);
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::motor::ElectricMotor;
    use crate::entities::part::{Part, PartCategory, SpecValue};
    use crate::entities::power_source::PowerSource;

    fn predator() -> GasEngine {
        let mut engine = GasEngine::new("Predator 212", "predator-212", 212.0, 6.5, 0.75);
        engine.torque_ftlb = 8.1;
        engine.max_rpm = Some(3600.0);
        engine.weight_lb = Some(35.0);
        engine.clones = vec!["gx200".to_string()];
        engine
    }

    fn gas_selection() -> Selection {
        let mut selection = Selection::new();
        selection.power_source = Some(PowerSource::Gas(predator()));
        selection
    }

    #[test]
    fn test_empty_selection_yields_no_findings() {
        let findings = evaluate(&Selection::new(), &EngineFamily::empty());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_matching_bore_yields_no_errors() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("Clutch", "clutch-75", PartCategory::Clutch)
                .with_spec("bore_diameter_in", SpecValue::Number(0.75)),
        );
        selection.add_part(Part::new("35 Chain", "35-chain", PartCategory::Chain));
        selection.add_part(
            Part::new("Sprocket Set", "sprocket-set", PartCategory::Sprocket)
                .with_spec("drive_teeth", SpecValue::Number(12.0))
                .with_spec("driven_teeth", SpecValue::Number(60.0)),
        );

        let findings = evaluate(&selection, &EngineFamily::for_engine(&predator()));
        assert!(findings.iter().all(|f| f.severity != Severity::Error));
    }

    #[test]
    fn test_bore_mismatch_yields_exactly_one_error() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("Clutch", "clutch-1in", PartCategory::Clutch)
                .with_spec("bore_diameter_in", SpecValue::Number(1.0)),
        );

        let findings = evaluate(&selection, &EngineFamily::empty());
        let errors: Vec<_> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source, "Clutch");
        assert!(errors[0].target.contains("shaft"));
    }

    #[test]
    fn test_carburetor_on_electric_is_error() {
        let mut selection = Selection::new();
        selection.power_source = Some(PowerSource::Electric(ElectricMotor::new(
            "MY1020", "my1020", 48.0, 1.0, 1.3,
        )));
        selection.add_part(Part::new("Carb", "carb", PartCategory::Carburetor));

        let findings = evaluate(&selection, &EngineFamily::empty());
        let errors: Vec<_> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Carburetor"));
    }

    #[test]
    fn test_findings_sorted_error_warning_info() {
        let mut selection = gas_selection();
        // bore mismatch (error), battery on gas (error), no drivetrain
        // (warning), missing required categories (warnings)
        selection.add_part(
            Part::new("Brake Band", "brake-band", PartCategory::Brake)
                .with_spec("bore_diameter_in", SpecValue::Number(1.0)),
        );
        selection.add_part(Part::new("48V Pack", "48v-pack", PartCategory::Battery));

        let findings = evaluate(&selection, &EngineFamily::empty());
        assert!(findings.len() > 2);
        let ranks: Vec<_> = findings.iter().map(|f| f.severity).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let mut selection = gas_selection();
        selection.add_part(Part::new("Chain", "chain", PartCategory::Chain));

        let family = EngineFamily::for_engine(&predator());
        let first = evaluate(&selection, &family);
        let second = evaluate(&selection, &family);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_power_source_never_yields_shaft_findings() {
        let mut selection = Selection::new();
        selection.add_part(
            Part::new("Clutch", "clutch", PartCategory::Clutch)
                .with_spec("bore_diameter_in", SpecValue::Number(1.0)),
        );

        let findings = evaluate(&selection, &EngineFamily::empty());
        assert!(findings.iter().all(|f| f.severity != Severity::Error));
        assert!(findings
            .iter()
            .any(|f| f.severity == Severity::Info && f.target == "Power Source"));
    }

    #[test]
    fn test_engine_family_membership() {
        let family = EngineFamily::for_engine(&predator());
        assert!(family.matches_any(["gx200"]));
        assert!(family.matches_any(["Predator-212"]));
        assert!(!family.matches_any(["tillotson-225"]));
        assert!(EngineFamily::empty().is_empty());
    }
}
