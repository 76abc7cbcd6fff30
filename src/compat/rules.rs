//! The compatibility rule set
//!
//! Each rule is a standalone predicate over the [`Selection`]. Rules skip
//! silently when the data they need is absent; only real conflicts and
//! completeness gaps produce findings.

use crate::compat::{EngineFamily, Finding, Severity};
use crate::entities::part::{Part, PartCategory};
use crate::entities::selection::Selection;

/// Tolerance for shaft/bore diameter comparison, in inches
const BORE_TOLERANCE_IN: f64 = 0.001;

/// Tolerance for axle diameter comparison, in inches
const AXLE_TOLERANCE_IN: f64 = 0.01;

/// Categories a complete gas build must fill
const REQUIRED_GAS: &[PartCategory] = &[
    PartCategory::Chain,
    PartCategory::Sprocket,
    PartCategory::Throttle,
    PartCategory::FuelSystem,
];

/// Categories a complete electric build must fill
const REQUIRED_ELECTRIC: &[PartCategory] = &[PartCategory::Battery, PartCategory::MotorController];

/// Shaft/bore fit: every part declaring a bore diameter must match the
/// power source's shaft diameter. Missing data on either side skips the
/// part.
pub fn shaft_bore_fit(selection: &Selection) -> Vec<Finding> {
    let mut findings = Vec::new();

    let Some(power_source) = &selection.power_source else {
        return findings;
    };
    let Some(shaft) = power_source.shaft_diameter_in() else {
        return findings;
    };

    for part in selection.all_parts() {
        let bore = part
            .numeric_spec("bore_diameter_in")
            .or_else(|| part.numeric_spec("shaft_diameter_in"));
        if let Some(bore) = bore {
            if (bore - shaft).abs() > BORE_TOLERANCE_IN {
                findings.push(Finding::new(
                    Severity::Error,
                    part.category.label(),
                    format!("{} shaft", power_source.name()),
                    format!(
                        "Shaft diameter mismatch: {} has a {}\" bore, but {} has a {}\" shaft",
                        part.name,
                        bore,
                        power_source.name(),
                        shaft
                    ),
                ));
            }
        }
    }

    findings
}

/// Paired part interfaces: chain↔sprocket pitch, brake↔axle diameter,
/// tire↔wheel diameter, wheel↔axle bolt pattern.
pub fn paired_interfaces(selection: &Selection) -> Vec<Finding> {
    let mut findings = Vec::new();

    let chain = selection.primary(PartCategory::Chain);
    let sprocket = selection.primary(PartCategory::Sprocket);
    let brake = selection.primary(PartCategory::Brake);
    let axle = selection.primary(PartCategory::Axle);
    let tire = selection.primary(PartCategory::Tire);
    let wheel = selection.primary(PartCategory::Wheel);

    if let (Some(chain), Some(sprocket)) = (chain, sprocket) {
        if let (Some(chain_pitch), Some(sprocket_pitch)) = (pitch_of(chain), pitch_of(sprocket)) {
            if chain_pitch != sprocket_pitch {
                findings.push(Finding::new(
                    Severity::Error,
                    "Chain",
                    "Sprocket",
                    format!(
                        "Chain pitch mismatch: chain is {} pitch, but sprocket is {} pitch",
                        chain_pitch, sprocket_pitch
                    ),
                ));
            }
        }
    }

    if let (Some(brake), Some(axle)) = (brake, axle) {
        if let (Some(brake_bore), Some(axle_dia)) = (
            brake.numeric_spec("axle_diameter_in"),
            axle.numeric_spec("diameter_in"),
        ) {
            if (brake_bore - axle_dia).abs() > AXLE_TOLERANCE_IN {
                findings.push(Finding::new(
                    Severity::Error,
                    "Brake",
                    "Axle",
                    format!(
                        "Axle diameter mismatch: brake fits a {}\" axle, but the axle is {}\"",
                        brake_bore, axle_dia
                    ),
                ));
            }
        }
    }

    if let (Some(tire), Some(wheel)) = (tire, wheel) {
        if let (Some(tire_rim), Some(wheel_dia)) = (
            tire.numeric_spec("wheel_diameter_in"),
            wheel.numeric_spec("diameter_in"),
        ) {
            if (tire_rim - wheel_dia).abs() > AXLE_TOLERANCE_IN {
                findings.push(Finding::new(
                    Severity::Error,
                    "Tire",
                    "Wheel",
                    format!(
                        "Size mismatch: tire fits {}\" wheels, but the wheel is {}\"",
                        tire_rim, wheel_dia
                    ),
                ));
            }
        }
    }

    if let (Some(wheel), Some(axle)) = (wheel, axle) {
        if let (Some(wheel_pattern), Some(axle_pattern)) =
            (wheel.text_spec("bolt_pattern"), axle.text_spec("bolt_pattern"))
        {
            if wheel_pattern != axle_pattern {
                findings.push(Finding::new(
                    Severity::Error,
                    "Wheel",
                    "Axle",
                    format!(
                        "Bolt pattern mismatch: wheel has a {} pattern, but the axle hub is {}",
                        wheel_pattern, axle_pattern
                    ),
                ));
            }
        }
    }

    findings
}

/// Power-source category validity: EV parts on a gas build and
/// engine-internal parts on an electric build are hard errors.
pub fn power_source_categories(selection: &Selection) -> Vec<Finding> {
    let mut findings = Vec::new();

    let Some(power_source) = &selection.power_source else {
        return findings;
    };

    for (category, parts) in &selection.parts {
        if parts.is_empty() {
            continue;
        }
        if power_source.is_gas() && category.is_electric_only() {
            findings.push(Finding::new(
                Severity::Error,
                power_source.name().to_string(),
                category.label(),
                format!(
                    "{} parts do not apply to a gas engine build",
                    category.label()
                ),
            ));
        } else if power_source.is_electric() && category.is_gas_only() {
            findings.push(Finding::new(
                Severity::Error,
                power_source.name().to_string(),
                category.label(),
                format!(
                    "{} parts do not apply to an electric motor build",
                    category.label()
                ),
            ));
        }
    }

    findings
}

/// Engine-family fit: parts declaring a `fits_engines` list are checked
/// against the declared-compatible identifiers for the selected engine.
/// Advisory only - absence from the list is a warning, not an error.
pub fn engine_family_fit(selection: &Selection, family: &EngineFamily) -> Vec<Finding> {
    let mut findings = Vec::new();

    if family.is_empty() {
        return findings;
    }
    let Some(power_source) = &selection.power_source else {
        return findings;
    };

    for part in selection.all_parts() {
        if let Some(fits) = part.list_spec("fits_engines") {
            if fits.is_empty() {
                continue;
            }
            if !family.matches_any(fits.iter().map(String::as_str)) {
                findings.push(Finding::new(
                    Severity::Warning,
                    part.name.clone(),
                    power_source.name().to_string(),
                    format!(
                        "{} is not listed as compatible with {} or its declared clones",
                        part.name,
                        power_source.name()
                    ),
                ));
            }
        }
    }

    findings
}

/// Drivetrain selection: exactly one of clutch or torque converter is
/// expected once parts are being selected. Silent on empty selections.
pub fn drivetrain_selection(selection: &Selection) -> Vec<Finding> {
    let mut findings = Vec::new();

    if selection.part_count() == 0 {
        return findings;
    }

    let has_clutch = selection.has_category(PartCategory::Clutch);
    let has_converter = selection.has_category(PartCategory::TorqueConverter);

    if has_clutch && has_converter {
        findings.push(Finding::new(
            Severity::Warning,
            "Clutch",
            "Torque Converter",
            "Both a clutch and a torque converter are selected; a build uses one or the other",
        ));
    } else if !has_clutch && !has_converter {
        findings.push(Finding::new(
            Severity::Warning,
            "Build",
            "Drive System",
            "No clutch or torque converter selected for power transfer",
        ));
    }

    findings
}

/// Required-category completeness. Quiet on an entirely empty selection;
/// informational while only a power source is chosen; warnings once the
/// build is underway.
pub fn required_categories(selection: &Selection) -> Vec<Finding> {
    let mut findings = Vec::new();

    if selection.is_empty() {
        return findings;
    }

    let Some(power_source) = &selection.power_source else {
        findings.push(Finding::new(
            Severity::Info,
            "Build",
            "Power Source",
            "No engine or motor selected yet",
        ));
        return findings;
    };

    let required = if power_source.is_gas() {
        REQUIRED_GAS
    } else {
        REQUIRED_ELECTRIC
    };
    let severity = if selection.part_count() == 0 {
        Severity::Info
    } else {
        Severity::Warning
    };
    let build_kind = if power_source.is_gas() { "gas" } else { "electric" };

    for category in required {
        if !selection.has_category(*category) {
            findings.push(Finding::new(
                severity,
                "Build",
                category.label(),
                format!(
                    "No {} selected - required for a complete {} build",
                    category.label().to_lowercase(),
                    build_kind
                ),
            ));
        }
    }

    findings
}

/// Pitch is written as text ("#35") in some catalogs and as a bare
/// number in others; compare a normalized form.
fn pitch_of(part: &Part) -> Option<String> {
    part.text_spec("pitch")
        .map(|s| s.trim_start_matches('#').to_string())
        .or_else(|| part.numeric_spec("pitch").map(|n| format!("{}", n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::engine::GasEngine;
    use crate::entities::motor::ElectricMotor;
    use crate::entities::part::SpecValue;
    use crate::entities::power_source::PowerSource;

    fn gas_selection() -> Selection {
        let mut engine = GasEngine::new("Predator 212", "predator-212", 212.0, 6.5, 0.75);
        engine.clones = vec!["gx200".to_string()];
        let mut selection = Selection::new();
        selection.power_source = Some(PowerSource::Gas(engine));
        selection
    }

    fn electric_selection() -> Selection {
        let mut selection = Selection::new();
        selection.power_source = Some(PowerSource::Electric(ElectricMotor::new(
            "MY1020", "my1020", 48.0, 1.0, 1.3,
        )));
        selection
    }

    #[test]
    fn test_shaft_bore_skips_without_declared_bore() {
        let mut selection = gas_selection();
        selection.add_part(Part::new("Mystery Clutch", "mystery", PartCategory::Clutch));

        assert!(shaft_bore_fit(&selection).is_empty());
    }

    #[test]
    fn test_shaft_bore_accepts_alias_key() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("Clutch", "clutch", PartCategory::Clutch)
                .with_spec("bore_in", SpecValue::Number(1.0)),
        );

        let findings = shaft_bore_fit(&selection);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_shaft_bore_within_tolerance_passes() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("Clutch", "clutch", PartCategory::Clutch)
                .with_spec("bore_diameter_in", SpecValue::Number(0.7505)),
        );

        assert!(shaft_bore_fit(&selection).is_empty());
    }

    #[test]
    fn test_chain_pitch_mismatch() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("35 Chain", "35-chain", PartCategory::Chain)
                .with_spec("pitch", SpecValue::Text("#35".to_string())),
        );
        selection.add_part(
            Part::new("40 Sprocket", "40-sprocket", PartCategory::Sprocket)
                .with_spec("pitch", SpecValue::Text("#40".to_string())),
        );

        let findings = paired_interfaces(&selection);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source, "Chain");
    }

    #[test]
    fn test_chain_pitch_text_vs_number_normalized() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("35 Chain", "35-chain", PartCategory::Chain)
                .with_spec("pitch", SpecValue::Text("#35".to_string())),
        );
        selection.add_part(
            Part::new("35 Sprocket", "35-sprocket", PartCategory::Sprocket)
                .with_spec("pitch", SpecValue::Number(35.0)),
        );

        assert!(paired_interfaces(&selection).is_empty());
    }

    #[test]
    fn test_brake_axle_tolerance() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("Band Brake", "band-brake", PartCategory::Brake)
                .with_spec("axle_diameter_in", SpecValue::Number(1.0)),
        );
        selection.add_part(
            Part::new("Live Axle", "live-axle", PartCategory::Axle)
                .with_spec("diameter_in", SpecValue::Number(1.005)),
        );

        // 0.005" is inside the 0.01" tolerance
        assert!(paired_interfaces(&selection).is_empty());
    }

    #[test]
    fn test_battery_on_gas_is_error() {
        let mut selection = gas_selection();
        selection.add_part(Part::new("48V Pack", "48v-pack", PartCategory::Battery));

        let findings = power_source_categories(&selection);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].target, "Battery");
    }

    #[test]
    fn test_neutral_categories_pass_both_power_sources() {
        for mut selection in [gas_selection(), electric_selection()] {
            selection.add_part(Part::new("Chain", "chain", PartCategory::Chain));
            selection.add_part(Part::new("Sprocket", "sprocket", PartCategory::Sprocket));
            assert!(power_source_categories(&selection).is_empty());
        }
    }

    #[test]
    fn test_engine_family_fit_warns_on_no_overlap() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("GX390 Clutch", "gx390-clutch", PartCategory::Clutch).with_spec(
                "fits_engines",
                SpecValue::List(vec!["gx390".to_string()]),
            ),
        );

        let family = match &selection.power_source {
            Some(PowerSource::Gas(engine)) => EngineFamily::for_engine(engine),
            _ => unreachable!(),
        };
        let findings = engine_family_fit(&selection, &family);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_engine_family_fit_accepts_clone_match() {
        let mut selection = gas_selection();
        selection.add_part(
            Part::new("GX200 Clutch", "gx200-clutch", PartCategory::Clutch).with_spec(
                "fits_engines",
                SpecValue::List(vec!["gx200".to_string()]),
            ),
        );

        let family = match &selection.power_source {
            Some(PowerSource::Gas(engine)) => EngineFamily::for_engine(engine),
            _ => unreachable!(),
        };
        assert!(engine_family_fit(&selection, &family).is_empty());
    }

    #[test]
    fn test_drivetrain_silent_without_parts() {
        assert!(drivetrain_selection(&gas_selection()).is_empty());
    }

    #[test]
    fn test_drivetrain_warns_when_both_selected() {
        let mut selection = gas_selection();
        selection.add_part(Part::new("Clutch", "clutch", PartCategory::Clutch));
        selection.add_part(Part::new("TAV2", "tav2", PartCategory::TorqueConverter));

        let findings = drivetrain_selection(&selection);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("one or the other"));
    }

    #[test]
    fn test_drivetrain_warns_when_neither_selected() {
        let mut selection = gas_selection();
        selection.add_part(Part::new("Chain", "chain", PartCategory::Chain));

        let findings = drivetrain_selection(&selection);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].target, "Drive System");
    }

    #[test]
    fn test_required_categories_info_before_first_part() {
        let findings = required_categories(&gas_selection());
        assert_eq!(findings.len(), REQUIRED_GAS.len());
        assert!(findings.iter().all(|f| f.severity == Severity::Info));
    }

    #[test]
    fn test_required_categories_warning_once_underway() {
        let mut selection = gas_selection();
        selection.add_part(Part::new("Chain", "chain", PartCategory::Chain));

        let findings = required_categories(&selection);
        // chain is now covered; the other three still missing
        assert_eq!(findings.len(), REQUIRED_GAS.len() - 1);
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_required_categories_electric_list() {
        let findings = required_categories(&electric_selection());
        assert_eq!(findings.len(), REQUIRED_ELECTRIC.len());
        assert!(findings.iter().any(|f| f.target == "Battery"));
        assert!(findings.iter().any(|f| f.target == "Motor Controller"));
    }

    #[test]
    fn test_required_categories_quiet_on_empty_selection() {
        assert!(required_categories(&Selection::new()).is_empty());
    }
}
