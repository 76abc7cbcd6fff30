//! Build performance estimation
//!
//! [`calculate`] turns a power source and a set of parts into a
//! deterministic metrics bundle: horsepower, torque, top speed,
//! power-to-weight, acceleration estimates, weight and gear ratio.
//!
//! The acceleration numbers are a calibrated heuristic, not a physics
//! simulation - they exist to compare builds against each other, and are
//! tuned so typical single-cylinder karts land in a 2-6 second 0-20 mph
//! band. Treat them as estimates.
//!
//! Every output is finite, non-negative and rounded to one decimal
//! place; internal arithmetic runs at full f64 precision until the final
//! rounding step. Malformed inputs (negative weights, zero tooth counts)
//! clamp to safe values instead of propagating NaN or infinity.

use serde::{Deserialize, Serialize};

use crate::entities::part::{Part, PartCategory};
use crate::entities::power_source::PowerSource;

/// Assumed RPM when the power source does not declare one
const DEFAULT_RPM: f64 = 3600.0;

/// Assumed tire diameter in inches when no tire is selected
const DEFAULT_TIRE_DIAMETER_IN: f64 = 11.0;

/// hp-to-torque conversion constant (torque = hp * 5252 / rpm)
const HP_TORQUE_RPM: f64 = 5252.0;

/// Chassis-and-driver allowance added to component weight for the
/// acceleration heuristic only; reported weight stays components-only
const LOADED_ALLOWANCE_LB: f64 = 175.0;

/// The computed metrics bundle for a selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total horsepower (base + part gains)
    pub hp: f64,

    /// Total torque in ft-lb (base + part gains)
    pub torque: f64,

    /// Estimated top speed in mph
    pub top_speed: f64,

    /// Horsepower per 100 lb of component weight
    pub power_to_weight: f64,

    /// Estimated 0-20 mph time in seconds (heuristic)
    pub acceleration_0_to_20: f64,

    /// Estimated 0-30 mph time in seconds (heuristic)
    pub acceleration_0_to_30: f64,

    /// Component weight in pounds (power source + declared part weights)
    pub weight: f64,

    /// Final drive ratio (driven teeth / drive teeth)
    pub gear_ratio: f64,
}

impl PerformanceMetrics {
    /// The neutral baseline returned when no power source is selected
    pub const BASELINE: PerformanceMetrics = PerformanceMetrics {
        hp: 0.0,
        torque: 0.0,
        top_speed: 0.0,
        power_to_weight: 0.0,
        acceleration_0_to_20: 0.0,
        acceleration_0_to_30: 0.0,
        weight: 0.0,
        gear_ratio: 1.0,
    };
}

/// Calculate all performance metrics for a power source and part set.
///
/// Passing `None` returns [`PerformanceMetrics::BASELINE`] so callers can
/// render a placeholder state without special-casing. Part iteration
/// order never affects the result.
pub fn calculate(power_source: Option<&PowerSource>, parts: &[Part]) -> PerformanceMetrics {
    let Some(power_source) = power_source else {
        return PerformanceMetrics::BASELINE;
    };

    let rpm = power_source
        .peak_rpm()
        .filter(|rpm| *rpm > 0.0)
        .unwrap_or(DEFAULT_RPM);

    let mut hp = power_source.horsepower().max(0.0);
    let mut torque = power_source.torque_ftlb().max(0.0);
    if torque <= 0.0 {
        // Manufacturers often publish hp only
        torque = hp * HP_TORQUE_RPM / rpm;
    }

    for part in parts {
        hp += part.numeric_spec("hp_gain").unwrap_or(0.0);
        torque += part.numeric_spec("torque_gain").unwrap_or(0.0);
    }
    hp = hp.max(0.0);
    torque = torque.max(0.0);

    let gear_ratio = gear_ratio_from_parts(parts);
    let weight = power_source.weight_lb().unwrap_or(0.0).max(0.0)
        + parts.iter().map(part_weight_lb).sum::<f64>();

    let tire_diameter = parts
        .iter()
        .find(|p| p.category == PartCategory::Tire)
        .and_then(|p| p.numeric_spec("diameter_in"))
        .filter(|d| *d > 0.0)
        .unwrap_or(DEFAULT_TIRE_DIAMETER_IN);

    let top_speed = drive_speed_mph(rpm, gear_ratio, tire_diameter);

    let power_to_weight = if weight > 0.0 { hp / (weight / 100.0) } else { 0.0 };
    let loaded_p2w = hp / ((weight + LOADED_ALLOWANCE_LB) / 100.0);

    PerformanceMetrics {
        hp: round1(hp),
        torque: round1(torque),
        top_speed: round1(top_speed),
        power_to_weight: round1(power_to_weight),
        acceleration_0_to_20: round1(accel_estimate(hp, loaded_p2w, 12.0, 2.0, 6.0)),
        acceleration_0_to_30: round1(accel_estimate(hp, loaded_p2w, 20.0, 3.0, 9.0)),
        weight: round1(weight),
        gear_ratio: round1(gear_ratio),
    }
}

/// Wheel speed in mph for an engine RPM, final drive ratio and tire
/// diameter: `mph = (rpm / ratio) * (pi * tire_in / (12 * 5280)) * 60`.
///
/// Also used by the standalone gear-ratio tool; clamps non-positive
/// inputs to the defaults instead of dividing by zero.
pub fn drive_speed_mph(rpm: f64, ratio: f64, tire_diameter_in: f64) -> f64 {
    let rpm = if rpm > 0.0 { rpm } else { DEFAULT_RPM };
    let ratio = if ratio > 0.0 { ratio } else { 1.0 };
    let tire = if tire_diameter_in > 0.0 {
        tire_diameter_in
    } else {
        DEFAULT_TIRE_DIAMETER_IN
    };

    let circumference_miles = std::f64::consts::PI * tire / (12.0 * 5280.0);
    (rpm / ratio) * circumference_miles * 60.0
}

/// Final drive ratio from the selected drivetrain parts.
///
/// An explicit `ratio` specification on a drivetrain part wins;
/// otherwise driven teeth come from the sprocket and drive teeth from
/// the clutch/torque converter (or a sprocket set declaring both).
/// Missing or degenerate tooth counts fall back to 1.0.
pub fn gear_ratio_from_parts(parts: &[Part]) -> f64 {
    let drivetrain = [
        PartCategory::Clutch,
        PartCategory::TorqueConverter,
        PartCategory::Sprocket,
    ];
    for category in drivetrain {
        if let Some(ratio) = first_of(parts, category).and_then(|p| p.numeric_spec("ratio")) {
            if ratio > 0.0 && ratio.is_finite() {
                return ratio;
            }
        }
    }

    let sprocket = first_of(parts, PartCategory::Sprocket);
    let driven = sprocket.and_then(|p| p.numeric_spec("driven_teeth"));

    let drive = first_of(parts, PartCategory::Clutch)
        .and_then(|p| p.numeric_spec("drive_teeth"))
        .or_else(|| {
            first_of(parts, PartCategory::TorqueConverter)
                .and_then(|p| p.numeric_spec("drive_teeth"))
        })
        .or_else(|| {
            // A sprocket set may declare both tooth counts itself; read
            // the raw key so the driven-side "teeth" alias can't leak in
            sprocket
                .and_then(|p| p.specifications.get("drive_teeth"))
                .and_then(crate::entities::part::SpecValue::as_number)
        });

    match (drive, driven) {
        (Some(drive), Some(driven)) if drive > 0.0 && driven > 0.0 => driven / drive,
        _ => 1.0,
    }
}

fn first_of(parts: &[Part], category: PartCategory) -> Option<&Part> {
    parts.iter().find(|p| p.category == category)
}

/// Declared part weight in pounds; negative values clamp to zero
fn part_weight_lb(part: &Part) -> f64 {
    part.numeric_spec("weight_lb")
        .or_else(|| part.numeric_spec("weight_oz").map(|oz| oz / 16.0))
        .unwrap_or(0.0)
        .max(0.0)
}

/// Heuristic acceleration time: inverse in loaded power-to-weight,
/// clamped to a plausible band. Returns 0.0 for a zero-hp build.
fn accel_estimate(hp: f64, loaded_p2w: f64, scale: f64, min_s: f64, max_s: f64) -> f64 {
    if hp <= 0.0 {
        return 0.0;
    }
    (scale / (loaded_p2w + 0.5)).clamp(min_s, max_s)
}

fn round1(value: f64) -> f64 {
    let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
    (value * 10.0).round() / 10.0
}
