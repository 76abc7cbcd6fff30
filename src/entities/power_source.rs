//! PowerSource - the engine or motor chosen for a build
//!
//! A build has exactly one power source. The compatibility and
//! performance engines never care which variant they hold beyond the
//! uniform accessors below, so rule code stays free of matches on the
//! power source type.

use serde::{Deserialize, Serialize};

use crate::entities::engine::GasEngine;
use crate::entities::motor::ElectricMotor;

/// The selected power source for a build
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PowerSource {
    Gas(GasEngine),
    Electric(ElectricMotor),
}

impl PowerSource {
    /// Display name of the underlying record
    pub fn name(&self) -> &str {
        match self {
            PowerSource::Gas(engine) => &engine.name,
            PowerSource::Electric(motor) => &motor.name,
        }
    }

    /// Rated horsepower
    pub fn horsepower(&self) -> f64 {
        match self {
            PowerSource::Gas(engine) => engine.horsepower,
            PowerSource::Electric(motor) => motor.horsepower,
        }
    }

    /// Rated torque in ft-lb (0.0 when not published)
    pub fn torque_ftlb(&self) -> f64 {
        match self {
            PowerSource::Gas(engine) => engine.torque_ftlb,
            PowerSource::Electric(motor) => motor.torque_ftlb,
        }
    }

    /// Output shaft diameter in inches, when the record declares one
    pub fn shaft_diameter_in(&self) -> Option<f64> {
        match self {
            PowerSource::Gas(engine) => Some(engine.shaft_diameter_in),
            PowerSource::Electric(motor) => motor.shaft_diameter_in,
        }
    }

    /// Peak usable RPM: governed max for gas, rated RPM for electric
    pub fn peak_rpm(&self) -> Option<f64> {
        match self {
            PowerSource::Gas(engine) => engine.max_rpm,
            PowerSource::Electric(motor) => motor.rpm,
        }
    }

    /// Weight in pounds, when the record declares one
    pub fn weight_lb(&self) -> Option<f64> {
        match self {
            PowerSource::Gas(engine) => engine.weight_lb,
            PowerSource::Electric(motor) => motor.weight_lb,
        }
    }

    /// Whether this is a gas engine
    pub fn is_gas(&self) -> bool {
        matches!(self, PowerSource::Gas(_))
    }

    /// Whether this is an electric motor
    pub fn is_electric(&self) -> bool {
        matches!(self, PowerSource::Electric(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_accessors() {
        let mut engine = GasEngine::new("Predator 212", "predator-212", 212.0, 6.5, 0.75);
        engine.torque_ftlb = 8.1;
        engine.max_rpm = Some(3600.0);
        engine.weight_lb = Some(35.0);
        let gas = PowerSource::Gas(engine);

        assert!(gas.is_gas());
        assert_eq!(gas.horsepower(), 6.5);
        assert_eq!(gas.shaft_diameter_in(), Some(0.75));
        assert_eq!(gas.peak_rpm(), Some(3600.0));

        let motor = ElectricMotor::new("MY1020", "my1020", 48.0, 1.0, 1.3);
        let electric = PowerSource::Electric(motor);

        assert!(electric.is_electric());
        assert_eq!(electric.shaft_diameter_in(), None);
        assert_eq!(electric.weight_lb(), None);
    }

    #[test]
    fn test_tagged_serialization() {
        let motor = ElectricMotor::new("MY1020", "my1020", 48.0, 1.0, 1.3);
        let yaml = serde_yml::to_string(&PowerSource::Electric(motor)).unwrap();
        assert!(yaml.contains("type: electric"));

        let parsed: PowerSource = serde_yml::from_str(&yaml).unwrap();
        assert!(parsed.is_electric());
    }
}
