//! Part record - a catalog part with a loosely-typed specification map
//!
//! Parts are heterogeneous: a clutch declares a bore diameter, a sprocket
//! declares tooth counts, a battery declares voltage. Rather than one
//! struct per category, each part carries a `specifications` map with
//! well-known keys and a schema-checked accessor that degrades safely
//! when a key is absent or has the wrong type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::Record;
use crate::core::identity::{EntityId, EntityPrefix};

/// Part categories - the fixed classification used for selection and
/// rule targeting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    // Drive train
    Clutch,
    TorqueConverter,
    Chain,
    Sprocket,
    // Chassis
    Axle,
    Wheel,
    Tire,
    Brake,
    Throttle,
    Pedals,
    Frame,
    // Engine performance
    Carburetor,
    Exhaust,
    AirFilter,
    Camshaft,
    ValveSpring,
    Flywheel,
    Ignition,
    ConnectingRod,
    Piston,
    Crankshaft,
    OilSystem,
    Header,
    FuelSystem,
    Gasket,
    Hardware,
    // EV system
    Battery,
    MotorController,
    Bms,
    Charger,
    ThrottleController,
    VoltageConverter,
    BatteryMount,
    WiringHarness,
    FuseKillSwitch,
    Other,
}

impl PartCategory {
    /// All categories, in display order
    pub fn all() -> &'static [PartCategory] {
        use PartCategory::*;
        &[
            Clutch,
            TorqueConverter,
            Chain,
            Sprocket,
            Axle,
            Wheel,
            Tire,
            Brake,
            Throttle,
            Pedals,
            Frame,
            Carburetor,
            Exhaust,
            AirFilter,
            Camshaft,
            ValveSpring,
            Flywheel,
            Ignition,
            ConnectingRod,
            Piston,
            Crankshaft,
            OilSystem,
            Header,
            FuelSystem,
            Gasket,
            Hardware,
            Battery,
            MotorController,
            Bms,
            Charger,
            ThrottleController,
            VoltageConverter,
            BatteryMount,
            WiringHarness,
            FuseKillSwitch,
            Other,
        ]
    }

    /// Categories that only make sense on an electric build
    pub fn is_electric_only(&self) -> bool {
        use PartCategory::*;
        matches!(
            self,
            Battery
                | MotorController
                | Bms
                | Charger
                | ThrottleController
                | VoltageConverter
                | BatteryMount
                | WiringHarness
                | FuseKillSwitch
        )
    }

    /// Categories that only make sense on a gas build
    pub fn is_gas_only(&self) -> bool {
        use PartCategory::*;
        matches!(
            self,
            Carburetor
                | Exhaust
                | AirFilter
                | Camshaft
                | ValveSpring
                | Flywheel
                | Ignition
                | ConnectingRod
                | Piston
                | Crankshaft
                | OilSystem
                | Header
                | FuelSystem
        )
    }

    /// Human-readable label, e.g. "Torque Converter"
    pub fn label(&self) -> &'static str {
        use PartCategory::*;
        match self {
            Clutch => "Clutch",
            TorqueConverter => "Torque Converter",
            Chain => "Chain",
            Sprocket => "Sprocket",
            Axle => "Axle",
            Wheel => "Wheel",
            Tire => "Tire",
            Brake => "Brake",
            Throttle => "Throttle",
            Pedals => "Pedals",
            Frame => "Frame",
            Carburetor => "Carburetor",
            Exhaust => "Exhaust",
            AirFilter => "Air Filter",
            Camshaft => "Camshaft",
            ValveSpring => "Valve Spring",
            Flywheel => "Flywheel",
            Ignition => "Ignition",
            ConnectingRod => "Connecting Rod",
            Piston => "Piston",
            Crankshaft => "Crankshaft",
            OilSystem => "Oil System",
            Header => "Header",
            FuelSystem => "Fuel System",
            Gasket => "Gasket",
            Hardware => "Hardware",
            Battery => "Battery",
            MotorController => "Motor Controller",
            Bms => "BMS",
            Charger => "Charger",
            ThrottleController => "Throttle Controller",
            VoltageConverter => "Voltage Converter",
            BatteryMount => "Battery Mount",
            WiringHarness => "Wiring Harness",
            FuseKillSwitch => "Fuse / Kill Switch",
            Other => "Other",
        }
    }
}

impl std::fmt::Display for PartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // snake_case, matching the serde representation
        let s = serde_yml::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", s.trim())
    }
}

impl std::str::FromStr for PartCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_yml::from_str(s).map_err(|_| format!("unknown part category: {}", s))
    }
}

/// A single specification value - numeric, text, boolean, or a string list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl SpecValue {
    /// Numeric view of this value; non-numeric values yield None
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Text view of this value; non-text values yield None
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SpecValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List view of this value; non-list values yield None
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SpecValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Key aliases accepted by the specification accessors.
///
/// Catalogs accumulate naming drift (ingestion keys vs. hand-edited
/// files); the canonical key is tried first, then each alias in order.
const SPEC_ALIASES: &[(&str, &[&str])] = &[
    ("bore_diameter_in", &["bore_in", "bore_diameter"]),
    ("pitch", &["chain_size"]),
    ("hp_gain", &["hp_contribution"]),
    ("torque_gain", &["torque_contribution"]),
    ("weight_lb", &["weight_lbs"]),
    ("drive_teeth", &["sprocket_teeth", "teeth"]),
    ("driven_teeth", &["teeth", "teeth_count"]),
    ("diameter_in", &["tire_diameter_in", "diameter"]),
    ("axle_diameter_in", &["axle_diameter"]),
    ("wheel_diameter_in", &["wheel_diameter"]),
];

/// Part record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Unique identifier (PART-...)
    pub id: EntityId,

    /// URL-safe slug, unique within the catalog
    pub slug: String,

    /// Display name
    pub name: String,

    /// Part category
    pub category: PartCategory,

    /// Manufacturer/brand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Loosely-typed attribute map (bore_diameter_in, drive_teeth, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specifications: BTreeMap<String, SpecValue>,

    /// Price in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Additional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Classification tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Part {
    /// Create a new part with required fields
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        category: PartCategory,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Part),
            slug: slug.into(),
            name: name.into(),
            category,
            brand: None,
            specifications: BTreeMap::new(),
            price: None,
            notes: None,
            tags: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Look up a raw specification value, resolving key aliases
    fn spec(&self, key: &str) -> Option<&SpecValue> {
        if let Some(value) = self.specifications.get(key) {
            return Some(value);
        }
        for (canonical, aliases) in SPEC_ALIASES {
            if *canonical == key {
                for alias in *aliases {
                    if let Some(value) = self.specifications.get(*alias) {
                        return Some(value);
                    }
                }
            }
        }
        None
    }

    /// Numeric specification lookup; absent or non-numeric keys yield None
    pub fn numeric_spec(&self, key: &str) -> Option<f64> {
        self.spec(key).and_then(SpecValue::as_number)
    }

    /// Text specification lookup
    pub fn text_spec(&self, key: &str) -> Option<&str> {
        self.spec(key).and_then(SpecValue::as_text)
    }

    /// List specification lookup
    pub fn list_spec(&self, key: &str) -> Option<&[String]> {
        self.spec(key).and_then(SpecValue::as_list)
    }

    /// Builder-style helper for tests and ingestion
    pub fn with_spec(mut self, key: impl Into<String>, value: SpecValue) -> Self {
        self.specifications.insert(key.into(), value);
        self
    }
}

impl Record for Part {
    const PREFIX: &'static str = "PART";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn name(&self) -> &str {
        &self.name
    }
}
