//! # Unit Conversion
//!
//! Metric ↔ imperial conversion for the physical quantities that appear in
//! bulk material handling. Every linear conversion is a single factor from a
//! fixed table: `to_metric` multiplies by it, `to_imperial` divides.
//!
//! | Kind | Factor |
//! |------|--------|
//! | Length | 1 in = 25.4 mm |
//! | Mass | 1 lb = 0.453592 kg |
//! | Force | 1 lbf = 4.44822 N |
//! | Volume | 1 ft³ = 0.0283168 m³ |
//! | Bulk density | 1 lb/ft³ = 16.0185 kg/m³ |
//! | Pressure | 1 psi = 6894.76 Pa |
//! | Power | 1 hp = 0.746 kW |
//! | Area | 1 ft² = 0.092903 m² |
//!
//! Rates convert with the factor of their numerator (ft³/hr ↔ m³/hr uses the
//! volume factor, lb/hr ↔ kg/hr the mass factor).
//!
//! Temperature is affine, so it has no entry in the factor table and
//! [`convert`] rejects it with [`CalcError::UnknownQuantityKind`]. Use
//! [`fahrenheit_to_celsius`] / [`celsius_to_fahrenheit`] or
//! [`Measurement::in_system`], which handles it.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::units::{convert, ConversionDirection, QuantityKind};
//!
//! let kg_per_m3 = convert(50.0, QuantityKind::BulkDensity, ConversionDirection::ToMetric).unwrap();
//! assert!((kg_per_m3 - 800.925).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::lookup::LookupTable;

/// Millimetres per inch
pub const MM_PER_IN: f64 = 25.4;
/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Newtons per pound-force
pub const N_PER_LBF: f64 = 4.44822;
/// Cubic metres per cubic foot
pub const M3_PER_FT3: f64 = 0.0283168;
/// kg/m³ per lb/ft³
pub const KG_M3_PER_LB_FT3: f64 = 16.0185;
/// Pascals per psi
pub const PA_PER_PSI: f64 = 6894.76;
/// Kilowatts per horsepower
pub const KW_PER_HP: f64 = 0.746;
/// Square metres per square foot
pub const M2_PER_FT2: f64 = 0.092903;

/// Which unit system a caller works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Map a request's `use_imperial` flag to a unit system
    pub fn from_imperial_flag(use_imperial: bool) -> Self {
        if use_imperial {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }

    pub fn is_imperial(self) -> bool {
        self == UnitSystem::Imperial
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{}'", other)),
        }
    }
}

/// Physical quantity a scalar value represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Length,
    Mass,
    Force,
    Volume,
    BulkDensity,
    Pressure,
    Power,
    Area,
    Temperature,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 9] = [
        QuantityKind::Length,
        QuantityKind::Mass,
        QuantityKind::Force,
        QuantityKind::Volume,
        QuantityKind::BulkDensity,
        QuantityKind::Pressure,
        QuantityKind::Power,
        QuantityKind::Area,
        QuantityKind::Temperature,
    ];

    /// Snake-case name used in JSON and on the command line
    pub fn name(self) -> &'static str {
        match self {
            QuantityKind::Length => "length",
            QuantityKind::Mass => "mass",
            QuantityKind::Force => "force",
            QuantityKind::Volume => "volume",
            QuantityKind::BulkDensity => "bulk_density",
            QuantityKind::Pressure => "pressure",
            QuantityKind::Power => "power",
            QuantityKind::Area => "area",
            QuantityKind::Temperature => "temperature",
        }
    }

    /// Unit symbol for this quantity in the given system
    pub fn unit_label(self, system: UnitSystem) -> &'static str {
        match (self, system) {
            (QuantityKind::Length, UnitSystem::Imperial) => "in",
            (QuantityKind::Length, UnitSystem::Metric) => "mm",
            (QuantityKind::Mass, UnitSystem::Imperial) => "lb",
            (QuantityKind::Mass, UnitSystem::Metric) => "kg",
            (QuantityKind::Force, UnitSystem::Imperial) => "lbf",
            (QuantityKind::Force, UnitSystem::Metric) => "N",
            (QuantityKind::Volume, UnitSystem::Imperial) => "ft³",
            (QuantityKind::Volume, UnitSystem::Metric) => "m³",
            (QuantityKind::BulkDensity, UnitSystem::Imperial) => "lb/ft³",
            (QuantityKind::BulkDensity, UnitSystem::Metric) => "kg/m³",
            (QuantityKind::Pressure, UnitSystem::Imperial) => "psi",
            (QuantityKind::Pressure, UnitSystem::Metric) => "Pa",
            (QuantityKind::Power, UnitSystem::Imperial) => "hp",
            (QuantityKind::Power, UnitSystem::Metric) => "kW",
            (QuantityKind::Area, UnitSystem::Imperial) => "ft²",
            (QuantityKind::Area, UnitSystem::Metric) => "m²",
            (QuantityKind::Temperature, UnitSystem::Imperial) => "°F",
            (QuantityKind::Temperature, UnitSystem::Metric) => "°C",
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuantityKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        QuantityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| CalcError::unknown_quantity_kind(s))
    }
}

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    ToMetric,
    ToImperial,
}

impl ConversionDirection {
    /// Direction that lands in `target`
    pub fn towards(target: UnitSystem) -> Self {
        match target {
            UnitSystem::Metric => ConversionDirection::ToMetric,
            UnitSystem::Imperial => ConversionDirection::ToImperial,
        }
    }
}

/// Imperial → metric factors. Temperature is intentionally absent.
static CONVERSION_FACTORS: LookupTable<QuantityKind, f64> = LookupTable::new(
    "conversion_factors",
    &[
        (QuantityKind::Length, MM_PER_IN),
        (QuantityKind::Mass, KG_PER_LB),
        (QuantityKind::Force, N_PER_LBF),
        (QuantityKind::Volume, M3_PER_FT3),
        (QuantityKind::BulkDensity, KG_M3_PER_LB_FT3),
        (QuantityKind::Pressure, PA_PER_PSI),
        (QuantityKind::Power, KW_PER_HP),
        (QuantityKind::Area, M2_PER_FT2),
    ],
);

/// Imperial → metric multiplier for `kind`.
pub fn conversion_factor(kind: QuantityKind) -> CalcResult<f64> {
    CONVERSION_FACTORS
        .lookup_exact(&kind)
        .copied()
        .map_err(|_| CalcError::unknown_quantity_kind(kind.name()))
}

/// Convert `value` of the given quantity in `direction`.
pub fn convert(value: f64, kind: QuantityKind, direction: ConversionDirection) -> CalcResult<f64> {
    let factor = conversion_factor(kind)?;
    Ok(match direction {
        ConversionDirection::ToMetric => value * factor,
        ConversionDirection::ToImperial => value / factor,
    })
}

/// Shorthand for `convert(value, kind, ToMetric)`
pub fn to_metric(value: f64, kind: QuantityKind) -> CalcResult<f64> {
    convert(value, kind, ConversionDirection::ToMetric)
}

/// Shorthand for `convert(value, kind, ToImperial)`
pub fn to_imperial(value: f64, kind: QuantityKind) -> CalcResult<f64> {
    convert(value, kind, ConversionDirection::ToImperial)
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// A scalar value tagged with its unit system and quantity kind.
///
/// The number is only meaningful together with both tags, so conversions go
/// through [`Measurement::in_system`] rather than touching `value` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub system: UnitSystem,
    pub kind: QuantityKind,
}

impl Measurement {
    pub fn new(value: f64, system: UnitSystem, kind: QuantityKind) -> Self {
        Measurement { value, system, kind }
    }

    pub fn metric(value: f64, kind: QuantityKind) -> Self {
        Measurement::new(value, UnitSystem::Metric, kind)
    }

    pub fn imperial(value: f64, kind: QuantityKind) -> Self {
        Measurement::new(value, UnitSystem::Imperial, kind)
    }

    /// The same physical quantity expressed in `target`.
    pub fn in_system(self, target: UnitSystem) -> CalcResult<Measurement> {
        if self.system == target {
            return Ok(self);
        }
        let value = match self.kind {
            QuantityKind::Temperature => match target {
                UnitSystem::Metric => fahrenheit_to_celsius(self.value),
                UnitSystem::Imperial => celsius_to_fahrenheit(self.value),
            },
            kind => convert(self.value, kind, ConversionDirection::towards(target))?,
        };
        Ok(Measurement::new(value, target, self.kind))
    }

    /// Unit symbol for this measurement
    pub fn unit_label(&self) -> &'static str {
        self.kind.unit_label(self.system)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit_label())
    }
}
