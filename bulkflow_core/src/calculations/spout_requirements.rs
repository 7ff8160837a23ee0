//! # Spout Requirements
//!
//! Smallest round and square discharge spouts that can pass a required
//! volumetric flow. Spout capacities are tabulated for 50 PCF material and
//! scaled linearly by `bulk_density / 50`.
//!
//! The tables are scanned in ascending size order and the first spout whose
//! scaled capacity meets the requirement is selected. When no tabulated spout
//! is large enough the result carries `None` for that shape; this is a normal
//! outcome, not an error.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::calculations::spout_requirements::{calculate, SpoutRequirementsInput};
//!
//! let input = SpoutRequirementsInput {
//!     bulk_density: 50.0,
//!     capacity_value: 25.0,
//!     capacity_unit: "lbs/hr".to_string(),
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.round_spout.unwrap().diameter, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::chart::{build_chart, AxisValue, ChartSpec, Series, SECONDARY_COLOR};
use crate::errors::CalcResult;
use crate::lookup::LookupTable;
use crate::validation::{ValidationReport, MAX_BULK_DENSITY_PCF};

/// Reference density the capacity tables were measured at
pub const REFERENCE_DENSITY_PCF: f64 = 50.0;

const LBS_PER_TON: f64 = 2000.0;

pub const TONS_PER_HOUR: &str = "tons/hr";
pub const LBS_PER_HOUR: &str = "lbs/hr";

/// One tabulated spout size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpoutBand {
    /// Open area in in²
    pub area_in2: f64,
    /// Capacity at 50 PCF, ft³/hr
    pub capacity_50_pcf: f64,
}

const fn band(area_in2: f64, capacity_50_pcf: f64) -> SpoutBand {
    SpoutBand {
        area_in2,
        capacity_50_pcf,
    }
}

/// Round spouts by diameter (in).
pub static ROUND_SPOUTS: LookupTable<u32, SpoutBand> = LookupTable::new(
    "round_spouts",
    &[
        (4, band(12.6, 504.0)),
        (5, band(19.6, 784.0)),
        (6, band(28.3, 1132.0)),
        (8, band(50.3, 2012.0)),
        (10, band(78.5, 3140.0)),
        (12, band(113.0, 4520.0)),
        (14, band(153.9, 6156.0)),
        (16, band(201.0, 8040.0)),
        (18, band(254.5, 10180.0)),
        (20, band(314.2, 12568.0)),
    ],
);

/// Square spouts by nominal size.
pub static SQUARE_SPOUTS: LookupTable<&str, SpoutBand> = LookupTable::new(
    "square_spouts",
    &[
        ("4x4", band(16.0, 640.0)),
        ("5x5", band(25.0, 1000.0)),
        ("6x6", band(36.0, 1440.0)),
        ("8x8", band(64.0, 2560.0)),
        ("10x10", band(100.0, 4000.0)),
        ("12x12", band(144.0, 5760.0)),
        ("14x14", band(196.0, 7840.0)),
        ("16x16", band(256.0, 10240.0)),
        ("18x18", band(324.0, 12960.0)),
        ("20x20", band(400.0, 16000.0)),
    ],
);

/// Input parameters for spout sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bulk_density": 45.0,
///   "capacity_value": 20.0,
///   "capacity_unit": "tons/hr"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoutRequirementsInput {
    /// Bulk density in lb/ft³
    pub bulk_density: f64,
    /// Required mass flow, in `capacity_unit`
    pub capacity_value: f64,
    /// `"tons/hr"` or `"lbs/hr"`
    pub capacity_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSpout {
    /// Diameter in inches
    pub diameter: u32,
    pub area: f64,
    /// Density-adjusted capacity, ft³/hr
    pub max_cfh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareSpout {
    /// Nominal size, e.g. `"8x8"`
    pub size: String,
    pub area: f64,
    /// Density-adjusted capacity, ft³/hr
    pub max_cfh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoutRequirementsResult {
    /// Required volumetric flow, ft³/hr
    pub required_cfh: f64,
    pub density_factor: f64,
    /// Smallest adequate round spout, if any
    pub round_spout: Option<RoundSpout>,
    /// Smallest adequate square spout, if any
    pub square_spout: Option<SquareSpout>,
}

impl SpoutRequirementsResult {
    /// Neither shape has a large enough tabulated size
    pub fn no_suitable_spout(&self) -> bool {
        self.round_spout.is_none() && self.square_spout.is_none()
    }
}

pub fn validate(input: &SpoutRequirementsInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Bulk density", input.bulk_density, MAX_BULK_DENSITY_PCF)
        .positive("Capacity value", input.capacity_value)
        .one_of(
            "Capacity unit",
            &input.capacity_unit.as_str(),
            &[TONS_PER_HOUR, LBS_PER_HOUR],
        );
    report
}

pub fn calculate(input: &SpoutRequirementsInput) -> CalcResult<SpoutRequirementsResult> {
    evaluate::<SpoutRequirements>(input)
}

/// Required ft³/hr for a mass flow in `unit`
pub fn required_cfh(capacity_value: f64, unit: &str, bulk_density: f64) -> f64 {
    let lbs_per_hour = if unit == TONS_PER_HOUR {
        capacity_value * LBS_PER_TON
    } else {
        capacity_value
    };
    lbs_per_hour / bulk_density
}

fn compute(input: &SpoutRequirementsInput) -> SpoutRequirementsResult {
    let required = required_cfh(input.capacity_value, &input.capacity_unit, input.bulk_density);
    let density_factor = input.bulk_density / REFERENCE_DENSITY_PCF;
    let fits = |band: &SpoutBand| band.capacity_50_pcf * density_factor >= required;

    let round_spout = ROUND_SPOUTS
        .first_where(|_, band| fits(band))
        .map(|(diameter, band)| RoundSpout {
            diameter: *diameter,
            area: band.area_in2,
            max_cfh: band.capacity_50_pcf * density_factor,
        });

    let square_spout = SQUARE_SPOUTS
        .first_where(|_, band| fits(band))
        .map(|(size, band)| SquareSpout {
            size: size.to_string(),
            area: band.area_in2,
            max_cfh: band.capacity_50_pcf * density_factor,
        });

    if round_spout.is_none() && square_spout.is_none() {
        log::debug!("no tabulated spout passes {:.1} ft³/hr", required);
    }

    SpoutRequirementsResult {
        required_cfh: required,
        density_factor,
        round_spout,
        square_spout,
    }
}

fn chart(output: &SpoutRequirementsResult) -> CalcResult<ChartSpec> {
    let round_labels: Vec<AxisValue> = ROUND_SPOUTS
        .keys()
        .map(|diameter| AxisValue::from(format!("{}\" Dia", diameter)))
        .collect();
    let square_labels: Vec<AxisValue> = SQUARE_SPOUTS.keys().map(|size| AxisValue::from(*size)).collect();

    let scaled = |band: &SpoutBand| band.capacity_50_pcf * output.density_factor;
    let round = Series::bar(
        "Round Spout",
        round_labels.clone(),
        ROUND_SPOUTS.entries().iter().map(|(_, b)| scaled(b)).collect(),
    );
    let square = Series::bar(
        "Square Spout",
        square_labels.clone(),
        SQUARE_SPOUTS.entries().iter().map(|(_, b)| scaled(b)).collect(),
    )
    .with_color(SECONDARY_COLOR);

    let all_labels = round_labels.into_iter().chain(square_labels).collect();
    let required = Series::reference_line("Required Capacity", all_labels, output.required_cfh);

    build_chart(SpoutRequirements::ID, vec![round, square, required], None)
}

fn recommendations(input: &SpoutRequirementsInput, output: &SpoutRequirementsResult) -> Vec<String> {
    let mut notes = Vec::new();

    match (&output.round_spout, &output.square_spout) {
        (None, None) => {
            notes.push("No suitable spout found. Consider reducing flow rate or using custom sizing.")
        }
        (Some(round), Some(square)) if round.area < square.area => {
            notes.push("Round spout provides more compact solution.")
        }
        (Some(_), Some(_)) => notes.push("Square spout may provide better flow characteristics."),
        _ => {}
    }

    if let Some(round) = &output.round_spout {
        let utilization = output.required_cfh / round.max_cfh * 100.0;
        if utilization > 80.0 {
            notes.push("High capacity utilization. Consider next size up for safety margin.");
        }
    }

    if input.bulk_density > 75.0 {
        notes.push("High density material. Consider reinforced spout construction.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct SpoutRequirements;

impl Calculation for SpoutRequirements {
    type Input = SpoutRequirementsInput;
    type Output = SpoutRequirementsResult;

    const ID: &'static str = "spout_requirements";
    const NAME: &'static str = "Spout Requirements Calculator";
    const CATEGORY: &'static str = "Material Handling";
    const DESCRIPTION: &'static str = "Determine optimal spout sizing for material discharge applications";
    const FORMULA: &'static str = "CFH = lb/hr ÷ density; first spout with capacity@50PCF × (density ÷ 50) ≥ CFH";

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        Ok(compute(input))
    }

    fn chart(_input: &Self::Input, output: &Self::Output) -> CalcResult<Option<ChartSpec>> {
        chart(output).map(Some)
    }

    fn recommendations(input: &Self::Input, output: &Self::Output) -> Vec<String> {
        recommendations(input, output)
    }
}
