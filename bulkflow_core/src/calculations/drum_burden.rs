//! # Magnetic Drum Burden
//!
//! Holding force of a magnetic drum and the depth of material (the burden)
//! it must reach through, from the drum's magnet type, working width, surface
//! speed and the material throughput.
//!
//! ## Method
//!
//! - Surface field B (T) = gauss ÷ 10000, gauss from the magnet type table
//! - Pole area (m²) = effective width (m) × 0.05 m
//! - Force (N) = B² × area ÷ (2 μ₀)
//! - Burden depth (in) = ft³/hr × 1728 ÷ (effective width (in) × drum speed (FPM) × 720)
//! - Burden depth is then scaled by `1 + force / 10000`
//!
//! Inputs are in mm, m/min, kg/hr and kg/m³ (metric) or in, FPM, lb/hr and
//! lb/ft³ (imperial). The formula runs in imperial units; outputs are
//! returned in the caller's system.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::chart::{build_chart, AxisValue, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::lookup::LookupTable;
use crate::units::{self, Measurement, QuantityKind, UnitSystem};
use crate::validation::ValidationReport;

/// Surface field strength (gauss) by magnet type.
pub static MAGNET_FIELD_STRENGTHS: LookupTable<&str, f64> = LookupTable::new(
    "magnet_field_strengths",
    &[("ceramic", 1500.0), ("electromagnet", 2500.0), ("rare_earth", 3500.0)],
);

/// Permeability of free space, H/m
pub const MU_0: f64 = 4.0 * PI * 1e-7;

const GAUSS_PER_TESLA: f64 = 10_000.0;
/// Pole face height used for the holding area, m
const POLE_HEIGHT_M: f64 = 0.05;
const METERS_PER_FOOT: f64 = 0.3048;
const BURDEN_FORCE_SCALE: f64 = 10_000.0;

/// Input parameters for a magnetic drum.
///
/// ## JSON Example
///
/// ```json
/// {
///   "magnet_type": "rare_earth",
///   "overall_width": 900.0,
///   "effective_width": 800.0,
///   "drum_speed": 40.0,
///   "throughput": 12000.0,
///   "bulk_density": 1200.0,
///   "use_imperial": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumBurdenInput {
    /// `ceramic`, `electromagnet` or `rare_earth`
    pub magnet_type: String,
    /// Drum face width, mm or in
    pub overall_width: f64,
    /// Magnetized width, mm or in; at most `overall_width`
    pub effective_width: f64,
    /// Surface speed, m/min or FPM
    pub drum_speed: f64,
    /// Material feed, kg/hr or lb/hr
    pub throughput: f64,
    /// kg/m³ or lb/ft³
    pub bulk_density: f64,
    #[serde(default)]
    pub use_imperial: bool,
}

impl DrumBurdenInput {
    pub fn unit_system(&self) -> UnitSystem {
        UnitSystem::from_imperial_flag(self.use_imperial)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumBurdenResult {
    pub field_strength_gauss: f64,
    /// N or lbf
    pub magnetic_force: f64,
    /// mm or in
    pub depth_of_burden: f64,
    /// m³/hr or ft³/hr
    pub volumetric_flow: f64,
    /// effective ÷ overall width
    pub width_utilization: f64,
    pub force_unit: String,
    pub depth_unit: String,
    pub flow_unit: String,
}

pub fn validate(input: &DrumBurdenInput) -> ValidationReport {
    let magnets: Vec<&str> = MAGNET_FIELD_STRENGTHS.keys().copied().collect();

    let mut report = ValidationReport::new();
    report
        .one_of("Magnet type", &input.magnet_type.as_str(), &magnets)
        .positive("Overall width", input.overall_width)
        .positive("Effective width", input.effective_width)
        .require(
            !(input.effective_width > input.overall_width),
            "Effective width cannot exceed overall width",
        )
        .positive("Drum speed", input.drum_speed)
        .positive("Throughput", input.throughput)
        .bulk_density(input.bulk_density, input.unit_system());
    report
}

pub fn calculate(input: &DrumBurdenInput) -> CalcResult<DrumBurdenResult> {
    evaluate::<DrumBurden>(input)
}

/// Holding force (N) of a drum face `effective_width_in` wide at `gauss`.
pub fn holding_force_n(gauss: f64, effective_width_in: f64) -> f64 {
    let tesla = gauss / GAUSS_PER_TESLA;
    let width_m = effective_width_in * units::MM_PER_IN / 1000.0;
    let pole_area = width_m * POLE_HEIGHT_M;
    tesla.powi(2) * pole_area / (2.0 * MU_0)
}

fn in_imperial(value: f64, system: UnitSystem, kind: QuantityKind) -> CalcResult<f64> {
    Ok(Measurement::new(value, system, kind)
        .in_system(UnitSystem::Imperial)?
        .value)
}

fn force_in(system: UnitSystem, newtons: f64) -> CalcResult<f64> {
    match system {
        UnitSystem::Metric => Ok(newtons),
        UnitSystem::Imperial => units::to_imperial(newtons, QuantityKind::Force),
    }
}

fn compute(input: &DrumBurdenInput) -> CalcResult<DrumBurdenResult> {
    let system = input.unit_system();
    let gauss = *MAGNET_FIELD_STRENGTHS.lookup_exact(input.magnet_type.as_str())?;

    let width_in = in_imperial(input.effective_width, system, QuantityKind::Length)?;
    let lb_hr = in_imperial(input.throughput, system, QuantityKind::Mass)?;
    let density_pcf = in_imperial(input.bulk_density, system, QuantityKind::BulkDensity)?;
    let speed_fpm = match system {
        UnitSystem::Imperial => input.drum_speed,
        UnitSystem::Metric => input.drum_speed / METERS_PER_FOOT,
    };

    let force_n = holding_force_n(gauss, width_in);
    let ft3_hr = lb_hr / density_pcf;
    let mut depth_in = ft3_hr * 1728.0 / (width_in * speed_fpm * 720.0);
    depth_in *= 1.0 + force_n / BURDEN_FORCE_SCALE;

    let (magnetic_force, depth_of_burden, volumetric_flow) = match system {
        UnitSystem::Imperial => (force_in(system, force_n)?, depth_in, ft3_hr),
        UnitSystem::Metric => (
            force_n,
            units::to_metric(depth_in, QuantityKind::Length)?,
            units::to_metric(ft3_hr, QuantityKind::Volume)?,
        ),
    };

    Ok(DrumBurdenResult {
        field_strength_gauss: gauss,
        magnetic_force,
        depth_of_burden,
        volumetric_flow,
        width_utilization: input.effective_width / input.overall_width,
        force_unit: QuantityKind::Force.unit_label(system).to_string(),
        depth_unit: QuantityKind::Length.unit_label(system).to_string(),
        flow_unit: format!("{}/hr", QuantityKind::Volume.unit_label(system)),
    })
}

fn chart(input: &DrumBurdenInput, output: &DrumBurdenResult) -> CalcResult<ChartSpec> {
    let system = input.unit_system();
    let width_in = in_imperial(input.effective_width, system, QuantityKind::Length)?;

    let mut x: Vec<AxisValue> = Vec::with_capacity(MAGNET_FIELD_STRENGTHS.len());
    let mut y = Vec::with_capacity(MAGNET_FIELD_STRENGTHS.len());
    for (magnet, gauss) in MAGNET_FIELD_STRENGTHS.entries() {
        x.push((*magnet).into());
        y.push(force_in(system, holding_force_n(*gauss, width_in))?);
    }

    let bars = Series::bar("Magnetic Force", x, y);
    let selected = HighlightPoint::selected(input.magnet_type.as_str(), output.magnetic_force);
    Ok(build_chart(DrumBurden::ID, vec![bars], Some(selected))?
        .with_y_axis_title(format!("Magnetic Force ({})", output.force_unit)))
}

fn recommendations(input: &DrumBurdenInput, output: &DrumBurdenResult) -> Vec<String> {
    let mut notes = Vec::new();
    let depth_in = match input.unit_system() {
        UnitSystem::Imperial => output.depth_of_burden,
        UnitSystem::Metric => output.depth_of_burden / units::MM_PER_IN,
    };

    if depth_in > 1.0 {
        notes.push("Deep burden limits pull on buried tramp metal. Consider higher drum speed or a wider drum.");
    } else if depth_in < 0.05 {
        notes.push("Very thin burden. Drum may be oversized for this throughput.");
    }

    if output.width_utilization < 0.8 {
        notes.push("Large unused drum width. Consider a feeder that spreads material across the full face.");
    }

    if input.magnet_type == "ceramic" && depth_in > 0.5 {
        notes.push("Ceramic magnets lose reach in deep burdens. Consider rare earth magnets for fine ferrous contamination.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct DrumBurden;

impl Calculation for DrumBurden {
    type Input = DrumBurdenInput;
    type Output = DrumBurdenResult;

    const ID: &'static str = "drum_burden";
    const NAME: &'static str = "Magnetic Drum Burden Calculator";
    const CATEGORY: &'static str = "Magnetic Systems";
    const DESCRIPTION: &'static str =
        "Calculate magnetic holding force and depth of burden for magnetic drum separators";
    const FORMULA: &'static str = "F = B² × A ÷ 2μ₀; depth = ft³/hr × 1728 ÷ (width × FPM × 720) × (1 + F ÷ 10000)";
    const UNIT_AWARE: bool = true;

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        compute(input)
    }

    fn chart(input: &Self::Input, output: &Self::Output) -> CalcResult<Option<ChartSpec>> {
        chart(input, output).map(Some)
    }

    fn recommendations(input: &Self::Input, output: &Self::Output) -> Vec<String> {
        recommendations(input, output)
    }
}
