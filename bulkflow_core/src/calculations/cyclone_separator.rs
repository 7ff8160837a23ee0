//! # Cyclone Separator
//!
//! Cut size, pressure drop and collection efficiency of a standard
//! tangential-inlet cyclone.
//!
//! ## Method
//!
//! - Inlet area 0.1 D (0.2 × 0.5 of the diameter); effective turns
//!   N = 1.5 + 2 (D − 0.5)
//! - Tangential velocity is 80% of inlet velocity
//! - Barth cut size: d50 = √(18 μ Q ÷ (2π N vt (ρp − ρg) D))
//! - Lapple efficiency: η = (d50/d)² ÷ (1 + (d50/d)²)
//! - Shepherd–Lapple pressure drop with K = 6
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::calculations::cyclone_separator::lapple_efficiency;
//!
//! // A particle at the cut size is collected half the time
//! assert!((lapple_efficiency(5.0, 5.0) - 0.5).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::ValidationReport;

const LOSS_COEFFICIENT: f64 = 6.0;
const MICRONS_PER_METER: f64 = 1e6;

fn default_gas_density() -> f64 {
    1.2
}

fn default_gas_viscosity() -> f64 {
    1.8e-5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycloneSeparatorInput {
    /// m/s
    pub inlet_velocity: f64,
    /// m
    pub cyclone_diameter: f64,
    /// g/cm³
    pub particle_density: f64,
    /// kg/m³
    #[serde(default = "default_gas_density")]
    pub gas_density: f64,
    /// Pa·s
    #[serde(default = "default_gas_viscosity")]
    pub gas_viscosity: f64,
    /// Particle size of interest, µm
    pub cut_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycloneSeparatorResult {
    /// µm
    pub cut_size_d50: f64,
    /// Pa
    pub pressure_drop: f64,
    pub collection_efficiency: f64,
    /// kg/hr of gas
    pub throughput: f64,
}

pub fn validate(input: &CycloneSeparatorInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Inlet velocity", input.inlet_velocity, 50.0)
        .positive_up_to("Cyclone diameter", input.cyclone_diameter, 5.0)
        .positive_up_to("Particle density", input.particle_density, 10.0)
        .positive_up_to("Gas density", input.gas_density, 10.0)
        .positive("Gas viscosity", input.gas_viscosity)
        .positive_up_to("Cut size", input.cut_size, 100.0);

    if input.particle_density > 0.0 {
        report.require(
            input.particle_density * 1000.0 > input.gas_density,
            "Particle density must exceed gas density",
        );
    }
    report
}

pub fn calculate(input: &CycloneSeparatorInput) -> CalcResult<CycloneSeparatorResult> {
    evaluate::<CycloneSeparator>(input)
}

/// Fraction of particles of `particle_size` collected by a cyclone with cut
/// size `d50` (both µm). Falls back to 0.5 when `particle_size` is not positive.
pub fn lapple_efficiency(d50: f64, particle_size: f64) -> f64 {
    if particle_size <= 0.0 {
        return 0.5;
    }
    let ratio = (d50 / particle_size).powi(2);
    ratio / (1.0 + ratio)
}

fn compute(input: &CycloneSeparatorInput) -> CycloneSeparatorResult {
    let diameter = input.cyclone_diameter;
    let inlet_area = diameter * 0.2 * 0.5;
    let volumetric_flow_rate = input.inlet_velocity * inlet_area;

    let effective_turns = 1.5 + (diameter - 0.5) * 2.0;
    let tangential_velocity = input.inlet_velocity * 0.8;

    let numerator = 18.0 * input.gas_viscosity * volumetric_flow_rate;
    let denominator = 2.0
        * PI
        * effective_turns
        * tangential_velocity
        * (input.particle_density * 1000.0 - input.gas_density)
        * diameter;
    let cut_size_d50 = (numerator / denominator).sqrt() * MICRONS_PER_METER;

    CycloneSeparatorResult {
        cut_size_d50,
        pressure_drop: LOSS_COEFFICIENT * input.gas_density * input.inlet_velocity.powi(2) / 2.0,
        collection_efficiency: lapple_efficiency(cut_size_d50, input.cut_size),
        throughput: volumetric_flow_rate * input.gas_density * 3600.0,
    }
}

fn chart(input: &CycloneSeparatorInput, output: &CycloneSeparatorResult) -> CalcResult<ChartSpec> {
    let sizes: Vec<f64> = sweep(1, 100, 5).collect();
    let efficiencies = sizes
        .iter()
        .map(|size| lapple_efficiency(output.cut_size_d50, *size) * 100.0)
        .collect();

    let curve = Series::line(
        "Collection Efficiency",
        sizes.into_iter().map(Into::into).collect(),
        efficiencies,
    );
    let cut = HighlightPoint::new("Cut Size (50% efficiency)", input.cut_size, 50.0);
    build_chart(CycloneSeparator::ID, vec![curve], Some(cut))
}

fn recommendations(input: &CycloneSeparatorInput, output: &CycloneSeparatorResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.cut_size_d50 > 20.0 {
        notes.push("Large cut size. Consider smaller diameter cyclone for finer separation.");
    } else if output.cut_size_d50 < 2.0 {
        notes.push("Very fine cut size achieved. Verify this meets separation requirements.");
    }

    if output.pressure_drop > 2500.0 {
        notes.push("High pressure drop increases fan power requirements.");
    } else if output.pressure_drop < 500.0 {
        notes.push("Low pressure drop may indicate poor separation performance.");
    }

    if input.inlet_velocity < 10.0 {
        notes.push("Low inlet velocity reduces separation efficiency.");
    } else if input.inlet_velocity > 30.0 {
        notes.push("High inlet velocity increases pressure drop and erosion.");
    }

    if input.cyclone_diameter < 0.3 {
        notes.push("Small cyclone diameter provides fine separation but low capacity.");
    } else if input.cyclone_diameter > 3.0 {
        notes.push("Large cyclone diameter increases cut size but handles high flow rates.");
    }

    if output.collection_efficiency < 0.7 {
        notes.push("Low collection efficiency. Consider multiple cyclones in series or parallel.");
    }

    if input.particle_density < 2.0 {
        notes.push("Low particle density makes separation more difficult.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct CycloneSeparator;

impl Calculation for CycloneSeparator {
    type Input = CycloneSeparatorInput;
    type Output = CycloneSeparatorResult;

    const ID: &'static str = "cyclone_separator";
    const NAME: &'static str = "Cyclone Separator Calculator";
    const CATEGORY: &'static str = "Separation Systems";
    const DESCRIPTION: &'static str = "Calculate cut size, pressure drop, and collection efficiency";
    const FORMULA: &'static str = "d50 = √(18μQ ÷ (2πN vt (ρp − ρg) D)); η = (d50/d)² ÷ (1 + (d50/d)²); ΔP = 6 ρg v²/2";

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        Ok(compute(input))
    }

    fn chart(input: &Self::Input, output: &Self::Output) -> CalcResult<Option<ChartSpec>> {
        chart(input, output).map(Some)
    }

    fn recommendations(input: &Self::Input, output: &Self::Output) -> Vec<String> {
        recommendations(input, output)
    }
}
