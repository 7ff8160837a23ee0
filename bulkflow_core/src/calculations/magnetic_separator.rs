//! # Magnetic Separator
//!
//! Separation efficiency, magnetic force, throughput and recovery for an
//! overhead or cross-belt magnetic separator.
//!
//! Simplified model: force falls with the square of the distance through
//! the bed plus a 2 in air gap; efficiency saturates at 10 mm particles and
//! 1000 gauss, with a 95% ceiling; belt speed above 100 FPM reduces recovery
//! down to a floor of half the separation efficiency.

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::ValidationReport;

/// Air gap between magnet face and bed, in
const AIR_GAP_IN: f64 = 2.0;
const MAX_EFFICIENCY: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagneticSeparatorInput {
    /// in
    pub belt_width: f64,
    /// FPM
    pub belt_speed: f64,
    /// in
    pub material_depth: f64,
    /// Gauss
    pub magnetic_intensity: f64,
    /// mm
    pub particle_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagneticSeparatorResult {
    /// 0..=0.95
    pub separation_efficiency: f64,
    pub magnetic_force: f64,
    /// ft³/hr
    pub throughput_capacity: f64,
    pub recovery_rate: f64,
}

pub fn validate(input: &MagneticSeparatorInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Belt width", input.belt_width, 120.0)
        .positive_up_to("Belt speed", input.belt_speed, 500.0)
        .positive_up_to("Material depth", input.material_depth, 6.0)
        .positive_up_to("Magnetic intensity", input.magnetic_intensity, 3000.0)
        .positive_up_to("Particle size", input.particle_size, 50.0);
    report
}

pub fn calculate(input: &MagneticSeparatorInput) -> CalcResult<MagneticSeparatorResult> {
    evaluate::<MagneticSeparator>(input)
}

fn separation_efficiency(particle_size: f64, magnetic_intensity: f64) -> f64 {
    let size_factor = (particle_size / 10.0).min(1.0);
    let intensity_factor = (magnetic_intensity / 1000.0).min(1.0);
    size_factor * intensity_factor * MAX_EFFICIENCY
}

fn compute(input: &MagneticSeparatorInput) -> MagneticSeparatorResult {
    let effective_distance = input.material_depth + AIR_GAP_IN;
    let magnetic_force = input.magnetic_intensity.powi(2) / effective_distance.powi(2) * 0.001;

    let efficiency = separation_efficiency(input.particle_size, input.magnetic_intensity);

    // One foot of belt
    let belt_area = input.belt_width * 12.0;
    let throughput_capacity = belt_area * input.material_depth * input.belt_speed * 60.0 / 1728.0;

    let speed_factor = (1.0 - (input.belt_speed - 100.0) / 1000.0).max(0.5);

    MagneticSeparatorResult {
        separation_efficiency: efficiency,
        magnetic_force,
        throughput_capacity,
        recovery_rate: efficiency * speed_factor,
    }
}

fn chart(input: &MagneticSeparatorInput, output: &MagneticSeparatorResult) -> CalcResult<ChartSpec> {
    let intensities: Vec<f64> = sweep(500, 3000, 250).collect();
    let efficiencies = intensities
        .iter()
        .map(|gauss| separation_efficiency(input.particle_size, *gauss) * 100.0)
        .collect();

    let curve = Series::line(
        "Separation Efficiency",
        intensities.into_iter().map(Into::into).collect(),
        efficiencies,
    );
    let selected = HighlightPoint::selected(input.magnetic_intensity, output.separation_efficiency * 100.0);
    build_chart(MagneticSeparator::ID, vec![curve], Some(selected))
}

fn recommendations(input: &MagneticSeparatorInput, output: &MagneticSeparatorResult) -> Vec<String> {
    let mut notes = Vec::new();

    if input.magnetic_intensity < 1000.0 {
        notes.push("Low magnetic intensity may result in poor separation of weakly magnetic materials.");
    } else if input.magnetic_intensity > 2500.0 {
        notes.push("Very high magnetic intensity increases power consumption.");
    }

    if input.belt_speed > 300.0 {
        notes.push("High belt speed reduces contact time and separation efficiency.");
    } else if input.belt_speed < 50.0 {
        notes.push("Low belt speed may cause material buildup.");
    }

    if input.material_depth > 4.0 {
        notes.push("Deep material bed reduces magnetic field penetration.");
    }

    if input.particle_size < 1.0 {
        notes.push("Fine particles require higher magnetic intensity for effective separation.");
    }

    if output.separation_efficiency < 0.6 {
        notes.push("Low separation efficiency. Consider adjusting parameters or multiple passes.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct MagneticSeparator;

impl Calculation for MagneticSeparator {
    type Input = MagneticSeparatorInput;
    type Output = MagneticSeparatorResult;

    const ID: &'static str = "magnetic_separator";
    const NAME: &'static str = "Magnetic Separator Calculator";
    const CATEGORY: &'static str = "Separation Systems";
    const DESCRIPTION: &'static str = "Calculate magnetic field strength and separation efficiency";
    const FORMULA: &'static str = "F = I² ÷ (depth + 2)² × 0.001; η = min(d/10, 1) × min(I/1000, 1) × 0.95";

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
