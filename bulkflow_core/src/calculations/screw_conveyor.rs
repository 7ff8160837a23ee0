//! # Screw Conveyor
//!
//! Volumetric and mass capacity, drive torque and horsepower of an inclined
//! screw conveyor.
//!
//! ## Assumptions
//!
//! - Capacity = trough area × pitch × RPM × 60 × loading factor
//! - Capacity falls linearly with incline, by 30% at 45°
//! - Friction factor rises from 0.02 (flat) by 0.03 per 90° of incline
//! - HP = torque (in-lb) × RPM / 63000
//!
//! All quantities are imperial: inches, feet, lb/ft³, ft³/hr, tons/hr.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::{ValidationReport, MAX_BULK_DENSITY_PCF};

const LBS_PER_TON: f64 = 2000.0;
/// in-lb × RPM per horsepower
const TORQUE_HP_DIVISOR: f64 = 63000.0;

fn default_material_factor() -> f64 {
    0.45
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrewConveyorInput {
    /// Screw diameter, in
    pub diameter: f64,
    /// Screw pitch, in
    pub pitch: f64,
    pub rpm: f64,
    /// Conveyor length, ft
    pub length: f64,
    /// lb/ft³
    pub bulk_density: f64,
    /// Trough loading factor
    #[serde(default = "default_material_factor")]
    pub material_factor: f64,
    /// Degrees
    #[serde(default)]
    pub incline_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrewConveyorResult {
    pub capacity_ft3_hr: f64,
    pub capacity_tons_hr: f64,
    pub torque_in_lbs: f64,
    pub horsepower: f64,
    pub efficiency: f64,
}

pub fn validate(input: &ScrewConveyorInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Diameter", input.diameter, 24.0)
        .positive("Pitch", input.pitch)
        .positive_up_to("RPM", input.rpm, 200.0)
        .positive_up_to("Length", input.length, 100.0)
        .positive_up_to("Bulk density", input.bulk_density, MAX_BULK_DENSITY_PCF)
        .within("Material factor", input.material_factor, 0.1, 1.0)
        .within("Incline angle", input.incline_angle, 0.0, 45.0);
    report
}

pub fn calculate(input: &ScrewConveyorInput) -> CalcResult<ScrewConveyorResult> {
    evaluate::<ScrewConveyor>(input)
}

/// Incline-corrected capacity at `rpm`, ft³/hr
fn capacity_ft3_hr(input: &ScrewConveyorInput, rpm: f64) -> f64 {
    let diameter_ft = input.diameter / 12.0;
    let pitch_ft = input.pitch / 12.0;
    let flat = PI * diameter_ft.powi(2) / 4.0 * pitch_ft * rpm * 60.0 * input.material_factor;
    let incline_factor = 1.0 - (input.incline_angle / 45.0) * 0.3;
    flat * incline_factor
}

fn tons_per_hour(ft3_hr: f64, bulk_density: f64) -> f64 {
    ft3_hr * bulk_density / LBS_PER_TON
}

fn compute(input: &ScrewConveyorInput) -> ScrewConveyorResult {
    let capacity_ft3_hr = capacity_ft3_hr(input, input.rpm);

    let material_load = capacity_ft3_hr * input.bulk_density * input.length / 3600.0;
    let friction_factor = 0.02 + (input.incline_angle / 90.0) * 0.03;
    let torque_in_lbs = material_load * friction_factor * (input.diameter / 2.0) * 12.0;

    ScrewConveyorResult {
        capacity_ft3_hr,
        capacity_tons_hr: tons_per_hour(capacity_ft3_hr, input.bulk_density),
        torque_in_lbs,
        horsepower: torque_in_lbs * input.rpm / TORQUE_HP_DIVISOR,
        efficiency: 0.85 - (input.incline_angle / 90.0) * 0.15,
    }
}

fn chart(input: &ScrewConveyorInput, output: &ScrewConveyorResult) -> CalcResult<ChartSpec> {
    let rpms: Vec<f64> = sweep(10, 200, 10).collect();
    let tons = rpms
        .iter()
        .map(|rpm| tons_per_hour(capacity_ft3_hr(input, *rpm), input.bulk_density))
        .collect();

    let curve = Series::line("Capacity", rpms.into_iter().map(Into::into).collect(), tons);
    let selected = HighlightPoint::selected(input.rpm, output.capacity_tons_hr);
    build_chart(ScrewConveyor::ID, vec![curve], Some(selected))
}

fn recommendations(input: &ScrewConveyorInput, output: &ScrewConveyorResult) -> Vec<String> {
    let mut notes = Vec::new();

    if input.rpm < 30.0 {
        notes.push("Low RPM may cause material bridging in certain applications.");
    } else if input.rpm > 150.0 {
        notes.push("High RPM increases wear and power consumption.");
    }

    if output.horsepower > 20.0 {
        notes.push("High power requirement. Consider multiple smaller units or larger diameter.");
    }

    if output.efficiency < 0.7 {
        notes.push("Low efficiency due to incline. Consider belt conveyor for steep angles.");
    }

    if output.capacity_tons_hr < 1.0 {
        notes.push("Low capacity. Consider smaller diameter for better material movement.");
    } else if output.capacity_tons_hr > 100.0 {
        notes.push("High capacity system. Verify structural and drive requirements.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct ScrewConveyor;

impl Calculation for ScrewConveyor {
    type Input = ScrewConveyorInput;
    type Output = ScrewConveyorResult;

    const ID: &'static str = "screw_conveyor";
    const NAME: &'static str = "Screw Conveyor Calculator";
    const CATEGORY: &'static str = "Conveyor Systems";
    const DESCRIPTION: &'static str = "Calculate capacity, torque, and power requirements for screw conveyors";
    const FORMULA: &'static str = "Q = π(D/12)²/4 × P/12 × RPM × 60 × K × (1 − 0.3θ/45); HP = T × RPM ÷ 63000";

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

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_12_inch() -> ScrewConveyorInput {
        ScrewConveyorInput {
            diameter: 12.0,
            pitch: 12.0,
            rpm: 60.0,
            length: 20.0,
            bulk_density: 50.0,
            material_factor: 0.45,
            incline_angle: 0.0,
        }
    }

    #[test]
    fn test_flat_capacity() {
        let result = calculate(&flat_12_inch()).unwrap();

        // π/4 ft² × 1 ft × 60 rpm × 60 × 0.45 = 1272.3 ft³/hr
        let expected = PI / 4.0 * 3600.0 * 0.45;
        assert!((result.capacity_ft3_hr - expected).abs() < 1e-9);
        assert!((result.capacity_tons_hr - expected * 50.0 / 2000.0).abs() < 1e-9);
        assert!((result.efficiency - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_torque_and_horsepower() {
        let result = compute(&flat_12_inch());
        let load = result.capacity_ft3_hr * 50.0 * 20.0 / 3600.0;
        let torque = load * 0.02 * 6.0 * 12.0;
        assert!((result.torque_in_lbs - torque).abs() < 1e-9);
        assert!((result.horsepower - torque * 60.0 / 63000.0).abs() < 1e-12);
    }

    #[test]
    fn test_incline_reduces_capacity() {
        let flat = compute(&flat_12_inch());
        let steep = compute(&ScrewConveyorInput {
            incline_angle: 45.0,
            ..flat_12_inch()
        });
        assert!((steep.capacity_ft3_hr - flat.capacity_ft3_hr * 0.7).abs() < 1e-9);
        assert!((steep.efficiency - 0.775).abs() < 1e-12);
    }

    #[test]
    fn test_defaults() {
        let input: ScrewConveyorInput = serde_json::from_str(
            r#"{"diameter": 9, "pitch": 9, "rpm": 50, "length": 15, "bulk_density": 40}"#,
        )
        .unwrap();
        assert_eq!(input.material_factor, 0.45);
        assert_eq!(input.incline_angle, 0.0);
    }

    #[test]
    fn test_validation() {
        let input = ScrewConveyorInput {
            diameter: 30.0,
            material_factor: 1.5,
            incline_angle: 50.0,
            ..flat_12_inch()
        };
        assert_eq!(
            validate(&input).violations(),
            &[
                "Diameter must not exceed 24".to_string(),
                "Material factor must be between 0.1 and 1".to_string(),
                "Incline angle must be between 0 and 45".to_string(),
            ]
        );
    }

    #[test]
    fn test_chart_sweeps_rpm() {
        let input = flat_12_inch();
        let result = compute(&input);
        let chart = chart(&input, &result).unwrap();
        assert_eq!(chart.series[0].x.len(), 20);
        // The sweep passes through the selected 60 rpm
        assert!((chart.series[0].y[5] - result.capacity_tons_hr).abs() < 1e-9);
    }
}
