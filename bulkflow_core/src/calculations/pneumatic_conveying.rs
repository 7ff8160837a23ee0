//! # Pneumatic Conveying
//!
//! Air velocity, pressure drop and blower power for dilute phase pneumatic
//! conveying.
//!
//! ## Method
//!
//! - Minimum conveying velocity = 12 + 2.5 × (0.05 √particle size); the
//!   design air velocity is 1.8× that, and the material moves at 80% of it
//! - Pressure drop is the sum of acceleration, Darcy–Weisbach pipe friction
//!   (f = 0.02, standard air at 1.2 kg/m³) and lift
//! - Power (kW) = air flow × pressure drop ÷ (0.75 × 1000)
//!
//! Inputs: tons/hr, ft, in, lb/ft³, mm. Outputs are SI (m/s, Pa, kW, m³/s).

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::{ValidationReport, MAX_BULK_DENSITY_PCF};

const GRAVITY: f64 = 9.81;
const FRICTION_FACTOR: f64 = 0.02;
/// Standard air, kg/m³
const AIR_DENSITY: f64 = 1.2;
const FAN_EFFICIENCY: f64 = 0.75;
const METERS_PER_INCH: f64 = 0.0254;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PneumaticConveyingInput {
    /// tons/hr
    pub material_flow_rate: f64,
    /// ft
    pub conveying_distance: f64,
    /// ft
    #[serde(default)]
    pub vertical_lift: f64,
    /// in
    pub pipe_diameter: f64,
    /// lb/ft³
    pub bulk_density: f64,
    /// mm
    pub particle_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PneumaticConveyingResult {
    /// m/s
    pub air_velocity: f64,
    /// Pa
    pub pressure_drop: f64,
    /// kW
    pub power_required: f64,
    /// m/s
    pub conveying_velocity: f64,
    /// m³/s
    pub air_flow_rate: f64,
}

pub fn validate(input: &PneumaticConveyingInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive("Material flow rate", input.material_flow_rate)
        .positive_up_to("Conveying distance", input.conveying_distance, 1000.0)
        .within("Vertical lift", input.vertical_lift, 0.0, 200.0)
        .positive_up_to("Pipe diameter", input.pipe_diameter, 12.0)
        .positive_up_to("Bulk density", input.bulk_density, MAX_BULK_DENSITY_PCF)
        .positive_up_to("Particle size", input.particle_size, 50.0);
    report
}

pub fn calculate(input: &PneumaticConveyingInput) -> CalcResult<PneumaticConveyingResult> {
    evaluate::<PneumaticConveying>(input)
}

/// Design air velocity (m/s) for a particle size in mm
pub fn design_air_velocity(particle_size: f64) -> f64 {
    let particle_terminal_velocity = 0.05 * particle_size.sqrt();
    let min_velocity = 12.0 + 2.5 * particle_terminal_velocity;
    min_velocity * 1.8
}

fn compute_over(input: &PneumaticConveyingInput, conveying_distance: f64) -> PneumaticConveyingResult {
    let flow_kg_s = input.material_flow_rate * 1000.0 / 3600.0;
    let diameter_m = input.pipe_diameter * METERS_PER_INCH;
    let pipe_area = PI * (diameter_m / 2.0).powi(2);

    let air_velocity = design_air_velocity(input.particle_size);
    let air_flow_rate = air_velocity * pipe_area;

    let dp_acceleration = flow_kg_s * air_velocity / pipe_area;
    let dp_friction =
        FRICTION_FACTOR * (conveying_distance / diameter_m) * (AIR_DENSITY * air_velocity.powi(2)) / 2.0;
    let dp_gravity = AIR_DENSITY * GRAVITY * input.vertical_lift;
    let pressure_drop = dp_acceleration + dp_friction + dp_gravity;

    PneumaticConveyingResult {
        air_velocity,
        pressure_drop,
        power_required: air_flow_rate * pressure_drop / (FAN_EFFICIENCY * 1000.0),
        conveying_velocity: air_velocity * 0.8,
        air_flow_rate,
    }
}

fn chart(input: &PneumaticConveyingInput, output: &PneumaticConveyingResult) -> CalcResult<ChartSpec> {
    let distances: Vec<f64> = sweep(50, 1000, 50).collect();
    let kpa = distances
        .iter()
        .map(|d| compute_over(input, *d).pressure_drop / 1000.0)
        .collect();

    let curve = Series::line("Pressure Drop", distances.into_iter().map(Into::into).collect(), kpa);
    let selected = HighlightPoint::selected(input.conveying_distance, output.pressure_drop / 1000.0);
    build_chart(PneumaticConveying::ID, vec![curve], Some(selected))
}

fn recommendations(input: &PneumaticConveyingInput, output: &PneumaticConveyingResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.air_velocity < 15.0 {
        notes.push("Low air velocity may cause material settling in the pipeline.");
    } else if output.air_velocity > 40.0 {
        notes.push("High air velocity increases power consumption and product degradation.");
    }

    if output.pressure_drop > 50_000.0 {
        notes.push("High pressure drop. Consider larger pipe diameter or shorter distance.");
    }

    if output.power_required > 50.0 {
        notes.push("High power requirement. Consider system optimization or staged conveying.");
    }

    if input.pipe_diameter < 3.0 {
        notes.push("Small pipe diameter increases pressure drop and blockage risk.");
    } else if input.pipe_diameter > 8.0 {
        notes.push("Large pipe diameter may reduce conveying efficiency for low flow rates.");
    }

    if input.bulk_density > 100.0 {
        notes.push("High bulk density material requires higher air velocities.");
    }

    if input.particle_size > 20.0 {
        notes.push("Large particles may require dense phase conveying system.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct PneumaticConveying;

impl Calculation for PneumaticConveying {
    type Input = PneumaticConveyingInput;
    type Output = PneumaticConveyingResult;

    const ID: &'static str = "pneumatic_conveying";
    const NAME: &'static str = "Pneumatic Conveying Calculator";
    const CATEGORY: &'static str = "Conveyor Systems";
    const DESCRIPTION: &'static str = "Calculate air requirements and pressure drop for pneumatic systems";
    const FORMULA: &'static str = "ΔP = ṁv ÷ A + f (L/D) ρv²/2 + ρ g H; P (kW) = Q ΔP ÷ 750";

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        Ok(compute_over(input, input.conveying_distance))
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

    fn four_inch_line() -> PneumaticConveyingInput {
        PneumaticConveyingInput {
            material_flow_rate: 5.0,
            conveying_distance: 200.0,
            vertical_lift: 30.0,
            pipe_diameter: 4.0,
            bulk_density: 40.0,
            particle_size: 4.0,
        }
    }

    #[test]
    fn test_air_velocity() {
        // 0.05 × √4 = 0.1; (12 + 0.25) × 1.8 = 22.05 m/s
        assert!((design_air_velocity(4.0) - 22.05).abs() < 1e-12);

        let result = calculate(&four_inch_line()).unwrap();
        assert!((result.conveying_velocity - 22.05 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_components() {
        let result = calculate(&four_inch_line()).unwrap();

        let d = 4.0 * 0.0254;
        let area = PI * (d / 2.0) * (d / 2.0);
        let v = 22.05;
        let acceleration = (5.0 * 1000.0 / 3600.0) * v / area;
        let friction = 0.02 * (200.0 / d) * 1.2 * v * v / 2.0;
        let gravity = 1.2 * 9.81 * 30.0;

        let expected = acceleration + friction + gravity;
        assert!((result.pressure_drop - expected).abs() < 1e-6 * expected);
        assert!((result.air_flow_rate - v * area).abs() < 1e-12);
        assert!((result.power_required - v * area * expected / 750.0).abs() < 1e-6);
    }

    #[test]
    fn test_pressure_grows_with_distance() {
        let input = four_inch_line();
        let near = compute_over(&input, 100.0);
        let far = compute_over(&input, 900.0);
        assert!(far.pressure_drop > near.pressure_drop);
    }

    #[test]
    fn test_vertical_lift_defaults_to_zero() {
        let input: PneumaticConveyingInput = serde_json::from_str(
            r#"{"material_flow_rate": 5, "conveying_distance": 200, "pipe_diameter": 4, "bulk_density": 40, "particle_size": 4}"#,
        )
        .unwrap();
        assert_eq!(input.vertical_lift, 0.0);
    }

    #[test]
    fn test_validation() {
        let input = PneumaticConveyingInput {
            vertical_lift: -5.0,
            pipe_diameter: 14.0,
            ..four_inch_line()
        };
        assert_eq!(
            validate(&input).violations(),
            &[
                "Vertical lift must be between 0 and 200".to_string(),
                "Pipe diameter must not exceed 12".to_string(),
            ]
        );
    }

    #[test]
    fn test_chart_in_kpa() {
        let input = four_inch_line();
        let result = compute_over(&input, input.conveying_distance);
        let chart = chart(&input, &result).unwrap();
        assert_eq!(chart.series[0].x.len(), 20);
        // 200 ft is the fourth point of the sweep
        assert!((chart.series[0].y[3] - result.pressure_drop / 1000.0).abs() < 1e-9);
    }
}
