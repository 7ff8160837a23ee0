//! # Air Classifier
//!
//! Terminal settling velocity of a particle in air and the resulting
//! classification efficiency at a given air velocity.
//!
//! ## Method
//!
//! - Air density from the ideal gas law, viscosity from a power law in
//!   absolute temperature
//! - Terminal velocity from Stokes' law below 100 µm, otherwise from the
//!   drag equation with Cd = 0.44
//! - Efficiency is piecewise linear in the ratio of air velocity to terminal
//!   velocity, reaching 95% above a ratio of 1.5
//!
//! Inputs are SI: m/s, g/cm³, µm, °C, kPa.

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::ValidationReport;

const GRAVITY: f64 = 9.81;
/// Specific gas constant of dry air, J/(kg·K)
const R_AIR: f64 = 287.0;
const KELVIN_OFFSET: f64 = 273.15;
/// Diameter below which Stokes' law applies, m
const STOKES_LIMIT_M: f64 = 0.0001;
const SPHERE_DRAG_COEFFICIENT: f64 = 0.44;

fn default_air_temperature() -> f64 {
    20.0
}

fn default_air_pressure() -> f64 {
    101.325
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirClassifierInput {
    /// m/s
    pub air_velocity: f64,
    /// g/cm³
    pub particle_density: f64,
    /// µm
    pub particle_diameter: f64,
    /// °C
    #[serde(default = "default_air_temperature")]
    pub air_temperature: f64,
    /// kPa
    #[serde(default = "default_air_pressure")]
    pub air_pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirClassifierResult {
    /// m/s
    pub terminal_velocity: f64,
    pub classification_efficiency: f64,
    /// m³/s per m² of classifier area
    pub air_requirement: f64,
    /// Pa
    pub pressure_drop: f64,
}

pub fn validate(input: &AirClassifierInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Air velocity", input.air_velocity, 50.0)
        .positive_up_to("Particle density", input.particle_density, 10.0)
        .positive_up_to("Particle diameter", input.particle_diameter, 1000.0)
        .within("Air temperature", input.air_temperature, -20.0, 100.0)
        .positive("Air pressure", input.air_pressure);

    // Lighter-than-air particles have no settling velocity
    if input.particle_density > 0.0 {
        let rho_air = air_density(input.air_temperature, input.air_pressure);
        report.require(
            input.particle_density * 1000.0 > rho_air,
            "Particle density must exceed air density",
        );
    }
    report
}

pub fn calculate(input: &AirClassifierInput) -> CalcResult<AirClassifierResult> {
    evaluate::<AirClassifier>(input)
}

/// Air density (kg/m³) at `temperature_c` and `pressure_kpa`
pub fn air_density(temperature_c: f64, pressure_kpa: f64) -> f64 {
    pressure_kpa * 1000.0 / (R_AIR * (temperature_c + KELVIN_OFFSET))
}

/// Dynamic viscosity of air (Pa·s) at `temperature_c`
pub fn air_viscosity(temperature_c: f64) -> f64 {
    1.8e-5 * ((KELVIN_OFFSET + temperature_c) / KELVIN_OFFSET).powf(0.7)
}

/// Terminal settling velocity (m/s)
pub fn terminal_velocity(input: &AirClassifierInput) -> f64 {
    let diameter_m = input.particle_diameter / 1e6;
    let rho_air = air_density(input.air_temperature, input.air_pressure);
    let rho_particle = input.particle_density * 1000.0;

    if diameter_m < STOKES_LIMIT_M {
        let mu = air_viscosity(input.air_temperature);
        (rho_particle - rho_air) * GRAVITY * diameter_m.powi(2) / (18.0 * mu)
    } else {
        (4.0 * GRAVITY * diameter_m * (rho_particle - rho_air) / (3.0 * SPHERE_DRAG_COEFFICIENT * rho_air)).sqrt()
    }
}

/// Efficiency for a given air-to-terminal velocity ratio
pub fn efficiency_for_ratio(velocity_ratio: f64) -> f64 {
    if velocity_ratio > 1.5 {
        0.95
    } else if velocity_ratio > 0.8 {
        0.7 + (velocity_ratio - 0.8) * 0.36
    } else {
        0.4 + velocity_ratio * 0.375
    }
}

fn compute(input: &AirClassifierInput) -> AirClassifierResult {
    let terminal_velocity = terminal_velocity(input);
    let rho_air = air_density(input.air_temperature, input.air_pressure);

    // Darcy friction 0.02 over an L/D of 4
    let pressure_drop = 0.02 * 4.0 * rho_air * input.air_velocity.powi(2) / 2.0;

    AirClassifierResult {
        terminal_velocity,
        classification_efficiency: efficiency_for_ratio(input.air_velocity / terminal_velocity),
        air_requirement: input.air_velocity * 2.0,
        pressure_drop,
    }
}

fn chart(input: &AirClassifierInput, output: &AirClassifierResult) -> CalcResult<ChartSpec> {
    let velocities: Vec<f64> = sweep(50, 500, 25).map(|v| v / 10.0).collect();
    let terminal = output.terminal_velocity;
    let efficiencies = velocities
        .iter()
        .map(|v| efficiency_for_ratio(v / terminal) * 100.0)
        .collect();

    let curve = Series::line(
        "Classification Efficiency",
        velocities.into_iter().map(Into::into).collect(),
        efficiencies,
    );
    let selected = HighlightPoint::selected(input.air_velocity, output.classification_efficiency * 100.0);
    build_chart(AirClassifier::ID, vec![curve], Some(selected))
}

fn recommendations(input: &AirClassifierInput, output: &AirClassifierResult) -> Vec<String> {
    let mut notes = Vec::new();

    if input.air_velocity < 2.0 {
        notes.push("Low air velocity may not provide adequate particle separation.");
    } else if input.air_velocity > 30.0 {
        notes.push("Very high air velocity increases power consumption and wear.");
    }

    if input.particle_diameter < 10.0 {
        notes.push("Very fine particles require careful control of air velocity.");
    } else if input.particle_diameter > 500.0 {
        notes.push("Coarse particles may require screening instead of air classification.");
    }

    if output.classification_efficiency < 0.7 {
        notes.push("Low efficiency. Consider adjusting air velocity or using multi-stage classification.");
    }

    if output.pressure_drop > 5000.0 {
        notes.push("High pressure drop increases fan power requirements.");
    }

    if input.air_temperature > 80.0 {
        notes.push("High temperature affects air density and classification performance.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct AirClassifier;

impl Calculation for AirClassifier {
    type Input = AirClassifierInput;
    type Output = AirClassifierResult;

    const ID: &'static str = "air_classifier";
    const NAME: &'static str = "Air Classifier Calculator";
    const CATEGORY: &'static str = "Separation Systems";
    const DESCRIPTION: &'static str = "Calculate air velocity and particle separation parameters";
    const FORMULA: &'static str = "Stokes vt = Δρ g d² ÷ 18μ (d < 100 µm), else vt = √(4 g d Δρ ÷ 3 Cd ρa); η from v ÷ vt";

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
    use crate::chart::AxisValue;

    fn fine_powder(air_velocity: f64) -> AirClassifierInput {
        AirClassifierInput {
            air_velocity,
            particle_density: 2.5,
            particle_diameter: 50.0,
            air_temperature: 20.0,
            air_pressure: 101.325,
        }
    }

    #[test]
    fn test_air_properties() {
        // 101325 / (287 × 293.15)
        assert!((air_density(20.0, 101.325) - 1.2043).abs() < 1e-4);
        assert!((air_viscosity(0.0) - 1.8e-5).abs() < 1e-15);
        assert!(air_viscosity(100.0) > air_viscosity(20.0));
    }

    #[test]
    fn test_stokes_regime() {
        let input = fine_powder(1.0);
        let mu = air_viscosity(20.0);
        let rho_air = air_density(20.0, 101.325);
        let expected = (2500.0 - rho_air) * 9.81 * (50e-6f64).powi(2) / (18.0 * mu);

        assert!((terminal_velocity(&input) - expected).abs() < 1e-12);
        // About 0.18 m/s for a 50 µm mineral particle
        assert!((terminal_velocity(&input) - 0.18).abs() < 0.005);
    }

    #[test]
    fn test_drag_regime() {
        let input = AirClassifierInput {
            particle_diameter: 200.0,
            ..fine_powder(5.0)
        };
        let rho_air = air_density(20.0, 101.325);
        let expected = (4.0 * 9.81 * 200e-6 * (2500.0 - rho_air) / (3.0 * 0.44 * rho_air)).sqrt();
        assert!((terminal_velocity(&input) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_efficiency_bands() {
        assert!((efficiency_for_ratio(2.0) - 0.95).abs() < 1e-12);
        assert!((efficiency_for_ratio(1.0) - 0.772).abs() < 1e-12);
        assert!((efficiency_for_ratio(0.4) - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_fast_air_saturates_efficiency() {
        let result = calculate(&fine_powder(5.0)).unwrap();
        assert!((result.classification_efficiency - 0.95).abs() < 1e-12);
        assert!((result.air_requirement - 10.0).abs() < 1e-12);

        let rho_air = air_density(20.0, 101.325);
        assert!((result.pressure_drop - 0.04 * rho_air * 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_validation() {
        let input = AirClassifierInput {
            air_temperature: 150.0,
            air_pressure: 0.0,
            ..fine_powder(5.0)
        };
        assert_eq!(
            validate(&input).violations(),
            &[
                "Air temperature must be between -20 and 100".to_string(),
                "Air pressure must be greater than 0".to_string(),
            ]
        );
    }

    #[test]
    fn test_particle_lighter_than_air_is_rejected() {
        let input = AirClassifierInput {
            particle_density: 0.001,
            particle_diameter: 500.0,
            ..fine_powder(10.0)
        };
        assert_eq!(
            validate(&input).violations(),
            &["Particle density must exceed air density".to_string()]
        );

        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_chart_sweep() {
        let input = fine_powder(5.0);
        let result = compute(&input);
        let chart = chart(&input, &result).unwrap();

        assert_eq!(chart.series[0].x.len(), 19);
        assert_eq!(chart.series[0].x[0], AxisValue::Number(5.0));
        assert_eq!(chart.series[0].x[18], AxisValue::Number(50.0));
    }
}
