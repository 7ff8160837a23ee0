//! # Vibrating Feeder
//!
//! Flow rate, conveying velocity and drive power of a vibrating pan feeder
//! from its stroke (amplitude, frequency, angle) and deck size.
//!
//! Bed depth is taken as 10% of deck width, capped at 6 in. Conveying
//! velocity is the horizontal component of the peak deck velocity.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::{ValidationReport, MAX_BULK_DENSITY_PCF};

const MAX_BED_DEPTH_IN: f64 = 6.0;
const FT_LB_PER_SEC_PER_HP: f64 = 550.0;

fn default_stroke_angle() -> f64 {
    45.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibratingFeederInput {
    /// in
    pub deck_width: f64,
    /// in
    pub deck_length: f64,
    /// in
    pub amplitude: f64,
    /// Hz
    pub frequency: f64,
    /// lb/ft³
    pub bulk_density: f64,
    /// Degrees from horizontal
    #[serde(default = "default_stroke_angle")]
    pub stroke_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibratingFeederResult {
    pub flow_rate_tons_hr: f64,
    /// in
    pub stroke_length: f64,
    /// ft/min
    pub conveying_velocity: f64,
    /// hp
    pub power_required: f64,
}

pub fn validate(input: &VibratingFeederInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Deck width", input.deck_width, 120.0)
        .positive_up_to("Deck length", input.deck_length, 240.0)
        .positive_up_to("Amplitude", input.amplitude, 0.5)
        .positive_up_to("Frequency", input.frequency, 60.0)
        .positive_up_to("Bulk density", input.bulk_density, MAX_BULK_DENSITY_PCF)
        .within("Stroke angle", input.stroke_angle, 15.0, 60.0);
    report
}

pub fn calculate(input: &VibratingFeederInput) -> CalcResult<VibratingFeederResult> {
    evaluate::<VibratingFeeder>(input)
}

fn compute_at(input: &VibratingFeederInput, frequency: f64) -> VibratingFeederResult {
    let conveying_velocity =
        input.amplitude * frequency * 2.0 * PI * input.stroke_angle.to_radians().cos() * 60.0;

    let bed_depth = (input.deck_width * 0.1).min(MAX_BED_DEPTH_IN);
    let cross_section_ft2 = input.deck_width * bed_depth / 144.0;
    let flow_rate_ft3_hr = cross_section_ft2 * conveying_velocity * 60.0;

    let acceleration = (2.0 * PI * frequency).powi(2) * input.amplitude / 12.0;
    let mass_lb_s = flow_rate_ft3_hr * input.bulk_density / 3600.0;
    let power_required = (mass_lb_s * acceleration * conveying_velocity / 60.0) / FT_LB_PER_SEC_PER_HP;

    VibratingFeederResult {
        flow_rate_tons_hr: flow_rate_ft3_hr * input.bulk_density / 2000.0,
        stroke_length: 2.0 * input.amplitude,
        conveying_velocity,
        power_required,
    }
}

fn chart(input: &VibratingFeederInput, output: &VibratingFeederResult) -> CalcResult<ChartSpec> {
    let frequencies: Vec<f64> = sweep(10, 60, 5).collect();
    let flows = frequencies
        .iter()
        .map(|f| compute_at(input, *f).flow_rate_tons_hr)
        .collect();

    let curve = Series::line("Flow Rate", frequencies.into_iter().map(Into::into).collect(), flows);
    let selected = HighlightPoint::selected(input.frequency, output.flow_rate_tons_hr);
    build_chart(VibratingFeeder::ID, vec![curve], Some(selected))
}

fn recommendations(input: &VibratingFeederInput, output: &VibratingFeederResult) -> Vec<String> {
    let mut notes = Vec::new();

    if input.frequency < 15.0 {
        notes.push("Low frequency may cause uneven material flow.");
    } else if input.frequency > 50.0 {
        notes.push("High frequency increases wear and maintenance requirements.");
    }

    if input.amplitude < 0.05 {
        notes.push("Low amplitude may not provide sufficient material movement.");
    } else if input.amplitude > 0.3 {
        notes.push("High amplitude may cause material spillage.");
    }

    if output.power_required > 5.0 {
        notes.push("High power requirement. Consider optimizing frequency and amplitude.");
    }

    if input.stroke_angle < 20.0 {
        notes.push("Low stroke angle reduces conveying efficiency.");
    } else if input.stroke_angle > 50.0 {
        notes.push("High stroke angle may cause material bounce.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct VibratingFeeder;

impl Calculation for VibratingFeeder {
    type Input = VibratingFeederInput;
    type Output = VibratingFeederResult;

    const ID: &'static str = "vibrating_feeder";
    const NAME: &'static str = "Vibrating Feeder Calculator";
    const CATEGORY: &'static str = "Feeding Systems";
    const DESCRIPTION: &'static str = "Calculate amplitude, frequency, and flow rate for vibrating feeders";
    const FORMULA: &'static str = "v = A × f × 2π × cos(θ) × 60; Q = W × bed ÷ 144 × v × 60";

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        Ok(compute_at(input, input.frequency))
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

    fn test_feeder() -> VibratingFeederInput {
        VibratingFeederInput {
            deck_width: 24.0,
            deck_length: 48.0,
            amplitude: 0.1,
            frequency: 30.0,
            bulk_density: 50.0,
            stroke_angle: 60.0,
        }
    }

    #[test]
    fn test_velocity_and_flow() {
        let result = calculate(&test_feeder()).unwrap();

        // 0.1 × 30 × 2π × cos 60° × 60 = 180π ft/min
        assert!((result.conveying_velocity - 180.0 * PI).abs() < 1e-9);
        assert!((result.stroke_length - 0.2).abs() < 1e-12);

        // bed 2.4 in; 24 × 2.4 / 144 = 0.4 ft²
        let ft3_hr = 0.4 * 180.0 * PI * 60.0;
        assert!((result.flow_rate_tons_hr - ft3_hr * 50.0 / 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_bed_depth_is_capped() {
        let wide = VibratingFeederInput {
            deck_width: 100.0,
            ..test_feeder()
        };
        let result = compute_at(&wide, wide.frequency);
        // 100 × 6 / 144 ft², not 100 × 10 / 144
        let ft3_hr = 100.0 * 6.0 / 144.0 * result.conveying_velocity * 60.0;
        assert!((result.flow_rate_tons_hr - ft3_hr * 50.0 / 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_stroke_angle_default() {
        let input: VibratingFeederInput = serde_json::from_str(
            r#"{"deck_width": 24, "deck_length": 48, "amplitude": 0.1, "frequency": 30, "bulk_density": 50}"#,
        )
        .unwrap();
        assert_eq!(input.stroke_angle, 45.0);
    }

    #[test]
    fn test_validation() {
        let input = VibratingFeederInput {
            amplitude: 0.75,
            stroke_angle: 10.0,
            ..test_feeder()
        };
        assert_eq!(
            validate(&input).violations(),
            &[
                "Amplitude must not exceed 0.5".to_string(),
                "Stroke angle must be between 15 and 60".to_string(),
            ]
        );
    }

    #[test]
    fn test_chart_and_recommendations() {
        let input = VibratingFeederInput {
            frequency: 55.0,
            ..test_feeder()
        };
        let result = compute_at(&input, input.frequency);
        let chart = chart(&input, &result).unwrap();
        assert_eq!(chart.series[0].x.len(), 11);

        let notes = recommendations(&input, &result);
        assert_eq!(notes[0], "High frequency increases wear and maintenance requirements.");
        assert_eq!(notes.last().unwrap(), "High stroke angle may cause material bounce.");
    }
}
