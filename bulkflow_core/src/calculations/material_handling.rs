//! # Material Handling
//!
//! Residence time, bed depth and volumetric efficiency of a trough or
//! conveyor of given footprint, assuming a 2 ft working depth.

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::errors::CalcResult;
use crate::validation::{ValidationReport, MAX_BULK_DENSITY_PCF};

/// Assumed working depth, ft
const WORKING_DEPTH_FT: f64 = 2.0;
const LBS_PER_TON: f64 = 2000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialHandlingInput {
    /// tons/hr
    pub throughput: f64,
    /// ft
    pub equipment_length: f64,
    /// ft
    pub equipment_width: f64,
    /// ft/s
    pub material_velocity: f64,
    /// lb/ft³
    pub bulk_density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialHandlingResult {
    /// s
    pub residence_time: f64,
    /// ft
    pub bed_depth: f64,
    /// lb/hr
    pub mass_flow_rate: f64,
    /// Actual over theoretical capacity, capped at 1
    pub volumetric_efficiency: f64,
}

pub fn validate(input: &MaterialHandlingInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive("Throughput", input.throughput)
        .positive_up_to("Equipment length", input.equipment_length, 100.0)
        .positive_up_to("Equipment width", input.equipment_width, 20.0)
        .positive_up_to("Material velocity", input.material_velocity, 10.0)
        .positive_up_to("Bulk density", input.bulk_density, MAX_BULK_DENSITY_PCF);
    report
}

pub fn calculate(input: &MaterialHandlingInput) -> CalcResult<MaterialHandlingResult> {
    evaluate::<MaterialHandling>(input)
}

fn compute(input: &MaterialHandlingInput) -> MaterialHandlingResult {
    let equipment_volume = input.equipment_length * input.equipment_width * WORKING_DEPTH_FT;
    let mass_flow_rate = input.throughput * LBS_PER_TON;
    let flow_ft3_s = mass_flow_rate / input.bulk_density / 3600.0;

    // tons/hr the footprint could move at the stated velocity
    let theoretical_capacity = equipment_volume * input.material_velocity * input.bulk_density * 3600.0 / LBS_PER_TON;
    let volumetric_efficiency = if theoretical_capacity > 0.0 {
        (input.throughput / theoretical_capacity).min(1.0)
    } else {
        0.0
    };

    MaterialHandlingResult {
        residence_time: equipment_volume / flow_ft3_s,
        bed_depth: flow_ft3_s / (input.equipment_width * input.material_velocity),
        mass_flow_rate,
        volumetric_efficiency,
    }
}

fn recommendations(input: &MaterialHandlingInput, output: &MaterialHandlingResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.residence_time < 30.0 {
        notes.push("Short residence time may not allow proper material processing.");
    } else if output.residence_time > 300.0 {
        notes.push("Long residence time may cause material degradation or contamination.");
    }

    if output.bed_depth < 1.0 {
        notes.push("Shallow bed depth may cause uneven flow distribution.");
    } else if output.bed_depth > 6.0 {
        notes.push("Deep bed depth may cause compaction and flow problems.");
    }

    if input.material_velocity < 0.5 {
        notes.push("Low material velocity may cause bridging or stagnation.");
    } else if input.material_velocity > 5.0 {
        notes.push("High material velocity may cause excessive wear and product degradation.");
    }

    if output.volumetric_efficiency < 0.6 {
        notes.push("Low volumetric efficiency. Consider optimizing equipment dimensions or operating conditions.");
    }

    let aspect_ratio = input.equipment_length / input.equipment_width;
    if aspect_ratio < 2.0 {
        notes.push("Short equipment may not provide adequate processing time.");
    } else if aspect_ratio > 10.0 {
        notes.push("Long equipment may cause uneven residence time distribution.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct MaterialHandling;

impl Calculation for MaterialHandling {
    type Input = MaterialHandlingInput;
    type Output = MaterialHandlingResult;

    const ID: &'static str = "material_handling";
    const NAME: &'static str = "Material Handling Calculator";
    const CATEGORY: &'static str = "Material Handling";
    const DESCRIPTION: &'static str = "Calculate residence time, bed depth, and flow characteristics";
    const FORMULA: &'static str = "t = L × W × 2 ÷ Qv; bed = Qv ÷ (W × v); Qv = tons/hr × 2000 ÷ ρ ÷ 3600";

    fn validate(input: &Self::Input) -> ValidationReport {
        validate(input)
    }

    fn compute(input: &Self::Input) -> CalcResult<Self::Output> {
        Ok(compute(input))
    }

    fn recommendations(input: &Self::Input, output: &Self::Output) -> Vec<String> {
        recommendations(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_trough() -> MaterialHandlingInput {
        MaterialHandlingInput {
            throughput: 36.0,
            equipment_length: 20.0,
            equipment_width: 4.0,
            material_velocity: 1.0,
            bulk_density: 50.0,
        }
    }

    #[test]
    fn test_residence_and_bed_depth() {
        let result = calculate(&test_trough()).unwrap();

        // 72000 lb/hr ÷ 50 ÷ 3600 = 0.4 ft³/s
        assert!((result.mass_flow_rate - 72000.0).abs() < 1e-9);
        // 160 ft³ ÷ 0.4 ft³/s
        assert!((result.residence_time - 400.0).abs() < 1e-9);
        // 0.4 ÷ (4 × 1)
        assert!((result.bed_depth - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_volumetric_efficiency() {
        let result = compute(&test_trough());
        // 160 × 1 × 50 × 3600 / 2000 = 14400 tons/hr theoretical
        assert!((result.volumetric_efficiency - 36.0 / 14400.0).abs() < 1e-12);

        let flooded = compute(&MaterialHandlingInput {
            throughput: 20000.0,
            ..test_trough()
        });
        assert_eq!(flooded.volumetric_efficiency, 1.0);
    }

    #[test]
    fn test_validation() {
        let input = MaterialHandlingInput {
            equipment_width: 25.0,
            material_velocity: 0.0,
            ..test_trough()
        };
        assert_eq!(
            validate(&input).violations(),
            &[
                "Equipment width must not exceed 20".to_string(),
                "Material velocity must be greater than 0".to_string(),
            ]
        );
    }

    #[test]
    fn test_recommendations() {
        let input = test_trough();
        let notes = recommendations(&input, &compute(&input));
        assert_eq!(
            notes,
            vec![
                "Long residence time may cause material degradation or contamination.".to_string(),
                "Shallow bed depth may cause uneven flow distribution.".to_string(),
                "Low volumetric efficiency. Consider optimizing equipment dimensions or operating conditions."
                    .to_string(),
            ]
        );
    }
}
