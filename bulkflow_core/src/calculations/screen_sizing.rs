//! # Screen Sizing
//!
//! Required screen area, unit capacity, screening efficiency and product
//! split for a vibrating screen.
//!
//! ## Method
//!
//! - Base capacity 0.5 tons/hr/ft² for dry material
//! - Moisture derates capacity by 0.3% per percent moisture
//! - Mesh factor = max(0.3, mesh ÷ 50 mm)
//! - Efficiency = 85% + 10% × (1 − |oversize − undersize| ÷ 200)
//!
//! Efficiency depends only on the size split, so the mesh sweep chart is flat.

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, sweep, Calculation};
use crate::chart::{build_chart, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::validation::{ValidationReport, MAX_BULK_DENSITY_PCF};

/// tons/hr per ft² for dry material
const BASE_CAPACITY: f64 = 0.5;
/// mm
const REFERENCE_MESH: f64 = 50.0;
const MIN_MESH_FACTOR: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSizingInput {
    /// tons/hr
    pub feed_rate: f64,
    /// %
    pub oversize_percentage: f64,
    /// %
    pub undersize_percentage: f64,
    /// mm
    pub mesh_size: f64,
    /// lb/ft³
    pub bulk_density: f64,
    /// %
    #[serde(default)]
    pub moisture_content: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSizingResult {
    /// ft²
    pub screen_area: f64,
    /// tons/hr per ft²
    pub capacity: f64,
    pub efficiency: f64,
    /// tons/hr
    pub underflow_rate: f64,
    /// tons/hr
    pub overflow_rate: f64,
}

pub fn validate(input: &ScreenSizingInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive("Feed rate", input.feed_rate)
        .within("Oversize percentage", input.oversize_percentage, 0.0, 100.0)
        .within("Undersize percentage", input.undersize_percentage, 0.0, 100.0)
        .require(
            input.oversize_percentage + input.undersize_percentage <= 100.0,
            "Oversize and undersize percentages cannot exceed 100%",
        )
        .positive_up_to("Mesh size", input.mesh_size, 100.0)
        .positive_up_to("Bulk density", input.bulk_density, MAX_BULK_DENSITY_PCF)
        .within("Moisture content", input.moisture_content, 0.0, 50.0);
    report
}

pub fn calculate(input: &ScreenSizingInput) -> CalcResult<ScreenSizingResult> {
    evaluate::<ScreenSizing>(input)
}

fn screening_efficiency(oversize: f64, undersize: f64) -> f64 {
    let near_size_factor = 1.0 - (oversize - undersize).abs() / 200.0;
    0.85 + near_size_factor * 0.10
}

fn compute(input: &ScreenSizingInput) -> ScreenSizingResult {
    let moisture_factor = 1.0 - (input.moisture_content / 100.0) * 0.3;
    let mesh_factor = (input.mesh_size / REFERENCE_MESH).max(MIN_MESH_FACTOR);
    let capacity = BASE_CAPACITY * moisture_factor * mesh_factor;

    ScreenSizingResult {
        screen_area: input.feed_rate / capacity,
        capacity,
        efficiency: screening_efficiency(input.oversize_percentage, input.undersize_percentage),
        underflow_rate: input.feed_rate * input.undersize_percentage / 100.0,
        overflow_rate: input.feed_rate * input.oversize_percentage / 100.0,
    }
}

fn chart(input: &ScreenSizingInput, output: &ScreenSizingResult) -> CalcResult<ChartSpec> {
    let meshes: Vec<f64> = sweep(5, 100, 5).collect();
    let efficiency = screening_efficiency(input.oversize_percentage, input.undersize_percentage) * 100.0;
    let efficiencies = vec![efficiency; meshes.len()];

    let curve = Series::line(
        "Screening Efficiency",
        meshes.into_iter().map(Into::into).collect(),
        efficiencies,
    );
    let selected = HighlightPoint::selected(input.mesh_size, output.efficiency * 100.0);
    build_chart(ScreenSizing::ID, vec![curve], Some(selected))
}

fn recommendations(input: &ScreenSizingInput, output: &ScreenSizingResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.screen_area < 10.0 {
        notes.push("Small screen area. Consider multiple decks for higher capacity.");
    } else if output.screen_area > 100.0 {
        notes.push("Large screen area required. Consider multiple screens in parallel.");
    }

    if input.mesh_size < 2.0 {
        notes.push("Very fine mesh may cause blinding. Consider scalping and pre-screening.");
    } else if input.mesh_size > 50.0 {
        notes.push("Coarse mesh screening. Verify material size distribution.");
    }

    if input.moisture_content > 5.0 {
        notes.push("High moisture content reduces screening efficiency. Consider drying.");
    }

    if output.efficiency < 0.8 {
        notes.push("Low screening efficiency. Consider larger screen area or multiple decks.");
    }

    // No undersize means an unbounded split
    let uneven_split = input.undersize_percentage <= 0.0 || {
        let split_ratio = input.oversize_percentage / input.undersize_percentage;
        !(0.25..=4.0).contains(&split_ratio)
    };
    if uneven_split {
        notes.push("Uneven size distribution may require staged screening.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct ScreenSizing;

impl Calculation for ScreenSizing {
    type Input = ScreenSizingInput;
    type Output = ScreenSizingResult;

    const ID: &'static str = "screen_sizing";
    const NAME: &'static str = "Screen Sizing Calculator";
    const CATEGORY: &'static str = "Separation Systems";
    const DESCRIPTION: &'static str = "Calculate screen area and efficiency for material separation";
    const FORMULA: &'static str = "A = feed ÷ (0.5 × (1 − 0.3M/100) × max(0.3, mesh/50)); η = 0.85 + 0.1 (1 − |O − U|/200)";

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
    use pretty_assertions::assert_eq;

    fn test_screen() -> ScreenSizingInput {
        ScreenSizingInput {
            feed_rate: 10.0,
            oversize_percentage: 40.0,
            undersize_percentage: 60.0,
            mesh_size: 25.0,
            bulk_density: 100.0,
            moisture_content: 0.0,
        }
    }

    #[test]
    fn test_area_and_split() {
        let result = calculate(&test_screen()).unwrap();

        // 0.5 × 1.0 × 0.5
        assert!((result.capacity - 0.25).abs() < 1e-12);
        assert!((result.screen_area - 40.0).abs() < 1e-9);
        // 0.85 + 0.9 × 0.1
        assert!((result.efficiency - 0.94).abs() < 1e-12);
        assert!((result.underflow_rate - 6.0).abs() < 1e-12);
        assert!((result.overflow_rate - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_moisture_and_fine_mesh() {
        let wet_fine = compute(&ScreenSizingInput {
            mesh_size: 5.0,
            moisture_content: 10.0,
            ..test_screen()
        });
        // 0.5 × 0.97 × 0.3 (mesh factor floor)
        assert!((wet_fine.capacity - 0.1455).abs() < 1e-12);
    }

    #[test]
    fn test_combined_percentages_rejected() {
        let input = ScreenSizingInput {
            oversize_percentage: 70.0,
            undersize_percentage: 50.0,
            ..test_screen()
        };
        assert_eq!(
            validate(&input).violations(),
            &["Oversize and undersize percentages cannot exceed 100%".to_string()]
        );
        assert_eq!(calculate(&input).unwrap_err().error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_moisture_defaults_to_dry() {
        let input: ScreenSizingInput = serde_json::from_str(
            r#"{"feed_rate": 10, "oversize_percentage": 40, "undersize_percentage": 60, "mesh_size": 25, "bulk_density": 100}"#,
        )
        .unwrap();
        assert_eq!(input.moisture_content, 0.0);
    }

    #[test]
    fn test_chart_is_flat_over_mesh() {
        let input = test_screen();
        let result = compute(&input);
        let chart = chart(&input, &result).unwrap();
        assert_eq!(chart.series[0].x.len(), 20);
        assert!(chart.series[0].y.iter().all(|y| (y - 94.0).abs() < 1e-9));
    }

    #[test]
    fn test_uneven_split_recommendation() {
        let input = ScreenSizingInput {
            oversize_percentage: 90.0,
            undersize_percentage: 0.0,
            ..test_screen()
        };
        let notes = recommendations(&input, &compute(&input));
        assert_eq!(notes.last().unwrap(), "Uneven size distribution may require staged screening.");

        let balanced = test_screen();
        let notes = recommendations(&balanced, &compute(&balanced));
        assert!(notes.is_empty());
    }
}
