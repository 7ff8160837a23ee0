//! # Belt Conveyor Horsepower
//!
//! Effective, slack-side and tight-side belt tension and drive horsepower for
//! a part-handling belt conveyor with an incline, a curve and a horizontal
//! run.
//!
//! ## Method
//!
//! 1. Sum the part load over the three belt sections (parts/ft × lb per part)
//! 2. Scale by the incline coefficient, taken from the tabulated angle
//!    nearest the actual incline (ties go to the smaller angle)
//! 3. T_E = scaled force, T_2 = 0.45 T_E, T_1 = T_E + T_2
//! 4. HP = T_E × belt speed / 28000
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::calculations::belt_horsepower::{calculate, BeltHorsepowerInput};
//!
//! let input = BeltHorsepowerInput {
//!     belt_speed: 100.0,
//!     part_feed_rate: 50.0,
//!     belt_width: 24.0,
//!     incline_angle: 47.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.coefficient_angle, 45);
//! assert!((result.incline_coefficient - 0.3).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::chart::{build_chart, AxisValue, ChartSpec, HighlightPoint, Series};
use crate::errors::CalcResult;
use crate::lookup::LookupTable;
use crate::validation::ValidationReport;

/// Incline coefficient by incline angle (degrees).
pub static INCLINE_COEFFICIENTS: LookupTable<u32, f64> = LookupTable::new(
    "incline_coefficients",
    &[(90, 0.75), (75, 0.6), (60, 0.45), (45, 0.3), (30, 0.2)],
);

/// Slack-side tension as a fraction of effective tension
pub const SLACK_TENSION_RATIO: f64 = 0.45;

/// ft-lb/min per horsepower used by the drive sizing rule
pub const HORSEPOWER_DIVISOR: f64 = 28000.0;

/// One run of the belt path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeltSection {
    pub name: &'static str,
    pub distance_ft: f64,
    pub parts_per_ft: f64,
    pub lb_per_part: f64,
}

impl BeltSection {
    pub fn force(&self) -> f64 {
        self.parts_per_ft * self.lb_per_part
    }
}

/// Fixed belt path of the reference conveyor
pub const BELT_SECTIONS: [BeltSection; 3] = [
    BeltSection {
        name: "Incline",
        distance_ft: 7.82,
        parts_per_ft: 1.0,
        lb_per_part: 20.0,
    },
    BeltSection {
        name: "Curve",
        distance_ft: 1.5,
        parts_per_ft: 1.0,
        lb_per_part: 20.0,
    },
    BeltSection {
        name: "Horiz",
        distance_ft: 7.8,
        parts_per_ft: 14.0,
        lb_per_part: 20.0,
    },
];

/// Input parameters for belt horsepower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltHorsepowerInput {
    /// Belt speed in FPM
    pub belt_speed: f64,
    /// Part feed rate (parts/min)
    pub part_feed_rate: f64,
    /// Belt width in inches
    pub belt_width: f64,
    /// Incline angle in degrees
    pub incline_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltHorsepowerResult {
    /// Tabulated angle the coefficient was taken from
    pub coefficient_angle: u32,
    pub incline_coefficient: f64,
    /// ft
    pub belt_length: f64,
    /// lb
    pub total_force: f64,
    /// lb
    pub calculated_force: f64,
    /// T_E, lb
    pub effective_tension: f64,
    /// T_2, lb
    pub slack_tension: f64,
    /// T_1, lb
    pub tight_tension: f64,
    pub horsepower: f64,
}

pub fn validate(input: &BeltHorsepowerInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("Belt speed", input.belt_speed, 1000.0)
        .positive("Part feed rate", input.part_feed_rate)
        .positive_up_to("Belt width", input.belt_width, 100.0)
        .within("Incline angle", input.incline_angle, 0.0, 90.0);
    report
}

pub fn calculate(input: &BeltHorsepowerInput) -> CalcResult<BeltHorsepowerResult> {
    evaluate::<BeltHorsepower>(input)
}

/// Sum of section loads, lb
pub fn total_section_force() -> f64 {
    BELT_SECTIONS.iter().map(BeltSection::force).sum()
}

/// Length of the belt path, ft
pub fn belt_path_length() -> f64 {
    BELT_SECTIONS.iter().map(|section| section.distance_ft).sum()
}

fn horsepower(effective_tension: f64, belt_speed: f64) -> f64 {
    effective_tension * belt_speed / HORSEPOWER_DIVISOR
}

fn compute(input: &BeltHorsepowerInput) -> CalcResult<BeltHorsepowerResult> {
    let (coefficient_angle, cvf) = INCLINE_COEFFICIENTS.lookup_nearest(input.incline_angle)?;

    let total_force = total_section_force();
    let calculated_force = total_force * cvf;

    let effective_tension = calculated_force;
    let slack_tension = effective_tension * SLACK_TENSION_RATIO;
    let tight_tension = effective_tension + slack_tension;

    Ok(BeltHorsepowerResult {
        coefficient_angle,
        incline_coefficient: *cvf,
        belt_length: belt_path_length(),
        total_force,
        calculated_force,
        effective_tension,
        slack_tension,
        tight_tension,
        horsepower: horsepower(effective_tension, input.belt_speed),
    })
}

fn chart(input: &BeltHorsepowerInput, output: &BeltHorsepowerResult) -> CalcResult<ChartSpec> {
    let mut rows: Vec<(u32, f64)> = INCLINE_COEFFICIENTS.entries().to_vec();
    rows.sort_by_key(|(angle, _)| *angle);

    let total_force = total_section_force();
    let x: Vec<AxisValue> = rows.iter().map(|(angle, _)| (*angle).into()).collect();
    let y = rows
        .iter()
        .map(|(_, cvf)| horsepower(total_force * cvf, input.belt_speed))
        .collect();

    let bars = Series::bar("Horsepower", x, y);
    let selected = HighlightPoint::selected(input.incline_angle, output.horsepower);
    build_chart(BeltHorsepower::ID, vec![bars], Some(selected))
}

fn recommendations(input: &BeltHorsepowerInput, output: &BeltHorsepowerResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.horsepower < 1.0 {
        notes.push("Low power requirement. Standard motor should be sufficient.");
    } else if output.horsepower > 10.0 {
        notes.push("High power requirement. Consider energy efficiency measures.");
    }

    if input.belt_speed < 50.0 {
        notes.push("Low belt speed may cause material spillage or poor conveying.");
    } else if input.belt_speed > 800.0 {
        notes.push("High belt speed. Check for excessive wear and material degradation.");
    }

    if input.incline_angle > 20.0 {
        notes.push("Steep incline. Consider cleats or textured belt for better grip.");
    }

    if output.tight_tension > 1000.0 {
        notes.push("High belt tension. Verify belt and pulley specifications.");
    }

    notes.into_iter().map(String::from).collect()
}

pub struct BeltHorsepower;

impl Calculation for BeltHorsepower {
    type Input = BeltHorsepowerInput;
    type Output = BeltHorsepowerResult;

    const ID: &'static str = "belt_horsepower";
    const NAME: &'static str = "Belt Horsepower Calculator";
    const CATEGORY: &'static str = "Conveyor Systems";
    const DESCRIPTION: &'static str = "Calculate power requirements for belt conveyor systems";
    const FORMULA: &'static str = "T_E = Σ(parts/ft × lb/part) × Cv(angle); HP = T_E × FPM ÷ 28000";

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
