//! # Drag Slide Dimensions
//!
//! Overall dimensions of a drag slide from its X and Y offsets, for the
//! magnet and non-magnet configurations. Both configurations share the
//! straight-line diagonal `d = √(x² + y²)` and add fixed allowances.
//!
//! Dimensions are returned in whatever length unit X and Y were given in.

use serde::{Deserialize, Serialize};

use crate::calculations::{evaluate, Calculation};
use crate::errors::CalcResult;
use crate::validation::ValidationReport;

/// Fixed allowances added to the diagonal for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideAllowance {
    pub a: f64,
    pub b_offset: f64,
    pub oal_offset: f64,
}

pub const WITH_MAGNET: SlideAllowance = SlideAllowance {
    a: 82.0,
    b_offset: 28.0,
    oal_offset: 101.44,
};

pub const WITHOUT_MAGNET: SlideAllowance = SlideAllowance {
    a: 82.0,
    b_offset: 13.0,
    oal_offset: 80.34,
};

const MAX_OFFSET: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSlideInput {
    pub x_value: f64,
    pub y_value: f64,
}

/// A, B and overall length for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideDimensions {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "OAL")]
    pub oal: f64,
}

impl SlideAllowance {
    pub fn dimensions(&self, diagonal: f64) -> SlideDimensions {
        SlideDimensions {
            a: self.a,
            b: diagonal + self.b_offset,
            oal: diagonal + self.oal_offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSlideResult {
    pub diagonal: f64,
    pub with_magnet: SlideDimensions,
    pub without_magnet: SlideDimensions,
}

pub fn validate(input: &DragSlideInput) -> ValidationReport {
    let mut report = ValidationReport::new();
    report
        .positive_up_to("X value", input.x_value, MAX_OFFSET)
        .positive_up_to("Y value", input.y_value, MAX_OFFSET);
    report
}

pub fn calculate(input: &DragSlideInput) -> CalcResult<DragSlideResult> {
    evaluate::<DragSlide>(input)
}

fn compute(input: &DragSlideInput) -> DragSlideResult {
    let diagonal = input.x_value.hypot(input.y_value);
    DragSlideResult {
        diagonal,
        with_magnet: WITH_MAGNET.dimensions(diagonal),
        without_magnet: WITHOUT_MAGNET.dimensions(diagonal),
    }
}

fn recommendations(input: &DragSlideInput, output: &DragSlideResult) -> Vec<String> {
    let mut notes = Vec::new();

    if output.diagonal < 50.0 {
        notes.push("Compact design suitable for tight spaces.".to_string());
    } else if output.diagonal > 200.0 {
        notes.push("Large dimensions. Consider structural support requirements.".to_string());
    }

    let added = output.with_magnet.oal - output.without_magnet.oal;
    notes.push(format!("Magnet configuration adds {:.1} units to overall length.", added));

    if input.x_value > input.y_value * 2.0 {
        notes.push("High aspect ratio. Consider material flow characteristics.".to_string());
    }

    notes
}

pub struct DragSlide;

impl Calculation for DragSlide {
    type Input = DragSlideInput;
    type Output = DragSlideResult;

    const ID: &'static str = "drag_slide";
    const NAME: &'static str = "Drag Slide Calculator";
    const CATEGORY: &'static str = "Magnetic Systems";
    const DESCRIPTION: &'static str = "Calculate drag slide dimensions with and without magnetic components";
    const FORMULA: &'static str = "d = √(x² + y²); magnet: B = d + 28, OAL = d + 101.44; none: B = d + 13, OAL = d + 80.34";

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
