//! Body-mass index, derived from weight and height.
//!
//! BMI is never persisted; it is recomputed whenever both inputs are present.

use serde::Serialize;
use std::fmt;

/// Classification bands for a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiBand {
    /// Classifies a (rounded) BMI value.
    ///
    /// `<18.5` Underweight, `[18.5, 25)` Normal, `[25, 30)` Overweight, `>=30` Obese.
    pub fn classify(value: f64) -> Self {
        if value < 18.5 {
            BmiBand::Underweight
        } else if value < 25.0 {
            BmiBand::Normal
        } else if value < 30.0 {
            BmiBand::Overweight
        } else {
            BmiBand::Obese
        }
    }

    /// Returns the badge label.
    pub fn label(&self) -> &'static str {
        match self {
            BmiBand::Underweight => "Underweight",
            BmiBand::Normal => "Normal",
            BmiBand::Overweight => "Overweight",
            BmiBand::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A BMI value rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bmi(f64);

impl Bmi {
    /// Computes `weight / (height_m)^2`, rounded to 1 decimal.
    ///
    /// Returns `None` unless both inputs are present, finite and positive.
    pub fn compute(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<Self> {
        let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
        let height = height_cm.filter(|h| h.is_finite() && *h > 0.0)?;
        let meters = height / 100.0;
        let raw = weight / (meters * meters);
        Some(Self((raw * 10.0).round() / 10.0))
    }

    /// Returns the rounded value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the classification band.
    pub fn band(&self) -> BmiBand {
        BmiBand::classify(self.0)
    }
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
