//! Grid-to-finish correlation
//!
//! Quantifies whether starting position predicts finishing position by
//! pooling driver and team result records into one paired sample and
//! computing the Pearson product-moment coefficient over it.

use serde::{Deserialize, Serialize};

use crate::data::Championship;

/// Qualitative bands for a Pearson coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    StrongPositive,
    ModeratePositive,
    Negligible,
    ModerateNegative,
    StrongNegative,
}

impl Strength {
    /// Band a coefficient for presentation.
    pub fn classify(r: f64) -> Self {
        if r > 0.5 {
            Self::StrongPositive
        } else if r > 0.2 {
            Self::ModeratePositive
        } else if r >= -0.2 {
            Self::Negligible
        } else if r >= -0.5 {
            Self::ModerateNegative
        } else {
            Self::StrongNegative
        }
    }

    /// One-line reading of the band
    pub fn label(&self) -> &'static str {
        match self {
            Self::StrongPositive => {
                "Strong positive correlation: a better start strongly indicates a better finish."
            }
            Self::ModeratePositive => {
                "Moderate positive correlation: a better start somewhat indicates a better finish."
            }
            Self::Negligible => {
                "Weak or no correlation: start position has little effect on the finish."
            }
            Self::ModerateNegative => {
                "Moderate negative correlation: a better start somewhat indicates a worse finish."
            }
            Self::StrongNegative => {
                "Strong negative correlation: a better start strongly indicates a worse finish."
            }
        }
    }
}

/// Pooled grid/finish correlation across both result stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridImpact {
    pub coefficient: f64,
    pub strength: Strength,
    pub samples: usize,
}

/// Pearson product-moment coefficient by the sum-based formula.
///
/// A zero denominator (no variance in either sequence, or an empty
/// sample) yields 0 rather than an error.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len()) as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x2: f64 = x.iter().map(|v| v * v).sum();
    let sum_y2: f64 = y.iter().map(|v| v * v).sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Measure how strongly grid position predicts finishing position.
pub fn start_position_impact(data: &Championship) -> GridImpact {
    let mut grid = Vec::new();
    let mut finish = Vec::new();

    for result in data
        .driver_results
        .values()
        .chain(data.team_results.values())
    {
        grid.push(result.grid as f64);
        finish.push(result.position as f64);
    }

    let coefficient = pearson(&grid, &finish);
    GridImpact {
        coefficient,
        strength: Strength::classify(coefficient),
        samples: grid.len(),
    }
}
