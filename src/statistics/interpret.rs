// Conventional interpretation bands for effect sizes and p-values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cohen's conventional effect size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectCategory {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectCategory {
    /// Categorize |d|: < 0.2 negligible, < 0.5 small, < 0.8 medium, else large
    pub fn from_effect_size(effect_size: f64) -> Self {
        let d = effect_size.abs();
        if d < 0.2 {
            Self::Negligible
        } else if d < 0.5 {
            Self::Small
        } else if d < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EffectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describe a p-value relative to significance level `alpha`
pub fn interpret_p_value(p_value: f64, alpha: f64) -> &'static str {
    if p_value < 0.001 {
        "highly significant"
    } else if p_value < 0.01 {
        "very significant"
    } else if p_value < alpha {
        "significant"
    } else if p_value < alpha * 2.0 {
        "marginally significant"
    } else {
        "not significant"
    }
}

/// Coarse statistical power estimate for a two-sample comparison
///
/// Uses the harmonic mean of the sample sizes and buckets the noncentrality
/// into 0.5 / 0.8 / 0.9 / 0.95.
pub fn approximate_power(effect_size: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 0.0;
    }

    let n_harmonic = 2.0 / (1.0 / n1 as f64 + 1.0 / n2 as f64);
    let delta = effect_size.abs() * (n_harmonic / 2.0).sqrt();

    if delta < 1.64 {
        0.5
    } else if delta < 2.49 {
        0.8
    } else if delta < 2.94 {
        0.9
    } else {
        0.95
    }
}
