// Effect size and Welch's two-sample significance test
//
// Welch's t-test handles unequal variances between the two completion
// datasets. Cohen's d uses the pooled standard deviation. The confidence
// interval always uses z = 1.96, it does not adapt to small-sample df.

use super::descriptive::descriptive_stats;
use super::{Result, StatsError};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Critical value for the 95% confidence interval of the mean difference
const Z_CRITICAL_95: f64 = 1.96;

/// Critical |t| values and the p-value bucket returned below each one
const P_VALUE_BUCKETS: [(f64, f64); 8] = [
    (0.674, 1.0),
    (1.282, 0.2),
    (1.645, 0.1),
    (1.960, 0.05),
    (2.326, 0.02),
    (2.576, 0.01),
    (3.090, 0.002),
    (3.291, 0.001),
];

/// p-value returned when |t| exceeds every critical value in the table
const P_VALUE_FLOOR: f64 = 0.0001;

/// How the p-value of a Welch test is derived from the test statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    /// Discrete lookup over normal critical values
    Bucketed,
    /// Two-tailed Student's t distribution with Welch df
    #[default]
    StudentT,
}

/// Result of Welch's two-sample t-test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelchTest {
    /// t-statistic of mean(a) - mean(b)
    pub statistic: f64,

    /// Two-tailed p-value, derived per [`PValueMethod`]
    pub p_value: f64,

    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,

    /// Cohen's d (pooled standard deviation)
    pub effect_size: f64,

    /// 95% confidence interval of the mean difference
    pub confidence_interval: (f64, f64),

    pub method: PValueMethod,
}

/// Cohen's d from summary statistics
///
/// Returns 0.0 when the pooled standard deviation is zero.
pub fn cohens_d(mean1: f64, mean2: f64, std1: f64, std2: f64, n1: usize, n2: usize) -> f64 {
    let (n1, n2) = (n1 as f64, n2 as f64);
    let pooled_std =
        (((n1 - 1.0) * std1 * std1 + (n2 - 1.0) * std2 * std2) / (n1 + n2 - 2.0)).sqrt();

    if pooled_std > 0.0 {
        (mean1 - mean2) / pooled_std
    } else {
        0.0
    }
}

/// Map |t| onto the fixed p-value bucket table
///
/// # Example
/// ```
/// use comparo::statistics::bucketed_p_value;
///
/// assert_eq!(bucketed_p_value(0.5), 1.0);
/// assert_eq!(bucketed_p_value(-2.0), 0.02);
/// assert_eq!(bucketed_p_value(10.0), 0.0001);
/// ```
pub fn bucketed_p_value(statistic: f64) -> f64 {
    let t = statistic.abs();
    P_VALUE_BUCKETS
        .iter()
        .find(|(critical, _)| t < *critical)
        .map(|(_, p)| *p)
        .unwrap_or(P_VALUE_FLOOR)
}

/// Welch's t-test using the default p-value method (Student's t)
///
/// # Errors
/// [`StatsError::InsufficientSampleSize`] when either sample has fewer than 2
/// observations.
///
/// # Example
/// ```
/// use comparo::statistics::welch_t_test;
///
/// let a = [10.0, 12.0, 11.0, 13.0, 10.0];
/// let b = [25.0, 27.0, 26.0, 28.0, 25.0];
/// let test = welch_t_test(&a, &b).unwrap();
/// assert!(test.statistic < 0.0);
/// assert!(test.effect_size < -0.8);
/// ```
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTest> {
    welch_t_test_with(a, b, PValueMethod::default())
}

/// Welch's t-test with an explicit p-value method
pub fn welch_t_test_with(a: &[f64], b: &[f64], method: PValueMethod) -> Result<WelchTest> {
    let smallest = a.len().min(b.len());
    if smallest < 2 {
        return Err(StatsError::InsufficientSampleSize {
            required: 2,
            actual: smallest,
        });
    }

    let stats1 = descriptive_stats(a);
    let stats2 = descriptive_stats(b);
    let (n1, n2) = (a.len() as f64, b.len() as f64);

    let mean_diff = stats1.mean - stats2.mean;
    let v1 = stats1.variance / n1;
    let v2 = stats2.variance / n2;
    let se = (v1 + v2).sqrt();

    let statistic = if se > 0.0 {
        mean_diff / se
    } else if mean_diff == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(mean_diff)
    };

    let df_denominator = v1.powi(2) / (n1 - 1.0) + v2.powi(2) / (n2 - 1.0);
    let degrees_of_freedom = if df_denominator > 0.0 {
        (v1 + v2).powi(2) / df_denominator
    } else {
        n1 + n2 - 2.0
    };

    let p_value = match method {
        PValueMethod::Bucketed => bucketed_p_value(statistic),
        PValueMethod::StudentT => student_t_p_value(statistic, degrees_of_freedom),
    };

    let effect_size = cohens_d(
        stats1.mean,
        stats2.mean,
        stats1.std,
        stats2.std,
        a.len(),
        b.len(),
    );

    let margin = Z_CRITICAL_95 * se;

    Ok(WelchTest {
        statistic,
        p_value,
        degrees_of_freedom,
        effect_size,
        confidence_interval: (mean_diff - margin, mean_diff + margin),
        method,
    })
}

/// Two-tailed p-value of `statistic` under Student's t with `degrees_of_freedom`
///
/// Infinite statistics (zero standard error, different means) give 0. Falls
/// back to the bucket table when the distribution cannot be built, which
/// happens for non-positive or NaN degrees of freedom.
///
/// # Example
/// ```
/// use comparo::statistics::student_t_p_value;
///
/// let p = student_t_p_value(2.7775, 10.0);
/// assert!((p - 0.0195).abs() < 1e-3);
/// ```
pub fn student_t_p_value(statistic: f64, degrees_of_freedom: f64) -> f64 {
    if statistic.is_nan() {
        tracing::warn!("t statistic is NaN, using bucketed table");
        return bucketed_p_value(statistic);
    }
    if statistic.is_infinite() {
        return 0.0;
    }

    match StudentsT::new(0.0, 1.0, degrees_of_freedom) {
        Ok(dist) => (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0),
        Err(e) => {
            tracing::warn!(
                "Student's t distribution unavailable for df={}: {}, using bucketed table",
                degrees_of_freedom,
                e
            );
            bucketed_p_value(statistic)
        }
    }
}
