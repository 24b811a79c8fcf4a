//! Summary statistics for a single parsed series.

use crate::aggregation::types::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub name: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Computes mean, min, max and the Bessel-corrected sample standard
    /// deviation of the series values.
    ///
    /// A single-point series reports its value for mean/min/max and a
    /// deviation of zero, since the `n - 1` denominator is undefined.
    pub fn summarize(series: &Series) -> Self {
        let values: Vec<f64> = series.points().iter().map(|p| p.value).collect();

        if values.len() == 1 {
            let v = values[0];
            return SeriesStats {
                name: series.name().to_string(),
                mean: v,
                min: v,
                max: v,
                std_dev: 0.0,
            };
        }

        if values.is_empty() {
            return SeriesStats {
                name: series.name().to_string(),
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                std_dev: 0.0,
            };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = mean(&values);

        SeriesStats {
            name: series.name().to_string(),
            mean,
            min,
            max,
            std_dev: sample_stddev(&values, mean),
        }
    }
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample standard deviation given a pre-computed mean.
/// Returns 0.0 when fewer than two values are given.
pub fn sample_stddev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::types::{Point, Series};

    fn series_of(values: &[f64]) -> Series {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| Point {
                time_offset: i as f64 * 1000.0,
                value: *v,
            })
            .collect();
        Series::new("run_1", points)
    }

    #[test]
    fn test_single_point_series() {
        let stats = SeriesStats::summarize(&series_of(&[42.5]));

        assert_eq!(stats.mean, 42.5);
        assert_eq!(stats.min, 42.5);
        assert_eq!(stats.max, 42.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.name, "run_1");
    }

    #[test]
    fn test_constant_series_has_zero_deviation() {
        let stats = SeriesStats::summarize(&series_of(&[7.0, 7.0, 7.0, 7.0]));

        assert_eq!(stats.mean, 7.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_one_to_five() {
        let stats = SeriesStats::summarize(&series_of(&[1.0, 2.0, 3.0, 4.0, 5.0]));

        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.std_dev - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_values() {
        let stats = SeriesStats::summarize(&series_of(&[-3.0, 1.0, -1.0]));

        assert_eq!(stats.min, -3.0);
        assert_eq!(stats.max, 1.0);
        assert!((stats.mean - -1.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_stddev_uses_bessel_correction() {
        // Population deviation of [2, 4] is 1; sample deviation is sqrt(2).
        let sd = sample_stddev(&[2.0, 4.0], 3.0);
        assert!((sd - 2f64.sqrt()).abs() < 1e-12);
    }
}
