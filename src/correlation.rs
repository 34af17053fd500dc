//! Pairwise Pearson correlation over every numeric column of the dataset.

use crate::dataset::{Dataset, NumericColumn};
use serde::Serialize;

/// Square correlation matrix. `values[i][j]` is the coefficient of `columns[i]`
/// against `columns[j]`; undefined coefficients are `NaN` (serialised as `null`).
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_columns(dataset.numeric_columns())
    }

    pub fn from_columns(columns: &[NumericColumn]) -> Self {
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];

        // Symmetric, so only the upper triangle is computed.
        for i in 0..n {
            for j in i..n {
                let r = pearson_correlation(&columns[i].values, &columns[j].values);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            columns: columns.iter().map(|c| c.name.clone()).collect(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pearson correlation coefficient over the pairs where both values are present.
///
/// Returns `NaN` when fewer than two complete pairs remain or either side has zero
/// variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        f64::NAN
    } else {
        // Clamp rounding noise so a column against itself is exactly 1.
        (cov / denominator).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: &[f64]) -> NumericColumn {
        NumericColumn {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }

    fn coefficient(matrix: &CorrelationMatrix, a: &str, b: &str) -> Option<f64> {
        let i = matrix.columns.iter().position(|c| c == a)?;
        let j = matrix.columns.iter().position(|c| c == b)?;
        Some(matrix.values[i][j])
    }

    #[test]
    fn test_pearson_correlation_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&x, &y);
        assert!((r + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_skips_missing_pairs() {
        let x = vec![1.0, f64::NAN, 3.0, 4.0];
        let y = vec![2.0, 100.0, 6.0, 8.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert!(pearson_correlation(&[1.0], &[1.0]).is_nan());
        assert!(pearson_correlation(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let matrix = CorrelationMatrix::from_columns(&[
            column("hr", &[0.0, 6.0, 12.0, 18.0]),
            column("cnt_y", &[5.0, 40.0, 120.0, 90.0]),
            column("temp_y", &[0.2, 0.3, 0.6, 0.4]),
        ]);

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
        assert_eq!(
            coefficient(&matrix, "hr", "cnt_y"),
            coefficient(&matrix, "cnt_y", "hr")
        );
        assert!(coefficient(&matrix, "hr", "missing").is_none());
    }

    #[test]
    fn test_undefined_coefficient_serialises_as_null() {
        let matrix = CorrelationMatrix::from_columns(&[column("constant", &[1.0, 1.0])]);
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, r#"{"columns":["constant"],"values":[[null]]}"#);
    }
}
