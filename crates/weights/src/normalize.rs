//! Normalization and fixed-point quantization.

use crate::error::PublishError;

/// Scale `scores` so they sum to `1.0`.
///
/// Fails with [`PublishError::DegenerateScores`] instead of dividing when the
/// sum is not strictly positive.
pub fn normalize(scores: &[f64]) -> Result<Vec<f64>, PublishError> {
    let sum: f64 = scores.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(PublishError::DegenerateScores { sum });
    }
    Ok(scores.iter().map(|score| score / sum).collect())
}

/// Map normalized weights onto `[0, max_weight]` by rounding.
pub fn quantize(weights: &[f64], max_weight: u16) -> Vec<u16> {
    let max = f64::from(max_weight);
    weights
        .iter()
        .map(|weight| (weight * max).round().clamp(0.0, max) as u16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vigil_primitives::MAX_WEIGHT;

    #[test]
    fn test_degenerate_zero_scores() {
        assert_eq!(
            normalize(&[0.0, 0.0, 0.0]),
            Err(PublishError::DegenerateScores { sum: 0.0 })
        );
        assert!(normalize(&[]).is_err());
    }

    #[test]
    fn test_normalize_simple() {
        assert_eq!(normalize(&[1.0, 3.0]).unwrap(), vec![0.25, 0.75]);
    }

    #[test]
    fn test_quantize_bounds() {
        assert_eq!(quantize(&[0.0, 1.0, 0.5], MAX_WEIGHT), vec![0, 65535, 32768]);
        assert_eq!(quantize(&[1.5, -0.1], 100), vec![100, 0]);
    }

    proptest! {
        #[test]
        fn test_normalized_sum_is_one(
            scores in prop::collection::vec(0.0f64..1000.0, 1..128)
                .prop_filter("positive sum", |s| s.iter().sum::<f64>() > 0.0)
        ) {
            let weights = normalize(&scores).unwrap();
            let sum: f64 = weights.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }

        #[test]
        fn test_quantized_sum_near_max(
            scores in prop::collection::vec(0.0f64..1000.0, 1..128)
                .prop_filter("positive sum", |s| s.iter().sum::<f64>() > 0.0),
            max_weight in 1u16..=u16::MAX,
        ) {
            let quantized = quantize(&normalize(&scores).unwrap(), max_weight);
            let total: i64 = quantized.iter().map(|&w| i64::from(w)).sum();
            let n = scores.len() as i64;

            prop_assert_eq!(quantized.len(), scores.len());
            prop_assert!(quantized.iter().all(|&w| w <= max_weight));
            prop_assert!((total - i64::from(max_weight)).abs() <= n);
        }
    }
}
