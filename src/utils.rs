/// Returns `Σ (actual_i - expected_i)²`
pub(crate) fn squared_error(actual: &[f64], expected: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), expected.len());

    actual
        .iter()
        .zip(expected)
        .map(|(actual, expected)| (actual - expected) * (actual - expected))
        .sum()
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_approx {
    ( $left:expr, $right:expr, $epsilon:expr ) => {
        let left = $left;
        let right = $right;
        if ((left - right) as f64).abs() >= $epsilon as f64 {
            panic!("Expected {} to be approximately equal to {}", left, right);
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_squared_error() {
        assert_eq!(squared_error(&[1.0, 0.5], &[0.0, 1.0]), 1.25);
        assert_eq!(squared_error(&[], &[]), 0.0);
    }
}
