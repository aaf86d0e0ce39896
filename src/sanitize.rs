//! Replacement of non-finite values (NaN, ±infinity) with finite substitutes.

use num_traits::Float;

/// Finite substitutes for non-finite values.
///
/// The default replaces NaN and both infinities with `0.0`, so a missing value and a
/// zero are indistinguishable after sanitization and a single infinite value can't
/// swamp the rest of a plot. A `None` infinity substitute maps `+inf` to the largest
/// finite value of the float type and `-inf` to the lowest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sanitizer {
    pub nan: f64,
    pub posinf: Option<f64>,
    pub neginf: Option<f64>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            nan: 0.0,
            posinf: Some(0.0),
            neginf: Some(0.0),
        }
    }
}

impl Sanitizer {
    pub fn new(nan: f64, posinf: Option<f64>, neginf: Option<f64>) -> Self {
        Self {
            nan,
            posinf,
            neginf,
        }
    }

    /// The finite substitute for a single value; finite values are returned unchanged.
    pub fn value<T: Float>(&self, x: T) -> T {
        if x.is_finite() {
            return x;
        }
        if x.is_nan() {
            return T::from(self.nan).unwrap_or_else(T::zero);
        }
        if x.is_sign_positive() {
            self.posinf
                .and_then(T::from)
                .filter(|x| x.is_finite())
                .unwrap_or_else(T::max_value)
        } else {
            self.neginf
                .and_then(T::from)
                .filter(|x| x.is_finite())
                .unwrap_or_else(T::min_value)
        }
    }

    /// Sanitize `values` in place.
    pub fn apply<T: Float>(&self, values: &mut [T]) {
        for x in values.iter_mut() {
            *x = self.value(*x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sanitizer() {
        let mut values = vec![1.0_f32, f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -2.5];
        Sanitizer::default().apply(&mut values);
        assert_eq!(values, vec![1.0, 0.0, 0.0, 0.0, -2.5]);
    }

    #[test]
    fn test_unbounded_substitutes() {
        let mut values = vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY];
        Sanitizer::new(0.0, None, None).apply(&mut values);
        assert_eq!(values, vec![0.0, f32::MAX, f32::MIN]);
        assert!(values.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_custom_substitutes() {
        let sanitizer = Sanitizer::new(-1.0, Some(100.0), Some(-100.0));
        let mut values = vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 3.0];
        sanitizer.apply(&mut values);
        assert_eq!(values, vec![-1.0, 100.0, -100.0, 3.0]);
    }

    #[test]
    fn test_out_of_range_substitute_stays_finite() {
        // 1e300 does not fit in an f32, so it can't be the +inf substitute
        let sanitizer = Sanitizer::new(0.0, Some(1e300), None);
        assert_eq!(sanitizer.value(f32::INFINITY), f32::MAX);
    }
}
