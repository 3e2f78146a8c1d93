use num_traits::Float;
use std::ops::{Add, Mul, Sub};

/// Blends two values; `alpha = 0` returns `a` and `alpha = 1` returns `b`.
pub trait Interpolator<T, V>
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V;
}

/// Pairs an input (query) with the output value produced there.
#[derive(Clone, Copy, Debug)]
pub struct InterpolationKeyframe<T, V> {
    pub input: T,
    pub output: V,
}

/**
 * Piecewise interpolation between keyframes on the unit interval. Queries
 * outside of `[0, 1]` are held at the first or last keyframe.
 */
pub struct KeyframeInterpolator<T, V, F>
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    queries: Vec<T>,
    values: Vec<V>,
    interpolator: F,
}

impl<T, V, F> KeyframeInterpolator<T, V, F>
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    /// Keyframe inputs must start at 0, end at 1 and be strictly increasing.
    /// See `validate_keyframe_queries` for a non-panicking check.
    pub fn new(keyframes: Vec<InterpolationKeyframe<T, V>>, interpolator: F) -> Self {
        let queries: Vec<T> = keyframes.iter().map(|k| k.input).collect();
        if let Err(message) = validate_keyframe_queries(&queries) {
            panic!("{}", message);
        }
        let values = keyframes.iter().map(|k| k.output).collect();

        Self {
            queries,
            values,
            interpolator,
        }
    }

    pub fn evaluate(&self, query: T) -> V {
        let last = self.values.len() - 1;
        if query <= T::zero() {
            self.values[0]
        } else if query >= T::one() {
            self.values[last]
        } else {
            let idx_upp = self.queries.partition_point(|q| query >= *q).min(last);
            let idx_low = idx_upp - 1;
            let val_low = self.queries[idx_low];
            let alpha = (query - val_low) / (self.queries[idx_upp] - val_low);
            self.interpolator
                .interpolate(alpha, &self.values[idx_low], &self.values[idx_upp])
        }
    }
}

pub fn validate_keyframe_queries<T: Float>(queries: &[T]) -> Result<(), String> {
    match (queries.first(), queries.last()) {
        (Some(first), Some(last)) => {
            if *first != T::zero() {
                return Err("first keyframe input must be 0.0".to_owned());
            }
            if *last != T::one() {
                return Err("last keyframe input must be 1.0".to_owned());
            }
        }
        _ => return Err("keyframes must not be empty".to_owned()),
    }
    if queries.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err("keyframes must be strictly increasing".to_owned());
    }
    Ok(())
}

/// Linear interpolation: a * (1 - alpha) + b * alpha
#[derive(Default, Clone, Copy, Debug)]
pub struct LinearInterpolator;

impl<T, V> Interpolator<T, V> for LinearInterpolator
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V {
        *a + (*b - *a) * alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn keyframe(input: f32, output: f32) -> InterpolationKeyframe<f32, f32> {
        InterpolationKeyframe { input, output }
    }

    #[test]
    fn test_piecewise_linear() {
        let interpolator = KeyframeInterpolator::new(
            vec![keyframe(0.0, 0.0), keyframe(0.5, 10.0), keyframe(1.0, 0.0)],
            LinearInterpolator,
        );
        let tol = 1e-6;
        assert_relative_eq!(interpolator.evaluate(0.25), 5.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(0.5), 10.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(0.75), 5.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(-3.0), 0.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(3.0), 0.0, epsilon = tol);
    }

    #[test]
    fn test_validate_keyframe_queries() {
        assert!(validate_keyframe_queries::<f32>(&[0.0, 1.0]).is_ok());
        assert!(validate_keyframe_queries::<f32>(&[]).is_err());
        assert!(validate_keyframe_queries::<f32>(&[0.1, 1.0]).is_err());
        assert!(validate_keyframe_queries::<f32>(&[0.0, 0.9]).is_err());
        assert!(validate_keyframe_queries::<f32>(&[0.0, 0.6, 0.6, 1.0]).is_err());
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn test_new_rejects_unordered_keyframes() {
        KeyframeInterpolator::new(
            vec![keyframe(0.0, 0.0), keyframe(0.7, 1.0), keyframe(0.3, 1.0), keyframe(1.0, 0.0)],
            LinearInterpolator,
        );
    }
}
