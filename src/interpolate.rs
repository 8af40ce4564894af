//! Piecewise-linear interpolation with a fixed fill value outside the sampled domain.

/// A piecewise-linear function through a set of sample points.
///
/// Between two neighbouring samples the value is linearly interpolated.
/// Outside the inclusive range `[xs[0], xs[n - 1]]`, and for non-finite inputs,
/// [LinearInterpolator::eval] returns the configured fill value instead of extrapolating.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    fill: f64,
}

impl LinearInterpolator {
    /// Builds an interpolator from sample positions and values.
    ///
    /// Returns `None` if fewer than two samples are given, if the lengths differ,
    /// or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, fill: f64) -> Option<Self> {
        if xs.len() < 2 || xs.len() != ys.len() {
            return None;
        }

        if xs.windows(2).any(|w| !(w[1] > w[0])) {
            return None;
        }

        Some(LinearInterpolator { xs, ys, fill })
    }

    /// Inclusive range of sample positions.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn fill(&self) -> f64 {
        self.fill
    }

    /// Evaluates the function at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let (lo, hi) = self.domain();

        // NaN fails both comparisons
        if !(x >= lo && x <= hi) {
            return self.fill;
        }

        let i = find_interval(&self.xs, x);
        let x0 = self.xs[i];
        let x1 = self.xs[i + 1];
        let t = (x - x0) / (x1 - x0);

        self.ys[i] + t * (self.ys[i + 1] - self.ys[i])
    }
}

/// Index `i` of the interval `[values[i], values[i + 1]]` that contains `x`,
/// clamped to the last interval.
fn find_interval(values: &[f64], x: f64) -> usize {
    let mut left = 0;
    let last_interval = values.len() - 2;
    let mut size = last_interval;

    while size > 0 {
        let half = size >> 1;
        let middle = left + half + 1;

        if values[middle] <= x {
            left = middle;
            size -= half + 1;
        } else {
            size = half;
        }
    }

    left.min(last_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp() -> LinearInterpolator {
        LinearInterpolator::new(vec![0.0, 1.0, 2.0, 4.0], vec![0.0, 10.0, 20.0, 0.0], -1.0)
            .unwrap()
    }

    #[test]
    fn interpolates_between_samples() {
        let f = ramp();
        assert_abs_diff_eq!(f.eval(0.5), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.eval(1.25), 12.5, epsilon = 1e-12);
        assert_abs_diff_eq!(f.eval(3.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn hits_samples_exactly() {
        let f = ramp();
        for (x, y) in [(0.0, 0.0), (1.0, 10.0), (2.0, 20.0), (4.0, 0.0)] {
            assert_abs_diff_eq!(f.eval(x), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn fills_outside_domain() {
        let f = ramp();
        assert_eq!(f.fill(), -1.0);
        assert_eq!(f.eval(-0.001), -1.0);
        assert_eq!(f.eval(4.001), -1.0);
        assert_eq!(f.eval(f64::NAN), -1.0);
        assert_eq!(f.eval(f64::INFINITY), -1.0);
        assert_eq!(f.eval(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn rejects_bad_samples() {
        assert!(LinearInterpolator::new(vec![0.0], vec![1.0], 0.0).is_none());
        assert!(LinearInterpolator::new(vec![0.0, 1.0], vec![1.0], 0.0).is_none());
        assert!(LinearInterpolator::new(vec![0.0, 0.0], vec![1.0, 2.0], 0.0).is_none());
        assert!(LinearInterpolator::new(vec![1.0, 0.0], vec![1.0, 2.0], 0.0).is_none());
        assert!(LinearInterpolator::new(vec![0.0, f64::NAN], vec![1.0, 2.0], 0.0).is_none());
    }

    #[test]
    fn two_point_domain() {
        let f = LinearInterpolator::new(vec![1.0, 3.0], vec![2.0, 4.0], 0.0).unwrap();
        assert_eq!(f.domain(), (1.0, 3.0));
        assert_abs_diff_eq!(f.eval(2.0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f.eval(3.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn interval_search() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(find_interval(&xs, 0.0), 0);
        assert_eq!(find_interval(&xs, 0.99), 0);
        assert_eq!(find_interval(&xs, 1.0), 1);
        assert_eq!(find_interval(&xs, 3.5), 3);
        assert_eq!(find_interval(&xs, 4.0), 3);
    }
}
