//! Generated samples.

/// An ordered, fixed-length sequence of variates.
///
/// Continuous families produce real values; the Poisson family produces
/// non-negative integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// Real-valued sample
    Continuous(Vec<f64>),
    /// Integer-valued sample
    Discrete(Vec<u64>),
}

impl Sample {
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Sample::Continuous(v) => v.len(),
            Sample::Discrete(v) => v.len(),
        }
    }

    /// True when the sample holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for integer samples.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Sample::Discrete(_))
    }

    /// All values widened to `f64`.
    pub fn values_f64(&self) -> Vec<f64> {
        match self {
            Sample::Continuous(v) => v.clone(),
            Sample::Discrete(v) => v.iter().map(|&k| k as f64).collect(),
        }
    }

    /// Smallest value, or `None` for an empty sample.
    pub fn min(&self) -> Option<f64> {
        match self {
            Sample::Continuous(v) => v.iter().copied().reduce(f64::min),
            Sample::Discrete(v) => v.iter().min().map(|&k| k as f64),
        }
    }

    /// Largest value, or `None` for an empty sample.
    pub fn max(&self) -> Option<f64> {
        match self {
            Sample::Continuous(v) => v.iter().copied().reduce(f64::max),
            Sample::Discrete(v) => v.iter().max().map(|&k| k as f64),
        }
    }

    /// Arithmetic mean, or `None` for an empty sample.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = match self {
            Sample::Continuous(v) => v.iter().sum(),
            Sample::Discrete(v) => v.iter().map(|&k| k as f64).sum(),
        };
        Some(sum / self.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous_summary() {
        let s = Sample::Continuous(vec![2.0, -1.0, 5.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.min(), Some(-1.0));
        assert_eq!(s.max(), Some(5.0));
        assert_relative_eq!(s.mean().unwrap(), 2.0);
        assert!(!s.is_discrete());
    }

    #[test]
    fn test_discrete_summary() {
        let s = Sample::Discrete(vec![3, 0, 4, 1]);
        assert_eq!(s.min(), Some(0.0));
        assert_eq!(s.max(), Some(4.0));
        assert_eq!(s.values_f64(), vec![3.0, 0.0, 4.0, 1.0]);
        assert!(s.is_discrete());
    }

    #[test]
    fn test_empty_sample() {
        let s = Sample::Continuous(vec![]);
        assert!(s.is_empty());
        assert_eq!(s.min(), None);
        assert_eq!(s.mean(), None);
    }
}
