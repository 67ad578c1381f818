use thiserror::Error;

/// Default growth slack of the displacement bound.
pub const DEFAULT_EPSILON: f64 = 0.4;
/// Default load factor under which an erase halves the tables.
pub const DEFAULT_DOWNSIZE_THRESHOLD: f32 = 0.2;

/// Rejected tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamsError {
    #[error("epsilon must be finite and greater than zero, got {0}")]
    InvalidEpsilon(f64),
    #[error("downsize threshold must be finite and within [0, 0.5), got {0}")]
    InvalidDownsizeThreshold(f32),
}

/// Construction-time tuning of a cuckoo table.
///
/// `epsilon` controls how fast the displacement bound grows with the number of
/// entries: an insertion gives up after `3 * ceil(log_{1+epsilon}(len)) + 1`
/// rounds and grows the tables instead. `downsize_threshold` is the load factor
/// under which an erase halves the tables; `0.0` disables shrinking.
///
/// # Examples
///
/// ```
/// use cuckoo_map::{CuckooMap, Params};
///
/// let params = Params::new(0.3, 0.2).unwrap();
/// let mut map: CuckooMap<&str, i32> = CuckooMap::with_params(params);
/// map.insert("a", 1);
/// assert_eq!(map.params(), params);
///
/// assert!(Params::new(0.0, 0.2).is_err());
/// assert!(Params::new(0.4, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    epsilon: f64,
    downsize_threshold: f32,
}

impl Params {
    /// Validates and builds a parameter set.
    ///
    /// A threshold of one half or more would shrink the tables to a load
    /// factor above one, which no table can hold.
    pub fn new(epsilon: f64, downsize_threshold: f32) -> Result<Self, ParamsError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ParamsError::InvalidEpsilon(epsilon));
        }
        if !downsize_threshold.is_finite() || !(0.0..0.5).contains(&downsize_threshold) {
            return Err(ParamsError::InvalidDownsizeThreshold(downsize_threshold));
        }
        Ok(Self {
            epsilon,
            downsize_threshold,
        })
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn downsize_threshold(&self) -> f32 {
        self.downsize_threshold
    }
}

impl Default for Params {
    #[inline]
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            downsize_threshold: DEFAULT_DOWNSIZE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Params::default();
        assert_eq!(params.epsilon(), 0.4);
        assert_eq!(params.downsize_threshold(), 0.2);
        assert_eq!(Params::new(0.4, 0.2), Ok(params));
    }

    #[test]
    fn rejects_bad_epsilon() {
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Params::new(eps, 0.2),
                Err(ParamsError::InvalidEpsilon(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_threshold() {
        for threshold in [-0.1, 0.5, 0.9, f32::NAN] {
            assert!(matches!(
                Params::new(0.4, threshold),
                Err(ParamsError::InvalidDownsizeThreshold(_))
            ));
        }
        assert!(Params::new(0.4, 0.0).is_ok());
        assert!(Params::new(0.4, 0.49).is_ok());
    }

    #[test]
    fn error_messages() {
        let err = Params::new(0.0, 0.2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "epsilon must be finite and greater than zero, got 0"
        );
    }
}
