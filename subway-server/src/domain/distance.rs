//! Section length type.

use std::fmt;

/// Error returned when a distance would be zero, negative or out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance: {reason}")]
pub struct InvalidDistance {
    reason: &'static str,
}

/// The length of a section between two adjacent stations.
///
/// A `Distance` is always strictly positive. Arithmetic is checked: a
/// subtraction that would leave nothing (or less) and an addition that would
/// overflow both fail instead of clamping.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let ten = Distance::new(10).unwrap();
/// let three = Distance::new(3).unwrap();
/// assert_eq!(ten.minus(three).unwrap().value(), 7);
///
/// // A split can never produce an empty remainder
/// assert!(ten.minus(ten).is_err());
///
/// // Zero and negative lengths are rejected
/// assert!(Distance::new(0).is_err());
/// assert!(Distance::new(-4).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(u32);

impl Distance {
    /// Create a distance from a raw magnitude.
    ///
    /// The value must be at least 1 and fit in a `u32`.
    pub fn new(value: i64) -> Result<Self, InvalidDistance> {
        if value <= 0 {
            return Err(InvalidDistance {
                reason: "must be greater than zero",
            });
        }
        u32::try_from(value).map(Distance).map_err(|_| InvalidDistance {
            reason: "too large",
        })
    }

    /// Returns the magnitude.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Subtract `other`, failing unless `self` is strictly longer.
    ///
    /// This is what rejects a section that is at least as long as the
    /// section it would split.
    pub fn minus(self, other: Distance) -> Result<Distance, InvalidDistance> {
        match self.0.checked_sub(other.0) {
            Some(rest) if rest > 0 => Ok(Distance(rest)),
            _ => Err(InvalidDistance {
                reason: "must be shorter than the section being split",
            }),
        }
    }

    /// Add `other`, failing on overflow.
    pub fn plus(self, other: Distance) -> Result<Distance, InvalidDistance> {
        self.0
            .checked_add(other.0)
            .map(Distance)
            .ok_or(InvalidDistance { reason: "too large" })
    }
}

impl TryFrom<i64> for Distance {
    type Error = InvalidDistance;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Distance {
        Distance::new(v).unwrap()
    }

    #[test]
    fn new_accepts_positive() {
        assert_eq!(d(1).value(), 1);
        assert_eq!(d(15).value(), 15);
        assert_eq!(d(u32::MAX as i64).value(), u32::MAX);
    }

    #[test]
    fn new_rejects_non_positive() {
        assert!(Distance::new(0).is_err());
        assert!(Distance::new(-1).is_err());
        assert!(Distance::new(i64::MIN).is_err());
    }

    #[test]
    fn new_rejects_too_large() {
        let err = Distance::new(u32::MAX as i64 + 1).unwrap_err();
        assert_eq!(err.to_string(), "invalid distance: too large");
    }

    #[test]
    fn minus_leaves_remainder() {
        assert_eq!(d(10).minus(d(3)).unwrap(), d(7));
        assert_eq!(d(2).minus(d(1)).unwrap(), d(1));
    }

    #[test]
    fn minus_rejects_equal_or_longer() {
        assert!(d(10).minus(d(10)).is_err());
        assert!(d(10).minus(d(13)).is_err());
    }

    #[test]
    fn plus_sums() {
        assert_eq!(d(4).plus(d(6)).unwrap(), d(10));
    }

    #[test]
    fn plus_rejects_overflow() {
        assert!(d(u32::MAX as i64).plus(d(1)).is_err());
    }

    #[test]
    fn try_from_matches_new() {
        assert_eq!(Distance::try_from(5i64).unwrap(), d(5));
        assert!(Distance::try_from(0i64).is_err());
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", d(7)), "7");
        assert_eq!(format!("{:?}", d(7)), "Distance(7)");
    }

    #[test]
    fn error_display() {
        let err = Distance::new(0).unwrap_err();
        assert_eq!(err.to_string(), "invalid distance: must be greater than zero");
    }
}
