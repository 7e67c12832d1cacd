use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

// Seconds from the Unix epoch to 0001-01-01T00:00:00Z.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// A primitive value produced by a nullable wrapper.
///
/// These are the only shapes a [`Valuer`](crate::Valuer) may hand to the
/// validation engine. Narrow integer and float types are widened on the way
/// in, so `i16`, `i32` and `u8` all become [`Scalar::Int`].
///
/// # Examples
///
/// ```
/// use valuer_validate::{Scalar, ScalarKind};
///
/// let s = Scalar::from(42_i32);
/// assert_eq!(s, Scalar::Int(42));
/// assert_eq!(s.kind(), ScalarKind::Int);
/// assert!(!s.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// Signed integer, widened to 64 bits
    Int(i64),
    /// Floating point number, widened to 64 bits
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Point in time, normalized to UTC
    Time(DateTime<Utc>),
}

/// The kind of a [`Scalar`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `Scalar::Bool`
    Bool,
    /// `Scalar::Int`
    Int,
    /// `Scalar::Float`
    Float,
    /// `Scalar::Text`
    Text,
    /// `Scalar::Bytes`
    Bytes,
    /// `Scalar::Time`
    Time,
}

impl Scalar {
    /// Returns the kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Text(_) => ScalarKind::Text,
            Scalar::Bytes(_) => ScalarKind::Bytes,
            Scalar::Time(_) => ScalarKind::Time,
        }
    }

    /// Returns `true` when the scalar holds its kind's zero value.
    ///
    /// `false`, `0`, `0.0`, the empty string, empty bytes and
    /// `0001-01-01T00:00:00Z` (the zero time of Go's `time.Time`) are zero.
    /// Rules such as `required` and `omitempty` treat a zero value the same
    /// way they treat an absent one.
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Bool(b) => !*b,
            Scalar::Int(n) => *n == 0,
            Scalar::Float(f) => *f == 0.0,
            Scalar::Text(s) => s.is_empty(),
            Scalar::Bytes(b) => b.is_empty(),
            Scalar::Time(t) => {
                t.timestamp() == ZERO_TIME_SECS && t.timestamp_subsec_nanos() == 0
            }
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Bytes => write!(f, "bytes"),
            Self::Time => write!(f, "time"),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Bytes(b) => write!(f, "{:?}", b),
            Scalar::Time(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i16> for Scalar {
    fn from(value: i16) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Bytes(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Time(value)
    }
}

// Timestamps without a zone are read as UTC.
impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Scalar::Time(value.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn narrow_integers_widen_to_int() {
        assert_eq!(Scalar::from(7_u8), Scalar::Int(7));
        assert_eq!(Scalar::from(-7_i16), Scalar::Int(-7));
        assert_eq!(Scalar::from(70_000_i32), Scalar::Int(70_000));
        assert_eq!(Scalar::from(1.5_f32), Scalar::Float(1.5));
    }

    #[test]
    fn zero_values() {
        assert!(Scalar::Bool(false).is_zero());
        assert!(Scalar::Int(0).is_zero());
        assert!(Scalar::Float(0.0).is_zero());
        assert!(Scalar::Text(String::new()).is_zero());
        assert!(Scalar::Bytes(Vec::new()).is_zero());
        assert!(Scalar::Time(Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap()).is_zero());

        assert!(!Scalar::Bool(true).is_zero());
        assert!(!Scalar::Text("x".into()).is_zero());
        assert!(!Scalar::Time(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()).is_zero());
    }

    #[test]
    fn unix_epoch_is_not_zero_time() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let just_after_zero = Utc.timestamp_opt(ZERO_TIME_SECS, 1).unwrap();

        assert!(!Scalar::Time(epoch).is_zero());
        assert!(!Scalar::Time(just_after_zero).is_zero());
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(Scalar::from(naive), Scalar::Time(expected));
    }

    #[test]
    fn kind_display() {
        assert_eq!(Scalar::from("abc").kind().to_string(), "text");
        assert_eq!(Scalar::from(true).kind().to_string(), "bool");
    }
}
