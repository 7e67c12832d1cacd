//! `database/sql`-style nullable values: a value plus a validity flag.

use std::any::Any;

use chrono::{DateTime, Utc};

use crate::{Reflect, Scalar, Valuer, ValuerError};

/// A value that may be null, in the style of `database/sql`.
///
/// `valid == false` means null; `value` then holds whatever default it was
/// created with and is never read.
///
/// # Examples
///
/// ```
/// use valuer_validate::{Scalar, Valuer};
/// use valuer_validate::wrappers::sql::NullString;
///
/// let name = NullString::new("Ada".to_string(), true);
/// assert_eq!(name.value().unwrap(), Some(Scalar::Text("Ada".into())));
///
/// let missing = NullString::default();
/// assert_eq!(missing.value().unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Null<T> {
    /// Wrapped value, meaningful only when `valid`
    pub value: T,
    /// Whether `value` is present
    pub valid: bool,
}

impl<T> Null<T> {
    /// Creates a wrapper with an explicit validity flag.
    pub fn new(value: T, valid: bool) -> Self {
        Self { value, valid }
    }

    /// Creates a present value.
    pub fn present(value: T) -> Self {
        Self::new(value, true)
    }

    /// Returns the value when present.
    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }
}

impl<T: Default> Null<T> {
    /// Creates a null value.
    pub fn null() -> Self {
        Self::default()
    }
}

impl<T> From<Option<T>> for Null<T>
where
    T: Default,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::present(v),
            None => Self::null(),
        }
    }
}

impl<T> Valuer for Null<T>
where
    T: Clone + Into<Scalar> + Send + Sync,
{
    fn value(&self) -> Result<Option<Scalar>, ValuerError> {
        Ok(self.as_option().cloned().map(Into::into))
    }
}

impl<T> Reflect for Null<T>
where
    T: Clone + Into<Scalar> + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_valuer(&self) -> Option<&dyn Valuer> {
        Some(self)
    }
}

/// Nullable `bool`.
pub type NullBool = Null<bool>;
/// Nullable `u8`.
pub type NullByte = Null<u8>;
/// Nullable `f64`.
pub type NullFloat64 = Null<f64>;
/// Nullable `i16`.
pub type NullInt16 = Null<i16>;
/// Nullable `i32`.
pub type NullInt32 = Null<i32>;
/// Nullable `i64`.
pub type NullInt64 = Null<i64>;
/// Nullable `String`.
pub type NullString = Null<String>;
/// Nullable UTC timestamp.
pub type NullTime = Null<DateTime<Utc>>;
