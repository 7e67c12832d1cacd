//! Option-backed nullable values, in the style of `guregu/null`.

use std::any::Any;

use chrono::{DateTime, Utc};

use crate::{Reflect, Scalar, Valuer, ValuerError};

/// A nullable value stored as an `Option`.
///
/// Unlike [`sql::Null`](super::sql::Null) there is no stale payload behind an
/// invalid flag: a null value holds nothing.
///
/// # Examples
///
/// ```
/// use valuer_validate::{Scalar, Valuer};
/// use valuer_validate::wrappers::null;
///
/// let failing = null::String::new("Failing fail".to_string(), true);
/// assert_eq!(failing.value().unwrap(), Some(Scalar::Text("Failing fail".into())));
///
/// let category = null::String::new(String::new(), false);
/// assert_eq!(category.value().unwrap(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Nullable<T> {
    inner: Option<T>,
}

impl<T> Nullable<T> {
    /// Creates a value, keeping it only when `valid`.
    pub fn new(value: T, valid: bool) -> Self {
        Self {
            inner: valid.then_some(value),
        }
    }

    /// Creates a present value.
    pub fn from_value(value: T) -> Self {
        Self { inner: Some(value) }
    }

    /// Creates a null value.
    pub fn null() -> Self {
        Self { inner: None }
    }

    /// Returns `true` when a value is present.
    pub fn is_valid(&self) -> bool {
        self.inner.is_some()
    }

    /// Borrows the value when present.
    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(inner: Option<T>) -> Self {
        Self { inner }
    }
}

impl<T> Valuer for Nullable<T>
where
    T: Clone + Into<Scalar> + Send + Sync,
{
    fn value(&self) -> Result<Option<Scalar>, ValuerError> {
        Ok(self.inner.clone().map(Into::into))
    }
}

impl<T> Reflect for Nullable<T>
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
pub type Bool = Nullable<bool>;
/// Nullable `u8`.
pub type Byte = Nullable<u8>;
/// Nullable `f64`.
pub type Float = Nullable<f64>;
/// Nullable `i64`.
pub type Int = Nullable<i64>;
/// Nullable `i16`.
pub type Int16 = Nullable<i16>;
/// Nullable `i32`.
pub type Int32 = Nullable<i32>;
/// Nullable `i64`, the same type as [`Int`].
pub type Int64 = Int;
/// Nullable `String`.
pub type String = Nullable<std::string::String>;
/// Nullable UTC timestamp.
pub type Time = Nullable<DateTime<Utc>>;
