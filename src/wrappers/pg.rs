//! Postgres-style column values with an undefined / null / present status.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Reflect, Scalar, Valuer, ValuerError};

/// Presence state of a [`Pg`] value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// Never assigned. Encoding fails.
    #[default]
    Undefined,
    /// Explicit SQL `NULL`.
    Null,
    /// Holds a value.
    Present,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Present => write!(f, "present"),
        }
    }
}

/// A Postgres-style column value with a three-state [`Status`].
///
/// Unlike [`sql::Null`](super::sql::Null), an unassigned value is not null:
/// `value()` on [`Status::Undefined`] returns an error.
///
/// # Examples
///
/// ```
/// use valuer_validate::{Valuer, ValuerErrorKind};
/// use valuer_validate::wrappers::pg::Text;
///
/// assert_eq!(Text::null().value().unwrap(), None);
///
/// let err = Text::undefined().value().unwrap_err();
/// assert_eq!(err.kind(), ValuerErrorKind::Undefined);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pg<T> {
    /// Wrapped value, meaningful only when `status` is `Present`
    pub value: T,
    /// Presence state
    pub status: Status,
}

impl<T> Pg<T> {
    /// Creates a present value.
    pub fn present(value: T) -> Self {
        Self {
            value,
            status: Status::Present,
        }
    }

    /// Creates a value from a validity flag, `false` meaning SQL `NULL`.
    pub fn new(value: T, valid: bool) -> Self {
        let status = if valid { Status::Present } else { Status::Null };
        Self { value, status }
    }
}

impl<T: Default> Pg<T> {
    /// Creates an explicit SQL `NULL`.
    pub fn null() -> Self {
        Self {
            value: T::default(),
            status: Status::Null,
        }
    }

    /// Creates an unassigned value.
    pub fn undefined() -> Self {
        Self::default()
    }
}

impl<T> Valuer for Pg<T>
where
    T: Clone + Into<Scalar> + Send + Sync,
{
    fn value(&self) -> Result<Option<Scalar>, ValuerError> {
        match self.status {
            Status::Present => Ok(Some(self.value.clone().into())),
            Status::Null => Ok(None),
            Status::Undefined => Err(ValuerError::undefined(format!(
                "cannot encode status {}",
                self.status
            ))),
        }
    }
}

impl<T> Reflect for Pg<T>
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

/// `bool` column.
pub type Bool = Pg<bool>;
/// `float4` column.
pub type Float4 = Pg<f32>;
/// `int4` column.
pub type Int4 = Pg<i32>;
/// `text` column.
pub type Text = Pg<String>;
/// `timestamp` column, read as UTC.
pub type Timestamp = Pg<NaiveDateTime>;
/// `timestamptz` column.
pub type Timestamptz = Pg<DateTime<Utc>>;
