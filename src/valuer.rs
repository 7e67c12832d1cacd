use std::any::Any;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::Scalar;

/// The protocol every nullable wrapper exposes to the validator.
///
/// `value()` answers one of three ways:
///
/// - `Ok(Some(scalar))`: a present primitive
/// - `Ok(None)`: a clean absence (the wrapper is null)
/// - `Err(reason)`: no usable value could be produced
///
/// Implementations MUST be side-effect free and deterministic for a given
/// instance. The extraction policies call `value()` from any thread, any
/// number of times.
///
/// # Examples
///
/// ```
/// use valuer_validate::{Scalar, Valuer, ValuerError};
///
/// struct Celsius(Option<f64>);
///
/// impl Valuer for Celsius {
///     fn value(&self) -> Result<Option<Scalar>, ValuerError> {
///         Ok(self.0.map(Scalar::Float))
///     }
/// }
///
/// assert_eq!(Celsius(Some(21.5)).value().unwrap(), Some(Scalar::Float(21.5)));
/// assert_eq!(Celsius(None).value().unwrap(), None);
/// ```
pub trait Valuer: Send + Sync {
    /// Produces the underlying primitive, a clean absence, or the reason no
    /// value is available.
    fn value(&self) -> Result<Option<Scalar>, ValuerError>;
}

/// Reason a [`Valuer`] could not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuerError {
    kind: ValuerErrorKind,
    message: String,
}

impl ValuerError {
    /// Creates a new valuer error.
    pub fn new(kind: ValuerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ValuerErrorKind::Undefined`] error.
    pub fn undefined(message: impl Into<String>) -> Self {
        Self::new(ValuerErrorKind::Undefined, message)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ValuerErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValuerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "valuer failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for ValuerError {}

/// Kind of valuer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuerErrorKind {
    /// The wrapper was never assigned, not even to null.
    Undefined,
    /// The wrapped value could not be converted to a [`Scalar`].
    Encode,
    /// Any other failure reported by the wrapper.
    Other,
}

impl fmt::Display for ValuerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Encode => write!(f, "encode"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Runtime view of a struct field, as seen by the validation engine.
///
/// This is the capability check the extraction policies rely on:
/// [`as_valuer`](Reflect::as_valuer) answers "does this value implement the
/// [`Valuer`] protocol?" through trait dispatch instead of type names.
///
/// Plain scalar field types implement `Reflect` with
/// [`as_scalar`](Reflect::as_scalar) returning their literal value. Wrapper
/// types implement it with [`impl_valuer_reflect!`](crate::impl_valuer_reflect).
pub trait Reflect: Any {
    /// Upcasts to `Any`, used for type identity.
    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete type, for diagnostics only.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the value as a [`Valuer`] when it implements the protocol.
    fn as_valuer(&self) -> Option<&dyn Valuer> {
        None
    }

    /// Returns the literal value of a plain field. `None` means absent.
    fn as_scalar(&self) -> Option<Scalar> {
        None
    }
}

/// Implements [`Reflect`] for one or more [`Valuer`] types.
///
/// The generated impl reports the type as a valuer and leaves
/// [`Reflect::as_scalar`] empty, so an unregistered wrapper is validated as
/// an absent value.
///
/// # Examples
///
/// ```
/// use valuer_validate::{impl_valuer_reflect, Reflect, Scalar, Valuer, ValuerError};
///
/// struct Flag(Option<bool>);
///
/// impl Valuer for Flag {
///     fn value(&self) -> Result<Option<Scalar>, ValuerError> {
///         Ok(self.0.map(Scalar::Bool))
///     }
/// }
///
/// impl_valuer_reflect!(Flag);
///
/// assert!(Flag(Some(true)).as_valuer().is_some());
/// ```
#[macro_export]
macro_rules! impl_valuer_reflect {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn as_valuer(&self) -> ::std::option::Option<&dyn $crate::Valuer> {
                    ::std::option::Option::Some(self)
                }
            }
        )+
    };
}

macro_rules! impl_scalar_reflect {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_scalar(&self) -> Option<Scalar> {
                    Some(Scalar::from(self.clone()))
                }
            }
        )+
    };
}

impl_scalar_reflect!(bool, u8, i16, i32, i64, f32, f64, String, Vec<u8>, DateTime<Utc>);

impl<T> Reflect for Option<T>
where
    T: Clone + Into<Scalar> + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_scalar(&self) -> Option<Scalar> {
        self.clone().map(Into::into)
    }
}
