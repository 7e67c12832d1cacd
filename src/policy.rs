use std::fmt;

use crate::{Reflect, Scalar, ValuerError};

/// How a registered wrapper type is unwrapped before validation.
///
/// Both variants hand the wrapper's primitive to the engine when
/// [`Valuer::value`](crate::Valuer::value) succeeds, and both treat a field
/// that is not a [`Valuer`](crate::Valuer) at all as a contract violation.
/// They differ only when the wrapper reports an error:
///
/// - [`Strict`](Self::Strict) aborts the validation call. Wrappers bound to
///   it give "no value" its own meaning (an explicit null), so an error from
///   `value()` is a broken wrapper, never a legitimate null.
/// - [`Lenient`](Self::Lenient) reads the error as "no value". Wrappers bound
///   to it mean nothing more by null than "could not produce one".
///
/// Policies hold no state; a single value is shared by every validation call.
///
/// # Examples
///
/// ```
/// use valuer_validate::{ExtractionPolicy, Scalar};
/// use valuer_validate::wrappers::pg::Text;
///
/// let undefined = Text::undefined();
/// assert_eq!(ExtractionPolicy::Lenient.extract(&undefined), None);
///
/// let present = Text::present("hello".to_string());
/// assert_eq!(
///     ExtractionPolicy::Strict.extract(&present),
///     Some(Scalar::Text("hello".into()))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionPolicy {
    /// Abort when the wrapper reports an error.
    Strict,
    /// Treat a wrapper error as an absent value.
    Lenient,
}

impl ExtractionPolicy {
    /// Unwraps `field` for the validation engine.
    ///
    /// Returns the underlying primitive, or `None` (the absence marker).
    ///
    /// # Panics
    ///
    /// Panics with the [`ContractViolation`] message when `field` is not a
    /// [`Valuer`](crate::Valuer), or when a [`Strict`](Self::Strict) field's
    /// wrapper returns an error. These are registration bugs and are never
    /// reported as field validation failures.
    pub fn extract(&self, field: &dyn Reflect) -> Option<Scalar> {
        match self.try_extract(field) {
            Ok(value) => value,
            Err(violation) => {
                tracing::error!(
                    policy = %self,
                    type_name = violation.type_name(),
                    "{}",
                    violation
                );
                panic!("{}", violation)
            }
        }
    }

    /// Unwraps `field`, returning a contract violation instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::NotAValuer`] under either policy when the
    /// field does not implement the protocol, and
    /// [`ContractViolation::ValuerFailed`] under [`Strict`](Self::Strict)
    /// when the wrapper reports an error.
    pub fn try_extract(&self, field: &dyn Reflect) -> Result<Option<Scalar>, ContractViolation> {
        let type_name = field.type_name();
        let valuer = field
            .as_valuer()
            .ok_or(ContractViolation::NotAValuer { type_name })?;

        match (valuer.value(), self) {
            (Ok(value), _) => Ok(value),
            (Err(source), ExtractionPolicy::Strict) => {
                Err(ContractViolation::ValuerFailed { type_name, source })
            }
            (Err(source), ExtractionPolicy::Lenient) => {
                tracing::debug!(type_name, reason = %source, "valuer error read as absent value");
                Ok(None)
            }
        }
    }
}

impl fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// [`ExtractionPolicy::Strict`] as a free function.
pub fn strict(field: &dyn Reflect) -> Option<Scalar> {
    ExtractionPolicy::Strict.extract(field)
}

/// [`ExtractionPolicy::Lenient`] as a free function.
pub fn lenient(field: &dyn Reflect) -> Option<Scalar> {
    ExtractionPolicy::Lenient.extract(field)
}

/// A field reached an extraction policy it does not satisfy.
///
/// This is a programming error in the registrations, not a data problem.
/// [`ExtractionPolicy::extract`] turns it into a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// The field's type does not implement [`Valuer`](crate::Valuer).
    NotAValuer {
        /// Concrete type of the field
        type_name: &'static str,
    },
    /// A strictly extracted wrapper returned an error.
    ValuerFailed {
        /// Concrete type of the field
        type_name: &'static str,
        /// Error reported by the wrapper
        source: ValuerError,
    },
}

impl ContractViolation {
    /// Returns the concrete type name of the offending field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::NotAValuer { type_name } | Self::ValuerFailed { type_name, .. } => type_name,
        }
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAValuer { type_name } => {
                write!(f, "not a valuer field: {}", type_name)
            }
            Self::ValuerFailed { type_name, source } => {
                write!(f, "valuer field returned an error: {}: {}", type_name, source)
            }
        }
    }
}

impl std::error::Error for ContractViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotAValuer { .. } => None,
            Self::ValuerFailed { source, .. } => Some(source),
        }
    }
}
