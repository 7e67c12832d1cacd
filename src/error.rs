use std::fmt;

use crate::{Scalar, ScalarKind};

/// Errors returned by [`Validator`](crate::Validator).
///
/// Contract violations raised by an extraction policy are not represented
/// here; they abort the validation call instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// One or more fields failed their rules
    Fields(ValidationErrors),
    /// A field's tag could not be parsed
    InvalidTag(TagError),
    /// A rule was applied to a value kind it cannot measure
    UnsupportedKind {
        /// Field carrying the rule
        field: &'static str,
        /// Rule name, e.g. `max`
        tag: &'static str,
        /// Kind of the offending value
        kind: ScalarKind,
    },
}

impl Error {
    /// Returns the field errors, if this is [`Error::Fields`].
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Fields(errors) => Some(errors),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fields(errors) => write!(f, "{}", errors),
            Error::InvalidTag(e) => write!(f, "{}", e),
            Error::UnsupportedKind { field, tag, kind } => write!(
                f,
                "rule '{}' on field '{}' does not support {} values",
                tag, field, kind
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidTag(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Fields(errors)
    }
}

impl From<TagError> for Error {
    fn from(e: TagError) -> Self {
        Error::InvalidTag(e)
    }
}

/// A single rule violation on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    field: &'static str,
    tag: &'static str,
    param: Option<String>,
    value: Option<Scalar>,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(
        field: &'static str,
        tag: &'static str,
        param: Option<String>,
        value: Option<Scalar>,
    ) -> Self {
        Self {
            field,
            tag,
            param,
            value,
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Name of the rule that failed, e.g. `required` or `max`.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Rule parameter, e.g. `1` for `max=1`.
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// The value the rule was evaluated against. `None` when absent.
    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.field, self.field, self.tag
        )
    }
}

impl std::error::Error for FieldError {}

/// Every field error collected by one validation call, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` when no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the field errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Returns the error for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// A validation tag that could not be parsed.
///
/// # Examples
///
/// ```
/// use valuer_validate::engine::parse_tag;
///
/// let err = parse_tag("max=abc").unwrap_err();
/// assert_eq!(err.tag(), "max=abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    tag: String,
    message: String,
}

impl TagError {
    /// Creates a new tag error.
    pub fn new(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// The full tag that failed to parse.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// What was wrong with it.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid validation tag '{}': {}", self.tag, self.message)
    }
}

impl std::error::Error for TagError {}
