//! A small struct validator that consumes the extraction policies.
//!
//! This module is the engine side of the contract: it walks a struct's
//! fields, asks the [`ValuerRegistry`] whether a field's type is a
//! registered wrapper, substitutes the extracted value when it is, and runs
//! the tag rules against the result.
//!
//! Supported rules: `required`, `omitempty`, `max=N`, `min=N`, `len=N`.

mod rule;

pub use rule::{parse_tag, Limit, Rule};

use crate::{Error, FieldError, Reflect, Scalar, ValidationErrors, ValuerRegistry};

/// One field of a struct under validation.
#[derive(Clone, Copy)]
pub struct FieldRef<'a> {
    /// Field name used in error messages
    pub name: &'static str,
    /// Validation tag, e.g. `omitempty,max=1`
    pub tag: &'static str,
    /// The field's current value
    pub value: &'a dyn Reflect,
}

impl<'a> FieldRef<'a> {
    /// Describes a field.
    pub fn new(name: &'static str, tag: &'static str, value: &'a dyn Reflect) -> Self {
        Self { name, tag, value }
    }
}

impl std::fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("type", &self.value.type_name())
            .finish()
    }
}

/// Types the [`Validator`] can walk.
///
/// Implementations list their fields with the tag each one carries. Fields
/// with an empty tag are still listed so registered wrappers are extracted.
///
/// # Examples
///
/// ```
/// use valuer_validate::engine::{FieldRef, Validate};
/// use valuer_validate::wrappers::sql::NullString;
///
/// struct Account {
///     email: NullString,
///     age: i32,
/// }
///
/// impl Validate for Account {
///     fn fields(&self) -> Vec<FieldRef<'_>> {
///         vec![
///             FieldRef::new("Email", "required", &self.email),
///             FieldRef::new("Age", "min=18", &self.age),
///         ]
///     }
/// }
/// ```
pub trait Validate {
    /// Lists the fields to validate, in declaration order.
    fn fields(&self) -> Vec<FieldRef<'_>>;
}

/// Validates structs, unwrapping registered nullable wrappers first.
///
/// The registry is fixed at construction. A `Validator` is `Send + Sync`
/// and may serve any number of concurrent validation calls.
///
/// # Panics
///
/// [`validate`](Self::validate) panics when an extraction policy reports a
/// [`ContractViolation`](crate::ContractViolation): a registered field that
/// is not a valuer, or a strictly extracted wrapper that returned an error.
///
/// # Examples
///
/// ```
/// use valuer_validate::{ExtractionPolicy, RegistryBuilder, Validator};
/// use valuer_validate::engine::{FieldRef, Validate};
/// use valuer_validate::wrappers::pg;
///
/// struct Item {
///     name: pg::Text,
/// }
///
/// impl Validate for Item {
///     fn fields(&self) -> Vec<FieldRef<'_>> {
///         vec![FieldRef::new("Name", "required,max=5", &self.name)]
///     }
/// }
///
/// let validator = Validator::new(
///     RegistryBuilder::new()
///         .register_pg_types(ExtractionPolicy::Lenient)
///         .build(),
/// );
///
/// assert!(validator.validate(&Item { name: pg::Text::present("pen".into()) }).is_ok());
///
/// let err = validator
///     .validate(&Item { name: pg::Text::present("notebook".into()) })
///     .unwrap_err();
/// assert_eq!(err.field_errors().unwrap().get("Name").unwrap().tag(), "max");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    registry: ValuerRegistry,
}

impl Validator {
    /// Creates a validator serving the given registry.
    pub fn new(registry: ValuerRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator resolves wrapper types against.
    pub fn registry(&self) -> &ValuerRegistry {
        &self.registry
    }

    /// Validates every field of `target`.
    ///
    /// # Errors
    ///
    /// - [`Error::Fields`] with one entry per failed field
    /// - [`Error::InvalidTag`] if a tag does not parse
    /// - [`Error::UnsupportedKind`] if a rule meets a value it cannot measure
    pub fn validate<S: Validate + ?Sized>(&self, target: &S) -> Result<(), Error> {
        let span = tracing::debug_span!("validate", type_name = std::any::type_name::<S>());
        let _guard = span.enter();

        let mut errors = ValidationErrors::default();
        for field in target.fields() {
            if let Some(e) = self.check_field(field.name, field.tag, field.value)? {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failed = errors.len(), "validation failed");
            Err(Error::Fields(errors))
        }
    }

    /// Validates a single value against `tag`.
    ///
    /// Registered wrappers are extracted the same way as struct fields. A
    /// failure is reported with an empty field name.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn validate_value(&self, value: &dyn Reflect, tag: &'static str) -> Result<(), Error> {
        match self.check_field("", tag, value)? {
            Some(e) => {
                let mut errors = ValidationErrors::default();
                errors.push(e);
                Err(Error::Fields(errors))
            }
            None => Ok(()),
        }
    }

    /// Returns the value rules run against: the extracted value for a
    /// registered wrapper, the literal value otherwise.
    pub fn resolve_value(&self, value: &dyn Reflect) -> Option<Scalar> {
        match self.registry.resolve_for(value) {
            Some(policy) => policy.extract(value),
            None => value.as_scalar(),
        }
    }

    fn check_field(
        &self,
        name: &'static str,
        tag: &'static str,
        value: &dyn Reflect,
    ) -> Result<Option<FieldError>, Error> {
        let rules = parse_tag(tag)?;
        let value = self.resolve_value(value);

        let Some(first) = rules.first() else {
            return Ok(None);
        };

        let Some(scalar) = value else {
            // Absent values only pass when omitempty leads the tag.
            if *first == Rule::OmitEmpty {
                return Ok(None);
            }
            tracing::debug!(field = name, tag = first.tag(), "absent value failed rule");
            return Ok(Some(field_error(name, first, None)));
        };

        for rule in &rules {
            if *rule == Rule::OmitEmpty {
                if scalar.is_zero() {
                    return Ok(None);
                }
                continue;
            }

            let passed = rule.check(&scalar).map_err(|kind| Error::UnsupportedKind {
                field: name,
                tag: rule.tag(),
                kind,
            })?;

            if !passed {
                tracing::debug!(field = name, tag = rule.tag(), "value failed rule");
                return Ok(Some(field_error(name, rule, Some(scalar))));
            }
        }

        Ok(None)
    }
}

fn field_error(name: &'static str, rule: &Rule, value: Option<Scalar>) -> FieldError {
    FieldError::new(name, rule.tag(), rule.param().map(str::to_string), value)
}
