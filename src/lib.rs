//! Extraction policies for validating nullable wrapper types.
//!
//! Struct validators apply scalar rules (`required`, `max`, ranges) to
//! primitive values. Database-style nullable wrappers hold a primitive plus a
//! validity flag, so the validator needs to be told how to unwrap them. This
//! crate provides that contract:
//!
//! - **Protocol**: [`Valuer`] yields the underlying [`Scalar`], a clean
//!   absence, or an error
//! - **Policies**: [`ExtractionPolicy::Strict`] aborts when a wrapper errors,
//!   [`ExtractionPolicy::Lenient`] reads the error as absent
//! - **Registry**: [`RegistryBuilder`] binds wrapper types to policies once,
//!   producing a read-only [`ValuerRegistry`]
//!
//! The [`engine`] module contains a small struct validator that consumes the
//! registry, and [`wrappers`] provides three families of nullable types.
//!
//! # Examples
//!
//! ```
//! use valuer_validate::{ExtractionPolicy, RegistryBuilder, Validator};
//! use valuer_validate::engine::{FieldRef, Validate};
//! use valuer_validate::wrappers::{pg, sql};
//!
//! struct Product {
//!     name: pg::Text,
//!     description: sql::NullString,
//!     category: sql::NullString,
//! }
//!
//! impl Validate for Product {
//!     fn fields(&self) -> Vec<FieldRef<'_>> {
//!         vec![
//!             FieldRef::new("Name", "required", &self.name),
//!             FieldRef::new("Description", "", &self.description),
//!             FieldRef::new("Category", "omitempty,max=1", &self.category),
//!         ]
//!     }
//! }
//!
//! // Register before the first validation call.
//! let registry = RegistryBuilder::new()
//!     .register_sql_nulls(ExtractionPolicy::Strict)
//!     .register_pg_types(ExtractionPolicy::Lenient)
//!     .build();
//! let validator = Validator::new(registry);
//!
//! let product = Product {
//!     name: pg::Text::present("Example Name".to_string()),
//!     description: sql::NullString::null(),
//!     category: sql::NullString::new(String::new(), false),
//! };
//!
//! assert!(validator.validate(&product).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
mod error;
mod policy;
mod registry;
mod scalar;
mod valuer;
pub mod wrappers;

pub use engine::Validator;
pub use error::{Error, FieldError, TagError, ValidationErrors};
pub use policy::{lenient, strict, ContractViolation, ExtractionPolicy};
pub use registry::{RegistryBuilder, ValuerRegistry};
pub use scalar::{Scalar, ScalarKind};
pub use valuer::{Reflect, Valuer, ValuerError, ValuerErrorKind};
