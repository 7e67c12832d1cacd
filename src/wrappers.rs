//! Nullable wrapper types adapted by the extraction policies.
//!
//! Three families with different ideas of "no value":
//! - [`sql`]: `database/sql`-style `Null<T>`, a value plus a validity flag.
//!   `value()` never fails, so these are usually bound to
//!   [`ExtractionPolicy::Strict`](crate::ExtractionPolicy::Strict).
//! - [`null`]: `guregu/null`-style `Nullable<T>` backed by an `Option`.
//!   `value()` never fails either.
//! - [`pg`]: Postgres-style `Pg<T>` with a three-state [`pg::Status`]. An
//!   undefined value makes `value()` fail, which
//!   [`ExtractionPolicy::Lenient`](crate::ExtractionPolicy::Lenient) reads as
//!   absent.

pub mod null;
pub mod pg;
pub mod sql;
