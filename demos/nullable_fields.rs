//! Validating a struct made of nullable wrapper fields.
//!
//! This example shows:
//! 1. Registering wrapper families with a policy before validating
//! 2. `database/sql` and `guregu/null`-style nulls bound to the strict policy
//! 3. Postgres-style values bound to the lenient policy
//! 4. Enumerating the field errors the validator collects
//!
//! Run with: `cargo run --example nullable_fields`

use valuer_validate::engine::{FieldRef, Validate};
use valuer_validate::wrappers::{null, pg, sql};
use valuer_validate::{Error, ExtractionPolicy, RegistryBuilder, Validator};

struct Example {
    name: pg::Text,
    description: sql::NullString,
    failing_field: null::String,
    category: null::String,
    nickname: pg::Text,
}

impl Validate for Example {
    fn fields(&self) -> Vec<FieldRef<'_>> {
        vec![
            FieldRef::new("Name", "required", &self.name),
            FieldRef::new("Description", "", &self.description),
            FieldRef::new("FailingField", "omitempty,max=1", &self.failing_field),
            FieldRef::new("Category", "omitempty,max=1", &self.category),
            FieldRef::new("Nickname", "omitempty,max=1", &self.nickname),
        ]
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    // Registrations are not synchronized; finish them before validating.
    let registry = RegistryBuilder::new()
        // An error from these wrappers is a bug, never a null.
        .register_sql_nulls(ExtractionPolicy::Strict)
        .register_null_types(ExtractionPolicy::Strict)
        // An undefined value here just means "no value".
        .register_pg_types(ExtractionPolicy::Lenient)
        .build();

    for (type_name, policy) in registry.iter() {
        tracing::debug!(type_name, policy = %policy, "binding");
    }

    let validator = Validator::new(registry);

    let example = Example {
        name: pg::Text::present("Example Name".to_string()),
        description: sql::NullString::null(),
        // Deliberately longer than max=1
        failing_field: null::String::new("Failing fail".to_string(), true),
        category: null::String::new(String::new(), false),
        nickname: pg::Text::undefined(),
    };

    match validator.validate(&example) {
        Ok(()) => tracing::info!("example is valid"),
        Err(Error::Fields(errors)) => {
            for field_error in &errors {
                tracing::info!("Error: {}", field_error);
            }
        }
        Err(e) => tracing::error!(error = %e, "validation could not run"),
    }
}
