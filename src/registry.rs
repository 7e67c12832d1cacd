use std::any::TypeId;
use std::collections::HashMap;

use crate::{ExtractionPolicy, Reflect, Valuer};

#[derive(Debug, Clone, Copy)]
struct Binding {
    type_name: &'static str,
    policy: ExtractionPolicy,
}

/// Builder for a [`ValuerRegistry`].
///
/// The builder is the only way to write bindings. Calling
/// [`build`](Self::build) consumes it, so once validation starts nothing can
/// register another type.
///
/// # Examples
///
/// ```
/// use valuer_validate::{ExtractionPolicy, RegistryBuilder};
/// use valuer_validate::wrappers::{pg, sql};
///
/// let registry = RegistryBuilder::new()
///     .register::<sql::NullString>(ExtractionPolicy::Strict)
///     .register::<pg::Text>(ExtractionPolicy::Lenient)
///     .build();
///
/// assert_eq!(
///     registry.resolve_type::<pg::Text>(),
///     Some(ExtractionPolicy::Lenient)
/// );
/// assert_eq!(registry.resolve_type::<String>(), None);
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    bindings: HashMap<TypeId, Binding>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the wrapper type `T` to `policy`.
    ///
    /// Registering a type again replaces its previous binding.
    pub fn register<T>(self, policy: ExtractionPolicy) -> Self
    where
        T: Valuer + Reflect,
    {
        self.register_type(TypeId::of::<T>(), std::any::type_name::<T>(), policy)
    }

    /// Binds a type by identity.
    ///
    /// Prefer [`register`](Self::register), which guarantees at compile time
    /// that the type is a [`Valuer`]. A type registered here that is not one
    /// aborts the first validation call that reaches it.
    pub fn register_type(
        mut self,
        type_id: TypeId,
        type_name: &'static str,
        policy: ExtractionPolicy,
    ) -> Self {
        tracing::debug!(type_name, policy = %policy, "registered valuer type");

        if let Some(previous) = self
            .bindings
            .insert(type_id, Binding { type_name, policy })
        {
            if previous.policy != policy {
                tracing::warn!(
                    type_name,
                    previous = %previous.policy,
                    policy = %policy,
                    "valuer type re-registered with a different policy"
                );
            }
        }

        self
    }

    /// Binds every `database/sql`-style [`Null`](crate::wrappers::sql::Null) alias to `policy`.
    pub fn register_sql_nulls(self, policy: ExtractionPolicy) -> Self {
        use crate::wrappers::sql::*;

        self.register::<NullBool>(policy)
            .register::<NullByte>(policy)
            .register::<NullFloat64>(policy)
            .register::<NullInt16>(policy)
            .register::<NullInt32>(policy)
            .register::<NullInt64>(policy)
            .register::<NullString>(policy)
            .register::<NullTime>(policy)
    }

    /// Binds every `guregu/null`-style [`Nullable`](crate::wrappers::null::Nullable)
    /// alias to `policy`.
    pub fn register_null_types(self, policy: ExtractionPolicy) -> Self {
        use crate::wrappers::null::*;

        self.register::<Bool>(policy)
            .register::<Byte>(policy)
            .register::<Float>(policy)
            .register::<Int>(policy)
            .register::<Int16>(policy)
            .register::<Int32>(policy)
            .register::<String>(policy)
            .register::<Time>(policy)
    }

    /// Binds every Postgres-style [`Pg`](crate::wrappers::pg::Pg) alias to `policy`.
    pub fn register_pg_types(self, policy: ExtractionPolicy) -> Self {
        use crate::wrappers::pg::*;

        self.register::<Bool>(policy)
            .register::<Float4>(policy)
            .register::<Int4>(policy)
            .register::<Text>(policy)
            .register::<Timestamp>(policy)
            .register::<Timestamptz>(policy)
    }

    /// Finishes the building phase.
    pub fn build(self) -> ValuerRegistry {
        tracing::info!(types = self.bindings.len(), "valuer registry built");

        ValuerRegistry {
            bindings: self.bindings,
        }
    }
}

/// Read-only table from wrapper type to [`ExtractionPolicy`].
///
/// Built once with [`RegistryBuilder`] and then shared by reference (or in
/// an `Arc`) with every validation call. Lookups need no locking.
#[derive(Debug, Clone, Default)]
pub struct ValuerRegistry {
    bindings: HashMap<TypeId, Binding>,
}

impl ValuerRegistry {
    /// Returns the policy bound to `type_id`, if any.
    ///
    /// `None` means the engine validates the field as a plain value.
    pub fn resolve(&self, type_id: TypeId) -> Option<ExtractionPolicy> {
        self.bindings.get(&type_id).map(|binding| binding.policy)
    }

    /// Returns the policy bound to `T`, if any.
    pub fn resolve_type<T: 'static>(&self) -> Option<ExtractionPolicy> {
        self.resolve(TypeId::of::<T>())
    }

    /// Returns the policy bound to the concrete type of `field`, if any.
    pub fn resolve_for(&self, field: &dyn Reflect) -> Option<ExtractionPolicy> {
        self.resolve(field.as_any().type_id())
    }

    /// Returns `true` if `type_id` has a binding.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.bindings.contains_key(&type_id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over `(type name, policy)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ExtractionPolicy)> + '_ {
        self.bindings
            .values()
            .map(|binding| (binding.type_name, binding.policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrappers::{pg, sql};

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = RegistryBuilder::new().build();

        assert!(registry.is_empty());
        assert_eq!(registry.resolve_type::<sql::NullString>(), None);
    }

    #[test]
    fn resolve_for_uses_concrete_field_type() {
        let registry = RegistryBuilder::new()
            .register::<pg::Int4>(ExtractionPolicy::Lenient)
            .build();

        let field = pg::Int4::present(12);
        let plain = 12_i32;

        assert_eq!(registry.resolve_for(&field), Some(ExtractionPolicy::Lenient));
        assert_eq!(registry.resolve_for(&plain), None);
    }

    #[test]
    fn registering_twice_with_same_policy_is_idempotent() {
        let once = RegistryBuilder::new()
            .register::<sql::NullInt64>(ExtractionPolicy::Strict)
            .build();
        let twice = RegistryBuilder::new()
            .register::<sql::NullInt64>(ExtractionPolicy::Strict)
            .register::<sql::NullInt64>(ExtractionPolicy::Strict)
            .build();

        assert_eq!(once.len(), twice.len());
        assert_eq!(
            once.resolve_type::<sql::NullInt64>(),
            twice.resolve_type::<sql::NullInt64>()
        );
    }

    #[test]
    fn last_registration_wins() {
        let registry = RegistryBuilder::new()
            .register::<pg::Text>(ExtractionPolicy::Strict)
            .register::<pg::Text>(ExtractionPolicy::Lenient)
            .build();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve_type::<pg::Text>(), Some(ExtractionPolicy::Lenient));
    }

    #[test]
    fn presets_cover_every_alias() {
        let registry = RegistryBuilder::new()
            .register_sql_nulls(ExtractionPolicy::Strict)
            .register_pg_types(ExtractionPolicy::Lenient)
            .build();

        assert_eq!(registry.len(), 14);
        assert_eq!(registry.resolve_type::<sql::NullTime>(), Some(ExtractionPolicy::Strict));
        assert_eq!(registry.resolve_type::<sql::NullByte>(), Some(ExtractionPolicy::Strict));
        assert_eq!(registry.resolve_type::<pg::Timestamptz>(), Some(ExtractionPolicy::Lenient));
        assert_eq!(
            registry
                .iter()
                .filter(|(_, policy)| *policy == ExtractionPolicy::Lenient)
                .count(),
            6
        );
    }

    #[test]
    fn null_preset_registers_distinct_types() {
        use crate::wrappers::null;

        let registry = RegistryBuilder::new()
            .register_null_types(ExtractionPolicy::Strict)
            .build();

        // Int and Int64 are the same type.
        assert_eq!(registry.len(), 8);
        assert_eq!(registry.resolve_type::<null::Int64>(), Some(ExtractionPolicy::Strict));
        assert_eq!(registry.resolve_type::<null::String>(), Some(ExtractionPolicy::Strict));
        assert_eq!(registry.resolve_type::<sql::NullString>(), None);
    }

    #[test]
    fn register_type_accepts_raw_identity() {
        let registry = RegistryBuilder::new()
            .register_type(TypeId::of::<String>(), "String", ExtractionPolicy::Strict)
            .build();

        assert!(registry.contains(TypeId::of::<String>()));
        assert_eq!(registry.iter().next(), Some(("String", ExtractionPolicy::Strict)));
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValuerRegistry>();
    }
}
