//! Property tests for the extraction policies and the registry.
//!
//! These cover the cross-module invariants: both policies agree on present
//! values, diverge only on wrapper errors, and fail identically on fields
//! that are not valuers.

use std::panic::{self, AssertUnwindSafe};

use proptest::prelude::*;
use valuer_validate::wrappers::{pg, sql};
use valuer_validate::{
    impl_valuer_reflect, ContractViolation, ExtractionPolicy, Reflect, RegistryBuilder, Scalar,
    Valuer, ValuerError, ValuerErrorKind,
};

#[derive(Debug, Clone)]
struct Failing(ValuerError);

impl Valuer for Failing {
    fn value(&self) -> Result<Option<Scalar>, ValuerError> {
        Err(self.0.clone())
    }
}

impl_valuer_reflect!(Failing);

fn arb_error_kind() -> impl Strategy<Value = ValuerErrorKind> {
    prop_oneof![
        Just(ValuerErrorKind::Undefined),
        Just(ValuerErrorKind::Encode),
        Just(ValuerErrorKind::Other),
    ]
}

fn arb_policy() -> impl Strategy<Value = ExtractionPolicy> {
    prop_oneof![Just(ExtractionPolicy::Strict), Just(ExtractionPolicy::Lenient)]
}

fn boxed<T: Reflect>(field: T) -> Box<dyn Reflect> {
    Box::new(field)
}

fn panics(f: impl FnOnce()) -> bool {
    panic::catch_unwind(AssertUnwindSafe(f)).is_err()
}

proptest! {
    /// Property: a present value comes out unchanged under both policies
    #[test]
    fn proptest_present_values_agree(n in any::<i64>(), s in ".{0,32}", b in any::<bool>()) {
        let fields: Vec<(Box<dyn Reflect>, Scalar)> = vec![
            (boxed(sql::NullInt64::present(n)), Scalar::Int(n)),
            (boxed(pg::Text::present(s.clone())), Scalar::Text(s.clone())),
            (boxed(sql::NullBool::present(b)), Scalar::Bool(b)),
        ];

        for (field, expected) in &fields {
            let strict = ExtractionPolicy::Strict.extract(&**field);
            let lenient = ExtractionPolicy::Lenient.extract(&**field);

            prop_assert_eq!(&strict, &lenient);
            prop_assert_eq!(strict.as_ref(), Some(expected));
        }
    }

    /// Property: a wrapper error is fatal under Strict and absent under Lenient
    #[test]
    fn proptest_wrapper_errors_diverge(kind in arb_error_kind(), message in "[a-z ]{0,24}") {
        let field = Failing(ValuerError::new(kind, message));

        prop_assert_eq!(ExtractionPolicy::Lenient.try_extract(&field), Ok(None));
        let lenient_panicked = panics(|| {
            ExtractionPolicy::Lenient.extract(&field);
        });
        prop_assert!(!lenient_panicked);

        let is_valuer_failure = matches!(
            ExtractionPolicy::Strict.try_extract(&field),
            Err(ContractViolation::ValuerFailed { .. })
        );
        prop_assert!(is_valuer_failure);
        let strict_panicked = panics(|| {
            ExtractionPolicy::Strict.extract(&field);
        });
        prop_assert!(strict_panicked);
    }

    /// Property: fields that are not valuers fail identically under both policies
    #[test]
    fn proptest_non_valuers_fail_identically(n in any::<i32>(), s in ".{0,16}") {
        let fields = vec![boxed(n), boxed(s), boxed(Some(n as i64))];

        for field in &fields {
            let strict = ExtractionPolicy::Strict.try_extract(&**field);
            let lenient = ExtractionPolicy::Lenient.try_extract(&**field);

            let is_not_a_valuer = matches!(strict, Err(ContractViolation::NotAValuer { .. }));
            prop_assert!(is_not_a_valuer);
            prop_assert_eq!(strict, lenient);
            let strict_panicked = panics(|| {
                ExtractionPolicy::Strict.extract(&**field);
            });
            let lenient_panicked = panics(|| {
                ExtractionPolicy::Lenient.extract(&**field);
            });
            prop_assert!(strict_panicked);
            prop_assert!(lenient_panicked);
        }
    }

    /// Property: repeating a registration does not change what resolves
    #[test]
    fn proptest_registration_is_idempotent(policy in arb_policy(), repeats in 1usize..5) {
        let once = RegistryBuilder::new()
            .register::<sql::NullString>(policy)
            .register::<pg::Int4>(policy)
            .build();

        let mut builder = RegistryBuilder::new();
        for _ in 0..repeats {
            builder = builder
                .register::<sql::NullString>(policy)
                .register::<pg::Int4>(policy);
        }
        let repeated = builder.build();

        prop_assert_eq!(once.len(), repeated.len());
        prop_assert_eq!(
            once.resolve_type::<sql::NullString>(),
            repeated.resolve_type::<sql::NullString>()
        );
        prop_assert_eq!(
            once.resolve_type::<pg::Int4>(),
            repeated.resolve_type::<pg::Int4>()
        );
    }

    /// Property: a null wrapper is a clean absence, never an error
    #[test]
    fn proptest_null_wrappers_are_absent(policy in arb_policy(), n in any::<i32>()) {
        prop_assert_eq!(policy.try_extract(&sql::NullInt32::new(n, false)), Ok(None));
        prop_assert_eq!(policy.try_extract(&pg::Int4::new(n, false)), Ok(None));
    }
}
