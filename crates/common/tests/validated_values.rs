//! Property tests for validated value construction.

use common::{
    EmailAddress, Msisdn, NonEmptyString, PositiveLong, PostalCode, SimpleType, Validator, zip3,
};
use proptest::prelude::*;

mod accumulation {
    use super::*;

    proptest! {
        #[test]
        fn violation_count_equals_failed_predicates(
            checks in prop::collection::vec(any::<bool>(), 1..12)
        ) {
            let mut validator = Validator::new("Candidate", "value", &"raw");
            for (index, passed) in checks.iter().enumerate() {
                validator = validator.check(*passed, &format!("rule {index}"));
            }

            let failed = checks.iter().filter(|passed| !**passed).count();
            match validator.finish() {
                Ok(()) => prop_assert_eq!(failed, 0),
                Err(errors) => prop_assert_eq!(errors.len(), failed),
            }
        }

        #[test]
        fn zip_reports_every_invalid_field(
            a in any::<bool>(),
            b in any::<bool>(),
            c in any::<bool>()
        ) {
            let raw = |ok: bool| if ok { "x".to_string() } else { String::new() };
            let result = zip3(
                NonEmptyString::of(raw(a)),
                NonEmptyString::of(raw(b)),
                NonEmptyString::of(raw(c)),
            );

            let failed = [a, b, c].iter().filter(|ok| !**ok).count();
            match result {
                Ok(_) => prop_assert_eq!(failed, 0),
                Err(errors) => prop_assert_eq!(errors.len(), failed),
            }
        }
    }

    #[test]
    fn empty_email_violates_both_predicates() {
        let errors = EmailAddress::of(String::new()).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "'' of EmailAddress.value: Must not be empty",
                "'' of EmailAddress.value: Must be a valid email address",
            ]
        );
    }
}

mod idempotence {
    use super::*;

    proptest! {
        #[test]
        fn non_empty_string(raw in ".{1,40}") {
            prop_assert_eq!(
                NonEmptyString::of(raw.clone()).unwrap(),
                NonEmptyString::of(raw).unwrap()
            );
        }

        #[test]
        fn postal_code(raw in "[0-9]{5}") {
            prop_assert_eq!(PostalCode::of(raw.clone()).unwrap(), PostalCode::of(raw).unwrap());
        }

        #[test]
        fn positive_long(raw in 0i64..i64::MAX) {
            prop_assert_eq!(PositiveLong::of(raw).unwrap(), PositiveLong::of(raw).unwrap());
        }

        #[test]
        fn email_address(local in "[a-z0-9]{1,12}", domain in "[a-z]{1,12}", tld in "[a-z]{2,4}") {
            let raw = format!("{local}@{domain}.{tld}");
            prop_assert_eq!(EmailAddress::of(raw.clone()).unwrap(), EmailAddress::of(raw).unwrap());
        }
    }
}

mod msisdn_normalization {
    use super::*;

    fn national_number() -> impl Strategy<Value = String> {
        ("[2-9][0-9]{2}", "[2-9][0-9]{2}", "[0-9]{4}", prop::sample::select(vec![
            "", " ", "-", ".",
        ]))
            .prop_map(|(area, exchange, line, sep)| format!("{area}{sep}{exchange}{sep}{line}"))
    }

    /// `+CC...` or `00CC...` with 8 to 15 digits after the prefix.
    fn international_number() -> impl Strategy<Value = (String, String)> {
        (
            "[2-9][0-9]{7,14}",
            prop::sample::select(vec!["+", "00"]),
            prop::sample::select(vec!["", " ", "-"]),
        )
            .prop_map(|(digits, prefix, sep)| {
                let (head, tail) = digits.split_at(3);
                (format!("{prefix}{head}{sep}{tail}"), digits)
            })
    }

    proptest! {
        #[test]
        fn international_canonical_form_is_stable((raw, digits) in international_number()) {
            let first = Msisdn::of(raw).unwrap();
            let second = Msisdn::of(first.as_str().to_string()).unwrap();
            prop_assert_eq!(first.as_str(), format!("+{digits}"));
            prop_assert_eq!(first.value(), second.value());
        }

        #[test]
        fn canonical_form_is_stable(raw in national_number()) {
            let first = Msisdn::of(raw).unwrap();
            let second = Msisdn::of(first.as_str().to_string()).unwrap();
            prop_assert_eq!(first.value(), second.value());
        }

        #[test]
        fn parenthesized_and_plain_forms_agree(area in "[2-9][0-9]{2}", rest in "[2-9][0-9]{6}") {
            let plain = Msisdn::of(format!("{area}{rest}")).unwrap();
            let styled = Msisdn::of(format!("({area}) {rest}")).unwrap();
            prop_assert_eq!(plain, styled);
        }
    }
}
