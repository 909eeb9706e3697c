use super::{AuthenticationContext, PermissionLevel};

/// Check for a claim on the request's identity, optionally at a minimum level.
///
/// Without `required` the claim only has to be present, and a key holding
/// `null` counts as present. With `required` the stored value must parse as a
/// [`PermissionLevel`] that satisfies it; `null` and unknown values fail.
pub fn has_claim(
    context: &AuthenticationContext,
    name: &str,
    required: Option<PermissionLevel>,
) -> bool {
    let Some(auth) = context.auth.as_ref() else {
        return false;
    };

    let Some(value) = auth.token.get(name) else {
        return false;
    };

    match required {
        None => true,
        Some(need) => PermissionLevel::from_claim(value).is_some_and(|have| have.satisfies(need)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::auth::AuthIdentity;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    fn context_with(name: &str, value: Option<Value>) -> AuthenticationContext {
        let mut token = Map::new();
        if let Some(value) = value {
            token.insert(name.to_string(), value);
        }
        AuthenticationContext::default()
            .with_app("test-app")
            .with_auth(AuthIdentity::new("uid-1", token))
    }

    fn any_level() -> impl Strategy<Value = PermissionLevel> {
        prop::sample::select(PermissionLevel::ALL.to_vec())
    }

    fn claim_name() -> impl Strategy<Value = String> {
        "[A-Za-z]{1,16}"
    }

    proptest! {
        #[test]
        fn rejects_missing_auth(name in claim_name(), level in prop::option::of(any_level())) {
            let context = AuthenticationContext::default().with_app("test-app");
            prop_assert!(!has_claim(&context, &name, level));
        }

        #[test]
        fn rejects_missing_claim(name in claim_name(), level in prop::option::of(any_level())) {
            let context = context_with("unrelated_claim_key", Some(Value::from("admin")));
            prop_assume!(name != "unrelated_claim_key");
            prop_assert!(!has_claim(&context, &name, level));
        }

        #[test]
        fn rejects_null_value(name in claim_name(), level in any_level()) {
            let context = context_with(&name, Some(Value::Null));
            prop_assert!(!has_claim(&context, &name, Some(level)));
        }

        #[test]
        fn rejects_invalid_value(name in claim_name(), value in "[a-z]{0,10}", level in any_level()) {
            prop_assume!(value.parse::<PermissionLevel>().is_err());
            let context = context_with(&name, Some(Value::from(value)));
            prop_assert!(!has_claim(&context, &name, Some(level)));
        }

        #[test]
        fn level_check_follows_ordering(name in claim_name(), have in any_level(), need in any_level()) {
            let context = context_with(&name, Some(Value::from(have.as_str())));
            prop_assert_eq!(has_claim(&context, &name, Some(need)), have.satisfies(need));
        }

        #[test]
        fn accepts_present_claim(name in claim_name()) {
            let context = context_with(&name, Some(Value::from("anything")));
            prop_assert!(has_claim(&context, &name, None));
        }
    }

    #[test]
    fn test_reader_does_not_satisfy_admin() {
        let context = context_with("SystemRole", Some(Value::from("reader")));
        assert!(!has_claim(&context, "SystemRole", Some(PermissionLevel::Admin)));
    }

    #[test]
    fn test_admin_satisfies_every_level() {
        let context = context_with("SystemRole", Some(Value::from("admin")));
        for level in PermissionLevel::ALL {
            assert!(has_claim(&context, "SystemRole", Some(level)));
        }
    }

    #[test]
    fn test_numeric_value_is_not_a_level() {
        let context = context_with("SystemRole", Some(Value::from(3)));
        assert!(!has_claim(&context, "SystemRole", Some(PermissionLevel::Reader)));
    }

    #[test]
    fn test_no_auth_context_at_all() {
        assert!(!has_claim(&AuthenticationContext::default(), "SystemRole", None));
    }

    // Presence-only checks treat a null-valued key as present, unlike level checks.
    #[test]
    fn test_null_value_counts_as_present_without_level() {
        let context = context_with("SystemRole", Some(Value::Null));
        assert!(has_claim(&context, "SystemRole", None));
        assert!(!has_claim(&context, "SystemRole", Some(PermissionLevel::Reader)));
    }
}
