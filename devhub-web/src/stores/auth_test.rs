//! Tests for the session store
//!
//! Covers token-less startup, role normalization of fetched sessions,
//! single-flight fetch coalescing, login/logout transitions and persistence.

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;
    use shared::models::{ApiResponse, LoginData, LoginRequest, RegisterRequest, Role};

    use crate::api::ApiError;
    use crate::models::auth_state::AuthPhase;
    use crate::storage::{AUTH_STORAGE_KEY, MemoryStorage, StateStorage, TokenJar};
    use crate::stores::auth::{AuthError, FETCH_USER_FAILED, UNREACHABLE};
    use crate::test_support::{AuthHarness, user_with_roles};

    fn credentials(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn no_token_settles_anonymous_without_network() {
        let harness = AuthHarness::new(None);

        block_on(harness.store.fetch_user());

        let state = harness.store.state();
        assert_eq!(harness.api.me_calls.get(), 0);
        assert!(!state.is_authenticated);
        assert!(state.initialized);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.phase(), AuthPhase::Anonymous);
    }

    #[test]
    fn token_resolves_session_with_normalized_roles() {
        let harness = AuthHarness::new(Some("tok-1"));
        harness.api.reply_me(Ok(ApiResponse::ok(user_with_roles(
            "alice",
            json!([{ "name": "ROLE_ADMIN" }, "USER"]),
        ))));

        block_on(harness.store.fetch_user());

        let state = harness.store.state();
        assert_eq!(harness.api.last_token.borrow().as_deref(), Some("tok-1"));
        assert!(state.is_authenticated);
        assert!(state.initialized);
        let user = state.user.as_ref().unwrap();
        assert_eq!(user.roles, vec![Role::Admin, Role::User]);
        assert!(harness.store.check_is_admin());
    }

    #[test]
    fn unsuccessful_envelope_settles_anonymous() {
        let harness = AuthHarness::new(Some("stale"));
        harness
            .api
            .reply_me(Ok(ApiResponse::failure("Session expired")));

        block_on(harness.store.fetch_user());

        let state = harness.store.state();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.initialized);
        assert_eq!(state.error.as_deref(), Some(FETCH_USER_FAILED));
    }

    #[test]
    fn transport_failure_fails_closed() {
        let harness = AuthHarness::new(Some("tok"));
        harness
            .api
            .reply_me(Err(ApiError::Transport("connection refused".to_string())));

        block_on(harness.store.fetch_user());

        let state = harness.store.state();
        assert_eq!(state.phase(), AuthPhase::Anonymous);
        assert_eq!(state.error.as_deref(), Some(FETCH_USER_FAILED));
    }

    #[test]
    fn concurrent_fetches_share_one_request() {
        let harness = AuthHarness::new(Some("tok"));
        harness
            .api
            .reply_me(Ok(ApiResponse::ok(user_with_roles("bob", json!(["USER"])))));

        let first = harness.store.fetch_user();
        let second = harness.store.fetch_user();
        block_on(async { futures::join!(first, second) });

        assert_eq!(harness.api.me_calls.get(), 1);
        assert!(harness.store.state().is_authenticated);
    }

    #[test]
    fn callers_joining_a_held_fetch_wait_for_it() {
        let harness = AuthHarness::new(Some("tok"));
        let release = harness.api.hold_me();
        harness
            .api
            .reply_me(Ok(ApiResponse::ok(user_with_roles("carol", json!(["MODERATOR"])))));

        let first = harness.store.fetch_user();
        assert!(harness.store.is_fetch_pending());
        let second = harness.store.fetch_user();
        let third = harness.store.fetch_user();

        block_on(async {
            futures::join!(first, second, third, async {
                release.send(()).unwrap();
            })
        });

        assert_eq!(harness.api.me_calls.get(), 1);
        assert!(!harness.store.is_fetch_pending());
        assert!(harness.store.state().is_authenticated);
    }

    #[test]
    fn settled_fetch_allows_a_new_request() {
        let harness = AuthHarness::new(Some("tok"));
        harness
            .api
            .reply_me(Ok(ApiResponse::ok(user_with_roles("dan", json!(["USER"])))));
        harness.api.reply_me(Ok(ApiResponse::failure("revoked")));

        block_on(harness.store.fetch_user());
        assert!(harness.store.state().is_authenticated);

        block_on(harness.store.fetch_user());
        assert_eq!(harness.api.me_calls.get(), 2);
        assert!(!harness.store.state().is_authenticated);
    }

    #[test]
    fn login_success_stores_token_and_user() {
        let harness = AuthHarness::new(None);
        harness.api.reply_login(Ok(ApiResponse::ok(LoginData {
            token: "fresh-token".to_string(),
            user: user_with_roles("alice", json!([{ "name": "MODERATOR" }])),
        })));

        let user = block_on(harness.store.login(credentials("alice", "correct"))).unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(harness.tokens.token().as_deref(), Some("fresh-token"));
        let state = harness.store.state();
        assert!(state.is_authenticated);
        assert!(state.initialized);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(!harness.store.check_is_admin());

        let persisted: serde_json::Value =
            serde_json::from_str(&harness.storage.load(AUTH_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(persisted["state"]["isAuthenticated"], json!(true));
        assert_eq!(persisted["state"]["user"]["username"], json!("alice"));
        assert_eq!(persisted["version"], json!(0));
    }

    #[test]
    fn login_rejection_records_backend_message() {
        let harness = AuthHarness::new(None);
        harness
            .api
            .reply_login(Ok(ApiResponse::failure("Invalid credentials")));

        let err = block_on(harness.store.login(credentials("alice", "wrong"))).unwrap_err();

        assert_eq!(
            err,
            AuthError::Rejected {
                message: "Invalid credentials".to_string(),
                code: None,
            }
        );
        let state = harness.store.state();
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_authenticated);
        assert!(!state.loading);
        assert!(harness.tokens.token().is_none());
    }

    #[test]
    fn disabled_account_is_a_distinct_error() {
        let harness = AuthHarness::new(None);
        harness.api.reply_login(Ok(
            ApiResponse::failure("Account disabled by moderator").with_code("USER_DISABLED")
        ));

        let err = block_on(harness.store.login(credentials("mallory", "pw"))).unwrap_err();

        assert!(matches!(err, AuthError::Disabled { .. }));
        assert_eq!(
            harness.store.state().error.as_deref(),
            Some("Account disabled by moderator")
        );
    }

    #[test]
    fn unreachable_backend_on_login() {
        let harness = AuthHarness::new(None);
        harness
            .api
            .reply_login(Err(ApiError::Transport("dns".to_string())));

        let err = block_on(harness.store.login(credentials("alice", "pw"))).unwrap_err();

        assert!(matches!(err, AuthError::Transport(_)));
        assert_eq!(harness.store.state().error.as_deref(), Some(UNREACHABLE));
    }

    #[test]
    fn logout_keeps_initialized_flag() {
        let harness = AuthHarness::new(None);
        harness.api.reply_login(Ok(ApiResponse::ok(LoginData {
            token: "t".to_string(),
            user: user_with_roles("alice", json!(["ADMIN"])),
        })));
        block_on(harness.store.login(credentials("alice", "pw"))).unwrap();

        harness.store.logout();

        let state = harness.store.state();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.initialized);
        assert!(harness.tokens.token().is_none());
        assert!(!harness.store.check_is_admin());
        assert!(state.needs_session_fetch());

        let calls_before = harness.api.me_calls.get();
        block_on(harness.store.fetch_user());
        assert_eq!(harness.api.me_calls.get(), calls_before);
        assert_eq!(harness.store.state().phase(), AuthPhase::Anonymous);
    }

    #[test]
    fn debug_output_reports_phase() {
        let harness = AuthHarness::new(None);
        let before = format!("{:?}", harness.store);
        assert!(before.contains("phase: Uninitialized"), "{before}");

        block_on(harness.store.fetch_user());
        let after = format!("{:?}", harness.store);
        assert!(after.contains("phase: Anonymous"), "{after}");
    }

    #[test]
    fn logout_discards_in_flight_fetch_result() {
        let harness = AuthHarness::new(Some("tok"));
        let release = harness.api.hold_me();
        harness
            .api
            .reply_me(Ok(ApiResponse::ok(user_with_roles("eve", json!(["ADMIN"])))));

        let pending = harness.store.fetch_user();
        block_on(async {
            futures::join!(pending, async {
                harness.store.logout();
                release.send(()).unwrap();
            })
        });

        let state = harness.store.state();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(!state.loading);
        assert!(!harness.store.is_fetch_pending());
    }

    #[test]
    fn hydrates_persisted_session() {
        let storage = MemoryStorage::default();
        storage
            .save(
                AUTH_STORAGE_KEY,
                &json!({
                    "state": {
                        "user": { "id": 9, "username": "zoe", "email": "z@x.io", "roles": [{ "name": "ROLE_ADMIN" }] },
                        "isAuthenticated": true,
                        "initialized": true
                    },
                    "version": 0
                })
                .to_string(),
            )
            .unwrap();

        let harness = AuthHarness::with_storage(None, storage);

        let state = harness.store.state();
        assert!(state.is_authenticated);
        assert!(!state.needs_session_fetch());
        assert!(harness.store.check_is_admin());
    }

    #[test]
    fn corrupt_persisted_record_is_dropped() {
        let storage = MemoryStorage::default();
        storage.save(AUTH_STORAGE_KEY, "{not json").unwrap();

        let harness = AuthHarness::with_storage(None, storage);

        assert_eq!(harness.store.state().phase(), AuthPhase::Uninitialized);
        assert!(harness.storage.load(AUTH_STORAGE_KEY).is_none());
    }

    #[test]
    fn registration_failure_is_returned() {
        let harness = AuthHarness::new(None);
        harness
            .api
            .reply_register(Ok(ApiResponse::failure("Username taken").with_code("CONFLICT")));

        let err = block_on(harness.store.register(RegisterRequest {
            email: "a@x.io".to_string(),
            username: "alice".to_string(),
            password: "longenough".to_string(),
            role: Role::User,
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "Username taken");
        assert_eq!(harness.store.state().error.as_deref(), Some("Username taken"));
        assert!(!harness.store.state().is_authenticated);
    }

    #[test]
    fn registration_success_does_not_sign_in() {
        let harness = AuthHarness::new(None);
        harness.api.reply_register(Ok(ApiResponse::ok(json!({ "id": 3 }))));

        block_on(harness.store.register(RegisterRequest {
            email: "b@x.io".to_string(),
            username: "bea".to_string(),
            password: "longenough".to_string(),
            role: Role::User,
        }))
        .unwrap();

        assert_eq!(harness.api.register_calls.get(), 1);
        assert!(!harness.store.state().is_authenticated);
    }

    #[test]
    fn check_is_admin_across_role_shapes() {
        let cases = [
            (json!(["ADMIN"]), true),
            (json!(["ROLE_ADMIN"]), true),
            (json!([{ "name": "ADMIN" }]), true),
            (json!([{ "name": "ROLE_ADMIN" }]), true),
            (json!(["USER", { "name": "ROLE_ADMIN" }]), true),
            (json!(["USER", { "name": "MODERATOR" }]), false),
            (json!(["admin"]), false),
            (json!([]), false),
        ];

        for (roles, expected) in cases {
            let harness = AuthHarness::new(Some("tok"));
            harness
                .api
                .reply_me(Ok(ApiResponse::ok(user_with_roles("u", roles.clone()))));
            block_on(harness.store.fetch_user());
            assert_eq!(harness.store.check_is_admin(), expected, "roles: {roles}");
        }
    }

    #[test]
    fn clear_error_resets_message() {
        let harness = AuthHarness::new(None);
        harness.api.reply_login(Ok(ApiResponse::failure("nope")));
        let _ = block_on(harness.store.login(credentials("a", "b")));
        assert!(harness.store.state().error.is_some());

        harness.store.clear_error();
        assert!(harness.store.state().error.is_none());
    }

    #[test]
    fn stores_are_isolated_per_context() {
        let first = AuthHarness::new(None);
        let second = AuthHarness::new(Some("tok"));
        block_on(first.store.fetch_user());

        assert!(first.store.state().initialized);
        assert!(!second.store.state().initialized);
        assert_ne!(first.store, second.store);
    }
}
