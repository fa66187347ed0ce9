use crate::models::{AuthState, ToastQueue, ToastVariant};
use crate::routes::MainRoute;
use crate::stores::{AuthError, AuthStore};
use i18nrs::yew::use_translation;
use shared::models::{LoginRequest, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::{
    Dispatch,
    prelude::{use_selector, use_store},
};

const LOGIN_TOAST_TITLE: &str = "Sign in failed";

/// Signs in and reports a failure as a destructive toast carrying the
/// backend's message.
///
/// # Errors
/// Passes through the [`AuthError`] from [`AuthStore::login`].
pub async fn submit_login(
    auth: &AuthStore,
    toasts: &Dispatch<ToastQueue>,
    credentials: LoginRequest,
) -> Result<User, AuthError> {
    let result = auth.login(credentials).await;
    if let Err(err) = &result {
        let description = err.to_string();
        toasts.reduce_mut(|queue| {
            queue.push(
                LOGIN_TOAST_TITLE,
                Some(description),
                ToastVariant::Destructive,
            );
        });
    }
    result
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let (i18n, ..) = use_translation();
    let auth = use_context::<AuthStore>();
    let (_, toasts) = use_store::<ToastQueue>();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let navigator = use_navigator();

    {
        let auth = auth.clone();
        use_effect_with((), move |()| {
            if let Some(auth) = auth {
                auth.clear_error();
            }
            || ()
        });
    }

    let onsubmit = {
        let username_handle = username.clone();
        let password_handle = password.clone();
        let loading_handle = loading.clone();
        let auth = auth.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(auth) = auth.clone() else {
                log::error!("login page rendered without a session store");
                return;
            };
            let credentials = LoginRequest {
                username: (*username_handle).trim().to_string(),
                password: (*password_handle).clone(),
            };
            loading_handle.set(true);
            let loading_ref = loading_handle.clone();
            let toasts = toasts.clone();
            let navigator_handle = navigator.clone();
            spawn_local(async move {
                if submit_login(&auth, &toasts, credentials).await.is_ok()
                    && let Some(nav) = navigator_handle
                {
                    nav.push(&MainRoute::Home);
                }
                loading_ref.set(false);
            });
        })
    };

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                username.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let is_busy = *loading;
    let disable_submit = (*username).trim().is_empty() || (*password).is_empty() || is_busy;
    let error = (*use_selector(|state: &AuthState| state.error.clone())).clone();

    html! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{ i18n.t("login.title") }</h2>
                    if let Some(message) = error {
                        <div class="alert alert-error">
                            <span>{ message }</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="username">
                            <span class="label-text">{ i18n.t("login.username") }</span>
                        </label>
                        <input
                            id="username"
                            class="input input-bordered"
                            type="text"
                            autocomplete="username"
                            required=true
                            value={(*username).clone()}
                            oninput={on_username_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{ i18n.t("login.password") }</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            autocomplete="current-password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            { if is_busy { i18n.t("login.submitting") } else { i18n.t("login.submit") } }
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        { i18n.t("login.no_account") }{ " " }
                        <Link<MainRoute> to={MainRoute::Register} classes="link link-primary">
                            { i18n.t("login.register_link") }
                        </Link<MainRoute>>
                    </p>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AuthHarness;
    use futures::executor::block_on;
    use shared::models::ApiResponse;

    #[test]
    fn wrong_password_raises_destructive_toast() {
        let harness = AuthHarness::new(None);
        harness
            .api
            .reply_login(Ok(ApiResponse::failure("Invalid credentials")));
        let toasts = Dispatch::<ToastQueue>::new(&harness.cx);

        let result = block_on(submit_login(
            &harness.store,
            &toasts,
            LoginRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            },
        ));

        assert!(result.is_err());
        let state = harness.store.state();
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_authenticated);

        let queue = toasts.get();
        assert_eq!(queue.toasts.len(), 1);
        assert_eq!(queue.toasts[0].variant, ToastVariant::Destructive);
        assert_eq!(
            queue.toasts[0].description.as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn successful_sign_in_raises_no_toast() {
        let harness = AuthHarness::new(None);
        harness.api.reply_login(Ok(ApiResponse::ok(shared::models::LoginData {
            token: "t-1".to_string(),
            user: crate::test_support::user_with_roles("alice", serde_json::json!(["USER"])),
        })));
        let toasts = Dispatch::<ToastQueue>::new(&harness.cx);

        let user = block_on(submit_login(
            &harness.store,
            &toasts,
            LoginRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            },
        ))
        .unwrap();

        assert_eq!(user.username, "alice");
        assert!(toasts.get().toasts.is_empty());
    }
}
