use crate::models::{ToastQueue, ToastVariant};
use crate::pages::register_validation::{FormErrors, RegistrationForm, ValidationError};
use crate::routes::MainRoute;
use crate::stores::{AuthError, AuthStore};
use i18nrs::yew::use_translation;
use shared::models::{RegisterRequest, Role};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::{Dispatch, prelude::use_store};

const REGISTER_TOAST_TITLE: &str = "Registration failed";
const REGISTERED_TOAST_TITLE: &str = "Account created";
const REGISTERED_TOAST_BODY: &str = "You can now sign in.";

/// Roles a visitor may ask for when signing up.
const SELECTABLE_ROLES: [Role; 2] = [Role::User, Role::Moderator];

/// Submits a registration and reports the outcome as a toast.
///
/// # Errors
/// Passes through the [`AuthError`] from [`AuthStore::register`].
pub async fn submit_registration(
    auth: &AuthStore,
    toasts: &Dispatch<ToastQueue>,
    request: RegisterRequest,
) -> Result<(), AuthError> {
    let result = auth.register(request).await;
    let (title, description, variant) = match &result {
        Ok(()) => (
            REGISTERED_TOAST_TITLE.to_string(),
            REGISTERED_TOAST_BODY.to_string(),
            ToastVariant::Default,
        ),
        Err(err) => (
            REGISTER_TOAST_TITLE.to_string(),
            err.to_string(),
            ToastVariant::Destructive,
        ),
    };
    toasts.reduce_mut(|queue| {
        queue.push(title, Some(description), variant);
    });
    result
}

fn field_error(message: Option<String>) -> Html {
    match message {
        Some(message) => html! {
            <label class="label">
                <span class="label-text-alt text-error">{ message }</span>
            </label>
        },
        None => html! {},
    }
}

fn text_input(
    form: &UseStateHandle<RegistrationForm>,
    update: fn(&mut RegistrationForm, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
        }
    })
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let (i18n, ..) = use_translation();
    let auth = use_context::<AuthStore>();
    let (_, toasts) = use_store::<ToastQueue>();
    let navigator = use_navigator();
    let form = use_state(RegistrationForm::default);
    let role = use_state(|| Role::User);
    let errors = use_state(FormErrors::default);
    let loading = use_state(|| false);

    let onsubmit = {
        let form = form.clone();
        let role = role.clone();
        let errors = errors.clone();
        let loading = loading.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let validation = form.validate();
            let valid = validation.is_valid();
            errors.set(validation);
            if !valid {
                return;
            }
            let Some(auth) = auth.clone() else {
                log::error!("register page rendered without a session store");
                return;
            };
            let request = RegisterRequest {
                email: form.email.trim().to_string(),
                username: form.username.trim().to_string(),
                password: form.password.clone(),
                role: (*role).clone(),
            };
            loading.set(true);
            let loading = loading.clone();
            let toasts = toasts.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                if submit_registration(&auth, &toasts, request).await.is_ok()
                    && let Some(nav) = navigator
                {
                    nav.push(&MainRoute::Login);
                }
                loading.set(false);
            });
        })
    };

    let on_role_change = {
        let role = role.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                role.set(select.value().parse().unwrap_or(Role::User));
            }
        })
    };

    let message = |error: Option<ValidationError>| error.map(|error| i18n.t(error.message_key()));
    let is_busy = *loading;

    html! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" onsubmit={onsubmit} novalidate=true>
                    <h2 class="card-title text-2xl">{ i18n.t("register.title") }</h2>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{ i18n.t("register.email") }</span>
                        </label>
                        <input
                            id="email"
                            class={classes!("input", "input-bordered", errors.email.map(|_| "input-error"))}
                            type="email"
                            value={form.email.clone()}
                            oninput={text_input(&form, |form, value| form.email = value)}
                        />
                        { field_error(message(errors.email)) }
                    </div>
                    <div class="form-control">
                        <label class="label" for="username">
                            <span class="label-text">{ i18n.t("register.username") }</span>
                        </label>
                        <input
                            id="username"
                            class={classes!("input", "input-bordered", errors.username.map(|_| "input-error"))}
                            type="text"
                            value={form.username.clone()}
                            oninput={text_input(&form, |form, value| form.username = value)}
                        />
                        { field_error(message(errors.username)) }
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{ i18n.t("register.password") }</span>
                        </label>
                        <input
                            id="password"
                            class={classes!("input", "input-bordered", errors.password.map(|_| "input-error"))}
                            type="password"
                            value={form.password.clone()}
                            oninput={text_input(&form, |form, value| form.password = value)}
                        />
                        { field_error(message(errors.password)) }
                    </div>
                    <div class="form-control">
                        <label class="label" for="confirm_password">
                            <span class="label-text">{ i18n.t("register.confirm_password") }</span>
                        </label>
                        <input
                            id="confirm_password"
                            class={classes!("input", "input-bordered", errors.confirm_password.map(|_| "input-error"))}
                            type="password"
                            value={form.confirm_password.clone()}
                            oninput={text_input(&form, |form, value| form.confirm_password = value)}
                        />
                        { field_error(message(errors.confirm_password)) }
                    </div>
                    <div class="form-control">
                        <label class="label" for="role">
                            <span class="label-text">{ i18n.t("register.role") }</span>
                        </label>
                        <select id="role" class="select select-bordered" onchange={on_role_change}>
                            { for SELECTABLE_ROLES.iter().map(|option| html! {
                                <option value={option.as_str().to_string()} selected={*option == *role}>
                                    { option.as_str() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={is_busy}>
                            { if is_busy { i18n.t("register.submitting") } else { i18n.t("register.submit") } }
                        </button>
                    </div>
                    <p class="text-sm text-center">
                        { i18n.t("register.have_account") }{ " " }
                        <Link<MainRoute> to={MainRoute::Login} classes="link link-primary">
                            { i18n.t("register.login_link") }
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
    use serde_json::json;
    use shared::models::ApiResponse;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "new@example.com".to_string(),
            username: "newcomer".to_string(),
            password: "longenough".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn taken_username_is_toasted() {
        let harness = AuthHarness::new(None);
        harness
            .api
            .reply_register(Ok(ApiResponse::failure("Username already taken")));
        let toasts = Dispatch::<ToastQueue>::new(&harness.cx);

        let result = block_on(submit_registration(&harness.store, &toasts, request()));

        assert!(result.is_err());
        let queue = toasts.get();
        assert_eq!(queue.toasts[0].variant, ToastVariant::Destructive);
        assert_eq!(
            queue.toasts[0].description.as_deref(),
            Some("Username already taken")
        );
    }

    #[test]
    fn success_is_announced() {
        let harness = AuthHarness::new(None);
        harness
            .api
            .reply_register(Ok(ApiResponse::ok(json!({ "id": 7 }))));
        let toasts = Dispatch::<ToastQueue>::new(&harness.cx);

        block_on(submit_registration(&harness.store, &toasts, request())).unwrap();

        let queue = toasts.get();
        assert_eq!(queue.toasts[0].title, REGISTERED_TOAST_TITLE);
        assert_eq!(queue.toasts[0].variant, ToastVariant::Default);
        assert!(!harness.store.state().is_authenticated);
    }
}
