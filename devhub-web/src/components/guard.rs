//! Route access guard.
//!
//! A single component covers every access rule: guest-only pages, signed-in
//! pages and role-restricted pages. The guard asks the session store for the
//! current user on mount when it does not already hold one, shows a loading
//! indicator until that settles, then either renders its children or
//! redirects. Errors while resolving the session deny access.

use shared::models::Capability;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Redirect;
use yewdux::prelude::use_store;

use crate::components::loading::Loading;
use crate::models::AuthState;
use crate::routes::MainRoute;
use crate::stores::AuthStore;

/// Who may see a guarded subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    /// Signed-in sessions holding the capability.
    Require(Capability),
    /// Only visitors without a session, e.g. the login page.
    Guest,
}

/// Outcome of evaluating a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Checking,
    Granted,
    Redirect(MainRoute),
}

/// Decides what a guard renders. `settled` is false until the guard's own
/// session check has finished, so children never flash before it resolves.
#[must_use]
pub fn decide(mode: GuardMode, state: &AuthState, settled: bool) -> GuardDecision {
    if !settled {
        return GuardDecision::Checking;
    }
    match (mode, state.session_user()) {
        (GuardMode::Guest, None) => GuardDecision::Granted,
        (GuardMode::Guest, Some(_)) => GuardDecision::Redirect(MainRoute::Home),
        (GuardMode::Require(_), None) => GuardDecision::Redirect(MainRoute::Login),
        (GuardMode::Require(capability), Some(user)) if user.can(capability) => {
            GuardDecision::Granted
        }
        (GuardMode::Require(_), Some(_)) => GuardDecision::Redirect(MainRoute::Home),
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub mode: GuardMode,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Guard)]
pub fn guard(props: &GuardProps) -> Html {
    let auth = use_context::<AuthStore>();
    let (state, _) = use_store::<AuthState>();
    let settled = use_state(|| {
        auth.as_ref()
            .is_some_and(|auth| !auth.state().needs_session_fetch())
    });

    {
        let auth = auth.clone();
        let settled = settled.clone();
        use_effect_with((), move |()| {
            if let Some(auth) = auth
                && !*settled
            {
                spawn_local(async move {
                    auth.fetch_user().await;
                    settled.set(true);
                });
            }
            || ()
        });
    }

    if auth.is_none() {
        log::error!("guard rendered without a session store; denying access");
        return html! {};
    }

    match decide(props.mode, &state, *settled) {
        GuardDecision::Checking => html! { <Loading /> },
        GuardDecision::Granted => html! { <>{ props.children.clone() }</> },
        GuardDecision::Redirect(to) => html! { <Redirect<MainRoute> {to} /> },
    }
}
