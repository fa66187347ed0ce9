use crate::models::AuthState;
use i18nrs::yew::use_translation;
use shared::models::{Capability, Role};
use yew::{Html, function_component, html};
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_selector;

#[function_component(ModerationPage)]
pub fn moderation_page() -> Html {
    let (i18n, _) = use_translation();
    let state = use_selector(|state: &AuthState| state.clone());
    let roles = state
        .session_user()
        .map(|user| {
            user.roles
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">
                <Icon icon_id={IconId::HeroiconsOutlineShieldCheck} class="w-6 h-6 inline mr-2" />
                { i18n.t("moderation.title") }
            </h1>
            <p class="text-sm text-base-content/70">
                { format!("{}: {roles}", i18n.t("moderation.signed_in_as")) }
            </p>
            <div class="card bg-base-200">
                <div class="card-body">
                    <h2 class="card-title">{ i18n.t("moderation.queue.title") }</h2>
                    <p>{ i18n.t("moderation.queue.empty") }</p>
                </div>
            </div>
            if state.has_capability(Capability::Admin) {
                <div class="alert alert-info">
                    <span>{ i18n.t("moderation.admin_hint") }</span>
                </div>
            }
        </div>
    }
}
