use crate::config::FrontendConfig;
use crate::models::AuthState;
use crate::routes::MainRoute;
use i18nrs::yew::use_translation;
use shared::models::Capability;
use yew::{Html, function_component, html};
use yew_icons::{Icon, IconId};
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// Landing page with entry points into each area the session can reach.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let (i18n, _) = use_translation();
    let state = use_selector(|state: &AuthState| state.clone());
    let config = FrontendConfig::new();
    let documentation_url = config.documentation_url().to_string();

    let greeting = match state.session_user() {
        Some(user) => format!("{}, {}", i18n.t("home.welcome_back"), user.display_name()),
        None => i18n.t("home.welcome"),
    };

    let card = |icon_id: IconId, key: &str, to: MainRoute| {
        html! {
            <div class="card bg-base-200 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">
                        <Icon {icon_id} class="w-6 h-6" />
                        { i18n.t(&format!("home.cards.{key}.title")) }
                    </h2>
                    <p>{ i18n.t(&format!("home.cards.{key}.description")) }</p>
                    <div class="card-actions justify-end">
                        <Link<MainRoute> {to} classes="btn btn-primary">
                            { i18n.t(&format!("home.cards.{key}.action")) }
                        </Link<MainRoute>>
                    </div>
                </div>
            </div>
        }
    };

    html! {
        <div class="p-4 space-y-6">
            <h1 class="text-2xl font-bold">{ greeting }</h1>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                { card(IconId::HeroiconsOutlineDocumentText, "docs", MainRoute::Docs) }
                if state.has_capability(Capability::Moderator) {
                    { card(IconId::HeroiconsOutlineShieldCheck, "moderation", MainRoute::Moderation) }
                }
                if state.has_capability(Capability::Admin) {
                    { card(IconId::HeroiconsOutlineUsers, "admin", MainRoute::AdminUsers) }
                }
                if state.session_user().is_none() {
                    { card(IconId::HeroiconsOutlineUserPlus, "register", MainRoute::Register) }
                }
            </div>

            <a href={documentation_url} class="link link-secondary">
                { i18n.t("home.documentation_link") }
            </a>
        </div>
    }
}
