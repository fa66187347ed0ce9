use crate::{
    components::{
        header_nav_item::HeaderNavItem, theme_switcher::ThemeSwitcher, user_dropdown::UserDropdown,
    },
    models::AuthState,
    routes::{MainRoute, NAV_ROUTES},
};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    #[prop_or_default]
    pub current_route: Option<MainRoute>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let (i18n, ..) = use_translation();
    let state = use_selector(|state: &AuthState| state.clone());
    let is_authenticated = state.session_user().is_some();

    let routes = NAV_ROUTES
        .iter()
        .filter(|route| route.is_visible_to(|capability| state.has_capability(capability)))
        .map(|route| {
            html! {
                <HeaderNavItem
                    current_route={props.current_route.clone()}
                    route={route.clone()}
                />
            }
        })
        .collect::<Html>();

    html! {
        <nav class="navbar justify-between bg-base-300">
            <a class="btn btn-ghost text-lg">
                <Link<MainRoute> to={MainRoute::Home} classes="text-lg">
                    {i18n.t("app.title")}
                </Link<MainRoute>>
            </a>
            <ul class="menu menu-horizontal">
                {routes}
            </ul>
            <div class="flex items-center gap-2">
                <ThemeSwitcher />
                {
                    if is_authenticated {
                        html! { <UserDropdown /> }
                    } else {
                        html! {
                            <Link<MainRoute> to={MainRoute::Login} classes="btn btn-primary btn-sm">
                                {i18n.t("header.login")}
                            </Link<MainRoute>>
                        }
                    }
                }
            </div>
        </nav>
    }
}
