use crate::{models::AuthState, routes::MainRoute, stores::AuthStore};
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

#[derive(yew::Properties, PartialEq)]
pub struct UserDropdownProps {
    #[prop_or_default]
    pub on_logout: Option<Callback<()>>,
}

#[function_component(UserDropdown)]
pub fn user_dropdown(props: &UserDropdownProps) -> Html {
    let navigator = use_navigator();
    let auth = use_context::<AuthStore>();
    let (i18n, ..) = use_translation();
    let user_state = use_selector(|state: &AuthState| state.session_user().cloned());
    let Some(user) = (*user_state).clone() else {
        return html! {};
    };

    let is_admin = auth.as_ref().is_some_and(AuthStore::check_is_admin);

    let logout_button = {
        let on_logout = props.on_logout.clone();
        let onclick = Callback::from(move |event: yew::MouseEvent| {
            event.prevent_default();
            match &auth {
                Some(auth) => auth.logout(),
                None => log::error!("logout requested without a session store"),
            }
            if let Some(callback) = &on_logout {
                callback.emit(());
            }
            if let Some(navigator) = &navigator {
                navigator.push(&MainRoute::Login);
            }
        });
        html! {
            <li><a {onclick}>{i18n.t("header.logout")}</a></li>
        }
    };

    let points = user.points.map(|points| {
        html! {
            <div class="text-xs text-base-content/70">
                { format!("{points} {}", i18n.t("header.points")) }
            </div>
        }
    });

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost btn-circle mb-1">
                <Icon icon_id={IconId::HeroiconsSolidUserCircle} class="w-6 h-6" />
            </div>
            <ul tabIndex={0} class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                <li class="px-2 py-1 text-left">
                    <div class="text-sm font-semibold text-base-content">
                        { user.display_name() }
                        if is_admin {
                            <span class="badge badge-primary badge-sm ml-2">{ i18n.t("header.admin_badge") }</span>
                        }
                    </div>
                    <div class="text-xs text-base-content/70">{ &user.email }</div>
                    { for points }
                </li>
                <div class="divider my-0"></div>
                {logout_button}
            </ul>
        </div>
    }
}
