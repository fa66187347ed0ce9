use i18nrs::yew::use_translation;
use yew::{Callback, Classes, Html, Properties, function_component, html, use_context};
use yew_icons::{Icon, IconId};

use crate::containers::theme_provider::ThemeContext;
use crate::models::Theme;

#[derive(Properties, PartialEq, Eq)]
pub struct ThemeSwitcherProps {
    #[prop_or_default]
    pub class: Classes,
}

/// Cycles dark → light → system.
#[function_component(ThemeSwitcher)]
pub fn theme_switcher(props: &ThemeSwitcherProps) -> Html {
    let (i18n, ..) = use_translation();
    let Some(theme) = use_context::<ThemeContext>() else {
        return html! {};
    };

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: yew::MouseEvent| theme.set.emit(theme.theme.next()))
    };

    let theme_icon = match theme.theme {
        Theme::Dark => IconId::HeroiconsSolidMoon,
        Theme::Light => IconId::HeroiconsSolidSun,
        Theme::System => IconId::HeroiconsSolidComputerDesktop,
    };

    html! {
        <div class={props.class.clone()}>
            <button
                class="btn btn-ghost btn-circle"
                onclick={toggle_theme}
                aria-label={i18n.t("theme.selector")}
                title={theme.theme.to_string()}
            >
                <Icon icon_id={theme_icon} class="h-5 w-5" />
            </button>
        </div>
    }
}
