use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{MediaQueryList, window};
use yew::prelude::*;

use crate::models::Theme;
use crate::stores::ThemePreferences;

/// Current preference plus a setter that persists it.
#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    /// The stored preference.
    pub theme: Theme,
    /// Persists and applies a new preference.
    pub set: Callback<Theme>,
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub preferences: ThemePreferences,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = {
        let preferences = props.preferences.clone();
        use_state(move || preferences.initial(&current_path()))
    };

    use_effect_with(*theme, |theme| {
        apply_theme(*theme);
        let listener = theme
            .follows_system()
            .then(SchemeListener::attach)
            .flatten();
        move || drop(listener)
    });

    let set = {
        let theme = theme.clone();
        let preferences = props.preferences.clone();
        Callback::from(move |next: Theme| {
            preferences.save(next);
            theme.set(next);
        })
    };

    let context = ThemeContext { theme: *theme, set };

    html! {
        <ContextProvider<ThemeContext> {context}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

fn current_path() -> String {
    window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn scheme_query() -> Option<MediaQueryList> {
    window().and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
}

fn system_prefers_dark() -> bool {
    scheme_query().is_some_and(|media_query| media_query.matches())
}

/// Repaints a `System` theme whenever the OS scheme flips. Detaches on drop.
struct SchemeListener {
    media_query: MediaQueryList,
    _on_change: Closure<dyn FnMut()>,
}

impl SchemeListener {
    fn attach() -> Option<Self> {
        let media_query = scheme_query()?;
        let on_change = Closure::wrap(Box::new(|| {
            log::debug!("system color scheme changed");
            apply_theme(Theme::System);
        }) as Box<dyn FnMut()>);
        media_query.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        Some(Self {
            media_query,
            _on_change: on_change,
        })
    }
}

impl Drop for SchemeListener {
    fn drop(&mut self) {
        self.media_query.set_onchange(None);
    }
}

/// Paints the resolved scheme on the `<html>` element.
fn apply_theme(theme: Theme) {
    let appearance = theme.resolve(system_prefers_dark());
    if let Some(window) = window()
        && let Some(document) = window.document()
        && let Some(html_element) = document.document_element()
    {
        if let Err(err) = html_element.set_attribute("data-theme", &appearance.to_string()) {
            log::warn!("unable to apply theme: {err:?}");
        }
    }
}
