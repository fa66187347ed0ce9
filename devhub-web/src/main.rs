//! DevHub community web client.

mod api;
mod app;
mod app_test;
mod components;
mod config;
mod containers;
mod language;
mod logging;
mod models;
mod pages;
mod routes;
mod storage;
mod stores;
#[cfg(test)]
mod test_support;

use app::App;
use config::FrontendConfig;
use i18nrs::yew::I18nProvider;
use i18nrs::yew::I18nProviderConfig;
use language::supported_languages;
use std::collections::HashMap;
use yew::Renderer;
use yew::{Html, function_component, html};

#[function_component(InternationalApp)]
fn international_app() -> Html {
    let translations: HashMap<&str, &str> = supported_languages()
        .iter()
        .map(|(&key, value)| (key, value.translation))
        .collect();

    let config = I18nProviderConfig {
        translations,
        default_language: "en".to_string(),
        ..Default::default()
    };

    html! {
        <I18nProvider ..config>
            <App />
        </I18nProvider>
    }
}

fn main() {
    let config = FrontendConfig::new();
    logging::init(config.log_level);

    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        match info.location() {
            Some(location) => log::error!(
                "panic: {payload} at {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ),
            None => log::error!("panic: {payload}"),
        }
    }));

    log::info!("starting DevHub");

    let body = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body());
    match body {
        Some(body) => {
            Renderer::<InternationalApp>::with_root(body.into()).render();
        }
        None => log::error!("no document body to mount into"),
    }
}
