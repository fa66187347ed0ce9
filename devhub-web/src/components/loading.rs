use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};

/// Placeholder shown while the session is being resolved.
#[function_component(Loading)]
pub fn loading() -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="flex flex-col items-center justify-center h-full animate-fadeIn" role="status" aria-live="polite">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium flex items-center gap-2">
                    <span>{ i18n.t("app.title") }</span>
                </div>
                <div class="mt-3 flex items-center gap-2">
                    <span class="loading loading-dots loading-md"></span>
                    <span>{ i18n.t("guard.checking") }</span>
                </div>
            </div>
        </div>
    }
}
