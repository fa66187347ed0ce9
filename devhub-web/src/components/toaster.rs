use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

use crate::models::{Toast, ToastQueue, ToastVariant};

const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let (i18n, ..) = use_translation();

    {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(id, move |id| {
            let id = *id;
            let timeout = Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let alert_class = match props.toast.variant {
        ToastVariant::Default => "alert-info",
        ToastVariant::Destructive => "alert-error",
    };

    let onclick = {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div role="alert" class={classes!("alert", alert_class, "shadow-lg")}>
            <div>
                <h3 class="font-bold">{ &props.toast.title }</h3>
                if let Some(description) = &props.toast.description {
                    <div class="text-xs">{ description }</div>
                }
            </div>
            <button class="btn btn-ghost btn-xs" aria-label={i18n.t("toast.dismiss")} {onclick}>
                <Icon icon_id={IconId::HeroiconsOutlineXMark} class="w-4 h-4" />
            </button>
        </div>
    }
}

/// Renders queued toasts in the corner of the viewport.
#[function_component(Toaster)]
pub fn toaster() -> Html {
    let (queue, dispatch) = use_store::<ToastQueue>();
    let on_dismiss = dispatch.reduce_mut_callback_with(|queue, id: u64| queue.dismiss(id));

    html! {
        <div class="toast toast-end z-50">
            { for queue.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
            }) }
        </div>
    }
}
