//! Admin console user listing: filters, sortable table and pagination.

use chrono::NaiveDate;
use i18nrs::yew::use_translation;
use shared::models::{ActivityLevel, Role, SortDirection, SortOrder, User, UserFilters};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

use crate::components::loading::Loading;
use crate::models::UserListState;
use crate::stores::UserListStore;

const PAGE_SIZES: [u32; 3] = [10, 20, 50];
const FILTER_ROLES: [Role; 3] = [Role::Admin, Role::Moderator, Role::User];

/// Sort cycle for a column header: ascending, then descending, then unsorted.
#[must_use]
pub fn next_sort(current: Option<&SortOrder>, field: &str) -> Option<SortOrder> {
    match current {
        Some(order) if order.field == field => match order.direction {
            SortDirection::Asc => Some(SortOrder::new(field, SortDirection::Desc)),
            SortDirection::Desc => None,
        },
        _ => Some(SortOrder::new(field, SortDirection::Asc)),
    }
}

fn parse_points(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_enabled(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn toggle_role(roles: &[Role], role: &Role) -> Vec<Role> {
    if roles.contains(role) {
        roles.iter().filter(|existing| *existing != role).cloned().collect()
    } else {
        let mut next = roles.to_vec();
        next.push(role.clone());
        next
    }
}

fn sort_indicator(sort: Option<&SortOrder>, field: &str) -> Html {
    match sort {
        Some(order) if order.field == field => {
            let icon_id = match order.direction {
                SortDirection::Asc => IconId::HeroiconsSolidChevronUp,
                SortDirection::Desc => IconId::HeroiconsSolidChevronDown,
            };
            html! { <Icon {icon_id} class="w-3 h-3 inline" /> }
        }
        _ => html! {},
    }
}

fn user_row(user: &User) -> Html {
    let roles = user
        .roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let joined = user
        .created_at
        .map(|created| created.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let status = match user.enabled {
        Some(false) => html! { <span class="badge badge-error">{ "disabled" }</span> },
        _ => html! { <span class="badge badge-success">{ "enabled" }</span> },
    };

    html! {
        <tr key={user.id.to_string()}>
            <td>{ &user.username }</td>
            <td>{ &user.email }</td>
            <td>{ roles }</td>
            <td>{ user.points.unwrap_or_default() }</td>
            <td>{ status }</td>
            <td>{ joined }</td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
struct FilterPanelProps {
    applied: UserFilters,
    on_apply: Callback<UserFilters>,
    on_reset: Callback<()>,
}

#[function_component(FilterPanel)]
fn filter_panel(props: &FilterPanelProps) -> Html {
    let (i18n, ..) = use_translation();
    let draft = use_state(|| props.applied.clone());

    {
        let draft = draft.clone();
        use_effect_with(props.applied.clone(), move |applied| {
            draft.set(applied.clone());
            || ()
        });
    }

    let edit = |update: fn(&mut UserFilters, String)| {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let value = event
                .target_dyn_into::<HtmlInputElement>()
                .map(|input| input.value())
                .or_else(|| {
                    event
                        .target_dyn_into::<HtmlSelectElement>()
                        .map(|select| select.value())
                });
            if let Some(value) = value {
                let mut next = (*draft).clone();
                update(&mut next, value);
                draft.set(next);
            }
        })
    };

    let role_toggles = FILTER_ROLES.iter().map(|role| {
        let checked = draft.roles.contains(role);
        let onchange = {
            let draft = draft.clone();
            let role = role.clone();
            Callback::from(move |_: Event| {
                let mut next = (*draft).clone();
                next.roles = toggle_role(&next.roles, &role);
                draft.set(next);
            })
        };
        html! {
            <label class="label cursor-pointer gap-2">
                <input type="checkbox" class="checkbox checkbox-sm" {checked} {onchange} />
                <span class="label-text">{ role.as_str() }</span>
            </label>
        }
    });

    let on_apply = {
        let draft = draft.clone();
        let apply = props.on_apply.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            apply.emit((*draft).clone());
        })
    };
    let on_reset = props.on_reset.reform(|_: MouseEvent| ());

    let enabled_value = match draft.enabled {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    };
    let activity_value = draft
        .activity_level
        .map(|level| level.to_string())
        .unwrap_or_default();

    html! {
        <form class="card bg-base-200 p-4 space-y-3" onsubmit={on_apply}>
            <h2 class="font-semibold">{ i18n.t("admin.filters.title") }</h2>
            <div class="flex flex-wrap gap-2">{ for role_toggles }</div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                <input
                    type="number"
                    class="input input-bordered input-sm"
                    placeholder={i18n.t("admin.filters.min_points")}
                    value={draft.min_points.map(|points| points.to_string()).unwrap_or_default()}
                    onchange={edit(|filters, value| filters.min_points = parse_points(&value))}
                />
                <input
                    type="number"
                    class="input input-bordered input-sm"
                    placeholder={i18n.t("admin.filters.max_points")}
                    value={draft.max_points.map(|points| points.to_string()).unwrap_or_default()}
                    onchange={edit(|filters, value| filters.max_points = parse_points(&value))}
                />
                <select
                    class="select select-bordered select-sm"
                    onchange={edit(|filters, value| filters.enabled = parse_enabled(&value))}
                >
                    <option value="" selected={enabled_value.is_empty()}>{ i18n.t("admin.filters.any_status") }</option>
                    <option value="true" selected={enabled_value == "true"}>{ i18n.t("admin.filters.enabled") }</option>
                    <option value="false" selected={enabled_value == "false"}>{ i18n.t("admin.filters.disabled") }</option>
                </select>
                <select
                    class="select select-bordered select-sm"
                    onchange={edit(|filters, value| filters.activity_level = value.parse().ok())}
                >
                    <option value="" selected={activity_value.is_empty()}>{ i18n.t("admin.filters.any_activity") }</option>
                    { for ActivityLevel::iter().map(|level| {
                        let value = level.to_string();
                        let selected = value == activity_value;
                        html! { <option value={value.clone()} {selected}>{ value }</option> }
                    }) }
                </select>
                <label class="form-control">
                    <span class="label-text text-xs">{ i18n.t("admin.filters.registered_since") }</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        value={draft.registration_date.map(|date| date.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                        onchange={edit(|filters, value| filters.registration_date = parse_date(&value))}
                    />
                </label>
            </div>
            <div class="flex gap-2 justify-end">
                <button type="button" class="btn btn-ghost btn-sm" onclick={on_reset}>
                    { i18n.t("admin.filters.reset") }
                </button>
                <button type="submit" class="btn btn-primary btn-sm">
                    { i18n.t("admin.filters.apply") }
                </button>
            </div>
        </form>
    }
}

#[function_component(AdminUsersPage)]
pub fn admin_users_page() -> Html {
    let (i18n, ..) = use_translation();
    let users = use_context::<UserListStore>();
    let (state, _) = use_store::<UserListState>();

    {
        let users = users.clone();
        use_effect_with(state.query.clone(), move |_| {
            if let Some(users) = users {
                spawn_local(async move { users.fetch_users().await });
            }
            || ()
        });
    }

    let Some(users) = users else {
        log::error!("admin console rendered without a user list store");
        return html! {};
    };

    let on_apply = {
        let users = users.clone();
        Callback::from(move |filters: UserFilters| users.set_filters(filters))
    };
    let on_reset = {
        let users = users.clone();
        Callback::from(move |()| users.reset_filters())
    };

    let header = |field: &'static str, label_key: &str| {
        let onclick = {
            let users = users.clone();
            let current = state.query.sort.clone();
            Callback::from(move |_: MouseEvent| {
                users.set_sort(next_sort(current.as_ref(), field));
            })
        };
        html! {
            <th class="cursor-pointer select-none" {onclick}>
                { i18n.t(label_key) }{ " " }{ sort_indicator(state.query.sort.as_ref(), field) }
            </th>
        }
    };

    let page = state.query.page;
    let on_previous = {
        let users = users.clone();
        Callback::from(move |_: MouseEvent| users.set_page(page.saturating_sub(1)))
    };
    let on_next = {
        let users = users.clone();
        Callback::from(move |_: MouseEvent| users.set_page(page + 1))
    };
    let on_page_size = {
        let users = users.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>()
                && let Ok(size) = select.value().parse()
            {
                users.set_page_size(size);
            }
        })
    };

    let body = if state.loading && state.users.is_empty() {
        html! { <tr><td colspan="6"><Loading /></td></tr> }
    } else if state.users.is_empty() {
        html! { <tr><td colspan="6" class="text-center">{ i18n.t("admin.users.empty") }</td></tr> }
    } else {
        state.users.iter().map(user_row).collect::<Html>()
    };

    html! {
        <div class="p-4 space-y-4">
            <h1 class="text-2xl font-bold">{ i18n.t("admin.users.title") }</h1>
            <FilterPanel applied={state.query.filters.clone()} {on_apply} {on_reset} />
            if let Some(error) = &state.error {
                <div class="alert alert-error"><span>{ error }</span></div>
            }
            <div class="overflow-x-auto">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            { header("username", "admin.users.username") }
                            { header("email", "admin.users.email") }
                            <th>{ i18n.t("admin.users.roles") }</th>
                            { header("points", "admin.users.points") }
                            { header("enabled", "admin.users.status") }
                            { header("createdAt", "admin.users.joined") }
                        </tr>
                    </thead>
                    <tbody>{ body }</tbody>
                </table>
            </div>
            <div class="flex items-center justify-between">
                <span class="text-sm">
                    { format!("{} {}", state.total_elements, i18n.t("admin.users.total")) }
                </span>
                <div class="join">
                    <button class="join-item btn btn-sm" disabled={!state.has_previous_page()} onclick={on_previous}>{ "«" }</button>
                    <button class="join-item btn btn-sm btn-disabled">
                        { format!("{} / {}", page + 1, state.total_pages.max(1)) }
                    </button>
                    <button class="join-item btn btn-sm" disabled={!state.has_next_page()} onclick={on_next}>{ "»" }</button>
                </div>
                <select class="select select-bordered select-sm" onchange={on_page_size}>
                    { for PAGE_SIZES.iter().map(|size| html! {
                        <option value={size.to_string()} selected={*size == state.query.size}>{ size.to_string() }</option>
                    }) }
                </select>
            </div>
        </div>
    }
}
