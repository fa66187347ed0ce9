use shared::models::Capability;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::guard::{Guard, GuardMode};
use crate::containers::layout::Layout;
use crate::pages::*;

/// The main routes
#[derive(Debug, Clone, PartialEq, Eq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/docs")]
    Docs,
    #[at("/docs/:slug")]
    DocsPage { slug: String },
    #[at("/moderation")]
    Moderation,
    #[at("/admin")]
    Admin,
    #[at("/admin/users")]
    AdminUsers,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Routes offered in the header, in display order.
pub const NAV_ROUTES: [MainRoute; 4] = [
    MainRoute::Home,
    MainRoute::Docs,
    MainRoute::Moderation,
    MainRoute::AdminUsers,
];

impl MainRoute {
    /// Access rule for the route; `None` means public.
    #[must_use]
    pub fn guard_mode(&self) -> Option<GuardMode> {
        match self {
            Self::Login | Self::Register => Some(GuardMode::Guest),
            Self::Moderation => Some(GuardMode::Require(Capability::Moderator)),
            Self::Admin | Self::AdminUsers => Some(GuardMode::Require(Capability::Admin)),
            Self::Home | Self::Docs | Self::DocsPage { .. } | Self::NotFound => None,
        }
    }

    /// Whether a link to the route should be offered, given the session's
    /// capability check.
    #[must_use]
    pub fn is_visible_to(&self, has: impl Fn(Capability) -> bool) -> bool {
        match self.guard_mode() {
            None => true,
            Some(GuardMode::Guest) => !has(Capability::Authenticated),
            Some(GuardMode::Require(capability)) => has(capability),
        }
    }

    /// Translation key of the route's navigation label.
    #[must_use]
    pub fn nav_key(&self) -> &'static str {
        match self {
            Self::Home => "nav.home",
            Self::Login => "nav.login",
            Self::Register => "nav.register",
            Self::Docs | Self::DocsPage { .. } => "nav.docs",
            Self::Moderation => "nav.moderation",
            Self::Admin | Self::AdminUsers => "nav.admin",
            Self::NotFound => "nav.not_found",
        }
    }
}

fn page_for(route: &MainRoute) -> Html {
    match route {
        MainRoute::Home => html! { <HomePage /> },
        MainRoute::Login => html! { <LoginPage /> },
        MainRoute::Register => html! { <RegisterPage /> },
        MainRoute::Docs => html! { <DocsPage /> },
        MainRoute::DocsPage { slug } => html! { <DocsPage slug={Some(slug.clone())} /> },
        MainRoute::Moderation => html! { <ModerationPage /> },
        MainRoute::Admin => html! { <Redirect<MainRoute> to={MainRoute::AdminUsers} /> },
        MainRoute::AdminUsers => html! { <AdminUsersPage /> },
        MainRoute::NotFound => html! { <ErrorPage /> },
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute) -> Html {
    log::debug!("switching to route {route:?}");
    let page = page_for(&route);
    let content = match route.guard_mode() {
        Some(mode) => html! { <Guard {mode}>{page}</Guard> },
        None => page,
    };
    html! {
        <Layout current_route={route}>
            {content}
        </Layout>
    }
}
