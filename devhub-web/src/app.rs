use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::DevHubClient;
use crate::config::FrontendConfig;
use crate::containers::theme_provider::ThemeProvider;
use crate::routes::{MainRoute, switch};
use crate::storage::{BrowserStorage, DocumentCookieJar, StateStorage, TokenJar};
use crate::stores::{AuthStore, ThemePreferences, UserListStore};

/// Everything the component tree shares, built once per mount.
#[derive(Clone)]
struct Services {
    cx: yewdux::Context,
    auth: AuthStore,
    users: UserListStore,
    theme: ThemePreferences,
}

impl Services {
    fn browser(config: &FrontendConfig) -> Self {
        let cx = yewdux::Context::new();
        let api_base_url = config.resolved_api_base_url();
        let client = Rc::new(DevHubClient::new(&api_base_url));
        let tokens: Rc<dyn TokenJar> = Rc::new(DocumentCookieJar::default());
        let storage: Rc<dyn StateStorage> = Rc::new(BrowserStorage);

        log::info!("using backend at {api_base_url}");
        Self {
            auth: AuthStore::new(&cx, client.clone(), tokens.clone(), storage.clone()),
            users: UserListStore::new(&cx, client, tokens),
            theme: ThemePreferences::new(storage),
            cx,
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let services = use_state(|| Services::browser(&FrontendConfig::new()));
    let Services {
        cx,
        auth,
        users,
        theme,
    } = (*services).clone();

    html! {
        <ContextProvider<yewdux::Context> context={cx}>
            <ContextProvider<AuthStore> context={auth}>
                <ContextProvider<UserListStore> context={users}>
                    <ThemeProvider preferences={theme}>
                        <BrowserRouter>
                            <Switch<MainRoute> render={switch} />
                        </BrowserRouter>
                    </ThemeProvider>
                </ContextProvider<UserListStore>>
            </ContextProvider<AuthStore>>
        </ContextProvider<yewdux::Context>>
    }
}
