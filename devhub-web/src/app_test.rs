//! Browser tests for the persistence adapters
//!
//! These need a real `document` and `localStorage`, so they only run under
//! `wasm-bindgen-test` in a browser.

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use crate::storage::{
        BrowserStorage, DocumentCookieJar, StateStorage, THEME_STORAGE_KEY, TokenJar,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        let storage = BrowserStorage;
        storage.save(THEME_STORAGE_KEY, "light").unwrap();
        assert_eq!(storage.load(THEME_STORAGE_KEY).as_deref(), Some("light"));
        storage.remove(THEME_STORAGE_KEY);
        assert_eq!(storage.load(THEME_STORAGE_KEY), None);
    }

    #[wasm_bindgen_test]
    fn token_cookie_is_written_and_cleared() {
        let jar = DocumentCookieJar::default();
        jar.store("browser-token");
        assert_eq!(jar.token().as_deref(), Some("browser-token"));
        jar.clear();
        assert_eq!(jar.token(), None);
    }
}
