use std::{fmt, rc::Rc};

use crate::models::theme::{Theme, is_docs_path};
use crate::storage::{StateStorage, THEME_STORAGE_KEY};

/// Loads and saves the theme preference.
#[derive(Clone)]
pub struct ThemePreferences {
    storage: Rc<dyn StateStorage>,
}

impl PartialEq for ThemePreferences {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }
}

impl fmt::Debug for ThemePreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreferences").finish_non_exhaustive()
    }
}

impl ThemePreferences {
    /// Preferences kept in `storage`.
    pub fn new(storage: Rc<dyn StateStorage>) -> Self {
        Self { storage }
    }

    /// The preference to start with when the app mounts on `path`.
    ///
    /// A stored value always wins. Without one, documentation pages start
    /// dark and that choice is saved, so it only applies to the first visit.
    #[must_use]
    pub fn initial(&self, path: &str) -> Theme {
        if let Some(theme) = self.stored() {
            return theme;
        }
        if is_docs_path(path) {
            self.save(Theme::Dark);
            return Theme::Dark;
        }
        Theme::System
    }

    fn stored(&self) -> Option<Theme> {
        let raw = self.storage.load(THEME_STORAGE_KEY)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(_) => {
                log::warn!("ignoring unknown stored theme `{raw}`");
                None
            }
        }
    }

    /// Persists `theme`; a failed write is logged and ignored.
    pub fn save(&self, theme: Theme) {
        if let Err(err) = self.storage.save(THEME_STORAGE_KEY, &theme.to_string()) {
            log::warn!("unable to persist theme: {err}");
        }
    }
}
