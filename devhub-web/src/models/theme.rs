use strum_macros::{Display, EnumIter, EnumString};

/// User-selected color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    /// Follow the operating system.
    #[default]
    System,
}

/// The scheme actually painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Appearance {
    Dark,
    Light,
}

impl Theme {
    /// Scheme to paint given the current OS preference.
    #[must_use]
    pub fn resolve(self, system_prefers_dark: bool) -> Appearance {
        match self {
            Self::Dark => Appearance::Dark,
            Self::Light => Appearance::Light,
            Self::System if system_prefers_dark => Appearance::Dark,
            Self::System => Appearance::Light,
        }
    }

    /// Whether the painted scheme tracks the operating system.
    #[must_use]
    pub fn follows_system(self) -> bool {
        self == Self::System
    }

    /// Next preference in the switcher cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::System,
            Self::System => Self::Dark,
        }
    }
}

/// Documentation routes start dark on a first visit.
#[must_use]
pub fn is_docs_path(path: &str) -> bool {
    path == "/docs" || path.starts_with("/docs/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_stored_values() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("system".parse::<Theme>().unwrap(), Theme::System);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn resolves_system_from_media_query() {
        assert_eq!(Theme::System.resolve(true), Appearance::Dark);
        assert_eq!(Theme::System.resolve(false), Appearance::Light);
        assert_eq!(Theme::Light.resolve(true), Appearance::Light);
        assert_eq!(Theme::Dark.resolve(false).to_string(), "dark");
    }

    #[test]
    fn only_system_tracks_the_os() {
        assert!(Theme::System.follows_system());
        assert!(!Theme::Dark.follows_system());
        assert!(!Theme::Light.follows_system());
    }

    #[test]
    fn cycle_visits_every_theme() {
        for theme in Theme::iter() {
            assert_eq!(theme.next().next().next(), theme);
            assert_ne!(theme.next(), theme);
        }
    }

    #[test]
    fn docs_paths() {
        assert!(is_docs_path("/docs"));
        assert!(is_docs_path("/docs/getting-started"));
        assert!(!is_docs_path("/docsearch"));
        assert!(!is_docs_path("/"));
    }
}
