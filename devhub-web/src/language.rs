use std::collections::HashMap;

/// Information about a supported language
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LanguageInfo {
    /// Raw JSON translation bundle.
    pub translation: &'static str,
}

/// Get a map of supported languages
pub fn supported_languages() -> HashMap<&'static str, LanguageInfo> {
    HashMap::from([(
        "en",
        LanguageInfo {
            translation: include_str!("../translations/en.json"),
        },
    )])
}
