use serde_json::Value;
use thiserror::Error;

/// Locale the widget is shown in.
pub const DEFAULT_LANG: &str = "zh-Hant";
/// Locale consulted for keys missing from the active bundle.
pub const FALLBACK_LANG: &str = "en";

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("zh-Hant", include_str!("../../i18n/zh-Hant.json")),
    ("en", include_str!("../../i18n/en.json")),
];

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("no translations bundled for locale `{0}`")]
    Unknown(String),
    #[error("translations for `{lang}` are malformed: {source}")]
    Malformed {
        lang: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse the bundled translation table for `lang`.
///
/// # Errors
///
/// Returns [`LocaleError::Unknown`] when no table is bundled for `lang` and
/// [`LocaleError::Malformed`] when the bundled JSON does not parse.
pub fn load_translations(lang: &str) -> Result<Value, LocaleError> {
    let data = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
        .ok_or_else(|| LocaleError::Unknown(lang.to_string()))?;

    serde_json::from_str(data).map_err(|source| LocaleError::Malformed {
        lang: lang.to_string(),
        source,
    })
}
