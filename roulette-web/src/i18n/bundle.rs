use crate::i18n::locales::{DEFAULT_LANG, FALLBACK_LANG, load_translations};
use serde_json::Value;

pub(super) struct I18nBundle {
    pub(super) lang: String,
    pub(super) translations: Value,
    pub(super) fallback: Value,
}

fn empty_table() -> Value {
    Value::Object(serde_json::Map::new())
}

fn table_or_empty(lang: &str) -> Value {
    load_translations(lang).unwrap_or_else(|err| {
        log::error!("{err}");
        empty_table()
    })
}

fn build_bundle(lang: &str) -> I18nBundle {
    I18nBundle {
        lang: lang.to_string(),
        translations: table_or_empty(lang),
        fallback: table_or_empty(FALLBACK_LANG),
    }
}

thread_local! {
    static CURRENT: I18nBundle = build_bundle(DEFAULT_LANG);
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(f)
}

/// Language code of the active bundle.
#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
