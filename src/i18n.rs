//! Translation table for the captions and messages the prompts render.
//!
//! The table is embedded in the binary and parsed once. The active language
//! is process-wide: it starts out as the one detected from the locale
//! environment and can be switched at any time with [`set_language`]. Every
//! lookup reads the language current at that moment.

use std::{
    collections::HashMap,
    env,
    sync::{LazyLock, PoisonError, RwLock},
};

use log::debug;
use rust_embed::Embed;

pub const DEFAULT_LANGUAGE: &str = "en";

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Embed)]
#[folder = "resources/"]
#[include = "i18n.json"]
struct Assets;

type Table = HashMap<String, HashMap<String, String>>;

#[allow(clippy::expect_used)]
static TRANSLATIONS: LazyLock<Table> = LazyLock::new(|| {
    let file = Assets::get("i18n.json").expect("i18n.json embedded");
    serde_json::from_slice(&file.data).expect("valid i18n.json")
});

static LANGUAGE: LazyLock<RwLock<String>> = LazyLock::new(|| RwLock::new(detect_language()));

/// Serializes tests that switch the process-wide language.
#[cfg(test)]
pub(crate) static LANGUAGE_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Looks up `key` for `lang`, falling back to English and then to the key.
#[must_use]
pub fn translate(lang: &str, key: &str) -> String {
    TRANSLATIONS
        .get(lang)
        .and_then(|t| t.get(key))
        .or_else(|| TRANSLATIONS.get(DEFAULT_LANGUAGE).and_then(|t| t.get(key)))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

/// Translates `key` into the active language.
#[must_use]
pub fn tr(key: &str) -> String {
    translate(&current_language(), key)
}

/// Sets the process-wide language. Accepts plain codes (`zh`) as well as
/// locale strings (`zh_CN.UTF-8`).
///
/// Prompts started afterwards pick up the new language, unless their
/// [`Dialog`](crate::Dialog) carries its own.
pub fn set_language(code: &str) {
    let code = normalize_language(code);
    debug!("Switching language to {code}");
    *LANGUAGE.write().unwrap_or_else(PoisonError::into_inner) = code;
}

#[must_use]
pub fn current_language() -> String {
    LANGUAGE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[must_use]
pub fn is_supported(code: &str) -> bool {
    TRANSLATIONS.contains_key(code)
}

fn detect_language() -> String {
    LOCALE_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .map_or_else(|| DEFAULT_LANGUAGE.to_string(), |v| normalize_language(&v))
}

/// `zh_CN.UTF-8` -> `zh`, `en-US` -> `en`, `C` / `POSIX` -> `en`.
pub(crate) fn normalize_language(locale: &str) -> String {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match base.as_str() {
        "" | "c" | "posix" => DEFAULT_LANGUAGE.to_string(),
        _ => base,
    }
}

/// Captions for the dialog buttons in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLabels {
    pub ok: String,
    pub cancel: String,
    pub yes: String,
    pub no: String,
}

impl ButtonLabels {
    #[must_use]
    pub fn for_language(lang: &str) -> Self {
        Self {
            ok: translate(lang, "ok"),
            cancel: translate(lang, "cancel"),
            yes: translate(lang, "yes"),
            no: translate(lang, "no"),
        }
    }

    /// Labels for the active language.
    #[must_use]
    pub fn current() -> Self {
        Self::for_language(&current_language())
    }

    /// Caption overrides in the form the dialog program takes them.
    pub(crate) fn to_args(&self) -> Vec<String> {
        vec![
            "--ok-label".to_string(),
            self.ok.clone(),
            "--cancel-label".to_string(),
            self.cancel.clone(),
            "--yes-label".to_string(),
            self.yes.clone(),
            "--no-label".to_string(),
            self.no.clone(),
        ]
    }
}
