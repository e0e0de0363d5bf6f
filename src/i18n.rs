// ==========================================
// Internationalisation (i18n)
// ==========================================
// rust-i18n with locales/en.yml and locales/ar.yml (fallback en)
// The process-wide locale drives UI messages; exports pass an
// explicit language through t_for.
// ==========================================
// Note: rust_i18n::i18n! is invoked in lib.rs
// ==========================================

use crate::domain::types::{Language, View};
use serde::Serialize;

/// Current locale code
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Set the locale by code ("en" / "ar")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Current display language (unknown locale codes read as English)
pub fn current_language() -> Language {
    Language::from_code(&current_locale()).unwrap_or_default()
}

/// Switch the display language
pub fn set_language(lang: Language) {
    set_locale(lang.code());
}

/// Translate in the current locale
///
/// # Example
/// ```no_run
/// use htu_schedule::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate in the current locale, replacing `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use htu_schedule::i18n::t_with_args;
/// let msg = t_with_args("summary.exported", &[("path", "/tmp/HTU_Schedule_Final.xlsx")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// Translate in an explicit language, independent of the current locale
pub fn t_for(lang: Language, key: &str) -> String {
    rust_i18n::t!(key, locale = lang.code()).to_string()
}

/// `t_for` with `%{name}` placeholders
pub fn t_for_with_args(lang: Language, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(t_for(lang, key), args)
}

fn fill_args(mut text: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        text = text.replace(&placeholder, v);
    }
    text
}

/// Serializes unit tests that change the global locale
/// Navigation label of one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: String,
}

/// Navigation bar entries in display order
pub fn navigation(lang: Language) -> Vec<NavItem> {
    View::ALL
        .iter()
        .map(|&view| NavItem {
            view,
            label: t_for(lang, view.nav_key()),
        })
        .collect()
}

#[cfg(test)]
pub(crate) static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
