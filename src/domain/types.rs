// ==========================================
// HTU Schedule - domain value types
// ==========================================
// Display language, text direction, UI views and the
// enrollment mode switch. Stored/serialized as strings.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Language
// ==========================================
// Display locale of the UI and of exported sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En, // English
    Ar, // Arabic
}

impl Language {
    /// Locale code understood by rust-i18n
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Text direction of the locale
    pub fn direction(&self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::Ar => TextDirection::Rtl,
        }
    }

    /// Parse a locale code, ignoring case and region suffixes ("ar-JO" -> Ar)
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase();
        let primary = normalized.split(['-', '_']).next().unwrap_or("");
        match primary {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// The other language (language toggle)
    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    /// Pick the localized variant of a bilingual name
    pub fn pick<'a>(&self, name_en: &'a str, name_ar: &'a str) -> &'a str {
        match self {
            Language::En => name_en,
            Language::Ar => name_ar,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ==========================================
// TextDirection
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextDirection::Ltr => write!(f, "ltr"),
            TextDirection::Rtl => write!(f, "rtl"),
        }
    }
}

// ==========================================
// View
// ==========================================
// The five screens of the UI surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Registration,
    Lookup,
    AddSections,
    RebuildSections,
    Summary,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Registration,
        View::Lookup,
        View::AddSections,
        View::RebuildSections,
        View::Summary,
    ];

    /// i18n key of the navigation label
    pub fn nav_key(&self) -> &'static str {
        match self {
            View::Registration => "nav.registration",
            View::Lookup => "nav.lookup",
            View::AddSections => "nav.add_sections",
            View::RebuildSections => "nav.rebuild_sections",
            View::Summary => "nav.summary",
        }
    }
}

// ==========================================
// EnrollmentMode
// ==========================================
// ReadThenWrite: read, compare, write enrolled+1 (lost update possible)
// Conditional:   single guarded UPDATE ... WHERE enrolled < capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentMode {
    ReadThenWrite,
    Conditional,
}

impl EnrollmentMode {
    /// Parse the config value; unknown values yield None
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "READ_THEN_WRITE" => Some(EnrollmentMode::ReadThenWrite),
            "CONDITIONAL" => Some(EnrollmentMode::Conditional),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            EnrollmentMode::ReadThenWrite => "READ_THEN_WRITE",
            EnrollmentMode::Conditional => "CONDITIONAL",
        }
    }
}

impl Default for EnrollmentMode {
    fn default() -> Self {
        EnrollmentMode::ReadThenWrite
    }
}

impl fmt::Display for EnrollmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("AR"), Some(Language::Ar));
        assert_eq!(Language::from_code("ar-JO"), Some(Language::Ar));
        assert_eq!(Language::from_code("en_US"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn test_language_direction_and_toggle() {
        assert_eq!(Language::En.direction(), TextDirection::Ltr);
        assert!(Language::Ar.direction().is_rtl());
        assert_eq!(Language::En.toggled(), Language::Ar);
        assert_eq!(Language::Ar.toggled().toggled(), Language::Ar);
        assert_eq!(Language::Ar.pick("Security", "الأمن"), "الأمن");
    }

    #[test]
    fn test_language_serde() {
        let json = serde_json::to_string(&Language::Ar).unwrap();
        assert_eq!(json, "\"ar\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }

    #[test]
    fn test_enrollment_mode_parse() {
        assert_eq!(
            EnrollmentMode::from_str("read_then_write"),
            Some(EnrollmentMode::ReadThenWrite)
        );
        assert_eq!(
            EnrollmentMode::from_str(" CONDITIONAL "),
            Some(EnrollmentMode::Conditional)
        );
        assert_eq!(EnrollmentMode::from_str("LOCKING"), None);
        assert_eq!(EnrollmentMode::default(), EnrollmentMode::ReadThenWrite);
    }

    #[test]
    fn test_view_nav_keys_are_distinct() {
        let mut keys: Vec<&str> = View::ALL.iter().map(|v| v.nav_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 5);
    }
}
