//! Supported locales and per-locale row content.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the portal content can be authored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
    De,
    Pt,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Es, Locale::Fr, Locale::De, Locale::Pt];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Pt => "pt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
            Locale::Fr => "Français",
            Locale::De => "Deutsch",
            Locale::Pt => "Português",
        }
    }

    /// Parse a language tag, ignoring any region subtag (`es-MX` → `es`).
    pub fn from_code(code: &str) -> Option<Locale> {
        let lang = code.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        Locale::ALL.into_iter().find(|l| l.code() == lang)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text keyed by locale code, stored as a JSON object (`{"en": "...", "es": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn english(text: impl Into<String>) -> Self {
        let mut t = Self::new();
        t.set(Locale::En, text);
        t
    }

    /// Set or clear (when blank) the text for one locale.
    pub fn set(&mut self, locale: Locale, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.0.remove(locale.code());
        } else {
            self.0.insert(locale.code().to_string(), text);
        }
    }

    /// Exact text for a locale, without fallback.
    pub fn exact(&self, locale: Locale) -> Option<&str> {
        self.0.get(locale.code()).map(String::as_str)
    }

    /// Text for a locale, falling back to English, then to any locale present.
    pub fn get(&self, locale: Locale) -> &str {
        self.exact(locale)
            .or_else(|| self.exact(Locale::En))
            .or_else(|| self.0.values().next().map(String::as_str))
            .unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_strips_region() {
        assert_eq!(Locale::from_code("es-MX"), Some(Locale::Es));
        assert_eq!(Locale::from_code("pt_BR"), Some(Locale::Pt));
        assert_eq!(Locale::from_code(" DE "), Some(Locale::De));
        assert_eq!(Locale::from_code("ja"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_localized_text_fallback_chain() {
        let mut text = LocalizedText::new();
        assert_eq!(text.get(Locale::Fr), "");

        text.set(Locale::De, "Neue Preise");
        assert_eq!(text.get(Locale::Fr), "Neue Preise");

        text.set(Locale::En, "New pricing");
        assert_eq!(text.get(Locale::Fr), "New pricing");
        assert_eq!(text.get(Locale::De), "Neue Preise");
    }

    #[test]
    fn test_blank_text_clears_locale() {
        let mut text = LocalizedText::english("Hello");
        text.set(Locale::Es, "Hola");
        text.set(Locale::Es, "  ");
        assert_eq!(text.exact(Locale::Es), None);
        assert!(!text.is_empty());
    }

    #[test]
    fn test_localized_text_is_a_plain_json_object() {
        let mut text = LocalizedText::english("Hello");
        text.set(Locale::Es, "Hola");
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#"{"en":"Hello","es":"Hola"}"#);
    }
}
