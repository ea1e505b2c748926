//! Supported display languages.
//!
//! All content originates in Japanese, which is the root of every fallback
//! chain. A language code that is not in the catalog is never an error: it
//! degrades to the root language.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// A display language offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Language {
    Ja,
    En,
    Zh,
    ZhTw,
    Ko,
    Vi,
    Th,
    Id,
    Ms,
    Tl,
    Fr,
    De,
    It,
    Es,
    Ne,
    EasyJa,
}

impl Language {
    /// The root language. Every fallback chain terminates here.
    pub const ROOT: Language = Language::Ja;

    /// Wire code used in backend query strings.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Zh => "zh",
            Language::ZhTw => "zh-TW",
            Language::Ko => "ko",
            Language::Vi => "vi",
            Language::Th => "th",
            Language::Id => "id",
            Language::Ms => "ms",
            Language::Tl => "tl",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Es => "es",
            Language::Ne => "ne",
            Language::EasyJa => "easy_ja",
        }
    }

    /// Native label shown in the language selector.
    pub fn label(self) -> &'static str {
        match self {
            Language::Ja => "日本語",
            Language::En => "English",
            Language::Zh => "简体中文",
            Language::ZhTw => "繁體中文",
            Language::Ko => "한국어",
            Language::Vi => "Tiếng Việt",
            Language::Th => "ภาษาไทย",
            Language::Id => "Bahasa Indonesia",
            Language::Ms => "Bahasa Melayu",
            Language::Tl => "Filipino",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::It => "Italiano",
            Language::Es => "Español",
            Language::Ne => "नेपाली",
            Language::EasyJa => "やさしい日本語",
        }
    }

    /// Next language tried when a string is missing for this one.
    ///
    /// `None` only for the root.
    pub fn fallback(self) -> Option<Language> {
        match self {
            Language::Ja => None,
            _ => Some(Language::ROOT),
        }
    }

    /// Ordered languages tried when resolving a string, ending at the root.
    pub fn fallback_chain(self) -> Vec<Language> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(next) = current.fallback() {
            chain.push(next);
            current = next;
        }
        chain
    }

    pub fn is_root(self) -> bool {
        self == Language::ROOT
    }

    /// Exact catalog lookup.
    pub fn from_code(code: &str) -> Option<Language> {
        LanguageCatalog::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == code)
    }

    /// Lookup that degrades unknown codes to the root language.
    pub fn resolve(code: &str) -> Language {
        Self::from_code(code.trim()).unwrap_or(Language::ROOT)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Language::resolve(&code))
    }
}

/// Ordered set of supported languages.
pub struct LanguageCatalog;

impl LanguageCatalog {
    /// Selector order.
    pub const ALL: [Language; 16] = [
        Language::Ja,
        Language::En,
        Language::Zh,
        Language::ZhTw,
        Language::Ko,
        Language::Vi,
        Language::Th,
        Language::Id,
        Language::Ms,
        Language::Tl,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Es,
        Language::Ne,
        Language::EasyJa,
    ];

    pub fn entries() -> Vec<LanguageEntry> {
        Self::ALL
            .iter()
            .map(|lang| LanguageEntry {
                code: lang.code(),
                label: lang.label(),
                fallback: lang.fallback().map(Language::code),
            })
            .collect()
    }
}

/// Serializable catalog row.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub fallback: Option<&'static str>,
}
