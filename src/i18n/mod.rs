//! Language catalog and translation resolution.
//!
//! # Fallback
//!
//! Every lookup walks the requested language's fallback chain and terminates
//! at Japanese, the language all content originates in. Resolution is pure:
//! the same key and language always produce the same string.

pub mod dictionary;
pub mod keys;
pub mod language;

pub use dictionary::{display_field, translate, ui};
pub use keys::UiKey;
pub use language::{Language, LanguageCatalog, LanguageEntry};
