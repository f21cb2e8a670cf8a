#![forbid(unsafe_code)]

use core::fmt;

/// Catalog construction and strict lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No candidate of the requested locale is registered.
    UnknownLocale(String),
    /// The fallback locale has no registered dictionary.
    MissingFallback(String),
    /// The fallback locale's dictionary lacks a `generic` entry.
    MissingGeneric(String),
    /// A locale table could not be parsed.
    InvalidJson(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocale(locale) => write!(f, "no dictionary registered for locale {locale:?}"),
            Self::MissingFallback(locale) => {
                write!(f, "fallback locale {locale:?} is not registered")
            }
            Self::MissingGeneric(locale) => {
                write!(f, "fallback locale {locale:?} has no \"generic\" message")
            }
            Self::InvalidJson(msg) => write!(f, "invalid locale table: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}
