#![forbid(unsafe_code)]

//! Per-locale message dictionaries.
//!
//! # Invariants
//!
//! 1. The fallback locale is always registered and always has a
//!    [`GENERIC_KEY`] entry; [`MessageCatalog`] cannot be built otherwise.
//! 2. Registering a locale replaces only that locale's table.
//! 3. Lookups never mutate the catalog and never fail: the message chain
//!    terminates at the fallback dictionary's `generic` entry.
//!
//! # Failure Modes
//!
//! | Scenario | Behavior |
//! |----------|----------|
//! | Locale with no registered candidate | [`MessageCatalog::select`] errors; [`MessageCatalog::template`] degrades to the fallback dictionary |
//! | Constraint missing from selected dictionary | Selected `generic`, then fallback entry, then fallback `generic` |
//! | Fallback unregistered / without `generic` | [`CatalogError`] at construction |

use std::collections::BTreeMap;

use crate::builtin;
use crate::error::CatalogError;
use crate::locale::{Locale, locale_candidates};

/// Key of the catch-all message in every dictionary.
pub const GENERIC_KEY: &str = "generic";

/// Templates of one locale, keyed by constraint name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct LocaleStrings {
    templates: BTreeMap<String, String>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, constraint: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(constraint.into(), template.into());
    }

    #[must_use]
    pub fn with(mut self, constraint: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(constraint, template);
        self
    }

    #[must_use]
    pub fn get(&self, constraint: &str) -> Option<&str> {
        self.templates.get(constraint).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, constraint: &str) -> bool {
        self.templates.contains_key(constraint)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Parse a flat JSON object of `constraint -> template`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|err| CatalogError::InvalidJson(err.to_string()))
    }

    fn from_table(table: &[(&str, &str)]) -> Self {
        table.iter().copied().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Pick the template for `constraint` from `selected`, falling back to
/// `fallback`.
///
/// Order: `selected[constraint]`, `selected["generic"]`,
/// `fallback[constraint]`, `fallback["generic"]`. Returns `""` only if even
/// the fallback has no `generic` entry, which a [`MessageCatalog`] rules out.
#[must_use]
pub fn lookup_template<'a>(
    selected: &'a LocaleStrings,
    fallback: &'a LocaleStrings,
    constraint: &str,
) -> &'a str {
    selected
        .get(constraint)
        .or_else(|| selected.get(GENERIC_KEY))
        .or_else(|| fallback.get(constraint))
        .or_else(|| fallback.get(GENERIC_KEY))
        .unwrap_or_default()
}

/// A template picked by [`MessageCatalog::template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'a> {
    pub text: &'a str,
    /// Registered locale whose dictionary was selected.
    pub locale: &'a str,
    /// `true` when no candidate of the requested locale was registered.
    pub degraded: bool,
}

/// Registry of locale dictionaries with one fallback locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    locales: BTreeMap<Locale, LocaleStrings>,
    fallback_locale: Locale,
}

impl MessageCatalog {
    /// Build a catalog from explicit tables.
    ///
    /// # Errors
    ///
    /// [`CatalogError::MissingFallback`] when `fallback_locale` has no table,
    /// [`CatalogError::MissingGeneric`] when that table has no `generic`
    /// entry.
    pub fn new<L, I>(fallback_locale: impl Into<Locale>, locales: I) -> Result<Self, CatalogError>
    where
        L: Into<Locale>,
        I: IntoIterator<Item = (L, LocaleStrings)>,
    {
        let catalog = Self {
            locales: locales.into_iter().map(|(l, s)| (l.into(), s)).collect(),
            fallback_locale: fallback_locale.into(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The shipped catalog: complete `en` (fallback) and `ru` dictionaries.
    #[must_use]
    pub fn builtin() -> Self {
        let mut locales = BTreeMap::new();
        locales.insert("en".to_owned(), LocaleStrings::from_table(builtin::EN));
        locales.insert("ru".to_owned(), LocaleStrings::from_table(builtin::RU));
        Self {
            locales,
            fallback_locale: crate::FALLBACK_LOCALE.to_owned(),
        }
    }

    /// Register (or replace) one locale's dictionary.
    ///
    /// # Errors
    ///
    /// Replacing the fallback locale with a table lacking `generic` fails with
    /// [`CatalogError::MissingGeneric`].
    pub fn with_locale(
        mut self,
        locale: impl Into<Locale>,
        strings: LocaleStrings,
    ) -> Result<Self, CatalogError> {
        self.locales.insert(locale.into(), strings);
        self.validate()?;
        Ok(self)
    }

    /// Switch the fallback locale to an already registered one.
    ///
    /// # Errors
    ///
    /// Same as [`MessageCatalog::new`].
    pub fn with_fallback_locale(mut self, locale: impl Into<Locale>) -> Result<Self, CatalogError> {
        self.fallback_locale = locale.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let fallback = self
            .locales
            .get(&self.fallback_locale)
            .ok_or_else(|| CatalogError::MissingFallback(self.fallback_locale.clone()))?;
        if !fallback.contains(GENERIC_KEY) {
            return Err(CatalogError::MissingGeneric(self.fallback_locale.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Registered locale tags, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> + '_ {
        self.locales.keys().map(String::as_str)
    }

    /// Dictionary registered for exactly `locale` (ASCII case-insensitive).
    #[must_use]
    pub fn strings(&self, locale: &str) -> Option<&LocaleStrings> {
        self.entry(locale).map(|(_, strings)| strings)
    }

    fn entry(&self, locale: &str) -> Option<(&str, &LocaleStrings)> {
        if let Some((tag, strings)) = self.locales.get_key_value(locale) {
            return Some((tag.as_str(), strings));
        }
        self.locales
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(locale))
            .map(|(tag, strings)| (tag.as_str(), strings))
    }

    fn fallback_strings(&self) -> &LocaleStrings {
        // `validate` guarantees presence; an empty table is never observed.
        static EMPTY: LocaleStrings = LocaleStrings {
            templates: BTreeMap::new(),
        };
        self.locales.get(&self.fallback_locale).unwrap_or(&EMPTY)
    }

    /// Select the most specific registered dictionary for `locale`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnknownLocale`] when no candidate is registered.
    pub fn select(&self, locale: &str) -> Result<(&str, &LocaleStrings), CatalogError> {
        locale_candidates(locale)
            .iter()
            .find_map(|candidate| self.entry(candidate))
            .ok_or_else(|| CatalogError::UnknownLocale(locale.to_owned()))
    }

    /// Template for `constraint` in `locale`, walking both fallback chains.
    #[must_use]
    pub fn template(&self, constraint: &str, locale: &str) -> Template<'_> {
        let fallback = self.fallback_strings();
        match self.select(locale) {
            Ok((tag, selected)) => Template {
                text: lookup_template(selected, fallback, constraint),
                locale: tag,
                degraded: false,
            },
            Err(_) => Template {
                text: lookup_template(fallback, fallback, constraint),
                locale: &self.fallback_locale,
                degraded: true,
            },
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
