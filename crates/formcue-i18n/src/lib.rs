#![forbid(unsafe_code)]

//! Localized constraint-violation messages.
//!
//! Two independent fallback chains turn a constraint name into text:
//!
//! 1. **Locale chain** ([`locale_candidates`]): `"ru-RU"` is tried as
//!    `["ru-RU", "ru"]`; the first registered candidate selects the
//!    dictionary. No match degrades to the catalog's fallback locale.
//! 2. **Message chain** ([`lookup_template`]): the selected dictionary's
//!    entry, then its `generic` entry, then the fallback dictionary's entry,
//!    then the fallback dictionary's `generic` entry.
//!
//! [`interpolate`] then fills `{0}`-style positional placeholders.
//!
//! ```
//! use formcue_i18n::{MessageCatalog, MessageResolver};
//!
//! let resolver = MessageResolver::new(MessageCatalog::builtin()).with_default_locale("en");
//! assert_eq!(
//!     resolver.resolve("minlength", &["5".to_owned()], Some("en-GB")),
//!     "Please enter a value not less than 5 characters"
//! );
//! ```

mod builtin;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod resolver;

pub use catalog::{GENERIC_KEY, LocaleStrings, MessageCatalog, Template, lookup_template};
pub use error::CatalogError;
pub use locale::{Locale, detect_system_locale, locale_candidates, normalize_locale};
pub use resolver::{MessageResolver, MessageSource, interpolate};

/// Locale every built-in catalog falls back to.
pub const FALLBACK_LOCALE: &str = "en";
