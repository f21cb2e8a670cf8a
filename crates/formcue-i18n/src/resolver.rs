#![forbid(unsafe_code)]

//! Message resolution: template selection plus positional substitution.

use std::rc::Rc;

use crate::catalog::MessageCatalog;
use crate::locale::{Locale, detect_system_locale, normalize_locale};

/// Replaceable source of constraint messages.
///
/// [`MessageResolver`] is the stock implementation; hosts with their own
/// translation machinery implement this instead.
pub trait MessageSource {
    /// Message for `constraint` with `params` substituted.
    ///
    /// `locale == None` means the source's own default locale.
    fn message(&self, constraint: &str, params: &[String], locale: Option<&str>) -> String;
}

/// Replace `{i}` placeholders with `params[i]`.
///
/// Substitution is a single left-to-right pass: inserted text is never
/// re-scanned, placeholders without a matching parameter stay verbatim, and
/// surplus parameters are ignored.
#[must_use]
pub fn interpolate<S: AsRef<str>>(template: &str, params: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find('}').and_then(|close| {
            let digits = &after[..close];
            let is_index = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
            is_index
                .then(|| digits.parse::<usize>().ok())
                .flatten()
                .and_then(|index| params.get(index))
                .map(|param| (close, param.as_ref()))
        });
        match placeholder {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Catalog-backed [`MessageSource`] with a default locale.
///
/// The catalog is shared read-only; cloning a resolver is cheap.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    catalog: Rc<MessageCatalog>,
    default_locale: Locale,
}

impl MessageResolver {
    /// Resolver over `catalog`, defaulting to the detected system locale.
    #[must_use]
    pub fn new(catalog: MessageCatalog) -> Self {
        Self::shared(Rc::new(catalog))
    }

    #[must_use]
    pub fn shared(catalog: Rc<MessageCatalog>) -> Self {
        Self {
            catalog,
            default_locale: detect_system_locale(),
        }
    }

    /// Set the locale used when a call passes none. Blank input keeps the
    /// current default.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl AsRef<str>) -> Self {
        self.set_default_locale(locale);
        self
    }

    pub fn set_default_locale(&mut self, locale: impl AsRef<str>) {
        if let Some(locale) = normalize_locale(locale.as_ref()) {
            self.default_locale = locale;
        }
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    #[must_use]
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Resolve `constraint` to localized text.
    ///
    /// Never fails: unknown locales degrade to the catalog's fallback locale,
    /// unknown constraints to a `generic` message.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(
        &self,
        constraint: &str,
        params: &[S],
        locale: Option<&str>,
    ) -> String {
        let requested = locale.unwrap_or(&self.default_locale);
        let template = self.catalog.template(constraint, requested);
        #[cfg(feature = "tracing")]
        if template.degraded {
            tracing::debug!(
                requested,
                fallback = template.locale,
                constraint,
                "unknown locale, using fallback dictionary"
            );
        }
        interpolate(template.text, params)
    }
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self::new(MessageCatalog::builtin())
    }
}

impl MessageSource for MessageResolver {
    fn message(&self, constraint: &str, params: &[String], locale: Option<&str>) -> String {
        self.resolve(constraint, params, locale)
    }
}
