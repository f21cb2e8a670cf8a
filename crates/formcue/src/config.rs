#![forbid(unsafe_code)]

//! Configuration provider.
//!
//! [`FormValidationConfig`] collects everything a [`Registry`](crate::Registry)
//! needs before inputs register:
//!
//! | Setting                  | Default                                 |
//! |--------------------------|-----------------------------------------|
//! | decoration strategy      | `className` (`valid` / `invalid`)       |
//! | message dictionary       | built-in `en` + `ru` catalog            |
//! | locale                   | system locale (`LC_ALL`, then `LANG`)   |
//! | error list markup        | `ul.error-list` / `li.constraint-<name>` |
//! | error container          | the input element's parent              |
//!
//! Name lookups (strategies, icon libraries) and catalog validation fail
//! here, at configuration time, never during a notification.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use formcue_core::traverse::{self, Traverser};
use formcue_core::{ConstraintParameters, ElementTree, ValidationState};
use formcue_i18n::{Locale, LocaleStrings, MessageCatalog, MessageResolver, MessageSource};
use formcue_render::{DecorationStrategy, DefaultErrorListMarkup, ErrorListMarkup};

use crate::Result;

enum Dictionary {
    Catalog(MessageResolver),
    Custom(Rc<dyn MessageSource>),
}

/// Registry-wide configuration.
pub struct FormValidationConfig<T: ElementTree> {
    strategy: DecorationStrategy<T>,
    dictionary: Dictionary,
    locale: Option<Locale>,
    markup: Rc<dyn ErrorListMarkup<T>>,
    error_container: Traverser<T>,
}

impl<T: ElementTree + 'static> Default for FormValidationConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ElementTree + 'static> FormValidationConfig<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategy: DecorationStrategy::default(),
            dictionary: Dictionary::Catalog(MessageResolver::default()),
            locale: None,
            markup: Rc::new(DefaultErrorListMarkup::new()),
            error_container: traverse::parent(),
        }
    }

    /// Switch to the built-in strategy `name` (`default`, `className`,
    /// `bootstrap`) and return it for further tuning.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`](crate::Error::Configuration) for unknown
    /// names; the current strategy is kept.
    pub fn select_decoration_strategy(&mut self, name: &str) -> Result<&mut DecorationStrategy<T>> {
        self.strategy = DecorationStrategy::named(name)?;
        Ok(&mut self.strategy)
    }

    pub fn set_error_list_renderer(&mut self, markup: impl ErrorListMarkup<T> + 'static) -> &mut Self {
        self.markup = Rc::new(markup);
        self
    }

    /// Replace the dictionary with a host implementation.
    pub fn set_dictionary(&mut self, source: impl MessageSource + 'static) -> &mut Self {
        self.dictionary = Dictionary::Custom(Rc::new(source));
        self
    }
}

impl<T: ElementTree> FormValidationConfig<T> {
    pub fn set_decoration_strategy(&mut self, strategy: DecorationStrategy<T>) -> &mut Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn decoration_strategy(&self) -> &DecorationStrategy<T> {
        &self.strategy
    }

    pub fn decoration_strategy_mut(&mut self) -> &mut DecorationStrategy<T> {
        &mut self.strategy
    }

    /// Locale used for every message. Blank input restores the dictionary's
    /// own default.
    pub fn set_locale(&mut self, locale: &str) -> &mut Self {
        self.locale = formcue_i18n::normalize_locale(locale);
        self
    }

    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Use `catalog` through the stock resolver.
    pub fn set_catalog(&mut self, catalog: MessageCatalog) -> &mut Self {
        self.dictionary = Dictionary::Catalog(MessageResolver::new(catalog));
        self
    }

    /// Register (or replace) one locale of the catalog in use.
    ///
    /// # Errors
    ///
    /// [`Error::Catalog`](crate::Error::Catalog) when the change leaves the
    /// fallback locale without a `generic` message. A custom dictionary set
    /// through [`Self::set_dictionary`] is replaced by the extended built-in
    /// catalog.
    pub fn add_locale(&mut self, locale: &str, strings: LocaleStrings) -> Result<&mut Self> {
        let base = match &self.dictionary {
            Dictionary::Catalog(resolver) => resolver.catalog().clone(),
            Dictionary::Custom(_) => MessageCatalog::builtin(),
        };
        let catalog = base.with_locale(locale, strings)?;
        self.dictionary = Dictionary::Catalog(MessageResolver::new(catalog));
        Ok(self)
    }

    /// [`Self::add_locale`] with the table given as a flat JSON object.
    ///
    /// # Errors
    ///
    /// [`Error::Catalog`](crate::Error::Catalog) for malformed JSON or an
    /// invalid resulting catalog.
    #[cfg(feature = "serde")]
    pub fn add_locale_json(&mut self, locale: &str, json: &str) -> Result<&mut Self> {
        let strings = LocaleStrings::from_json(json)?;
        self.add_locale(locale, strings)
    }

    /// Replace how the error list's attachment point is found from an input
    /// element. Defaults to the element's parent.
    pub fn set_error_container_traverser(
        &mut self,
        traverser: impl Fn(&T, &T::Node) -> Option<T::Node> + 'static,
    ) -> &mut Self {
        self.error_container = Rc::new(traverser);
        self
    }

    pub(crate) fn error_container(&self, tree: &T, element: &T::Node) -> Option<T::Node> {
        (self.error_container)(tree, element)
    }

    pub(crate) fn markup(&self) -> Rc<dyn ErrorListMarkup<T>> {
        Rc::clone(&self.markup)
    }

    /// Localized message for one constraint.
    #[must_use]
    pub fn message(&self, constraint: &str, params: &[String]) -> String {
        let locale = self.locale.as_deref();
        match &self.dictionary {
            Dictionary::Catalog(resolver) => resolver.resolve(constraint, params, locale),
            Dictionary::Custom(source) => source.message(constraint, params, locale),
        }
    }

    /// `constraint -> message` for every active constraint of `snapshot`.
    #[must_use]
    pub fn messages_for(
        &self,
        snapshot: &ValidationState,
        parameters: &ConstraintParameters,
    ) -> BTreeMap<String, String> {
        snapshot
            .active_constraints()
            .map(|constraint| {
                let params = parameters.positional(constraint);
                (constraint.to_owned(), self.message(constraint, &params))
            })
            .collect()
    }
}

impl<T: ElementTree> fmt::Debug for FormValidationConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dictionary = match &self.dictionary {
            Dictionary::Catalog(_) => "catalog",
            Dictionary::Custom(_) => "custom",
        };
        f.debug_struct("FormValidationConfig")
            .field("strategy", &self.strategy)
            .field("dictionary", &dictionary)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use formcue_core::{ConfigurationError, ParamValue};
    use formcue_dom::{MemoryDom, NodeId};
    use formcue_i18n::CatalogError;

    fn config() -> FormValidationConfig<MemoryDom> {
        let mut config = FormValidationConfig::new();
        config.set_locale("en");
        config
    }

    #[test]
    fn strategy_selection_by_name() {
        let mut config = config();
        let strategy = config.select_decoration_strategy("bootstrap");
        assert!(matches!(strategy, Ok(DecorationStrategy::Layered(_))));

        let err = config.select_decoration_strategy("material").err();
        assert_eq!(
            err,
            Some(Error::Configuration(ConfigurationError::UnknownDecorationStrategy(
                "material".into()
            )))
        );
        assert!(matches!(config.decoration_strategy(), DecorationStrategy::Layered(_)));
    }

    #[test]
    fn icon_library_configured_through_selected_strategy() {
        let mut config = config();
        let layered = config
            .select_decoration_strategy("bootstrap")
            .ok()
            .and_then(DecorationStrategy::as_layered_mut);
        let Some(layered) = layered else {
            panic!("bootstrap strategy is layered");
        };
        assert!(layered.use_icon_library("fontawesome").is_ok());
        assert_eq!(layered.icon_class_name(true), "fa fa-check");
    }

    #[test]
    fn messages_carry_constraint_parameters() {
        let mut config = config();
        let params = ConstraintParameters::new().with("minlength", ParamValue::Int(5));
        let snapshot = ValidationState::new()
            .with_valid(false)
            .with_error("minlength", true)
            .with_error("required", false);

        let messages = config.messages_for(&snapshot, &params);
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages.get("minlength").map(String::as_str),
            Some("Please enter a value not less than 5 characters")
        );

        config.set_locale("ru_RU.UTF-8");
        assert_eq!(config.locale(), Some("ru-RU"));
        assert_eq!(
            config.messages_for(&snapshot, &params).get("minlength").map(String::as_str),
            Some("Пожалуйста укажите значение не короче 5 символов")
        );
    }

    struct Shouting;

    impl MessageSource for Shouting {
        fn message(&self, constraint: &str, params: &[String], locale: Option<&str>) -> String {
            format!("{}! {} {}", constraint.to_uppercase(), params.join(","), locale.unwrap_or("-"))
        }
    }

    #[test]
    fn custom_dictionary_receives_locale() {
        let mut config = config();
        config.set_dictionary(Shouting);
        assert_eq!(config.message("max", &["10".to_owned()]), "MAX! 10 en");
    }

    #[test]
    fn added_locale_extends_catalog() {
        let mut config = config();
        let de = LocaleStrings::new()
            .with("generic", "Bitte einen gültigen Wert eingeben")
            .with("required", "Pflichtfeld");
        assert!(config.add_locale("de", de).is_ok());
        config.set_locale("de-AT");
        assert_eq!(config.message("required", &[]), "Pflichtfeld");
        assert_eq!(config.message("email", &[]), "Bitte einen gültigen Wert eingeben");

        let broken = config.add_locale("en", LocaleStrings::new().with("required", "x")).err();
        assert_eq!(broken, Some(Error::Catalog(CatalogError::MissingGeneric("en".into()))));
        assert_eq!(config.message("required", &[]), "Pflichtfeld");
    }

    #[test]
    fn error_container_defaults_to_parent() {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "");
        let input = dom.append(group, "input", "");
        let mut config = config();
        assert_eq!(config.error_container(&dom, &input), Some(group));

        config.set_error_container_traverser(|_: &MemoryDom, node: &NodeId| Some(*node));
        assert_eq!(config.error_container(&dom, &input), Some(input));
    }
}
