#![forbid(unsafe_code)]

//! Form-group decoration with a feedback icon.
//!
//! [`LayeredDecorator`] forwards state classes to an owned
//! [`ClassNameDecorator`] (`has-success` / `has-error` on the nearest
//! `.form-group` ancestor) and layers on top of it:
//!
//! - a container class (`has-feedback`),
//! - a feedback icon child (`span.form-control-feedback`), found or created,
//! - icon classes from the selected icon library or explicit overrides.
//!
//! Icons can be turned off with [`LayeredDecorator::use_icons`]; the base
//! classes are applied either way.

use std::collections::BTreeMap;

use formcue_core::traverse;
use formcue_core::{ConfigurationError, ElementTree, Selector};

use crate::decoration::{ClassNameDecorator, DecorationTarget, Decorator};

/// Glyphicons icon library name.
pub const GLYPHICONS: &str = "glyphicons";
/// Font Awesome icon library name.
pub const FONTAWESOME: &str = "fontawesome";

const CONTAINER_CLASS: &str = "has-feedback";
const ICON_TAG: &str = "span";
const ICON_CLASS: &str = "form-control-feedback";

/// Icon classes for both validity states of one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconClasses {
    pub valid: String,
    pub invalid: String,
}

impl IconClasses {
    #[must_use]
    pub fn new(valid: impl Into<String>, invalid: impl Into<String>) -> Self {
        Self {
            valid: valid.into(),
            invalid: invalid.into(),
        }
    }
}

fn builtin_libraries() -> BTreeMap<String, IconClasses> {
    BTreeMap::from([
        (
            GLYPHICONS.to_owned(),
            IconClasses::new("glyphicon glyphicon-ok", "glyphicon glyphicon-remove"),
        ),
        (
            FONTAWESOME.to_owned(),
            IconClasses::new("fa fa-check", "fa fa-exclamation-circle"),
        ),
    ])
}

/// Base classes plus container class and feedback icon.
#[derive(Debug, Clone)]
pub struct LayeredDecorator<T: ElementTree> {
    base: ClassNameDecorator<T>,
    use_icons: bool,
    icon_library: String,
    libraries: BTreeMap<String, IconClasses>,
    icon_valid_override: Option<String>,
    icon_invalid_override: Option<String>,
}

impl<T: ElementTree + 'static> Default for LayeredDecorator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ElementTree + 'static> LayeredDecorator<T> {
    #[must_use]
    pub fn new() -> Self {
        let base = ClassNameDecorator::new()
            .with_class_names("has-success", "has-error")
            .with_traverser(traverse::nearest_ancestor(Selector::class("form-group")));
        Self {
            base,
            use_icons: true,
            icon_library: GLYPHICONS.to_owned(),
            libraries: builtin_libraries(),
            icon_valid_override: None,
            icon_invalid_override: None,
        }
    }
}

impl<T: ElementTree> LayeredDecorator<T> {
    /// The class-toggling decorator this one forwards to.
    #[must_use]
    pub fn base(&self) -> &ClassNameDecorator<T> {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ClassNameDecorator<T> {
        &mut self.base
    }

    pub fn use_icons(&mut self, enabled: bool) -> &mut Self {
        self.use_icons = enabled;
        self
    }

    #[must_use]
    pub fn icons_enabled(&self) -> bool {
        self.use_icons
    }

    /// Select a registered icon library.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownIconLibrary`] when `name` is not
    /// registered; the current selection is kept.
    pub fn use_icon_library(&mut self, name: &str) -> Result<&mut Self, ConfigurationError> {
        if !self.libraries.contains_key(name) {
            return Err(ConfigurationError::UnknownIconLibrary(name.to_owned()));
        }
        self.icon_library = name.to_owned();
        Ok(self)
    }

    #[must_use]
    pub fn icon_library(&self) -> &str {
        &self.icon_library
    }

    /// Add or replace an icon library.
    pub fn register_icon_library(
        &mut self,
        name: impl Into<String>,
        classes: IconClasses,
    ) -> &mut Self {
        self.libraries.insert(name.into(), classes);
        self
    }

    pub fn set_icon_valid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.icon_valid_override = Some(class_name.into());
        self
    }

    pub fn set_icon_invalid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.icon_invalid_override = Some(class_name.into());
        self
    }

    /// Icon classes for `valid`: the explicit override, else the selected
    /// library's entry.
    #[must_use]
    pub fn icon_class_name(&self, valid: bool) -> &str {
        let (explicit, library) = if valid {
            (&self.icon_valid_override, self.libraries.get(&self.icon_library).map(|c| &c.valid))
        } else {
            (
                &self.icon_invalid_override,
                self.libraries.get(&self.icon_library).map(|c| &c.invalid),
            )
        };
        explicit.as_deref().or(library.map(String::as_str)).unwrap_or("")
    }

    fn existing_icon(&self, tree: &T, container: &T::Node, cached: Option<&T::Node>) -> Option<T::Node> {
        if let Some(icon) = cached
            && tree.parent(icon).as_ref() == Some(container)
        {
            return Some(icon.clone());
        }
        let selector = Selector::tag(ICON_TAG).and_class(ICON_CLASS);
        tree.find_descendants(container, &selector).into_iter().next()
    }
}

impl<T: ElementTree> Decorator<T> for LayeredDecorator<T> {
    fn resolve_target(&self, tree: &T, element: &T::Node) -> Option<T::Node> {
        self.base.resolve_target(tree, element)
    }

    fn decorate_element(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>, valid: bool) {
        self.base.decorate_element(tree, target, valid);
        if !self.use_icons {
            return;
        }
        let Some(container) = target.decorated.clone() else {
            return;
        };
        tree.add_class(&container, CONTAINER_CLASS);

        let icon = match self.existing_icon(tree, &container, target.icon.as_ref()) {
            Some(icon) => icon,
            None => {
                let Some(icon) = tree.create_element(ICON_TAG) else {
                    formcue_core::debug!(?container, "feedback icon could not be created");
                    return;
                };
                tree.add_class(&icon, ICON_CLASS);
                tree.append_child(&container, &icon);
                icon
            }
        };
        tree.remove_class(&icon, self.icon_class_name(!valid));
        tree.add_class(&icon, self.icon_class_name(valid));
        tree.show(&icon);
        target.icon = Some(icon);
    }

    fn clear_decorations(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>) {
        self.base.clear_decorations(tree, target);
        if !self.use_icons {
            return;
        }
        let Some(container) = target.decorated.clone() else {
            return;
        };
        if let Some(icon) = self.existing_icon(tree, &container, target.icon.as_ref()) {
            tree.hide(&icon);
            target.icon = Some(icon);
        }
    }
}
