#![forbid(unsafe_code)]

//! Decoration strategy selection.

use core::fmt;
use core::str::FromStr;
use std::rc::Rc;

use formcue_core::{ConfigurationError, ElementTree};

use crate::decoration::{ClassNameDecorator, DecorationTarget, Decorator};
use crate::layered::LayeredDecorator;

/// Built-in strategy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInDecorator {
    /// `className`, also reachable as `default`.
    ClassName,
    /// `bootstrap`.
    Bootstrap,
}

impl BuiltInDecorator {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClassName => "className",
            Self::Bootstrap => "bootstrap",
        }
    }
}

impl FromStr for BuiltInDecorator {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "default" | "className" => Ok(Self::ClassName),
            "bootstrap" => Ok(Self::Bootstrap),
            other => Err(ConfigurationError::UnknownDecorationStrategy(other.to_owned())),
        }
    }
}

impl fmt::Display for BuiltInDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The decoration strategy in effect.
pub enum DecorationStrategy<T: ElementTree> {
    ClassName(ClassNameDecorator<T>),
    Layered(LayeredDecorator<T>),
    /// Host-supplied strategy.
    Custom(Rc<dyn Decorator<T>>),
}

impl<T: ElementTree + 'static> DecorationStrategy<T> {
    /// Fresh instance of a built-in strategy with its default options.
    #[must_use]
    pub fn builtin(kind: BuiltInDecorator) -> Self {
        match kind {
            BuiltInDecorator::ClassName => Self::ClassName(ClassNameDecorator::new()),
            BuiltInDecorator::Bootstrap => Self::Layered(LayeredDecorator::new()),
        }
    }

    /// Built-in strategy by name.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownDecorationStrategy`] for names other than
    /// `default`, `className` and `bootstrap`.
    pub fn named(name: &str) -> Result<Self, ConfigurationError> {
        name.parse().map(Self::builtin)
    }

    pub fn custom(decorator: impl Decorator<T> + 'static) -> Self {
        Self::Custom(Rc::new(decorator))
    }
}

impl<T: ElementTree> DecorationStrategy<T> {
    #[must_use]
    pub fn as_class_name_mut(&mut self) -> Option<&mut ClassNameDecorator<T>> {
        match self {
            Self::ClassName(decorator) => Some(decorator),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_layered_mut(&mut self) -> Option<&mut LayeredDecorator<T>> {
        match self {
            Self::Layered(decorator) => Some(decorator),
            _ => None,
        }
    }

    fn as_decorator(&self) -> &dyn Decorator<T> {
        match self {
            Self::ClassName(decorator) => decorator,
            Self::Layered(decorator) => decorator,
            Self::Custom(decorator) => decorator.as_ref(),
        }
    }
}

impl<T: ElementTree + 'static> Default for DecorationStrategy<T> {
    fn default() -> Self {
        Self::builtin(BuiltInDecorator::ClassName)
    }
}

impl<T: ElementTree> fmt::Debug for DecorationStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassName(decorator) => f.debug_tuple("ClassName").field(decorator).finish(),
            Self::Layered(decorator) => f
                .debug_struct("Layered")
                .field("base", decorator.base())
                .field("use_icons", &decorator.icons_enabled())
                .field("icon_library", &decorator.icon_library())
                .finish_non_exhaustive(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T: ElementTree> Decorator<T> for DecorationStrategy<T> {
    fn resolve_target(&self, tree: &T, element: &T::Node) -> Option<T::Node> {
        self.as_decorator().resolve_target(tree, element)
    }

    fn decorate_element(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>, valid: bool) {
        self.as_decorator().decorate_element(tree, target, valid);
    }

    fn clear_decorations(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>) {
        self.as_decorator().clear_decorations(tree, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::{DecorationMachine, DecorationState};
    use formcue_dom::{MemoryDom, NodeId};

    #[test]
    fn names_resolve_to_builtins() {
        assert_eq!("default".parse::<BuiltInDecorator>(), Ok(BuiltInDecorator::ClassName));
        assert_eq!("className".parse::<BuiltInDecorator>(), Ok(BuiltInDecorator::ClassName));
        assert_eq!("bootstrap".parse::<BuiltInDecorator>(), Ok(BuiltInDecorator::Bootstrap));
        assert_eq!(
            "material".parse::<BuiltInDecorator>(),
            Err(ConfigurationError::UnknownDecorationStrategy("material".into()))
        );
        assert_eq!(BuiltInDecorator::Bootstrap.to_string(), "bootstrap");
    }

    #[test]
    fn named_strategy_variants() {
        assert!(matches!(
            DecorationStrategy::<MemoryDom>::named("default"),
            Ok(DecorationStrategy::ClassName(_))
        ));
        let mut bootstrap = DecorationStrategy::<MemoryDom>::named("bootstrap")
            .unwrap_or_default();
        assert!(bootstrap.as_layered_mut().is_some());
        assert!(bootstrap.as_class_name_mut().is_none());
        assert!(DecorationStrategy::<MemoryDom>::named("Bootstrap").is_err());
    }

    struct Marker;

    impl Decorator<MemoryDom> for Marker {
        fn resolve_target(&self, _: &MemoryDom, element: &NodeId) -> Option<NodeId> {
            Some(*element)
        }

        fn decorate_element(&self, tree: &mut MemoryDom, target: &mut DecorationTarget<NodeId>, valid: bool) {
            tree.set_text(&target.element, if valid { "ok" } else { "bad" });
        }

        fn clear_decorations(&self, tree: &mut MemoryDom, target: &mut DecorationTarget<NodeId>) {
            tree.set_text(&target.element, "");
        }
    }

    #[test]
    fn custom_strategy_is_dispatched() {
        let mut dom = MemoryDom::new();
        let input = dom.append(dom.root(), "input", "");
        let strategy = DecorationStrategy::custom(Marker);
        let mut machine = DecorationMachine::attach(&dom, &strategy, input);

        machine.apply(&mut dom, &strategy, DecorationState::Invalid);
        assert_eq!(dom.text(&input), "bad");
        machine.apply(&mut dom, &strategy, DecorationState::Clean);
        assert_eq!(dom.text(&input), "");
        assert_eq!(format!("{strategy:?}"), "Custom(..)");
    }
}
