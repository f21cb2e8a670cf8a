#![forbid(unsafe_code)]

//! formcue public facade.
//!
//! Decorates form inputs with their validity state and keeps a localized list
//! of constraint-violation messages next to them. Validation itself happens
//! elsewhere: a [`FormModel`] supplies [`ValidationState`] snapshots and the
//! [`Registry`] turns each one into DOM edits through an [`ElementTree`].
//!
//! ```
//! use formcue::prelude::*;
//! use formcue::dom::MemoryDom;
//!
//! let mut dom = MemoryDom::new();
//! let group = dom.append(dom.root(), "div", "form-group");
//! let input = dom.append(group, "input", "");
//!
//! let mut config = FormValidationConfig::<MemoryDom>::new();
//! config.set_locale("en");
//! let mut registry = Registry::new(config);
//!
//! let model = StaticFormModel::new("signup").with_field(
//!     "email",
//!     ValidationState::new().with_valid(false).with_error("required", true),
//! );
//! registry.register(&mut dom, InputBinding::new("signup", "email"), input, &model);
//!
//! assert!(dom.has_class(&input, "invalid"));
//! assert_eq!(
//!     dom.outline(group),
//!     "div.form-group\n  input.invalid\n  ul.error-list\n    li.constraint-required \"Please fill in this required field\"\n"
//! );
//! ```

use std::fmt;

pub mod config;
pub mod model;
pub mod registry;

pub use config::FormValidationConfig;
pub use model::{FormModel, StaticFormModel};
pub use registry::Registry;

// --- Core re-exports -------------------------------------------------------

pub use formcue_core::traverse::{self, Traverser};
pub use formcue_core::{
    BindingKey, ConfigurationError, ConstraintParameters, ElementAttributes, ElementTree,
    InputBinding, ParamValue, RenderTargetUnavailable, Selector, ValidationState,
};

// --- Message re-exports ----------------------------------------------------

pub use formcue_i18n::{
    CatalogError, LocaleStrings, MessageCatalog, MessageResolver, MessageSource,
};

// --- Render re-exports -----------------------------------------------------

pub use formcue_render::{
    BuiltInDecorator, ClassNameDecorator, DecorationState, DecorationStrategy, Decorator,
    DefaultErrorListMarkup, ErrorListMarkup, IconClasses, LayeredDecorator,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for formcue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown strategy or icon library name.
    Configuration(ConfigurationError),
    /// Invalid message catalog.
    Catalog(CatalogError),
    /// The error list could not be rendered.
    RenderTarget(RenderTargetUnavailable),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::RenderTarget(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::RenderTarget(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<RenderTargetUnavailable> for Error {
    fn from(err: RenderTargetUnavailable) -> Self {
        Self::RenderTarget(err)
    }
}

/// Standard result type for formcue APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BindingKey, DecorationStrategy, ElementTree, Error, FormModel, FormValidationConfig,
        InputBinding, Registry, Result, StaticFormModel, ValidationState,
    };

    pub use crate::{core, dom, i18n, render};
}

pub use formcue_core as core;
pub use formcue_dom as dom;
pub use formcue_i18n as i18n;
pub use formcue_render as render;
