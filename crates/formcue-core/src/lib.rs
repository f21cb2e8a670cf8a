#![forbid(unsafe_code)]

//! Core types shared by every formcue crate.
//!
//! - [`ValidationState`]: one immutable snapshot of a field's validity as
//!   reported by the external form model.
//! - [`InputBinding`] / [`BindingKey`]: the logical field an element belongs to.
//! - [`ConstraintParameters`]: declared bounds captured once at bind time.
//! - [`ElementTree`]: the DOM capability the renderers are written against.
//! - [`Selector`]: the tiny `tag.class` selector language used for lookups.
//! - [`Traverser`]: element-to-element lookups (identity, parent, nearest
//!   matching ancestor).
//! - [`logging`]: `debug!`/`trace!`/`warn!` forwarding to `tracing` behind
//!   the `tracing` feature.

pub mod binding;
pub mod element;
pub mod error;
pub mod logging;
pub mod selector;
pub mod state;
pub mod traverse;

pub use binding::{BindingKey, ConstraintParameters, ElementAttributes, InputBinding, ParamValue};
pub use element::{DEFAULT_DISPLAY_MODE, ElementTree, OLD_DISPLAY_MODE_KEY};
pub use error::{ConfigurationError, RenderTargetUnavailable};
pub use selector::Selector;
pub use state::{ConstraintName, ValidationState};
pub use traverse::Traverser;

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
