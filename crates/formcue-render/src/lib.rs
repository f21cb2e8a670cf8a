#![forbid(unsafe_code)]

//! Rendering of validation state onto an [`ElementTree`].
//!
//! # Decoration
//!
//! [`DecorationState`] is a pure function of a snapshot's `valid` and
//! `modified` flags. A [`DecorationMachine`] owns one element's
//! [`DecorationTarget`] and applies the state through a [`Decorator`]:
//!
//! | state           | decorated element            | feedback icon   |
//! |-----------------|------------------------------|-----------------|
//! | `Invalid`       | invalid class on, valid off  | shown, invalid  |
//! | `ValidModified` | valid class on, invalid off  | shown, valid    |
//! | `Clean`         | both off                     | hidden          |
//!
//! Built-in strategies: [`ClassNameDecorator`] and [`LayeredDecorator`],
//! selected by name through [`DecorationStrategy::named`].
//!
//! # Error list
//!
//! [`ErrorListReconciler`] keeps one list of violation messages in step with
//! the active constraint set, reusing item nodes across passes. Markup is
//! pluggable through [`ErrorListMarkup`].
//!
//! [`ElementTree`]: formcue_core::ElementTree

pub mod decoration;
pub mod layered;
pub mod reconciler;
pub mod strategy;

pub use decoration::{
    ClassNameDecorator, DecorationMachine, DecorationState, DecorationTarget, Decorator,
    decoration_state_of,
};
pub use layered::{FONTAWESOME, GLYPHICONS, IconClasses, LayeredDecorator};
pub use reconciler::{
    DefaultErrorListMarkup, ErrorListMarkup, ErrorListReconciler, ItemDecorator,
    OWNER_DATA_KEY, RenderedErrorItem,
};
pub use strategy::{BuiltInDecorator, DecorationStrategy};
