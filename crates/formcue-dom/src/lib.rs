#![forbid(unsafe_code)]

//! Element-tree backends.
//!
//! - [`MemoryDom`]: deterministic in-memory tree. Used by tests, benches and
//!   hosts that render outside a browser.
//! - `WebDom` (wasm32 only): [`formcue_core::ElementTree`] over `web-sys`
//!   elements of a live document.

pub mod memory;

#[cfg(target_arch = "wasm32")]
mod web;

pub use memory::{MemoryDom, NodeId};

#[cfg(target_arch = "wasm32")]
pub use web::WebDom;
