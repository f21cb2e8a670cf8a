#![forbid(unsafe_code)]

//! The element-tree capability renderers are written against.
//!
//! [`ElementTree`] abstracts the handful of DOM operations decoration and
//! error-list rendering need. Hosts implement it over their own element
//! representation; `formcue-dom` ships a headless in-memory tree and a
//! `web-sys` binding.
//!
//! # Show / hide
//!
//! [`ElementTree::show`] and [`ElementTree::hide`] default to a CSS `display`
//! toggle: hiding stores the current display mode under
//! [`OLD_DISPLAY_MODE_KEY`] and sets `display: none`, showing restores the
//! stored mode (or [`DEFAULT_DISPLAY_MODE`]). Hosts with a native show/hide
//! override both methods together with [`ElementTree::is_displayed`].
//!
//! # Invariants
//!
//! 1. `hide` followed by `show` restores the display mode seen before `hide`.
//! 2. `show` on a displayed element and `hide` on a hidden one write nothing.
//! 3. `find_ancestors` yields nearest ancestors first and never includes the
//!    starting node; `find_descendants` is pre-order and also excludes it.

use core::fmt;

use crate::selector::Selector;

/// Data key under which the pre-hide display mode is stored.
pub const OLD_DISPLAY_MODE_KEY: &str = "old-display-mode";

/// Display mode restored when nothing was stored by a previous hide.
pub const DEFAULT_DISPLAY_MODE: &str = "block";

const DISPLAY: &str = "display";
const DISPLAY_NONE: &str = "none";

/// DOM capability consumed by the renderers.
pub trait ElementTree {
    /// Handle to one element. Handles compare equal iff they name the same
    /// element.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Create a detached element. `None` when the host cannot create one.
    fn create_element(&mut self, tag: &str) -> Option<Self::Node>;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detach `node` (and its subtree) from the tree.
    fn remove(&mut self, node: &Self::Node);

    /// Lower-case tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Space-separated class list.
    fn class_name(&self, node: &Self::Node) -> String;

    /// Add every class of a whitespace-separated list.
    fn add_class(&mut self, node: &Self::Node, class_list: &str);

    /// Remove every class of a whitespace-separated list.
    fn remove_class(&mut self, node: &Self::Node, class_list: &str);

    fn set_text(&mut self, node: &Self::Node, text: &str);

    fn text(&self, node: &Self::Node) -> String;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Inline style property, `None` when unset.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Set an inline style property; `None` clears it.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: Option<&str>);

    fn data(&self, node: &Self::Node, key: &str) -> Option<String>;

    fn set_data(&mut self, node: &Self::Node, key: &str, value: &str);

    /// Whether `node` carries `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.class_name(node)
            .split_whitespace()
            .any(|have| have == class)
    }

    fn matches(&self, node: &Self::Node, selector: &Selector) -> bool {
        selector.matches(&self.tag_name(node), &self.class_name(node))
    }

    /// Descendants of `node` matching `selector`, in document order.
    fn find_descendants(&self, node: &Self::Node, selector: &Selector) -> Vec<Self::Node> {
        let mut found = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if self.matches(&current, selector) {
                found.push(current.clone());
            }
            stack.extend(self.children(&current).into_iter().rev());
        }
        found
    }

    /// Ancestors of `node` matching `selector`, nearest first.
    fn find_ancestors(&self, node: &Self::Node, selector: &Selector) -> Vec<Self::Node> {
        let mut found = Vec::new();
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            if self.matches(&ancestor, selector) {
                found.push(ancestor.clone());
            }
            current = self.parent(&ancestor);
        }
        found
    }

    fn is_displayed(&self, node: &Self::Node) -> bool {
        self.style(node, DISPLAY).as_deref() != Some(DISPLAY_NONE)
    }

    fn hide(&mut self, node: &Self::Node) {
        if !self.is_displayed(node) {
            return;
        }
        if let Some(mode) = self.style(node, DISPLAY) {
            self.set_data(node, OLD_DISPLAY_MODE_KEY, &mode);
        }
        self.set_style(node, DISPLAY, Some(DISPLAY_NONE));
    }

    fn show(&mut self, node: &Self::Node) {
        if self.is_displayed(node) {
            return;
        }
        let mode = self
            .data(node, OLD_DISPLAY_MODE_KEY)
            .filter(|mode| !mode.is_empty() && mode != DISPLAY_NONE)
            .unwrap_or_else(|| DEFAULT_DISPLAY_MODE.to_owned());
        self.set_style(node, DISPLAY, Some(&mode));
    }
}
