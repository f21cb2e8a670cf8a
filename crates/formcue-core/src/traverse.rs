#![forbid(unsafe_code)]

//! Element traversers: functions from an input element to the element that
//! actually receives decoration or hosts the error list.

use std::rc::Rc;

use crate::element::ElementTree;
use crate::selector::Selector;

/// Shared traversal function. `None` means nothing resolves.
pub type Traverser<T> =
    Rc<dyn Fn(&T, &<T as ElementTree>::Node) -> Option<<T as ElementTree>::Node>>;

/// The element itself.
#[must_use]
pub fn identity<T: ElementTree + 'static>() -> Traverser<T> {
    Rc::new(|_: &T, node: &T::Node| Some(node.clone()))
}

/// The element's parent.
#[must_use]
pub fn parent<T: ElementTree + 'static>() -> Traverser<T> {
    Rc::new(|tree: &T, node: &T::Node| tree.parent(node))
}

/// The nearest ancestor matching `selector`.
#[must_use]
pub fn nearest_ancestor<T: ElementTree + 'static>(selector: Selector) -> Traverser<T> {
    Rc::new(move |tree: &T, node: &T::Node| {
        let mut current = tree.parent(node);
        while let Some(ancestor) = current {
            if tree.matches(&ancestor, &selector) {
                return Some(ancestor);
            }
            current = tree.parent(&ancestor);
        }
        None
    })
}
