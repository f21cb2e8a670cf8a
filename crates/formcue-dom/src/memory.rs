#![forbid(unsafe_code)]

//! Headless in-memory element tree.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
//! detaches it; its id stays valid, so handles held by renderers never
//! dangle. Operations on unknown ids are ignored.
//!
//! [`MemoryDom::outline`] renders a subtree as indented text for snapshot
//! assertions:
//!
//! ```text
//! div.form-group
//!   input.invalid
//!   ul.error-list
//!     li.constraint-required "Please fill in this required field"
//! ```
//!
//! Nodes hidden through `display: none` carry a trailing `(hidden)`.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use formcue_core::ElementTree;

/// Handle to a node of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: BTreeMap<String, String>,
    data: BTreeMap<String, String>,
}

/// Arena-backed [`ElementTree`].
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
    root: NodeId,
    creation_enabled: bool,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document with a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "body".to_owned(),
                ..NodeData::default()
            }],
            root: NodeId(0),
            creation_enabled: true,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create `tag` (with optional classes) as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str, class_list: &str) -> NodeId {
        let id = self.alloc(tag);
        self.add_class(&id, class_list);
        self.append_child(&parent, &id);
        id
    }

    /// Make [`ElementTree::create_element`] fail, as a host refusing to
    /// create nodes would. Nodes can still be added with [`Self::append`].
    pub fn set_creation_enabled(&mut self, enabled: bool) {
        self.creation_enabled = enabled;
    }

    /// Whether `node` is connected to the root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Number of nodes ever allocated, attached or not.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Indented text rendering of `node` and its subtree.
    #[must_use]
    pub fn outline(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.outline_into(node, 0, &mut out);
        out
    }

    fn outline_into(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(data) = self.get(node) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&data.tag);
        for class in &data.classes {
            out.push('.');
            out.push_str(class);
        }
        if !data.text.is_empty() {
            let _ = write!(out, " {:?}", data.text);
        }
        if !self.is_displayed(&node) {
            out.push_str(" (hidden)");
        }
        out.push('\n');
        for child in &data.children {
            self.outline_into(*child, depth + 1, out);
        }
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        id
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
    }
}

impl ElementTree for MemoryDom {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        self.creation_enabled.then(|| self.alloc(tag))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if self.get(*parent).is_none() || self.get(*child).is_none() {
            return;
        }
        if self.is_ancestor_or_self(*child, *parent) {
            formcue_core::trace!(?parent, ?child, "refusing to append an ancestor");
            return;
        }
        self.detach(*child);
        if let Some(data) = self.get_mut(*child) {
            data.parent = Some(*parent);
        }
        if let Some(data) = self.get_mut(*parent) {
            data.children.push(*child);
        }
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.get(*node).map(|n| n.tag.clone()).unwrap_or_default()
    }

    fn class_name(&self, node: &NodeId) -> String {
        self.get(*node)
            .map(|n| n.classes.join(" "))
            .unwrap_or_default()
    }

    fn add_class(&mut self, node: &NodeId, class_list: &str) {
        let Some(data) = self.get_mut(*node) else {
            return;
        };
        for class in class_list.split_whitespace() {
            if !data.classes.iter().any(|have| have == class) {
                data.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&mut self, node: &NodeId, class_list: &str) {
        let Some(data) = self.get_mut(*node) else {
            return;
        };
        let doomed: Vec<&str> = class_list.split_whitespace().collect();
        data.classes.retain(|have| !doomed.contains(&have.as_str()));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.get(*node)
            .is_some_and(|n| n.classes.iter().any(|have| have == class))
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let Some(data) = self.get_mut(*node) {
            data.text = text.to_owned();
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.get(*node).map(|n| n.text.clone()).unwrap_or_default()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.get(*node).and_then(|n| n.parent)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.get(*node).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.get(*node).and_then(|n| n.style.get(property).cloned())
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: Option<&str>) {
        let Some(data) = self.get_mut(*node) else {
            return;
        };
        match value {
            Some(value) => {
                data.style.insert(property.to_owned(), value.to_owned());
            }
            None => {
                data.style.remove(property);
            }
        }
    }

    fn data(&self, node: &NodeId, key: &str) -> Option<String> {
        self.get(*node).and_then(|n| n.data.get(key).cloned())
    }

    fn set_data(&mut self, node: &NodeId, key: &str, value: &str) {
        if let Some(data) = self.get_mut(*node) {
            data.data.insert(key.to_owned(), value.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcue_core::{OLD_DISPLAY_MODE_KEY, Selector, traverse};
    use pretty_assertions::assert_eq;

    fn form() -> (MemoryDom, NodeId, NodeId) {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "form-group");
        let input = dom.append(group, "input", "form-control");
        (dom, group, input)
    }

    #[test]
    fn outline_renders_nested_structure() {
        let (mut dom, group, input) = form();
        dom.add_class(&input, "invalid");
        let list = dom.append(group, "ul", "error-list");
        let item = dom.append(list, "li", "constraint-required");
        dom.set_text(&item, "Required");
        dom.hide(&list);

        assert_eq!(
            dom.outline(group),
            "div.form-group\n  input.form-control.invalid\n  ul.error-list (hidden)\n    li.constraint-required \"Required\"\n"
        );
    }

    #[test]
    fn class_lists_deduplicate_and_remove() {
        let (mut dom, _, input) = form();
        dom.add_class(&input, "a b a");
        assert_eq!(dom.class_name(&input), "form-control a b");
        dom.remove_class(&input, "a form-control missing");
        assert_eq!(dom.class_name(&input), "b");
        assert!(dom.has_class(&input, "b"));
        assert!(!dom.has_class(&input, "a"));
    }

    #[test]
    fn remove_detaches_but_keeps_handle_valid() {
        let (mut dom, group, input) = form();
        dom.remove(&input);
        assert!(dom.children(&group).is_empty());
        assert!(!dom.is_attached(input));
        assert_eq!(dom.tag_name(&input), "input");
        dom.append_child(&group, &input);
        assert!(dom.is_attached(input));
    }

    #[test]
    fn append_moves_existing_child() {
        let (mut dom, group, input) = form();
        let other = dom.append(dom.root(), "div", "");
        dom.append_child(&other, &input);
        assert!(dom.children(&group).is_empty());
        assert_eq!(dom.children(&other), vec![input]);
        assert_eq!(dom.parent(&input), Some(other));
    }

    #[test]
    fn appending_an_ancestor_is_refused() {
        let (mut dom, group, input) = form();
        dom.append_child(&input, &group);
        assert_eq!(dom.parent(&group), Some(dom.root()));
        assert!(dom.children(&input).is_empty());
        dom.append_child(&group, &group);
        assert_eq!(dom.children(&group), vec![input]);
    }

    #[test]
    fn creation_can_be_disabled() {
        let mut dom = MemoryDom::new();
        dom.set_creation_enabled(false);
        assert_eq!(dom.create_element("ul"), None);
        dom.set_creation_enabled(true);
        let ul = dom.create_element("UL");
        assert!(ul.is_some());
        assert_eq!(ul.map(|n| dom.tag_name(&n)), Some("ul".to_owned()));
    }

    #[test]
    fn selectors_walk_both_directions() {
        let (mut dom, group, input) = form();
        let outer = dom.append(dom.root(), "div", "form-group outer");
        dom.append_child(&outer, &group);

        let groups = dom.find_ancestors(&input, &Selector::class("form-group"));
        assert_eq!(groups, vec![group, outer]);

        let list = dom.append(group, "ul", "error-list");
        let found = dom.find_descendants(&outer, &Selector::parse("ul.error-list"));
        assert_eq!(found, vec![list]);
        assert!(dom.find_descendants(&list, &Selector::parse("ul")).is_empty());
    }

    #[test]
    fn hide_show_restores_prior_display() {
        let (mut dom, group, _) = form();
        dom.set_style(&group, "display", Some("flex"));
        dom.hide(&group);
        assert_eq!(dom.style(&group, "display").as_deref(), Some("none"));
        assert_eq!(dom.data(&group, OLD_DISPLAY_MODE_KEY).as_deref(), Some("flex"));
        dom.hide(&group);
        assert_eq!(dom.data(&group, OLD_DISPLAY_MODE_KEY).as_deref(), Some("flex"));
        dom.show(&group);
        assert_eq!(dom.style(&group, "display").as_deref(), Some("flex"));
    }

    #[test]
    fn show_without_saved_mode_uses_block() {
        let (mut dom, group, _) = form();
        dom.hide(&group);
        assert_eq!(dom.data(&group, OLD_DISPLAY_MODE_KEY), None);
        dom.show(&group);
        assert_eq!(dom.style(&group, "display").as_deref(), Some("block"));
    }

    #[test]
    fn traversers_resolve_relatives() {
        let (mut dom, group, input) = form();
        let outer = dom.append(dom.root(), "section", "form-group");
        dom.append_child(&outer, &group);

        assert_eq!(traverse::identity::<MemoryDom>()(&dom, &input), Some(input));
        assert_eq!(traverse::parent::<MemoryDom>()(&dom, &input), Some(group));
        let nearest = traverse::nearest_ancestor::<MemoryDom>(Selector::parse("section.form-group"));
        assert_eq!(nearest(&dom, &input), Some(outer));
        assert_eq!(nearest(&dom, &outer), None);
        assert_eq!(traverse::parent::<MemoryDom>()(&dom, &dom.root()), None);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut dom = MemoryDom::new();
        let ghost = NodeId(99);
        dom.add_class(&ghost, "x");
        dom.set_text(&ghost, "x");
        dom.remove(&ghost);
        assert_eq!(dom.class_name(&ghost), "");
        assert_eq!(dom.parent(&ghost), None);
        assert_eq!(dom.allocated(), 1);
    }
}
