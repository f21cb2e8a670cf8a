#![forbid(unsafe_code)]

//! Reconciling error-list renderer.
//!
//! One [`ErrorListReconciler`] owns the message list of one logical field.
//! Each pass receives the complete `constraint -> message` map of active
//! violations and edits the list in place:
//!
//! 1. Nothing active and no list yet: nothing happens.
//! 2. The list is found under the attachment point or created. A list tagged
//!    with another owner (see [`OWNER_DATA_KEY`]) is never adopted.
//! 3. **Sweep**: items whose constraint is inactive are hidden; items whose
//!    constraint cannot be read from the markup are removed.
//! 4. **Fill**: active items are shown (text rewritten only when the message
//!    changed) and missing ones are created, decorated and appended.
//! 5. The list is shown when anything is active, hidden otherwise.
//!
//! # Invariants
//!
//! 1. After a successful pass the displayed items are exactly the active
//!    constraints, each with its current message.
//! 2. At most one tracked item per constraint; a tracked item keeps its node
//!    for the reconciler's whole life.
//! 3. The list and recognized items are hidden, never removed.
//! 4. A list carrying an owner tag is only edited by the reconciler of that
//!    owner.
//!
//! # Failure Modes
//!
//! | Condition                     | Behavior                                     |
//! |-------------------------------|----------------------------------------------|
//! | No attachment point           | `Err(RenderTargetUnavailable)`, DOM untouched |
//! | List or item creation refused | `Err(RenderTargetUnavailable)`, partial fill kept |
//! | Foreign node in the list      | removed, `trace` event                       |

use core::fmt;
use std::collections::BTreeMap;
use std::rc::Rc;

use formcue_core::{ElementTree, RenderTargetUnavailable, Selector};

/// Data key recording which field owns an error list.
pub const OWNER_DATA_KEY: &str = "formcue-owner";

/// Markup conventions of an error list.
pub trait ErrorListMarkup<T: ElementTree> {
    /// Selector finding an existing list under the attachment point.
    fn list_selector(&self) -> Selector;

    /// Create an empty, detached list element.
    fn create_list(&self, tree: &mut T) -> Option<T::Node>;

    /// Selector matching item elements inside the list. Other children are
    /// left alone.
    fn item_selector(&self) -> Selector;

    /// Constraint an item renders, `None` when it cannot be determined.
    fn constraint_of(&self, tree: &T, item: &T::Node) -> Option<String>;

    /// Create a detached item for `constraint` showing `message`.
    fn create_item(&self, tree: &mut T, constraint: &str, message: &str) -> Option<T::Node>;

    fn update_item(&self, tree: &mut T, item: &T::Node, message: &str) {
        tree.set_text(item, message);
    }

    /// Hook run once on every newly created item, before it is appended.
    fn decorate_item(&self, _tree: &mut T, _item: &T::Node, _constraint: &str) {}
}

/// Hook applied to newly created list items.
pub type ItemDecorator<T> = Rc<dyn Fn(&mut T, &<T as ElementTree>::Node, &str)>;

/// `ul.error-list` holding `li.constraint-<name>` items.
pub struct DefaultErrorListMarkup<T: ElementTree> {
    list_tag: String,
    list_class: String,
    item_tag: String,
    item_class_prefix: String,
    item_decorator: Option<ItemDecorator<T>>,
}

impl<T: ElementTree> Default for DefaultErrorListMarkup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ElementTree> DefaultErrorListMarkup<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list_tag: "ul".to_owned(),
            list_class: "error-list".to_owned(),
            item_tag: "li".to_owned(),
            item_class_prefix: "constraint-".to_owned(),
            item_decorator: None,
        }
    }

    #[must_use]
    pub fn with_list(mut self, tag: impl Into<String>, class: impl Into<String>) -> Self {
        self.list_tag = tag.into();
        self.list_class = class.into();
        self
    }

    #[must_use]
    pub fn with_items(mut self, tag: impl Into<String>, class_prefix: impl Into<String>) -> Self {
        self.item_tag = tag.into();
        self.item_class_prefix = class_prefix.into();
        self
    }

    /// Run `decorator` on each item when it is first created.
    #[must_use]
    pub fn with_item_decorator(
        mut self,
        decorator: impl Fn(&mut T, &T::Node, &str) + 'static,
    ) -> Self {
        self.item_decorator = Some(Rc::new(decorator));
        self
    }

    /// Item class for `constraint`, e.g. `constraint-required`.
    #[must_use]
    pub fn item_class(&self, constraint: &str) -> String {
        format!("{}{constraint}", self.item_class_prefix)
    }
}

impl<T: ElementTree> Clone for DefaultErrorListMarkup<T> {
    fn clone(&self) -> Self {
        Self {
            list_tag: self.list_tag.clone(),
            list_class: self.list_class.clone(),
            item_tag: self.item_tag.clone(),
            item_class_prefix: self.item_class_prefix.clone(),
            item_decorator: self.item_decorator.clone(),
        }
    }
}

impl<T: ElementTree> fmt::Debug for DefaultErrorListMarkup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultErrorListMarkup")
            .field("list_tag", &self.list_tag)
            .field("list_class", &self.list_class)
            .field("item_tag", &self.item_tag)
            .field("item_class_prefix", &self.item_class_prefix)
            .field("item_decorator", &self.item_decorator.is_some())
            .finish()
    }
}

impl<T: ElementTree> ErrorListMarkup<T> for DefaultErrorListMarkup<T> {
    fn list_selector(&self) -> Selector {
        Selector::tag(&self.list_tag).and_class(&self.list_class)
    }

    fn create_list(&self, tree: &mut T) -> Option<T::Node> {
        let list = tree.create_element(&self.list_tag)?;
        tree.add_class(&list, &self.list_class);
        Some(list)
    }

    fn item_selector(&self) -> Selector {
        Selector::tag(&self.item_tag)
    }

    fn constraint_of(&self, tree: &T, item: &T::Node) -> Option<String> {
        tree.class_name(item)
            .split_whitespace()
            .find_map(|class| class.strip_prefix(self.item_class_prefix.as_str()))
            .filter(|constraint| !constraint.is_empty())
            .map(str::to_owned)
    }

    fn create_item(&self, tree: &mut T, constraint: &str, message: &str) -> Option<T::Node> {
        let item = tree.create_element(&self.item_tag)?;
        tree.add_class(&item, &self.item_class(constraint));
        tree.set_text(&item, message);
        Some(item)
    }

    fn decorate_item(&self, tree: &mut T, item: &T::Node, constraint: &str) {
        if let Some(decorator) = &self.item_decorator {
            decorator(tree, item, constraint);
        }
    }
}

/// One tracked message node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedErrorItem<N> {
    pub node: N,
    pub visible: bool,
    pub message: String,
}

/// Keeps one error list in step with the active violations.
pub struct ErrorListReconciler<T: ElementTree> {
    markup: Rc<dyn ErrorListMarkup<T>>,
    attachment: Option<T::Node>,
    owner: Option<String>,
    list: Option<T::Node>,
    items: BTreeMap<String, RenderedErrorItem<T::Node>>,
}

impl<T: ElementTree> ErrorListReconciler<T> {
    /// Reconciler rendering under `attachment` with `markup`.
    #[must_use]
    pub fn new(markup: Rc<dyn ErrorListMarkup<T>>, attachment: Option<T::Node>) -> Self {
        Self {
            markup,
            attachment,
            owner: None,
            list: None,
            items: BTreeMap::new(),
        }
    }

    /// Tag the list with `owner`. Lists tagged by a different owner under
    /// the same attachment point are left alone and a separate list is
    /// created. Without an owner only untagged lists are adopted.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub fn attachment(&self) -> Option<&T::Node> {
        self.attachment.as_ref()
    }

    #[must_use]
    pub fn list(&self) -> Option<&T::Node> {
        self.list.as_ref()
    }

    #[must_use]
    pub fn item(&self, constraint: &str) -> Option<&RenderedErrorItem<T::Node>> {
        self.items.get(constraint)
    }

    /// Constraints whose items are currently shown, sorted.
    pub fn visible_constraints(&self) -> impl Iterator<Item = &str> + '_ {
        self.items
            .iter()
            .filter(|(_, item)| item.visible)
            .map(|(constraint, _)| constraint.as_str())
    }

    /// Bring the list in line with `messages`.
    ///
    /// # Errors
    ///
    /// [`RenderTargetUnavailable`] when the list has nowhere to attach or the
    /// host refuses to create a node. Earlier edits of the pass are kept.
    pub fn reconcile(
        &mut self,
        tree: &mut T,
        messages: &BTreeMap<String, String>,
    ) -> Result<(), RenderTargetUnavailable> {
        if messages.is_empty() && self.list.is_none() {
            return Ok(());
        }
        let list = self.ensure_list(tree)?;
        self.sweep(tree, &list, messages);
        self.fill(tree, &list, messages)?;
        if messages.is_empty() {
            tree.hide(&list);
        } else {
            tree.show(&list);
        }
        Ok(())
    }

    fn ensure_list(&mut self, tree: &mut T) -> Result<T::Node, RenderTargetUnavailable> {
        if let Some(list) = &self.list {
            return Ok(list.clone());
        }
        let attachment = self
            .attachment
            .clone()
            .ok_or(RenderTargetUnavailable::new("no error container resolved"))?;
        let existing = tree
            .find_descendants(&attachment, &self.markup.list_selector())
            .into_iter()
            .find(|list| self.may_adopt(tree, list));
        let list = match existing {
            Some(list) => list,
            None => {
                let list = self
                    .markup
                    .create_list(tree)
                    .ok_or(RenderTargetUnavailable::new("error list could not be created"))?;
                tree.append_child(&attachment, &list);
                list
            }
        };
        if let Some(owner) = &self.owner {
            tree.set_data(&list, OWNER_DATA_KEY, owner);
        }
        self.list = Some(list.clone());
        Ok(list)
    }

    fn may_adopt(&self, tree: &T, list: &T::Node) -> bool {
        match tree.data(list, OWNER_DATA_KEY) {
            None => true,
            Some(tag) => self.owner.as_deref() == Some(tag.as_str()),
        }
    }

    fn sweep(&mut self, tree: &mut T, list: &T::Node, messages: &BTreeMap<String, String>) {
        let item_selector = self.markup.item_selector();
        for child in tree.children(list) {
            if !tree.matches(&child, &item_selector) {
                continue;
            }
            let Some(constraint) = self.markup.constraint_of(tree, &child) else {
                formcue_core::trace!(node = ?child, "removing list item without a constraint key");
                tree.remove(&child);
                continue;
            };
            let tracked = match self.items.get(&constraint) {
                Some(item) => item.node == child,
                None => {
                    let message = tree.text(&child);
                    self.items.insert(
                        constraint.clone(),
                        RenderedErrorItem {
                            node: child.clone(),
                            visible: tree.is_displayed(&child),
                            message,
                        },
                    );
                    true
                }
            };
            if !tracked {
                tree.hide(&child);
            } else if !messages.contains_key(&constraint) {
                tree.hide(&child);
                if let Some(item) = self.items.get_mut(&constraint) {
                    item.visible = false;
                }
            }
        }
    }

    fn fill(
        &mut self,
        tree: &mut T,
        list: &T::Node,
        messages: &BTreeMap<String, String>,
    ) -> Result<(), RenderTargetUnavailable> {
        for (constraint, message) in messages {
            if let Some(item) = self.items.get_mut(constraint) {
                if tree.parent(&item.node).as_ref() != Some(list) {
                    tree.append_child(list, &item.node);
                }
                if item.message != *message {
                    self.markup.update_item(tree, &item.node, message);
                    item.message.clone_from(message);
                }
                tree.show(&item.node);
                item.visible = true;
                continue;
            }
            let node = self
                .markup
                .create_item(tree, constraint, message)
                .ok_or(RenderTargetUnavailable::new("error item could not be created"))?;
            self.markup.decorate_item(tree, &node, constraint);
            tree.append_child(list, &node);
            tree.show(&node);
            self.items.insert(
                constraint.clone(),
                RenderedErrorItem {
                    node,
                    visible: true,
                    message: message.clone(),
                },
            );
        }
        Ok(())
    }
}

impl<T: ElementTree> fmt::Debug for ErrorListReconciler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorListReconciler")
            .field("attachment", &self.attachment)
            .field("owner", &self.owner)
            .field("list", &self.list)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcue_dom::{MemoryDom, NodeId};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn messages(active: &[&str]) -> BTreeMap<String, String> {
        active
            .iter()
            .map(|c| ((*c).to_owned(), format!("{c} failed")))
            .collect()
    }

    fn setup() -> (MemoryDom, NodeId, ErrorListReconciler<MemoryDom>) {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "form-group");
        dom.append(group, "input", "");
        let markup: Rc<dyn ErrorListMarkup<MemoryDom>> = Rc::new(DefaultErrorListMarkup::new());
        let reconciler = ErrorListReconciler::new(markup, Some(group));
        (dom, group, reconciler)
    }

    fn displayed(dom: &MemoryDom, reconciler: &ErrorListReconciler<MemoryDom>) -> Vec<String> {
        let Some(list) = reconciler.list() else {
            return Vec::new();
        };
        if !dom.is_displayed(list) {
            return Vec::new();
        }
        dom.children(list)
            .iter()
            .filter(|item| dom.tag_name(item) == "li" && dom.is_displayed(item))
            .map(|item| dom.text(item))
            .collect()
    }

    #[test]
    fn empty_without_list_is_noop() {
        let (mut dom, group, mut reconciler) = setup();
        let before = dom.outline(group);
        assert_eq!(reconciler.reconcile(&mut dom, &BTreeMap::new()), Ok(()));
        assert_eq!(dom.outline(group), before);
        assert!(reconciler.list().is_none());
    }

    #[test]
    fn churn_keeps_shared_item_identity() {
        let (mut dom, group, mut reconciler) = setup();
        reconciler.reconcile(&mut dom, &messages(&["a", "b"])).ok();
        let a = reconciler.item("a").map(|i| i.node);
        let b = reconciler.item("b").map(|i| i.node);

        reconciler.reconcile(&mut dom, &messages(&["b", "c"])).ok();
        assert_eq!(reconciler.item("b").map(|i| i.node), b);
        assert_eq!(reconciler.item("a").map(|i| i.node), a);
        assert_eq!(
            dom.outline(group),
            "div.form-group\n  input\n  ul.error-list\n    li.constraint-a \"a failed\" (hidden)\n    li.constraint-b \"b failed\"\n    li.constraint-c \"c failed\"\n"
        );
        assert_eq!(reconciler.visible_constraints().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn clearing_hides_list_and_items() {
        let (mut dom, group, mut reconciler) = setup();
        reconciler.reconcile(&mut dom, &messages(&["required"])).ok();
        assert_eq!(reconciler.reconcile(&mut dom, &BTreeMap::new()), Ok(()));
        assert_eq!(
            dom.outline(group),
            "div.form-group\n  input\n  ul.error-list (hidden)\n    li.constraint-required \"required failed\" (hidden)\n"
        );

        reconciler.reconcile(&mut dom, &messages(&["required"])).ok();
        assert_eq!(displayed(&dom, &reconciler), ["required failed"]);
        assert_eq!(dom.allocated(), 5);
    }

    #[test]
    fn text_updates_only_on_change() {
        let (mut dom, _, mut reconciler) = setup();
        reconciler.reconcile(&mut dom, &messages(&["min"])).ok();
        let node = reconciler.item("min").map(|i| i.node);
        if let Some(node) = node {
            dom.set_text(&node, "edited by host");
        }
        reconciler.reconcile(&mut dom, &messages(&["min"])).ok();
        assert_eq!(node.map(|n| dom.text(&n)).as_deref(), Some("edited by host"));

        let mut changed = messages(&["min"]);
        changed.insert("min".into(), "Please enter a number not less than 3".into());
        reconciler.reconcile(&mut dom, &changed).ok();
        assert_eq!(
            node.map(|n| dom.text(&n)).as_deref(),
            Some("Please enter a number not less than 3")
        );
    }

    #[test]
    fn existing_markup_is_adopted_and_foreign_items_removed() {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "form-group");
        let list = dom.append(group, "ul", "error-list");
        let stale = dom.append(list, "li", "constraint-email");
        dom.set_text(&stale, "old email text");
        let foreign = dom.append(list, "li", "note");
        let caption = dom.append(list, "p", "caption");

        let markup: Rc<dyn ErrorListMarkup<MemoryDom>> = Rc::new(DefaultErrorListMarkup::new());
        let mut reconciler = ErrorListReconciler::new(markup, Some(group));
        reconciler.reconcile(&mut dom, &messages(&["required"])).ok();

        assert_eq!(reconciler.list(), Some(&list));
        assert!(!dom.is_attached(foreign));
        assert!(dom.is_attached(caption));
        assert_eq!(reconciler.item("email").map(|i| i.node), Some(stale));
        assert!(!dom.is_displayed(&stale));
        assert_eq!(displayed(&dom, &reconciler), ["required failed"]);

        reconciler.reconcile(&mut dom, &messages(&["email"])).ok();
        assert_eq!(dom.text(&stale), "email failed");
        assert!(dom.is_displayed(&stale));
    }

    #[test]
    fn duplicate_items_for_one_constraint_are_hidden() {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "form-group");
        let list = dom.append(group, "ul", "error-list");
        let first = dom.append(list, "li", "constraint-email");
        let second = dom.append(list, "li", "constraint-email");

        let markup: Rc<dyn ErrorListMarkup<MemoryDom>> = Rc::new(DefaultErrorListMarkup::new());
        let mut reconciler = ErrorListReconciler::new(markup, Some(group));
        assert_eq!(reconciler.reconcile(&mut dom, &messages(&["email"])), Ok(()));

        assert_eq!(reconciler.item("email").map(|i| i.node), Some(first));
        assert!(dom.is_attached(second));
        assert_eq!(
            dom.outline(group),
            "div.form-group\n  ul.error-list\n    li.constraint-email \"email failed\"\n    li.constraint-email (hidden)\n"
        );

        reconciler.reconcile(&mut dom, &messages(&["email"])).ok();
        assert!(!dom.is_displayed(&second));
        assert_eq!(displayed(&dom, &reconciler), ["email failed"]);
    }

    #[test]
    fn detached_item_is_put_back() {
        let (mut dom, group, mut reconciler) = setup();
        reconciler.reconcile(&mut dom, &messages(&["required", "url"])).ok();
        let Some(required) = reconciler.item("required").map(|i| i.node) else {
            panic!("required item rendered");
        };
        dom.remove(&required);
        assert!(!dom.is_attached(required));

        assert_eq!(reconciler.reconcile(&mut dom, &messages(&["required", "url"])), Ok(()));
        assert_eq!(reconciler.item("required").map(|i| i.node), Some(required));
        assert!(dom.is_attached(required));
        assert_eq!(
            dom.outline(group),
            "div.form-group\n  input\n  ul.error-list\n    li.constraint-url \"url failed\"\n    li.constraint-required \"required failed\"\n"
        );
    }

    #[test]
    fn lists_of_other_owners_are_not_adopted() {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "");
        let markup: Rc<dyn ErrorListMarkup<MemoryDom>> = Rc::new(DefaultErrorListMarkup::new());
        let mut a = ErrorListReconciler::new(Rc::clone(&markup), Some(group)).with_owner("f.a");
        let mut b = ErrorListReconciler::new(markup, Some(group)).with_owner("f.b");

        a.reconcile(&mut dom, &messages(&["required"])).ok();
        b.reconcile(&mut dom, &messages(&["email"])).ok();
        assert_ne!(a.list(), b.list());
        assert_eq!(
            a.list().and_then(|list| dom.data(list, OWNER_DATA_KEY)).as_deref(),
            Some("f.a")
        );
        assert_eq!(displayed(&dom, &a), ["required failed"]);
        assert_eq!(displayed(&dom, &b), ["email failed"]);
        assert_eq!(
            dom.outline(group),
            "div\n  ul.error-list\n    li.constraint-required \"required failed\"\n  ul.error-list\n    li.constraint-email \"email failed\"\n"
        );

        let mut late = ErrorListReconciler::new(
            Rc::new(DefaultErrorListMarkup::<MemoryDom>::new()),
            Some(group),
        )
        .with_owner("f.a");
        late.reconcile(&mut dom, &messages(&["required"])).ok();
        assert_eq!(late.list(), a.list());
    }

    #[test]
    fn missing_attachment_is_reported() {
        let mut dom = MemoryDom::new();
        let markup: Rc<dyn ErrorListMarkup<MemoryDom>> = Rc::new(DefaultErrorListMarkup::new());
        let mut reconciler = ErrorListReconciler::new(markup, None);
        assert_eq!(
            reconciler.reconcile(&mut dom, &messages(&["required"])),
            Err(RenderTargetUnavailable::new("no error container resolved"))
        );
        assert_eq!(dom.allocated(), 1);
    }

    #[test]
    fn refused_creation_is_reported() {
        let (mut dom, group, mut reconciler) = setup();
        dom.set_creation_enabled(false);
        let before = dom.outline(group);
        assert!(reconciler.reconcile(&mut dom, &messages(&["required"])).is_err());
        assert_eq!(dom.outline(group), before);

        dom.set_creation_enabled(true);
        assert_eq!(reconciler.reconcile(&mut dom, &messages(&["required"])), Ok(()));
        assert_eq!(displayed(&dom, &reconciler), ["required failed"]);
    }

    #[test]
    fn item_decorator_runs_once_per_item() {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "");
        let markup = DefaultErrorListMarkup::<MemoryDom>::new()
            .with_items("p", "err-")
            .with_item_decorator(|tree: &mut MemoryDom, item: &NodeId, constraint: &str| {
                tree.add_class(item, &format!("help-block {constraint}-hint"));
            });
        let markup: Rc<dyn ErrorListMarkup<MemoryDom>> = Rc::new(markup);
        let mut reconciler = ErrorListReconciler::new(markup, Some(group));

        reconciler.reconcile(&mut dom, &messages(&["url"])).ok();
        reconciler.reconcile(&mut dom, &BTreeMap::new()).ok();
        reconciler.reconcile(&mut dom, &messages(&["url"])).ok();
        assert_eq!(
            dom.outline(group),
            "div\n  ul.error-list\n    p.err-url.help-block.url-hint \"url failed\"\n"
        );
    }

    fn constraint_set() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::sample::subsequence(
            vec!["email", "max", "maxlength", "min", "minlength", "pattern", "required", "url"],
            0..=8,
        )
    }

    proptest! {
        #[test]
        fn visible_items_converge_to_active_set(history in proptest::collection::vec(constraint_set(), 1..10)) {
            let (mut dom, _, mut reconciler) = setup();
            let mut created = BTreeMap::new();
            for active in &history {
                prop_assert_eq!(reconciler.reconcile(&mut dom, &messages(active)), Ok(()));

                let mut expected: Vec<String> = active.iter().map(|c| format!("{c} failed")).collect();
                expected.sort();
                let mut shown = displayed(&dom, &reconciler);
                shown.sort();
                prop_assert_eq!(shown, expected);

                for constraint in active {
                    let node = reconciler.item(constraint).map(|i| i.node);
                    let first = *created.entry(*constraint).or_insert(node);
                    prop_assert_eq!(node, first);
                }
            }
        }

        #[test]
        fn repeated_pass_is_idempotent(active in constraint_set()) {
            let (mut dom, group, mut reconciler) = setup();
            reconciler.reconcile(&mut dom, &messages(&active)).ok();
            let once = dom.outline(group);
            let allocated = dom.allocated();
            reconciler.reconcile(&mut dom, &messages(&active)).ok();
            prop_assert_eq!(dom.outline(group), once);
            prop_assert_eq!(dom.allocated(), allocated);
        }
    }
}
