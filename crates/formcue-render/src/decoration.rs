#![forbid(unsafe_code)]

//! Decoration state machine and the class-name strategy.
//!
//! # Invariants
//!
//! 1. The state is recomputed from every snapshot; no history participates.
//! 2. Applying a state is idempotent in visible result: class toggles are
//!    set operations and show/hide are no-ops when already in place.
//! 3. An element whose traversal resolves nothing is never touched.
//!
//! # Failure Modes
//!
//! | Condition                    | Behavior                          |
//! |------------------------------|-----------------------------------|
//! | Traversal yields no element  | pass skipped, `debug` event       |
//! | Decorated element detached   | classes still toggled on the node |

use core::fmt;

use formcue_core::traverse::{self, Traverser};
use formcue_core::{ElementTree, ValidationState};

/// Visual decoration derived from one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationState {
    Invalid,
    ValidModified,
    Clean,
}

/// Decoration for a `{valid, pristine, modified}` triple.
///
/// `pristine` does not participate: a valid field is decorated only once it
/// has been modified.
#[must_use]
pub const fn decoration_state_of(valid: bool, _pristine: bool, modified: bool) -> DecorationState {
    if !valid {
        DecorationState::Invalid
    } else if modified {
        DecorationState::ValidModified
    } else {
        DecorationState::Clean
    }
}

impl From<&ValidationState> for DecorationState {
    fn from(state: &ValidationState) -> Self {
        decoration_state_of(state.valid, state.pristine, state.modified)
    }
}

/// The physical input element plus what decoration resolved for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationTarget<N> {
    pub element: N,
    /// Element receiving decoration classes, resolved once at attach time.
    pub decorated: Option<N>,
    /// Feedback icon child, found or created on first use.
    pub icon: Option<N>,
}

impl<N> DecorationTarget<N> {
    #[must_use]
    pub fn new(element: N, decorated: Option<N>) -> Self {
        Self {
            element,
            decorated,
            icon: None,
        }
    }
}

/// A decoration strategy.
pub trait Decorator<T: ElementTree> {
    /// Element to decorate for `element`, `None` when nothing applies.
    fn resolve_target(&self, tree: &T, element: &T::Node) -> Option<T::Node>;

    /// Decorate as valid or invalid.
    fn decorate_element(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>, valid: bool);

    /// Remove every decoration this strategy applies.
    fn clear_decorations(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>);
}

/// Toggles one class for valid and one for invalid state.
pub struct ClassNameDecorator<T: ElementTree> {
    valid_class_name: String,
    invalid_class_name: String,
    traverser: Traverser<T>,
}

impl<T: ElementTree + 'static> Default for ClassNameDecorator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ElementTree + 'static> ClassNameDecorator<T> {
    /// `valid` / `invalid` classes on the element itself.
    #[must_use]
    pub fn new() -> Self {
        Self {
            valid_class_name: "valid".to_owned(),
            invalid_class_name: "invalid".to_owned(),
            traverser: traverse::identity(),
        }
    }
}

impl<T: ElementTree> ClassNameDecorator<T> {
    #[must_use]
    pub fn with_class_names(
        mut self,
        valid: impl Into<String>,
        invalid: impl Into<String>,
    ) -> Self {
        self.valid_class_name = valid.into();
        self.invalid_class_name = invalid.into();
        self
    }

    /// Replace the traversal from input element to decorated element.
    #[must_use]
    pub fn with_traverser(mut self, traverser: Traverser<T>) -> Self {
        self.traverser = traverser;
        self
    }

    pub fn use_traverser(
        &mut self,
        traverser: impl Fn(&T, &T::Node) -> Option<T::Node> + 'static,
    ) -> &mut Self {
        self.traverser = std::rc::Rc::new(traverser);
        self
    }

    pub fn set_valid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.valid_class_name = class_name.into();
        self
    }

    pub fn set_invalid_class_name(&mut self, class_name: impl Into<String>) -> &mut Self {
        self.invalid_class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn valid_class_name(&self) -> &str {
        &self.valid_class_name
    }

    #[must_use]
    pub fn invalid_class_name(&self) -> &str {
        &self.invalid_class_name
    }
}

impl<T: ElementTree> Clone for ClassNameDecorator<T> {
    fn clone(&self) -> Self {
        Self {
            valid_class_name: self.valid_class_name.clone(),
            invalid_class_name: self.invalid_class_name.clone(),
            traverser: self.traverser.clone(),
        }
    }
}

impl<T: ElementTree> fmt::Debug for ClassNameDecorator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassNameDecorator")
            .field("valid_class_name", &self.valid_class_name)
            .field("invalid_class_name", &self.invalid_class_name)
            .finish_non_exhaustive()
    }
}

impl<T: ElementTree> Decorator<T> for ClassNameDecorator<T> {
    fn resolve_target(&self, tree: &T, element: &T::Node) -> Option<T::Node> {
        (self.traverser)(tree, element)
    }

    fn decorate_element(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>, valid: bool) {
        let Some(node) = &target.decorated else {
            return;
        };
        let (on, off) = if valid {
            (&self.valid_class_name, &self.invalid_class_name)
        } else {
            (&self.invalid_class_name, &self.valid_class_name)
        };
        tree.remove_class(node, off);
        tree.add_class(node, on);
    }

    fn clear_decorations(&self, tree: &mut T, target: &mut DecorationTarget<T::Node>) {
        let Some(node) = &target.decorated else {
            return;
        };
        tree.remove_class(node, &self.valid_class_name);
        tree.remove_class(node, &self.invalid_class_name);
    }
}

/// Per-element decoration driver.
#[derive(Debug, Clone)]
pub struct DecorationMachine<N> {
    target: DecorationTarget<N>,
    applied: Option<DecorationState>,
}

impl<N: Clone + PartialEq + fmt::Debug> DecorationMachine<N> {
    /// Resolve the decorated element for `element` once.
    pub fn attach<T, D>(tree: &T, decorator: &D, element: N) -> Self
    where
        T: ElementTree<Node = N>,
        D: Decorator<T> + ?Sized,
    {
        let decorated = decorator.resolve_target(tree, &element);
        Self {
            target: DecorationTarget::new(element, decorated),
            applied: None,
        }
    }

    /// Apply the decoration for `snapshot`.
    pub fn update<T, D>(&mut self, tree: &mut T, decorator: &D, snapshot: &ValidationState) -> DecorationState
    where
        T: ElementTree<Node = N>,
        D: Decorator<T> + ?Sized,
    {
        let state = DecorationState::from(snapshot);
        self.apply(tree, decorator, state);
        state
    }

    /// Apply `state`. Always re-applied, even when unchanged since the last
    /// pass, so that external class edits are corrected.
    pub fn apply<T, D>(&mut self, tree: &mut T, decorator: &D, state: DecorationState)
    where
        T: ElementTree<Node = N>,
        D: Decorator<T> + ?Sized,
    {
        if self.target.decorated.is_none() {
            formcue_core::debug!(element = ?self.target.element, ?state, "no decorated element resolved, skipping");
            return;
        }
        match state {
            DecorationState::Invalid => decorator.decorate_element(tree, &mut self.target, false),
            DecorationState::ValidModified => {
                decorator.decorate_element(tree, &mut self.target, true);
            }
            DecorationState::Clean => decorator.clear_decorations(tree, &mut self.target),
        }
        self.applied = Some(state);
    }

    #[must_use]
    pub fn element(&self) -> &N {
        &self.target.element
    }

    #[must_use]
    pub fn target(&self) -> &DecorationTarget<N> {
        &self.target
    }

    /// Last state applied, `None` before the first pass or when every pass
    /// was skipped.
    #[must_use]
    pub fn applied(&self) -> Option<DecorationState> {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcue_core::Selector;
    use formcue_dom::{MemoryDom, NodeId};
    use proptest::prelude::*;

    fn input() -> (MemoryDom, NodeId, NodeId) {
        let mut dom = MemoryDom::new();
        let group = dom.append(dom.root(), "div", "form-group");
        let input = dom.append(group, "input", "");
        (dom, group, input)
    }

    fn snapshot(valid: bool, pristine: bool, modified: bool) -> ValidationState {
        ValidationState::new()
            .with_valid(valid)
            .with_pristine(pristine)
            .with_modified(modified)
    }

    #[test]
    fn truth_table() {
        use DecorationState::*;
        let cases = [
            ((false, false, false), Invalid),
            ((false, false, true), Invalid),
            ((false, true, false), Invalid),
            ((false, true, true), Invalid),
            ((true, false, false), Clean),
            ((true, false, true), ValidModified),
            ((true, true, false), Clean),
            ((true, true, true), ValidModified),
        ];
        for ((valid, pristine, modified), expected) in cases {
            assert_eq!(decoration_state_of(valid, pristine, modified), expected);
            assert_eq!(
                DecorationState::from(&snapshot(valid, pristine, modified)),
                expected
            );
        }
    }

    #[test]
    fn class_name_decorator_toggles_classes() {
        let (mut dom, _, input) = input();
        let decorator = ClassNameDecorator::<MemoryDom>::new();
        let mut machine = DecorationMachine::attach(&dom, &decorator, input);

        machine.apply(&mut dom, &decorator, DecorationState::Invalid);
        assert_eq!(dom.class_name(&input), "invalid");

        machine.apply(&mut dom, &decorator, DecorationState::ValidModified);
        assert_eq!(dom.class_name(&input), "valid");

        machine.apply(&mut dom, &decorator, DecorationState::Clean);
        assert_eq!(dom.class_name(&input), "");
        assert_eq!(machine.applied(), Some(DecorationState::Clean));
    }

    #[test]
    fn custom_class_names_and_traverser() {
        let (mut dom, group, input) = input();
        let mut decorator = ClassNameDecorator::<MemoryDom>::new().with_class_names("ok", "bad");
        decorator.use_traverser(|tree: &MemoryDom, node: &NodeId| tree.parent(node));
        let mut machine = DecorationMachine::attach(&dom, &decorator, input);
        assert_eq!(machine.target().decorated, Some(group));

        machine.update(&mut dom, &decorator, &snapshot(false, true, false));
        assert!(dom.has_class(&group, "bad"));
        assert_eq!(dom.class_name(&input), "");
    }

    #[test]
    fn unresolved_target_is_skipped() {
        let (mut dom, _, input) = input();
        let decorator = ClassNameDecorator::<MemoryDom>::new()
            .with_traverser(traverse::nearest_ancestor(Selector::class("missing")));
        let mut machine = DecorationMachine::attach(&dom, &decorator, input);

        machine.apply(&mut dom, &decorator, DecorationState::Invalid);
        assert_eq!(machine.applied(), None);
        assert_eq!(dom.class_name(&input), "");
    }

    #[test]
    fn reapplying_corrects_external_edits() {
        let (mut dom, _, input) = input();
        let decorator = ClassNameDecorator::<MemoryDom>::new();
        let mut machine = DecorationMachine::attach(&dom, &decorator, input);

        machine.apply(&mut dom, &decorator, DecorationState::Invalid);
        dom.add_class(&input, "valid");
        machine.apply(&mut dom, &decorator, DecorationState::Invalid);
        assert_eq!(dom.class_name(&input), "invalid");
    }

    proptest! {
        #[test]
        fn applying_twice_changes_nothing(valid in any::<bool>(), pristine in any::<bool>(), modified in any::<bool>()) {
            let (mut dom, _, input) = input();
            let decorator = ClassNameDecorator::<MemoryDom>::new();
            let mut machine = DecorationMachine::attach(&dom, &decorator, input);
            let snap = snapshot(valid, pristine, modified);

            machine.update(&mut dom, &decorator, &snap);
            let once = dom.outline(dom.root());
            machine.update(&mut dom, &decorator, &snap);
            prop_assert_eq!(dom.outline(dom.root()), once);
        }

        #[test]
        fn decorated_classes_follow_last_snapshot(
            history in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..12),
        ) {
            let (mut dom, _, input) = input();
            let decorator = ClassNameDecorator::<MemoryDom>::new();
            let mut machine = DecorationMachine::attach(&dom, &decorator, input);

            for (valid, modified) in &history {
                machine.update(&mut dom, &decorator, &snapshot(*valid, !*modified, *modified));
            }
            let (valid, modified) = history[history.len() - 1];
            prop_assert_eq!(dom.has_class(&input, "invalid"), !valid);
            prop_assert_eq!(dom.has_class(&input, "valid"), valid && modified);
        }
    }
}
