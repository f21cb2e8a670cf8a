#![forbid(unsafe_code)]

//! Validation snapshots delivered by the form model.

use std::collections::BTreeMap;

/// Name of a validation rule (`required`, `minlength`, ...).
pub type ConstraintName = String;

/// One snapshot of a field's validity.
///
/// Snapshots are supplied afresh on every change notification and never
/// mutated afterwards. `errors` mirrors the form model's
/// errors-by-constraint map: a `true` flag marks an active violation, a
/// `false` flag a constraint that is currently satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    pub valid: bool,
    pub pristine: bool,
    pub modified: bool,
    pub errors: BTreeMap<ConstraintName, bool>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            valid: true,
            pristine: true,
            modified: false,
            errors: BTreeMap::new(),
        }
    }
}

impl ValidationState {
    /// A valid, pristine, unmodified snapshot with no errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the validity flag.
    #[must_use]
    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// Set the pristine flag.
    #[must_use]
    pub fn with_pristine(mut self, pristine: bool) -> Self {
        self.pristine = pristine;
        self
    }

    /// Set the modified flag.
    #[must_use]
    pub fn with_modified(mut self, modified: bool) -> Self {
        self.modified = modified;
        self
    }

    /// Record a constraint flag (`true` = violated).
    #[must_use]
    pub fn with_error(mut self, constraint: impl Into<ConstraintName>, violated: bool) -> Self {
        self.errors.insert(constraint.into(), violated);
        self
    }

    /// Constraints currently violated, in name order.
    pub fn active_constraints(&self) -> impl Iterator<Item = &str> + '_ {
        self.errors
            .iter()
            .filter(|(_, violated)| **violated)
            .map(|(name, _)| name.as_str())
    }

    /// Whether at least one constraint is violated.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|violated| *violated)
    }

    /// Whether `other` has exactly the same set of violated constraints.
    ///
    /// Satisfied (`false`) entries are ignored, so `{required: false}` and
    /// `{}` compare equal.
    #[must_use]
    pub fn same_active_constraints(&self, other: &Self) -> bool {
        self.active_constraints().eq(other.active_constraints())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_clean() {
        let state = ValidationState::default();
        assert!(state.valid);
        assert!(state.pristine);
        assert!(!state.modified);
        assert!(!state.has_errors());
    }

    #[test]
    fn active_constraints_skip_satisfied_entries() {
        let state = ValidationState::new()
            .with_error("required", true)
            .with_error("email", false)
            .with_error("minlength", true);
        let active: Vec<_> = state.active_constraints().collect();
        assert_eq!(active, ["minlength", "required"]);
    }

    #[test]
    fn satisfied_entries_do_not_affect_comparison() {
        let a = ValidationState::new().with_error("required", false);
        let b = ValidationState::new();
        assert!(a.same_active_constraints(&b));

        let c = ValidationState::new().with_error("required", true);
        assert!(!a.same_active_constraints(&c));
    }
}
