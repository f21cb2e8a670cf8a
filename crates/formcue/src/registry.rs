#![forbid(unsafe_code)]

//! Registration coordinator.
//!
//! A [`Registry`] owns one attachment record per logical field
//! ([`BindingKey`]): a decoration machine for every physical element bound to
//! the field, and a single error-list reconciler shared by all of them.
//!
//! # Invariants
//!
//! 1. Every registered element gets its own decoration machine; the same
//!    element registered twice is attached once.
//! 2. A key has exactly one error list, created by the first registration.
//! 3. A notification updates decoration and the error list from the same
//!    snapshot before returning.
//! 4. The list is reconciled only when the active constraint set differs from
//!    the previous snapshot or the message configuration changed since the
//!    last successful render.
//!
//! # Failure Modes
//!
//! | Condition                  | Behavior                                      |
//! |----------------------------|-----------------------------------------------|
//! | `RenderTargetUnavailable`  | `warn` event, list pass skipped, retried next notification |
//! | Notification for unknown key | `debug` event, nothing rendered             |

use std::collections::BTreeMap;

use formcue_core::{BindingKey, ElementTree, InputBinding, ValidationState};
use formcue_i18n::{LocaleStrings, MessageSource};
use formcue_render::{DecorationMachine, DecorationState, ErrorListReconciler};

use crate::config::FormValidationConfig;
use crate::model::FormModel;
use crate::Result;

struct Attachment<T: ElementTree> {
    binding: InputBinding,
    machines: Vec<DecorationMachine<T::Node>>,
    reconciler: ErrorListReconciler<T>,
    previous: Option<ValidationState>,
    rendered_generation: Option<u64>,
}

/// Per-field attachment records plus the configuration they render with.
pub struct Registry<T: ElementTree> {
    config: FormValidationConfig<T>,
    attachments: BTreeMap<BindingKey, Attachment<T>>,
    message_generation: u64,
}

impl<T: ElementTree + 'static> Default for Registry<T> {
    fn default() -> Self {
        Self::new(FormValidationConfig::new())
    }
}

impl<T: ElementTree> Registry<T> {
    #[must_use]
    pub fn new(config: FormValidationConfig<T>) -> Self {
        Self {
            config,
            attachments: BTreeMap::new(),
            message_generation: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &FormValidationConfig<T> {
        &self.config
    }

    /// Bind `element` to `binding`'s field and render the model's current
    /// snapshot for it.
    pub fn register(
        &mut self,
        tree: &mut T,
        binding: InputBinding,
        element: T::Node,
        model: &dyn FormModel,
    ) -> BindingKey {
        let key = self.attach(tree, binding, element);
        match model.field_state(&key.field) {
            Some(snapshot) => {
                self.notify(tree, &key, &snapshot);
            }
            None => formcue_core::debug!(key = %key, "model has no state for field yet"),
        }
        key
    }

    /// Bind `element` without an initial pass.
    pub fn attach(&mut self, tree: &mut T, binding: InputBinding, element: T::Node) -> BindingKey {
        let key = binding.key().clone();
        let config = &self.config;
        let attachment = self.attachments.entry(key.clone()).or_insert_with(|| {
            let container = config.error_container(tree, &element);
            if container.is_none() {
                formcue_core::debug!(key = %binding.key(), "no error container resolved");
            }
            Attachment {
                reconciler: ErrorListReconciler::new(config.markup(), container)
                    .with_owner(binding.key().to_string()),
                binding,
                machines: Vec::new(),
                previous: None,
                rendered_generation: None,
            }
        });
        if !attachment.machines.iter().any(|m| *m.element() == element) {
            let machine = DecorationMachine::attach(&*tree, config.decoration_strategy(), element);
            attachment.machines.push(machine);
        }
        key
    }

    /// Render `snapshot` for every element bound to `key`.
    ///
    /// Returns `false` when `key` is not registered.
    pub fn notify(&mut self, tree: &mut T, key: &BindingKey, snapshot: &ValidationState) -> bool {
        let span = formcue_core::debug_span!("formcue.notify", key = %key);
        let _guard = span.enter();

        let Some(attachment) = self.attachments.get_mut(key) else {
            formcue_core::debug!("notification for unregistered field");
            return false;
        };
        let state = DecorationState::from(snapshot);
        let strategy = self.config.decoration_strategy();
        for machine in &mut attachment.machines {
            machine.apply(tree, strategy, state);
        }

        let errors_changed = attachment
            .previous
            .as_ref()
            .is_none_or(|previous| !previous.same_active_constraints(snapshot));
        let messages_stale = attachment.rendered_generation != Some(self.message_generation);
        if errors_changed || messages_stale {
            let messages = self
                .config
                .messages_for(snapshot, &attachment.binding.parameters);
            match attachment.reconciler.reconcile(tree, &messages) {
                Ok(()) => attachment.rendered_generation = Some(self.message_generation),
                Err(err) => {
                    formcue_core::warn!(%err, "skipping error list render");
                    attachment.rendered_generation = None;
                }
            }
        }
        attachment.previous = Some(snapshot.clone());
        true
    }

    /// Stop notifications for `element`. The field's record is dropped with
    /// its last element; rendered DOM is left as is.
    ///
    /// Returns `false` when `element` was not bound to `key`.
    pub fn detach(&mut self, key: &BindingKey, element: &T::Node) -> bool {
        let Some(attachment) = self.attachments.get_mut(key) else {
            return false;
        };
        let before = attachment.machines.len();
        attachment.machines.retain(|m| m.element() != element);
        let removed = attachment.machines.len() != before;
        if attachment.machines.is_empty() {
            self.attachments.remove(key);
        }
        removed
    }

    /// Change the message locale. Lists re-render on their next
    /// notification.
    pub fn set_locale(&mut self, locale: &str) {
        self.config.set_locale(locale);
        self.message_generation += 1;
    }

    /// Register one more locale table. Lists re-render on their next
    /// notification.
    ///
    /// # Errors
    ///
    /// See [`FormValidationConfig::add_locale`].
    pub fn add_locale(&mut self, locale: &str, strings: LocaleStrings) -> Result<()> {
        self.config.add_locale(locale, strings)?;
        self.message_generation += 1;
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, key: &BindingKey) -> bool {
        self.attachments.contains_key(key)
    }

    /// Number of registered logical fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.attachments.len()
    }

    /// Number of elements bound to `key`.
    #[must_use]
    pub fn element_count(&self, key: &BindingKey) -> usize {
        self.attachments.get(key).map_or(0, |a| a.machines.len())
    }

    /// The error list of `key`, once it has been created.
    #[must_use]
    pub fn error_list(&self, key: &BindingKey) -> Option<&T::Node> {
        self.attachments.get(key).and_then(|a| a.reconciler.list())
    }

    #[must_use]
    pub fn reconciler(&self, key: &BindingKey) -> Option<&ErrorListReconciler<T>> {
        self.attachments.get(key).map(|a| &a.reconciler)
    }
}

impl<T: ElementTree + 'static> Registry<T> {
    /// Replace the dictionary. Lists re-render on their next notification.
    pub fn set_dictionary(&mut self, source: impl MessageSource + 'static) {
        self.config.set_dictionary(source);
        self.message_generation += 1;
    }
}

impl<T: ElementTree> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("fields", &self.attachments.keys().collect::<Vec<_>>())
            .field("message_generation", &self.message_generation)
            .finish()
    }
}
