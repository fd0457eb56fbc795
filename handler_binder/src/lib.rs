//! # Handler Binder
//!
//! Keeps the event handlers attached to an editor equal to the handlers a
//! host declares, across any number of update passes.
//!
//! ## Philosophy
//!
//! - **Declared set is the truth**: After reconciliation exactly the declared
//!   handlers are attached, one per event name
//! - **Detach before attach**: A replaced handler never fires alongside its
//!   successor
//! - **Idempotent**: Reconciling an unchanged declaration issues no calls

use editor_api::{Editor, EventHandler, EventName};
use std::collections::BTreeMap;

/// Handlers a host declares, by event name
pub type EventHandlers = BTreeMap<EventName, EventHandler>;

/// Calls issued by one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingChanges {
    pub attached: Vec<EventName>,
    pub detached: Vec<EventName>,
}

impl BindingChanges {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.detached.is_empty()
    }
}

/// Handlers currently attached to one editor
#[derive(Debug, Clone, Default)]
pub struct BoundHandlers {
    bound: BTreeMap<EventName, EventHandler>,
}

impl BoundHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the editor's attached handlers in line with `declared`
    pub fn reconcile(&mut self, editor: &dyn Editor, declared: &EventHandlers) -> BindingChanges {
        let mut changes = BindingChanges::default();

        for (name, handler) in declared {
            if let Some(previous) = self.bound.get(name) {
                if previous.same_as(handler) {
                    continue;
                }
                editor.off(name.as_str(), previous);
                changes.detached.push(name.clone());
            }
            editor.on(name.as_str(), handler.clone());
            self.bound.insert(name.clone(), handler.clone());
            changes.attached.push(name.clone());
        }

        let stale: Vec<EventName> = self
            .bound
            .keys()
            .filter(|name| !declared.contains_key(*name))
            .cloned()
            .collect();
        for name in stale {
            if let Some(previous) = self.bound.remove(&name) {
                editor.off(name.as_str(), &previous);
                changes.detached.push(name);
            }
        }

        if !changes.is_empty() {
            tracing::debug!(
                editor = editor.id(),
                attached = changes.attached.len(),
                detached = changes.detached.len(),
                "reconciled event handlers"
            );
        }
        changes
    }

    /// Detaches everything
    pub fn detach_all(&mut self, editor: &dyn Editor) {
        for (name, handler) in std::mem::take(&mut self.bound) {
            editor.off(name.as_str(), &handler);
        }
    }

    pub fn get(&self, name: &EventName) -> Option<&EventHandler> {
        self.bound.get(name)
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
