//! Simulated script injection

use crate::library::SimRuntime;
use editor_api::DocumentContext;
use script_loader::{LoadCallback, LoadError, ScriptInjector, ScriptTag};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Injection {
    document: DocumentContext,
    tag: ScriptTag,
    on_complete: Option<LoadCallback>,
}

/// Records injected script tags and completes them on demand
///
/// When attached to a [`SimRuntime`], a successful completion makes the
/// runtime's library visible before the loader's continuation runs, the
/// same order a browser evaluates a script before firing `load`.
#[derive(Default)]
pub struct SimScriptInjector {
    injections: RefCell<Vec<Injection>>,
    runtime: Option<Rc<SimRuntime>>,
    immediate: Cell<bool>,
}

impl SimScriptInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes every injection before `inject` returns
    pub fn completing_immediately() -> Self {
        let injector = Self::default();
        injector.immediate.set(true);
        injector
    }

    /// Marks `runtime` loaded when a script completes
    pub fn with_runtime(mut self, runtime: Rc<SimRuntime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Tags injected so far, oldest first
    pub fn injected(&self) -> Vec<ScriptTag> {
        self.injections
            .borrow()
            .iter()
            .map(|injection| injection.tag.clone())
            .collect()
    }

    /// Documents injected into, oldest first
    pub fn documents(&self) -> Vec<DocumentContext> {
        self.injections
            .borrow()
            .iter()
            .map(|injection| injection.document.clone())
            .collect()
    }

    /// Completes the oldest pending injection of `src` successfully
    ///
    /// Returns false if nothing was pending for `src`.
    pub fn complete(&self, src: &str) -> bool {
        let Some(callback) = self.take_pending(src) else {
            return false;
        };
        if let Some(runtime) = &self.runtime {
            runtime.mark_loaded();
        }
        callback(Ok(()));
        true
    }

    /// Fails the oldest pending injection of `src`
    pub fn fail(&self, src: &str, reason: &str) -> bool {
        let Some(callback) = self.take_pending(src) else {
            return false;
        };
        callback(Err(LoadError::Failed {
            url: src.to_string(),
            reason: reason.to_string(),
        }));
        true
    }

    fn take_pending(&self, src: &str) -> Option<LoadCallback> {
        self.injections
            .borrow_mut()
            .iter_mut()
            .find(|injection| injection.tag.src == src && injection.on_complete.is_some())
            .and_then(|injection| injection.on_complete.take())
    }
}

impl ScriptInjector for SimScriptInjector {
    fn inject(&self, document: &DocumentContext, tag: ScriptTag, on_complete: LoadCallback) {
        if self.immediate.get() {
            self.injections.borrow_mut().push(Injection {
                document: document.clone(),
                tag,
                on_complete: None,
            });
            if let Some(runtime) = &self.runtime {
                runtime.mark_loaded();
            }
            on_complete(Ok(()));
            return;
        }
        self.injections.borrow_mut().push(Injection {
            document: document.clone(),
            tag,
            on_complete: Some(on_complete),
        });
    }
}
