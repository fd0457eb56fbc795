//! # Script Loader
//!
//! Acquires the editor library script exactly once per document and URL.
//!
//! ## Philosophy
//!
//! - **One load, many waiters**: Concurrent requests share a single pending load
//! - **Synchronous when ready**: A loaded script answers immediately
//! - **No retries**: A failed load leaves its waiters pending forever
//! - **Explicit sharing**: Instances share a loader by cloning it, not through
//!   hidden globals
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A network client or cache (the injector owns retrieval)
//! - A module system or dependency resolver

pub mod source;

pub use source::{resolve_script_src, DEFAULT_CLOUD_CHANNEL, PLACEHOLDER_API_KEY};

use editor_api::DocumentContext;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Prefix for generated script element ids
pub const SCRIPT_ID_PREFIX: &str = "tiny-script";

/// Script load error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("script {url} failed to load: {reason}")]
    Failed { url: String, reason: String },
}

/// The script element the loader asks to have injected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub id: String,
    pub src: String,
    pub referrer_policy: String,
    pub script_type: String,
}

impl ScriptTag {
    fn new(src: &str) -> Self {
        Self {
            id: identity::unique_id(SCRIPT_ID_PREFIX),
            src: src.to_string(),
            referrer_policy: "origin".to_string(),
            script_type: "application/javascript".to_string(),
        }
    }
}

/// Completion continuation handed to an injector
pub type LoadCallback = Box<dyn FnOnce(Result<(), LoadError>)>;

/// Inserts script elements into a document
///
/// `on_complete` must be called at most once. It may be called before
/// `inject` returns.
pub trait ScriptInjector {
    fn inject(&self, document: &DocumentContext, tag: ScriptTag, on_complete: LoadCallback);
}

/// Observable status of one script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Injected, waiting for completion
    Pending { waiters: usize },
    /// Completed successfully
    Loaded,
    /// Completed with an error; never retried
    Failed,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::Pending { waiters } => write!(f, "pending ({} waiters)", waiters),
            LoadStatus::Loaded => write!(f, "loaded"),
            LoadStatus::Failed => write!(f, "failed"),
        }
    }
}

type ReadyCallback = Box<dyn FnOnce()>;

enum ScriptStatus {
    Pending(Vec<ReadyCallback>),
    Loaded,
    Failed,
}

struct ScriptEntry {
    tag_id: String,
    status: ScriptStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScriptKey {
    document: DocumentContext,
    url: String,
}

struct LoaderState {
    generation: u64,
    scripts: HashMap<ScriptKey, ScriptEntry>,
}

/// Shared script loader
///
/// Cloning yields another handle to the same load state.
#[derive(Clone)]
pub struct ScriptLoader {
    state: Rc<RefCell<LoaderState>>,
    injector: Rc<dyn ScriptInjector>,
}

impl ScriptLoader {
    /// Creates a loader with no scripts loaded
    pub fn new(injector: Rc<dyn ScriptInjector>) -> Self {
        Self {
            state: Rc::new(RefCell::new(LoaderState {
                generation: 0,
                scripts: HashMap::new(),
            })),
            injector,
        }
    }

    /// Ensures `url` is loaded into `document`, then calls `on_ready`
    ///
    /// Runs `on_ready` before returning if the script is already loaded.
    /// Otherwise the callback joins the shared pending load and runs exactly
    /// once when it completes. Callbacks registered against a failed load
    /// are dropped without running.
    pub fn load(&self, document: &DocumentContext, url: &str, on_ready: impl FnOnce() + 'static) {
        let key = ScriptKey {
            document: document.clone(),
            url: url.to_string(),
        };

        let (tag, generation) = {
            let mut state = self.state.borrow_mut();
            let generation = state.generation;
            if let Some(entry) = state.scripts.get_mut(&key) {
                match &mut entry.status {
                    ScriptStatus::Pending(waiters) => {
                        waiters.push(Box::new(on_ready));
                        tracing::debug!(url, waiters = waiters.len(), "joined pending script load");
                        return;
                    }
                    ScriptStatus::Failed => {
                        tracing::warn!(url, "script previously failed to load; not retrying");
                        return;
                    }
                    ScriptStatus::Loaded => {}
                }
                drop(state);
                on_ready();
                return;
            }

            let tag = ScriptTag::new(url);
            let waiter: ReadyCallback = Box::new(on_ready);
            state.scripts.insert(
                key.clone(),
                ScriptEntry {
                    tag_id: tag.id.clone(),
                    status: ScriptStatus::Pending(vec![waiter]),
                },
            );
            (tag, generation)
        };

        tracing::debug!(url, document = %document, tag = %tag.id, "injecting script");
        let weak = Rc::downgrade(&self.state);
        self.injector.inject(
            document,
            tag,
            Box::new(move |result| complete(weak, key, generation, result)),
        );
    }

    /// Returns the status of `url` in `document`, if it was ever requested
    pub fn status(&self, document: &DocumentContext, url: &str) -> Option<LoadStatus> {
        let key = ScriptKey {
            document: document.clone(),
            url: url.to_string(),
        };
        self.state
            .borrow()
            .scripts
            .get(&key)
            .map(|entry| match &entry.status {
                ScriptStatus::Pending(waiters) => LoadStatus::Pending {
                    waiters: waiters.len(),
                },
                ScriptStatus::Loaded => LoadStatus::Loaded,
                ScriptStatus::Failed => LoadStatus::Failed,
            })
    }

    /// Id of the script element injected for `url`, if any
    pub fn script_id(&self, document: &DocumentContext, url: &str) -> Option<String> {
        let key = ScriptKey {
            document: document.clone(),
            url: url.to_string(),
        };
        self.state
            .borrow()
            .scripts
            .get(&key)
            .map(|entry| entry.tag_id.clone())
    }

    /// Forgets every script
    ///
    /// Completions of loads started before the reset are ignored, and their
    /// waiters never run.
    pub fn reinitialize(&self) {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        state.scripts.clear();
        tracing::debug!(generation = state.generation, "script loader reinitialized");
    }
}

fn complete(
    state: Weak<RefCell<LoaderState>>,
    key: ScriptKey,
    generation: u64,
    result: Result<(), LoadError>,
) {
    let Some(state) = state.upgrade() else {
        return;
    };

    let waiters = {
        let mut state = state.borrow_mut();
        if state.generation != generation {
            tracing::debug!(url = %key.url, "ignoring completion from before reinitialize");
            return;
        }
        let Some(entry) = state.scripts.get_mut(&key) else {
            return;
        };
        match result {
            Ok(()) => match std::mem::replace(&mut entry.status, ScriptStatus::Loaded) {
                ScriptStatus::Pending(waiters) => waiters,
                // Duplicate completion; restore whatever was there.
                other => {
                    entry.status = other;
                    return;
                }
            },
            Err(err) => {
                tracing::warn!(url = %key.url, error = %err, "script load failed");
                entry.status = ScriptStatus::Failed;
                return;
            }
        }
    };

    tracing::debug!(url = %key.url, waiters = waiters.len(), "script loaded");
    for waiter in waiters {
        waiter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_status_display() {
        assert_eq!(LoadStatus::Loaded.to_string(), "loaded");
        assert_eq!(LoadStatus::Failed.to_string(), "failed");
        assert_eq!(
            LoadStatus::Pending { waiters: 2 }.to_string(),
            "pending (2 waiters)"
        );
    }

    #[test]
    fn test_script_tag_defaults() {
        let tag = ScriptTag::new("/tinymce.js");
        assert!(tag.id.starts_with("tiny-script_"));
        assert_eq!(tag.src, "/tinymce.js");
        assert_eq!(tag.referrer_policy, "origin");
        assert_eq!(tag.script_type, "application/javascript");
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::Failed {
            url: "/x.js".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(err.to_string(), "script /x.js failed to load: 404");
    }
}
