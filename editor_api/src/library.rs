//! Editor library contract

use crate::editor::EditorRef;
use crate::element::ElementRef;
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// Single-shot hook the library calls while constructing an editor
///
/// Consuming `self` makes the exactly-once contract part of the type.
pub struct SetupHook(Box<dyn FnOnce(EditorRef)>);

impl SetupHook {
    pub fn new(f: impl FnOnce(EditorRef) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn invoke(self, editor: EditorRef) {
        (self.0)(editor)
    }
}

impl fmt::Debug for SetupHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SetupHook")
    }
}

/// Everything the library needs to construct one editor
#[derive(Debug)]
pub struct EditorConfig {
    /// Merged option object (host `init` plus controller overrides)
    pub options: Map<String, Value>,
    /// Element the editor attaches to
    pub target: ElementRef,
    /// Handle capture hook
    pub setup: SetupHook,
}

impl EditorConfig {
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Plugin names from the merged options
    pub fn plugins(&self) -> Vec<String> {
        match self.options.get("plugins") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A loaded editor library
pub trait EditorLibrary {
    /// Constructs an editor
    ///
    /// Implementations invoke `config.setup` synchronously, before
    /// returning, and emit `init` on the new editor later.
    fn init(&self, config: EditorConfig);

    /// Disposes an editor
    fn remove(&self, editor: &EditorRef);
}

/// Global lookup for the editor library
///
/// `library` returns `None` until the library's script has been evaluated
/// in this runtime.
pub trait LibraryRuntime {
    fn library(&self) -> Option<Rc<dyn EditorLibrary>>;

    fn is_loaded(&self) -> bool {
        self.library().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DocumentContext, HostElement};
    use serde_json::json;
    use std::cell::Cell;

    fn config_with(options: Value) -> EditorConfig {
        EditorConfig {
            options: options.as_object().cloned().unwrap_or_default(),
            target: Rc::new(HostElement::inline_container(
                "t",
                "div",
                DocumentContext::default(),
            )),
            setup: SetupHook::new(|_| {}),
        }
    }

    #[test]
    fn test_plugins_accessor() {
        let config = config_with(json!({"plugins": ["lists", "link", 3]}));
        assert_eq!(config.plugins(), vec!["lists", "link"]);
    }

    #[test]
    fn test_plugins_missing() {
        let config = config_with(json!({"height": 300}));
        assert!(config.plugins().is_empty());
        assert_eq!(config.option("height"), Some(&json!(300)));
    }

    #[test]
    fn test_setup_hook_invoked_once() {
        struct Null;
        impl crate::Editor for Null {
            fn id(&self) -> &str {
                "null"
            }
            fn is_initialized(&self) -> bool {
                false
            }
            fn set_content(&self, _: &str) {}
            fn get_content(&self, _: crate::ContentFormat) -> String {
                String::new()
            }
            fn set_mode(&self, _: crate::EditorMode) {}
            fn on(&self, _: &str, _: crate::EventHandler) {}
            fn off(&self, _: &str, _: &crate::EventHandler) {}
        }

        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let hook = SetupHook::new(move |editor| {
            assert_eq!(editor.id(), "null");
            seen.set(seen.get() + 1);
        });
        hook.invoke(Rc::new(Null));
        assert_eq!(calls.get(), 1);
    }
}
