//! Simulated editor library and runtime

use crate::editor::SimEditor;
use editor_api::{Editor, EditorConfig, EditorLibrary, EditorRef, LibraryRuntime};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What the library observed when `init` was called
#[derive(Debug, Clone, PartialEq)]
pub struct InitRecord {
    /// Merged options as received
    pub options: Map<String, Value>,
    /// Plugin names the library would activate
    pub plugins: Vec<String>,
    /// Id of the target element
    pub target_id: String,
    /// Tag name of the target element
    pub target_tag: String,
    /// Whether the target element was visible at construction
    pub target_visible: bool,
}

impl InitRecord {
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// Simulated editor library
///
/// `init` constructs a [`SimEditor`] and runs the setup hook before
/// returning. Initialization completes only when a test calls
/// [`SimLibrary::complete_init_all`] or [`SimEditor::complete_init`].
#[derive(Default)]
pub struct SimLibrary {
    editors: RefCell<Vec<Rc<SimEditor>>>,
    inits: RefCell<Vec<InitRecord>>,
    removed: RefCell<Vec<String>>,
    skip_setup: Cell<bool>,
}

impl SimLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes later `init` calls construct nothing and never run setup
    ///
    /// Models a library stalled before the setup hook.
    pub fn stall_setup(&self) {
        self.skip_setup.set(true);
    }

    /// Editors constructed so far
    pub fn editors(&self) -> Vec<Rc<SimEditor>> {
        self.editors.borrow().clone()
    }

    /// Most recently constructed editor
    pub fn last_editor(&self) -> Option<Rc<SimEditor>> {
        self.editors.borrow().last().cloned()
    }

    /// Every `init` call, oldest first
    pub fn inits(&self) -> Vec<InitRecord> {
        self.inits.borrow().clone()
    }

    pub fn init_count(&self) -> usize {
        self.inits.borrow().len()
    }

    /// Ids of editors passed to `remove`
    pub fn removed(&self) -> Vec<String> {
        self.removed.borrow().clone()
    }

    /// Emits `init` on every editor still waiting for it
    pub fn complete_init_all(&self) {
        for editor in self.editors() {
            editor.complete_init();
        }
    }
}

impl EditorLibrary for SimLibrary {
    fn init(&self, config: EditorConfig) {
        let readonly = config
            .option("readonly")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.inits.borrow_mut().push(InitRecord {
            options: config.options.clone(),
            plugins: config.plugins(),
            target_id: config.target.id().to_string(),
            target_tag: config.target.tag_name().to_string(),
            target_visible: config.target.is_visible(),
        });
        if self.skip_setup.get() {
            return;
        }

        let editor = SimEditor::new(config.target.id(), readonly);
        self.editors.borrow_mut().push(editor.clone());
        config.setup.invoke(editor);
    }

    fn remove(&self, editor: &EditorRef) {
        let id = editor.id().to_string();
        if let Some(sim) = self.editors.borrow().iter().find(|e| e.id() == id) {
            sim.mark_removed();
        }
        self.removed.borrow_mut().push(id);
    }
}

/// Global presence lookup backed by a [`SimLibrary`]
///
/// The library is invisible until marked loaded, which is what a completed
/// script injection does.
pub struct SimRuntime {
    library: Rc<SimLibrary>,
    loaded: Cell<bool>,
}

impl SimRuntime {
    /// A runtime whose library script has not been evaluated
    pub fn unloaded() -> Self {
        Self {
            library: Rc::new(SimLibrary::new()),
            loaded: Cell::new(false),
        }
    }

    /// A runtime with the library already present
    pub fn loaded() -> Self {
        let runtime = Self::unloaded();
        runtime.mark_loaded();
        runtime
    }

    pub fn mark_loaded(&self) {
        self.loaded.set(true);
    }

    /// The library, whether or not it is visible yet
    pub fn sim_library(&self) -> Rc<SimLibrary> {
        self.library.clone()
    }
}

impl LibraryRuntime for SimRuntime {
    fn library(&self) -> Option<Rc<dyn EditorLibrary>> {
        if self.loaded.get() {
            Some(self.library.clone() as Rc<dyn EditorLibrary>)
        } else {
            None
        }
    }
}
