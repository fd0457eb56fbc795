//! Simulated editor instance

use editor_api::{ContentFormat, Editor, EditorEvent, EditorMode, EditorRef, EventHandler};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// An imperative call received by a simulated editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCall {
    SetContent(String),
    GetContent(ContentFormat),
    SetMode(EditorMode),
    On(String),
    Off(String),
}

/// A simulated editor
///
/// Event names are matched case-insensitively, like the real library.
pub struct SimEditor {
    id: String,
    this: Weak<SimEditor>,
    initialized: Cell<bool>,
    removed: Cell<bool>,
    content: RefCell<String>,
    mode: Cell<EditorMode>,
    listeners: RefCell<Vec<(String, EventHandler)>>,
    calls: RefCell<Vec<EditorCall>>,
}

impl SimEditor {
    /// Creates an uninitialized editor
    pub fn new(id: impl Into<String>, readonly: bool) -> Rc<Self> {
        let id = id.into();
        Rc::new_cyclic(|this| Self {
            id,
            this: this.clone(),
            initialized: Cell::new(false),
            removed: Cell::new(false),
            content: RefCell::new(String::new()),
            mode: Cell::new(EditorMode::from_disabled(readonly)),
            listeners: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        })
    }

    fn as_editor_ref(&self) -> Option<EditorRef> {
        self.this.upgrade().map(|rc| rc as EditorRef)
    }

    /// Emits an event to every matching listener
    pub fn fire(&self, event: EditorEvent) {
        let Some(editor) = self.as_editor_ref() else {
            return;
        };
        let name = event.name.to_ascii_lowercase();
        let matching: Vec<EventHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(event_name, _)| *event_name == name)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in matching {
            handler.call(&event, &editor);
        }
    }

    /// Marks the editor initialized and emits `init`
    pub fn complete_init(&self) {
        if self.initialized.get() || self.removed.get() {
            return;
        }
        self.initialized.set(true);
        self.fire(EditorEvent::new("init"));
    }

    /// Simulates the user replacing the content and releasing a key
    pub fn type_text(&self, content: &str) {
        *self.content.borrow_mut() = content.to_string();
        self.fire(EditorEvent::new("keyup"));
    }

    /// Simulates an edit that emits `change`
    pub fn change_text(&self, content: &str) {
        *self.content.borrow_mut() = content.to_string();
        self.fire(EditorEvent::new("change"));
    }

    pub(crate) fn mark_removed(&self) {
        self.removed.set(true);
        self.listeners.borrow_mut().clear();
    }

    /// Content without recording a call
    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode.get()
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }

    /// Number of listeners attached under `event`
    pub fn listener_count(&self, event: &str) -> usize {
        let name = event.to_ascii_lowercase();
        self.listeners
            .borrow()
            .iter()
            .filter(|(event_name, _)| *event_name == name)
            .count()
    }

    /// True if `handler` is attached under `event`
    pub fn has_listener(&self, event: &str, handler: &EventHandler) -> bool {
        let name = event.to_ascii_lowercase();
        self.listeners
            .borrow()
            .iter()
            .any(|(event_name, h)| *event_name == name && h.same_as(handler))
    }

    /// Every recorded call, oldest first
    pub fn calls(&self) -> Vec<EditorCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Recorded `set_content` arguments
    pub fn content_writes(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                EditorCall::SetContent(content) => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    /// Recorded `set_mode` arguments
    pub fn mode_changes(&self) -> Vec<EditorMode> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                EditorCall::SetMode(mode) => Some(*mode),
                _ => None,
            })
            .collect()
    }

    /// Recorded `on`/`off` calls
    pub fn binding_calls(&self) -> Vec<EditorCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, EditorCall::On(_) | EditorCall::Off(_)))
            .cloned()
            .collect()
    }

    fn record(&self, call: EditorCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

impl Editor for SimEditor {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    fn set_content(&self, content: &str) {
        self.record(EditorCall::SetContent(content.to_string()));
        *self.content.borrow_mut() = content.to_string();
        self.fire(EditorEvent::new("SetContent"));
    }

    fn get_content(&self, format: ContentFormat) -> String {
        self.record(EditorCall::GetContent(format));
        let content = self.content.borrow();
        match format {
            ContentFormat::Html => content.clone(),
            ContentFormat::Text => strip_tags(&content),
        }
    }

    fn set_mode(&self, mode: EditorMode) {
        self.record(EditorCall::SetMode(mode));
        self.mode.set(mode);
    }

    fn on(&self, events: &str, handler: EventHandler) {
        for name in events.split_whitespace() {
            self.record(EditorCall::On(name.to_string()));
            self.listeners
                .borrow_mut()
                .push((name.to_ascii_lowercase(), handler.clone()));
        }
    }

    fn off(&self, events: &str, handler: &EventHandler) {
        for name in events.split_whitespace() {
            self.record(EditorCall::Off(name.to_string()));
            let lowered = name.to_ascii_lowercase();
            self.listeners
                .borrow_mut()
                .retain(|(event_name, h)| !(*event_name == lowered && h.same_as(handler)));
        }
    }
}
