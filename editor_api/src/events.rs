//! Editor events and callback types
//!
//! Every callback type wraps an `Rc` so that identity survives cloning:
//! two handlers are the same handler exactly when they share an allocation.

use crate::editor::EditorRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Events a host may declare handlers for, by name
///
/// The property key for each is the name prefixed with `on`
/// (`KeyUp` is declared as `onKeyUp`). `Init` is absent: completion is
/// delivered through the dedicated init callback.
pub const KNOWN_EVENTS: &[&str] = &[
    "Activate",
    "AddUndo",
    "BeforeAddUndo",
    "BeforeExecCommand",
    "BeforeGetContent",
    "BeforeRenderUI",
    "BeforeSetContent",
    "BeforePaste",
    "Blur",
    "Change",
    "ClearUndos",
    "Click",
    "ContextMenu",
    "Copy",
    "Cut",
    "Dblclick",
    "Deactivate",
    "Dirty",
    "Drag",
    "DragDrop",
    "DragEnd",
    "DragGesture",
    "DragOver",
    "Drop",
    "ExecCommand",
    "Focus",
    "FocusIn",
    "FocusOut",
    "GetContent",
    "Hide",
    "KeyDown",
    "KeyPress",
    "KeyUp",
    "LoadContent",
    "MouseDown",
    "MouseEnter",
    "MouseLeave",
    "MouseMove",
    "MouseOut",
    "MouseOver",
    "MouseUp",
    "NodeChange",
    "ObjectResizeStart",
    "ObjectResized",
    "ObjectSelected",
    "Paste",
    "PostProcess",
    "PostRender",
    "PreProcess",
    "ProgressState",
    "Redo",
    "Remove",
    "Reset",
    "SaveContent",
    "SelectionChange",
    "SetAttrib",
    "SetContent",
    "Show",
    "Submit",
    "Undo",
    "VisualAid",
];

/// Name of an editor event
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventName(String);

impl EventName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Maps a declarative property key (`onKeyUp`) to its event name
    ///
    /// Returns `None` for keys outside [`KNOWN_EVENTS`].
    pub fn from_prop_key(key: &str) -> Option<Self> {
        let name = key.strip_prefix("on")?;
        KNOWN_EVENTS
            .iter()
            .find(|known| **known == name)
            .map(|known| Self((*known).to_string()))
    }

    /// The declarative property key for this event
    pub fn prop_key(&self) -> String {
        format!("on{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An event emitted by an editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorEvent {
    /// Event name as emitted (`init`, `keyup`, ...)
    pub name: String,
    /// Library-specific payload
    #[serde(default)]
    pub data: Value,
}

impl EditorEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Value::Null,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

type EventFn = dyn Fn(&EditorEvent, &EditorRef);

/// Callback attached to editor events
#[derive(Clone)]
pub struct EventHandler(Rc<EventFn>);

impl EventHandler {
    pub fn new(f: impl Fn(&EditorEvent, &EditorRef) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &EditorEvent, editor: &EditorRef) {
        (self.0)(event, editor)
    }

    /// True if both handlers share one allocation
    pub fn same_as(&self, other: &EventHandler) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

type ChangeFn = dyn Fn(&str, &EditorRef);

/// Callback receiving new content after an editor-side change
#[derive(Clone)]
pub struct ContentChangeHandler(Rc<ChangeFn>);

impl ContentChangeHandler {
    pub fn new(f: impl Fn(&str, &EditorRef) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, content: &str, editor: &EditorRef) {
        (self.0)(content, editor)
    }
}

impl fmt::Debug for ContentChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentChangeHandler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

type SetupFn = dyn Fn(&EditorRef);

/// Host-supplied callback run with the editor handle during construction
#[derive(Clone)]
pub struct SetupCallback(Rc<SetupFn>);

impl SetupCallback {
    pub fn new(f: impl Fn(&EditorRef) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, editor: &EditorRef) {
        (self.0)(editor)
    }
}

impl fmt::Debug for SetupCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetupCallback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}
