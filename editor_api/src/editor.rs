//! Editor handle contract

use crate::events::EventHandler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Shared reference to a constructed editor
pub type EditorRef = Rc<dyn Editor>;

/// Editing mode of an editor instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Content is editable
    Design,
    /// Content is read-only
    Readonly,
}

impl EditorMode {
    /// Maps a `disabled` flag to a mode
    pub fn from_disabled(disabled: bool) -> Self {
        if disabled {
            EditorMode::Readonly
        } else {
            EditorMode::Design
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Design => "design",
            EditorMode::Readonly => "readonly",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialization format used when reading content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Html,
    Text,
}

impl ContentFormat {
    /// Parses `"html"` or `"text"`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "html" => Some(ContentFormat::Html),
            "text" => Some(ContentFormat::Text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Html => "html",
            ContentFormat::Text => "text",
        }
    }
}

/// A constructed editor instance
///
/// All methods take `&self`: the library owns the editor's internal state
/// and may re-enter registered handlers while a call is in progress (for
/// example `set_content` emits `SetContent` synchronously). Callers must not
/// hold borrows of their own state across these calls.
pub trait Editor {
    /// Id of the element this editor is attached to
    fn id(&self) -> &str;

    /// True once the library has emitted the initialization-complete event
    fn is_initialized(&self) -> bool;

    /// Replaces the document content
    fn set_content(&self, content: &str);

    /// Serializes the document content
    fn get_content(&self, format: ContentFormat) -> String;

    /// Switches between editable and read-only
    fn set_mode(&self, mode: EditorMode);

    /// Attaches a handler to one or more space-separated event names
    fn on(&self, events: &str, handler: EventHandler);

    /// Detaches a previously attached handler
    fn off(&self, events: &str, handler: &EventHandler);
}
