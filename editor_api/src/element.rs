//! Host elements
//!
//! An editor attaches to exactly one host element. The element's shape is
//! chosen when the hosting component is constructed and never changes.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared reference to a host element
pub type ElementRef = Rc<HostElement>;

/// Identifies the document a host element lives in
///
/// Script injection is scoped to a document, so two components rendered
/// into different documents load the library independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentContext(String);

impl DocumentContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self("document".to_string())
    }
}

impl fmt::Display for DocumentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two supported host element shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementShape {
    /// A container element the editor renders into directly
    InlineContainer { tag: String },
    /// A hidden text field the editor replaces with its own frame
    HiddenSurrogate { name: Option<String> },
}

/// A node an editor attaches to
#[derive(Debug)]
pub struct HostElement {
    id: String,
    shape: ElementShape,
    document: DocumentContext,
    visible: Cell<bool>,
}

impl HostElement {
    /// Creates an inline container with the given tag
    pub fn inline_container(
        id: impl Into<String>,
        tag: impl Into<String>,
        document: DocumentContext,
    ) -> Self {
        Self {
            id: id.into(),
            shape: ElementShape::InlineContainer { tag: tag.into() },
            document,
            visible: Cell::new(true),
        }
    }

    /// Creates a hidden surrogate text field
    ///
    /// Surrogates start hidden so the raw field never flashes before the
    /// editor replaces it.
    pub fn hidden_surrogate(
        id: impl Into<String>,
        name: Option<String>,
        document: DocumentContext,
    ) -> Self {
        Self {
            id: id.into(),
            shape: ElementShape::HiddenSurrogate { name },
            document,
            visible: Cell::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> &ElementShape {
        &self.shape
    }

    /// The document that owns this element
    pub fn owner_document(&self) -> &DocumentContext {
        &self.document
    }

    /// Tag name as it would appear in the DOM
    pub fn tag_name(&self) -> &str {
        match &self.shape {
            ElementShape::InlineContainer { tag } => tag,
            ElementShape::HiddenSurrogate { .. } => "textarea",
        }
    }

    /// `name` attribute of a surrogate
    pub fn name(&self) -> Option<&str> {
        match &self.shape {
            ElementShape::HiddenSurrogate { name } => name.as_deref(),
            ElementShape::InlineContainer { .. } => None,
        }
    }

    pub fn is_surrogate(&self) -> bool {
        matches!(self.shape, ElementShape::HiddenSurrogate { .. })
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Clears the hidden style
    pub fn restore_visibility(&self) {
        self.visible.set(true);
    }
}
