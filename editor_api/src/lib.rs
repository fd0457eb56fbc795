//! # Editor API
//!
//! The capability contract between the embedding controller and an
//! externally loaded, imperative rich-text editor library.
//!
//! ## Philosophy
//!
//! - **Contract, not implementation**: This crate names what the controller
//!   needs from the library and nothing more
//! - **Handles are shared, not owned**: The library owns editor internals;
//!   callers hold reference-counted handles
//! - **Callback identity is explicit**: Handlers compare by allocation, so
//!   detach removes exactly what attach added
//!
//! ## Core Concepts
//!
//! - `Editor` / `EditorRef`: a constructed editor instance
//! - `EditorLibrary`: constructs and disposes editors
//! - `LibraryRuntime`: the global presence lookup for the library
//! - `EditorConfig`: merged options, target element, and setup hook
//! - `HostElement`: the node an editor attaches to

pub mod editor;
pub mod element;
pub mod events;
pub mod library;

pub use editor::{ContentFormat, Editor, EditorMode, EditorRef};
pub use element::{DocumentContext, ElementRef, ElementShape, HostElement};
pub use events::{
    ContentChangeHandler, EditorEvent, EventHandler, EventName, SetupCallback, KNOWN_EVENTS,
};
pub use library::{EditorConfig, EditorLibrary, LibraryRuntime, SetupHook};
