//! # Simulated Editor Library
//!
//! An in-process implementation of the editor library contract, the
//! library's global presence lookup, and script injection.
//!
//! ## Purpose
//!
//! - Runs under `cargo test`, no browser or network
//! - Deterministic: script loads and editor initialization complete only
//!   when a test says so
//! - Inspectable: every imperative call an editor receives is recorded
//!
//! This is not a mock of a particular test's expectations. It behaves like
//! the real library where the controller can observe it: setup runs
//! synchronously inside `init`, `init` is emitted later, and `set_content`
//! emits `SetContent` before returning.

pub mod editor;
pub mod library;
pub mod loader;

pub use editor::{EditorCall, SimEditor};
pub use library::{InitRecord, SimLibrary, SimRuntime};
pub use loader::SimScriptInjector;
