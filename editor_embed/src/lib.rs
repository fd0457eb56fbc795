//! # Editor Embed
//!
//! Embeds an externally loaded, imperative rich-text editor in a
//! declarative component tree and keeps the two consistent for the
//! editor's whole lifetime.
//!
//! ## Philosophy
//!
//! - **Declared state wins**: The host's `value` and `disabled` props are
//!   pushed into the editor whenever they diverge from what was last synced
//! - **One editor per component**: The handle is captured once and disposed once
//! - **No echoes**: Content the controller pushed in is never reported back
//! - **Silent degradation**: Failures leave features inert; nothing is thrown
//!   at the host
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - The editor (document model, undo, plugins)
//! - A script fetcher or cache
//! - A props validator
//!
//! ## Example
//!
//! ```
//! use editor_embed::{EditorComponent, EditorProps, EmbedEnvironment, LifecyclePhase};
//! use script_loader::ScriptLoader;
//! use sim_editor::{SimRuntime, SimScriptInjector};
//! use std::rc::Rc;
//!
//! let runtime = Rc::new(SimRuntime::loaded());
//! let loader = ScriptLoader::new(Rc::new(SimScriptInjector::new()));
//! let environment = EmbedEnvironment::new(runtime.clone(), loader);
//!
//! let component = EditorComponent::new(
//!     EditorProps::new().with_value("<p>hello</p>").with_plugins("lists link"),
//!     environment,
//! );
//! component.mount();
//! if let Some(editor) = runtime.sim_library().last_editor() {
//!     editor.complete_init();
//! }
//! assert_eq!(component.phase(), LifecyclePhase::Ready);
//!
//! // On every re-render:
//! component.update(EditorProps::new().with_value("<p>world</p>"));
//! assert_eq!(component.content_mirror().as_deref(), Some("<p>world</p>"));
//!
//! component.unmount();
//! ```

pub mod component;
pub mod config;
pub mod host;
pub mod props;
pub mod sync;

pub use component::{EditorComponent, EmbedEnvironment, LifecyclePhase, CONTENT_EVENTS, INIT_EVENT};
pub use config::{build_options, merge_plugins, resolve_inline, resolve_toolbar};
pub use host::create_host_element;
pub use props::{EditorProps, PropsError, StringOrList, DEFAULT_TAG_NAME};
pub use sync::UpdatePlan;
