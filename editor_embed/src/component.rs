//! The embedded editor component
//!
//! Drives one editor through
//! `Unmounted -> AwaitingLibrary -> Configuring -> AwaitingSetup ->
//! AwaitingInitComplete -> Ready -> Disposed`.
//!
//! Every continuation registered with the loader or the editor holds a weak
//! reference to the instance plus a liveness token, so callbacks arriving
//! after unmount are ignored. No `RefCell` borrow of instance state is held
//! across a call into the editor: the editor may re-enter our listeners
//! synchronously.

use crate::config::{build_options, resolve_inline};
use crate::host::create_host_element;
use crate::props::EditorProps;
use crate::sync::UpdatePlan;
use editor_api::{
    DocumentContext, EditorConfig, EditorEvent, EditorRef, ElementRef, EventHandler,
    LibraryRuntime, SetupHook,
};
use handler_binder::BoundHandlers;
use identity::InstanceId;
use lifecycle::{HandleSlot, LivenessSource, LivenessToken, TeardownReason};
use script_loader::{resolve_script_src, ScriptLoader};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Event emitted by the library when an editor finishes initializing
pub const INIT_EVENT: &str = "init";

/// Events after which content is recomputed for change notifications
pub const CONTENT_EVENTS: &str = "change keyup setcontent";

/// Lifecycle phase of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Constructed, not yet mounted
    Unmounted,
    /// Waiting for the library script
    AwaitingLibrary,
    /// Building the editor configuration
    Configuring,
    /// Construction requested; waiting for the setup hook
    AwaitingSetup,
    /// Handle captured; waiting for the `init` event
    AwaitingInitComplete,
    /// Steady state: updates are synchronized
    Ready,
    /// Unmounted for good
    Disposed,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Unmounted => "unmounted",
            LifecyclePhase::AwaitingLibrary => "awaiting-library",
            LifecyclePhase::Configuring => "configuring",
            LifecyclePhase::AwaitingSetup => "awaiting-setup",
            LifecyclePhase::AwaitingInitComplete => "awaiting-init-complete",
            LifecyclePhase::Ready => "ready",
            LifecyclePhase::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

/// Collaborators shared by every component in one host runtime
#[derive(Clone)]
pub struct EmbedEnvironment {
    /// Global lookup for the editor library
    pub runtime: Rc<dyn LibraryRuntime>,
    /// Shared script loader
    pub loader: ScriptLoader,
    /// Document new host elements are created in
    pub document: DocumentContext,
}

impl EmbedEnvironment {
    pub fn new(runtime: Rc<dyn LibraryRuntime>, loader: ScriptLoader) -> Self {
        Self {
            runtime,
            loader,
            document: DocumentContext::default(),
        }
    }

    pub fn with_document(mut self, document: DocumentContext) -> Self {
        self.document = document;
        self
    }
}

struct ComponentState {
    phase: LifecyclePhase,
    props: EditorProps,
    editor: HandleSlot<EditorRef>,
    bound: BoundHandlers,
    mirror: Option<String>,
    /// Whether editor-side edits reach the mirror through a content listener
    tracks_content: bool,
    /// `disabled` as passed to the library at configuration time
    configured_disabled: Option<bool>,
}

struct Instance {
    id: InstanceId,
    element: ElementRef,
    inline: bool,
    runtime: Rc<dyn LibraryRuntime>,
    liveness: LivenessToken,
    state: RefCell<ComponentState>,
}

/// An editor embedded in a declarative component tree
///
/// The host calls [`mount`](Self::mount) once, [`update`](Self::update) on
/// every property change, and [`unmount`](Self::unmount) once. Dropping a
/// component unmounts it.
pub struct EditorComponent {
    instance: Rc<Instance>,
    loader: ScriptLoader,
    liveness: LivenessSource,
}

impl EditorComponent {
    /// Constructs a component and its host element
    ///
    /// Identity and element shape are fixed here for the component's
    /// lifetime.
    pub fn new(props: EditorProps, env: EmbedEnvironment) -> Self {
        let id = InstanceId::resolve(props.id.as_deref());
        let inline = resolve_inline(&props);
        let element = Rc::new(create_host_element(&id, &props, inline, env.document));
        let liveness = LivenessSource::new();

        tracing::debug!(instance = %id, inline, "component constructed");

        let instance = Rc::new(Instance {
            id,
            element,
            inline,
            runtime: env.runtime,
            liveness: liveness.token(),
            state: RefCell::new(ComponentState {
                phase: LifecyclePhase::Unmounted,
                props,
                editor: HandleSlot::new(),
                bound: BoundHandlers::new(),
                mirror: None,
                tracks_content: false,
                configured_disabled: None,
            }),
        });

        Self {
            instance,
            loader: env.loader,
            liveness,
        }
    }

    pub fn id(&self) -> &InstanceId {
        &self.instance.id
    }

    /// The element the editor attaches to
    pub fn host_element(&self) -> &ElementRef {
        &self.instance.element
    }

    pub fn is_inline(&self) -> bool {
        self.instance.inline
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.instance.state.borrow().phase
    }

    /// The editor handle, once the setup hook has fired
    pub fn editor(&self) -> Option<EditorRef> {
        self.instance.state.borrow().editor.get()
    }

    /// Last content the controller wrote into or read from the editor
    pub fn content_mirror(&self) -> Option<String> {
        self.instance.state.borrow().mirror.clone()
    }

    /// Number of declared handlers currently attached
    pub fn bound_handler_count(&self) -> usize {
        self.instance.state.borrow().bound.len()
    }

    /// Latest declared props
    pub fn props(&self) -> EditorProps {
        self.instance.state.borrow().props.clone()
    }

    /// URL the library script is loaded from
    pub fn script_src(&self) -> String {
        let state = self.instance.state.borrow();
        let props = &state.props;
        resolve_script_src(
            props.tinymce_script_src.as_deref(),
            props.api_key.as_deref(),
            &props.cloud_channel,
        )
    }

    /// Starts acquisition and initialization
    ///
    /// Proceeds synchronously to construction when the library is already
    /// present; otherwise waits on the shared script load.
    pub fn mount(&self) {
        let instance = &self.instance;
        {
            let mut state = instance.state.borrow_mut();
            if state.phase != LifecyclePhase::Unmounted {
                tracing::warn!(instance = %instance.id, phase = %state.phase, "mount ignored");
                return;
            }
            state.phase = LifecyclePhase::AwaitingLibrary;
        }
        tracing::info!(instance = %instance.id, "mounting editor");

        if instance.runtime.is_loaded() {
            instance.initialise();
            return;
        }

        let url = self.script_src();
        let document = instance.element.owner_document().clone();
        tracing::debug!(instance = %instance.id, url = url.as_str(), "waiting for editor library");
        let weak = Rc::downgrade(instance);
        self.loader.load(&document, &url, move || {
            if let Some(instance) = upgrade_live(&weak, "script loaded") {
                instance.initialise();
            }
        });
    }

    /// Delivers a new set of declared props
    ///
    /// Before the editor is ready the props are only recorded; the latest
    /// ones are applied when initialization completes.
    pub fn update(&self, props: EditorProps) {
        let instance = &self.instance;
        let (previous_disabled, editor) = {
            let mut state = instance.state.borrow_mut();
            let previous_disabled = state.props.disabled;
            state.props = props;
            if state.phase != LifecyclePhase::Ready {
                tracing::debug!(instance = %instance.id, phase = %state.phase, "deferring update");
                return;
            }
            (previous_disabled, state.editor.get())
        };

        let Some(editor) = editor else {
            return;
        };
        if !editor.is_initialized() {
            return;
        }
        instance.synchronize(&editor, previous_disabled);
    }

    /// Tears the component down
    ///
    /// Disposes the editor if one was constructed. Pending continuations
    /// become no-ops; a shared script load in flight is left running for
    /// other components.
    pub fn unmount(&self) {
        self.dispose(TeardownReason::Unmounted);
    }

    fn dispose(&self, reason: TeardownReason) {
        let instance = &self.instance;
        let (phase, editor, mut bound) = {
            let mut state = instance.state.borrow_mut();
            if state.phase == LifecyclePhase::Disposed {
                return;
            }
            let phase = state.phase;
            state.phase = LifecyclePhase::Disposed;
            (phase, state.editor.take(), std::mem::take(&mut state.bound))
        };
        self.liveness.tear_down(reason.clone());

        match editor {
            Some(editor) => {
                bound.detach_all(editor.as_ref());
                if let Some(library) = instance.runtime.library() {
                    library.remove(&editor);
                }
                tracing::info!(instance = %instance.id, %phase, %reason, "editor removed");
            }
            None => {
                tracing::info!(
                    instance = %instance.id,
                    %phase,
                    %reason,
                    "torn down before an editor existed"
                );
            }
        }
    }
}

impl Drop for EditorComponent {
    fn drop(&mut self) {
        self.dispose(TeardownReason::Dropped);
    }
}

fn upgrade_live(weak: &Weak<Instance>, what: &str) -> Option<Rc<Instance>> {
    let instance = weak.upgrade()?;
    if let Err(err) = instance.liveness.ensure_live() {
        tracing::warn!(instance = %instance.id, callback = what, %err, "late callback ignored");
        return None;
    }
    Some(instance)
}

impl Instance {
    fn set_phase(&self, phase: LifecyclePhase) {
        self.state.borrow_mut().phase = phase;
        tracing::debug!(instance = %self.id, %phase, "phase changed");
    }

    /// Builds the configuration and asks the library to construct the editor
    fn initialise(self: &Rc<Self>) {
        let Some(library) = self.runtime.library() else {
            tracing::warn!(instance = %self.id, "editor library missing after load");
            return;
        };

        let options = {
            let mut state = self.state.borrow_mut();
            state.phase = LifecyclePhase::Configuring;
            state.configured_disabled = state.props.disabled;
            build_options(&state.props, self.inline)
        };
        tracing::debug!(instance = %self.id, phase = %LifecyclePhase::Configuring, "phase changed");

        if self.element.is_surrogate() {
            self.element.restore_visibility();
        }

        let weak = Rc::downgrade(self);
        let setup = SetupHook::new(move |editor| {
            if let Some(instance) = upgrade_live(&weak, "setup") {
                instance.on_setup(editor);
            }
        });

        self.set_phase(LifecyclePhase::AwaitingSetup);
        library.init(EditorConfig {
            options,
            target: self.element.clone(),
            setup,
        });
    }

    /// Captures the handle and waits for initialization to complete
    fn on_setup(self: &Rc<Self>, editor: EditorRef) {
        let host_setup = {
            let mut state = self.state.borrow_mut();
            if let Err(err) = state.editor.fill(editor.clone()) {
                tracing::warn!(instance = %self.id, %err, "setup hook rejected");
                return;
            }
            state.phase = LifecyclePhase::AwaitingInitComplete;
            state.props.init_setup.clone()
        };
        tracing::debug!(
            instance = %self.id,
            phase = %LifecyclePhase::AwaitingInitComplete,
            "editor handle captured"
        );

        let weak = Rc::downgrade(self);
        editor.on(
            INIT_EVENT,
            EventHandler::new(move |event, editor| {
                if let Some(instance) = upgrade_live(&weak, "init") {
                    instance.on_init_complete(event, editor);
                }
            }),
        );

        if let Some(setup) = host_setup {
            setup.call(&editor);
        }
    }

    /// Seeds content and wires callbacks once the editor is usable
    fn on_init_complete(self: &Rc<Self>, event: &EditorEvent, editor: &EditorRef) {
        let (seed, wants_changes, on_init) = {
            let mut state = self.state.borrow_mut();
            if state.phase != LifecyclePhase::AwaitingInitComplete {
                tracing::debug!(instance = %self.id, phase = %state.phase, "duplicate init ignored");
                return;
            }
            let seed = state.props.seed_content();
            state.mirror = Some(seed.clone());
            (
                seed,
                state.props.on_editor_change.is_some(),
                state.props.on_init.clone(),
            )
        };
        editor.set_content(&seed);

        if wants_changes {
            let weak = Rc::downgrade(self);
            editor.on(
                CONTENT_EVENTS,
                EventHandler::new(move |_, editor| {
                    if let Some(instance) = upgrade_live(&weak, "content change") {
                        instance.on_content_event(editor);
                    }
                }),
            );
            self.state.borrow_mut().tracks_content = true;
        }

        if let Some(on_init) = on_init {
            on_init.call(event, editor);
        }

        let previous_disabled = {
            let mut state = self.state.borrow_mut();
            if state.phase == LifecyclePhase::Disposed {
                return;
            }
            state.phase = LifecyclePhase::Ready;
            Some(state.configured_disabled.unwrap_or(false))
        };
        tracing::debug!(instance = %self.id, phase = %LifecyclePhase::Ready, "editor ready");

        self.synchronize(editor, previous_disabled);
    }

    /// Recomputes content after an editor-side event and notifies on change
    fn on_content_event(&self, editor: &EditorRef) {
        let format = self.state.borrow().props.output_format();
        let content = editor.get_content(format);

        let handler = {
            let mut state = self.state.borrow_mut();
            if state.mirror.as_deref() == Some(content.as_str()) {
                return;
            }
            state.mirror = Some(content.clone());
            state.props.on_editor_change.clone()
        };

        if let Some(handler) = handler {
            handler.call(&content, editor);
        }
    }

    /// Applies the latest declared props to a ready editor
    ///
    /// Without a content listener the mirror cannot see editor-side edits,
    /// so it is refreshed from the editor before comparing. An empty mirror
    /// is refreshed as well.
    fn synchronize(&self, editor: &EditorRef, previous_disabled: Option<bool>) {
        let (handlers, mut bound) = {
            let mut state = self.state.borrow_mut();
            (
                state.props.handlers.clone(),
                std::mem::take(&mut state.bound),
            )
        };
        bound.reconcile(editor.as_ref(), &handlers);
        self.state.borrow_mut().bound = bound;

        let (stale, format) = {
            let state = self.state.borrow();
            let stale =
                !state.tracks_content || state.mirror.as_deref().map_or(true, str::is_empty);
            (stale, state.props.output_format())
        };
        if stale {
            let content = editor.get_content(format);
            self.state.borrow_mut().mirror = Some(content);
        }

        let plan = {
            let mut state = self.state.borrow_mut();
            let plan = UpdatePlan::compute(previous_disabled, &state.props, state.mirror.as_deref());
            if let Some(content) = &plan.content_write {
                state.mirror = Some(content.clone());
            }
            plan
        };

        if let Some(content) = &plan.content_write {
            tracing::debug!(instance = %self.id, "pushing declared value into editor");
            editor.set_content(content);
        }
        if let Some(mode) = plan.mode {
            tracing::debug!(instance = %self.id, %mode, "switching editor mode");
            editor.set_mode(mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_editor::{SimRuntime, SimScriptInjector};

    fn environment(runtime: SimRuntime) -> (EmbedEnvironment, Rc<SimRuntime>, Rc<SimScriptInjector>) {
        let runtime = Rc::new(runtime);
        let injector = Rc::new(SimScriptInjector::new().with_runtime(runtime.clone()));
        let loader = ScriptLoader::new(injector.clone());
        (
            EmbedEnvironment::new(runtime.clone(), loader),
            runtime,
            injector,
        )
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(LifecyclePhase::AwaitingLibrary.to_string(), "awaiting-library");
        assert_eq!(LifecyclePhase::Ready.to_string(), "ready");
    }

    #[test]
    fn test_loaded_library_skips_script() {
        let (env, runtime, injector) = environment(SimRuntime::loaded());
        let component = EditorComponent::new(EditorProps::new(), env);

        component.mount();

        assert!(injector.injected().is_empty());
        assert_eq!(runtime.sim_library().init_count(), 1);
        assert_eq!(component.phase(), LifecyclePhase::AwaitingInitComplete);
    }

    #[test]
    fn test_double_mount_ignored() {
        let (env, runtime, _) = environment(SimRuntime::loaded());
        let component = EditorComponent::new(EditorProps::new(), env);

        component.mount();
        component.mount();

        assert_eq!(runtime.sim_library().init_count(), 1);
    }

    #[test]
    fn test_script_src_from_props() {
        let (env, _, _) = environment(SimRuntime::unloaded());
        let component = EditorComponent::new(
            EditorProps::new().with_api_key("key").with_cloud_channel("5-stable"),
            env,
        );
        assert_eq!(
            component.script_src(),
            "https://cdn.tiny.cloud/1/key/tinymce/5-stable/tinymce.min.js"
        );
    }

    #[test]
    fn test_drop_removes_editor() {
        let (env, runtime, _) = environment(SimRuntime::loaded());
        let component = EditorComponent::new(EditorProps::new().with_id("dropped"), env);
        component.mount();
        drop(component);

        assert_eq!(runtime.sim_library().removed(), vec!["dropped".to_string()]);
    }

    #[test]
    fn test_mirror_unset_before_ready() {
        let (env, _, _) = environment(SimRuntime::loaded());
        let component = EditorComponent::new(EditorProps::new().with_value("x"), env);
        component.mount();
        assert_eq!(component.content_mirror(), None);
        assert_eq!(component.bound_handler_count(), 0);
    }
}
