//! Shared harness for the embed integration tests

#![allow(dead_code)]

use editor_embed::{EditorComponent, EditorProps, EmbedEnvironment};
use script_loader::ScriptLoader;
use sim_editor::{SimEditor, SimLibrary, SimRuntime, SimScriptInjector};
use std::rc::Rc;

pub struct Harness {
    pub runtime: Rc<SimRuntime>,
    pub injector: Rc<SimScriptInjector>,
    pub env: EmbedEnvironment,
}

impl Harness {
    /// Library already present in the runtime
    pub fn loaded() -> Self {
        Self::with_runtime(SimRuntime::loaded())
    }

    /// Library arrives only when a test completes the script load
    pub fn unloaded() -> Self {
        Self::with_runtime(SimRuntime::unloaded())
    }

    fn with_runtime(runtime: SimRuntime) -> Self {
        let runtime = Rc::new(runtime);
        let injector = Rc::new(SimScriptInjector::new().with_runtime(runtime.clone()));
        let loader = ScriptLoader::new(injector.clone());
        let env = EmbedEnvironment::new(runtime.clone(), loader);
        Self {
            runtime,
            injector,
            env,
        }
    }

    pub fn library(&self) -> Rc<SimLibrary> {
        self.runtime.sim_library()
    }

    pub fn component(&self, props: EditorProps) -> EditorComponent {
        EditorComponent::new(props, self.env.clone())
    }

    /// Mounts a component and completes editor initialization
    pub fn ready(&self, props: EditorProps) -> (EditorComponent, Rc<SimEditor>) {
        let component = self.component(props);
        component.mount();
        let editor = self
            .library()
            .last_editor()
            .expect("editor constructed on mount");
        editor.complete_init();
        (component, editor)
    }
}
