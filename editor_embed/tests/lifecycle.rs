//! Mount, initialization and teardown of embedded editors

mod common;

use common::Harness;
use editor_api::{
    DocumentContext, EditorEvent, EditorMode, EditorRef, EventHandler, SetupCallback,
};
use editor_embed::{EditorComponent, EditorProps, LifecyclePhase, StringOrList};
use sim_editor::EditorCall;
use serde_json::json;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[test]
fn test_value_seeds_surrogate_editor() {
    let harness = Harness::loaded();
    let (component, editor) = harness.ready(EditorProps::new().with_value("hello"));

    let element = component.host_element();
    assert!(element.is_surrogate());
    assert_eq!(element.tag_name(), "textarea");
    assert_eq!(editor.content(), "hello");
    assert_eq!(component.content_mirror().as_deref(), Some("hello"));
    assert_eq!(component.phase(), LifecyclePhase::Ready);
    assert_eq!(editor.content_writes(), vec!["hello".to_string()]);
}

#[test]
fn test_initial_value_used_without_value() {
    let harness = Harness::loaded();
    let (_component, editor) = harness.ready(EditorProps::new().with_initial_value("<p>seed</p>"));
    assert_eq!(editor.content(), "<p>seed</p>");
}

#[test]
fn test_surrogate_visible_before_construction() {
    let harness = Harness::loaded();
    let component = harness.component(EditorProps::new().with_textarea_name("body"));
    assert!(!component.host_element().is_visible());

    component.mount();

    let record = &harness.library().inits()[0];
    assert!(record.target_visible);
    assert_eq!(record.target_tag, "textarea");
    assert_eq!(component.host_element().name(), Some("body"));
}

#[test]
fn test_inline_container_from_init() {
    let harness = Harness::loaded();
    let mut init = serde_json::Map::new();
    init.insert("inline".to_string(), json!(true));
    let component = harness.component(EditorProps::new().with_init(init).with_tag_name("section"));

    component.mount();

    assert!(component.is_inline());
    let record = &harness.library().inits()[0];
    assert_eq!(record.target_tag, "section");
    assert_eq!(record.option("inline"), Some(&json!(true)));
}

#[test]
fn test_plugins_merged_into_options() {
    let harness = Harness::loaded();
    let mut init = serde_json::Map::new();
    init.insert("plugins".to_string(), json!("a b"));
    let component = harness.component(
        EditorProps::new()
            .with_init(init)
            .with_plugins(StringOrList::from(vec!["b", "c"])),
    );

    component.mount();

    let record = &harness.library().inits()[0];
    let plugins: BTreeSet<String> = record.plugins.iter().cloned().collect();
    assert_eq!(
        plugins,
        BTreeSet::from(["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn test_disabled_configures_readonly() {
    let harness = Harness::loaded();
    let (_component, editor) = harness.ready(EditorProps::new().with_disabled(true));

    assert_eq!(harness.library().inits()[0].option("readonly"), Some(&json!(true)));
    assert_eq!(editor.mode(), EditorMode::Readonly);
    assert!(editor.mode_changes().is_empty());
}

#[test]
fn test_setup_and_on_init_order() {
    let harness = Harness::loaded();
    let log = Rc::new(RefCell::new(Vec::new()));

    let setup_log = log.clone();
    let init_log = log.clone();
    let props = EditorProps::new()
        .with_value("v")
        .with_init_setup(SetupCallback::new(move |editor: &EditorRef| {
            setup_log
                .borrow_mut()
                .push(format!("setup:{}", editor.is_initialized()));
        }))
        .with_on_init(EventHandler::new(move |event: &EditorEvent, editor: &EditorRef| {
            init_log.borrow_mut().push(format!(
                "{}:{}",
                event.name,
                editor.get_content(editor_api::ContentFormat::Html)
            ));
        }));

    let (_component, _editor) = harness.ready(props);

    assert_eq!(*log.borrow(), vec!["setup:false".to_string(), "init:v".to_string()]);
}

#[test]
fn test_pending_load_then_unmount() {
    let harness = Harness::unloaded();
    let component = harness.component(EditorProps::new().with_api_key("k"));

    component.mount();

    assert_eq!(component.phase(), LifecyclePhase::AwaitingLibrary);
    assert!(component.editor().is_none());
    assert_eq!(harness.injector.injected().len(), 1);

    component.unmount();

    assert_eq!(component.phase(), LifecyclePhase::Disposed);
    assert!(harness.library().removed().is_empty());
}

#[test]
fn test_load_completion_after_unmount_ignored() {
    let harness = Harness::unloaded();
    let component = harness.component(EditorProps::new());
    component.mount();
    let src = component.script_src();
    component.unmount();

    assert!(harness.injector.complete(&src));

    assert_eq!(harness.library().init_count(), 0);
    assert_eq!(component.phase(), LifecyclePhase::Disposed);
}

#[test]
fn test_script_load_completes_mount() {
    let harness = Harness::unloaded();
    let first = harness.component(EditorProps::new().with_id("first"));
    let second = harness.component(EditorProps::new().with_id("second"));
    first.mount();
    second.mount();

    assert_eq!(harness.injector.injected().len(), 1);
    assert!(harness.injector.complete(&first.script_src()));

    assert_eq!(harness.library().init_count(), 2);
    assert_eq!(first.phase(), LifecyclePhase::AwaitingInitComplete);
    assert_eq!(second.phase(), LifecyclePhase::AwaitingInitComplete);
}

#[test]
fn test_failed_load_stays_inert() {
    let harness = Harness::unloaded();
    let component = harness.component(EditorProps::new());
    component.mount();

    assert!(harness.injector.fail(&component.script_src(), "offline"));

    assert_eq!(component.phase(), LifecyclePhase::AwaitingLibrary);
    assert!(component.editor().is_none());
}

#[test]
fn test_stalled_setup_has_no_handle() {
    let harness = Harness::loaded();
    harness.library().stall_setup();
    let component = harness.component(EditorProps::new());

    component.mount();
    assert_eq!(component.phase(), LifecyclePhase::AwaitingSetup);
    component.unmount();

    assert!(harness.library().removed().is_empty());
}

#[test]
fn test_unmount_before_init_complete_removes_editor() {
    let harness = Harness::loaded();
    let component = harness.component(EditorProps::new().with_id("early"));
    component.mount();
    let editor = harness.library().last_editor().expect("constructed");

    component.unmount();
    editor.complete_init();

    assert!(editor.is_removed());
    assert_eq!(harness.library().removed(), vec!["early".to_string()]);
    assert!(editor.content_writes().is_empty());
}

#[test]
fn test_unmount_is_idempotent() {
    let harness = Harness::loaded();
    let (component, editor) = harness.ready(EditorProps::new().with_id("once"));

    component.unmount();
    component.unmount();
    drop(component);

    assert!(editor.is_removed());
    assert_eq!(harness.library().removed().len(), 1);
}

#[test]
fn test_generated_ids_are_distinct() {
    let harness = Harness::loaded();
    let a = harness.component(EditorProps::new());
    let b = harness.component(EditorProps::new());

    assert!(a.id().is_generated());
    assert_ne!(a.id(), b.id());
    assert_eq!(a.host_element().id(), a.id().as_str());
}

#[test]
fn test_unmount_detaches_declared_handlers() {
    let harness = Harness::loaded();
    let focus = EventHandler::new(|_, _| {});
    let (component, editor) = harness.ready(EditorProps::new().with_handler("Focus", focus));
    editor.clear_calls();

    component.unmount();

    assert_eq!(editor.binding_calls(), vec![EditorCall::Off("Focus".to_string())]);
    assert!(editor.is_removed());
}

#[test]
fn test_script_load_scoped_per_document() {
    let harness = Harness::unloaded();
    let framed = harness
        .env
        .clone()
        .with_document(DocumentContext::new("frame"));
    let main = harness.component(EditorProps::new().with_id("main"));
    let inner = EditorComponent::new(EditorProps::new().with_id("inner"), framed);
    assert_eq!(inner.host_element().owner_document().name(), "frame");

    main.mount();
    inner.mount();

    let documents: Vec<String> = harness
        .injector
        .documents()
        .iter()
        .map(|doc| doc.name().to_string())
        .collect();
    assert_eq!(documents, vec!["document".to_string(), "frame".to_string()]);

    let src = main.script_src();
    assert!(harness.injector.complete(&src));
    assert_eq!(main.phase(), LifecyclePhase::AwaitingInitComplete);
    assert_eq!(inner.phase(), LifecyclePhase::AwaitingLibrary);

    assert!(harness.injector.complete(&src));
    assert_eq!(inner.phase(), LifecyclePhase::AwaitingInitComplete);
}
