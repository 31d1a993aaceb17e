//! Integration tests for the callback registry.

mod helpers;

use std::sync::Arc;

use serde_json::{Value, json};

use codex::prelude::*;

struct HelloWorld;

impl Subscriber for HelloWorld {
    fn class_name(&self) -> &'static str {
        "HelloWorld"
    }

    fn call(&self, method: &str, _args: &[Value]) -> CallbackResult {
        Ok(json!(format!("HelloWorld::{method}")))
    }
}

struct HelloWorldChild;

impl Subscriber for HelloWorldChild {
    fn class_name(&self) -> &'static str {
        "HelloWorldChild"
    }

    fn call(&self, method: &str, _args: &[Value]) -> CallbackResult {
        Ok(json!(format!("HelloWorldChild::{method}")))
    }
}

fn static_init(_args: &[Value]) -> CallbackResult {
    Ok(Value::Null)
}

#[test]
fn test_bound_methods_share_identity() {
    let target: Arc<dyn Subscriber> = Arc::new(HelloWorld);
    let first = Callback::method(target.clone(), "init");
    let second = Callback::method(target, "init");

    assert_eq!(first.identity(), second.identity());
    assert_eq!(first.identity(), "HelloWorld::init");
}

#[test]
fn test_distinct_closures_have_distinct_identities() {
    let first = helpers::noop();
    let second = helpers::noop();

    assert_ne!(first.identity(), second.identity());
    assert_eq!(first.identity(), first.clone().identity());
}

#[test]
fn test_child_type_yields_own_identity() {
    let child = Callback::method(Arc::new(HelloWorldChild), "init");
    assert_eq!(child.identity(), "HelloWorldChild::init");
}

#[test]
fn test_register_sidebar_scenario() {
    let mut app = helpers::TestHost::new();
    let cb = helpers::noop();

    app.hook
        .add_action(
            "register_sidebar",
            cb.clone(),
            50,
            1,
            HookOptions::named("bar"),
        )
        .unwrap();
    assert_eq!(app.hook.has_action("register_sidebar", &cb), Some(50));

    app.hook.remove_action("register_sidebar", "@bar", 50);
    assert_eq!(app.hook.has_action("register_sidebar", &cb), None);
}

#[test]
fn test_duplicate_ref_raises_ref_exists() {
    let mut app = helpers::TestHost::new();

    app.hook
        .add_action("init", helpers::noop(), 10, 1, HookOptions::named("x"))
        .unwrap();
    let err = app
        .hook
        .add_filter(
            "the_content",
            helpers::noop(),
            20,
            2,
            HookOptions::named("x"),
        )
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::RefExists);
    assert_eq!(
        err.message,
        "Reference \"@x\" already exists on the registry."
    );
    assert!(!app.host.has_handlers(HookKind::Filter, "the_content"));
}

#[test]
fn test_remove_nonexistent_ref_leaves_registrations() {
    let mut app = helpers::TestHost::new();
    let cb = helpers::noop();
    app.hook
        .add_action("wp", cb.clone(), 10, 1, HookOptions::default())
        .unwrap();

    app.hook.remove_action("wp", "@nonexistent", 10);

    assert_eq!(app.hook.has_action("wp", &cb), Some(10));
    assert_eq!(app.hook.actions().len(), 1);
}

#[test]
fn test_remove_static_method_by_identity() {
    let mut app = helpers::TestHost::new();
    app.hook
        .add_action(
            "init",
            Callback::static_method("HelloWorld", "init", static_init),
            10,
            1,
            HookOptions::default(),
        )
        .unwrap();

    assert_eq!(app.hook.has_action("init", "HelloWorld::init"), Some(10));
    app.hook.remove_action("init", "HelloWorld::init", 10);
    assert_eq!(app.hook.has_action("init", "HelloWorld::init"), None);
}

#[test]
fn test_bound_method_found_by_class_identity() {
    let mut app = helpers::TestHost::new();
    app.hook
        .add_action(
            "wp_head",
            Callback::method(Arc::new(HelloWorld), "head"),
            30,
            1,
            HookOptions::named("hello/head"),
        )
        .unwrap();

    assert_eq!(app.hook.has_action("wp_head", "HelloWorld::head"), Some(30));
    assert_eq!(app.hook.has_action("wp_head", "@hello/head"), Some(30));

    app.hook.remove_action("wp_head", "HelloWorld::head", 30);
    assert_eq!(app.hook.has_action("wp_head", "@hello/head"), None);
}

#[test]
fn test_named_function_lookup() {
    let mut app = helpers::TestHost::new();
    app.hook
        .add_filter(
            "show_admin_bar",
            Callback::function("__return_false", helpers::return_false),
            DEFAULT_PRIORITY,
            DEFAULT_ACCEPTED_ARGS,
            HookOptions::default(),
        )
        .unwrap();

    assert_eq!(
        app.hook.has_filter("show_admin_bar", "__return_false"),
        Some(10)
    );
    assert_eq!(
        app.host.apply_filters("show_admin_bar", json!(true), &[]).unwrap(),
        json!(false)
    );
}

#[test]
fn test_remove_all_tears_down_everything() {
    let mut app = helpers::TestHost::new();
    let action = helpers::noop();
    let filter = helpers::noop();

    app.hook
        .add_action("init", action.clone(), 10, 1, HookOptions::named("a"))
        .unwrap();
    app.hook
        .add_filter("the_title", filter.clone(), 99, 1, HookOptions::default())
        .unwrap();

    app.hook.remove_all();
    app.hook.remove_all();

    assert!(!app.host.has_handlers(HookKind::Action, "init"));
    assert!(!app.host.has_handlers(HookKind::Filter, "the_title"));
    assert_eq!(app.hook.has_action("init", "@a"), None);
}

#[test]
fn test_invalid_ref_rejected() {
    let mut app = helpers::TestHost::new();

    for id in ["@bar", "Bar", "bar/baz/qux", "bar baz"] {
        let err = app
            .hook
            .add_action("init", helpers::noop(), 10, 1, HookOptions::named(id))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRef, "{id}");
    }

    assert!(!app.host.has_handlers(HookKind::Action, "init"));
}
