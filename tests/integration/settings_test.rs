//! Integration tests for the settings overlay.

mod helpers;

use serde_json::json;

use codex::prelude::*;

fn codex_settings() -> Vec<Setting> {
    vec![
        Setting::new("say", ValueType::String)
            .unwrap()
            .with_default("Hello, World!")
            .with_label("Say")
            .with_constraints(vec![constraint(|v| v.as_str() != Some(""))]),
        Setting::new("count", ValueType::Number).unwrap().with_default(1),
    ]
}

#[test]
fn test_registry_defaults_and_teardown() {
    let mut app = helpers::TestHost::new();
    let mut registry = Registry::new("codex", app.storage()).unwrap();
    registry.set_prefix("codex_");
    registry.add_settings(codex_settings());

    registry.register(&mut app.hook).unwrap();

    assert!(registry.is_registered());
    assert_eq!(registry.registered().len(), 2);
    assert_eq!(
        app.options.get_option("codex_say").unwrap(),
        Some(json!("Hello, World!"))
    );
    assert_eq!(
        app.options.get_option("codex_count").unwrap(),
        Some(json!(1))
    );

    registry.deregister(&mut app.hook, false);

    assert!(!registry.is_registered());
    assert!(registry.registered().is_empty());
    assert_eq!(app.options.get_option("codex_say").unwrap(), None);
    assert_eq!(
        app.options
            .get_option_or("codex_say", json!("fallback"))
            .unwrap(),
        json!("fallback")
    );
}

#[test]
fn test_constraint_guards_writes() {
    let mut app = helpers::TestHost::new();
    let mut registry = Registry::new("codex", app.storage()).unwrap();
    registry.set_prefix("codex_");
    registry.add_settings(codex_settings());
    registry.register(&mut app.hook).unwrap();

    let err = app.options.add_option("codex_say", json!("")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "[codex_say] Invalid value.");

    assert!(app.options.add_option("codex_say", json!("x")).unwrap());
    assert_eq!(
        app.options.get_option("codex_say").unwrap(),
        Some(json!("x"))
    );
}

#[test]
fn test_admin_init_announces_group() {
    let mut app = helpers::TestHost::new();
    let config = AppSection::new("codex").with_option_prefix("codex_");
    let mut registry = Registry::for_app(&config, "general", app.storage()).unwrap();
    registry.add_settings(codex_settings());
    registry.hook(&mut app.hook).unwrap();

    app.host.do_action("admin_init", &[]).unwrap();

    let announced = app.options.registered_settings();
    assert_eq!(announced.len(), 2);
    assert_eq!(announced["codex_say"].group, "codex/general");
    assert_eq!(
        serde_json::to_value(&announced["codex_say"].args).unwrap(),
        json!({
            "type": "string",
            "default": "Hello, World!",
            "label": "Say",
            "show_in_rest": true
        })
    );

    registry.deregister(&mut app.hook, true);
    assert!(app.options.registered_settings().is_empty());
}

#[test]
fn test_deregister_with_delete_purges_values() {
    let mut app = helpers::TestHost::new();
    let mut registry = Registry::new("codex", app.storage()).unwrap();
    registry.add_settings(codex_settings());
    registry.register(&mut app.hook).unwrap();
    app.options.update_option("count", json!(5)).unwrap();

    registry.deregister(&mut app.hook, true);

    assert_eq!(app.options.get_option("count").unwrap(), None);
    assert!(app.hook.actions().is_empty());
    assert!(app.hook.filters().is_empty());
}

#[test]
fn test_rest_api_init_announces_group() {
    let mut app = helpers::TestHost::new();
    let links = Setting::new("links", ValueType::Array)
        .unwrap()
        .api_schema(json!({ "items": { "type": "string" } }));
    let mut registry = Registry::new("codex/general", app.storage()).unwrap();
    registry.add_settings([links]);
    registry.register(&mut app.hook).unwrap();

    app.host.do_action("rest_api_init", &[]).unwrap();

    let announced = app.options.registered_settings();
    assert_eq!(
        serde_json::to_value(&announced["links"].args.show_in_rest).unwrap(),
        json!({ "name": "links", "schema": { "items": { "type": "string" } } })
    );

    registry.deregister(&mut app.hook, false);
    assert!(!app.host.has_handlers(HookKind::Action, "rest_api_init"));
}

#[test]
fn test_option_names_need_not_be_refs() {
    let mut app = helpers::TestHost::new();
    let mut registry = Registry::new("codex", app.storage()).unwrap();
    registry.set_prefix("Codex_");
    registry.add_settings([
        Setting::new("say", ValueType::String)
            .unwrap()
            .with_default("hi"),
        Setting::new("_say", ValueType::String)
            .unwrap()
            .with_default("hey"),
    ]);

    registry.register(&mut app.hook).unwrap();
    assert_eq!(
        app.options.get_option("Codex_say").unwrap(),
        Some(json!("hi"))
    );
    assert_eq!(
        app.options.get_option("Codex__say").unwrap(),
        Some(json!("hey"))
    );

    registry.deregister(&mut app.hook, false);
    assert_eq!(app.options.get_option("Codex_say").unwrap(), None);
    assert!(app.hook.actions().is_empty());
    assert!(app.hook.refs().is_empty());
}
