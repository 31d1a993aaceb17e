//! Integration tests for declarative registration.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use codex::prelude::*;

#[derive(Default)]
struct Greeter {
    greeted: AtomicUsize,
}

impl Subscriber for Greeter {
    fn class_name(&self) -> &'static str {
        "Greeter"
    }

    fn call(&self, method: &str, args: &[Value]) -> CallbackResult {
        match method {
            "greet" => {
                self.greeted.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Null)
            }
            "shout" => {
                let text = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(json!(text.to_uppercase()))
            }
            other => Err(AppError::callback(format!("Greeter has no method {other}"))),
        }
    }
}

impl Hooked for Greeter {
    fn hook_table(&self) -> HookTable {
        hook_table! {
            "greet" => [Marker::action("init"), Marker::action("wp_loaded").with_priority(5)],
            "shout" => [Marker::filter("the_title").with_id("greeter/shout")],
        }
    }
}

#[derive(Default)]
struct Banner;

impl Subscriber for Banner {
    fn class_name(&self) -> &'static str {
        "Banner"
    }

    fn call(&self, _method: &str, _args: &[Value]) -> CallbackResult {
        Ok(Value::Null)
    }

    fn is_invocable(&self) -> bool {
        true
    }

    fn invoke(&self, args: &[Value]) -> CallbackResult {
        let text = args.first().and_then(Value::as_str).unwrap_or_default();
        Ok(json!(format!("[{text}]")))
    }
}

impl Hooked for Banner {
    fn hook_table(&self) -> HookTable {
        hook_table! {
            class: [Marker::filter("the_content").with_priority(20).with_id("banner")],
        }
    }
}

#[test]
fn test_parse_registers_and_fires() {
    let mut app = helpers::TestHost::new();
    let greeter = Arc::new(Greeter::default());

    app.hook.parse(&greeter).unwrap();

    app.host.do_action("init", &[]).unwrap();
    app.host.do_action("wp_loaded", &[]).unwrap();
    assert_eq!(greeter.greeted.load(Ordering::SeqCst), 2);

    let title = app
        .host
        .apply_filters("the_title", json!("hello"), &[])
        .unwrap();
    assert_eq!(title, json!("HELLO"));
}

#[test]
fn test_parsed_subscriptions_removable_by_ref() {
    let mut app = helpers::TestHost::new();
    app.hook.parse(&Arc::new(Greeter::default())).unwrap();

    assert_eq!(app.hook.has_filter("the_title", "@greeter/shout"), Some(10));
    app.hook.remove_filter("the_title", "@greeter/shout", 10);
    assert!(!app.host.has_handlers(HookKind::Filter, "the_title"));

    assert_eq!(app.hook.has_action("wp_loaded", "Greeter::greet"), Some(5));
}

#[test]
fn test_invocable_class_marker() {
    let mut app = helpers::TestHost::new();
    app.hook.parse(&Arc::new(Banner)).unwrap();

    assert_eq!(app.hook.has_filter("the_content", "@banner"), Some(20));
    let content = app
        .host
        .apply_filters("the_content", json!("body"), &[])
        .unwrap();
    assert_eq!(content, json!("[body]"));
}

#[test]
fn test_reparse_requires_teardown() {
    let mut app = helpers::TestHost::new();
    let banner = Arc::new(Banner);

    app.hook.parse(&banner).unwrap();
    let err = app.hook.parse(&banner).unwrap_err();
    assert_eq!(err.kind, ErrorKind::RefExists);

    app.hook.remove_all();
    app.hook.parse(&banner).unwrap();
    assert_eq!(app.host.handler_count(HookKind::Filter, "the_content"), 1);
}
