//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use codex::prelude::*;

/// Test host context
pub struct TestHost {
    /// In-memory host event bus
    pub host: Arc<MemoryDispatcher>,
    /// In-memory option store firing on `host`
    pub options: Arc<MemoryOptions>,
    /// Registry under test
    pub hook: Hook,
}

impl TestHost {
    /// Create a fresh host with an empty registry
    pub fn new() -> Self {
        let host = Arc::new(MemoryDispatcher::new());
        let options = Arc::new(MemoryOptions::new(host.clone()));
        let hook = Hook::new(host.clone());

        Self {
            host,
            options,
            hook,
        }
    }

    /// Storage handle as the trait object settings expect
    pub fn storage(&self) -> Arc<dyn OptionStorage> {
        self.options.clone()
    }
}

/// A callback that does nothing
pub fn noop() -> Callback {
    Callback::closure(|_| Ok(Value::Null))
}

/// A named function returning `false`
pub fn return_false(_args: &[Value]) -> CallbackResult {
    Ok(Value::Bool(false))
}
