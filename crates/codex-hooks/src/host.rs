//! In-memory host event bus.
//!
//! Stores subscriptions per hook name ordered by priority (lower runs
//! first, ties run in subscription order) and fires them on demand:
//!
//! - `do_action` calls every handler; the first error aborts the chain.
//! - `apply_filters` threads the value through every handler, each
//!   receiving the previous handler's output as its first argument.
//!
//! Handler lists are snapshotted before invocation so callbacks may
//! subscribe, unsubscribe, or fire other hooks re-entrantly.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use codex_core::result::AppResult;

use crate::callback::Callback;
use crate::dispatcher::{Dispatcher, HookKind};

/// A subscription held by the host.
#[derive(Debug, Clone)]
struct HookEntry {
    /// The callback.
    callback: Callback,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Maximum number of arguments passed to the callback.
    accepted_args: usize,
    /// Host comparison key of the callback.
    key: String,
}

type HookTable = HashMap<String, Vec<HookEntry>>;

/// Host event bus kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryDispatcher {
    /// Action name → sorted subscriptions.
    actions: Mutex<HookTable>,
    /// Filter name → sorted subscriptions.
    filters: Mutex<HookTable>,
    /// Action name → number of times fired.
    fired: Mutex<HashMap<String, usize>>,
}

impl MemoryDispatcher {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: HookKind) -> &Mutex<HookTable> {
        match kind {
            HookKind::Action => &self.actions,
            HookKind::Filter => &self.filters,
        }
    }

    fn snapshot(&self, kind: HookKind, name: &str) -> Vec<HookEntry> {
        let table = self.table(kind).lock().unwrap_or_else(|e| e.into_inner());
        table.get(name).cloned().unwrap_or_default()
    }

    /// Fires an action, invoking every subscribed callback.
    pub fn do_action(&self, name: &str, args: &[Value]) -> AppResult<()> {
        {
            let mut fired = self.fired.lock().unwrap_or_else(|e| e.into_inner());
            *fired.entry(name.to_string()).or_insert(0) += 1;
        }

        let handlers = self.snapshot(HookKind::Action, name);

        if handlers.is_empty() {
            return Ok(());
        }

        debug!(hook = %name, handler_count = handlers.len(), "Dispatching action");

        for entry in &handlers {
            let take = entry.accepted_args.min(args.len());
            entry.callback.invoke(&args[..take])?;
        }

        Ok(())
    }

    /// Applies a filter to `value`, passing `extra` as trailing arguments.
    pub fn apply_filters(&self, name: &str, value: Value, extra: &[Value]) -> AppResult<Value> {
        let handlers = self.snapshot(HookKind::Filter, name);

        if handlers.is_empty() {
            return Ok(value);
        }

        debug!(hook = %name, handler_count = handlers.len(), "Applying filter");

        let mut current = value;

        for entry in &handlers {
            let mut args = Vec::with_capacity(extra.len() + 1);
            args.push(current);
            args.extend_from_slice(extra);
            args.truncate(entry.accepted_args.max(1));
            current = entry.callback.invoke(&args)?;
        }

        Ok(current)
    }

    /// Number of times an action has been fired.
    pub fn did_action(&self, name: &str) -> usize {
        let fired = self.fired.lock().unwrap_or_else(|e| e.into_inner());
        fired.get(name).copied().unwrap_or(0)
    }

    /// Number of subscriptions for a hook name.
    pub fn handler_count(&self, kind: HookKind, name: &str) -> usize {
        let table = self.table(kind).lock().unwrap_or_else(|e| e.into_inner());
        table.get(name).map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether any subscription exists for a hook name.
    pub fn has_handlers(&self, kind: HookKind, name: &str) -> bool {
        self.handler_count(kind, name) > 0
    }
}

impl Dispatcher for MemoryDispatcher {
    fn register(
        &self,
        kind: HookKind,
        name: &str,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
    ) {
        let key = callback.dispatch_key();
        let mut table = self.table(kind).lock().unwrap_or_else(|e| e.into_inner());
        let entries = table.entry(name.to_string()).or_default();

        // Same callback at the same priority replaces the earlier subscription.
        entries.retain(|e| !(e.key == key && e.priority == priority));
        entries.push(HookEntry {
            callback,
            priority,
            accepted_args,
            key,
        });

        // Stable sort keeps subscription order among equal priorities.
        entries.sort_by_key(|e| e.priority);
    }

    fn remove(&self, kind: HookKind, name: &str, callback: &Callback, priority: i32) -> bool {
        let key = callback.dispatch_key();
        let mut table = self.table(kind).lock().unwrap_or_else(|e| e.into_inner());

        let Some(entries) = table.get_mut(name) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|e| !(e.key == key && e.priority == priority));
        let removed = entries.len() < before;

        if entries.is_empty() {
            table.remove(name);
        }

        removed
    }

    fn has(&self, kind: HookKind, name: &str, callback: &Callback) -> Option<i32> {
        let key = callback.dispatch_key();
        let table = self.table(kind).lock().unwrap_or_else(|e| e.into_inner());

        table
            .get(name)?
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.priority)
    }
}
