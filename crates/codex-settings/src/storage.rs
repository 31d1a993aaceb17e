//! The option store seam and an in-memory option store.
//!
//! Lifecycle events fired by the in-memory store:
//!
//! | event                  | kind   | arguments                              |
//! |------------------------|--------|----------------------------------------|
//! | `default_option_{name}`| filter | `default`, `name`, `passed_default`    |
//! | `add_option`           | action | `name`, `value`                        |
//! | `update_option`        | action | `name`, `old_value`, `value`           |
//!
//! A failing `add_option`/`update_option` handler aborts the write.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use codex_core::result::AppResult;
use codex_hooks::MemoryDispatcher;

use crate::setting::SettingArgs;

/// Action fired before an option is first stored.
pub const ADD_OPTION: &str = "add_option";

/// Action fired before a stored option changes.
pub const UPDATE_OPTION: &str = "update_option";

/// Action on which options are announced to the host's admin surface.
pub const ADMIN_INIT: &str = "admin_init";

/// Action on which options are announced to the host's API surface.
pub const REST_API_INIT: &str = "rest_api_init";

/// Name of the filter supplying the default of an absent option.
pub fn default_option(name: &str) -> String {
    format!("default_option_{name}")
}

/// Registration primitives of the host option store.
pub trait OptionStorage: Send + Sync {
    /// Makes an option discoverable under `group`.
    fn register_option(&self, group: &str, name: &str, args: &SettingArgs) -> AppResult<()>;

    /// Withdraws an option registered under `group`.
    fn unregister_option(&self, group: &str, name: &str);

    /// Purges the persisted value. Returns whether a value existed.
    fn delete_option(&self, name: &str) -> bool;
}

/// An option announced through [`OptionStorage::register_option`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredOption {
    pub group: String,
    pub args: SettingArgs,
}

/// Option store kept entirely in memory, firing its lifecycle events on a
/// [`MemoryDispatcher`].
#[derive(Debug)]
pub struct MemoryOptions {
    host: Arc<MemoryDispatcher>,
    /// Option name → persisted value.
    values: Mutex<HashMap<String, Value>>,
    /// Option name → registration metadata.
    registered: Mutex<BTreeMap<String, RegisteredOption>>,
}

impl MemoryOptions {
    pub fn new(host: Arc<MemoryDispatcher>) -> Self {
        Self {
            host,
            values: Mutex::new(HashMap::new()),
            registered: Mutex::new(BTreeMap::new()),
        }
    }

    /// The host the lifecycle events are fired on.
    pub fn host(&self) -> &Arc<MemoryDispatcher> {
        &self.host
    }

    fn stored(&self, name: &str) -> Option<Value> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(name).cloned()
    }

    fn store(&self, name: &str, value: Value) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(name.to_string(), value);
    }

    /// Reads an option, falling back to the `default_option_{name}` filter.
    ///
    /// Returns `None` when the option is absent and no default is supplied.
    pub fn get_option(&self, name: &str) -> AppResult<Option<Value>> {
        if let Some(value) = self.stored(name) {
            return Ok(Some(value));
        }

        let value = self.host.apply_filters(
            &default_option(name),
            Value::Null,
            &[json!(name), json!(false)],
        )?;

        Ok((!value.is_null()).then_some(value))
    }

    /// Reads an option, using `default` when it is absent.
    ///
    /// `default` takes precedence over any registered default.
    pub fn get_option_or(&self, name: &str, default: Value) -> AppResult<Value> {
        if let Some(value) = self.stored(name) {
            return Ok(value);
        }

        self.host
            .apply_filters(&default_option(name), default, &[json!(name), json!(true)])
    }

    /// Stores a new option. Returns `false` when it already exists.
    pub fn add_option(&self, name: &str, value: Value) -> AppResult<bool> {
        if self.stored(name).is_some() {
            return Ok(false);
        }

        self.host
            .do_action(ADD_OPTION, &[json!(name), value.clone()])?;
        self.store(name, value);

        debug!(option = %name, "Option added");
        Ok(true)
    }

    /// Changes an option, adding it when absent. Returns `false` when the
    /// value is unchanged.
    pub fn update_option(&self, name: &str, value: Value) -> AppResult<bool> {
        let Some(old) = self.stored(name) else {
            return self.add_option(name, value);
        };

        if old == value {
            return Ok(false);
        }

        self.host
            .do_action(UPDATE_OPTION, &[json!(name), old, value.clone()])?;
        self.store(name, value);

        debug!(option = %name, "Option updated");
        Ok(true)
    }

    /// Snapshot of every registered option.
    pub fn registered_settings(&self) -> BTreeMap<String, RegisteredOption> {
        let registered = self.registered.lock().unwrap_or_else(|e| e.into_inner());
        registered.clone()
    }
}

impl OptionStorage for MemoryOptions {
    fn register_option(&self, group: &str, name: &str, args: &SettingArgs) -> AppResult<()> {
        let mut registered = self.registered.lock().unwrap_or_else(|e| e.into_inner());
        registered.insert(
            name.to_string(),
            RegisteredOption {
                group: group.to_string(),
                args: args.clone(),
            },
        );

        info!(group = %group, option = %name, "Option registered");
        Ok(())
    }

    fn unregister_option(&self, group: &str, name: &str) {
        let mut registered = self.registered.lock().unwrap_or_else(|e| e.into_inner());

        if registered.get(name).is_some_and(|opt| opt.group == group) {
            registered.remove(name);
            info!(group = %group, option = %name, "Option unregistered");
        }
    }

    fn delete_option(&self, name: &str) -> bool {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(name).is_some()
    }
}
