//! Per-option subscriptions to the option store lifecycle.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use codex_core::error::AppError;
use codex_core::result::AppResult;
use codex_hooks::refs::alias_key;
use codex_hooks::{Callback, Hook, HookOptions};

use crate::setting::Setting;
use crate::storage::{
    ADD_OPTION, ADMIN_INIT, OptionStorage, REST_API_INIT, UPDATE_OPTION, default_option,
};
use crate::validator::InputValidator;

const DEFAULT_REF: &str = "default";
const ADD_REF: &str = "add";
const UPDATE_REF: &str = "update";
const REGISTER_REF: &str = "register";
const REST_REF: &str = "rest";

/// Owns the subscriptions that attach one [`Setting`] to the option store:
/// default supply, add and update validation, and announcement on
/// `admin_init` and `rest_api_init`.
pub struct SettingRegistrar {
    setting: Setting,
    group: String,
    /// Option name including the prefix.
    name: String,
    storage: Arc<dyn OptionStorage>,
    registered: bool,
}

impl SettingRegistrar {
    /// Creates an unregistered registrar for `setting` under `group`.
    pub fn new(
        setting: Setting,
        group: impl Into<String>,
        storage: Arc<dyn OptionStorage>,
    ) -> Self {
        let name = setting.name().to_string();

        Self {
            setting,
            group: group.into(),
            name,
            storage,
            registered: false,
        }
    }

    /// Prepends `prefix` (trimmed) to the option name.
    pub fn set_prefix(&mut self, prefix: &str) {
        self.name = format!("{}{}", prefix.trim(), self.setting.name());
    }

    /// The stored option name, including any prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Ref of one of this option's subscriptions.
    ///
    /// Option names are arbitrary non-blank strings, so the name is hex
    /// encoded to always satisfy the ref grammar without collisions.
    pub fn ref_id(&self, suffix: &str) -> String {
        let encoded: String = self.name.bytes().map(|b| format!("{b:02x}")).collect();
        format!("option.{encoded}/{suffix}")
    }

    fn refs(&self) -> [String; 5] {
        [DEFAULT_REF, ADD_REF, UPDATE_REF, REGISTER_REF, REST_REF]
            .map(|suffix| self.ref_id(suffix))
    }

    /// Subscribes the option to the store lifecycle.
    ///
    /// Every ref is checked for a live claim before anything is subscribed,
    /// so a failure leaves the registry unchanged. Registering twice is a
    /// no-op.
    pub fn register(&mut self, hook: &mut Hook) -> AppResult<()> {
        if self.registered {
            return Ok(());
        }

        for id in self.refs() {
            if hook.refs().contains_alias(&id) {
                return Err(AppError::ref_exists(&alias_key(&id)));
            }
        }

        let priority = self.setting.priority();
        let validator = InputValidator::new(self.name.clone())
            .with_constraints(self.setting.constraints().to_vec());

        let default = self.setting.default_value().clone();
        hook.add_filter(
            &default_option(&self.name),
            Callback::closure(move |args| {
                let passed_default = args.get(2).and_then(Value::as_bool).unwrap_or(false);

                if passed_default {
                    return Ok(args.first().cloned().unwrap_or(Value::Null));
                }

                Ok(default.clone())
            }),
            priority,
            3,
            HookOptions::named(self.ref_id(DEFAULT_REF)),
        )?;

        let (name, check) = (self.name.clone(), validator.clone());
        hook.add_action(
            ADD_OPTION,
            Callback::closure(move |args| {
                if args.first().and_then(Value::as_str) == Some(name.as_str()) {
                    check.validate(args.get(1).unwrap_or(&Value::Null))?;
                }

                Ok(Value::Null)
            }),
            priority,
            2,
            HookOptions::named(self.ref_id(ADD_REF)),
        )?;

        let (name, check) = (self.name.clone(), validator);
        hook.add_action(
            UPDATE_OPTION,
            Callback::closure(move |args| {
                if args.first().and_then(Value::as_str) == Some(name.as_str()) {
                    check.validate(args.get(2).unwrap_or(&Value::Null))?;
                }

                Ok(Value::Null)
            }),
            priority,
            3,
            HookOptions::named(self.ref_id(UPDATE_REF)),
        )?;

        let storage = self.storage.clone();
        let (group, name) = (self.group.clone(), self.name.clone());
        let args = self.setting.setting_args();
        let announce = Callback::closure(move |_| {
            storage.register_option(&group, &name, &args)?;
            Ok(Value::Null)
        });

        hook.add_action(
            ADMIN_INIT,
            announce.clone(),
            priority,
            0,
            HookOptions::named(self.ref_id(REGISTER_REF)),
        )?;
        hook.add_action(
            REST_API_INIT,
            announce,
            priority,
            0,
            HookOptions::named(self.ref_id(REST_REF)),
        )?;

        self.registered = true;
        info!(group = %self.group, option = %self.name, "Setting registered");

        Ok(())
    }

    /// Removes the option's subscriptions and withdraws it from the store.
    ///
    /// With `delete`, the persisted value is purged as well.
    pub fn deregister(&mut self, hook: &mut Hook, delete: bool) {
        if self.registered {
            let priority = self.setting.priority();
            let default_key = alias_key(&self.ref_id(DEFAULT_REF));
            let add_key = alias_key(&self.ref_id(ADD_REF));
            let update_key = alias_key(&self.ref_id(UPDATE_REF));
            let register_key = alias_key(&self.ref_id(REGISTER_REF));
            let rest_key = alias_key(&self.ref_id(REST_REF));

            hook.remove_filter(&default_option(&self.name), &default_key, priority);
            hook.remove_action(ADD_OPTION, &add_key, priority);
            hook.remove_action(UPDATE_OPTION, &update_key, priority);
            hook.remove_action(ADMIN_INIT, &register_key, priority);
            hook.remove_action(REST_API_INIT, &rest_key, priority);

            self.storage.unregister_option(&self.group, &self.name);
            self.registered = false;

            info!(group = %self.group, option = %self.name, "Setting deregistered");
        }

        if delete {
            self.storage.delete_option(&self.name);
        }
    }
}

impl std::fmt::Debug for SettingRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingRegistrar")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("registered", &self.registered)
            .finish()
    }
}
