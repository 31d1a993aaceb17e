//! A named group of settings registered together.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use codex_core::config::AppSection;
use codex_core::error::AppError;
use codex_core::result::AppResult;
use codex_hooks::{Hook, Hookable};

use crate::registrar::SettingRegistrar;
use crate::setting::Setting;
use crate::storage::OptionStorage;

/// Groups settings under one setting group and an optional option prefix.
pub struct Registry {
    setting_group: String,
    prefix: String,
    settings: Vec<Setting>,
    /// Option name (prefixed) → registrar.
    registered: BTreeMap<String, SettingRegistrar>,
    storage: Arc<dyn OptionStorage>,
}

impl Registry {
    /// Creates an empty registry. Fails when `setting_group` is blank.
    pub fn new(
        setting_group: impl Into<String>,
        storage: Arc<dyn OptionStorage>,
    ) -> AppResult<Self> {
        let setting_group = setting_group.into();

        if setting_group.trim().is_empty() {
            return Err(AppError::invalid_argument("The setting group cannot be empty."));
        }

        Ok(Self {
            setting_group,
            prefix: String::new(),
            settings: Vec::new(),
            registered: BTreeMap::new(),
            storage,
        })
    }

    /// Creates the registry for one settings file of an app: the group is
    /// `{app}/{name}` and the app's option prefix is applied.
    pub fn for_app(
        app: &AppSection,
        name: &str,
        storage: Arc<dyn OptionStorage>,
    ) -> AppResult<Self> {
        let mut registry = Self::new(format!("{}/{name}", app.name), storage)?;

        if !app.option_prefix.trim().is_empty() {
            registry.set_prefix(&app.option_prefix);
        }

        Ok(registry)
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    pub fn add_settings(&mut self, settings: impl IntoIterator<Item = Setting>) {
        self.settings.extend(settings);
    }

    /// Registers every setting not yet registered.
    pub fn register(&mut self, hook: &mut Hook) -> AppResult<()> {
        for setting in &self.settings {
            let mut registrar = SettingRegistrar::new(
                setting.clone(),
                self.setting_group.clone(),
                self.storage.clone(),
            );
            registrar.set_prefix(&self.prefix);

            if self.registered.contains_key(registrar.name()) {
                continue;
            }

            registrar.register(hook)?;
            self.registered.insert(registrar.name().to_string(), registrar);
        }

        info!(
            group = %self.setting_group,
            settings = self.registered.len(),
            "Settings registered"
        );

        Ok(())
    }

    /// Deregisters every registered setting; with `delete`, their persisted
    /// values are purged too.
    pub fn deregister(&mut self, hook: &mut Hook, delete: bool) {
        for (_, mut registrar) in std::mem::take(&mut self.registered) {
            registrar.deregister(hook, delete);
        }
    }

    /// Whether every added setting has been registered.
    pub fn is_registered(&self) -> bool {
        self.registered.len() == self.settings.len()
    }

    pub fn registered(&self) -> &BTreeMap<String, SettingRegistrar> {
        &self.registered
    }

    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    pub fn setting_group(&self) -> &str {
        &self.setting_group
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Hookable for Registry {
    fn hook(&mut self, hook: &mut Hook) -> AppResult<()> {
        self.register(hook)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("setting_group", &self.setting_group)
            .field("prefix", &self.prefix)
            .field("settings", &self.settings)
            .field("registered", &self.registered.keys().collect::<Vec<_>>())
            .finish()
    }
}
