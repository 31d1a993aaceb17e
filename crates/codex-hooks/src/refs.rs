//! Reference store mapping refs and native identities to callbacks.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use codex_core::error::AppError;
use codex_core::result::AppResult;

use crate::callback::Callback;

/// Prefix that namespaces alias keys away from native identities.
pub const ALIAS_PREFIX: char = '@';

static REF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9](?:(?:[._]|-{1,2})?[a-zA-Z0-9]+)*(?:/[a-z0-9](?:(?:[._]|-{1,2})?[a-zA-Z0-9]+)*)?$",
    )
    .expect("ref pattern is a valid regex")
});

/// Checks a ref against the ref naming grammar.
pub fn validate_ref(id: &str) -> AppResult<()> {
    if REF_PATTERN.is_match(id) {
        return Ok(());
    }

    Err(AppError::invalid_ref(format!(
        "Invalid ref ID format \"{id}\". A ref ID should only contain letters, numbers, hyphens, dots, underscores, and a single forward slash."
    )))
}

/// Builds the alias key stored for a ref.
pub fn alias_key(id: &str) -> String {
    format!("{ALIAS_PREFIX}{id}")
}

/// A value used to look up a registration: a ref/identity string or the
/// callback itself.
#[derive(Debug, Clone, Copy)]
pub enum HookRef<'a> {
    /// An alias key (`@ref`) or a native identity.
    Id(&'a str),
    /// The callback itself.
    Callback(&'a Callback),
}

impl<'a> From<&'a str> for HookRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a String> for HookRef<'a> {
    fn from(id: &'a String) -> Self {
        Self::Id(id.as_str())
    }
}

impl<'a> From<&'a Callback> for HookRef<'a> {
    fn from(callback: &'a Callback) -> Self {
        Self::Callback(callback)
    }
}

/// Maps refs and native identities to callbacks.
#[derive(Debug, Default)]
pub struct RefStore {
    /// Alias key or native identity → callback.
    refs: HashMap<String, Callback>,
    /// Native identity → alias key.
    aliases: HashMap<String, String>,
}

impl RefStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a callback under `id`.
    ///
    /// When `id` equals `native_id` the callback is stored under its native
    /// identity, replacing any previous entry. Otherwise it is stored under
    /// the alias key of `id`, which must not already be claimed.
    pub fn add(&mut self, id: &str, native_id: &str, callback: Callback) -> AppResult<()> {
        if id == native_id {
            self.refs.insert(native_id.to_string(), callback);
            return Ok(());
        }

        let key = alias_key(id);

        if self.refs.contains_key(&key) {
            return Err(AppError::ref_exists(&key));
        }

        self.refs.insert(key.clone(), callback);
        self.aliases.insert(native_id.to_string(), key);

        Ok(())
    }

    /// Returns whether the alias for `id` is currently claimed.
    pub fn contains_alias(&self, id: &str) -> bool {
        self.refs.contains_key(&alias_key(id))
    }

    /// Resolves a ref, native identity, or callback to a callback.
    pub fn resolve(&self, r: HookRef<'_>) -> Option<Callback> {
        match r {
            HookRef::Id(id) => self
                .aliases
                .get(id)
                .and_then(|key| self.refs.get(key))
                .or_else(|| self.refs.get(id))
                .cloned(),
            HookRef::Callback(callback) => Some(callback.clone()),
        }
    }

    /// Drops an alias entry and every reverse index pointing at it.
    pub fn forget(&mut self, key: &str) -> bool {
        if !key.starts_with(ALIAS_PREFIX) {
            return false;
        }

        let removed = self.refs.remove(key).is_some();
        self.aliases.retain(|_, alias| alias != key);
        removed
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.refs.clear();
        self.aliases.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
