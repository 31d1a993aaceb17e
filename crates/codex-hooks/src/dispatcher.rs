//! The host event bus seam.
//!
//! The host owns dispatch, ordering and priority semantics. [`Hook`]
//! only calls these primitives to configure it.
//!
//! [`Hook`]: crate::hook::Hook

use serde::{Deserialize, Serialize};

use crate::callback::Callback;

/// The two dispatcher kinds.
///
/// Filters return a value replacing their first argument; actions are
/// purely observational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Observational subscriptions.
    Action,
    /// Value-transforming subscriptions.
    Filter,
}

impl HookKind {
    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Filter => "filter",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration primitives of the host event bus.
pub trait Dispatcher: Send + Sync {
    /// Subscribes `callback` to `name`.
    fn register(
        &self,
        kind: HookKind,
        name: &str,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
    );

    /// Unsubscribes `callback` from `name` at `priority`.
    ///
    /// Returns whether a subscription was removed.
    fn remove(&self, kind: HookKind, name: &str, callback: &Callback, priority: i32) -> bool;

    /// Returns the priority `callback` is subscribed to `name` at, if any.
    fn has(&self, kind: HookKind, name: &str, callback: &Callback) -> Option<i32>;
}
