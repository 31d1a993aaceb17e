//! Callback registry: tracks every subscription made against the host and
//! lets it be found again by ref, native identity, or callback.
//!
//! Registration order:
//!
//! 1. The ref (if any) is checked against the naming grammar.
//! 2. The ref's alias is checked for uniqueness.
//! 3. The host dispatcher is called.
//! 4. The reference store and the registration list are updated.
//!
//! Both ref checks run before the host is touched, so a rejected ref never
//! leaves a host subscription without a matching bookkeeping entry.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use codex_core::error::AppError;
use codex_core::result::AppResult;

use crate::callback::Callback;
use crate::dispatcher::{Dispatcher, HookKind};
use crate::parser::{Hooked, Parser};
use crate::refs::{ALIAS_PREFIX, HookRef, RefStore, alias_key, validate_ref};

/// Priority used when a caller has no preference.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Number of arguments passed to a callback by default.
pub const DEFAULT_ACCEPTED_ARGS: usize = 1;

/// Additional options for a registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookOptions {
    /// Ref naming the registration for later removal.
    pub id: Option<String>,
}

impl HookOptions {
    /// Options naming the registration `id`.
    pub fn named(id: impl Into<String>) -> Self {
        Self::default().with_id(id)
    }

    /// Sets the ref.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the validated ref, or `None` when no usable ref was given.
    fn named_id(&self) -> AppResult<Option<&str>> {
        match self.id.as_deref() {
            Some(id) if !id.trim().is_empty() => {
                validate_ref(id)?;
                Ok(Some(id))
            }
            _ => Ok(None),
        }
    }
}

/// A single subscription made through the registry.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Hook name.
    pub name: String,
    /// Subscribed callback.
    pub callback: Callback,
    /// Priority passed to the host.
    pub priority: i32,
    /// Number of arguments passed to the callback.
    pub accepted_args: usize,
}

/// Components that attach their own subscriptions to a [`Hook`].
pub trait Hookable {
    /// Adds the component's subscriptions.
    fn hook(&mut self, hook: &mut Hook) -> AppResult<()>;
}

/// Registry of every action and filter subscribed through it.
pub struct Hook {
    /// Host event bus.
    dispatcher: Arc<dyn Dispatcher>,
    /// Ref and identity lookups.
    refs: RefStore,
    /// Action subscriptions, in registration order.
    actions: Vec<Registration>,
    /// Filter subscriptions, in registration order.
    filters: Vec<Registration>,
}

impl Hook {
    /// Creates a registry bound to the host dispatcher.
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            dispatcher,
            refs: RefStore::new(),
            actions: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Subscribes `callback` to the `name` action.
    pub fn add_action(
        &mut self,
        name: &str,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
        options: HookOptions,
    ) -> AppResult<()> {
        self.add(
            HookKind::Action,
            name,
            callback,
            priority,
            accepted_args,
            options,
        )
    }

    /// Subscribes `callback` to the `name` filter.
    pub fn add_filter(
        &mut self,
        name: &str,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
        options: HookOptions,
    ) -> AppResult<()> {
        self.add(
            HookKind::Filter,
            name,
            callback,
            priority,
            accepted_args,
            options,
        )
    }

    /// Subscribes `callback` to `name` on the given dispatcher kind.
    ///
    /// Fails with `InvalidRef` when `options.id` breaks the ref grammar and
    /// with `RefExists` when the ref is claimed by a live registration.
    /// Neither failure touches the host.
    pub fn add(
        &mut self,
        kind: HookKind,
        name: &str,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
        options: HookOptions,
    ) -> AppResult<()> {
        let native_id = callback.identity();
        let named_id = match options.named_id()? {
            Some(id) => {
                if self.refs.contains_alias(id) {
                    return Err(AppError::ref_exists(&alias_key(id)));
                }
                id.to_string()
            }
            None => native_id.clone(),
        };

        self.dispatcher
            .register(kind, name, callback.clone(), priority, accepted_args);
        self.refs.add(&named_id, &native_id, callback.clone())?;

        debug!(
            kind = %kind,
            hook = %name,
            callback = %native_id,
            priority = priority,
            "Hook registered"
        );

        self.registrations_mut(kind).push(Registration {
            name: name.to_string(),
            callback,
            priority,
            accepted_args,
        });

        Ok(())
    }

    /// Unsubscribes an action by ref (`@ref`), native identity, or callback.
    ///
    /// Unknown refs are ignored.
    pub fn remove_action<'a>(&mut self, name: &str, r: impl Into<HookRef<'a>>, priority: i32) {
        self.remove(HookKind::Action, name, r.into(), priority);
    }

    /// Unsubscribes a filter by ref (`@ref`), native identity, or callback.
    ///
    /// Unknown refs are ignored.
    pub fn remove_filter<'a>(&mut self, name: &str, r: impl Into<HookRef<'a>>, priority: i32) {
        self.remove(HookKind::Filter, name, r.into(), priority);
    }

    /// Unsubscribes from `name` on the given dispatcher kind.
    ///
    /// Returns whether the host dropped a subscription. A successful removal
    /// through an alias key releases the ref for reuse.
    pub fn remove(&mut self, kind: HookKind, name: &str, r: HookRef<'_>, priority: i32) -> bool {
        let Some(callback) = self.refs.resolve(r) else {
            debug!(kind = %kind, hook = %name, "Nothing to remove for unknown ref");
            return false;
        };

        if !self.dispatcher.remove(kind, name, &callback, priority) {
            return false;
        }

        let key = callback.dispatch_key();
        self.registrations_mut(kind).retain(|reg| {
            !(reg.name == name && reg.priority == priority && reg.callback.dispatch_key() == key)
        });

        if let HookRef::Id(id) = r {
            if id.starts_with(ALIAS_PREFIX) {
                self.refs.forget(id);
            }
        }

        debug!(
            kind = %kind,
            hook = %name,
            callback = %callback.identity(),
            priority = priority,
            "Hook removed"
        );

        true
    }

    /// Returns the priority an action is subscribed at, as reported by the
    /// host.
    pub fn has_action<'a>(&self, name: &str, r: impl Into<HookRef<'a>>) -> Option<i32> {
        self.has(HookKind::Action, name, r.into())
    }

    /// Returns the priority a filter is subscribed at, as reported by the
    /// host.
    pub fn has_filter<'a>(&self, name: &str, r: impl Into<HookRef<'a>>) -> Option<i32> {
        self.has(HookKind::Filter, name, r.into())
    }

    /// Asks the host whether the resolved callback is subscribed to `name`.
    pub fn has(&self, kind: HookKind, name: &str, r: HookRef<'_>) -> Option<i32> {
        let callback = self.refs.resolve(r)?;
        self.dispatcher.has(kind, name, &callback)
    }

    /// Removes every subscription made through this registry.
    ///
    /// Also clears every ref, so calling it again is a no-op.
    pub fn remove_all(&mut self) {
        let actions = std::mem::take(&mut self.actions);
        let filters = std::mem::take(&mut self.filters);

        for reg in &actions {
            self.dispatcher
                .remove(HookKind::Action, &reg.name, &reg.callback, reg.priority);
        }

        for reg in &filters {
            self.dispatcher
                .remove(HookKind::Filter, &reg.name, &reg.callback, reg.priority);
        }

        self.refs.clear();

        if !actions.is_empty() || !filters.is_empty() {
            info!(
                actions = actions.len(),
                filters = filters.len(),
                "All hooks removed"
            );
        }
    }

    /// Registers every declarative marker of `target`.
    pub fn parse<T: Hooked>(&mut self, target: &Arc<T>) -> AppResult<()> {
        Parser::new(target.clone()).parse(self)
    }

    /// Action subscriptions, in registration order.
    pub fn actions(&self) -> &[Registration] {
        &self.actions
    }

    /// Filter subscriptions, in registration order.
    pub fn filters(&self) -> &[Registration] {
        &self.filters
    }

    /// The reference store.
    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    /// The host dispatcher.
    pub fn dispatcher(&self) -> &Arc<dyn Dispatcher> {
        &self.dispatcher
    }

    fn registrations_mut(&mut self, kind: HookKind) -> &mut Vec<Registration> {
        match kind {
            HookKind::Action => &mut self.actions,
            HookKind::Filter => &mut self.filters,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("refs", &self.refs.len())
            .field("actions", &self.actions.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}
