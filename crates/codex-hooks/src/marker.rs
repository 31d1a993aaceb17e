//! Declarative "subscribe to event X" markers.

use crate::dispatcher::HookKind;
use crate::hook::{DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookOptions};

/// One declarative subscription attached to a type or a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    kind: HookKind,
    name: String,
    priority: i32,
    accepted_args: usize,
    options: HookOptions,
}

impl Marker {
    /// Creates a marker of the given kind with default priority and arity.
    pub fn new(kind: HookKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            priority: DEFAULT_PRIORITY,
            accepted_args: DEFAULT_ACCEPTED_ARGS,
            options: HookOptions::default(),
        }
    }

    /// Creates an action marker.
    pub fn action(name: impl Into<String>) -> Self {
        Self::new(HookKind::Action, name)
    }

    /// Creates a filter marker.
    pub fn filter(name: impl Into<String>) -> Self {
        Self::new(HookKind::Filter, name)
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the number of accepted arguments.
    pub fn with_accepted_args(mut self, accepted_args: usize) -> Self {
        self.accepted_args = accepted_args;
        self
    }

    /// Sets the ref of the resulting registration.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.options = self.options.with_id(id);
        self
    }

    /// Replaces the options bag.
    pub fn with_options(mut self, options: HookOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn accepted_args(&self) -> usize {
        self.accepted_args
    }

    pub fn options(&self) -> &HookOptions {
        &self.options
    }
}
