//! Declarative registration: turns a type's hook manifest into registry
//! subscriptions.

use std::sync::Arc;

use tracing::debug;

use codex_core::result::AppResult;

use crate::callback::{Callback, Subscriber};
use crate::hook::Hook;
use crate::marker::Marker;

/// Prefix reserved for lifecycle dispatch methods.
const RESERVED_PREFIX: &str = "__";

/// Visibility of a declared method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Role of a declared method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodKind {
    #[default]
    Regular,
    Constructor,
    Destructor,
}

/// A method of a hooked type together with its markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Method name, also the bound method's dispatch name.
    pub name: String,
    /// Only public methods are hooked.
    pub visibility: Visibility,
    /// Constructors and destructors are never hooked.
    pub kind: MethodKind,
    /// Abstract methods have no body to call and are skipped.
    pub is_abstract: bool,
    /// Subscriptions declared on the method.
    pub markers: Vec<Marker>,
}

impl MethodDecl {
    /// Declares a public, concrete, regular method.
    pub fn new(name: impl Into<String>, markers: Vec<Marker>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::default(),
            kind: MethodKind::default(),
            is_abstract: false,
            markers,
        }
    }

    /// Sets the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the method as a constructor, destructor or regular method.
    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the method as abstract.
    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Whether markers on this method produce subscriptions.
    pub fn is_hookable(&self) -> bool {
        self.visibility == Visibility::Public
            && self.kind == MethodKind::Regular
            && !self.is_abstract
            && !self.name.starts_with(RESERVED_PREFIX)
    }
}

/// Hook manifest of a type: markers on the type itself and on its methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookTable {
    class_markers: Vec<Marker>,
    methods: Vec<MethodDecl>,
}

impl HookTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type-level marker.
    pub fn on_class(mut self, marker: Marker) -> Self {
        self.class_markers.push(marker);
        self
    }

    /// Declares a public regular method carrying `markers`.
    pub fn method(self, name: impl Into<String>, markers: Vec<Marker>) -> Self {
        self.declare(MethodDecl::new(name, markers))
    }

    /// Adds a full method declaration.
    pub fn declare(mut self, decl: MethodDecl) -> Self {
        self.methods.push(decl);
        self
    }

    /// Markers declared on the type itself.
    pub fn class_markers(&self) -> &[Marker] {
        &self.class_markers
    }

    /// Declared methods, in declaration order.
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    /// Whether the table carries no markers at all.
    pub fn is_empty(&self) -> bool {
        self.class_markers.is_empty() && self.methods.iter().all(|m| m.markers.is_empty())
    }
}

/// A subscriber that declares its own subscriptions.
pub trait Hooked: Subscriber {
    /// Returns the hook manifest of this type.
    fn hook_table(&self) -> HookTable;
}

/// Registers the markers of one target against a [`Hook`].
pub struct Parser<T: Hooked> {
    target: Arc<T>,
}

impl<T: Hooked> Parser<T> {
    /// Creates a parser for `target`. Every callback it builds shares `target`.
    pub fn new(target: Arc<T>) -> Self {
        Self { target }
    }

    /// Registers every applicable marker of the target.
    ///
    /// Stops at the first registration error. Subscriptions made before the
    /// failure stay in place.
    pub fn parse(&self, hook: &mut Hook) -> AppResult<()> {
        let table = self.target.hook_table();

        if table.is_empty() {
            return Ok(());
        }

        let mut count = 0usize;

        if self.target.is_invocable() {
            for marker in table.class_markers() {
                let target: Arc<dyn Subscriber> = self.target.clone();
                Self::subscribe(hook, marker, Callback::object(target))?;
                count += 1;
            }
        }

        for decl in table.methods().iter().filter(|m| m.is_hookable()) {
            for marker in &decl.markers {
                let target: Arc<dyn Subscriber> = self.target.clone();
                Self::subscribe(hook, marker, Callback::method(target, decl.name.as_str()))?;
                count += 1;
            }
        }

        debug!(
            class = %self.target.class_name(),
            subscriptions = count,
            "Parsed hook markers"
        );

        Ok(())
    }

    fn subscribe(hook: &mut Hook, marker: &Marker, callback: Callback) -> AppResult<()> {
        hook.add(
            marker.kind(),
            marker.name(),
            callback,
            marker.priority(),
            marker.accepted_args(),
            marker.options().clone(),
        )
    }
}
