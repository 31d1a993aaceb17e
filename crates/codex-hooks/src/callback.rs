//! Callable values and their bookkeeping identities.
//!
//! A [`Callback`] is a cheap handle: cloning it clones the `Arc` (or fn
//! pointer) it wraps, never the callable itself.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use codex_core::error::AppError;
use codex_core::result::AppResult;

/// Result returned by every callback invocation.
///
/// Filters return the replacement value; actions return `Value::Null`.
pub type CallbackResult = AppResult<Value>;

/// Plain function signature used by named and static callbacks.
pub type CallbackFn = fn(&[Value]) -> CallbackResult;

/// Anything that can be invoked with host-supplied arguments.
pub trait Invoke: Send + Sync {
    /// Invokes the callable.
    fn invoke(&self, args: &[Value]) -> CallbackResult;
}

impl<F> Invoke for F
where
    F: Fn(&[Value]) -> CallbackResult + Send + Sync,
{
    fn invoke(&self, args: &[Value]) -> CallbackResult {
        self(args)
    }
}

/// An object whose methods can be registered as callbacks.
///
/// Implementors route `call` to their methods by name. Types that expose a
/// conventional call entry point return `true` from `is_invocable` and
/// implement `invoke`.
pub trait Subscriber: Send + Sync + 'static {
    /// The runtime class name used for method identities.
    fn class_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Invokes the named method.
    fn call(&self, method: &str, args: &[Value]) -> CallbackResult;

    /// Whether the object itself can be used as a callback.
    fn is_invocable(&self) -> bool {
        false
    }

    /// Invokes the object itself.
    fn invoke(&self, _args: &[Value]) -> CallbackResult {
        Err(AppError::callback(format!(
            "{} is not invocable",
            self.class_name()
        )))
    }
}

/// A function to invoke when a hook fires.
#[derive(Clone)]
pub enum Callback {
    /// A bare named function.
    Function {
        /// Function name.
        name: String,
        /// Function body.
        func: CallbackFn,
    },
    /// A method bound to a subscriber instance.
    Method {
        /// The instance.
        target: Arc<dyn Subscriber>,
        /// Method name.
        method: String,
    },
    /// An unbound `Class::method` pair.
    Static {
        /// Class name.
        class: String,
        /// Method name.
        method: String,
        /// Method body.
        func: CallbackFn,
    },
    /// An anonymous closure.
    Closure(Arc<dyn Invoke>),
    /// An invocable subscriber used as a callback on its own.
    Object(Arc<dyn Subscriber>),
}

impl Callback {
    /// Creates a named function callback.
    pub fn function(name: impl Into<String>, func: CallbackFn) -> Self {
        Self::Function {
            name: name.into(),
            func,
        }
    }

    /// Creates a callback bound to `target`'s `method`.
    pub fn method(target: Arc<dyn Subscriber>, method: impl Into<String>) -> Self {
        Self::Method {
            target,
            method: method.into(),
        }
    }

    /// Creates an unbound `Class::method` callback.
    pub fn static_method(
        class: impl Into<String>,
        method: impl Into<String>,
        func: CallbackFn,
    ) -> Self {
        Self::Static {
            class: class.into(),
            method: method.into(),
            func,
        }
    }

    /// Creates a closure callback.
    pub fn closure<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self::Closure(Arc::new(func))
    }

    /// Creates a callback invoking `target` itself.
    pub fn object(target: Arc<dyn Subscriber>) -> Self {
        Self::Object(target)
    }

    /// Computes the bookkeeping identity of this callback.
    ///
    /// Stable for the same callable. Bound methods are identified by the
    /// runtime class of their instance, so two instances of one type share
    /// an identity. Closures and invocable objects are identified per
    /// allocation and never compare equal to another instance.
    pub fn identity(&self) -> String {
        match self {
            Self::Function { name, .. } => name.clone(),
            Self::Static { class, method, .. } => format!("{class}::{method}"),
            Self::Method { target, method } => format!("{}::{method}", target.class_name()),
            Self::Closure(func) => format!("closure@{:#x}", addr_of(func)),
            Self::Object(target) => format!("{}@{:#x}", target.class_name(), addr_of(target)),
        }
    }

    /// Computes the key a host uses to compare callbacks.
    ///
    /// Unlike [`identity`](Self::identity), bound methods are keyed by
    /// instance so two instances of one type never collide.
    pub fn dispatch_key(&self) -> String {
        match self {
            Self::Method { target, method } => format!("{:#x}::{method}", addr_of(target)),
            _ => self.identity(),
        }
    }

    /// Invokes the callback.
    pub fn invoke(&self, args: &[Value]) -> CallbackResult {
        match self {
            Self::Function { func, .. } | Self::Static { func, .. } => func(args),
            Self::Method { target, method } => target.call(method, args),
            Self::Closure(func) => func.invoke(args),
            Self::Object(target) => target.invoke(args),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.identity()).finish()
    }
}

fn addr_of<T: ?Sized>(value: &Arc<T>) -> usize {
    Arc::as_ptr(value) as *const () as usize
}
