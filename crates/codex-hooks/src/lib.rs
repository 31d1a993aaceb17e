//! # codex-hooks
//!
//! Callback registry for a string-keyed, priority-ordered host event bus.
//! Provides:
//!
//! - Stable identities for every kind of callback
//! - Human-assigned refs so a registration can be removed without holding
//!   the original callable
//! - Bulk teardown of everything subscribed through one registry
//! - Declarative registration from a per-type hook manifest
//! - An in-memory host dispatcher

pub mod callback;
pub mod dispatcher;
pub mod hook;
pub mod host;
pub mod macros;
pub mod marker;
pub mod parser;
pub mod refs;

pub use callback::{Callback, CallbackFn, CallbackResult, Invoke, Subscriber};
pub use dispatcher::{Dispatcher, HookKind};
pub use hook::{
    DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, Hook, HookOptions, Hookable, Registration,
};
pub use host::MemoryDispatcher;
pub use marker::Marker;
pub use parser::{HookTable, Hooked, MethodDecl, MethodKind, Parser, Visibility};
pub use refs::{HookRef, RefStore};
