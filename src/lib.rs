//! # codex
//!
//! Plugin bootstrapping core for a content-management host. Provides:
//!
//! - A callback registry that subscribes callbacks to the host event bus
//!   and finds them again by ref, identity, or callback
//! - Declarative registration from per-type hook manifests
//! - A settings overlay that supplies option defaults and validates option
//!   writes before they are stored
//! - Configuration loading and logging setup

pub mod prelude;

pub use codex_core;
pub use codex_hooks;
pub use codex_settings;

pub use codex_core::{AppError, AppResult, ErrorKind};
pub use codex_hooks::{Hook, HookOptions, Hookable};
pub use codex_settings::{Registry, Setting};
