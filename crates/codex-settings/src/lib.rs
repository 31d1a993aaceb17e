//! # codex-settings
//!
//! Option definitions and their validation overlay on the host option
//! store. Each [`Setting`] registered through a [`Registry`] gets its
//! default supplied, its writes validated, and its metadata announced,
//! all through refs on a [`codex_hooks::Hook`] so it can be withdrawn
//! again.

pub mod registrar;
pub mod registry;
pub mod setting;
pub mod storage;
pub mod validator;

pub use registrar::SettingRegistrar;
pub use registry::Registry;
pub use setting::{ApiVisibility, DEFAULT_SETTING_PRIORITY, Setting, SettingArgs, ValueType};
pub use storage::{MemoryOptions, OptionStorage, RegisteredOption};
pub use validator::{Constraint, InputValidator, Verdict, constraint};
