//! Prelude for convenient imports.

pub use codex_core::config::{AppConfig, AppSection, LoggingConfig};
pub use codex_core::logging::init_logging;
pub use codex_core::{AppError, AppResult, ErrorKind};

pub use codex_hooks::{
    Callback, CallbackResult, DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, Dispatcher, Hook, HookKind,
    HookOptions, HookRef, HookTable, Hookable, Hooked, Marker, MemoryDispatcher, MethodDecl,
    MethodKind, Subscriber, Visibility,
};

pub use codex_settings::{
    ApiVisibility, InputValidator, MemoryOptions, OptionStorage, Registry, Setting,
    SettingRegistrar, ValueType, Verdict, constraint,
};

pub use codex_hooks::hook_table;
