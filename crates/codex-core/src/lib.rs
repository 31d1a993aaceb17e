//! # codex-core
//!
//! Core crate for codex. Contains the unified error system, the
//! application configuration schema and logging initialization.
//!
//! This crate has **no** internal dependencies on other codex crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
