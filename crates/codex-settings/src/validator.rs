//! Option value constraints.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use codex_core::error::AppError;
use codex_core::result::AppResult;

/// Outcome of a single constraint check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value passes this constraint.
    Accept,
    /// The value fails with the generic message.
    Reject,
    /// The value fails with a custom message.
    RejectWith(String),
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid { Self::Accept } else { Self::Reject }
    }
}

impl From<String> for Verdict {
    fn from(message: String) -> Self {
        if message.trim().is_empty() {
            Self::Accept
        } else {
            Self::RejectWith(message)
        }
    }
}

impl From<&str> for Verdict {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Self::Accept
    }
}

/// A predicate over a proposed option value.
pub type Constraint = Arc<dyn Fn(&Value) -> Verdict + Send + Sync>;

/// Wraps a closure returning anything convertible to a [`Verdict`].
///
/// ```rust,ignore
/// let not_empty = constraint(|v| v.as_str() != Some(""));
/// let short = constraint(|v| match v.as_str() {
///     Some(s) if s.len() > 10 => "Too long.".to_string(),
///     _ => String::new(),
/// });
/// ```
pub fn constraint<F, V>(check: F) -> Constraint
where
    F: Fn(&Value) -> V + Send + Sync + 'static,
    V: Into<Verdict>,
{
    Arc::new(move |value| check(value).into())
}

/// Runs an ordered list of constraints against values of one option.
#[derive(Clone)]
pub struct InputValidator {
    option_name: String,
    constraints: Vec<Constraint>,
}

impl InputValidator {
    pub fn new(option_name: impl Into<String>) -> Self {
        Self {
            option_name: option_name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    /// Checks `value` against every constraint, stopping at the first
    /// failure.
    pub fn validate(&self, value: &Value) -> AppResult<()> {
        for check in &self.constraints {
            let message = match check(value) {
                Verdict::Accept => continue,
                Verdict::RejectWith(message) if message.trim().is_empty() => continue,
                Verdict::RejectWith(message) => message,
                Verdict::Reject => "Invalid value.".to_string(),
            };

            warn!(option = %self.option_name, reason = %message, "Option value rejected");

            return Err(AppError::validation(format!(
                "[{}] {message}",
                self.option_name
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for InputValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputValidator")
            .field("option_name", &self.option_name)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}
