//! Application identity configuration.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Identity of the plugin application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppSection {
    /// Application name. Used as the root of setting group names.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Translation text domain.
    #[serde(default)]
    pub text_domain: Option<String>,
    /// Prefix prepended to every option name, e.g. `codex_`.
    #[serde(default)]
    pub option_prefix: String,
}

impl AppSection {
    /// Creates an app section with the given name and no prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text_domain: None,
            option_prefix: String::new(),
        }
    }

    /// Sets the option prefix.
    pub fn with_option_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.option_prefix = prefix.into();
        self
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("The app \"name\" is required and cannot be empty.".into());
        return Err(err);
    }
    Ok(())
}
