//! Option definitions.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use codex_core::error::AppError;
use codex_core::result::AppResult;

use crate::validator::Constraint;

/// Priority of the option lifecycle subscriptions when none is given.
pub const DEFAULT_SETTING_PRIORITY: i32 = 73;

/// Stored value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Boolean,
    Integer,
    Number,
    Array,
    Object,
}

/// Exposure of an option on the host's API surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ApiVisibility {
    /// Not exposed.
    Hidden,
    /// Exposed with the schema derived from the value type.
    #[default]
    Visible,
    /// Exposed with an explicit schema.
    Schema { name: String, schema: Value },
}

impl ApiVisibility {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl Serialize for ApiVisibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Hidden => serializer.serialize_bool(false),
            Self::Visible => serializer.serialize_bool(true),
            Self::Schema { name, schema } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("schema", schema)?;
                map.end()
            }
        }
    }
}

/// Metadata handed to the option store when an option is registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingArgs {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub show_in_rest: ApiVisibility,
}

/// A single option: its name, type, default, and constraints.
///
/// Builder methods consume and return the setting, so a shared base can be
/// cloned and varied without touching the original.
#[derive(Clone)]
pub struct Setting {
    name: String,
    value_type: ValueType,
    default: Value,
    priority: i32,
    constraints: Vec<Constraint>,
    label: Option<String>,
    description: Option<String>,
    api: ApiVisibility,
}

impl Setting {
    /// Creates a setting. Fails when `name` is blank.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> AppResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(AppError::invalid_argument("Option name must not be blank."));
        }

        Ok(Self {
            name,
            value_type,
            default: Value::Null,
            priority: DEFAULT_SETTING_PRIORITY,
            constraints: Vec::new(),
            label: None,
            description: None,
            api: ApiVisibility::default(),
        })
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Exposes the option on the host API with an explicit schema.
    pub fn api_schema(mut self, schema: Value) -> Self {
        self.api = ApiVisibility::Schema {
            name: self.name.clone(),
            schema,
        };
        self
    }

    /// Keeps the option off the host API.
    pub fn hidden_from_api(mut self) -> Self {
        self.api = ApiVisibility::Hidden;
        self
    }

    /// Replaces the constraint list.
    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn api(&self) -> &ApiVisibility {
        &self.api
    }

    /// Builds the registration metadata for the option store.
    pub fn setting_args(&self) -> SettingArgs {
        SettingArgs {
            value_type: self.value_type,
            default: self.default.clone(),
            description: self.description.clone(),
            label: self.label.clone(),
            show_in_rest: self.api.clone(),
        }
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("default", &self.default)
            .field("priority", &self.priority)
            .field("constraints", &self.constraints.len())
            .field("api", &self.api)
            .finish()
    }
}
