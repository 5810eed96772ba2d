use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Settings category, used for grouping on the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Monitoring,
    Alerting,
    Notifications,
    Thresholds,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Monitoring => "monitoring",
            Category::Alerting => "alerting",
            Category::Notifications => "notifications",
            Category::Thresholds => "thresholds",
        })
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monitoring" => Ok(Category::Monitoring),
            "alerting" => Ok(Category::Alerting),
            "notifications" => Ok(Category::Notifications),
            "thresholds" => Ok(Category::Thresholds),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

/// Type tag of a [`ConfigValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Select,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Select => "select",
        })
    }
}

impl ValueKind {
    /// Interpret raw text (a form field or a CLI argument) as input for a
    /// setting of this kind.
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, String> {
        match self {
            ValueKind::String | ValueKind::Select => Ok(FieldValue::Text(raw.to_string())),
            ValueKind::Number => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Number)
                .map_err(|_| format!("'{}' is not a number", raw)),
            ValueKind::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(FieldValue::Boolean(true)),
                "false" | "off" | "no" | "0" => Ok(FieldValue::Boolean(false)),
                _ => Err(format!("'{}' is not a boolean", raw)),
            },
        }
    }
}

/// A primitive value coming from a UI field edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// The typed value of a setting.
///
/// On the wire this is the `type` tag next to `value` (and `options` for
/// select settings), flattened into [`Configuration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConfigValue {
    String { value: String },
    Number { value: f64 },
    Boolean { value: bool },
    Select { value: String, options: Vec<String> },
}

impl ConfigValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::String { .. } => ValueKind::String,
            ConfigValue::Number { .. } => ValueKind::Number,
            ConfigValue::Boolean { .. } => ValueKind::Boolean,
            ConfigValue::Select { .. } => ValueKind::Select,
        }
    }

    /// Produce the value after writing `input`, or explain why it does not
    /// fit this setting.
    pub fn with_input(&self, input: &FieldValue) -> Result<ConfigValue, String> {
        match (self, input) {
            (ConfigValue::String { .. }, FieldValue::Text(s)) => {
                Ok(ConfigValue::String { value: s.clone() })
            }
            (ConfigValue::Number { .. }, FieldValue::Number(n)) => {
                if n.is_finite() {
                    Ok(ConfigValue::Number { value: *n })
                } else {
                    Err("number must be finite".to_string())
                }
            }
            (ConfigValue::Boolean { .. }, FieldValue::Boolean(b)) => {
                Ok(ConfigValue::Boolean { value: *b })
            }
            (ConfigValue::Select { options, .. }, FieldValue::Text(s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(ConfigValue::Select {
                        value: s.clone(),
                        options: options.clone(),
                    })
                } else {
                    Err(format!("'{}' is not one of [{}]", s, options.join(", ")))
                }
            }
            (current, other) => Err(format!(
                "expected a {} value, got '{}'",
                current.kind(),
                other
            )),
        }
    }

    /// The value a reset restores: `false`, `0`, an empty string, or the
    /// first option of a select.
    pub fn reset(&self) -> ConfigValue {
        match self {
            ConfigValue::String { .. } => ConfigValue::String {
                value: String::new(),
            },
            ConfigValue::Number { .. } => ConfigValue::Number { value: 0.0 },
            ConfigValue::Boolean { .. } => ConfigValue::Boolean { value: false },
            ConfigValue::Select { options, .. } => ConfigValue::Select {
                value: options.first().cloned().unwrap_or_default(),
                options: options.clone(),
            },
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            ConfigValue::Select { options, .. } => Some(options),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String { value } | ConfigValue::Select { value, .. } => {
                f.write_str(value)
            }
            ConfigValue::Number { value } => write!(f, "{}", value),
            ConfigValue::Boolean { value } => write!(f, "{}", value),
        }
    }
}

/// A single dashboard setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub id: String,
    pub category: Category,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub value: ConfigValue,
    /// Writes to `value` are refused when false
    pub editable: bool,
}
