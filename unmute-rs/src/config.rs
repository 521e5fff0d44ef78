//! Add-on configuration record and its host schema.
//!
//! The host persists configuration; this module only declares the schema it
//! validates against and turns a raw stored section into a complete
//! [`UnmuteConfig`], falling back to per-field defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Namespace key of the add-on section in the host configuration store.
pub const CONFIG_NAMESPACE: &str = "unmute";

/// Default values for every configuration field.
pub mod defaults {
    pub const MAX: bool = true;
    pub const VOLUME: u8 = 90;
    pub const MINLEVEL: u8 = 20;
    pub const REINIT: bool = true;
    pub const RETRIES: u32 = 0;

    /// Upper bound accepted for `retries`.
    pub const RETRIES_LIMIT: u32 = 10_000_000;
}

/// The add-on configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmuteConfig {
    /// Restore to 100% instead of `volume`
    pub max: bool,

    /// Target volume percentage used when `max` is false (0-100)
    pub volume: u8,

    /// Volume percentage below which the unmuter raises the level (0-100)
    pub minlevel: u8,

    /// Run the synthesizer reinitializer at startup
    pub reinit: bool,

    /// Maximum reinitialization attempts, 0 means unlimited
    pub retries: u32,
}

impl Default for UnmuteConfig {
    fn default() -> Self {
        Self {
            max: defaults::MAX,
            volume: defaults::VOLUME,
            minlevel: defaults::MINLEVEL,
            reinit: defaults::REINIT,
            retries: defaults::RETRIES,
        }
    }
}

impl UnmuteConfig {
    /// Build a complete record from the raw section stored by the host.
    ///
    /// Missing fields take their default. Fields of the wrong type or out of
    /// range are logged and also take their default, so the result always
    /// holds all five fields.
    pub fn from_section(section: Option<&Value>) -> Self {
        let empty = Map::new();
        let map = match section {
            Some(Value::Object(map)) => map,
            Some(other) => {
                warn!(section = %other, "Configuration section is not an object, using defaults");
                &empty
            }
            None => &empty,
        };

        let schema = ConfigSchema::unmute();
        Self {
            max: schema.resolve("max", map).as_bool(),
            volume: schema.resolve("volume", map).as_int() as u8,
            minlevel: schema.resolve("minlevel", map).as_int() as u8,
            reinit: schema.resolve("reinit", map).as_bool(),
            retries: schema.resolve("retries", map).as_int() as u32,
        }
    }

    /// Serialize all five fields for the host store.
    pub fn to_section(&self) -> Value {
        json!({
            "max": self.max,
            "volume": self.volume,
            "minlevel": self.minlevel,
            "reinit": self.reinit,
            "retries": self.retries,
        })
    }

    /// Volume scalar the unmuter restores to.
    pub fn volume_fraction(&self) -> f32 {
        if self.max {
            1.0
        } else {
            f32::from(self.volume.min(100)) / 100.0
        }
    }
}

/// A validated field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
}

impl FieldValue {
    fn as_bool(self) -> bool {
        match self {
            FieldValue::Bool(b) => b,
            FieldValue::Int(n) => n != 0,
        }
    }

    fn as_int(self) -> i64 {
        match self {
            FieldValue::Int(n) => n,
            FieldValue::Bool(b) => i64::from(b),
        }
    }
}

/// Why a stored value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: String,
    },

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// Type and bounds of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Boolean { default: bool },
    Integer { default: i64, min: i64, max: i64 },
}

impl FieldSpec {
    pub fn default_value(&self) -> FieldValue {
        match *self {
            FieldSpec::Boolean { default } => FieldValue::Bool(default),
            FieldSpec::Integer { default, .. } => FieldValue::Int(default),
        }
    }

    /// Validate a stored value. The host may store values as text, so
    /// boolean and integer strings are accepted too.
    pub fn check(&self, raw: &Value) -> Result<FieldValue, FieldError> {
        match *self {
            FieldSpec::Boolean { .. } => match raw {
                Value::Bool(b) => Ok(FieldValue::Bool(*b)),
                Value::String(s) => parse_bool(s).map(FieldValue::Bool).ok_or_else(|| {
                    FieldError::WrongType {
                        expected: "boolean",
                        found: raw.to_string(),
                    }
                }),
                _ => Err(FieldError::WrongType {
                    expected: "boolean",
                    found: raw.to_string(),
                }),
            },
            FieldSpec::Integer { min, max, .. } => {
                let value = match raw {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or_else(|| FieldError::WrongType {
                    expected: "integer",
                    found: raw.to_string(),
                })?;

                if (min..=max).contains(&value) {
                    Ok(FieldValue::Int(value))
                } else {
                    Err(FieldError::OutOfRange { value, min, max })
                }
            }
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Boolean { default } => write!(f, "boolean(default={})", default),
            FieldSpec::Integer { default, min, max } => {
                write!(f, "integer(default={},min={},max={})", default, min, max)
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Ordered field specifications registered with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSchema {
    fields: Vec<(&'static str, FieldSpec)>,
}

impl ConfigSchema {
    /// Schema of the add-on section.
    pub fn unmute() -> Self {
        Self {
            fields: vec![
                ("max", FieldSpec::Boolean { default: defaults::MAX }),
                (
                    "volume",
                    FieldSpec::Integer {
                        default: i64::from(defaults::VOLUME),
                        min: 0,
                        max: 100,
                    },
                ),
                (
                    "minlevel",
                    FieldSpec::Integer {
                        default: i64::from(defaults::MINLEVEL),
                        min: 0,
                        max: 100,
                    },
                ),
                ("reinit", FieldSpec::Boolean { default: defaults::REINIT }),
                (
                    "retries",
                    FieldSpec::Integer {
                        default: i64::from(defaults::RETRIES),
                        min: 0,
                        max: i64::from(defaults::RETRIES_LIMIT),
                    },
                ),
            ],
        }
    }

    pub fn fields(&self) -> &[(&'static str, FieldSpec)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, spec)| spec)
    }

    /// Schema in host validator notation, keyed by field name.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, spec)| (name.to_string(), Value::String(spec.to_string())))
            .collect();
        Value::Object(map)
    }

    fn resolve(&self, name: &str, section: &Map<String, Value>) -> FieldValue {
        let Some(spec) = self.field(name) else {
            return FieldValue::Int(0);
        };

        match section.get(name) {
            None => spec.default_value(),
            Some(raw) => spec.check(raw).unwrap_or_else(|e| {
                warn!(field = name, error = %e, "Invalid configuration value, using default");
                spec.default_value()
            }),
        }
    }
}
