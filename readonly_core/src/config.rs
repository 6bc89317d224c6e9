// readonly_core/src/config.rs

//! The per-instance configuration document handed to a reporting session.
//!
//! The bridge only parses and transports it. What the keys mean is up to the
//! session that reads it.

use figment::{
    providers::{Format, Serialized, Toml},
    value::{Dict, Tag, Value},
    Figment,
};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument(Value);

impl Default for ConfigDocument {
    fn default() -> Self {
        Self(Value::Dict(Tag::Default, Dict::new()))
    }
}

impl ConfigDocument {
    /// Parses TOML text. An absent or blank document is an empty dictionary.
    pub fn parse(source: Option<&str>) -> Result<Self, figment::Error> {
        match source {
            Some(text) if !text.trim().is_empty() => Figment::new()
                .merge(Toml::string(text))
                .extract::<Value>()
                .map(Self),
            _ => Ok(Self::default()),
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_dict().map_or(true, Dict::is_empty)
    }

    /// Looks up a dotted key path (e.g. `"map.level"`) and returns it if it is a string.
    pub fn find_str(&self, path: &str) -> Option<&str> {
        self.0.find_ref(path).and_then(Value::as_str)
    }

    /// Deserializes the whole document into a typed settings struct.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, figment::Error> {
        Figment::from(Serialized::defaults(&self.0)).extract()
    }
}
