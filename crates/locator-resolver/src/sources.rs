// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property sources consulted by the property strategy.

use std::collections::HashMap;
use std::env::VarError;

use locator_core::{LocatorError, PropertySource};

/// In-memory properties.
#[derive(Debug, Clone, Default)]
pub struct MapProperties {
    values: HashMap<String, String>,
}

impl MapProperties {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set a property, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PropertySource for MapProperties {
    fn property(&self, key: &str) -> Result<Option<String>, LocatorError> {
        Ok(self.values.get(key).cloned())
    }
}

/// Properties read from the process environment.
///
/// A key is looked up verbatim first, then in its shell-friendly form:
/// upper-cased with `.` and `-` replaced by `_`, so `com.example.Foo` may be
/// set as `COM_EXAMPLE_FOO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProperties;

impl EnvProperties {
    /// Shell-friendly variable name for a property key.
    pub fn variable_name(key: &str) -> String {
        key.to_uppercase().replace(['.', '-'], "_")
    }
}

impl PropertySource for EnvProperties {
    fn property(&self, key: &str) -> Result<Option<String>, LocatorError> {
        let read = |name: &str| match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(LocatorError::Property {
                key: key.to_string(),
                reason: format!("environment variable {name} is not valid unicode"),
            }),
        };

        if let Some(value) = read(key)? {
            return Ok(Some(value));
        }
        let mangled = Self::variable_name(key);
        if mangled == key {
            return Ok(None);
        }
        read(&mangled)
    }
}
