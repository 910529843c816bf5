// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service descriptor parsing.
//!
//! Two formats announce implementations of a capability:
//! - `services.toml` descriptors listing several capabilities at once;
//! - per-capability service files, one class name per line with `#` comments.

use locator_core::LocatorError;
use serde::{Deserialize, Serialize};

/// Implementations announced for one capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Fully-qualified capability name.
    pub capability: String,
    /// Implementation class names, in priority order.
    pub providers: Vec<String>,
}

/// Intermediate TOML deserialization struct for `services.toml`.
#[derive(Debug, Deserialize)]
struct ServiceDescriptorFile {
    #[serde(default)]
    service: Vec<ServiceSection>,
}

/// One `[[service]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceSection {
    capability: String,
    #[serde(default)]
    providers: Vec<String>,
}

/// Parse a `services.toml` descriptor.
///
/// Validates that every capability and provider name is non-empty and free
/// of whitespace.
pub fn parse_service_descriptor(toml_content: &str) -> Result<Vec<ServiceDescriptor>, LocatorError> {
    let file: ServiceDescriptorFile = toml::from_str(toml_content)
        .map_err(|e| LocatorError::Config(format!("invalid service descriptor: {e}")))?;

    file.service
        .into_iter()
        .map(|section| {
            if !is_class_name(&section.capability) {
                return Err(LocatorError::Config(format!(
                    "service descriptor: invalid capability name '{}'",
                    section.capability
                )));
            }
            if let Some(bad) = section.providers.iter().find(|p| !is_class_name(p)) {
                return Err(LocatorError::Config(format!(
                    "service descriptor: invalid provider name '{bad}' for {}",
                    section.capability
                )));
            }
            Ok(ServiceDescriptor {
                capability: section.capability,
                providers: section.providers,
            })
        })
        .collect()
}

/// Parse a per-capability service file.
///
/// Everything after `#` on a line is a comment; blank lines are skipped;
/// duplicates keep their first position.
pub fn parse_service_file(content: &str) -> Result<Vec<String>, LocatorError> {
    let mut providers: Vec<String> = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if !is_class_name(line) {
            return Err(LocatorError::Config(format!(
                "service file line {}: illegal provider-class name '{line}'",
                index + 1
            )));
        }
        if !providers.iter().any(|p| p == line) {
            providers.push(line.to_string());
        }
    }
    Ok(providers)
}

fn is_class_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.ends_with('.')
        && !name.chars().any(|c| c.is_whitespace() || c == ';')
}
