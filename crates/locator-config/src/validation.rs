// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express, such
//! as file names without path separators and well-formed package prefixes.

use crate::diagnostic::ConfigError;
use crate::model::LocatorConfig;

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or every collected error
/// (does not fail fast).
pub fn validate_config(config: &LocatorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.resolver.install_root.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "resolver.install_root must not be empty".to_string(),
        });
    }

    let file = config.resolver.properties_file.trim();
    if file.is_empty() {
        errors.push(ConfigError::Validation {
            message: "resolver.properties_file must not be empty".to_string(),
        });
    } else if file.contains('/') || file.contains('\\') {
        errors.push(ConfigError::Validation {
            message: format!(
                "resolver.properties_file `{file}` must be a file name, not a path"
            ),
        });
    }

    if config.module.enabled {
        if config.module.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "module.name must not be empty when module.enabled is true".to_string(),
            });
        }
        if config.module.root.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "module.root must not be empty when module.enabled is true".to_string(),
            });
        }
    }

    for package in &config.security.restricted_packages {
        if !is_valid_package_prefix(package) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "security.restricted_packages entry `{package}` is not a package name"
                ),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// A package prefix: dot-separated identifiers, optionally ending in a dot.
fn is_valid_package_prefix(prefix: &str) -> bool {
    let body = prefix.strip_suffix('.').unwrap_or(prefix);
    !body.is_empty()
        && body.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}
