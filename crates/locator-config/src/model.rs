// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Locator provider lookup.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Locator configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocatorConfig {
    /// Installation layout and property sources.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Named-module resource lookup.
    #[serde(default)]
    pub module: ModuleConfig,

    /// Package access policy.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Installation layout and property source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Installation root holding `conf/` and the legacy `lib/` directory.
    #[serde(default = "default_install_root")]
    pub install_root: String,

    /// File name of the installation-wide properties file.
    #[serde(default = "default_properties_file")]
    pub properties_file: String,

    /// Read provider overrides from process environment variables.
    #[serde(default = "default_use_env_properties")]
    pub use_env_properties: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            install_root: default_install_root(),
            properties_file: default_properties_file(),
            use_env_properties: default_use_env_properties(),
        }
    }
}

impl ResolverConfig {
    /// Canonical location of the properties file: `<install_root>/conf/<file>`.
    pub fn properties_path(&self) -> PathBuf {
        PathBuf::from(&self.install_root)
            .join("conf")
            .join(&self.properties_file)
    }

    /// Legacy location kept for older installations: `<install_root>/lib/<file>`.
    pub fn legacy_properties_path(&self) -> PathBuf {
        PathBuf::from(&self.install_root)
            .join("lib")
            .join(&self.properties_file)
    }
}

fn default_install_root() -> String {
    "/usr/lib/locator".to_string()
}

fn default_properties_file() -> String {
    "locator.properties".to_string()
}

fn default_use_env_properties() -> bool {
    true
}

/// Named-module resource lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Consult the module system at all.
    #[serde(default)]
    pub enabled: bool,

    /// Directory containing one sub-directory per module.
    #[serde(default = "default_module_root")]
    pub root: String,

    /// Module whose service resources name implementations.
    #[serde(default = "default_module_name")]
    pub name: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            root: default_module_root(),
            name: default_module_name(),
        }
    }
}

fn default_module_root() -> String {
    "/usr/lib/locator/modules".to_string()
}

fn default_module_name() -> String {
    "org.locator.client".to_string()
}

/// Package access policy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Package prefixes that configured classes may not come from.
    /// The fallback class is exempt.
    #[serde(default)]
    pub restricted_packages: Vec<String>,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
