// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./locator.toml` > `~/.config/locator/locator.toml` > `/etc/locator/locator.toml`
//! with environment variable overrides via `LOCATOR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LocatorConfig;

/// Path of the system-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/locator/locator.toml";

/// File name looked up in the working directory and the XDG config directory.
pub const LOCAL_CONFIG_FILE: &str = "locator.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/locator/locator.toml` (system-wide)
/// 3. `~/.config/locator/locator.toml` (user XDG config)
/// 4. `./locator.toml` (local directory)
/// 5. `LOCATOR_*` environment variables
pub fn load_config() -> Result<LocatorConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LocatorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LocatorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LocatorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LocatorConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LocatorConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("locator").join(LOCAL_CONFIG_FILE))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `LOCATOR_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LOCATOR_RESOLVER_INSTALL_ROOT` is `resolver.install_root`.
fn env_provider() -> Env {
    Env::prefixed("LOCATOR_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("resolver_", "resolver.", 1)
            .replacen("module_", "module.", 1)
            .replacen("security_", "security.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
