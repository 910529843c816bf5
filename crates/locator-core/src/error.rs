// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for provider lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used for causes coming from constructors and collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by every lookup operation.
///
/// Only [`NotFound`](LocatorError::NotFound), the instantiation failures of an
/// explicitly configured or fallback class, and
/// [`ContextUnavailable`](LocatorError::ContextUnavailable) ever reach a
/// caller of `find`. The remaining variants are produced by individual
/// strategies and logged where they occur.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// No strategy produced a provider and no fallback was given.
    #[error("Provider for {capability} cannot be found")]
    NotFound { capability: String },

    /// The named class is not known to the class loader.
    #[error("Provider {class_name} not found")]
    LoadFailure {
        class_name: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The class was found but constructing it failed.
    #[error("Provider {class_name} could not be instantiated: {reason}")]
    InstantiationFailure {
        class_name: String,
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The access policy denied loading a class that is not the trusted default.
    #[error("access denied to package {package} for provider {class_name}")]
    AccessDenied { class_name: String, package: String },

    /// The calling thread's loading context could not be determined.
    #[error("loading context unavailable: {reason}")]
    ContextUnavailable { reason: String },

    /// The service registry failed while being scanned.
    #[error("Error while searching for service [{capability}]")]
    Lookup {
        capability: String,
        #[source]
        source: BoxError,
    },

    /// The installation properties file could not be read or parsed.
    #[error("error reading provider configuration from [{}]", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// A property could not be read from the property source.
    #[error("property `{key}` is not readable: {reason}")]
    Property { key: String, reason: String },

    /// Invalid locator configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LocatorError {
    /// Shorthand for a [`LoadFailure`](LocatorError::LoadFailure) without a cause.
    pub fn load_failure(class_name: impl Into<String>) -> Self {
        LocatorError::LoadFailure {
            class_name: class_name.into(),
            source: None,
        }
    }

    /// Build an [`InstantiationFailure`](LocatorError::InstantiationFailure) keeping the cause.
    pub fn instantiation(class_name: impl Into<String>, source: BoxError) -> Self {
        LocatorError::InstantiationFailure {
            class_name: class_name.into(),
            reason: source.to_string(),
            source: Some(source),
        }
    }
}
