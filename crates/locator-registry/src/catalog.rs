// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service catalog scanned first by the resolution chain.
//!
//! The `ServiceCatalog` stores, per capability name, the implementation class
//! names announced for it. Scanning constructs the first one through the
//! caller's class loader; the others are never touched.

use std::collections::HashMap;
use std::path::Path;

use locator_core::{Capability, ClassLoader, Instance, LocatorError, ServiceRegistry};
use tracing::debug;

use crate::descriptor::{parse_service_descriptor, parse_service_file};

/// Registry of announced implementations keyed by capability name.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: HashMap<String, Vec<String>>,
}

impl ServiceCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce an implementation of `capability`.
    ///
    /// Implementations keep registration order; announcing the same class
    /// twice has no effect.
    pub fn register(&mut self, capability: impl Into<String>, class_name: impl Into<String>) {
        let providers = self.entries.entry(capability.into()).or_default();
        let class_name = class_name.into();
        if !providers.contains(&class_name) {
            providers.push(class_name);
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_provider(mut self, capability: impl Into<String>, class_name: impl Into<String>) -> Self {
        self.register(capability, class_name);
        self
    }

    /// Register every service of a `services.toml` descriptor.
    pub fn register_descriptor(&mut self, toml_content: &str) -> Result<usize, LocatorError> {
        let descriptors = parse_service_descriptor(toml_content)?;
        let mut added = 0;
        for descriptor in descriptors {
            for provider in descriptor.providers {
                self.register(descriptor.capability.clone(), provider);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Register the providers listed in a per-capability service file.
    pub fn register_service_file(
        &mut self,
        capability: impl Into<String>,
        content: &str,
    ) -> Result<usize, LocatorError> {
        let capability = capability.into();
        let providers = parse_service_file(content)?;
        let count = providers.len();
        for provider in providers {
            self.register(capability.clone(), provider);
        }
        Ok(count)
    }

    /// Register every service file in a directory; file names are capability names.
    ///
    /// A missing directory registers nothing.
    pub fn load_service_dir(&mut self, dir: &Path) -> Result<usize, LocatorError> {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(LocatorError::ConfigFile {
                    path: dir.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        let mut added = 0;
        for entry in read_dir {
            let entry = entry.map_err(|e| LocatorError::ConfigFile {
                path: dir.to_path_buf(),
                source: Box::new(e),
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(capability) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let content = std::fs::read_to_string(&path).map_err(|e| LocatorError::ConfigFile {
                path: path.clone(),
                source: Box::new(e),
            })?;
            added += self.register_service_file(capability, &content)?;
        }
        debug!(dir = %dir.display(), providers = added, "loaded service files");
        Ok(added)
    }

    /// Implementations announced for a capability, in priority order.
    pub fn providers(&self, capability: &str) -> &[String] {
        self.entries
            .get(capability)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All capability names, sorted.
    pub fn capabilities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of capabilities with at least one announcement.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is announced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ServiceRegistry for ServiceCatalog {
    fn first_provider(
        &self,
        capability: &Capability,
        loader: &ClassLoader,
    ) -> Result<Option<Instance>, LocatorError> {
        let Some(class_name) = self.providers(&capability.name).first() else {
            return Ok(None);
        };
        debug!(
            capability = %capability,
            class_name = %class_name,
            loader = loader.name(),
            "service catalog names provider"
        );
        loader
            .load_class(class_name)
            .and_then(|entry| entry.new_instance(capability))
            .map(Some)
            .map_err(|e| LocatorError::Lookup {
                capability: capability.name.clone(),
                source: Box::new(e),
            })
    }
}
