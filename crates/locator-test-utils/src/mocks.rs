// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock collaborators for the resolution chain.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use locator_core::{
    BoxError, Capability, ClassLoader, ContextSource, ExternalRegistry, Instance, LocatorError,
    ModuleSystem, Module, PropertySource, ServiceRegistry,
};

/// Property source that counts reads and can fail for chosen keys.
#[derive(Debug, Default)]
pub struct RecordingProperties {
    values: HashMap<String, String>,
    unreadable: Vec<String>,
    reads: AtomicUsize,
}

impl RecordingProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Make reads of `key` fail as if access were denied.
    pub fn unreadable(mut self, key: impl Into<String>) -> Self {
        self.unreadable.push(key.into());
        self
    }

    /// Number of reads so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl PropertySource for RecordingProperties {
    fn property(&self, key: &str) -> Result<Option<String>, LocatorError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.unreadable.iter().any(|k| k == key) {
            return Err(LocatorError::Property {
                key: key.to_string(),
                reason: "access denied".to_string(),
            });
        }
        Ok(self.values.get(key).cloned())
    }
}

/// Service registry whose scan always fails.
#[derive(Debug, Default)]
pub struct FailingRegistry {
    scans: AtomicUsize,
}

impl FailingRegistry {
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl ServiceRegistry for FailingRegistry {
    fn first_provider(
        &self,
        capability: &Capability,
        _loader: &ClassLoader,
    ) -> Result<Option<Instance>, LocatorError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        Err(LocatorError::Lookup {
            capability: capability.name.clone(),
            source: "registry index corrupted".into(),
        })
    }
}

type InstanceFactory = Box<dyn Fn() -> Vec<Instance> + Send + Sync>;

/// External registry returning instances built by a factory.
pub struct StaticExternalRegistry {
    factory: InstanceFactory,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticExternalRegistry {
    pub fn new(factory: impl Fn() -> Vec<Instance> + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registry that never knows any provider.
    pub fn empty() -> Self {
        Self::new(Vec::new)
    }

    /// Capability names looked up so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ExternalRegistry for StaticExternalRegistry {
    fn name(&self) -> &str {
        "static"
    }

    fn lookup_provider_instances(&self, capability: &Capability) -> Result<Vec<Instance>, BoxError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(capability.name.clone());
        }
        Ok((self.factory)())
    }
}

/// External registry that is always unavailable.
#[derive(Debug, Default)]
pub struct FailingExternal;

impl ExternalRegistry for FailingExternal {
    fn name(&self) -> &str {
        "failing"
    }

    fn lookup_provider_instances(&self, _capability: &Capability) -> Result<Vec<Instance>, BoxError> {
        Err("external registry offline".into())
    }
}

/// Module system that fails to load any module.
#[derive(Debug, Default)]
pub struct FailingModules;

impl ModuleSystem for FailingModules {
    fn load_module(&self, name: &str) -> Result<Option<Arc<dyn Module>>, BoxError> {
        Err(format!("module layer for {name} is unavailable").into())
    }
}

/// Context source that cannot determine the caller's loader.
#[derive(Debug, Default)]
pub struct FailingContext;

impl ContextSource for FailingContext {
    fn context_loader(&self) -> Result<Option<Arc<ClassLoader>>, LocatorError> {
        Err(LocatorError::ContextUnavailable {
            reason: "security manager denied getContextClassLoader".to_string(),
        })
    }
}
