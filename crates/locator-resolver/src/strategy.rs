// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery strategies of the resolution chain.
//!
//! Each strategy either produces a provider, yields `Ok(None)` to pass the
//! lookup on, or fails with an error that aborts the chain. Failures that
//! should not abort (registry scan, configuration file, optional
//! collaborators) are logged or swallowed inside the strategy itself.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use locator_config::model::ResolverConfig;
use locator_core::{
    BoxError, Capability, ClassLoader, ExternalRegistry, Instance, LocatorError, Module,
    ModuleSystem, PropertySource, ServiceRegistry, StrategyKind,
};
use tracing::{debug, error, warn};

use crate::instantiate::Instantiator;
use crate::properties::Properties;

/// Everything a strategy needs for one lookup.
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'a> {
    pub capability: &'a Capability,
    /// Trusted default class, if the caller gave one.
    pub fallback: Option<&'a str>,
    /// The caller's context loader; `None` means the system loader.
    pub loader: Option<&'a ClassLoader>,
    pub instantiator: &'a Instantiator,
}

impl<'a> LookupContext<'a> {
    /// The loader classes are resolved through.
    pub fn effective_loader(&self) -> &'a ClassLoader {
        let instantiator = self.instantiator;
        self.loader
            .unwrap_or_else(|| instantiator.system_loader())
    }

    fn instantiate(&self, class_name: &str) -> Result<Instance, LocatorError> {
        self.instantiator
            .new_instance(class_name, self.fallback, self.loader, self.capability)
    }
}

/// One discovery mechanism.
pub trait Strategy: Send + Sync {
    /// Which mechanism this is.
    fn kind(&self) -> StrategyKind;

    /// Try to produce a provider.
    fn lookup(&self, cx: &LookupContext<'_>) -> Result<Option<Instance>, LocatorError>;

    /// The class this strategy would instantiate for `capability`, without
    /// instantiating it. `Ok(None)` if it names none or cannot tell.
    fn configured_class(&self, _capability: &Capability) -> Result<Option<String>, LocatorError> {
        Ok(None)
    }
}

/// Registry scan: first announced implementation of the capability.
pub struct RegistryScan {
    registry: Arc<dyn ServiceRegistry>,
}

impl RegistryScan {
    pub fn new(registry: Arc<dyn ServiceRegistry>) -> Self {
        Self { registry }
    }
}

impl Strategy for RegistryScan {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Registry
    }

    fn lookup(&self, cx: &LookupContext<'_>) -> Result<Option<Instance>, LocatorError> {
        match self
            .registry
            .first_provider(cx.capability, cx.effective_loader())
        {
            Ok(Some(instance)) if instance.satisfies(cx.capability) => Ok(Some(instance)),
            Ok(Some(instance)) => {
                warn!(
                    capability = %cx.capability,
                    class_name = instance.class_name(),
                    "registry returned a provider of the wrong type, ignoring"
                );
                Ok(None)
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(capability = %cx.capability, error = %e, "service registry scan failed");
                Ok(None)
            }
        }
    }
}

/// Installation-wide properties file, keyed by capability name.
#[derive(Debug, Clone)]
pub struct ConfigFileLookup {
    primary: PathBuf,
    legacy: PathBuf,
}

impl ConfigFileLookup {
    /// Look in `<install_root>/conf/<file>`, then `<install_root>/lib/<file>`.
    pub fn new(install_root: impl AsRef<Path>, file_name: &str) -> Self {
        let root = install_root.as_ref();
        Self {
            primary: root.join("conf").join(file_name),
            legacy: root.join("lib").join(file_name),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            primary: config.properties_path(),
            legacy: config.legacy_properties_path(),
        }
    }

    /// The file that would be read, if any exists.
    pub fn path(&self) -> Option<&Path> {
        [&self.primary, &self.legacy]
            .into_iter()
            .find(|p| p.is_file())
            .map(PathBuf::as_path)
    }

    fn read_entry(&self, key: &str) -> Result<Option<(PathBuf, String)>, LocatorError> {
        let Some(path) = self.path() else {
            debug!(path = %self.primary.display(), "no installation properties file");
            return Ok(None);
        };
        let properties = Properties::load(path).map_err(|e| LocatorError::ConfigFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        Ok(properties
            .get(key)
            .map(|class_name| (path.to_path_buf(), class_name.to_string())))
    }
}

impl Strategy for ConfigFileLookup {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ConfigFile
    }

    fn lookup(&self, cx: &LookupContext<'_>) -> Result<Option<Instance>, LocatorError> {
        let (path, class_name) = match self.read_entry(&cx.capability.name) {
            Ok(Some(entry)) => entry,
            Ok(None) => return Ok(None),
            Err(e) => {
                error!(
                    error = %e,
                    "Error reading provider configuration. Check it is accessible and has correct format"
                );
                return Ok(None);
            }
        };

        debug!(path = %path.display(), class_name = %class_name, "properties file names provider");
        match cx.instantiate(&class_name) {
            Ok(instance) => Ok(Some(instance)),
            Err(e) => {
                error!(
                    path = %path.display(),
                    class_name = %class_name,
                    error = %e,
                    "Error reading provider configuration. Check it is accessible and has correct format"
                );
                Ok(None)
            }
        }
    }

    fn configured_class(&self, capability: &Capability) -> Result<Option<String>, LocatorError> {
        Ok(self.read_entry(&capability.name)?.map(|(_, class_name)| class_name))
    }
}

/// Property source keyed by capability name.
pub struct PropertyLookup {
    source: Arc<dyn PropertySource>,
}

impl PropertyLookup {
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        Self { source }
    }
}

impl Strategy for PropertyLookup {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Property
    }

    fn lookup(&self, cx: &LookupContext<'_>) -> Result<Option<Instance>, LocatorError> {
        let class_name = match self.source.property(&cx.capability.name) {
            Ok(Some(class_name)) => class_name,
            Ok(None) => return Ok(None),
            Err(e) => {
                debug!(capability = %cx.capability, error = %e, "property not readable, skipping");
                return Ok(None);
            }
        };
        debug!(class_name = %class_name, "property names provider");
        cx.instantiate(&class_name).map(Some)
    }

    fn configured_class(&self, capability: &Capability) -> Result<Option<String>, LocatorError> {
        self.source.property(&capability.name)
    }
}

/// Service resource of one named module.
pub struct ModuleResourceLookup {
    modules: Arc<dyn ModuleSystem>,
    module_name: String,
}

impl ModuleResourceLookup {
    pub fn new(modules: Arc<dyn ModuleSystem>, module_name: impl Into<String>) -> Self {
        Self {
            modules,
            module_name: module_name.into(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The module and the first line of its service resource.
    fn probe(&self, capability: &Capability) -> Result<Option<(Arc<dyn Module>, String)>, BoxError> {
        let Some(module) = self.modules.load_module(&self.module_name)? else {
            return Ok(None);
        };
        let Some(reader) = module.resource(&capability.service_resource())? else {
            return Ok(None);
        };

        let mut line = String::new();
        BufReader::new(reader).read_line(&mut line)?;
        let class_name = line.trim_end_matches(['\r', '\n']);
        if class_name.is_empty() {
            return Ok(None);
        }
        let class_name = class_name.to_string();
        Ok(Some((module, class_name)))
    }
}

impl Strategy for ModuleResourceLookup {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Module
    }

    fn lookup(&self, cx: &LookupContext<'_>) -> Result<Option<Instance>, LocatorError> {
        let (module, class_name) = match self.probe(cx.capability) {
            Ok(Some(found)) => found,
            Ok(None) => return Ok(None),
            Err(e) => {
                debug!(module = %self.module_name, error = %e, "module lookup unavailable");
                return Ok(None);
            }
        };

        let loader = module.class_loader();
        match cx.instantiator.new_instance(
            &class_name,
            Some(&class_name),
            Some(loader.as_ref()),
            cx.capability,
        ) {
            Ok(instance) => Ok(Some(instance)),
            Err(e) => {
                debug!(module = %self.module_name, class_name = %class_name, error = %e, "module provider unusable");
                Ok(None)
            }
        }
    }

    fn configured_class(&self, capability: &Capability) -> Result<Option<String>, LocatorError> {
        Ok(self
            .probe(capability)
            .unwrap_or_default()
            .map(|(_, class_name)| class_name))
    }
}

/// Delegation to an external registry.
pub struct ExternalRegistryLookup {
    registry: Arc<dyn ExternalRegistry>,
}

impl ExternalRegistryLookup {
    pub fn new(registry: Arc<dyn ExternalRegistry>) -> Self {
        Self { registry }
    }
}

impl Strategy for ExternalRegistryLookup {
    fn kind(&self) -> StrategyKind {
        StrategyKind::External
    }

    fn lookup(&self, cx: &LookupContext<'_>) -> Result<Option<Instance>, LocatorError> {
        match self.registry.lookup_provider_instances(cx.capability) {
            Ok(instances) => Ok(instances.into_iter().find(|i| i.satisfies(cx.capability))),
            Err(e) => {
                debug!(registry = self.registry.name(), error = %e, "external registry unavailable");
                Ok(None)
            }
        }
    }
}
