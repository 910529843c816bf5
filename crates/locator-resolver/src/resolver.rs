// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The provider resolver and its builder.

use std::sync::Arc;

use locator_config::LocatorConfig;
use locator_core::{
    Capability, ClassLoader, ContextSource, ExternalRegistry, Instance, LocatorError,
    ModuleSystem, PropertySource, ServiceRegistry, ServiceSpec, StrategyKind,
};
use locator_registry::{DirectoryModules, PackageAccessPolicy};
use tracing::debug;

use crate::context::ThreadContext;
use crate::instantiate::Instantiator;
use crate::sources::EnvProperties;
use crate::strategy::{
    ConfigFileLookup, ExternalRegistryLookup, LookupContext, ModuleResourceLookup,
    PropertyLookup, RegistryScan, Strategy,
};

/// A provider together with how it was found.
pub struct Resolved<T: ?Sized> {
    pub provider: Box<T>,
    pub strategy: StrategyKind,
    /// Class the provider was constructed from.
    pub class_name: String,
}

/// Locates a provider for a capability by trying each configured strategy
/// in order, then the caller's fallback.
///
/// Every call constructs a new provider; nothing is cached between calls.
pub struct ProviderResolver {
    instantiator: Instantiator,
    context: Arc<dyn ContextSource>,
    strategies: Vec<Box<dyn Strategy>>,
}

impl ProviderResolver {
    /// Start wiring a resolver around the system class loader.
    pub fn builder(system_loader: Arc<ClassLoader>) -> ProviderResolverBuilder {
        ProviderResolverBuilder::new(system_loader)
    }

    /// Builder pre-wired from configuration: properties file, environment
    /// properties, module system, and access policy.
    ///
    /// A service registry or external registry can still be added to the
    /// returned builder.
    pub fn from_config(config: &LocatorConfig, system_loader: Arc<ClassLoader>) -> ProviderResolverBuilder {
        let mut builder = ProviderResolverBuilder::new(Arc::clone(&system_loader))
            .policy(PackageAccessPolicy::restricting(&config.security.restricted_packages))
            .config_file(ConfigFileLookup::from_config(&config.resolver));

        if config.resolver.use_env_properties {
            builder = builder.properties(Arc::new(EnvProperties));
        }
        if config.module.enabled {
            let modules = DirectoryModules::new(&config.module.root)
                .with_loader(config.module.name.clone(), system_loader);
            builder = builder.module_system(Arc::new(modules), config.module.name.clone());
        }
        builder
    }

    /// Find a provider of `spec`, falling back to class `fallback` if given.
    pub fn find<T: ?Sized + 'static>(
        &self,
        spec: &ServiceSpec<T>,
        fallback: Option<&str>,
    ) -> Result<Box<T>, LocatorError> {
        self.resolve(spec, fallback).map(|resolved| resolved.provider)
    }

    /// Like [`find`](Self::find), also reporting which strategy won.
    pub fn resolve<T: ?Sized + 'static>(
        &self,
        spec: &ServiceSpec<T>,
        fallback: Option<&str>,
    ) -> Result<Resolved<T>, LocatorError> {
        let (strategy, instance) = self.resolve_instance(&spec.capability(), fallback)?;
        let class_name = instance.class_name().to_string();
        let provider = instance
            .downcast::<T>()
            .map_err(|instance| LocatorError::InstantiationFailure {
                class_name: instance.class_name().to_string(),
                reason: format!("provider is not a {}", std::any::type_name::<T>()),
                source: None,
            })?;
        Ok(Resolved {
            provider,
            strategy,
            class_name,
        })
    }

    /// Type-erased resolution.
    pub fn resolve_instance(
        &self,
        capability: &Capability,
        fallback: Option<&str>,
    ) -> Result<(StrategyKind, Instance), LocatorError> {
        let context = self.context.context_loader()?;
        let cx = LookupContext {
            capability,
            fallback,
            loader: context.as_deref(),
            instantiator: &self.instantiator,
        };
        debug!(
            capability = %capability,
            loader = cx.effective_loader().name(),
            "resolving provider"
        );

        for strategy in &self.strategies {
            if let Some(instance) = strategy.lookup(&cx)? {
                debug!(
                    capability = %capability,
                    strategy = %strategy.kind(),
                    class_name = instance.class_name(),
                    "provider resolved"
                );
                return Ok((strategy.kind(), instance));
            }
            debug!(capability = %capability, strategy = %strategy.kind(), "no provider");
        }

        let Some(fallback) = fallback else {
            return Err(LocatorError::NotFound {
                capability: capability.name.clone(),
            });
        };
        let instance =
            self.instantiator
                .new_instance(fallback, Some(fallback), cx.loader, capability)?;
        debug!(capability = %capability, class_name = fallback, "using fallback provider");
        Ok((StrategyKind::Fallback, instance))
    }

    /// Configured strategies in the order they are tried.
    pub fn strategies(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.strategies.iter().map(|s| s.as_ref())
    }

    pub fn instantiator(&self) -> &Instantiator {
        &self.instantiator
    }
}

/// Wires the collaborators of a [`ProviderResolver`].
///
/// Strategies are always tried in the same order regardless of the order
/// the builder methods are called in: registry, configuration file,
/// property source, module resource, external registry.
pub struct ProviderResolverBuilder {
    system_loader: Arc<ClassLoader>,
    policy: PackageAccessPolicy,
    context: Arc<dyn ContextSource>,
    registry: Option<Arc<dyn ServiceRegistry>>,
    config_file: Option<ConfigFileLookup>,
    properties: Option<Arc<dyn PropertySource>>,
    modules: Option<(Arc<dyn ModuleSystem>, String)>,
    external: Option<Arc<dyn ExternalRegistry>>,
}

impl ProviderResolverBuilder {
    fn new(system_loader: Arc<ClassLoader>) -> Self {
        Self {
            system_loader,
            policy: PackageAccessPolicy::allow_all(),
            context: Arc::new(ThreadContext),
            registry: None,
            config_file: None,
            properties: None,
            modules: None,
            external: None,
        }
    }

    pub fn policy(mut self, policy: PackageAccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the per-thread context source.
    pub fn context_source(mut self, context: Arc<dyn ContextSource>) -> Self {
        self.context = context;
        self
    }

    pub fn registry(mut self, registry: Arc<dyn ServiceRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config_file(mut self, lookup: ConfigFileLookup) -> Self {
        self.config_file = Some(lookup);
        self
    }

    /// Shorthand for [`config_file`](Self::config_file) with an installation root.
    pub fn install_root(self, root: impl AsRef<std::path::Path>, file_name: &str) -> Self {
        self.config_file(ConfigFileLookup::new(root, file_name))
    }

    pub fn properties(mut self, source: Arc<dyn PropertySource>) -> Self {
        self.properties = Some(source);
        self
    }

    /// Consult service resources of `module_name` in `modules`.
    pub fn module_system(mut self, modules: Arc<dyn ModuleSystem>, module_name: impl Into<String>) -> Self {
        self.modules = Some((modules, module_name.into()));
        self
    }

    pub fn external_registry(mut self, registry: Arc<dyn ExternalRegistry>) -> Self {
        self.external = Some(registry);
        self
    }

    pub fn build(self) -> ProviderResolver {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::new();
        if let Some(registry) = self.registry {
            strategies.push(Box::new(RegistryScan::new(registry)));
        }
        if let Some(lookup) = self.config_file {
            strategies.push(Box::new(lookup));
        }
        if let Some(source) = self.properties {
            strategies.push(Box::new(PropertyLookup::new(source)));
        }
        if let Some((modules, name)) = self.modules {
            strategies.push(Box::new(ModuleResourceLookup::new(modules, name)));
        }
        if let Some(registry) = self.external {
            strategies.push(Box::new(ExternalRegistryLookup::new(registry)));
        }

        ProviderResolver {
            instantiator: Instantiator::new(self.system_loader, self.policy),
            context: self.context,
            strategies,
        }
    }
}
