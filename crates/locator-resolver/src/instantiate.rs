// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Class instantiation under the package access policy.

use std::sync::Arc;

use locator_core::{Capability, ClassEntry, ClassLoader, Instance, LocatorError};
use locator_registry::PackageAccessPolicy;
use tracing::debug;

/// Loads and constructs named classes.
///
/// The trusted default class of a lookup (its fallback) may always be loaded
/// from the system loader, even from a restricted package.
#[derive(Debug, Clone)]
pub struct Instantiator {
    system_loader: Arc<ClassLoader>,
    policy: PackageAccessPolicy,
}

impl Instantiator {
    pub fn new(system_loader: Arc<ClassLoader>, policy: PackageAccessPolicy) -> Self {
        Self {
            system_loader,
            policy,
        }
    }

    /// Loader used when the caller has no context loader.
    pub fn system_loader(&self) -> &ClassLoader {
        &self.system_loader
    }

    pub fn policy(&self) -> &PackageAccessPolicy {
        &self.policy
    }

    /// Resolve `class_name` through `loader`, or the system loader when `None`.
    pub fn load_class<'a>(
        &'a self,
        class_name: &str,
        default_name: Option<&str>,
        loader: Option<&'a ClassLoader>,
    ) -> Result<&'a ClassEntry, LocatorError> {
        if let Err(denied) = self.policy.check(class_name) {
            if default_name == Some(class_name) {
                debug!(
                    class_name,
                    "restricted package, loading trusted default from system loader"
                );
                return self.system_loader.load_class(class_name);
            }
            return Err(denied);
        }
        loader
            .unwrap_or(self.system_loader.as_ref())
            .load_class(class_name)
    }

    /// Load `class_name` and construct it as `capability`.
    pub fn new_instance(
        &self,
        class_name: &str,
        default_name: Option<&str>,
        loader: Option<&ClassLoader>,
        capability: &Capability,
    ) -> Result<Instance, LocatorError> {
        let entry = self.load_class(class_name, default_name, loader)?;
        let instance = entry.new_instance(capability)?;
        debug!(class_name, capability = %capability, "created provider instance");
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator_core::ServiceSpec;

    trait Sink {
        fn target(&self) -> String;
    }

    struct Named(&'static str);

    impl Sink for Named {
        fn target(&self) -> String {
            self.0.to_string()
        }
    }

    fn sink() -> Capability {
        ServiceSpec::<dyn Sink>::new("org.sample.Sink").capability()
    }

    fn instantiator(restricted: &[&str]) -> Instantiator {
        let system = ClassLoader::new("system")
            .with_class::<dyn Sink, _>("internal.sink.Default", || Ok(Box::new(Named("system-default"))))
            .with_class::<dyn Sink, _>("org.sample.FileSink", || Ok(Box::new(Named("system-file"))));
        Instantiator::new(
            Arc::new(system),
            PackageAccessPolicy::restricting(restricted.iter().copied()),
        )
    }

    #[test]
    fn uses_system_loader_without_context() {
        let inst = instantiator(&[]);
        let instance = inst
            .new_instance("org.sample.FileSink", None, None, &sink())
            .unwrap();
        assert_eq!(instance.downcast::<dyn Sink>().unwrap().target(), "system-file");
    }

    #[test]
    fn uses_context_loader_when_given() {
        let inst = instantiator(&[]);
        let context = ClassLoader::new("ctx")
            .with_class::<dyn Sink, _>("org.sample.FileSink", || Ok(Box::new(Named("ctx-file"))));
        let instance = inst
            .new_instance("org.sample.FileSink", None, Some(&context), &sink())
            .unwrap();
        assert_eq!(instance.downcast::<dyn Sink>().unwrap().target(), "ctx-file");
    }

    #[test]
    fn denied_package_fails_unless_default() {
        let inst = instantiator(&["internal"]);
        let err = inst
            .new_instance("internal.sink.Default", Some("org.sample.FileSink"), None, &sink())
            .unwrap_err();
        assert!(matches!(err, LocatorError::AccessDenied { .. }));
    }

    #[test]
    fn denied_default_loads_from_system_loader() {
        let inst = instantiator(&["internal"]);
        let context = ClassLoader::new("ctx")
            .with_class::<dyn Sink, _>("internal.sink.Default", || Ok(Box::new(Named("ctx-default"))));
        let instance = inst
            .new_instance(
                "internal.sink.Default",
                Some("internal.sink.Default"),
                Some(&context),
                &sink(),
            )
            .unwrap();
        assert_eq!(instance.downcast::<dyn Sink>().unwrap().target(), "system-default");
    }

    #[test]
    fn unknown_class_is_load_failure() {
        let inst = instantiator(&[]);
        let err = inst
            .new_instance("org.sample.Missing", None, None, &sink())
            .unwrap_err();
        assert_eq!(err.to_string(), "Provider org.sample.Missing not found");
    }
}
