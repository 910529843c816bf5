// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the resolution chain.

use std::sync::Arc;

use locator_core::{ClassLoader, Instance, LocatorError, ModuleSystem, StrategyKind};
use locator_registry::{DirectoryModules, PackageAccessPolicy, ServiceCatalog};
use locator_resolver::{
    with_context_loader, MapProperties, ProviderResolver, ProviderResolverBuilder,
};
use locator_test_utils::fixtures::{self, Named, BROKEN_FOO};
use locator_test_utils::{
    fixture_loader, Bar, ConstructionLog, FailingContext, FailingExternal, FailingModules,
    FailingRegistry, Foo, InstallDir, RecordingProperties, StaticExternalRegistry,
};
use tracing_test::traced_test;

const FILE: &str = "locator.properties";

fn chain() -> (ProviderResolverBuilder, ConstructionLog) {
    let (loader, log) = fixture_loader("system");
    (ProviderResolver::builder(Arc::new(loader)), log)
}

#[test]
fn registry_entry_wins_without_reading_file_or_properties() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.FooImpl\n").unwrap();
    let properties = Arc::new(RecordingProperties::new().with("Foo", "com.example.PropertyFoo"));

    let (builder, log) = chain();
    let resolver = builder
        .registry(Arc::new(
            ServiceCatalog::new().with_provider("Foo", "com.example.RegistryFoo"),
        ))
        .install_root(install.root(), FILE)
        .properties(properties.clone())
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), None).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Registry);
    assert_eq!(resolved.provider.implementation(), "com.example.RegistryFoo");
    assert_eq!(properties.reads(), 0);
    assert_eq!(log.constructed(), ["com.example.RegistryFoo"]);
}

#[test]
fn file_entry_wins_without_consulting_properties() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.FooImpl\n").unwrap();
    let properties = Arc::new(RecordingProperties::new().with("Foo", "com.example.PropertyFoo"));

    let (builder, log) = chain();
    let resolver = builder
        .registry(Arc::new(ServiceCatalog::new()))
        .install_root(install.root(), FILE)
        .properties(properties.clone())
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), None).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::ConfigFile);
    assert_eq!(resolved.provider.implementation(), "com.example.FooImpl");
    assert_eq!(properties.reads(), 0);
    assert_eq!(log.count(), 1);
}

#[test]
fn property_only_resolution() {
    let install = InstallDir::new().unwrap();
    let (builder, _) = chain();
    let resolver = builder
        .registry(Arc::new(ServiceCatalog::new()))
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.PropertyFoo")))
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Property);
    assert_eq!(resolved.class_name, "com.example.PropertyFoo");
}

#[test]
fn property_win_skips_module_and_external_registry() {
    let install = InstallDir::new().unwrap();
    install
        .write_module_service("org.sample.client", "Foo", "com.example.FooImpl\n")
        .unwrap();
    let external = Arc::new(StaticExternalRegistry::new(|| {
        vec![Instance::new::<dyn Foo>(
            "com.example.ExternalFoo",
            Box::new(Named("com.example.ExternalFoo".into())),
        )]
    }));

    let (builder, log) = chain();
    let resolver = builder
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.PropertyFoo")))
        .module_system(Arc::new(DirectoryModules::new(install.modules_root())), "org.sample.client")
        .external_registry(external.clone())
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Property);
    assert_eq!(resolved.class_name, "com.example.PropertyFoo");
    assert!(external.calls().is_empty());
    assert_eq!(log.count(), 1);
}

#[test]
fn fallback_used_even_when_its_package_is_restricted() {
    let (builder, _) = chain();
    let resolver = builder
        .policy(PackageAccessPolicy::restricting(["com.example"]))
        .properties(Arc::new(MapProperties::new()))
        .build();

    let bar = resolver.find(&fixtures::bar(), Some("com.example.DefaultBar")).unwrap();
    assert_eq!(bar.implementation(), "com.example.DefaultBar");
}

#[test]
fn restricted_configured_class_is_access_denied() {
    let (builder, _) = chain();
    let resolver = builder
        .policy(PackageAccessPolicy::restricting(["internal"]))
        .properties(Arc::new(MapProperties::new().with("Foo", "internal.impl.HiddenFoo")))
        .build();

    let err = resolver.find(&fixtures::foo(), Some("com.example.DefaultFoo")).err().unwrap();
    assert!(matches!(err, LocatorError::AccessDenied { .. }));
}

#[test]
fn nothing_and_no_fallback_is_not_found() {
    let install = InstallDir::new().unwrap();
    let (builder, log) = chain();
    let resolver = builder
        .registry(Arc::new(ServiceCatalog::new()))
        .install_root(install.root(), FILE)
        .properties(Arc::new(RecordingProperties::new()))
        .external_registry(Arc::new(StaticExternalRegistry::empty()))
        .build();

    let err = resolver.find(&fixtures::baz(), None).err().unwrap();
    assert!(matches!(err, LocatorError::NotFound { .. }));
    assert_eq!(err.to_string(), "Provider for Baz cannot be found");
    assert_eq!(log.count(), 0);
}

#[test]
fn repeated_lookups_return_fresh_instances() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.FooImpl\n").unwrap();
    let (builder, log) = chain();
    let resolver = builder.install_root(install.root(), FILE).build();

    let first = resolver.find(&fixtures::foo(), None).unwrap();
    let second = resolver.find(&fixtures::foo(), None).unwrap();
    assert_eq!(first.implementation(), second.implementation());
    assert_eq!(log.count(), 2);
}

#[test]
fn scenario_foo_from_config_file() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.FooImpl\n").unwrap();
    let (builder, _) = chain();
    let resolver = builder
        .registry(Arc::new(ServiceCatalog::new()))
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new()))
        .build();

    let foo = resolver.find(&fixtures::foo(), None).unwrap();
    assert_eq!(foo.implementation(), "com.example.FooImpl");
}

#[test]
fn scenario_bar_from_fallback() {
    let install = InstallDir::new().unwrap();
    let (builder, _) = chain();
    let resolver = builder
        .registry(Arc::new(ServiceCatalog::new()))
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new()))
        .build();

    let resolved = resolver.resolve(&fixtures::bar(), Some("com.example.DefaultBar")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Fallback);
    assert_eq!(resolved.provider.implementation(), "com.example.DefaultBar");
}

#[test]
fn scenario_baz_not_found() {
    let (builder, _) = chain();
    let resolver = builder.properties(Arc::new(MapProperties::new())).build();
    let err = resolver.find(&fixtures::baz(), None).err().unwrap();
    assert_eq!(err.to_string(), "Provider for Baz cannot be found");
}

#[test]
fn legacy_lib_file_is_read() {
    let install = InstallDir::new().unwrap();
    install.write_lib(FILE, "Foo = com.example.FooImpl\n").unwrap();
    let (builder, _) = chain();
    let resolver = builder.install_root(install.root(), FILE).build();

    let resolved = resolver.resolve(&fixtures::foo(), None).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::ConfigFile);
    assert_eq!(resolved.class_name, "com.example.FooImpl");
}

#[test]
fn file_without_key_falls_through() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Other=com.example.Other\n").unwrap();
    let (builder, _) = chain();
    let resolver = builder
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.PropertyFoo")))
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), None).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Property);
}

#[test]
#[traced_test]
fn malformed_file_is_logged_and_skipped() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=\\uZZZZ\n").unwrap();
    let (builder, _) = chain();
    let resolver = builder
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.PropertyFoo")))
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), None).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Property);
    assert!(logs_contain("Check it is accessible and has correct format"));
}

#[test]
#[traced_test]
fn unloadable_file_class_is_logged_and_skipped() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.Missing\n").unwrap();
    let (builder, _) = chain();
    let resolver = builder.install_root(install.root(), FILE).build();

    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Fallback);
    assert!(logs_contain("com.example.Missing"));
}

#[test]
#[traced_test]
fn registry_failure_is_logged_and_chain_continues() {
    let registry = Arc::new(FailingRegistry::default());
    let (builder, _) = chain();
    let resolver = builder
        .registry(registry.clone())
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.PropertyFoo")))
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), None).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Property);
    assert_eq!(registry.scans(), 1);
    assert!(logs_contain("service registry scan failed"));
}

#[test]
fn unreadable_property_is_ignored() {
    let (builder, _) = chain();
    let resolver = builder
        .properties(Arc::new(RecordingProperties::new().unreadable("Foo")))
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Fallback);
}

#[test]
fn property_instantiation_failure_propagates() {
    let (builder, _) = chain();
    let resolver = builder
        .properties(Arc::new(MapProperties::new().with("Foo", BROKEN_FOO)))
        .build();

    let err = resolver.find(&fixtures::foo(), Some("com.example.DefaultFoo")).err().unwrap();
    assert!(matches!(err, LocatorError::InstantiationFailure { .. }));
    assert_eq!(
        err.to_string(),
        "Provider com.example.BrokenFoo could not be instantiated: constructor refused"
    );

    let resolver = ProviderResolver::builder(Arc::new(fixture_loader("system").0))
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.Unknown")))
        .build();
    let err = resolver.find(&fixtures::foo(), None).err().unwrap();
    assert_eq!(err.to_string(), "Provider com.example.Unknown not found");
}

#[test]
fn class_of_wrong_capability_fails_instantiation() {
    let (builder, _) = chain();
    let resolver = builder
        .properties(Arc::new(MapProperties::new().with("Foo", "com.example.DefaultBar")))
        .build();

    let err = resolver.find(&fixtures::foo(), None).err().unwrap();
    assert!(matches!(err, LocatorError::InstantiationFailure { .. }));
}

#[test]
fn fallback_failure_propagates() {
    let (builder, _) = chain();
    let resolver = builder.build();
    let err = resolver.find(&fixtures::foo(), Some(BROKEN_FOO)).err().unwrap();
    assert!(matches!(err, LocatorError::InstantiationFailure { .. }));
}

#[test]
fn module_resource_names_provider() {
    let install = InstallDir::new().unwrap();
    install
        .write_module_service("org.sample.client", "Foo", "com.example.ModuleFoo\r\ncom.example.Ignored\n")
        .unwrap();
    let module_loader = Arc::new(
        ClassLoader::new("client").with_class::<dyn Foo, _>("com.example.ModuleFoo", || {
            Ok(Box::new(Named("com.example.ModuleFoo".to_string())))
        }),
    );
    let modules = DirectoryModules::new(install.modules_root()).with_loader("org.sample.client", module_loader);

    let (builder, _) = chain();
    let resolver = builder
        .install_root(install.root(), FILE)
        .properties(Arc::new(MapProperties::new()))
        .module_system(Arc::new(modules), "org.sample.client")
        .build();

    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Module);
    assert_eq!(resolved.provider.implementation(), "com.example.ModuleFoo");
}

#[test]
fn module_failures_are_swallowed() {
    let install = InstallDir::new().unwrap();
    install
        .write_module_service("org.sample.client", "Foo", "com.example.NotInModule\n")
        .unwrap();
    let modules = DirectoryModules::new(install.modules_root());

    let systems: [Arc<dyn ModuleSystem>; 2] = [Arc::new(modules), Arc::new(FailingModules)];
    for system in systems {
        let (builder, _) = chain();
        let resolver = builder.module_system(system, "org.sample.client").build();
        let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
        assert_eq!(resolved.strategy, StrategyKind::Fallback);
    }
}

#[test]
fn external_registry_supplies_matching_instance() {
    let external = Arc::new(StaticExternalRegistry::new(|| {
        vec![
            Instance::new::<dyn Bar>("com.example.BarImpl", Box::new(Named("com.example.BarImpl".into()))),
            Instance::new::<dyn Foo>("com.example.ExternalFoo", Box::new(Named("com.example.ExternalFoo".into()))),
        ]
    }));
    let (builder, _) = chain();
    let resolver = builder.external_registry(external.clone()).build();

    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::External);
    assert_eq!(resolved.provider.implementation(), "com.example.ExternalFoo");
    assert_eq!(external.calls(), ["Foo"]);
}

#[test]
fn external_registry_failure_falls_back() {
    let (builder, _) = chain();
    let resolver = builder.external_registry(Arc::new(FailingExternal)).build();
    let resolved = resolver.resolve(&fixtures::foo(), Some("com.example.DefaultFoo")).unwrap();
    assert_eq!(resolved.strategy, StrategyKind::Fallback);

    let (builder, _) = chain();
    let resolver = builder.external_registry(Arc::new(FailingExternal)).build();
    assert!(matches!(
        resolver.find(&fixtures::foo(), None).err().unwrap(),
        LocatorError::NotFound { .. }
    ));
}

#[test]
fn unavailable_context_propagates() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.FooImpl\n").unwrap();
    let (builder, log) = chain();
    let resolver = builder
        .context_source(Arc::new(FailingContext))
        .install_root(install.root(), FILE)
        .build();

    let err = resolver.find(&fixtures::foo(), Some("com.example.DefaultFoo")).err().unwrap();
    assert!(matches!(err, LocatorError::ContextUnavailable { .. }));
    assert_eq!(log.count(), 0);
}

#[test]
fn thread_context_loader_overrides_system_loader() {
    let context = Arc::new(ClassLoader::new("context").with_class::<dyn Foo, _>(
        "com.example.FooImpl",
        || Ok(Box::new(Named("context-foo".to_string()))),
    ));
    let properties = Arc::new(MapProperties::new().with("Foo", "com.example.FooImpl"));
    let (builder, _) = chain();
    let resolver = builder.properties(properties).build();

    let inside = with_context_loader(context, || resolver.find(&fixtures::foo(), None).unwrap());
    assert_eq!(inside.implementation(), "context-foo");

    let outside = resolver.find(&fixtures::foo(), None).unwrap();
    assert_eq!(outside.implementation(), "com.example.FooImpl");
}

#[test]
fn fallback_is_loaded_through_context_loader() {
    let context = Arc::new(ClassLoader::new("context").with_class::<dyn Bar, _>(
        "com.example.DefaultBar",
        || Ok(Box::new(Named("context-bar".to_string()))),
    ));
    let (builder, _) = chain();
    let resolver = builder.build();

    let bar = with_context_loader(context, || {
        resolver.find(&fixtures::bar(), Some("com.example.DefaultBar")).unwrap()
    });
    assert_eq!(bar.implementation(), "context-bar");
}

#[test]
fn resolver_is_shareable_across_threads() {
    let install = InstallDir::new().unwrap();
    install.write_conf(FILE, "Foo=com.example.FooImpl\n").unwrap();
    let (builder, log) = chain();
    let resolver = Arc::new(builder.install_root(install.root(), FILE).build());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || {
                resolver
                    .find(&fixtures::foo(), None)
                    .map(|foo| foo.implementation().to_string())
                    .ok()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("com.example.FooImpl"));
    }
    assert_eq!(log.count(), 4);
}
