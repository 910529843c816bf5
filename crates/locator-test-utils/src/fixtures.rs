// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture capabilities and their implementations.

use std::sync::{Arc, Mutex};

use locator_core::{BoxError, ClassLoader, ServiceSpec};

/// Capability `Foo`.
pub trait Foo {
    /// Class name of the implementation.
    fn implementation(&self) -> &str;
}

/// Capability `Bar`.
pub trait Bar {
    fn implementation(&self) -> &str;
}

/// Capability `Baz`. No implementation exists.
pub trait Baz {
    fn implementation(&self) -> &str;
}

/// Implementation that reports the class it was registered under.
#[derive(Debug, Clone)]
pub struct Named(pub String);

impl Foo for Named {
    fn implementation(&self) -> &str {
        &self.0
    }
}

impl Bar for Named {
    fn implementation(&self) -> &str {
        &self.0
    }
}

pub fn foo() -> ServiceSpec<dyn Foo> {
    ServiceSpec::new("Foo")
}

pub fn bar() -> ServiceSpec<dyn Bar> {
    ServiceSpec::new("Bar")
}

pub fn baz() -> ServiceSpec<dyn Baz> {
    ServiceSpec::new("Baz")
}

/// Classes constructed through a fixture loader, in construction order.
#[derive(Debug, Clone, Default)]
pub struct ConstructionLog {
    constructed: Arc<Mutex<Vec<String>>>,
}

impl ConstructionLog {
    fn record(&self, class_name: &str) {
        if let Ok(mut constructed) = self.constructed.lock() {
            constructed.push(class_name.to_string());
        }
    }

    /// Snapshot of constructed class names.
    pub fn constructed(&self) -> Vec<String> {
        self.constructed
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.constructed().len()
    }
}

/// `Foo` classes registered by [`fixture_loader`].
pub const FOO_CLASSES: &[&str] = &[
    "com.example.FooImpl",
    "com.example.RegistryFoo",
    "com.example.PropertyFoo",
    "com.example.DefaultFoo",
    "internal.impl.HiddenFoo",
];

/// `Bar` classes registered by [`fixture_loader`].
pub const BAR_CLASSES: &[&str] = &["com.example.DefaultBar", "com.example.BarImpl"];

/// `Foo` class whose constructor always fails.
pub const BROKEN_FOO: &str = "com.example.BrokenFoo";

/// System loader for the fixture capabilities, recording every construction.
pub fn fixture_loader(name: &str) -> (ClassLoader, ConstructionLog) {
    let log = ConstructionLog::default();
    let mut loader = ClassLoader::new(name);

    for &class_name in FOO_CLASSES {
        let log = log.clone();
        loader.register::<dyn Foo, _>(class_name, move || {
            log.record(class_name);
            Ok(Box::new(Named(class_name.to_string())))
        });
    }
    for &class_name in BAR_CLASSES {
        let log = log.clone();
        loader.register::<dyn Bar, _>(class_name, move || {
            log.record(class_name);
            Ok(Box::new(Named(class_name.to_string())))
        });
    }
    loader.register::<dyn Foo, _>(BROKEN_FOO, || -> Result<Box<dyn Foo>, BoxError> {
        Err("constructor refused".into())
    });

    (loader, log)
}
