// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Class loader: constructor functions keyed by class name.
//!
//! A `ClassLoader` is populated at startup with every implementation that may
//! be named in configuration. Each entry remembers the capability type its
//! constructor produces, so a class named for the wrong capability fails
//! instantiation instead of producing a value of the wrong type.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, LocatorError};
use crate::types::{Capability, Instance};

type Constructor = Arc<dyn Fn() -> Result<Instance, BoxError> + Send + Sync>;

/// A single constructible class.
#[derive(Clone)]
pub struct ClassEntry {
    class_name: String,
    type_id: TypeId,
    type_name: &'static str,
    constructor: Constructor,
}

impl ClassEntry {
    /// Fully-qualified class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Rust name of the capability type this class is constructed as.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Construct a new instance for `capability` through the zero-argument constructor.
    pub fn new_instance(&self, capability: &Capability) -> Result<Instance, LocatorError> {
        if self.type_id != capability.type_id {
            return Err(LocatorError::InstantiationFailure {
                class_name: self.class_name.clone(),
                reason: format!(
                    "class is registered as {}, not {}",
                    self.type_name, capability.type_name
                ),
                source: None,
            });
        }
        (self.constructor)().map_err(|e| LocatorError::instantiation(&self.class_name, e))
    }
}

impl fmt::Debug for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassEntry")
            .field("class_name", &self.class_name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Named table of constructible classes.
#[derive(Clone, Debug)]
pub struct ClassLoader {
    name: String,
    classes: HashMap<String, ClassEntry>,
}

impl ClassLoader {
    /// Create an empty loader.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: HashMap::new(),
        }
    }

    /// Name of this loader, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a class constructing providers of capability type `T`.
    ///
    /// Registering the same class name again replaces the earlier constructor.
    pub fn register<T, F>(&mut self, class_name: impl Into<String>, constructor: F)
    where
        T: ?Sized + 'static,
        F: Fn() -> Result<Box<T>, BoxError> + Send + Sync + 'static,
    {
        let class_name = class_name.into();
        let instance_name = class_name.clone();
        let constructor: Constructor =
            Arc::new(move || constructor().map(|value| Instance::new(instance_name.clone(), value)));
        self.classes.insert(
            class_name.clone(),
            ClassEntry {
                class_name,
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                constructor,
            },
        );
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_class<T, F>(mut self, class_name: impl Into<String>, constructor: F) -> Self
    where
        T: ?Sized + 'static,
        F: Fn() -> Result<Box<T>, BoxError> + Send + Sync + 'static,
    {
        self.register(class_name, constructor);
        self
    }

    /// Resolve a class by name.
    pub fn load_class(&self, class_name: &str) -> Result<&ClassEntry, LocatorError> {
        self.classes
            .get(class_name)
            .ok_or_else(|| LocatorError::load_failure(class_name))
    }

    /// Returns true if the class is known to this loader.
    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// All registered class names, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
