// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability, instance, and strategy types shared across the workspace.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies the capability being requested and the type to return it as.
///
/// `T` is normally a trait object such as `dyn Greeter`. The name is the
/// fully-qualified capability name used as the key in every lookup source.
pub struct ServiceSpec<T: ?Sized> {
    name: Cow<'static, str>,
    _marker: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized + 'static> ServiceSpec<T> {
    /// Create a spec for a capability name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }

    /// The fully-qualified capability name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type-erased form handed to strategies.
    pub fn capability(&self) -> Capability {
        Capability {
            name: self.name.to_string(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }
}

impl<T: ?Sized> Clone for ServiceSpec<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ServiceSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSpec")
            .field("name", &self.name)
            .finish()
    }
}

/// A capability with its target type erased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability {
    /// Fully-qualified capability name.
    pub name: String,
    /// Type the provider must be returned as.
    pub type_id: TypeId,
    /// Rust name of that type, for messages.
    pub type_name: &'static str,
}

impl Capability {
    /// Resource path a module uses to name its implementation of this capability.
    pub fn service_resource(&self) -> String {
        format!("META-INF/services/{}", self.name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A freshly constructed provider whose capability type has been erased.
///
/// Holds a `Box<T>` inside a `Box<dyn Any>` so trait-object providers can be
/// recovered with [`Instance::downcast`].
pub struct Instance {
    class_name: String,
    type_id: TypeId,
    value: Box<dyn Any>,
}

impl Instance {
    /// Wrap a provider built from `class_name`.
    pub fn new<T: ?Sized + 'static>(class_name: impl Into<String>, value: Box<T>) -> Self {
        Self {
            class_name: class_name.into(),
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Name of the class this instance was constructed from.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Whether the instance was built for capability type `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Whether the instance satisfies the given capability.
    pub fn satisfies(&self, capability: &Capability) -> bool {
        self.type_id == capability.type_id
    }

    /// Recover the provider as `Box<T>`, or give the instance back on a type mismatch.
    pub fn downcast<T: ?Sized + 'static>(self) -> Result<Box<T>, Instance> {
        let Instance {
            class_name,
            type_id,
            value,
        } = self;
        match value.downcast::<Box<T>>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Instance {
                class_name,
                type_id,
                value,
            }),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// The discovery mechanisms of the resolution chain, in priority order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Registry,
    ConfigFile,
    Property,
    Module,
    External,
    Fallback,
}

/// Package part of a class name: everything before the last `.`.
///
/// Returns `None` for classes in the unnamed package.
pub fn package_of(class_name: &str) -> Option<&str> {
    class_name.rfind('.').map(|i| &class_name[..i])
}
