// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Locator provider lookup.
//!
//! Provides the error type, capability and instance types, the class loader
//! that stands in for dynamic class loading, and the collaborator traits the
//! resolution chain consults.

pub mod error;
pub mod loader;
pub mod traits;
pub mod types;

pub use error::{BoxError, LocatorError};
pub use loader::{ClassEntry, ClassLoader};
pub use traits::{
    ContextSource, ExternalRegistry, Module, ModuleSystem, PropertySource, ServiceRegistry,
};
pub use types::{package_of, Capability, Instance, ServiceSpec, StrategyKind};
