// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional named-module system.

use std::io::Read;
use std::sync::Arc;

use crate::error::BoxError;
use crate::loader::ClassLoader;

/// A module system able to load named modules.
pub trait ModuleSystem: Send + Sync {
    /// Load a module by name. `Ok(None)` when no such module exists.
    fn load_module(&self, name: &str) -> Result<Option<Arc<dyn Module>>, BoxError>;
}

/// A loaded module: its classes and its resources.
pub trait Module: Send + Sync {
    /// Module name.
    fn name(&self) -> &str;

    /// Class loader for classes shipped in this module.
    fn class_loader(&self) -> Arc<ClassLoader>;

    /// Open a resource by path relative to the module. `Ok(None)` when absent.
    fn resource(&self, path: &str) -> Result<Option<Box<dyn Read + Send>>, BoxError>;
}
