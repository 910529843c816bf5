// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory-backed module system.
//!
//! Each module is a sub-directory of the module root; its resources are the
//! files inside it. Classes cannot be discovered from disk, so each module's
//! class loader is registered up front with [`DirectoryModules::with_loader`].

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use locator_core::{BoxError, ClassLoader, Module, ModuleSystem};
use tracing::debug;

/// Module system rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirectoryModules {
    root: PathBuf,
    loaders: HashMap<String, Arc<ClassLoader>>,
}

impl DirectoryModules {
    /// Create a module system rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            loaders: HashMap::new(),
        }
    }

    /// Attach the class loader for classes shipped in module `name`.
    pub fn with_loader(mut self, name: impl Into<String>, loader: Arc<ClassLoader>) -> Self {
        self.loaders.insert(name.into(), loader);
        self
    }

    /// Module root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModuleSystem for DirectoryModules {
    fn load_module(&self, name: &str) -> Result<Option<Arc<dyn Module>>, BoxError> {
        if !is_relative_plain(Path::new(name)) {
            return Err(format!("invalid module name '{name}'").into());
        }
        let dir = self.root.join(name);
        if !dir.is_dir() {
            debug!(module = name, root = %self.root.display(), "module not present");
            return Ok(None);
        }
        let loader = self
            .loaders
            .get(name)
            .cloned()
            .unwrap_or_else(|| Arc::new(ClassLoader::new(name)));
        Ok(Some(Arc::new(DirectoryModule {
            name: name.to_string(),
            dir,
            loader,
        })))
    }
}

/// A module loaded from a directory.
#[derive(Debug)]
struct DirectoryModule {
    name: String,
    dir: PathBuf,
    loader: Arc<ClassLoader>,
}

impl Module for DirectoryModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_loader(&self) -> Arc<ClassLoader> {
        Arc::clone(&self.loader)
    }

    fn resource(&self, path: &str) -> Result<Option<Box<dyn Read + Send>>, BoxError> {
        if !is_relative_plain(Path::new(path)) {
            return Err(format!("resource path '{path}' escapes module {}", self.name).into());
        }
        match File::open(self.dir.join(path)) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Relative path made only of normal components.
fn is_relative_plain(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_root() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let services = tmp.path().join("org.sample.client/META-INF/services");
        std::fs::create_dir_all(&services).unwrap();
        std::fs::write(services.join("org.sample.Sink"), "org.sample.FileSink\n").unwrap();
        tmp
    }

    #[test]
    fn absent_module_is_none() {
        let tmp = module_root();
        let modules = DirectoryModules::new(tmp.path());
        assert!(modules.load_module("org.sample.other").unwrap().is_none());
    }

    #[test]
    fn present_module_opens_resources() {
        let tmp = module_root();
        let loader = Arc::new(ClassLoader::new("client"));
        let modules = DirectoryModules::new(tmp.path()).with_loader("org.sample.client", loader);

        let module = modules.load_module("org.sample.client").unwrap().unwrap();
        assert_eq!(module.name(), "org.sample.client");
        assert_eq!(module.class_loader().name(), "client");

        let mut content = String::new();
        module
            .resource("META-INF/services/org.sample.Sink")
            .unwrap()
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "org.sample.FileSink\n");

        assert!(module.resource("META-INF/services/org.sample.Codec").unwrap().is_none());
    }

    #[test]
    fn module_without_loader_gets_empty_loader() {
        let tmp = module_root();
        let module = DirectoryModules::new(tmp.path())
            .load_module("org.sample.client")
            .unwrap()
            .unwrap();
        assert!(module.class_loader().is_empty());
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let tmp = module_root();
        let modules = DirectoryModules::new(tmp.path());
        assert!(modules.load_module("../etc").is_err());

        let module = modules.load_module("org.sample.client").unwrap().unwrap();
        assert!(module.resource("../../secret").is_err());
        assert!(module.resource("/etc/passwd").is_err());
    }
}
