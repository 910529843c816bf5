// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary installation directories.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

/// A throwaway installation root, removed on drop.
#[derive(Debug)]
pub struct InstallDir {
    dir: TempDir,
}

impl InstallDir {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `<root>/conf/<file_name>`.
    pub fn write_conf(&self, file_name: &str, content: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        self.write("conf", file_name, content.as_ref())
    }

    /// Write the legacy `<root>/lib/<file_name>`.
    pub fn write_lib(&self, file_name: &str, content: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        self.write("lib", file_name, content.as_ref())
    }

    /// Write `META-INF/services/<capability>` inside module `module` under `<root>/modules`.
    pub fn write_module_service(&self, module: &str, capability: &str, content: &str) -> io::Result<PathBuf> {
        let dir = Path::new("modules").join(module).join("META-INF/services");
        self.write(dir, capability, content.as_bytes())
    }

    /// Directory holding the modules written by [`write_module_service`](Self::write_module_service).
    pub fn modules_root(&self) -> PathBuf {
        self.root().join("modules")
    }

    fn write(&self, dir: impl AsRef<Path>, file_name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let dir = self.root().join(dir);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(file_name);
        std::fs::write(&path, content)?;
        debug!(path = %path.display(), "wrote fixture file");
        Ok(path)
    }
}
