// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide key/value lookup.

use crate::error::LocatorError;

/// Source of configuration properties keyed by capability name.
pub trait PropertySource: Send + Sync {
    /// Read a property. `Ok(None)` when the key is not set.
    ///
    /// An `Err` means the property exists but could not be read; the
    /// resolution chain ignores it and moves on.
    fn property(&self, key: &str) -> Result<Option<String>, LocatorError>;
}
