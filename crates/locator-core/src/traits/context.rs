// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of the caller's loading context.

use std::sync::Arc;

use crate::error::LocatorError;
use crate::loader::ClassLoader;

/// Determines which class loader lookups run against.
pub trait ContextSource: Send + Sync {
    /// The caller's current loader. `Ok(None)` means no context is set and
    /// the system loader applies.
    ///
    /// An `Err` aborts resolution: without a loading context no strategy can
    /// be trusted to construct the right classes.
    fn context_loader(&self) -> Result<Option<Arc<ClassLoader>>, LocatorError>;
}
