// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pluggable service registry scanned first in the chain.

use crate::error::LocatorError;
use crate::loader::ClassLoader;
use crate::types::{Capability, Instance};

/// A registry of implementations announced for each capability.
///
/// Only the first implementation is ever used. Implementations construct it
/// through the loader passed in, which is the caller's loading context.
pub trait ServiceRegistry: Send + Sync {
    /// Construct the first registered provider of `capability`, if any.
    fn first_provider(
        &self,
        capability: &Capability,
        loader: &ClassLoader,
    ) -> Result<Option<Instance>, LocatorError>;
}
