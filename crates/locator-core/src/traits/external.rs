// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional external plugin-discovery service.

use crate::error::BoxError;
use crate::types::{Capability, Instance};

/// An external registry the resolver delegates to when one is installed.
pub trait ExternalRegistry: Send + Sync {
    /// Name of the registry, for diagnostics.
    fn name(&self) -> &str;

    /// All provider instances the registry knows for `capability`.
    fn lookup_provider_instances(&self, capability: &Capability) -> Result<Vec<Instance>, BoxError>;
}
