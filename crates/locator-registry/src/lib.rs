// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service catalog, service descriptors, package access policy, and
//! directory-backed modules.
//!
//! The catalog is the default registry scanned first by the resolver: it
//! records, per capability, the implementation classes announced for it in
//! registration order.

pub mod catalog;
pub mod descriptor;
pub mod modules;
pub mod policy;

pub use catalog::ServiceCatalog;
pub use descriptor::{parse_service_descriptor, parse_service_file, ServiceDescriptor};
pub use modules::DirectoryModules;
pub use policy::PackageAccessPolicy;
