// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consulted by the resolution chain.
//!
//! Every collaborator is injected into the resolver as an
//! `Arc<dyn Trait>`, so tests can substitute deterministic doubles for the
//! process environment, the file system, and optional subsystems.

pub mod context;
pub mod external;
pub mod module;
pub mod property;
pub mod registry;

pub use context::ContextSource;
pub use external::ExternalRegistry;
pub use module::{Module, ModuleSystem};
pub use property::PropertySource;
pub use registry::ServiceRegistry;
