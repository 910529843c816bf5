// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Locator integration tests.
//!
//! Provides fixture capabilities, mock collaborators, and temporary
//! installation directories for fast, deterministic tests.
//!
//! # Components
//!
//! - [`fixtures`] - `Foo`, `Bar` and `Baz` capabilities and a class loader for them
//! - [`mocks`] - Recording and failing collaborators
//! - [`InstallDir`] - Temporary installation root with `conf/`, `lib/` and module directories

pub mod fixtures;
pub mod install;
pub mod mocks;

pub use fixtures::{fixture_loader, Bar, Baz, ConstructionLog, Foo};
pub use install::InstallDir;
pub use mocks::{
    FailingContext, FailingExternal, FailingModules, FailingRegistry, RecordingProperties,
    StaticExternalRegistry,
};
