// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider resolution chain.
//!
//! [`ProviderResolver::find`] tries, in order: the service registry, the
//! installation properties file, the property source, a named module's
//! service resource, and an external registry. If none of them yields a
//! provider, the caller's fallback class is instantiated, or the lookup fails
//! with [`LocatorError::NotFound`](locator_core::LocatorError::NotFound).
//!
//! ```no_run
//! use std::sync::Arc;
//! use locator_core::{ClassLoader, ServiceSpec};
//! use locator_resolver::ProviderResolver;
//!
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Hello;
//! impl Greeter for Hello {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! let loader = ClassLoader::new("system")
//!     .with_class::<dyn Greeter, _>("org.sample.Hello", || Ok(Box::new(Hello)));
//! let resolver = ProviderResolver::builder(Arc::new(loader))
//!     .install_root("/opt/app", "locator.properties")
//!     .build();
//!
//! let spec = ServiceSpec::<dyn Greeter>::new("org.sample.Greeter");
//! let greeter = resolver.find(&spec, Some("org.sample.Hello")).unwrap();
//! println!("{}", greeter.greet());
//! ```

pub mod context;
pub mod instantiate;
pub mod properties;
pub mod resolver;
pub mod sources;
pub mod strategy;

pub use context::{set_context_loader, with_context_loader, ContextLoaderGuard, ThreadContext};
pub use instantiate::Instantiator;
pub use properties::{ParseError, Properties, PropertiesError};
pub use resolver::{ProviderResolver, ProviderResolverBuilder, Resolved};
pub use sources::{EnvProperties, MapProperties};
pub use strategy::{
    ConfigFileLookup, ExternalRegistryLookup, LookupContext, ModuleResourceLookup,
    PropertyLookup, RegistryScan, Strategy,
};
