// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package access policy applied before a configured class is constructed.

use locator_core::{package_of, LocatorError};

/// Denies classes whose package falls under a restricted prefix.
///
/// A prefix `com.sun.xml.internal.` restricts that package and every
/// sub-package. Classes in the unnamed package are never restricted. The
/// default policy restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageAccessPolicy {
    restricted: Vec<String>,
}

impl PackageAccessPolicy {
    /// Policy allowing every package.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Policy restricting the given package prefixes.
    pub fn restricting<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let restricted = prefixes
            .into_iter()
            .map(|p| {
                let p = p.as_ref().trim();
                if p.ends_with('.') {
                    p.to_string()
                } else {
                    format!("{p}.")
                }
            })
            .collect();
        Self { restricted }
    }

    /// Restricted prefixes, each ending in `.`.
    pub fn restricted(&self) -> &[String] {
        &self.restricted
    }

    /// Whether `class_name` may be loaded.
    pub fn allows(&self, class_name: &str) -> bool {
        match package_of(class_name) {
            None => true,
            Some(package) => {
                let package = format!("{package}.");
                !self.restricted.iter().any(|p| package.starts_with(p.as_str()))
            }
        }
    }

    /// [`allows`](Self::allows) as a `Result` carrying the denied package.
    pub fn check(&self, class_name: &str) -> Result<(), LocatorError> {
        if self.allows(class_name) {
            return Ok(());
        }
        Err(LocatorError::AccessDenied {
            class_name: class_name.to_string(),
            package: package_of(class_name).unwrap_or_default().to_string(),
        })
    }
}
