// SPDX-FileCopyrightText: 2026 Locator Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `locator check` command implementation.
//!
//! Walks the resolution chain for one capability without constructing
//! anything, and reports what each strategy names and which one would win.

use std::any::Any;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use locator_config::LocatorConfig;
use locator_core::{ClassLoader, LocatorError, ServiceSpec, StrategyKind};
use locator_registry::ServiceCatalog;
use locator_resolver::ProviderResolver;

/// Status of a single strategy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The strategy names a usable class.
    Pass,
    /// The strategy could not be consulted.
    Warn,
    /// The strategy names a class that would be rejected.
    Fail,
    /// The strategy names nothing.
    Skip,
}

/// Result of checking one strategy.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub strategy: StrategyKind,
    pub status: CheckStatus,
    pub message: String,
    /// Class the strategy names, if any.
    pub class_name: Option<String>,
}

/// Run the `locator check` command.
///
/// Returns whether a provider would be found.
pub fn run_check(
    config: &LocatorConfig,
    capability: &str,
    fallback: Option<&str>,
    services: Option<&Path>,
    plain: bool,
) -> Result<bool, LocatorError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut catalog = ServiceCatalog::new();
    if let Some(dir) = services {
        catalog.load_service_dir(dir)?;
    }

    let results = collect_checks(config, &catalog, capability, fallback);
    let winner = winner(&results);

    println!();
    println!("  locator check {capability}");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_line(result, use_color));
    }
    println!();

    match winner {
        Some(result) => {
            println!(
                "  {} would supply {}.",
                result.strategy,
                result.class_name.as_deref().unwrap_or_default()
            );
        }
        None => println!("  Provider for {capability} cannot be found"),
    }
    println!();

    Ok(winner.is_some())
}

/// The result that decides the lookup, or `None` if it would fail.
///
/// A denied class named by the property source aborts the lookup, so nothing
/// after it can win.
pub fn winner(results: &[CheckResult]) -> Option<&CheckResult> {
    for result in results {
        match (&result.status, result.strategy) {
            (CheckStatus::Pass, _) => return Some(result),
            (CheckStatus::Fail, StrategyKind::Property) => return None,
            _ => {}
        }
    }
    None
}

/// Check every configured strategy, then the fallback.
///
/// Each strategy applies the access policy the way the resolver does: the
/// registry never consults it, a module-named class is its own trusted
/// default, a denied configuration file entry is skipped, and a denied
/// property aborts the lookup.
pub fn collect_checks(
    config: &LocatorConfig,
    catalog: &ServiceCatalog,
    capability: &str,
    fallback: Option<&str>,
) -> Vec<CheckResult> {
    let resolver = ProviderResolver::from_config(config, Arc::new(ClassLoader::new("system")))
        .registry(Arc::new(catalog.clone()))
        .build();
    let policy = resolver.instantiator().policy();
    let spec = ServiceSpec::<dyn Any>::new(capability.to_string()).capability();

    let mut results = Vec::new();
    // Set once a strategy wins or the lookup aborts.
    let mut decided = false;
    for strategy in resolver.strategies() {
        let kind = strategy.kind();
        let named = match kind {
            StrategyKind::Registry => Ok(catalog.providers(capability).first().cloned()),
            _ => strategy.configured_class(&spec),
        };

        let result = match named {
            Ok(Some(class_name)) if decided => CheckResult {
                strategy: kind,
                status: CheckStatus::Skip,
                message: format!("{class_name} (not reached)"),
                class_name: Some(class_name),
            },
            Ok(Some(class_name)) => {
                let access = match kind {
                    StrategyKind::Registry | StrategyKind::Module => Ok(()),
                    _ => policy.check(&class_name),
                };
                match access {
                    Ok(()) => CheckResult {
                        strategy: kind,
                        status: CheckStatus::Pass,
                        message: class_name.clone(),
                        class_name: Some(class_name),
                    },
                    Err(e) => CheckResult {
                        strategy: kind,
                        status: CheckStatus::Fail,
                        message: e.to_string(),
                        class_name: Some(class_name),
                    },
                }
            }
            Ok(None) => CheckResult {
                strategy: kind,
                status: CheckStatus::Skip,
                message: "nothing configured".to_string(),
                class_name: None,
            },
            Err(e) => CheckResult {
                strategy: kind,
                status: CheckStatus::Warn,
                message: e.to_string(),
                class_name: None,
            },
        };
        decided |= result.status == CheckStatus::Pass
            || (result.status == CheckStatus::Fail && kind == StrategyKind::Property);
        results.push(result);
    }

    results.push(match fallback {
        Some(class_name) => CheckResult {
            strategy: StrategyKind::Fallback,
            status: if decided {
                CheckStatus::Skip
            } else {
                CheckStatus::Pass
            },
            message: class_name.to_string(),
            class_name: Some(class_name.to_string()),
        },
        None => CheckResult {
            strategy: StrategyKind::Fallback,
            status: CheckStatus::Skip,
            message: "no fallback given".to_string(),
            class_name: None,
        },
    });

    results
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let name = result.strategy.to_string();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
            CheckStatus::Skip => ("-".dimmed(), result.message.dimmed()),
        };
        format!("    {symbol} {name:<12} {message}")
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
            CheckStatus::Skip => "[SKIP]",
        };
        format!("    {tag} {name:<12} {}", result.message)
    }
}
