//! load command - Load a directory of units and their reference closure

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::args::LoadArgs;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::UnitExtension;
use crate::host::{HostRuntime, ManifestRuntime};
use crate::loader::{self, ClosureOptions, ClosureReport};
use crate::ui::output::{self, Verbosity};

/// Load every unit in a directory, then the closure of their references.
pub fn load(ctx: &Context, args: &LoadArgs) -> Result<()> {
    let verbosity = ctx.verbosity();

    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => loader::program_directory()?,
    };

    let loaded = Config::load(Some(&dir)).context("Failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }
    let config = loaded.config;

    let extension = match &args.extension {
        Some(ext) => UnitExtension::new(ext.as_str()).context("Invalid --extension")?,
        None => config.extension(),
    };
    let options = ClosureOptions {
        include_framework: args
            .include_framework_flag()
            .unwrap_or_else(|| config.include_framework()),
        extension: extension.clone(),
        filter: config.framework_filter(),
    };

    let runtime = ManifestRuntime::new(probe_paths(&dir, args, &config), extension);
    debug!(probe_paths = ?runtime.probe_paths(), "resolved probe paths");

    for path in &args.preload {
        let outcome = runtime
            .load_from_path(path)
            .with_context(|| format!("Failed to preload '{}'", path.display()))?;
        debug!(identity = %outcome.identity, fresh = outcome.fresh, "preloaded");
    }

    let report = loader::load_dependency_closure_in(&runtime, &dir, &options)
        .with_context(|| format!("Failed to load dependency closure of '{}'", dir.display()))?;

    if args.json {
        output::json(&report)?;
    } else {
        print_report(&report, verbosity);
    }

    Ok(())
}

/// Probe order: the unit directory, then `--probe` flags, then config.
fn probe_paths(dir: &Path, args: &LoadArgs, config: &Config) -> Vec<PathBuf> {
    let mut paths = vec![dir.to_path_buf()];
    for path in args.probe.iter().cloned().chain(config.probe_paths()) {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

fn print_report(report: &ClosureReport, verbosity: Verbosity) {
    for failed in &report.bulk.failed {
        output::warn(
            format!("skipped '{}': {}", failed.path.display(), failed.error),
            verbosity,
        );
    }

    output::print(
        format!("Loaded dependency closure of {}", report.directory.display()),
        verbosity,
    );
    output::print(
        format!(
            "  preloaded: {} ({} already loaded, {} skipped, {} failed)",
            output::plural(report.bulk.loaded.len(), "unit", "units"),
            report.bulk.already_loaded.len(),
            report.bulk.skipped.len(),
            report.bulk.failed.len(),
        ),
        verbosity,
    );
    output::print(
        format!(
            "  walked:    {}",
            output::plural(report.walk_loaded, "unit", "units")
        ),
        verbosity,
    );
    output::print(
        format!(
            "  total:     {} registered in {}ms",
            output::plural(report.registry_size, "unit", "units"),
            report.elapsed_ms
        ),
        verbosity,
    );

    if verbosity == Verbosity::Debug && !report.registered.is_empty() {
        output::print(output::format_list(&report.registered, "    "), verbosity);
    }
}
