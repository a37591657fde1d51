//! config command - Show the effective configuration

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Show effective configuration values and the files they came from.
pub fn show(ctx: &Context, dir: Option<&Path>) -> Result<()> {
    let result = Config::load(dir).context("Failed to load config")?;
    for warning in &result.warnings {
        output::warn(&warning.message, ctx.verbosity());
    }

    // Effective values are printed even in quiet mode
    println!("{}", render(&result.config));
    Ok(())
}

fn render(config: &Config) -> String {
    let mut lines = vec!["# Sources".to_string()];
    lines.push(format!(
        "global = {}",
        config
            .global_config_loaded_from()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    ));
    lines.push(format!(
        "directory = {}",
        config
            .directory_config_loaded_from()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    ));

    lines.push(String::new());
    lines.push("# Effective values".to_string());
    lines.push(format!("include_framework = {}", config.include_framework()));
    lines.push(format!("extension = {}", config.extension()));

    let probes = config.probe_paths();
    if probes.is_empty() {
        lines.push("probe_paths = (none)".to_string());
    } else {
        lines.push("probe_paths =".to_string());
        let shown: Vec<String> = probes.iter().map(|p| p.display().to_string()).collect();
        lines.push(output::format_list(&shown, "  "));
    }

    let filter = config.framework_filter();
    lines.push(format!("framework.prefixes = {}", filter.prefixes().join(", ")));
    lines.push(format!("framework.names = {}", filter.names().join(", ")));

    lines.join("\n")
}
