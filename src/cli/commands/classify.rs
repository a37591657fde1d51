//! classify command - Report whether identities are framework units

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::eligibility::{FrameworkFilter, UnitClass};
use crate::core::types::UnitIdentity;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct Classification {
    identity: UnitIdentity,
    class: UnitClass,
}

/// Classify each identity with the effective framework rules.
pub fn classify(ctx: &Context, identities: &[String], dir: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load(dir).context("Failed to load config")?.config;
    let results = classify_all(&config.framework_filter(), identities);

    if json {
        output::json(&results)?;
        return Ok(());
    }

    let width = results
        .iter()
        .map(|c| c.identity.as_str().len())
        .max()
        .unwrap_or(0);
    for c in &results {
        output::print(
            format!("{:<width$}  {}", c.identity, c.class, width = width),
            ctx.verbosity(),
        );
    }
    Ok(())
}

fn classify_all(filter: &FrameworkFilter, identities: &[String]) -> Vec<Classification> {
    identities
        .iter()
        .map(|raw| {
            let identity = UnitIdentity::new(raw.as_str());
            Classification {
                class: filter.classify(identity.as_str()),
                identity,
            }
        })
        .collect()
}
