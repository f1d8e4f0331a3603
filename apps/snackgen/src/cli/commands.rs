//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{GenerateArgs, Output};
use snackgen::AppConfig;
use snackgen::render;
use snackgen_core::rng::time_seed;
use snackgen_core::{Catalog, Generator, Planner, SnackError, bundled};
use std::borrow::Cow;
use std::path::Path;

// =============================================================================
// CATALOG RESOLUTION
// =============================================================================

/// The catalog for this run: `--catalog-dir`, then `[catalog] dir`, then the
/// bundled data.
pub fn open_catalog(
    cli_dir: Option<&Path>,
    config: &AppConfig,
) -> Result<Cow<'static, Catalog>, SnackError> {
    match cli_dir.or(config.catalog.dir.as_deref()) {
        Some(dir) => Catalog::from_dir(dir).map(Cow::Owned),
        None => bundled().map(Cow::Borrowed),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// =============================================================================
// GENERATE COMMAND
// =============================================================================

/// Generate snacks.
pub fn cmd_generate(
    config: &AppConfig,
    catalog_dir: Option<&Path>,
    out: Output,
    args: &GenerateArgs,
) -> Result<(), SnackError> {
    let catalog = open_catalog(catalog_dir, config)?;

    let mut options = config.generate_options(!args.atomic);
    let seed = args.seed.clone().unwrap_or_else(time_seed);
    options.seed = Some(seed.clone());
    if let Some(limit) = args.limit {
        options.limit = limit;
    }
    if let Some(preference) = &args.preference {
        options.preference.clone_from(preference);
    }
    if !args.restrict.is_empty() {
        options.restrictions.clone_from(&args.restrict);
    }
    if let Some(min_adds) = args.min_adds {
        options.min_adds = min_adds;
    }
    if let Some(max_adds) = args.max_adds {
        options.max_adds = max_adds;
    }
    options.exclude.clone_from(&args.exclude);
    options.exclude_add_names.clone_from(&args.exclude_adds);
    options.lock_base_name.clone_from(&args.lock_base);
    options.lock_add_name.clone_from(&args.lock_add);
    options.side_only = args.sides_only;
    options.allow_bases = !args.no_bases;

    tracing::info!(
        seed = %seed,
        combine = options.combine,
        limit = options.limit,
        preference = %options.preference,
        "Generating snacks"
    );

    let snacks = Generator::new(&catalog).generate(&options);

    if out.json {
        let output = serde_json::json!({
            "seed": seed,
            "count": snacks.len(),
            "snacks": snacks,
        });
        println!("{}", render::to_json(&output));
        return Ok(());
    }

    if snacks.is_empty() {
        println!("No snacks matched (seed {}).", seed);
        return Ok(());
    }
    if out.verbose {
        println!("Seed: {}", seed);
        println!();
    }
    print_lines(&render::snack_lines(&snacks, out.verbose));

    Ok(())
}

// =============================================================================
// PLAN COMMAND
// =============================================================================

/// Build a per-window plan.
pub fn cmd_plan(
    config: &AppConfig,
    catalog_dir: Option<&Path>,
    out: Output,
    seed: Option<String>,
    windows: &[String],
    preference: Option<String>,
    restrict: &[String],
) -> Result<(), SnackError> {
    let catalog = open_catalog(catalog_dir, config)?;

    let mut options = config.plan_options(seed.unwrap_or_else(time_seed));
    if !windows.is_empty() {
        options.windows = windows.to_vec();
    }
    if let Some(preference) = preference {
        options.preference = preference;
    }
    if !restrict.is_empty() {
        options.restrictions = restrict.to_vec();
    }

    tracing::info!(
        seed = %options.seed,
        windows = options.windows.len(),
        "Building plan"
    );

    let plan = Planner::new(&catalog).plan(&options);

    if out.json {
        println!("{}", render::to_json(&plan));
        return Ok(());
    }

    println!("snackgen Plan (seed {})", plan.seed);
    println!("==========================");
    if plan.windows.is_empty() {
        println!("No windows requested.");
        return Ok(());
    }
    print_lines(&render::plan_lines(&plan, out.verbose));

    Ok(())
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// Show catalog summary.
pub fn cmd_catalog(
    config: &AppConfig,
    catalog_dir: Option<&Path>,
    out: Output,
) -> Result<(), SnackError> {
    let catalog = open_catalog(catalog_dir, config)?;
    let summary = catalog.summary();

    if out.json {
        println!("{}", render::to_json(&summary));
        return Ok(());
    }

    println!("snackgen Catalog");
    println!("================");
    print_lines(&render::summary_lines(&summary));

    if out.verbose {
        println!();
        println!("Rules:");
        for (base, adds) in catalog.rules() {
            println!("  {:<14} -> {}", base, adds.join(", "));
        }
    }

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Load and validate a catalog directory.
pub fn cmd_validate(dir: &Path, out: Output) -> Result<(), SnackError> {
    let catalog = Catalog::from_dir(dir)?;
    let summary = catalog.summary();

    for base in &summary.unpaired_bases {
        tracing::warn!(base = %base, "Base has no legal add-ons");
    }

    if out.json {
        let output = serde_json::json!({
            "dir": dir.to_string_lossy(),
            "valid": true,
            "summary": summary,
        });
        println!("{}", render::to_json(&output));
        return Ok(());
    }

    println!("Catalog at {} is valid.", dir.display());
    print_lines(&render::summary_lines(&summary));

    Ok(())
}
