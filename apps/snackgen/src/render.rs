//! # Rendering
//!
//! Human-readable lines and JSON documents for command output.

use serde::Serialize;
use snackgen_core::{CatalogSummary, GeneratedSnack, Macros, SnackPlan};

/// Compact macro line: `140 kcal | P 17.5g | C 16.0g | F 0.8g`.
#[must_use]
pub fn macros_line(macros: &Macros) -> String {
    format!(
        "{:.0} kcal | P {:.1}g | C {:.1}g | F {:.1}g",
        macros.calories, macros.protein, macros.carbs, macros.fat
    )
}

/// One snack on one line; allergens appended in brackets when present.
#[must_use]
pub fn snack_line(snack: &GeneratedSnack) -> String {
    let mut line = format!("{} ({})", snack.name, macros_line(&snack.macros));
    if !snack.allergens.is_empty() {
        line.push_str(&format!(" [{}]", snack.allergens.join(", ")));
    }
    line
}

/// Numbered snack list. `verbose` adds the image search term under each item.
#[must_use]
pub fn snack_lines(snacks: &[GeneratedSnack], verbose: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(snacks.len());
    for (i, snack) in snacks.iter().enumerate() {
        lines.push(format!("{:>2}. {}", i + 1, snack_line(snack)));
        if verbose {
            lines.push(format!("    image: {}", snack.image_search));
        }
    }
    lines
}

/// Window-by-window plan listing.
#[must_use]
pub fn plan_lines(plan: &SnackPlan, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for window in &plan.windows {
        lines.push(format!("[{}] {}", window.label, window.rationale));
        lines.extend(
            snack_lines(&window.items, verbose)
                .into_iter()
                .map(|l| format!("  {}", l)),
        );
    }
    lines
}

#[must_use]
pub fn summary_lines(summary: &CatalogSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Components:   {}", summary.components),
        format!("Bases:        {}", summary.bases),
        format!("Add-ons:      {}", summary.add_ons),
        format!("Sides:        {}", summary.sides),
        format!("Rule entries: {}", summary.rule_entries),
    ];
    if !summary.unpaired_bases.is_empty() {
        lines.push(format!(
            "Bases without add-ons: {}",
            summary.unpaired_bases.join(", ")
        ));
    }
    lines
}

/// Pretty JSON for `--json-mode` output.
#[must_use]
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
