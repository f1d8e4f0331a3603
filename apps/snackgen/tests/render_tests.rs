//! Tests for text and JSON output shapes.

use snackgen::render;
use snackgen_core::{
    Component, Compositor, GenerateOptions, Macros, PlanOptions, Planner, bundled,
    generate_bundled,
};

fn combo() -> snackgen_core::GeneratedSnack {
    let base = Component::new("Greek Yogurt", "base.yogurt", true)
        .with_allergens(&["dairy"])
        .with_macros(Macros::new(100.0, 17.0, 6.0, 0.7));
    let berries = Component::new("Blueberries", "add.fruit", false)
        .with_macros(Macros::new(40.0, 0.5, 10.0, 0.2));
    Compositor::combo(&base, &[&berries])
}

// =============================================================================
// TEXT OUTPUT
// =============================================================================

#[test]
fn test_macros_line_format() {
    let line = render::macros_line(&Macros::new(140.0, 17.5, 16.0, 0.9));
    assert_eq!(line, "140 kcal | P 17.5g | C 16.0g | F 0.9g");
}

#[test]
fn test_snack_line_lists_allergens() {
    let line = render::snack_line(&combo());
    assert!(line.starts_with("Greek Yogurt with Blueberries ("));
    assert!(line.ends_with("[dairy]"));
}

#[test]
fn test_verbose_lines_include_image_term() {
    let snacks = vec![combo()];
    assert_eq!(render::snack_lines(&snacks, false).len(), 1);

    let verbose = render::snack_lines(&snacks, true);
    assert_eq!(verbose.len(), 2);
    assert!(verbose[0].starts_with(" 1. Greek Yogurt"));
    assert_eq!(verbose[1], "    image: Greek Yogurt Blueberries");
}

#[test]
fn test_summary_lines_mention_unpaired_bases() {
    let summary = bundled().expect("bundled").summary();
    let lines = render::summary_lines(&summary);
    assert!(lines.iter().any(|l| l.starts_with("Components:")));
    assert!(lines.iter().any(|l| l.contains("Overnight Oats")));
}

#[test]
fn test_plan_lines_group_by_window() {
    let catalog = bundled().expect("bundled");
    let plan = Planner::new(catalog).plan(&PlanOptions::new("render").with_windows(&["10:30"]));
    let lines = render::plan_lines(&plan, false);
    assert!(lines[0].starts_with("[10:30] "));
    assert_eq!(lines.len(), 1 + plan.windows[0].items.len());
}

// =============================================================================
// JSON OUTPUT
// =============================================================================

#[test]
fn test_combo_json_shape() {
    let json: serde_json::Value =
        serde_json::from_str(&render::to_json(&combo())).expect("valid json");

    assert_eq!(json["kind"], "combo");
    assert_eq!(json["isCombo"], true);
    assert_eq!(json["name"], "Greek Yogurt with Blueberries");
    assert_eq!(json["baseName"], "Greek Yogurt");
    assert_eq!(json["baseCategory"], "base.yogurt");
    assert_eq!(json["addNames"][0], "Blueberries");
    assert_eq!(json["calories"], 140.0);
    assert_eq!(json["imageSearch"], "Greek Yogurt Blueberries");
    assert_eq!(json["allergens"][0], "dairy");
}

#[test]
fn test_atomic_json_has_no_combo_fields() {
    let opts = GenerateOptions::atomic(1).with_seed("json");
    let snacks = generate_bundled(&opts).expect("generate");
    let json: serde_json::Value =
        serde_json::from_str(&render::to_json(&snacks)).expect("valid json");

    let item = &json[0];
    assert_eq!(item["kind"], "atomic");
    assert_eq!(item["isCombo"], false);
    assert!(item.get("baseName").is_none());
    assert!(item.get("addNames").is_none());
    assert!(item["name"].is_string());
}

#[test]
fn test_plan_json_shape() {
    let catalog = bundled().expect("bundled");
    let plan = Planner::new(catalog).plan(&PlanOptions::new("json").with_windows(&["15:00"]));
    let json: serde_json::Value =
        serde_json::from_str(&render::to_json(&plan)).expect("valid json");

    assert_eq!(json["seed"], "json");
    assert_eq!(json["fallback"], false);
    assert_eq!(json["windows"][0]["label"], "15:00");
    assert!(json["windows"][0]["items"].is_array());
    assert!(json["windows"][0]["rationale"].is_string());
}

#[test]
fn test_summary_json_shape() {
    let summary = bundled().expect("bundled").summary();
    let json: serde_json::Value =
        serde_json::from_str(&render::to_json(&summary)).expect("valid json");
    assert!(json["components"].as_u64().is_some_and(|n| n > 0));
    assert!(json["unpaired_bases"].is_array());
}
