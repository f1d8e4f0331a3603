//! # Planner Module
//!
//! Arranges generated snacks into per-window slates.
//!
//! A plan draws two pools from the generator, both derived from one session
//! seed:
//! - combos: `<seed>:combo`, one add-on each
//! - singles: `<seed>:single`, side items only, no bases
//!
//! Each window then takes combos with distinct base categories and fresh
//! first add-ons, followed by singles. An empty combo pool still runs the
//! window loop over singles alone. Only when both pools come back empty does
//! the plan degrade to the `<seed>:fallback` slate.

use crate::primitives::BALANCED_PREFERENCE;
use crate::{Catalog, GenerateOptions, GeneratedSnack, Generator, fold_key};
use serde::Serialize;
use std::collections::BTreeSet;

/// Label used when a fallback plan is requested without windows.
pub const DEFAULT_WINDOW: &str = "15:00";

/// Rationale attached to a regular window.
pub const WINDOW_RATIONALE: &str = "Snack to bridge meal gap with your preference.";

/// Rationale attached to every window of a fallback plan.
pub const FALLBACK_RATIONALE: &str = "Quick picks while we prepare combos.";

/// Singles required in every window when the singles pool allows it.
const MIN_SINGLES_PER_WINDOW: usize = 2;

/// Planner tuning and request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub windows: Vec<String>,
    pub preference: String,
    pub restrictions: Vec<String>,
    pub seed: String,
    pub combos_per_window: usize,
    pub items_per_window: usize,
    pub combo_pool_size: usize,
    pub singles_pool_size: usize,
    pub fallback_pool_size: usize,
}

impl PlanOptions {
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            windows: Vec::new(),
            preference: BALANCED_PREFERENCE.to_string(),
            restrictions: Vec::new(),
            seed: seed.into(),
            combos_per_window: 2,
            items_per_window: 4,
            combo_pool_size: 6,
            singles_pool_size: 10,
            fallback_pool_size: 4,
        }
    }

    #[must_use]
    pub fn with_windows<S: AsRef<str>>(mut self, windows: &[S]) -> Self {
        self.windows = windows.iter().map(|w| w.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_preference(mut self, preference: impl Into<String>) -> Self {
        self.preference = preference.into();
        self
    }

    #[must_use]
    pub fn with_restrictions<S: AsRef<str>>(mut self, restrictions: &[S]) -> Self {
        self.restrictions = restrictions.iter().map(|r| r.as_ref().to_string()).collect();
        self
    }

    fn pool_options(&self, suffix: &str, base: GenerateOptions) -> GenerateOptions {
        base.with_seed(format!("{}:{}", self.seed, suffix))
            .with_preference(self.preference.clone())
            .with_restrictions(&self.restrictions)
    }

    fn combo_pool(&self) -> GenerateOptions {
        self.pool_options("combo", GenerateOptions::combos(self.combo_pool_size))
            .with_adds(1, 1)
    }

    fn singles_pool(&self, suffix: &str, limit: usize) -> GenerateOptions {
        self.pool_options(suffix, GenerateOptions::atomic(limit))
            .without_bases()
            .sides_only()
    }
}

/// One window of a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPlan {
    pub label: String,
    pub items: Vec<GeneratedSnack>,
    pub rationale: String,
}

/// A full plan: one slate per window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnackPlan {
    pub seed: String,
    pub fallback: bool,
    pub windows: Vec<WindowPlan>,
}

/// Builds plans from a generator.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'c> {
    generator: Generator<'c>,
}

impl<'c> Planner<'c> {
    #[must_use]
    pub const fn new(catalog: &'c Catalog) -> Self {
        Self {
            generator: Generator::new(catalog),
        }
    }

    /// Build a plan. Deterministic for a given seed and catalog.
    #[must_use]
    pub fn plan(&self, options: &PlanOptions) -> SnackPlan {
        let combos = self.generator.generate(&options.combo_pool());
        let singles = self
            .generator
            .generate(&options.singles_pool("single", options.singles_pool_size));
        if combos.is_empty() && singles.is_empty() {
            tracing::debug!(seed = %options.seed, "Both pools empty, using fallback plan");
            return self.fallback_plan(options);
        }
        if combos.is_empty() {
            tracing::debug!(seed = %options.seed, "No combos available, planning singles only");
        }

        let mut used = BTreeSet::new();
        let mut used_adds = BTreeSet::new();
        let windows = options
            .windows
            .iter()
            .map(|label| WindowPlan {
                label: label.clone(),
                items: fill_window(options, &combos, &singles, &mut used, &mut used_adds),
                rationale: WINDOW_RATIONALE.to_string(),
            })
            .collect();

        SnackPlan {
            seed: options.seed.clone(),
            fallback: false,
            windows,
        }
    }

    fn fallback_plan(&self, options: &PlanOptions) -> SnackPlan {
        let singles = self
            .generator
            .generate(&options.singles_pool("fallback", options.fallback_pool_size));
        let items: Vec<GeneratedSnack> = singles
            .into_iter()
            .take(options.items_per_window)
            .collect();

        let labels = if options.windows.is_empty() {
            vec![DEFAULT_WINDOW.to_string()]
        } else {
            options.windows.clone()
        };

        SnackPlan {
            seed: options.seed.clone(),
            fallback: true,
            windows: labels
                .into_iter()
                .map(|label| WindowPlan {
                    label,
                    items: items.clone(),
                    rationale: FALLBACK_RATIONALE.to_string(),
                })
                .collect(),
        }
    }
}

fn first_add_key(snack: &GeneratedSnack) -> Option<String> {
    snack.add_names().first().map(|a| fold_key(a))
}

fn fill_window(
    options: &PlanOptions,
    combos: &[GeneratedSnack],
    singles: &[GeneratedSnack],
    used: &mut BTreeSet<String>,
    used_adds: &mut BTreeSet<String>,
) -> Vec<GeneratedSnack> {
    let mut items: Vec<GeneratedSnack> = Vec::new();
    let mut window_bases: BTreeSet<&str> = BTreeSet::new();

    // Combos: distinct base categories, first add-on fresh across the plan.
    for combo in combos {
        if items.len() >= options.combos_per_window {
            break;
        }
        let key = combo.key();
        let base_category = combo.base_category().unwrap_or_default();
        let first_add = first_add_key(combo);
        if used.contains(&key)
            || window_bases.contains(base_category)
            || first_add.as_ref().is_some_and(|a| used_adds.contains(a))
        {
            continue;
        }
        items.push(combo.clone());
        used.insert(key);
        window_bases.insert(base_category);
        used_adds.extend(first_add);
    }

    for single in singles {
        if items.len() >= options.items_per_window {
            break;
        }
        if used.insert(single.key()) {
            items.push(single.clone());
        }
    }

    // Top up, reusing pool heads once both pools are spent.
    while items.len() < options.items_per_window {
        let fresh = singles
            .iter()
            .chain(combos)
            .find(|s| !used.contains(&s.key()));
        let Some(next) = fresh.or_else(|| singles.first()).or_else(|| combos.first()) else {
            break;
        };
        used.insert(next.key());
        items.push(next.clone());
    }

    if !singles.is_empty() {
        let mut guard = 0;
        while items.iter().filter(|s| !s.is_combo()).count() < MIN_SINGLES_PER_WINDOW
            && guard < singles.len() + 2
        {
            let fresh = singles.iter().find(|s| !used.contains(&s.key()));
            let candidate = match fresh {
                Some(single) => {
                    used.insert(single.key());
                    single
                }
                None => &singles[guard % singles.len()],
            };
            items.push(candidate.clone());
            guard += 1;
        }
    }

    items
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, RuleMap};

    fn catalog(with_rules: bool) -> Catalog {
        let mut components = vec![
            Component::new("Toast", "base.toast", true),
            Component::new("Yogurt", "base.yogurt", true),
            Component::new("Jam", "add.spread", false),
            Component::new("Butter", "add.spread", false),
            Component::new("Blueberries", "add.fruit", false),
            Component::new("Raspberries", "add.fruit", false),
        ];
        for side in ["Grapes", "Carrots", "Edamame", "Clementine", "Snap Peas", "Jerky"] {
            components.push(Component::new(side, "side.snack", false));
        }
        let mut rules = RuleMap::new();
        if with_rules {
            rules.insert("base.toast".to_string(), vec!["add.spread".to_string()]);
            rules.insert("base.yogurt".to_string(), vec!["add.fruit".to_string()]);
        }
        Catalog::new(components, rules).expect("catalog")
    }

    #[test]
    fn windows_get_two_combos_and_two_singles() {
        let catalog = catalog(true);
        let options = PlanOptions::new("session").with_windows(&["10:30", "15:30"]);
        let plan = Planner::new(&catalog).plan(&options);

        assert!(!plan.fallback);
        assert_eq!(plan.windows.len(), 2);
        assert_eq!(plan.windows[0].label, "10:30");

        let first = &plan.windows[0];
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.rationale, WINDOW_RATIONALE);

        let combos: Vec<&GeneratedSnack> = first.items.iter().filter(|s| s.is_combo()).collect();
        assert_eq!(combos.len(), 2);
        assert_ne!(combos[0].base_category(), combos[1].base_category());
        assert_eq!(first.items.iter().filter(|s| !s.is_combo()).count(), 2);
    }

    #[test]
    fn first_add_ons_never_repeat_across_windows() {
        let catalog = catalog(true);
        let options = PlanOptions::new("adds").with_windows(&["a", "b", "c"]);
        let plan = Planner::new(&catalog).plan(&options);

        let mut seen = BTreeSet::new();
        for window in &plan.windows {
            for combo in window.items.iter().filter(|s| s.is_combo()) {
                let add = first_add_key(combo).expect("combo has add-ons");
                assert!(seen.insert(add), "first add-on repeated across windows");
            }
        }
    }

    #[test]
    fn every_window_keeps_two_singles() {
        let catalog = catalog(true);
        let options = PlanOptions::new("thin").with_windows(&["a", "b", "c", "d", "e"]);
        let plan = Planner::new(&catalog).plan(&options);
        for window in &plan.windows {
            assert!(window.items.iter().filter(|s| !s.is_combo()).count() >= 2);
        }
    }

    /// One base with no rules and twelve sides: no combo can be built.
    fn singles_only_catalog() -> Catalog {
        let mut components = vec![Component::new("Oats", "base.oats", true)];
        for i in 0..12 {
            components.push(Component::new(format!("Side{i}"), "side.snack", false));
        }
        Catalog::new(components, RuleMap::new()).expect("catalog")
    }

    #[test]
    fn no_combos_spreads_singles_across_windows() {
        let catalog = singles_only_catalog();
        let options = PlanOptions::new("fb").with_windows(&["a", "b", "c"]);
        let plan = Planner::new(&catalog).plan(&options);

        assert!(!plan.fallback);
        assert_eq!(plan.windows.len(), 3);
        for window in &plan.windows {
            assert_eq!(window.rationale, WINDOW_RATIONALE);
            assert_eq!(window.items.len(), 4);
            assert!(window.items.iter().all(|s| !s.is_combo()));
        }

        let names = |i: usize| -> BTreeSet<String> {
            plan.windows[i].items.iter().map(GeneratedSnack::key).collect()
        };
        let (a, b, c) = (names(0), names(1), names(2));
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
        assert!(a.is_disjoint(&b));

        // The ten-item pool leaves two fresh singles for the third window.
        let fresh: Vec<&GeneratedSnack> = plan.windows[2]
            .items
            .iter()
            .take(2)
            .collect();
        assert!(fresh.iter().all(|s| !a.contains(&s.key()) && !b.contains(&s.key())));
        assert!(c.len() < 4);
    }

    #[test]
    fn empty_pools_use_fallback_plan() {
        let catalog = Catalog::new(
            vec![Component::new("Oats", "base.oats", true)],
            RuleMap::new(),
        )
        .expect("catalog");

        let plan = Planner::new(&catalog).plan(&PlanOptions::new("empty"));
        assert!(plan.fallback);
        assert_eq!(plan.windows.len(), 1);
        assert_eq!(plan.windows[0].label, DEFAULT_WINDOW);
        assert_eq!(plan.windows[0].rationale, FALLBACK_RATIONALE);
        assert!(plan.windows[0].items.is_empty());

        let plan = Planner::new(&catalog).plan(&PlanOptions::new("empty").with_windows(&["x", "y"]));
        assert_eq!(plan.windows.len(), 2);
        assert!(plan.windows.iter().all(|w| w.items.is_empty()));
    }

    #[test]
    fn plans_are_deterministic() {
        let catalog = catalog(true);
        let options = PlanOptions::new("same").with_windows(&["a", "b"]);
        let planner = Planner::new(&catalog);
        assert_eq!(planner.plan(&options), planner.plan(&options));
    }
}
