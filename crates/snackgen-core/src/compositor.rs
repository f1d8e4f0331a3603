//! # Compositor Module
//!
//! Output assembly for generated snacks.
//!
//! - Combo naming grammar (`build_name`)
//! - Macro aggregation (`sum_macros`)
//! - Allergen union (`union_allergens`)
//! - `GeneratedSnack` construction for atomic items and combos
//!
//! All functions are pure: the same components always compose to the same
//! snack.

use crate::{Component, GeneratedSnack, Macros, SnackKind, fold_key};
use std::collections::BTreeSet;

/// Join a base name with its add-on names.
///
/// - no add-ons: `"Base"`
/// - one: `"Base with A"`
/// - two: `"Base with A and B"`
/// - more: `"Base with A, B and C"`
#[must_use]
pub fn build_name<S: AsRef<str>>(base_name: &str, add_names: &[S]) -> String {
    match add_names {
        [] => base_name.to_string(),
        [only] => format!("{} with {}", base_name, only.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!(
                "{} with {} and {}",
                base_name,
                head.join(", "),
                last.as_ref()
            )
        }
    }
}

/// Field-wise macro totals across components.
#[must_use]
pub fn sum_macros<'a, I>(items: I) -> Macros
where
    I: IntoIterator<Item = &'a Component>,
{
    items
        .into_iter()
        .fold(Macros::ZERO, |total, item| total + item.macros)
}

/// Allergen union in first-seen order, de-duplicated case-insensitively.
#[must_use]
pub fn union_allergens<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Component>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for allergen in items.into_iter().flat_map(|c| c.allergens.iter()) {
        if seen.insert(fold_key(allergen)) {
            out.push(allergen.clone());
        }
    }
    out
}

/// The Compositor assembles `GeneratedSnack` values from catalog components.
pub struct Compositor;

impl Compositor {
    /// A single component served on its own.
    #[must_use]
    pub fn atomic(component: &Component) -> GeneratedSnack {
        GeneratedSnack {
            name: component.name.clone(),
            macros: component.macros,
            allergens: component.allergens.clone(),
            image_search: component.image_term().to_string(),
            kind: SnackKind::Atomic,
        }
    }

    /// A base with its add-ons, in draw order.
    ///
    /// The image term pairs the base's canonical term with the first add-on.
    #[must_use]
    pub fn combo(base: &Component, adds: &[&Component]) -> GeneratedSnack {
        let add_names: Vec<String> = adds.iter().map(|a| a.name.clone()).collect();
        let parts = || std::iter::once(base).chain(adds.iter().copied());

        let image_search = match adds.first() {
            Some(first) => format!("{} {}", base.image_term(), first.name),
            None => base.image_term().to_string(),
        };

        GeneratedSnack {
            name: build_name(&base.name, &add_names),
            macros: sum_macros(parts()),
            allergens: union_allergens(parts()),
            image_search,
            kind: SnackKind::Combo {
                base_name: base.name.clone(),
                base_category: base.category.clone(),
                add_names,
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
