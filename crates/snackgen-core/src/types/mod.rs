//! # Core Type Definitions
//!
//! This module contains the data model shared by every snackgen module:
//! - Catalog building blocks (`Component`, `Macros`)
//! - Generation output (`GeneratedSnack`, `SnackKind`)
//! - Error types (`SnackError`)
//!
//! ## Identity
//!
//! Component and snack names are compared case-insensitively everywhere.
//! `fold_key` is the single place that defines what "the same name" means.

use crate::primitives::{ADD_CATEGORY_PREFIX, BALANCED_PREFERENCE, SIDE_CATEGORY_PREFIX};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::ops::{Add, AddAssign};
use thiserror::Error;

/// Normalize a name, tag or restriction term for case-insensitive comparison.
#[must_use]
pub fn fold_key(s: &str) -> String {
    s.to_lowercase()
}

// =============================================================================
// MACROS
// =============================================================================

/// Macro-nutrient totals for one component or one generated snack.
///
/// Missing fields in catalog input default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

impl Macros {
    /// All-zero totals.
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    /// Create macro totals from explicit values.
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// True when every field is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Macros {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

// =============================================================================
// COMPONENT
// =============================================================================

/// A reusable snack building block from the catalog.
///
/// Bases anchor combinations; components in an `add.` category are add-ons
/// that a base may carry when the rule map allows the pairing. Everything
/// else (for example `side.` items) is only ever served on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Display name, unique within the catalog (case-insensitive).
    pub name: String,
    /// Dotted category key used to resolve pairing rules.
    #[serde(default)]
    pub category: String,
    /// Eligible to anchor a combination.
    #[serde(default)]
    pub is_base: bool,
    /// Preference labels this component satisfies.
    #[serde(default)]
    pub type_tags: Vec<String>,
    /// Restriction labels this component carries.
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(flatten)]
    pub macros: Macros,
    /// Ordered image search terms; the first one is canonical.
    #[serde(default)]
    pub image_search: Vec<String>,
}

impl Component {
    /// Create a component with no tags, allergens or search terms.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, is_base: bool) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            is_base,
            type_tags: Vec::new(),
            allergens: Vec::new(),
            macros: Macros::ZERO,
            image_search: Vec::new(),
        }
    }

    /// Builder: set preference tags.
    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.type_tags = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    /// Builder: set allergen tags.
    #[must_use]
    pub fn with_allergens(mut self, allergens: &[&str]) -> Self {
        self.allergens = allergens.iter().map(|a| (*a).to_string()).collect();
        self
    }

    /// Builder: set macro totals.
    #[must_use]
    pub fn with_macros(mut self, macros: Macros) -> Self {
        self.macros = macros;
        self
    }

    /// Case-insensitive identity key.
    #[must_use]
    pub fn key(&self) -> String {
        fold_key(&self.name)
    }

    /// An add-on is a non-base component in the `add.` family.
    #[must_use]
    pub fn is_add_on(&self) -> bool {
        !self.is_base && self.category.starts_with(ADD_CATEGORY_PREFIX)
    }

    /// A side is any component in the `side.` family.
    #[must_use]
    pub fn is_side(&self) -> bool {
        self.category.starts_with(SIDE_CATEGORY_PREFIX)
    }

    /// `balanced` is a pass-through: it matches every component.
    #[must_use]
    pub fn matches_preference(&self, preference: &str) -> bool {
        preference.eq_ignore_ascii_case(BALANCED_PREFERENCE)
            || self
                .type_tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case(preference))
    }

    /// First image search term, or the name when none is listed.
    #[must_use]
    pub fn image_term(&self) -> &str {
        self.image_search
            .first()
            .map(String::as_str)
            .unwrap_or(&self.name)
    }
}

// =============================================================================
// GENERATED SNACK
// =============================================================================

/// Shape of a generated snack.
///
/// Only combinations carry base and add-on fields, so consumers never need
/// to check for their presence at runtime.
///
/// Serialized as a `kind` tag plus an `isCombo` flag, followed by the combo
/// fields for combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnackKind {
    /// A single catalog component served on its own.
    Atomic,
    /// One base plus one or more add-ons.
    Combo {
        base_name: String,
        base_category: String,
        add_names: Vec<String>,
    },
}

impl Serialize for SnackKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Atomic => {
                let mut state = serializer.serialize_struct("SnackKind", 2)?;
                state.serialize_field("kind", "atomic")?;
                state.serialize_field("isCombo", &false)?;
                state.end()
            }
            Self::Combo {
                base_name,
                base_category,
                add_names,
            } => {
                let mut state = serializer.serialize_struct("SnackKind", 5)?;
                state.serialize_field("kind", "combo")?;
                state.serialize_field("isCombo", &true)?;
                state.serialize_field("baseName", base_name)?;
                state.serialize_field("baseCategory", base_category)?;
                state.serialize_field("addNames", add_names)?;
                state.end()
            }
        }
    }
}

/// One item produced by a generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSnack {
    /// Display name; for combos fully determined by base and add-on names.
    pub name: String,
    #[serde(flatten)]
    pub macros: Macros,
    /// De-duplicated allergen union.
    pub allergens: Vec<String>,
    /// Search term used by hosts to look up an illustration.
    pub image_search: String,
    #[serde(flatten)]
    pub kind: SnackKind,
}

impl GeneratedSnack {
    /// Case-insensitive identity key.
    #[must_use]
    pub fn key(&self) -> String {
        fold_key(&self.name)
    }

    #[must_use]
    pub fn is_combo(&self) -> bool {
        matches!(self.kind, SnackKind::Combo { .. })
    }

    /// Base name for combos, `None` for atomic items.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        match &self.kind {
            SnackKind::Combo { base_name, .. } => Some(base_name),
            SnackKind::Atomic => None,
        }
    }

    /// Base category for combos, `None` for atomic items.
    #[must_use]
    pub fn base_category(&self) -> Option<&str> {
        match &self.kind {
            SnackKind::Combo { base_category, .. } => Some(base_category),
            SnackKind::Atomic => None,
        }
    }

    /// Add-on names for combos, empty for atomic items.
    #[must_use]
    pub fn add_names(&self) -> &[String] {
        match &self.kind {
            SnackKind::Combo { add_names, .. } => add_names,
            SnackKind::Atomic => &[],
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in snackgen.
///
/// Only catalog loading and application configuration are fallible.
/// Generation itself never fails: under-supply yields fewer items.
#[derive(Debug, Error)]
pub enum SnackError {
    /// Catalog or configuration file could not be read.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Catalog or configuration content is not well-formed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Catalog content parsed but violates a catalog invariant.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Application configuration is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
