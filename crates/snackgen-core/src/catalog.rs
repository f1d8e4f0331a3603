//! # Catalog Module
//!
//! Component list and pairing-rule map, validated once and read-only after.
//!
//! - Parse catalog JSON (components array + rule object)
//! - Reject malformed input at load time
//! - Cache the bundled catalog for the life of the process
//!
//! A base whose category has no rule entry is legal: it simply has no
//! add-ons. Everything else that breaks a catalog invariant is fatal.

use crate::primitives::{MAX_CATALOG_FILE_SIZE, MAX_NAME_LENGTH};
use crate::{Component, SnackError, fold_key};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;

/// Base category → ordered add-on categories it may carry.
pub type RuleMap = BTreeMap<String, Vec<String>>;

/// File name of the component list inside a catalog directory.
pub const COMPONENTS_FILE: &str = "components.json";

/// File name of the rule map inside a catalog directory.
pub const RULES_FILE: &str = "combo_rules.json";

const BUNDLED_COMPONENTS: &str = include_str!("../data/components.json");
const BUNDLED_RULES: &str = include_str!("../data/combo_rules.json");

static BUNDLED: OnceLock<Catalog> = OnceLock::new();

/// An immutable, validated catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    components: Vec<Component>,
    rules: RuleMap,
}

impl Catalog {
    /// Build a catalog from already-parsed data.
    ///
    /// # Errors
    /// Returns `SnackError::InvalidCatalog` if any component is invalid.
    pub fn new(components: Vec<Component>, rules: RuleMap) -> Result<Self, SnackError> {
        validate_components(&components)?;
        Ok(Self { components, rules })
    }

    /// Parse a catalog from its two JSON documents.
    pub fn from_json_str(components_json: &str, rules_json: &str) -> Result<Self, SnackError> {
        let components: Vec<Component> = serde_json::from_str(components_json)
            .map_err(|e| SnackError::ParseError(format!("{}: {}", COMPONENTS_FILE, e)))?;
        let rules: RuleMap = serde_json::from_str(rules_json)
            .map_err(|e| SnackError::ParseError(format!("{}: {}", RULES_FILE, e)))?;
        Self::new(components, rules)
    }

    /// Load `components.json` and `combo_rules.json` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, SnackError> {
        let components = read_catalog_file(&dir.join(COMPONENTS_FILE))?;
        let rules = read_catalog_file(&dir.join(RULES_FILE))?;
        let catalog = Self::from_json_str(&components, &rules)?;
        tracing::info!(
            dir = %dir.display(),
            components = catalog.components.len(),
            rules = catalog.rules.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// All components, in catalog order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The full rule map.
    #[must_use]
    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    /// Add-on categories a base category may carry; empty when unlisted.
    #[must_use]
    pub fn allowed_add_categories(&self, base_category: &str) -> &[String] {
        self.rules
            .get(base_category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when the rule map lets `base_category` carry `add_category`.
    #[must_use]
    pub fn allows(&self, base_category: &str, add_category: &str) -> bool {
        self.allowed_add_categories(base_category)
            .iter()
            .any(|c| c == add_category)
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Component> {
        let key = fold_key(name);
        self.components.iter().find(|c| c.key() == key)
    }

    /// Counts describing the catalog's shape.
    #[must_use]
    pub fn summary(&self) -> CatalogSummary {
        let bases: Vec<&Component> = self.components.iter().filter(|c| c.is_base).collect();
        let add_categories: BTreeSet<&str> = self
            .components
            .iter()
            .filter(|c| c.is_add_on())
            .map(|c| c.category.as_str())
            .collect();

        let unpaired_bases = bases
            .iter()
            .filter(|b| {
                !self
                    .allowed_add_categories(&b.category)
                    .iter()
                    .any(|cat| add_categories.contains(cat.as_str()))
            })
            .map(|b| b.name.clone())
            .collect();

        CatalogSummary {
            components: self.components.len(),
            bases: bases.len(),
            add_ons: self.components.iter().filter(|c| c.is_add_on()).count(),
            sides: self.components.iter().filter(|c| c.is_side()).count(),
            rule_entries: self.rules.len(),
            unpaired_bases,
        }
    }
}

/// Shape of a catalog, as reported by hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub components: usize,
    pub bases: usize,
    pub add_ons: usize,
    pub sides: usize,
    pub rule_entries: usize,
    /// Bases for which no add-on in the catalog is legal.
    pub unpaired_bases: Vec<String>,
}

/// Validate a component list.
///
/// A list is valid if every component has:
/// - a non-empty name within length limits, unique case-insensitively
/// - a non-empty category within length limits
/// - finite, non-negative macros
pub fn validate_components(components: &[Component]) -> Result<(), SnackError> {
    let mut seen = BTreeSet::new();

    for (index, c) in components.iter().enumerate() {
        let name = c.name.trim();
        if name.is_empty() {
            return Err(SnackError::InvalidCatalog(format!(
                "component #{} has an empty name",
                index
            )));
        }
        if c.name.len() > MAX_NAME_LENGTH {
            return Err(SnackError::InvalidCatalog(format!(
                "component #{} name exceeds {} bytes",
                index, MAX_NAME_LENGTH
            )));
        }
        if c.category.trim().is_empty() || c.category.len() > MAX_NAME_LENGTH {
            return Err(SnackError::InvalidCatalog(format!(
                "component '{}' has an invalid category",
                c.name
            )));
        }
        if !c.macros.is_valid() {
            return Err(SnackError::InvalidCatalog(format!(
                "component '{}' has negative or non-finite macros",
                c.name
            )));
        }
        if !seen.insert(c.key()) {
            return Err(SnackError::InvalidCatalog(format!(
                "duplicate component name '{}'",
                c.name
            )));
        }
    }

    Ok(())
}

fn read_catalog_file(path: &Path) -> Result<String, SnackError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SnackError::IoError(format!("{}: {}", path.display(), e)))?;

    if metadata.len() > MAX_CATALOG_FILE_SIZE {
        return Err(SnackError::IoError(format!(
            "{}: file size {} bytes exceeds maximum allowed {} bytes",
            path.display(),
            metadata.len(),
            MAX_CATALOG_FILE_SIZE
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| SnackError::IoError(format!("{}: {}", path.display(), e)))
}

// =============================================================================
// BUNDLED CATALOG
// =============================================================================

/// The catalog compiled into this crate, parsed on first use.
///
/// Later calls return the cached reference. Two threads racing the first
/// call may both parse; the first value stored wins and both are identical.
pub fn bundled() -> Result<&'static Catalog, SnackError> {
    if let Some(catalog) = BUNDLED.get() {
        return Ok(catalog);
    }
    let catalog = Catalog::from_json_str(BUNDLED_COMPONENTS, BUNDLED_RULES)?;
    tracing::info!(
        components = catalog.components.len(),
        rules = catalog.rules.len(),
        "Bundled catalog loaded"
    );
    Ok(BUNDLED.get_or_init(|| catalog))
}

/// Full bundled component list.
pub fn load_components() -> Result<&'static [Component], SnackError> {
    bundled().map(Catalog::components)
}

/// Full bundled rule map.
pub fn load_rules() -> Result<&'static RuleMap, SnackError> {
    bundled().map(Catalog::rules)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Macros;

    fn rules(entries: &[(&str, &[&str])]) -> RuleMap {
        entries
            .iter()
            .map(|(k, v)| {
                (
                    (*k).to_string(),
                    v.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn bundled_catalog_loads_and_caches() {
        let first = bundled().expect("bundled");
        let second = bundled().expect("bundled");
        assert!(std::ptr::eq(first, second));
        assert!(!first.components().is_empty());
        assert!(!first.rules().is_empty());
    }

    #[test]
    fn load_functions_return_same_data() {
        let components = load_components().expect("components");
        let rules = load_rules().expect("rules");
        let catalog = bundled().expect("bundled");
        assert_eq!(components, catalog.components());
        assert_eq!(rules, catalog.rules());
    }

    #[test]
    fn missing_rule_is_empty_not_error() {
        let catalog = Catalog::new(Vec::new(), rules(&[("base.a", &["add.x"])])).expect("new");
        assert!(catalog.allowed_add_categories("base.zzz").is_empty());
        assert!(catalog.allows("base.a", "add.x"));
        assert!(!catalog.allows("base.a", "add.y"));
        assert!(!catalog.allows("base.zzz", "add.x"));
    }

    #[test]
    fn duplicate_names_rejected_case_insensitively() {
        let components = vec![
            Component::new("Walnuts", "add.nut", false),
            Component::new("WALNUTS", "add.nut", false),
        ];
        let result = Catalog::new(components, RuleMap::new());
        assert!(matches!(result, Err(SnackError::InvalidCatalog(_))));
    }

    #[test]
    fn empty_name_rejected() {
        let result = validate_components(&[Component::new("  ", "add.nut", false)]);
        assert!(matches!(result, Err(SnackError::InvalidCatalog(_))));
    }

    #[test]
    fn empty_category_rejected() {
        let result = validate_components(&[Component::new("Walnuts", "", false)]);
        assert!(matches!(result, Err(SnackError::InvalidCatalog(_))));
    }

    #[test]
    fn negative_macros_rejected() {
        let c = Component::new("Walnuts", "add.nut", false)
            .with_macros(Macros::new(10.0, -1.0, 0.0, 0.0));
        let result = validate_components(&[c]);
        assert!(matches!(result, Err(SnackError::InvalidCatalog(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = Catalog::from_json_str("[{\"name\": 3}]", "{}");
        assert!(matches!(result, Err(SnackError::ParseError(_))));

        let result = Catalog::from_json_str("[]", "{\"base.a\": \"add.x\"}");
        assert!(matches!(result, Err(SnackError::ParseError(_))));
    }

    #[test]
    fn find_is_case_insensitive() {
        let catalog = bundled().expect("bundled");
        let found = catalog.find("greek yogurt").expect("find");
        assert_eq!(found.name, "Greek Yogurt");
        assert!(catalog.find("Unobtainium").is_none());
    }

    #[test]
    fn summary_reports_unpaired_bases() {
        let components = vec![
            Component::new("Toast", "base.toast", true),
            Component::new("Oats", "base.oats", true),
            Component::new("Jam", "add.spread", false),
            Component::new("Grapes", "side.fruit", false),
        ];
        let catalog =
            Catalog::new(components, rules(&[("base.toast", &["add.spread"])])).expect("new");
        let summary = catalog.summary();
        assert_eq!(summary.components, 4);
        assert_eq!(summary.bases, 2);
        assert_eq!(summary.add_ons, 1);
        assert_eq!(summary.sides, 1);
        assert_eq!(summary.rule_entries, 1);
        assert_eq!(summary.unpaired_bases, vec!["Oats".to_string()]);
    }

    #[test]
    fn from_dir_reads_both_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(COMPONENTS_FILE),
            r#"[{"name":"Toast","category":"base.toast","isBase":true}]"#,
        )
        .expect("write");
        std::fs::write(dir.path().join(RULES_FILE), r#"{"base.toast":[]}"#).expect("write");

        let catalog = Catalog::from_dir(dir.path()).expect("load");
        assert_eq!(catalog.components().len(), 1);
        assert_eq!(catalog.rules().len(), 1);
    }

    #[test]
    fn from_dir_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = Catalog::from_dir(dir.path());
        assert!(matches!(result, Err(SnackError::IoError(_))));
    }
}
