//! # Configuration
//!
//! Optional TOML file layered under CLI flags:
//!
//! ```toml
//! [catalog]
//! dir = "./catalog"
//!
//! [generate]
//! preference = "high-protein"
//! limit = 6
//! min_adds = 1
//! max_adds = 2
//! restrictions = ["nuts"]
//!
//! [plan]
//! windows = ["10:30", "15:30"]
//! combos_per_window = 2
//! items_per_window = 4
//! combo_pool_size = 6
//! singles_pool_size = 10
//! ```
//!
//! Precedence: CLI flag, then file value, then built-in default.

use serde::Deserialize;
use snackgen_core::{GenerateOptions, PlanOptions, SnackError};
use std::path::{Path, PathBuf};

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Whole configuration file. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub catalog: CatalogSection,
    pub generate: GenerateSection,
    pub plan: PlanSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSection {
    /// Directory holding `components.json` and `combo_rules.json`.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSection {
    pub preference: Option<String>,
    pub limit: Option<usize>,
    pub min_adds: Option<usize>,
    pub max_adds: Option<usize>,
    pub restrictions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanSection {
    pub windows: Vec<String>,
    pub combos_per_window: Option<usize>,
    pub items_per_window: Option<usize>,
    pub combo_pool_size: Option<usize>,
    pub singles_pool_size: Option<usize>,
}

impl AppConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(contents: &str) -> Result<Self, SnackError> {
        toml::from_str(contents).map_err(|e| SnackError::ConfigError(e.to_string()))
    }

    /// Load the file at `path`, or built-in defaults when no path is given.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, SnackError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let metadata = std::fs::metadata(path)
            .map_err(|e| SnackError::IoError(format!("{}: {}", path.display(), e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(SnackError::ConfigError(format!(
                "{}: file size {} bytes exceeds maximum allowed {} bytes",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| SnackError::IoError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Generation options seeded from the `[generate]` section.
    ///
    /// `combine` selects combo or atomic mode; callers layer CLI flags on top.
    #[must_use]
    pub fn generate_options(&self, combine: bool) -> GenerateOptions {
        let section = &self.generate;
        let defaults = GenerateOptions::default();
        let limit = section.limit.unwrap_or(defaults.limit);

        let mut options = if combine {
            GenerateOptions::combos(limit)
        } else {
            GenerateOptions::atomic(limit)
        };
        if let Some(preference) = &section.preference {
            options.preference.clone_from(preference);
        }
        options.min_adds = section.min_adds.unwrap_or(defaults.min_adds);
        options.max_adds = section.max_adds.unwrap_or(defaults.max_adds);
        options.restrictions.clone_from(&section.restrictions);
        options
    }

    /// Plan options seeded from the `[plan]` and `[generate]` sections.
    #[must_use]
    pub fn plan_options(&self, seed: impl Into<String>) -> PlanOptions {
        let section = &self.plan;
        let mut options = PlanOptions::new(seed)
            .with_windows(&section.windows)
            .with_restrictions(&self.generate.restrictions);
        if let Some(preference) = &self.generate.preference {
            options.preference.clone_from(preference);
        }
        if let Some(n) = section.combos_per_window {
            options.combos_per_window = n;
        }
        if let Some(n) = section.items_per_window {
            options.items_per_window = n;
        }
        if let Some(n) = section.combo_pool_size {
            options.combo_pool_size = n;
        }
        if let Some(n) = section.singles_pool_size {
            options.singles_pool_size = n;
        }
        options
    }
}

// =============================================================================
// TESTS
// =============================================================================
