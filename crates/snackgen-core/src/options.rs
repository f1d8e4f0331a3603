//! # Generation Options
//!
//! Request parameters for one generation call.
//!
//! Options are never rejected. Out-of-range tuning values are clamped by
//! the accessors the engine reads them through.

use crate::primitives::{BALANCED_PREFERENCE, DEFAULT_LIMIT, DEFAULT_MAX_ADDS, DEFAULT_MIN_ADDS};

/// Parameters for `Generator::generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Preference label; `balanced` disables preference filtering.
    pub preference: String,
    /// Case-insensitive terms matched against names (substring) and
    /// allergens (exact).
    pub restrictions: Vec<String>,
    /// Maximum number of results.
    pub limit: usize,
    /// RNG seed; the current time is used when absent.
    pub seed: Option<String>,
    /// Names already chosen elsewhere (case-insensitive, exact).
    pub exclude: Vec<String>,
    /// `false` yields atomic items, `true` yields base + add-on combos.
    pub combine: bool,
    /// Lower bound on add-ons per combo.
    pub min_adds: usize,
    /// Upper bound on add-ons per combo.
    pub max_adds: usize,
    /// Atomic mode only: keep bases in the pool.
    pub allow_bases: bool,
    /// Force this base into the combos.
    pub lock_base_name: Option<String>,
    /// Force this add-on into a combo.
    pub lock_add_name: Option<String>,
    /// Atomic mode only: restrict the pool to `side.` components.
    pub side_only: bool,
    /// Add-on names that may not be drawn.
    pub exclude_add_names: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            preference: BALANCED_PREFERENCE.to_string(),
            restrictions: Vec::new(),
            limit: DEFAULT_LIMIT,
            seed: None,
            exclude: Vec::new(),
            combine: true,
            min_adds: DEFAULT_MIN_ADDS,
            max_adds: DEFAULT_MAX_ADDS,
            allow_bases: true,
            lock_base_name: None,
            lock_add_name: None,
            side_only: false,
            exclude_add_names: Vec::new(),
        }
    }
}

impl GenerateOptions {
    /// Combo-mode options with the given limit.
    #[must_use]
    pub fn combos(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Atomic-mode options with the given limit.
    #[must_use]
    pub fn atomic(limit: usize) -> Self {
        Self {
            limit,
            combine: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    #[must_use]
    pub fn with_preference(mut self, preference: impl Into<String>) -> Self {
        self.preference = preference.into();
        self
    }

    #[must_use]
    pub fn with_restrictions<S: AsRef<str>>(mut self, restrictions: &[S]) -> Self {
        self.restrictions = restrictions.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_exclude<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.exclude = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_exclude_add_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.exclude_add_names = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_adds(mut self, min_adds: usize, max_adds: usize) -> Self {
        self.min_adds = min_adds;
        self.max_adds = max_adds;
        self
    }

    #[must_use]
    pub fn with_locked_base(mut self, name: impl Into<String>) -> Self {
        self.lock_base_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_locked_add(mut self, name: impl Into<String>) -> Self {
        self.lock_add_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sides_only(mut self) -> Self {
        self.side_only = true;
        self
    }

    #[must_use]
    pub fn without_bases(mut self) -> Self {
        self.allow_bases = false;
        self
    }

    /// Clamped add-on bounds: at least one add-on, and the lower bound never
    /// exceeds the upper.
    #[must_use]
    pub fn add_bounds(&self) -> (usize, usize) {
        let max = self.max_adds.max(1);
        let min = self.min_adds.clamp(1, max);
        (min, max)
    }

    /// True when a base or add-on lock was requested.
    #[must_use]
    pub fn has_lock(&self) -> bool {
        self.lock_base_name.is_some() || self.lock_add_name.is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
