//! # Engine Primitives
//!
//! Hardcoded runtime constants for the snackgen engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Hosts override the request-level defaults through `GenerateOptions`.

// =============================================================================
// CATEGORY FAMILIES
// =============================================================================

/// Category prefix marking add-on components.
///
/// Only non-base components in this family can accompany a base.
pub const ADD_CATEGORY_PREFIX: &str = "add.";

/// Category prefix marking side components (atomic `side_only` pool).
pub const SIDE_CATEGORY_PREFIX: &str = "side.";

/// The preference that disables preference filtering.
pub const BALANCED_PREFERENCE: &str = "balanced";

// =============================================================================
// REQUEST DEFAULTS
// =============================================================================

/// Default maximum number of generated snacks.
pub const DEFAULT_LIMIT: usize = 4;

/// Default lower bound on add-ons per combo.
pub const DEFAULT_MIN_ADDS: usize = 1;

/// Default upper bound on add-ons per combo.
pub const DEFAULT_MAX_ADDS: usize = 2;

// =============================================================================
// SEARCH BOUNDS
// =============================================================================

/// Minimum number of consecutive unproductive draws before the random combo
/// search gives up.
pub const MIN_STALLED_DRAWS: usize = 64;

/// Multiplier applied to `bases × add-ons` when sizing the stall budget.
///
/// The budget is `max(MIN_STALLED_DRAWS, STALL_FACTOR × bases × max(adds, 1))`.
pub const STALL_FACTOR: usize = 4;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for component names and categories.
///
/// Longer strings are rejected when a catalog is loaded.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum size of a catalog file read from disk (16 MB).
pub const MAX_CATALOG_FILE_SIZE: u64 = 16 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_add_bounds_are_ordered() {
        assert!(DEFAULT_MIN_ADDS >= 1);
        assert!(DEFAULT_MIN_ADDS <= DEFAULT_MAX_ADDS);
    }

    #[test]
    fn family_prefixes_are_dotted() {
        assert!(ADD_CATEGORY_PREFIX.ends_with('.'));
        assert!(SIDE_CATEGORY_PREFIX.ends_with('.'));
    }
}
