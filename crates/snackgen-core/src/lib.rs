//! # snackgen-core
//!
//! The deterministic snack generator for snackgen - THE ENGINE.
//!
//! This crate turns a catalog of food components and a pairing-rule map into
//! named snacks: single items ("atomic") or a base plus add-ons ("combo").
//! Every random choice flows from one string seed, so the same request with
//! the same seed always yields the same snacks.
//!
//! ## Layout
//!
//! - `types` → components, macros, generated snacks, errors
//! - `catalog` → loading, validation, the bundled catalog cache
//! - `rng` → seed hashing and the Mulberry32 stream
//! - `compositor` → naming grammar, macro and allergen aggregation
//! - `engine` → atomic selection, random combo search, locked fallback
//! - `planner` → per-window slates built on the engine
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - The catalog is read-only once loaded
//! - Generation never fails; it returns what it can find, up to `limit`

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod compositor;
pub mod engine;
pub mod options;
pub mod planner;
pub mod primitives;
pub mod rng;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Component, GeneratedSnack, Macros, SnackError, SnackKind, fold_key};

// =============================================================================
// RE-EXPORTS: Generation
// =============================================================================

pub use catalog::{Catalog, CatalogSummary, RuleMap, bundled, load_components, load_rules};
pub use compositor::{Compositor, build_name};
pub use engine::{Generator, Restrictions, generate, generate_bundled};
pub use options::GenerateOptions;
pub use planner::{PlanOptions, Planner, SnackPlan, WindowPlan};
pub use rng::{SeededRng, hash_seed};
