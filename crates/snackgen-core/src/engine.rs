//! # Engine Module
//!
//! Seeded snack generation over a catalog.
//!
//! Three search algorithms share one bookkeeping state per call:
//! - `atomic_selection`: shuffle the eligible pool, walk it in order
//! - `random_combo_search`: draw a random base and random add-ons until the
//!   limit is met or draws stop producing new combos
//! - `locked_exhaustive_search`: try every (base, add-on) pair of a shuffled
//!   candidate set; only run when a lock was requested and the random
//!   search came up short
//!
//! Generation never fails. It returns as many valid snacks as it can find,
//! never more than `limit`, and the same options with the same seed always
//! return the same snacks.

use crate::compositor::Compositor;
use crate::primitives::{MIN_STALLED_DRAWS, STALL_FACTOR};
use crate::rng::{SeededRng, time_seed};
use crate::{Catalog, Component, GenerateOptions, GeneratedSnack, SnackError, catalog, fold_key};
use std::collections::BTreeSet;

// =============================================================================
// RESTRICTIONS
// =============================================================================

/// Case-insensitive restriction terms.
///
/// A term blocks an item when it is a substring of the item's name or equals
/// one of its allergen tags. Blank terms are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restrictions {
    terms: Vec<String>,
}

impl Restrictions {
    #[must_use]
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        let terms = terms
            .iter()
            .map(|t| fold_key(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when any term blocks the given name / allergen set.
    #[must_use]
    pub fn blocks(&self, name: &str, allergens: &[String]) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let name = fold_key(name);
        let allergens: Vec<String> = allergens.iter().map(|a| fold_key(a)).collect();
        self.terms
            .iter()
            .any(|term| name.contains(term.as_str()) || allergens.contains(term))
    }

    #[must_use]
    pub fn blocks_component(&self, component: &Component) -> bool {
        self.blocks(&component.name, &component.allergens)
    }

    #[must_use]
    pub fn blocks_snack(&self, snack: &GeneratedSnack) -> bool {
        self.blocks(&snack.name, &snack.allergens)
    }
}

// =============================================================================
// PER-CALL STATE
// =============================================================================

/// Read-only view of one request: eligible pools and folded exclusion sets.
struct SearchContext<'c> {
    catalog: &'c Catalog,
    restrictions: Restrictions,
    exclude: BTreeSet<String>,
    exclude_adds: BTreeSet<String>,
    eligible: Vec<&'c Component>,
    bases: Vec<&'c Component>,
    adds: Vec<&'c Component>,
}

impl<'c> SearchContext<'c> {
    fn new(catalog: &'c Catalog, options: &GenerateOptions) -> Self {
        let eligible: Vec<&Component> = catalog
            .components()
            .iter()
            .filter(|c| c.matches_preference(&options.preference))
            .collect();
        let bases = eligible.iter().copied().filter(|c| c.is_base).collect();
        let adds = eligible.iter().copied().filter(|c| c.is_add_on()).collect();

        Self {
            catalog,
            restrictions: Restrictions::new(&options.restrictions),
            exclude: options.exclude.iter().map(|n| fold_key(n)).collect(),
            exclude_adds: options
                .exclude_add_names
                .iter()
                .map(|n| fold_key(n))
                .collect(),
            eligible,
            bases,
            adds,
        }
    }

    /// An add-on that is neither restriction-blocked nor excluded by name.
    fn add_allowed(&self, add: &Component) -> bool {
        !self.restrictions.blocks_component(add) && !self.exclude_adds.contains(&add.key())
    }

    fn pairs(&self, base: &Component, add: &Component) -> bool {
        self.catalog.allows(&base.category, &add.category)
    }

    fn find_in(pool: &[&'c Component], name: &str) -> Option<&'c Component> {
        let key = fold_key(name);
        pool.iter().copied().find(|c| c.key() == key)
    }
}

/// Output plus the de-duplication sets for one call.
struct SearchState {
    limit: usize,
    snacks: Vec<GeneratedSnack>,
    used_names: BTreeSet<String>,
    used_adds: BTreeSet<String>,
}

impl SearchState {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            snacks: Vec::new(),
            used_names: BTreeSet::new(),
            used_adds: BTreeSet::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.snacks.len() >= self.limit
    }

    fn add_used(&self, add: &Component) -> bool {
        self.used_adds.contains(&add.key())
    }

    fn name_taken(&self, ctx: &SearchContext<'_>, key: &str) -> bool {
        self.used_names.contains(key) || ctx.exclude.contains(key)
    }

    fn push_atomic(&mut self, ctx: &SearchContext<'_>, component: &Component) -> bool {
        let key = component.key();
        if self.name_taken(ctx, &key) {
            return false;
        }
        self.snacks.push(Compositor::atomic(component));
        self.used_names.insert(key);
        true
    }

    /// Emit a combo unless it has no add-ons, repeats or is excluded, or
    /// trips a restriction through its name or allergen union.
    fn push_combo(
        &mut self,
        ctx: &SearchContext<'_>,
        base: &Component,
        adds: &[&Component],
    ) -> bool {
        if adds.is_empty() {
            return false;
        }
        let snack = Compositor::combo(base, adds);
        let key = snack.key();
        if self.name_taken(ctx, &key) || ctx.restrictions.blocks_snack(&snack) {
            return false;
        }
        self.snacks.push(snack);
        self.used_names.insert(key);
        self.used_adds.extend(adds.iter().map(|a| a.key()));
        true
    }
}

/// Locked base / add-on resolved against the eligible pools.
#[derive(Clone, Copy, Default)]
struct Locks<'c> {
    base: Option<&'c Component>,
    add: Option<&'c Component>,
}

impl<'c> Locks<'c> {
    fn resolve(ctx: &SearchContext<'c>, options: &GenerateOptions) -> Self {
        Self {
            base: options
                .lock_base_name
                .as_deref()
                .and_then(|name| SearchContext::find_in(&ctx.bases, name)),
            add: options
                .lock_add_name
                .as_deref()
                .and_then(|name| SearchContext::find_in(&ctx.adds, name)),
        }
    }

    /// The add-on forced into combos; a resolved base lock takes precedence.
    fn forced_add(&self) -> Option<&'c Component> {
        match (self.base, self.add) {
            (None, Some(add)) => Some(add),
            _ => None,
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Seeded snack generator over a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'c> {
    catalog: &'c Catalog,
}

impl<'c> Generator<'c> {
    #[must_use]
    pub const fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Generate at most `options.limit` snacks.
    ///
    /// Atomic mode when `combine` is false; otherwise the random combo
    /// search, followed by the locked exhaustive search when a lock was
    /// requested and the random search under-filled.
    #[must_use]
    pub fn generate(&self, options: &GenerateOptions) -> Vec<GeneratedSnack> {
        let seed = options.seed.clone().unwrap_or_else(time_seed);
        let mut rng = SeededRng::new(&seed);
        let ctx = SearchContext::new(self.catalog, options);
        let mut state = SearchState::new(options.limit);

        if state.is_full() {
            return state.snacks;
        }

        if !options.combine {
            atomic_selection(&ctx, options, &mut rng, &mut state);
        } else {
            let locks = Locks::resolve(&ctx, options);
            random_combo_search(&ctx, options, locks, &mut rng, &mut state);

            if !state.is_full() && options.has_lock() {
                tracing::debug!(
                    seed = %seed,
                    produced = state.snacks.len(),
                    limit = options.limit,
                    "Random combo search under-filled, running locked search"
                );
                locked_exhaustive_search(&ctx, locks, &mut rng, &mut state);
            }
        }

        tracing::debug!(
            seed = %seed,
            combine = options.combine,
            produced = state.snacks.len(),
            limit = options.limit,
            "Generation finished"
        );
        state.snacks
    }
}

/// Generate over an explicit catalog.
#[must_use]
pub fn generate(catalog: &Catalog, options: &GenerateOptions) -> Vec<GeneratedSnack> {
    Generator::new(catalog).generate(options)
}

/// Generate over the bundled catalog.
///
/// # Errors
/// Only fails if the bundled catalog cannot be parsed.
pub fn generate_bundled(options: &GenerateOptions) -> Result<Vec<GeneratedSnack>, SnackError> {
    Ok(generate(catalog::bundled()?, options))
}

// =============================================================================
// SEARCH ALGORITHMS
// =============================================================================

/// Atomic mode: one shuffle, one pass. Fewer than `limit` is a valid result.
fn atomic_selection(
    ctx: &SearchContext<'_>,
    options: &GenerateOptions,
    rng: &mut SeededRng,
    state: &mut SearchState,
) {
    let mut pool: Vec<&Component> = ctx
        .eligible
        .iter()
        .copied()
        .filter(|c| !ctx.restrictions.blocks_component(c))
        .filter(|c| options.allow_bases || !c.is_base)
        .filter(|c| !options.side_only || c.is_side())
        .collect();

    rng.shuffle(&mut pool);

    for component in pool {
        if state.is_full() {
            break;
        }
        state.push_atomic(ctx, component);
    }
}

/// Random base, random add-on count, random distinct add-ons.
///
/// Add-ons used by an earlier combo in this call are never drawn again.
/// Runs until `limit` is met. Once a run of unproductive draws reaches the
/// stall budget, `sweep_combos` walks the remaining candidates: it either
/// emits one combo and drawing resumes, or finds none and the search ends.
fn random_combo_search(
    ctx: &SearchContext<'_>,
    options: &GenerateOptions,
    locks: Locks<'_>,
    rng: &mut SeededRng,
    state: &mut SearchState,
) {
    let (min_adds, max_adds) = options.add_bounds();
    let forced_add = locks.forced_add();

    let bases: Vec<&Component> = match (locks.base, forced_add) {
        (Some(base), _) => vec![base],
        (None, Some(add)) => ctx
            .bases
            .iter()
            .copied()
            .filter(|b| ctx.pairs(b, add))
            .collect(),
        (None, None) => ctx.bases.clone(),
    };

    if let Some(add) = forced_add.filter(|add| !ctx.add_allowed(add)) {
        tracing::debug!(add = %add.name, "Locked add-on is blocked, skipping random search");
        return;
    }

    let stall_limit = MIN_STALLED_DRAWS.max(STALL_FACTOR * bases.len() * ctx.adds.len().max(1));
    let mut stalled = 0;

    while !state.is_full() {
        // A locked add-on appears in at most one combo.
        if forced_add.is_some_and(|add| state.add_used(add)) {
            break;
        }
        if stalled >= stall_limit {
            if sweep_combos(ctx, &bases, forced_add, (min_adds, max_adds), state) {
                stalled = 0;
                continue;
            }
            tracing::debug!(
                stalled,
                produced = state.snacks.len(),
                "Random combo search exhausted"
            );
            break;
        }
        let Some(&base) = rng.pick(&bases) else {
            break;
        };

        let mut pool: Vec<&Component> = ctx
            .adds
            .iter()
            .copied()
            .filter(|a| ctx.pairs(base, a))
            .filter(|a| ctx.add_allowed(a))
            .filter(|a| forced_add.is_none_or(|f| f.key() != a.key()))
            .collect();

        let target = rng.range_inclusive(min_adds, max_adds);
        let mut picks: Vec<&Component> = Vec::with_capacity(target);
        picks.extend(forced_add);

        while picks.len() < target && !pool.is_empty() {
            let candidate = pool.remove(rng.index(pool.len()));
            if !state.add_used(candidate) {
                picks.push(candidate);
            }
        }

        if state.push_combo(ctx, base, &picks) {
            stalled = 0;
        } else {
            stalled += 1;
        }
    }
}

/// Walk every base and every add-on selection the random draw could produce
/// for it, in pool order, and emit the first acceptable combo.
///
/// Selection sizes follow the draw: `target` minus the forced add-on, capped
/// by the add-ons still available for that base.
fn sweep_combos<'c>(
    ctx: &SearchContext<'c>,
    bases: &[&'c Component],
    forced_add: Option<&'c Component>,
    (min_adds, max_adds): (usize, usize),
    state: &mut SearchState,
) -> bool {
    let fixed = usize::from(forced_add.is_some());
    for &base in bases {
        let available: Vec<&Component> = ctx
            .adds
            .iter()
            .copied()
            .filter(|a| ctx.pairs(base, a))
            .filter(|a| ctx.add_allowed(a))
            .filter(|a| forced_add.is_none_or(|f| f.key() != a.key()))
            .filter(|a| !state.add_used(a))
            .collect();

        let mut sizes: Vec<usize> = (min_adds..=max_adds)
            .map(|target| target.saturating_sub(fixed).min(available.len()))
            .collect();
        sizes.dedup();

        for size in sizes {
            let mut picks: Vec<&Component> = forced_add.into_iter().collect();
            if first_acceptable(ctx, state, base, &available, size, &mut picks) {
                return true;
            }
        }
    }
    false
}

/// Depth-first over ordered add-on selections; add-on order shapes the name.
fn first_acceptable<'c>(
    ctx: &SearchContext<'c>,
    state: &mut SearchState,
    base: &Component,
    available: &[&'c Component],
    remaining: usize,
    picks: &mut Vec<&'c Component>,
) -> bool {
    if remaining == 0 {
        return state.push_combo(ctx, base, picks);
    }
    for &add in available {
        if picks.iter().any(|p| p.key() == add.key()) {
            continue;
        }
        picks.push(add);
        if first_acceptable(ctx, state, base, available, remaining - 1, picks) {
            return true;
        }
        picks.pop();
    }
    false
}

/// Every (base, add-on) pair of a shuffled candidate set, one add-on each.
///
/// Candidates come from the resolved lock; an unresolved lock falls back to
/// the full eligible pools.
fn locked_exhaustive_search(
    ctx: &SearchContext<'_>,
    locks: Locks<'_>,
    rng: &mut SeededRng,
    state: &mut SearchState,
) {
    let (mut base_candidates, mut add_candidates): (Vec<&Component>, Vec<&Component>) =
        match (locks.base, locks.add) {
            (Some(base), _) => (
                vec![base],
                ctx.adds
                    .iter()
                    .copied()
                    .filter(|a| ctx.pairs(base, a))
                    .collect(),
            ),
            (None, Some(add)) => (
                ctx.bases
                    .iter()
                    .copied()
                    .filter(|b| ctx.pairs(b, add))
                    .collect(),
                vec![add],
            ),
            (None, None) => (Vec::new(), Vec::new()),
        };

    if base_candidates.is_empty() {
        base_candidates = ctx.bases.clone();
    }
    if add_candidates.is_empty() {
        add_candidates = ctx.adds.clone();
    }

    rng.shuffle(&mut base_candidates);
    rng.shuffle(&mut add_candidates);

    for &base in &base_candidates {
        for &add in &add_candidates {
            if state.is_full() {
                return;
            }
            if !ctx.pairs(base, add)
                || ctx.exclude_adds.contains(&add.key())
                || state.add_used(add)
            {
                continue;
            }
            state.push_combo(ctx, base, &[add]);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
