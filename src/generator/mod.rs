//! Pattern database generation: the pipeline driver.
//!
//! Transforms a filtered star catalog into the pyramid-method angle
//! database:
//!
//! 1. Sort the catalog brightest-first (ascending magnitude).
//! 2. Enumerate: per pilot, select companions and resolve every 3-companion
//!    combination into an angle record.
//! 3. Sort the records by angle for emission.
//!
//! The core entry point [`generate`] is a pure function of the parsed
//! catalog and the configuration; file handling lives only in the thin
//! [`generate_to_file`] wrapper.

mod enumerate;
mod resolver;
mod selector;

use std::cmp::Ordering;
use std::path::Path;

use anyhow::bail;
use tracing::info;

pub use resolver::{find_angle, resolve, sort_farthest};
pub use selector::{find_closest_brightest, find_closest_rings, SelectionStrategy};

use crate::catalog;
use crate::star::{Attributed, Star, StarSet};
use crate::tree::Tree;

/// Sort direction for the emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Nondecreasing attribute, as a search tree's in-order view would give.
    Ascending,
    /// Nonincreasing attribute, the historical emission order.
    #[default]
    Descending,
}

/// Parameters controlling database generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Stars at or above this apparent magnitude are excluded.
    pub magnitude_cutoff: f64,
    /// Companions selected per pilot; every 3-combination of them is
    /// resolved, so each successful round yields C(group_size, 3) records.
    /// Must be at least 3.
    pub group_size: usize,
    /// Search radius around the pilot (field of view, same units as
    /// ra/dec). Must be positive and finite. Ignored by ring search.
    pub radius: f64,
    /// Companion-selection strategy. Fixed for the whole run; the two
    /// variants order their companions differently, which changes record
    /// order but not the angle math.
    pub strategy: SelectionStrategy,
    /// Direction of the final sort before emission.
    pub sort_order: SortOrder,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            magnitude_cutoff: 5.0,
            group_size: 4,
            radius: 30.0,
            strategy: SelectionStrategy::BoundSearch,
            sort_order: SortOrder::Descending,
        }
    }
}

fn validate(config: &GenerateConfig) -> anyhow::Result<()> {
    if config.group_size < 3 {
        bail!(
            "group_size must be at least 3, got {}; no 3-combination exists below that",
            config.group_size
        );
    }
    if !(config.radius.is_finite() && config.radius > 0.0) {
        bail!("radius must be positive and finite, got {}", config.radius);
    }
    if !config.magnitude_cutoff.is_finite() {
        bail!(
            "magnitude_cutoff must be finite, got {}",
            config.magnitude_cutoff
        );
    }
    Ok(())
}

fn attribute_ordering<T: Attributed>(a: &T, b: &T) -> Ordering {
    a.attribute()
        .partial_cmp(&b.attribute())
        .unwrap_or(Ordering::Equal)
}

/// Sort records by attribute in the requested direction (stable).
pub fn sort_records(records: &mut [StarSet], order: SortOrder) {
    match order {
        SortOrder::Ascending => records.sort_by(attribute_ordering),
        SortOrder::Descending => records.sort_by(|a, b| attribute_ordering(b, a)),
    }
}

/// Generate the ordered angle database from an already-parsed catalog.
///
/// This is the pure core: no file I/O. Structural misuse (a group size below
/// 3, a non-positive or non-finite radius) is fatal; per-pilot selection
/// failures and degenerate combinations are absorbed during enumeration.
pub fn generate(
    mut catalog: Vec<Star>,
    config: &GenerateConfig,
) -> anyhow::Result<Vec<StarSet>> {
    validate(config)?;

    info!("Sorting {} stars by brightness", catalog.len());
    catalog.sort_by(attribute_ordering);

    info!(
        "Enumerating patterns (group size {}, radius {}, {:?})",
        config.group_size, config.radius, config.strategy
    );
    let mut records = enumerate::enumerate_patterns(
        &catalog,
        config.group_size,
        config.radius,
        config.strategy,
    );

    sort_records(&mut records, config.sort_order);
    Ok(records)
}

/// Filter raw catalog rows and generate the ordered angle database.
pub fn generate_from_lines<I, S>(lines: I, config: &GenerateConfig) -> anyhow::Result<Vec<StarSet>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stars = catalog::parse_catalog(lines, config.magnitude_cutoff);
    info!("Catalog filter kept {} stars", stars.len());
    generate(stars, config)
}

/// Read a catalog file, run the pipeline, and write the record file.
pub fn generate_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &GenerateConfig,
) -> anyhow::Result<()> {
    let lines = catalog::read_catalog_lines(input)?;
    let records = generate_from_lines(lines, config)?;
    catalog::write_database(output, &records)
}

/// Arrange records in the pre-order of a rebalanced search tree.
///
/// This is the flat layout used when the database is consumed as an array
/// that a reader reconstructs into a search tree by inserting in file order.
/// The tree's balance score is logged for inspection.
pub fn balanced_preorder(records: &[StarSet]) -> Vec<StarSet> {
    let tree = Tree::from_values(records.iter().copied());
    let balanced = tree.rebalanced();
    info!("Balance of rebuilt tree: {}%", balanced.balance());
    balanced.pre_order()
}
