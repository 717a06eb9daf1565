//! Combination enumeration across the working catalog.
//!
//! The catalog is brightness-sorted, so the head of the unconsumed range is
//! always the brightest remaining star. Each round takes that star as the
//! pilot, selects companions from the working range (pilot at index 0,
//! skipped by the selectors), resolves every unordered 3-combination of the
//! companions, and then consumes the pilot. Consumption is a cursor advance
//! over the sorted slice rather than list surgery, which keeps the
//! monotonic-shrink ordering explicit: a pilot's search only ever sees stars
//! not yet consumed by earlier pilots.

use tracing::{debug, info};

use crate::star::{Star, StarSet};

use super::resolver;
use super::selector::{self, SelectionStrategy};

/// Enumerate every resolvable pattern in a brightness-sorted catalog.
///
/// Worst case is O(n · group_size³); the exhaustive combinatorial search is
/// the point, and no shortcut is taken.
pub fn enumerate_patterns(
    stars: &[Star],
    group_size: usize,
    radius: f64,
    strategy: SelectionStrategy,
) -> Vec<StarSet> {
    let mut output = Vec::new();
    let mut cursor = 0;
    let mut failed_pilots = 0usize;
    let mut degenerate = 0usize;

    info!("{} stars to go", stars.len());
    while stars.len() - cursor > 1 {
        let working = &stars[cursor..];
        let pilot = &working[0];

        let companions = match strategy {
            SelectionStrategy::BoundSearch => {
                selector::find_closest_brightest(pilot, working, group_size, radius)
            }
            SelectionStrategy::RingSearch => {
                Some(selector::find_closest_rings(pilot, working, group_size))
            }
        };

        match companions {
            Some(companions) => {
                degenerate += combinations(pilot, &companions, &mut output);
            }
            None => failed_pilots += 1,
        }

        cursor += 1;
        let remaining = stars.len() - cursor;
        if remaining % 100 == 0 {
            debug!("{} stars to go", remaining);
        }
    }

    info!(
        "Enumerated {} records ({} pilots without companions, {} degenerate combinations dropped)",
        output.len(),
        failed_pilots,
        degenerate
    );
    output
}

/// Append every unordered 3-combination of `companions`, resolved against
/// the pilot. Returns the number of combinations dropped as degenerate.
fn combinations(pilot: &Star, companions: &[Star], output: &mut Vec<StarSet>) -> usize {
    let mut dropped = 0;
    for ii in 0..companions.len() {
        for jj in (ii + 1)..companions.len() {
            for kk in (jj + 1)..companions.len() {
                match resolver::resolve(pilot, &companions[ii], &companions[jj], &companions[kk]) {
                    Some(set) => output.push(set),
                    None => dropped += 1,
                }
            }
        }
    }
    dropped
}
