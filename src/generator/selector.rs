//! Companion selection around a pilot star.
//!
//! Two strategies exist and are never mixed within one pipeline run:
//!
//! - **Bound search** walks a brightness-sorted working set and takes the
//!   first `num` stars inside the search radius, failing outright when the
//!   radius cannot be filled. Companions come back in brightness order.
//! - **Ring search** repeatedly scans the whole working set for the nearest
//!   star strictly beyond the previous round's minimum distance, yielding a
//!   nearest-first ordering with no radius bound and no failure state.
//!
//! Both expect the working set to carry the pilot at index 0; the pilot
//! excludes itself (bound search skips the head, ring search starts its
//! first round strictly above distance zero).

use crate::star::Star;

/// Minimum working-set size (pilot included) for a bound search to attempt
/// selection at all.
const MIN_WORKING_SET: usize = 4;

/// Which companion-selection strategy the enumerator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Brightness-bounded scan within a radius; all-or-nothing.
    #[default]
    BoundSearch,
    /// Iterative nearest-ring scan; nearest-first, radius ignored.
    RingSearch,
}

/// Collect the first `num` stars within `radius` of the pilot, scanning the
/// brightness-sorted working set from the head (pilot at index 0, skipped).
///
/// Returns `None` when the working set is smaller than four stars or when
/// the radius cannot be filled; there is no partial result.
pub fn find_closest_brightest(
    pilot: &Star,
    stars: &[Star],
    num: usize,
    radius: f64,
) -> Option<Vec<Star>> {
    if stars.len() < MIN_WORKING_SET {
        return None;
    }

    let mut close = Vec::with_capacity(num);
    let mut candidates = stars.iter().skip(1);
    for _ in 0..num {
        let found = candidates.find(|cur| cur.distance(pilot) < radius)?;
        close.push(*found);
    }
    Some(close)
}

/// Select up to `num` companions by rounds of strictly increasing minimum
/// distance: each round takes the closest star farther than the previous
/// round's pick. The first round's threshold of zero excludes the pilot
/// itself (and anything coincident with it).
///
/// The returned companions are ordered nearest-to-pilot first. A round that
/// finds no star ends the search with whatever has been gathered; a working
/// set that contains duplicated positions at distinct distances can yield
/// the same physical star in one slot only, but a catalog holding the same
/// star entry twice is not corrected for.
pub fn find_closest_rings(pilot: &Star, stars: &[Star], num: usize) -> Vec<Star> {
    let mut close = Vec::with_capacity(num);
    let mut last_dist = 0.0;

    for _ in 0..num {
        let mut cur_dist = f64::MAX;
        let mut pick: Option<&Star> = None;

        for cur in stars {
            let dist = cur.distance(pilot);
            if dist > last_dist && dist < cur_dist {
                cur_dist = dist;
                pick = Some(cur);
            }
        }

        match pick {
            Some(star) => close.push(*star),
            None => break,
        }
        last_dist = cur_dist;
    }
    close
}
