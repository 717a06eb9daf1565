//! Pyramid angle resolution via the law of cosines.
//!
//! For one pilot plus three companions, the companion farthest from the
//! pilot is the designated vertex; the cosine rule gives the angle subtended
//! there by the other two. The angle and the far vertex's position form the
//! resolved record. Degenerate geometry (coincident points, zero-length
//! sides) produces a non-finite angle and the combination is dropped.

use crate::star::{Star, StarSet};

/// Rank three companions by distance from the pilot, farthest first.
///
/// Ties resolve by the fixed comparison chain: `s0` stays first only when
/// strictly farther than both others; otherwise `s1` wins over `s2` by a
/// strict comparison; otherwise `s2` is taken.
pub fn sort_farthest<'a>(
    pilot: &Star,
    s0: &'a Star,
    s1: &'a Star,
    s2: &'a Star,
) -> [&'a Star; 3] {
    let d0 = s0.distance(pilot);
    let d1 = s1.distance(pilot);
    let d2 = s2.distance(pilot);

    if d0 > d1 && d0 > d2 {
        [s0, s1, s2]
    } else if d1 > d2 {
        [s1, s0, s2]
    } else {
        [s2, s1, s0]
    }
}

/// Angle at `far` subtended by `s1` and `s2`, via the cosine rule
/// `acos((b² + c² − a²) / (2·b·c))` with side `a` opposite the far vertex.
///
/// Returns `None` when the angle comes out non-finite.
pub fn find_angle(far: &Star, s1: &Star, s2: &Star) -> Option<f64> {
    let a = s1.distance(s2);
    let b = far.distance(s2);
    let c = far.distance(s1);

    let angle = ((b * b + c * c - a * a) / (2.0 * b * c)).acos();
    angle.is_finite().then_some(angle)
}

/// Resolve one pilot + three companions into an angle record: attribute is
/// the angle at the farthest companion, `main` the pilot's position, and
/// `opposite` the farthest companion's position.
///
/// `None` marks a degenerate combination; callers drop it and continue.
pub fn resolve(pilot: &Star, s0: &Star, s1: &Star, s2: &Star) -> Option<StarSet> {
    let ranked = sort_farthest(pilot, s0, s1, s2);
    let angle = find_angle(ranked[0], ranked[1], ranked[2])?;
    Some(StarSet::new(angle, pilot.main, ranked[0].main))
}
