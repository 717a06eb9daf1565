//! Core data types: sky positions, catalog stars, and resolved angle records.

use nalgebra::Vector2;

/// An angular position on the sky: right ascension and declination, degrees.
///
/// Positions are treated as planar Euclidean coordinates throughout; this is
/// the deliberate approximation the pyramid database is built on, valid
/// because angles are only ever compared against other angles produced the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub ra: f64,
    pub dec: f64,
}

impl Point {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// The position as a nalgebra vector, for coordinate arithmetic.
    pub fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.ra, self.dec)
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.as_vector() - other.as_vector()).norm()
    }

    /// Both coordinates are finite (not NaN or infinite).
    ///
    /// Every operation past construction requires this; the catalog filter
    /// enforces it at parse time.
    pub fn is_finite(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
    }
}

/// A star: one real-valued attribute plus a position.
///
/// The attribute is overloaded by pipeline phase: apparent magnitude for a
/// catalog star, the resolved pyramid angle for a computed one. Ordering is
/// by attribute only; positions are never compared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub attribute: f64,
    pub main: Point,
}

impl Star {
    pub fn new(attribute: f64, ra: f64, dec: f64) -> Self {
        Self {
            attribute,
            main: Point::new(ra, dec),
        }
    }

    /// Euclidean distance between this star's position and another's.
    pub fn distance(&self, other: &Star) -> f64 {
        self.main.distance(&other.main)
    }
}

/// One resolved 3-companion combination: the subtended angle, the pilot's
/// position, and the position of the vertex farthest from the pilot.
///
/// A `StarSet` refines a [`Star`] (angle in `attribute`, pilot in `main`)
/// with the extra `opposite` field. Consumers that only need the attribute
/// and position take it through [`Attributed`]; consumers of the opposite
/// vertex accept `StarSet` explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSet {
    pub star: Star,
    pub opposite: Point,
}

impl StarSet {
    pub fn new(attribute: f64, pilot: Point, opposite: Point) -> Self {
        Self {
            star: Star {
                attribute,
                main: pilot,
            },
            opposite,
        }
    }

    /// The resolved angle.
    pub fn angle(&self) -> f64 {
        self.star.attribute
    }

    /// The pilot position.
    pub fn pilot(&self) -> Point {
        self.star.main
    }
}

/// Access to the ordering attribute shared by [`Star`] and [`StarSet`].
///
/// This is the seam that lets attribute-keyed containers (the search tree,
/// the output sorters) operate on either type.
pub trait Attributed {
    fn attribute(&self) -> f64;
}

impl Attributed for Star {
    fn attribute(&self) -> f64 {
        self.attribute
    }
}

impl Attributed for StarSet {
    fn attribute(&self) -> f64 {
        self.star.attribute
    }
}
