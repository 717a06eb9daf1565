//! # pyramid-db
//!
//! Generates a **pyramid-method star pattern database** from a star catalog.
//!
//! Given catalog rows of `magnitude, ra, dec`, the pipeline derives, for
//! each bright "pilot" star, the angles of every valid 3-companion triangle
//! around it. Those angles, with the pilot and farthest-vertex positions,
//! form a rotation-invariant fingerprint a star-identification algorithm
//! can match against at runtime. The identification itself is a downstream
//! consumer; this crate only builds the database it searches.
//!
//! ## Pipeline
//!
//! 1. **Catalog filter** — parse `magnitude,ra,dec` rows, skipping
//!    malformed lines and stars fainter than the cutoff.
//! 2. **Brightness sort** — the working catalog is consumed
//!    brightest-first, one pilot per round.
//! 3. **Companion selection** — per pilot, gather a fixed-size group of
//!    nearby stars, by bounded brightness scan or by nearest-ring search.
//! 4. **Angle resolution** — for every 3-combination of the group, find the
//!    companion farthest from the pilot and the angle subtended there, via
//!    the law of cosines over planar ra/dec coordinates.
//! 5. **Sort & emit** — order the records by angle and write them as flat
//!    CSV rows (`angle, pilot_ra, pilot_dec, opposite_ra, opposite_dec`).
//!
//! An attribute-keyed search tree ([`Tree`]) supports the alternative
//! emission layout: records arranged in the pre-order of a statically
//! rebalanced tree, for consumers that rebuild the search structure by
//! inserting records in file order.
//!
//! ## Example
//!
//! ```
//! use pyramid_db::{generate_from_lines, GenerateConfig, SelectionStrategy, SortOrder};
//!
//! let lines = ["mag,ra,dec", "1,0,0", "2,3,4", "3,0,8", "4,-3,4"];
//! let config = GenerateConfig {
//!     magnitude_cutoff: 10.0,
//!     group_size: 3,
//!     radius: 20.0,
//!     strategy: SelectionStrategy::BoundSearch,
//!     sort_order: SortOrder::Descending,
//! };
//!
//! let records = generate_from_lines(lines, &config).unwrap();
//! assert_eq!(records.len(), 1);
//! assert!((records[0].angle() - (0.28_f64).acos()).abs() < 1e-12);
//! ```

pub mod catalog;
pub mod generator;
pub mod star;
pub mod tree;

pub use catalog::{format_record, parse_catalog, read_catalog_lines, write_database, OUTPUT_HEADER};
pub use generator::{
    balanced_preorder, generate, generate_from_lines, generate_to_file, sort_records,
    GenerateConfig, SelectionStrategy, SortOrder,
};
pub use star::{Attributed, Point, Star, StarSet};
pub use tree::Tree;
