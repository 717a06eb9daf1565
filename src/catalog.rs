//! Catalog filtering and flat-record emission.
//!
//! The input is a line-oriented CSV catalog with three columns per row, in
//! fixed order: apparent magnitude, right ascension, declination. Header
//! rows and malformed rows fail numeric parsing and are skipped with a
//! diagnostic; they are never fatal. The output side emits one CSV row per
//! resolved [`StarSet`] under [`OUTPUT_HEADER`].

use std::path::Path;

use tracing::{info, warn};

use crate::star::{Star, StarSet};

/// Header line written ahead of the emitted records.
pub const OUTPUT_HEADER: &str = "angle,ra,dec,ra,dec";

/// Parse a single `magnitude,ra,dec` row.
///
/// Returns `None` for rows that fail numeric parsing or carry non-finite
/// values; `parse` accepts spellings like `NaN`, which would otherwise leak
/// an unusable position into the catalog.
fn parse_row(row: &str) -> Option<Star> {
    let mut fields = row.split(',');
    let mag: f64 = fields.next()?.trim().parse().ok()?;
    let ra: f64 = fields.next()?.trim().parse().ok()?;
    let dec: f64 = fields.next()?.trim().parse().ok()?;

    let star = Star::new(mag, ra, dec);
    if !(mag.is_finite() && star.main.is_finite()) {
        return None;
    }
    Some(star)
}

/// Filter raw catalog rows into validated stars.
///
/// Rows that fail to parse are skipped and reported; rows that parse but
/// have magnitude at or above `cutoff` are silently excluded. Output order
/// matches input order.
pub fn parse_catalog<I, S>(lines: I, cutoff: f64) -> Vec<Star>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stars = Vec::new();
    for line in lines {
        let line = line.as_ref();
        match parse_row(line) {
            Some(star) if star.attribute < cutoff => stars.push(star),
            Some(_) => {}
            None => warn!("skipping unparseable catalog row: {:?}", line),
        }
    }
    stars
}

/// Format one record as `attribute,pilot_ra,pilot_dec,opposite_ra,opposite_dec`.
///
/// Floats use shortest round-trip formatting; no precision is truncated.
pub fn format_record(set: &StarSet) -> String {
    format!(
        "{},{},{},{},{}",
        set.star.attribute, set.star.main.ra, set.star.main.dec, set.opposite.ra, set.opposite.dec
    )
}

/// Read a catalog file into lines for [`parse_catalog`].
pub fn read_catalog_lines<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let data = std::fs::read_to_string(path)?;
    Ok(data.lines().map(str::to_owned).collect())
}

/// Write the header line and one CSV row per record.
pub fn write_database<P: AsRef<Path>>(path: P, records: &[StarSet]) -> anyhow::Result<()> {
    let mut out = String::with_capacity(records.len() * 32 + OUTPUT_HEADER.len() + 1);
    out.push_str(OUTPUT_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&format_record(record));
        out.push('\n');
    }
    std::fs::write(path.as_ref(), &out)?;
    info!(
        "Wrote {} records to {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::Point;
    use approx::assert_relative_eq;

    #[test]
    fn header_row_is_skipped() {
        let lines = ["mag,ra,dec", "1.0,2.0,3.0"];
        let stars = parse_catalog(lines, 10.0);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0], Star::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let lines = ["1.0,2.0,3.0", "not,a,row", "2.0", "", "4.0,5.0,6.0"];
        let stars = parse_catalog(lines, 10.0);
        assert_eq!(stars.len(), 2);
    }

    #[test]
    fn magnitude_cutoff_is_strict() {
        let lines = ["4.9,0.0,0.0", "5.0,0.0,0.0", "5.1,0.0,0.0"];
        let stars = parse_catalog(lines, 5.0);
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].attribute, 4.9);
    }

    #[test]
    fn output_order_matches_input_order() {
        let lines = ["3.0,1.0,1.0", "1.0,2.0,2.0", "2.0,3.0,3.0"];
        let stars = parse_catalog(lines, 10.0);
        let mags: Vec<f64> = stars.iter().map(|s| s.attribute).collect();
        assert_eq!(mags, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn non_finite_fields_are_rejected() {
        let lines = ["NaN,0.0,0.0", "1.0,inf,0.0", "1.0,0.0,NaN"];
        let stars = parse_catalog(lines, 10.0);
        assert!(stars.is_empty());
    }

    #[test]
    fn record_round_trips_through_csv() {
        let set = StarSet::new(
            1.2870022175865685,
            Point::new(0.125, -41.03),
            Point::new(359.9875, 8.0),
        );
        let row = format_record(&set);
        let fields: Vec<f64> = row.split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields.len(), 5);
        assert_relative_eq!(fields[0], set.angle(), epsilon = 1e-6);
        assert_relative_eq!(fields[1], set.pilot().ra, epsilon = 1e-6);
        assert_relative_eq!(fields[2], set.pilot().dec, epsilon = 1e-6);
        assert_relative_eq!(fields[3], set.opposite.ra, epsilon = 1e-6);
        assert_relative_eq!(fields[4], set.opposite.dec, epsilon = 1e-6);
    }
}
