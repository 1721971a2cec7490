use std::path::PathBuf;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Record – one meteorite strike
// ---------------------------------------------------------------------------

/// A single meteorite-strike observation (one row of the source file).
///
/// Every field is kept as the raw text found in the file. Nothing is
/// guaranteed present or well-formed, so typed access goes through the
/// `parsed_*` accessors which return `None` for absent or malformed values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub name: Option<String>,
    pub id: Option<String>,
    pub nametype: Option<String>,
    /// Composition class label, e.g. `L6` or `H5`.
    pub recclass: Option<String>,
    /// Mass in grams, numeric-like text.
    pub mass: Option<String>,
    /// `Fell` or `Found`.
    pub fall: Option<String>,
    /// Date-like text, e.g. `1880-01-01T00:00:00.000`.
    pub year: Option<String>,
    pub reclat: Option<String>,
    pub reclong: Option<String>,
}

/// Timestamp layouts seen in meteorite exports, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a date-like string into its calendar year.
///
/// The year is taken as written; no timezone conversion is applied.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.year());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.year());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.year());
        }
    }
    // Bare year, e.g. "1880".
    if s.len() <= 6 && s.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return s.parse::<i32>().ok();
    }
    None
}

/// Parse numeric-like text into a finite `f64`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split `"(50.775, 6.08333)"` into its latitude and longitude text.
fn split_geolocation(raw: &str) -> Option<(String, String)> {
    let inner = raw.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (lat, long) = inner.split_once(',')?;
    let (lat, long) = (lat.trim(), long.trim());
    parse_number(lat)?;
    parse_number(long)?;
    Some((lat.to_string(), long.to_string()))
}

impl Record {
    /// Calendar year of `year`, if present and date-like.
    pub fn parsed_year(&self) -> Option<i32> {
        self.year.as_deref().and_then(parse_year)
    }

    /// Mass in grams, if present and numeric.
    pub fn parsed_mass(&self) -> Option<f64> {
        self.mass.as_deref().and_then(parse_number)
    }

    /// Class label, treating the empty string as absent.
    pub fn class_label(&self) -> Option<&str> {
        self.recclass.as_deref().filter(|c| !c.is_empty())
    }

    /// `(longitude, latitude)` when both coordinates are present and in range.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.reclat.as_deref().and_then(parse_number)?;
        let long = self.reclong.as_deref().and_then(parse_number)?;
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&long) {
            Some((long, lat))
        } else {
            None
        }
    }

    /// Set a field by its column name. Unknown columns are ignored.
    ///
    /// `GeoLocation` (`"(lat, long)"`) only fills coordinates that are still
    /// absent. Returns `false` when the column is not a record field.
    pub fn set_field(&mut self, column: &str, value: Option<String>) -> bool {
        if column == "GeoLocation" {
            if let Some((lat, long)) = value.as_deref().and_then(split_geolocation) {
                self.reclat.get_or_insert(lat);
                self.reclong.get_or_insert(long);
            }
            return true;
        }
        let slot = match column {
            "name" => &mut self.name,
            "id" => &mut self.id,
            "nametype" => &mut self.nametype,
            "recclass" => &mut self.recclass,
            "mass" | "mass (g)" => &mut self.mass,
            "fall" => &mut self.fall,
            "year" => &mut self.year,
            "reclat" => &mut self.reclat,
            "reclong" => &mut self.reclong,
            _ => return false,
        };
        *slot = value;
        true
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All records read from one file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Where the records came from, for the status bar.
    pub source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_formats() {
        assert_eq!(parse_year("1880-01-01T00:00:00.000"), Some(1880));
        assert_eq!(parse_year("2001-06-01"), Some(2001));
        assert_eq!(parse_year("1999-12-31T23:00:00Z"), Some(1999));
        assert_eq!(parse_year("01/01/1952 12:00:00 AM"), Some(1952));
        assert_eq!(parse_year("07/04/1976"), Some(1976));
        assert_eq!(parse_year("1907"), Some(1907));
    }

    #[test]
    fn test_parse_year_rejects_garbage() {
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("   "), None);
        assert_eq!(parse_year("not a date"), None);
        assert_eq!(parse_year("2001-13-45"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("21"), Some(21.0));
        assert_eq!(parse_number(" 1e3 "), Some(1000.0));
        assert_eq!(parse_number("0"), Some(0.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("bad"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_class_label_skips_empty() {
        let mut r = Record::default();
        assert_eq!(r.class_label(), None);
        r.recclass = Some(String::new());
        assert_eq!(r.class_label(), None);
        r.recclass = Some("L6".into());
        assert_eq!(r.class_label(), Some("L6"));
    }

    #[test]
    fn test_coordinates_range_checked() {
        let mut r = Record {
            reclat: Some("50.775".into()),
            reclong: Some("6.08333".into()),
            ..Default::default()
        };
        assert_eq!(r.coordinates(), Some((6.08333, 50.775)));

        r.reclat = Some("95.0".into());
        assert_eq!(r.coordinates(), None);

        r.reclat = None;
        assert_eq!(r.coordinates(), None);
    }

    #[test]
    fn test_set_field_maps_csv_headers() {
        let mut r = Record::default();
        assert!(r.set_field("mass (g)", Some("720".into())));
        assert!(r.set_field("recclass", Some("H5".into())));
        assert!(!r.set_field("bogus", Some("x".into())));
        assert_eq!(r.mass.as_deref(), Some("720"));
        assert_eq!(r.recclass.as_deref(), Some("H5"));
    }

    #[test]
    fn test_geolocation_fills_missing_coordinates() {
        let mut r = Record::default();
        assert!(r.set_field("GeoLocation", Some("(50.775, 6.08333)".into())));
        assert_eq!(r.coordinates(), Some((6.08333, 50.775)));

        let mut r = Record {
            reclat: Some("10.0".into()),
            reclong: Some("20.0".into()),
            ..Default::default()
        };
        r.set_field("GeoLocation", Some("(1.0, 2.0)".into()));
        assert_eq!(r.coordinates(), Some((20.0, 10.0)));

        let mut r = Record::default();
        r.set_field("GeoLocation", Some("somewhere".into()));
        r.set_field("GeoLocation", Some("(north, 2.0)".into()));
        assert_eq!(r.reclat, None);
        assert_eq!(r.reclong, None);
    }
}
