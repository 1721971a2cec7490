use std::collections::{BTreeMap, HashMap};

use super::model::Record;

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Strike counts keyed by calendar year, ascending.
pub type YearHistogram = BTreeMap<i32, usize>;

/// Strike counts keyed by class label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassHistogram {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ClassHistogram {
    /// Count one more strike for `label`.
    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    /// `(label, count)` pairs in the order labels were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
impl ClassHistogram {
    pub fn get(&self, label: &str) -> Option<usize> {
        self.index.get(label).map(|&pos| self.entries[pos].1)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

// ---------------------------------------------------------------------------
// Summary – output of one aggregation pass
// ---------------------------------------------------------------------------

/// The derived views of a record sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub by_year: YearHistogram,
    pub by_class: ClassHistogram,
    /// Mean of all parseable masses, `0.0` when there are none.
    pub average_mass: f64,
}

/// Aggregate a record sequence in a single pass.
///
/// Each field is evaluated on its own: a malformed year only drops the
/// record from the year histogram, never from the class count or the mass
/// average.
pub fn aggregate<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut by_year = YearHistogram::new();
    let mut by_class = ClassHistogram::default();
    let mut mass_sum = 0.0_f64;
    let mut mass_count = 0_usize;

    for record in records {
        if let Some(year) = record.parsed_year() {
            *by_year.entry(year).or_insert(0) += 1;
        }
        if let Some(label) = record.class_label() {
            by_class.increment(label);
        }
        if let Some(mass) = record.parsed_mass() {
            mass_sum += mass;
            mass_count += 1;
        }
    }

    let average_mass = if mass_count > 0 {
        mass_sum / mass_count as f64
    } else {
        0.0
    };

    Summary {
        by_year,
        by_class,
        average_mass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: Option<&str>, mass: Option<&str>, class: Option<&str>) -> Record {
        Record {
            year: year.map(String::from),
            mass: mass.map(String::from),
            recclass: class.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_l6_strikes_and_a_bad_mass() {
        let records = vec![
            rec(Some("2001-01-01"), Some("10"), Some("L6")),
            rec(Some("2001-06-01"), Some("20"), Some("L6")),
            rec(None, Some("bad"), None),
        ];
        let summary = aggregate(&records);

        assert_eq!(summary.by_year, BTreeMap::from([(2001, 2)]));
        assert_eq!(summary.by_class.len(), 1);
        assert_eq!(summary.by_class.get("L6"), Some(2));
        assert_eq!(summary.average_mass, 15.0);
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&Vec::<Record>::new());
        assert!(summary.by_year.is_empty());
        assert!(summary.by_class.is_empty());
        assert_eq!(summary.average_mass, 0.0);
    }

    #[test]
    fn test_fields_counted_independently() {
        let records = vec![
            rec(Some("garbage"), Some("5"), Some("H5")),
            rec(Some("1990-01-01"), None, None),
            rec(None, None, Some("")),
        ];
        let summary = aggregate(&records);

        assert_eq!(summary.by_year, BTreeMap::from([(1990, 1)]));
        assert_eq!(summary.by_class.get("H5"), Some(1));
        assert_eq!(summary.by_class.total(), 1);
        assert_eq!(summary.average_mass, 5.0);
    }

    #[test]
    fn test_no_numeric_mass_averages_to_zero() {
        let records = vec![
            rec(None, Some(""), None),
            rec(None, Some("heavy"), None),
            rec(None, None, None),
        ];
        assert_eq!(aggregate(&records).average_mass, 0.0);
    }

    #[test]
    fn test_class_order_is_first_seen() {
        let records = vec![
            rec(None, None, Some("L6")),
            rec(None, None, Some("H5")),
            rec(None, None, Some("L6")),
            rec(None, None, Some("Eucrite")),
        ];
        let summary = aggregate(&records);
        let labels: Vec<&str> = summary.by_class.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["L6", "H5", "Eucrite"]);
        assert_eq!(summary.by_class.get("L6"), Some(2));
    }

    #[test]
    fn test_histogram_totals_bounded_by_parseable_fields() {
        let records = vec![
            rec(Some("1880-01-01T00:00:00.000"), Some("21"), Some("L5")),
            rec(Some("1951"), Some("720"), Some("H6")),
            rec(Some("never"), Some("x"), Some("L5")),
            rec(None, Some("107000"), None),
        ];
        let summary = aggregate(&records);

        let with_year = records.iter().filter(|r| r.parsed_year().is_some()).count();
        let with_class = records.iter().filter(|r| r.class_label().is_some()).count();
        assert!(summary.by_year.values().sum::<usize>() <= with_year);
        assert_eq!(summary.by_class.total(), with_class);
    }

    #[test]
    fn test_average_is_order_independent_and_idempotent() {
        let mut records = vec![
            rec(None, Some("1"), None),
            rec(None, Some("2"), None),
            rec(None, Some("6"), None),
        ];
        let first = aggregate(&records);
        assert_eq!(first, aggregate(&records));
        assert_eq!(first.average_mass, 3.0);

        records.reverse();
        assert_eq!(aggregate(&records).average_mass, 3.0);
    }
}
