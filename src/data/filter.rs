use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Search predicate: free text plus an optional year range
// ---------------------------------------------------------------------------

/// What the user typed into the search panel.
///
/// An empty query and no year bounds means "no search": the filtered
/// sequence is then empty and the full dataset is shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Case-insensitive substring matched against name and class.
    pub query: String,
    /// Inclusive lower year bound.
    pub year_from: Option<i32>,
    /// Inclusive upper year bound.
    pub year_to: Option<i32>,
}

impl SearchState {
    /// Whether any constraint is set.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.year_from.is_some() || self.year_to.is_some()
    }

    /// Reset every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a single record passes the search.
    ///
    /// * A non-blank query must occur in `name` or `recclass`.
    /// * A year bound requires a parseable year inside the bound.
    pub fn matches(&self, record: &Record) -> bool {
        let needle = self.query.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = [record.name.as_deref(), record.recclass.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if self.year_from.is_some() || self.year_to.is_some() {
            let Some(year) = record.parsed_year() else {
                return false;
            };
            if self.year_from.is_some_and(|from| year < from) {
                return false;
            }
            if self.year_to.is_some_and(|to| year > to) {
                return false;
            }
        }
        true
    }
}

/// Return indices of records that pass the search.
///
/// Returns an empty list when the search is inactive, so callers can treat
/// "no filtered input" and "search matched nothing" the same way.
pub fn filtered_indices(dataset: &Dataset, search: &SearchState) -> Vec<usize> {
    if !search.is_active() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| search.matches(r))
        .map(|(i, _)| i)
        .collect()
}
