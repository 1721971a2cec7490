use serde::{Deserialize, Serialize};

/// Which derived view the summary card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SummaryTab {
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "mass")]
    Mass,
    #[default]
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "recclass")]
    Class,
}

impl SummaryTab {
    /// Tabs in display order.
    pub const ALL: [SummaryTab; 4] = [
        SummaryTab::Number,
        SummaryTab::Mass,
        SummaryTab::Year,
        SummaryTab::Class,
    ];

    /// Button label and chart title.
    pub fn title(self) -> &'static str {
        match self {
            SummaryTab::Number => "Number of strikes",
            SummaryTab::Mass => "Average mass",
            SummaryTab::Year => "Strikes by year",
            SummaryTab::Class => "Strikes by composition",
        }
    }
}

/// Holds the active tab. Selecting a tab has no other effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabSelector {
    active: SummaryTab,
}

impl TabSelector {
    pub fn new(initial: SummaryTab) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> SummaryTab {
        self.active
    }

    pub fn select(&mut self, tab: SummaryTab) {
        self.active = tab;
    }

    pub fn is_active(&self, tab: SummaryTab) -> bool {
        self.active == tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_year() {
        let selector = TabSelector::default();
        assert_eq!(selector.active(), SummaryTab::Year);
    }

    #[test]
    fn test_select_switches_tab() {
        let mut selector = TabSelector::default();
        selector.select(SummaryTab::Class);
        assert!(selector.is_active(SummaryTab::Class));
        selector.select(SummaryTab::Number);
        assert_eq!(selector.active(), SummaryTab::Number);
    }

    #[test]
    fn test_titles() {
        let titles: Vec<&str> = SummaryTab::ALL.iter().map(|t| t.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Number of strikes",
                "Average mass",
                "Strikes by year",
                "Strikes by composition"
            ]
        );
    }
}
