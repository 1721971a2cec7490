//! Tabbed summary of the active records: tab state, and the pure
//! decision of what to draw for each tab.

pub mod format;
pub mod tab;
pub mod view;

pub use tab::{SummaryTab, TabSelector};
pub use view::{render, BarSeries, SummaryView, ViewInput};
