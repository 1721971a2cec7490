/// Data layer: records, loading, searching and aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (worker thread)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, every field optional
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search query / year range → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  one pass → years, classes, average mass
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
