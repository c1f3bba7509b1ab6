/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  bundled .json / opened .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, column list
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌────────────┐
///   │  filter   │ ──▶ │ aggregate   │  group / compare → chart data
///   └──────────┘     └────────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
