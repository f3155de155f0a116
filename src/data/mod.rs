/// Data layer: tokenizing, record building, and aggregation.
///
/// Architecture:
/// ```text
///  death-rate CSV text
///        │
///        ▼
///   ┌───────────┐
///   │ tokenizer │  line → Vec<String>, quote-aware
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  rows → Record (per RowPolicy) → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  world: sum per year / country: filter by name → Series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod tokenizer;
