/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///   folder of *.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  pick file → parse two columns → DataSet
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  DataSet  │  x (binding energy), y (intensity)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
