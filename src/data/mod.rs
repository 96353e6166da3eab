/// Data layer: core types, loading, validation, and statistics.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SubjectTable (malformed rows skipped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  all seven required columns present? (fatal on miss)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ SubjectTable    │ → project → MeasurementMatrix (Weight = column 0)
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  summary aggregates, box geometry, histogram bins
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod stats;
pub mod validate;
