/// Data layer: the country table, its derived labels, and read-only queries.
///
/// Architecture:
/// ```text
///  compiled-in literal        .csv / .json
///        │                         │
///        ▼                         ▼
///   ┌──────────┐             ┌──────────┐
///   │ catalog  │             │  loader   │  parse file → Dataset
///   └──────────┘             └──────────┘
///        │                         │
///        └────────────┬────────────┘
///                     ▼
///   ┌──────────────────────────────┐
///   │ Dataset (Vec<Record>)         │  classify: score → Category,
///   │                               │            latitude → Region
///   └──────────────────────────────┘
///        │            │            │
///        ▼            ▼            ▼
///   ┌────────┐   ┌────────┐   ┌────────┐
///   │ filter │   │ query  │   │ stats  │   sub-tables, neighbours, rankings
///   └────────┘   └────────┘   └────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Dataset → .csv / .json
///   └──────────┘
/// ```

pub mod catalog;
pub mod classify;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod query;
pub mod stats;
