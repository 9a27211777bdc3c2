//! Democracy-index atlas: a small country table, threshold classification,
//! and the queries behind the dashboard pages.

pub mod color;
pub mod config;
pub mod data;

pub use data::error::{LoadError, NotFoundError};
pub use data::model::{Category, Dataset, Position, Record, Region};
