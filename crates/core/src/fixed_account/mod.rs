//! Fixed-account domain rules.
//!
//! A fixed account is a template for a recurring financial obligation (rent,
//! a subscription) plus a generated sequence of due occurrences, each
//! independently payable. This module holds the pure rules: payment
//! validation, occurrence state, and statistics aggregation. Persistence
//! lives in `centavo-db`.

pub mod error;
pub mod service;
pub mod stats;
pub mod types;

pub use error::FixedAccountError;
pub use service::FixedAccountService;
pub use stats::aggregate_stats;
pub use types::{EntryKind, FixedAccountStats, OccurrenceStatus, TemplateSnapshot};
