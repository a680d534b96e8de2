//! Read-only views derived from the ledger: ISO week buckets and the per-day chart series.
//! Nothing here mutates or persists, every function recomputes from the current projects.

pub mod chart;
pub mod week;
