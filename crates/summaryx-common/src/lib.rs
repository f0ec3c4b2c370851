//! summaryx-common — Shared error type and result alias used across all Summaryx crates.

pub mod error;

pub use error::{Result, SummaryxError};
