//! # fc-04-query-projection
//!
//! Query Projection for Fertilizer-Custody.
//!
//! ## Role in System
//!
//! - **Read Side**: point reads, full history replay and predicate search
//!   over the same key-value ledger the custody engine writes.
//! - **Degrades, Never Hides**: a history version or query match that fails
//!   to decode is returned as raw text instead of failing the whole read.
//!
//! ## Operations
//!
//! | Operation | Returns | Errors |
//! |-----------|---------|--------|
//! | `read_unit(id)` / `read_delivery(id)` | decoded entity | `NotFound`, `MalformedRecord` |
//! | `history(key)` | lazy iterator of [`HistoryEntry`], oldest first | ledger failures per item |
//! | `query(predicate)` | every match as [`QueryResult`] | `QueryUnsupported`, `InvalidArgument` |
//!
//! Selector builders for the usual questions live in [`domain::queries`].

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::{HistoryReplay, QueryProjection};
