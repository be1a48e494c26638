//! # Domain Layer
//!
//! Result shapes and selector builders for the read side.

pub mod entities;
pub mod queries;

pub use entities::*;
pub use queries::*;
