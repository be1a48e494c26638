//! Cross-subsystem integration tests.

pub mod fixtures;

mod atomicity;
mod gateway_flows;
mod random_operations;
