//! Durable key-value storage contracts.

pub mod staging;
