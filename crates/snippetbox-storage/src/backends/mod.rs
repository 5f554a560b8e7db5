//! Storage backend implementations
//!
//! Each backend implements [`Storage`](crate::Storage). Enable them via
//! feature flags.

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "memory")]
pub mod memory;
