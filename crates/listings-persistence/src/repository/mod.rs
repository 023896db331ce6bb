//! # Repository Module
//!
//! Repository pattern implementations for property persistence.

pub mod postgres_impl;
pub mod traits;

pub use postgres_impl::{PgPropertyRepository, PostgresConfig};
pub use traits::PropertyRepository;
