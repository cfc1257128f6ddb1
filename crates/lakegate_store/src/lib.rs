//! # Lakegate Store
//!
//! Connection provider and storage plumbing for the lakegate warehouse.
//!
//! The store is a single SQLite database accessed through one shared pool.
//! Warehouse layers are rendered as table-name prefixes (`trusted_*`,
//! `refined_*`) since SQLite has no schemas; the mapping lives in
//! [`lakegate_core::Layer`].
//!
//! Trusted-layer tables deliberately carry no declared constraints: they
//! mirror bulk CSV loads, and integrity is the validator's job, not the
//! storage engine's.

pub mod audit;
pub mod connect;
pub mod schema;

pub use audit::*;
pub use connect::*;
pub use schema::*;
