//! # Storage Module
//!
//! Persistence of users, categories, expenses and incomes in SQLite via SQLx.
//!
//! The statistics core is read-only with respect to this data: it lists records
//! and users through the traits in [`traits`] and never mutates them.

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::{RecordRepository, UserRepository};
pub use traits::{Connection, RecordStorage, UserStorage};

#[cfg(test)]
pub mod test_utils;
