//! SQL-backed [`hrms_ports::ItemStore`] for SQLite and Postgres.

mod store;

pub use store::SqlxItemStore;
