//! Postgres-backed credential storage.

mod credentials;

pub use credentials::PostgresCredentialStore;
