//! Credential storage traits and fakes.

mod credentials;
#[cfg(any(test, feature = "mocks"))]
mod credentials_mock;

pub use credentials::CredentialStore;
#[cfg(any(test, feature = "mocks"))]
pub use credentials_mock::MockCredentialStore;
