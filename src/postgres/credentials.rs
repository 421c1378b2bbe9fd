use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::{AuthError, CredentialStore, User};

/// [`CredentialStore`] backed by a Postgres `users` table.
///
/// The secret column is compared inside the query, so this store never
/// reports whether the identifier or the secret was wrong; any
/// non-match is `InvalidCredentials`.
///
/// Expected schema:
///
/// ```sql
/// CREATE TABLE users (
///     identifier TEXT PRIMARY KEY,
///     secret     BYTEA NOT NULL
/// );
/// ```
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRecord {
    identifier: String,
    secret: Vec<u8>,
}

impl From<CredentialRecord> for User {
    fn from(row: CredentialRecord) -> Self {
        User {
            identifier: row.identifier,
            secret: row.secret,
        }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn lookup(&self, identifier: &str, secret: &[u8]) -> Result<User, AuthError> {
        let row: Option<CredentialRecord> = sqlx::query_as(
            "SELECT identifier, secret FROM users WHERE identifier = $1 AND secret = $2",
        )
        .bind(identifier)
        .bind(secret)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(Into::into).ok_or(AuthError::InvalidCredentials)
    }
}
