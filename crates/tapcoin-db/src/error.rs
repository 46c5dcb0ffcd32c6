//! Error types for the data layer.
//!
//! Write operations always propagate a [`DbError`] so callers can
//! distinguish "store failure" from "zero rows"; the lenient
//! log-and-default behavior for read aggregates lives one layer up, in
//! the `Game` facade.

use tapcoin_types::UserId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed (connection, transaction, query).
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error (malformed connection URL, bad settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation required an existing player row and found none.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// A referral named a referrer with no player row; recording it
    /// would create a dangling edge.
    #[error("referrer {0} not found")]
    ReferrerNotFound(UserId),

    /// A player tried to refer themselves.
    #[error("user {0} cannot refer themselves")]
    SelfReferral(UserId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_user_id() {
        let err = DbError::UserNotFound(UserId::new(42));
        assert_eq!(err.to_string(), "user 42 not found");

        let err = DbError::SelfReferral(UserId::new(7));
        assert_eq!(err.to_string(), "user 7 cannot refer themselves");
    }
}
