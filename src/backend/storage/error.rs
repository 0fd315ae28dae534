/**
 * Store Errors
 *
 * Failures reported by the document stores. They describe what happened to
 * the data (nothing matched, a unique key was taken, the database refused
 * the call) and leave the HTTP status to `BackendError`.
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A lookup or update by identity found no document
    #[error("{collection} with id {id} not found")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    /// A delete removed zero documents
    #[error("no {collection} matched the given id")]
    NoMatch { collection: &'static str },

    /// The store accepted the insert but did not hand back a stored document
    #[error("failed to insert {collection}")]
    InsertFailure { collection: &'static str },

    /// A unique key (login email, one watchlist per user) is already taken
    #[error("{field} '{value}' is already in use")]
    Duplicate { field: &'static str, value: String },

    /// Infrastructure failure in the database driver
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }

    /// True for the "nothing there" family (`NotFound`, `NoMatch`)
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoMatch { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
