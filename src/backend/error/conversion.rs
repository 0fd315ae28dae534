/**
 * Error Conversion
 *
 * `From` implementations from every layer error into `BackendError`, and the
 * `IntoResponse` impl that writes the `{"message": "..."}` envelope.
 *
 * # Response Format
 *
 * ```json
 * { "message": "product with id 4f1c... not found" }
 * ```
 */
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::auth::ownership::NotOwner;
use crate::backend::auth::{AuthError, TokenError};
use crate::backend::error::types::BackendError;
use crate::backend::products::CatalogError;
use crate::backend::storage::StoreError;
use crate::backend::users::DirectoryError;
use crate::shared::{ApiMessage, SharedError};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }
        (status, Json(ApiMessage::new(self.message()))).into_response()
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } | StoreError::NoMatch { .. } => {
                Self::NotFound(err.to_string())
            }
            StoreError::Duplicate { .. } => Self::Conflict(err.to_string()),
            StoreError::InsertFailure { .. } | StoreError::Database(_) => {
                tracing::error!("Store call failed: {}", err);
                Self::Persistence(err.to_string())
            }
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => {
                tracing::error!("Token signing failed: {}", err);
                Self::Internal(err.to_string())
            }
            _ => Self::Unauthorized(err.to_string()),
        }
    }
}

impl From<NotOwner> for BackendError {
    fn from(err: NotOwner) -> Self {
        Self::Unauthorized(err.to_string())
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailInUse(_) => Self::Conflict(err.to_string()),
            AuthError::NoAccount => Self::NotFound(err.to_string()),
            AuthError::InvalidPassword => Self::Unauthorized(err.to_string()),
            AuthError::NotFound(_) => Self::Unprocessable(err.to_string()),
            AuthError::Validation(inner) => inner.into(),
            AuthError::Token(inner) => inner.into(),
            AuthError::Hashing(inner) => {
                tracing::error!("Password hashing failed: {}", inner);
                Self::Internal("failed to process password".to_string())
            }
            AuthError::Store(inner) => inner.into(),
        }
    }
}

impl From<DirectoryError> for BackendError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Validation(inner) => Self::Unprocessable(inner.to_string()),
            DirectoryError::NotOwner(inner) => inner.into(),
            DirectoryError::Store(inner) => inner.into(),
        }
    }
}

impl From<CatalogError> for BackendError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::EmptyCart
            | CatalogError::InvalidQuantity { .. }
            | CatalogError::OwnerCannotBuy { .. }
            | CatalogError::InsufficientStock { .. } => Self::Validation(err.to_string()),
            CatalogError::NoPictures => Self::NotFound(err.to_string()),
            CatalogError::Validation(inner) => inner.into(),
            CatalogError::NotOwner(inner) => inner.into(),
            CatalogError::Store(inner) => inner.into(),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for BackendError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        Self::Validation(err.body_text())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("File storage failed: {}", err);
        Self::Internal("failed to store uploaded file".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_response_uses_message_envelope() {
        let response = BackendError::not_found("nothing here").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "nothing here" }));
    }

    #[test]
    fn test_store_error_mapping() {
        let missing: BackendError = StoreError::not_found("user", Uuid::nil()).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let taken: BackendError = StoreError::duplicate("email", "a@b.c").into();
        assert_eq!(taken.status_code(), StatusCode::BAD_REQUEST);

        let failed: BackendError = StoreError::InsertFailure { collection: "user" }.into();
        assert_eq!(failed.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_auth_error_mapping() {
        let cases = [
            (AuthError::NoAccount, StatusCode::NOT_FOUND),
            (AuthError::InvalidPassword, StatusCode::UNAUTHORIZED),
            (AuthError::EmailInUse("a@b.c".into()), StatusCode::BAD_REQUEST),
            (AuthError::NotFound(Uuid::nil()), StatusCode::UNPROCESSABLE_ENTITY),
            (AuthError::Token(TokenError::Expired), StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(BackendError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_catalog_error_mapping() {
        let owner: BackendError = CatalogError::OwnerCannotBuy {
            product_id: Uuid::nil(),
        }
        .into();
        assert_eq!(owner.status_code(), StatusCode::BAD_REQUEST);

        let none: BackendError = CatalogError::NoPictures.into();
        assert_eq!(none.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(none.message(), "No pictures were uploaded");
    }

    #[test]
    fn test_directory_validation_is_unprocessable() {
        let err: BackendError =
            DirectoryError::Validation(SharedError::validation("age", "too young")).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
