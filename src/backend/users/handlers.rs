/**
 * User Handlers
 *
 * HTTP handlers for `/api/v1/user`: profile lookup and update, account
 * deletion and the profile picture.
 *
 * Profile pictures are stored as `<upload_dir>/profile_pictures/<id>.png`;
 * a new upload replaces the previous file.
 */
use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        Multipart, Path, Request, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};

use crate::backend::auth::AuthService;
use crate::backend::error::{reply, ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::uploads::{serve_file, UploadStore};
use crate::backend::users::UserDirectory;
use crate::shared::models::{parse_id, User};

const PROFILE_PICTURE_FIELD: &str = "profile_picture";

/// GET /api/v1/user/get/{id}
pub async fn get_user(
    State(users): State<UserDirectory>,
    _caller: AuthUser,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<User> {
    let Path(raw) = path?;
    let id = parse_id(&raw)?;
    reply(users.get_user(id).await?)
}

/// PUT /api/v1/user/update
///
/// Replaces the caller's profile. The body may omit `id`; if it carries
/// one, it must be the caller's.
///
/// # Errors
///
/// * `401 Unauthorized` - the body names another user's profile
/// * `422 Unprocessable Entity` - malformed body or invalid field
pub async fn update_user(
    State(users): State<UserDirectory>,
    caller: AuthUser,
    payload: Result<Json<User>, JsonRejection>,
) -> ApiResult<User> {
    let Json(update) = payload.map_err(|rejection| {
        tracing::warn!("Rejected profile update body: {}", rejection.body_text());
        BackendError::unprocessable(rejection.body_text())
    })?;

    reply(users.update_user(caller.id(), update).await?)
}

/// DELETE /api/v1/user/delete
///
/// Removes the caller's profile and credentials. Answers 204 with no body.
pub async fn delete_user(
    State(auth): State<AuthService>,
    caller: AuthUser,
) -> Result<StatusCode, BackendError> {
    auth.delete_account(caller.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/user/image/upload
///
/// Multipart upload with one `profile_picture` file. Answers with the URL the
/// picture is served from.
pub async fn upload_profile_picture(
    State(users): State<UserDirectory>,
    State(uploads): State<UploadStore>,
    caller: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<String> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PROFILE_PICTURE_FIELD) {
            continue;
        }

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            break;
        }

        let url = uploads.save_profile_picture(caller.id(), &bytes).await?;
        users.set_profile_picture(caller.id(), url.clone()).await?;
        return reply(url);
    }

    Err(BackendError::validation(format!(
        "no '{PROFILE_PICTURE_FIELD}' file was uploaded"
    )))
}

/// GET /api/v1/user/image/{id}
pub async fn get_profile_picture(
    State(uploads): State<UploadStore>,
    path: Result<Path<String>, PathRejection>,
    request: Request,
) -> Result<Response, BackendError> {
    let Path(raw) = path?;
    let id = parse_id(&raw)?;
    serve_file(&uploads.profile_picture_path(id), request).await
}
