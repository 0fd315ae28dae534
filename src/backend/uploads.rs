/**
 * Uploaded Files
 *
 * Pictures are written below `UPLOAD_DIR`:
 *
 * ```text
 * <UPLOAD_DIR>/
 * ├── product_pictures/<product id>-<random>-<sanitised name>
 * └── profile_pictures/<user id>.png
 * ```
 *
 * and handed back to clients as absolute URLs built from `PUBLIC_BASE_URL`.
 * Files are served through `tower_http::services::ServeFile`.
 */
use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use uuid::Uuid;

use crate::backend::error::BackendError;

const PRODUCT_DIR: &str = "product_pictures";
const PROFILE_DIR: &str = "profile_pictures";
const MAX_NAME_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    base_url: String,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store one product picture and return its public URL
    pub async fn save_product_picture(
        &self,
        product_id: Uuid,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let file_name = format!(
            "{}-{}-{}",
            product_id,
            &Uuid::new_v4().simple().to_string()[..8],
            sanitize_file_name(original_name.unwrap_or_default())
        );
        let dir = self.root.join(PRODUCT_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        tracing::info!(%product_id, "Stored product picture {}", file_name);
        Ok(format!("{}/api/v1/product/image/{}", self.base_url, file_name))
    }

    /// Store (or replace) a user's profile picture and return its public URL
    pub async fn save_profile_picture(&self, user_id: Uuid, bytes: &[u8]) -> std::io::Result<String> {
        let dir = self.root.join(PROFILE_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(self.profile_picture_path(user_id), bytes).await?;

        tracing::info!(%user_id, "Stored profile picture");
        Ok(format!("{}/api/v1/user/image/{}", self.base_url, user_id))
    }

    /// Remove product pictures saved for an upload that did not go through
    pub async fn discard_product_pictures(&self, urls: &[String]) {
        for url in urls {
            let Some(path) = url
                .rsplit('/')
                .next()
                .and_then(|name| self.product_picture_path(name))
            else {
                continue;
            };
            if let Err(err) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove picture {}: {}", path.display(), err);
            }
        }
    }

    pub fn profile_picture_path(&self, user_id: Uuid) -> PathBuf {
        self.root.join(PROFILE_DIR).join(format!("{user_id}.png"))
    }

    /// Resolve a product picture name; `None` for anything but a plain
    /// file name
    pub fn product_picture_path(&self, file_name: &str) -> Option<PathBuf> {
        let plain = !file_name.is_empty()
            && !file_name.starts_with('.')
            && file_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        plain.then(|| self.root.join(PRODUCT_DIR).join(file_name))
    }
}

/// Keep ASCII letters, digits, `.`, `_` and `-`; drop leading dots
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .chars()
        .take(MAX_NAME_LEN)
        .collect();

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

/// Serve a stored file, or 404 with the usual envelope if it is missing
pub async fn serve_file(path: &Path, request: Request) -> Result<Response, BackendError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(BackendError::not_found("image not found"));
    }

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(Body::new).into_response())
}
