//! User profile routes under `/user`.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{
    delete_user, get_profile_picture, get_user, update_user, upload_profile_picture,
};

pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/user/get/{id}", get(get_user))
        .route("/user/update", put(update_user))
        .route("/user/delete", delete(delete_user))
        .route("/user/image/upload", post(upload_profile_picture))
        // Public so the URL can be used directly in an <img> tag
        .route("/user/image/{id}", get(get_profile_picture))
}
