/**
 * Application State Management
 *
 * `AppState` is the application context built once at start-up and handed to
 * every handler. It holds the services, each of which owns `Arc` handles to
 * the stores it needs, so cloning the state is cheap.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers (and the `AuthUser` extractor)
 * ask for just the part of the state they use, e.g.
 * `State(catalog): State<ProductCatalog>`.
 */
use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::{AuthService, PasswordHasher, TokenService};
use crate::backend::products::ProductCatalog;
use crate::backend::server::config::ServerConfig;
use crate::backend::storage::Stores;
use crate::backend::uploads::UploadStore;
use crate::backend::users::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub tokens: TokenService,
    pub auth: AuthService,
    pub users: UserDirectory,
    pub catalog: ProductCatalog,
    pub uploads: UploadStore,
}

impl AppState {
    /// Wire every service over the given stores
    pub fn new(config: ServerConfig, stores: Stores) -> Self {
        let tokens = TokenService::new(
            config.jwt_secret.as_bytes(),
            config.access_token_ttl,
            config.refresh_token_ttl,
        );
        let users = UserDirectory::new(stores.users.clone());
        let auth = AuthService::new(
            stores.credentials.clone(),
            users.clone(),
            tokens.clone(),
            PasswordHasher::new(config.bcrypt_cost),
        );
        let catalog = ProductCatalog::new(stores.products.clone(), stores.observers.clone());
        let uploads = UploadStore::new(config.upload_dir.clone(), config.public_base_url.clone());

        Self {
            config: Arc::new(config),
            tokens,
            auth,
            users,
            catalog,
            uploads,
        }
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for UserDirectory {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for ProductCatalog {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.catalog.clone()
    }
}

impl FromRef<AppState> for UploadStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.uploads.clone()
    }
}
