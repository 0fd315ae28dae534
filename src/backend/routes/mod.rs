//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are grouped by resource into focused submodules and nested under
//! `/api/v1` by the router.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs             - Module exports and documentation
//! ├── router.rs          - Main router creation and middleware
//! ├── auth_routes.rs     - `/auth`
//! ├── user_routes.rs     - `/user`
//! └── product_routes.rs  - `/product`
//! ```
//!
//! # Route Table
//!
//! | method | path                         | auth |
//! |--------|------------------------------|------|
//! | POST   | /auth/register               | no   |
//! | POST   | /auth/login                  | no   |
//! | PUT    | /auth/update                 | yes  |
//! | GET    | /auth/refresh                | yes  |
//! | GET    | /auth/current                | yes  |
//! | GET    | /user/get/{id}               | yes  |
//! | PUT    | /user/update                 | yes  |
//! | DELETE | /user/delete                 | yes  |
//! | POST   | /user/image/upload           | yes  |
//! | GET    | /user/image/{id}             | no   |
//! | POST   | /product/create              | yes  |
//! | GET    | /product/get/{id}            | yes  |
//! | GET    | /product/get_all             | yes  |
//! | GET    | /product/get_all/{id}        | yes  |
//! | PUT    | /product/update/{id}         | yes  |
//! | DELETE | /product/delete/{id}         | yes  |
//! | POST   | /product/image/{id}          | yes  |
//! | GET    | /product/image/{filename}    | no   |
//! | POST   | /product/buy                 | yes  |
//! | GET    | /product/observer            | yes  |
//! | PUT    | /product/observer            | yes  |
//!
//! Authentication is enforced per handler by the `AuthUser` extractor.

/// Main router creation
pub mod router;

/// Authentication routes
pub mod auth_routes;

/// User profile routes
pub mod user_routes;

/// Product routes
pub mod product_routes;

pub use router::create_router;
