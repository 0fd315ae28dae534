/**
 * Product Routes
 *
 * Listing CRUD, pictures, purchase and the watchlist under `/product`.
 * `GET /product/image/{filename}` is the only public one.
 */
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::products::handlers::{
    buy_products, create_product, delete_product, get_observer, get_product,
    get_product_picture, list_products, list_products_of, update_observer, update_product,
    upload_product_pictures,
};
use crate::backend::server::state::AppState;

pub fn configure_product_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/product/create", post(create_product))
        .route("/product/get/{id}", get(get_product))
        .route("/product/get_all", get(list_products))
        .route("/product/get_all/{id}", get(list_products_of))
        .route("/product/update/{id}", put(update_product))
        .route("/product/delete/{id}", delete(delete_product))
        .route(
            "/product/image/{id}",
            post(upload_product_pictures).get(get_product_picture),
        )
        .route("/product/buy", post(buy_products))
        .route("/product/observer", get(get_observer).put(update_observer))
}
