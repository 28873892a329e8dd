mod health;
mod login;
mod products;
mod register;
mod users;
mod verify;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

use crate::{AppState, middleware};

pub fn create_router() -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/verify", get(verify::verify_token))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/users/profile", get(users::get_profile))
        .layer(from_fn(middleware::auth_middleware));

    let admin = Router::new()
        .route("/users", get(users::list_users))
        .layer(from_fn(middleware::admin_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/register", post(register::register_user))
        .route("/auth/login", post(login::login_user))
        .merge(protected)
        .merge(admin)
}
