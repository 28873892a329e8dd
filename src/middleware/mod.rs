use axum::{extract::Request, middleware::Next, response::Response};

use crate::{error::AppError, models::UserRole, utils::jwt};

fn bearer_token(req: &Request) -> Result<&str, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))
}

/// Rejects the request before any handler (and therefore any query) runs:
/// missing credentials are 401, a present but invalid/expired token is 403.
pub async fn auth_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let claims = jwt::verify_token(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

pub async fn admin_middleware(mut req: Request, next: Next) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let claims = jwt::verify_token(token)?;

    if claims.role != UserRole::Admin {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::Claims;
    use axum::{
        body::Body, http::StatusCode, middleware::from_fn, routing::get, Extension, Router,
    };
    use tower::ServiceExt;

    async fn whoami(Extension(claims): Extension<Claims>) -> String {
        claims.username
    }

    fn protected_router() -> Router {
        Router::new()
            .route("/products", get(whoami))
            .layer(from_fn(auth_middleware))
    }

    fn admin_router() -> Router {
        Router::new()
            .route("/users", get(whoami))
            .layer(from_fn(admin_middleware))
    }

    fn request(path: &str, token: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        std::env::set_var("JWT_SECRET", "test-secret");

        let response = protected_router()
            .oneshot(request("/products", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_scheme_is_unauthorized() {
        std::env::set_var("JWT_SECRET", "test-secret");

        let response = protected_router()
            .oneshot(
                http::Request::builder()
                    .uri("/products")
                    .header(http::header::AUTHORIZATION, "Basic abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_forbidden() {
        std::env::set_var("JWT_SECRET", "test-secret");

        let response = protected_router()
            .oneshot(request("/products", Some("not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_token_passes_claims_through() {
        std::env::set_var("JWT_SECRET", "test-secret");

        let token = jwt::generate_token(1, "alice", UserRole::User).unwrap();
        let response = protected_router()
            .oneshot(request("/products", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_admin_is_forbidden_on_admin_routes() {
        std::env::set_var("JWT_SECRET", "test-secret");

        let token = jwt::generate_token(1, "bob", UserRole::User).unwrap();
        let response = admin_router()
            .oneshot(request("/users", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let token = jwt::generate_token(2, "root", UserRole::Admin).unwrap();
        let response = admin_router()
            .oneshot(request("/users", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
