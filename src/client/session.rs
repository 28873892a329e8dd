use crate::models::{LoginRequest, Product, RegisterRequest, UserRole, UserSummary};

use super::{
    api::ApiClient,
    error::ClientError,
    form::{self, ProductForm},
};

/// Screen-level state. Loading and error conditions are overlays tracked
/// separately (`in_flight`, `last_error`), not states of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    Authenticating,
    Browsing,
    Editing,
}

/// Explicit session/store object: owns the API client (and with it the
/// token), the signed-in user, and the cached product list. Screen
/// controllers hold this instead of reaching into ambient globals.
///
/// One operation runs at a time; a second call while one is in flight is a
/// no-op, mirroring a disabled submit button.
#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    state: SessionState,
    user: Option<UserSummary>,
    products: Vec<Product>,
    last_error: Option<String>,
    in_flight: bool,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: SessionState::LoggedOut,
            user: None,
            products: Vec::new(),
            last_error: None,
            in_flight: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Browsing | SessionState::Editing)
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .map(|user| user.role == UserRole::Admin)
            .unwrap_or(false)
    }

    /// Records the failure and, on an Unauthorized, treats the token as
    /// invalid/expired: implicit logout, cache cleared.
    fn fail(&mut self, err: ClientError) -> ClientError {
        self.last_error = Some(err.to_string());
        if matches!(err, ClientError::Unauthorized(_)) {
            self.clear_session();
        }
        err
    }

    fn clear_session(&mut self) {
        self.api.clear_token();
        self.user = None;
        self.products.clear();
        self.state = SessionState::LoggedOut;
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        if self.in_flight {
            return Ok(());
        }
        self.in_flight = true;
        let result = self.login_inner(username, password).await;
        self.in_flight = false;
        result
    }

    async fn login_inner(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        if let Err(err) = form::validate_login(username, password) {
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        self.state = SessionState::Authenticating;

        let payload = LoginRequest {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        };

        match self.api.login(&payload).await {
            Ok(response) => {
                self.api.set_token(response.token);
                self.user = Some(response.user);
                self.state = SessionState::Browsing;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::LoggedOut;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Registration leaves the session logged out; the caller logs in with
    /// the new credentials afterwards. Returns the created user id.
    pub async fn register(
        &mut self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<i32, ClientError> {
        if self.in_flight {
            return Err(ClientError::Validation(
                "Another operation is in progress".to_string(),
            ));
        }
        self.in_flight = true;
        let result = self.register_inner(username, password, email).await;
        self.in_flight = false;
        result
    }

    async fn register_inner(
        &mut self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<i32, ClientError> {
        if let Err(err) = form::validate_registration(username, password, email) {
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        let payload = RegisterRequest {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
            email: email
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_string),
        };

        match self.api.register(&payload).await {
            Ok(response) => {
                self.last_error = None;
                Ok(response.user_id)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn logout(&mut self) {
        self.clear_session();
        self.last_error = None;
    }

    pub async fn refresh_products(&mut self) -> Result<(), ClientError> {
        if self.in_flight {
            return Ok(());
        }
        self.in_flight = true;
        let result = self.refresh_inner().await;
        self.in_flight = false;
        result
    }

    async fn refresh_inner(&mut self) -> Result<(), ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthorized(
                "Please log in to view products".to_string(),
            ));
        }

        match self.api.list_products().await {
            Ok(products) => {
                self.products = products;
                self.last_error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// The add/edit form is admin-only.
    pub fn open_editor(&mut self) -> Result<(), ClientError> {
        if self.state != SessionState::Browsing {
            return Err(ClientError::Validation(
                "Editor is only reachable while browsing".to_string(),
            ));
        }
        if !self.is_admin() {
            return Err(ClientError::Forbidden(
                "Admin access required".to_string(),
            ));
        }
        self.state = SessionState::Editing;
        Ok(())
    }

    pub fn close_editor(&mut self) {
        if self.state == SessionState::Editing {
            self.state = SessionState::Browsing;
        }
    }

    pub async fn create_product(&mut self, product_form: &ProductForm) -> Result<i32, ClientError> {
        if self.in_flight {
            return Err(ClientError::Validation(
                "Another operation is in progress".to_string(),
            ));
        }
        self.in_flight = true;
        let result = self.create_inner(product_form).await;
        self.in_flight = false;
        result
    }

    async fn create_inner(&mut self, product_form: &ProductForm) -> Result<i32, ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthorized("Please log in".to_string()));
        }

        let payload = product_form.validate().map_err(|err| {
            self.last_error = Some(err.to_string());
            err
        })?;

        match self.api.create_product(&payload).await {
            Ok(response) => {
                self.reload_after_mutation().await;
                Ok(response.id)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn update_product(
        &mut self,
        id: i32,
        product_form: &ProductForm,
    ) -> Result<(), ClientError> {
        if self.in_flight {
            return Err(ClientError::Validation(
                "Another operation is in progress".to_string(),
            ));
        }
        self.in_flight = true;
        let result = self.update_inner(id, product_form).await;
        self.in_flight = false;
        result
    }

    async fn update_inner(&mut self, id: i32, product_form: &ProductForm) -> Result<(), ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthorized("Please log in".to_string()));
        }

        let payload = product_form.validate().map_err(|err| {
            self.last_error = Some(err.to_string());
            err
        })?;

        match self.api.update_product(id, &payload).await {
            Ok(_) => {
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub async fn delete_product(&mut self, id: i32) -> Result<(), ClientError> {
        if self.in_flight {
            return Err(ClientError::Validation(
                "Another operation is in progress".to_string(),
            ));
        }
        self.in_flight = true;
        let result = self.delete_inner(id).await;
        self.in_flight = false;
        result
    }

    async fn delete_inner(&mut self, id: i32) -> Result<(), ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthorized("Please log in".to_string()));
        }

        match self.api.delete_product(id).await {
            Ok(_) => {
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// After a successful mutation the list is re-fetched and the screen
    /// returns to browsing. A failed re-fetch keeps the stale cache; the
    /// mutation itself already succeeded.
    async fn reload_after_mutation(&mut self) {
        if let Ok(products) = self.api.list_products().await {
            self.products = products;
        }
        self.state = SessionState::Browsing;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    fn session_for(server: &MockServer) -> Session {
        let api = ApiClient::with_timeout(server.uri(), Duration::from_secs(5)).unwrap();
        Session::new(api)
    }

    fn user_json(role: &str) -> serde_json::Value {
        json!({ "id": 1, "username": "alice", "email": null, "role": role })
    }

    fn product_json(id: i32, name: &str, price: &str, stock: i32) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": null,
            "price": price,
            "stock": stock,
            "category": null,
            "location": null,
            "image": null,
            "status": "Active",
            "brand": null,
            "sizes": null,
            "productCode": null,
            "orderName": null,
            "storeAvailability": [],
            "lastUpdate": "2026-01-05T12:00:00Z",
        })
    }

    async fn mount_login(server: &MockServer, role: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "t0k3n",
                "user": user_json(role),
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn login_success_enters_browsing() {
        let server = MockServer::start().await;
        mount_login(&server, "user").await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();

        assert_eq!(session.state(), SessionState::Browsing);
        assert_eq!(session.user().unwrap().username, "alice");
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn login_failure_returns_to_logged_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Invalid username or password" })),
            )
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        let err = session.login("alice", "wrong-pass").await.unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert!(session.last_error().is_some());
    }

    #[tokio::test]
    async fn login_validation_fails_before_any_network_call() {
        // No mocks mounted: a request would return 404 and a different error.
        let server = MockServer::start().await;

        let mut session = session_for(&server);
        let err = session.login("", "secret1").await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_surfaces_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({ "message": "Username already exists" })),
            )
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        let err = session
            .register("alice", "secret1", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Conflict(_)));
        assert_eq!(session.state(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn refresh_caches_products_and_sends_bearer_token() {
        let server = MockServer::start().await;
        mount_login(&server, "user").await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(header("Authorization", "Bearer t0k3n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                product_json(2, "Newest", "12.00", 3),
                product_json(1, "Widget", "9.99", 0),
            ])))
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();
        session.refresh_products().await.unwrap();

        let products = session.products();
        assert_eq!(products.len(), 2);
        // Server ordering (last_update desc) is preserved as-is.
        assert_eq!(products[0].name, "Newest");
        assert_eq!(products[1].price.to_string(), "9.99");
        assert_eq!(products[1].stock, 0);
    }

    #[tokio::test]
    async fn unauthorized_response_forces_logout() {
        let server = MockServer::start().await;
        mount_login(&server, "user").await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "Authentication required" })),
            )
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();

        let err = session.refresh_products().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert!(session.user().is_none());
        assert!(session.products().is_empty());
    }

    #[tokio::test]
    async fn editor_is_admin_gated() {
        let server = MockServer::start().await;
        mount_login(&server, "user").await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();

        let err = session.open_editor().unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));
        assert_eq!(session.state(), SessionState::Browsing);
    }

    #[tokio::test]
    async fn admin_creates_product_and_returns_to_browsing() {
        let server = MockServer::start().await;
        mount_login(&server, "admin").await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "success": true, "id": 5 })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([product_json(5, "Widget", "9.99", 0)])),
            )
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();
        session.open_editor().unwrap();
        assert_eq!(session.state(), SessionState::Editing);

        let form = ProductForm {
            name: "Widget".to_string(),
            price: "9.99".to_string(),
            ..Default::default()
        };
        let id = session.create_product(&form).await.unwrap();

        assert_eq!(id, 5);
        assert_eq!(session.state(), SessionState::Browsing);
        assert_eq!(session.products().len(), 1);
        assert_eq!(session.products()[0].price.to_string(), "9.99");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_server() {
        let server = MockServer::start().await;
        mount_login(&server, "admin").await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();

        let form = ProductForm {
            name: "Widget".to_string(),
            price: "-1".to_string(),
            ..Default::default()
        };
        let err = session.create_product(&form).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        // Only the login call went out.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_missing_product_surfaces_not_found() {
        let server = MockServer::start().await;
        mount_login(&server, "admin").await;
        Mock::given(method("DELETE"))
            .and(path("/products/9"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "message": "Product not found" })),
            )
            .mount(&server)
            .await;

        let mut session = session_for(&server);
        session.login("alice", "secret1").await.unwrap();

        let err = session.delete_product(9).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
        // NotFound is not a session-ending condition.
        assert_eq!(session.state(), SessionState::Browsing);
    }

    #[tokio::test]
    async fn slow_server_surfaces_timeout_after_a_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(json!({ "token": "t", "user": user_json("user") })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::with_timeout(server.uri(), Duration::from_millis(100)).unwrap();
        let mut session = Session::new(api);

        let err = session.login("alice", "secret1").await.unwrap_err();
        assert_eq!(err, ClientError::Timeout);
        assert_eq!(session.state(), SessionState::LoggedOut);
    }
}
