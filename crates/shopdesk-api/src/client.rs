//! The request gateway

use crate::error::{status_message, ApiError, ApiResult};
use crate::payload::{Method, Payload};
use crate::session::{self, Session, SessionStore, TOKEN_KEY, USER_KEY};
use crate::transport::{Body, OutgoingRequest, ReqwestTransport, Transport, TransportResponse};
use serde::Serialize;
use serde_json::Value;
use shopdesk_core::Credentials;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Backend paths used by the gateway and catalog wrappers.
pub mod endpoints {
    pub const LOGIN: &str = "/api/user/login";
    pub const REGISTER: &str = "/api/user/register";
    pub const USER_INFO: &str = "/api/user/getUserInfo";

    pub const CATEGORY_CREATE: &str = "/api/category/create";
    pub const CATEGORY_DELETE: &str = "/api/category/deleteCategory";
    pub const CATEGORY_UPDATE: &str = "/api/category/updateCategory";
    pub const CATEGORY_LIST: &str = "/api/category/getAllCategories";

    pub const PRODUCT_CREATE: &str = "/api/product/create";
    pub const PRODUCT_DELETE: &str = "/api/product/deleteProduct";
    pub const PRODUCT_LIST: &str = "/api/product/getAllProducts";
    pub const PRODUCT_GET: &str = "/api/product/getProductById";
    pub const PRODUCT_UPDATE: &str = "/api/product/updateProduct";
}

pub struct ApiClient {
    base_url: Option<String>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Client over HTTP. A `None` base URL is accepted; every request then
    /// fails with a transport error instead of failing here.
    pub fn new(base_url: Option<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            base_url,
            transport: Arc::new(ReqwestTransport::new()),
            store,
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Send one request and return the decoded JSON body of a 2xx response.
    ///
    /// The bearer token is read from the store at call time. JSON mappings
    /// get `Content-Type: application/json`; multipart forms get no explicit
    /// content type. GET sends the payload as query parameters, every other
    /// method as the body. Transport failures and non-2xx responses are
    /// logged and returned as [`ApiError`].
    pub async fn request(
        &self,
        endpoint: &str,
        payload: impl Into<Payload>,
        method: Method,
    ) -> ApiResult<Value> {
        let outgoing = self.build_request(endpoint, payload.into(), method)?;
        let url = outgoing.url.clone();

        let response = match self.transport.send(outgoing).await {
            Ok(r) => r,
            Err(e) => {
                error!("API Error: {} {}: {}", method, url, e);
                return Err(ApiError::transport(e.0));
            }
        };

        if response.is_success() {
            debug!("{} {} -> {}", method, url, response.status);
            return Ok(decode_body(&response));
        }

        let body = serde_json::from_slice::<Value>(&response.body).ok();
        match &body {
            Some(server) => error!("API Error: {} {}: {}", method, url, server),
            None => error!("API Error: {} {}: {}", method, url, status_message(response.status)),
        }
        Err(ApiError::from_status(response.status, body))
    }

    fn build_request(
        &self,
        endpoint: &str,
        payload: Payload,
        method: Method,
    ) -> ApiResult<OutgoingRequest> {
        if endpoint.trim().is_empty() {
            return Err(ApiError::invalid_request("endpoint must not be empty"));
        }
        let base = self.base_url.as_deref().ok_or_else(|| {
            error!("API Error: base URL is not configured");
            ApiError::transport("base URL is not configured")
        })?;

        let mut headers = Vec::new();
        if let Some(token) = session::read_token(self.store.as_ref()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if !payload.is_multipart() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let (query, body) = if method == Method::Get {
            (payload.query_pairs(), Body::Empty)
        } else {
            let body = match payload {
                Payload::Json(map) => Body::Json(Value::Object(map)),
                Payload::Multipart(form) => Body::Multipart(form),
            };
            (Vec::new(), body)
        };

        Ok(OutgoingRequest {
            method,
            url: join_url(base, endpoint),
            headers,
            query,
            body,
        })
    }

    /// Log in and persist the returned session.
    ///
    /// A string `token` in the response is stored, and a `user` alongside it
    /// is stored as JSON; a token without a user drops any previously stored
    /// user. Without a token the store is left untouched. The
    /// raw response is returned either way; deciding success is up to the
    /// caller.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Value> {
        let data = self
            .request(endpoints::LOGIN, Payload::json(credentials)?, Method::Post)
            .await?;

        if let Some(token) = data.get("token").and_then(Value::as_str).filter(|t| !t.is_empty()) {
            self.store.set(TOKEN_KEY, token)?;
            match data.get("user").filter(|u| !u.is_null()) {
                Some(user) => self.store.set(USER_KEY, &user.to_string())?,
                // a stale profile must not outlive the token it came with
                None => self.store.remove(USER_KEY)?,
            }
            info!("Session started for {}", credentials.email);
        }
        Ok(data)
    }

    /// Register an account. No session side effect.
    pub async fn register<T: Serialize + ?Sized>(&self, registration: &T) -> ApiResult<Value> {
        self.request(endpoints::REGISTER, Payload::json(registration)?, Method::Post)
            .await
    }

    /// Drop the stored token and user. Purely local; no request is made and
    /// navigation is left to the caller.
    pub fn clear_session(&self) -> ApiResult<()> {
        self.store.clear()?;
        Ok(())
    }

    /// [`ApiClient::clear_session`] with an info log line.
    pub fn logout(&self) -> ApiResult<()> {
        let had_session = self.current_token().is_some();
        self.clear_session()?;
        if had_session {
            info!("Session cleared");
        }
        Ok(())
    }

    pub fn current_token(&self) -> Option<String> {
        session::read_token(self.store.as_ref())
    }

    /// Stored user; `None` when absent or malformed.
    pub fn current_user(&self) -> Option<Value> {
        session::read_user(self.store.as_ref())
    }

    pub fn session(&self) -> Session {
        Session::load(self.store.as_ref())
    }
}

/// `base` and `endpoint` joined with exactly one slash.
fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// 2xx body: JSON when it parses, `null` when empty, raw text otherwise.
fn decode_body(response: &TransportResponse) -> Value {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(&response.body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&response.body).into_owned()))
}
