//! # REST client for the Lingzhi backend
//!
//! [`ApiClient`] wraps every backend call the app makes: it attaches the
//! bearer token, decodes responses into the typed models, reads a couple of
//! endpoints through the [`RequestCache`], and maps HTTP failures onto the
//! [`ApiError`] taxonomy.
//!
//! The wire layer sits behind the [`ApiTransport`] trait; production code
//! uses [`HttpTransport`] (reqwest, native and wasm), tests use a scripted
//! mock. The client itself is a cheap `Arc` handle: clones share one token,
//! one cache, and one transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{cache_key, RequestCache};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{
    CheckinResult, CheckinStatus, KnowledgeArticle, LoginSuccess, Merchant, NewsItem, Paged,
    Project, RechargeTier, Resource, UserProfile,
};

const LOGIN: &str = "/api/auth/login";
const USER_ME: &str = "/api/user/me";
const REQUIRE_COMPLETE: &str = "/api/user/require-complete";
const CHECKIN_STATUS: &str = "/api/checkin/status";
const CHECKIN: &str = "/api/checkin";
const RESOURCES: &str = "/api/resources";
const PROJECTS: &str = "/api/projects";
const MERCHANTS: &str = "/api/merchants";
const NEWS: &str = "/api/news";
const KNOWLEDGE: &str = "/api/knowledge";
const RECHARGE_TIERS: &str = "/api/recharge/tiers";

/// Timeout applied to the resources listing fetch, the one call site with
/// explicit cancellation.
const LISTING_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP method of an [`ApiRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One outgoing request, fully described so transports stay dumb.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
    /// Honored on native targets; on wasm the browser's fetch governs.
    pub timeout: Option<Duration>,
}

/// Status and parsed body of a completed exchange. Non-2xx statuses are
/// returned here, not as errors; the client maps them.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// The wire seam. Implementations only fail for connection-level problems
/// (unreachable, timeout); any response with a status is a success here.
#[allow(async_fn_in_trait)]
pub trait ApiTransport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Production transport over [`reqwest`].
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ApiTransport for HttpTransport {
    async fn send(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = match req.method {
            Method::Get => self.http.get(&req.url),
            Method::Post => self.http.post(&req.url),
        };
        if !req.params.is_empty() {
            builder = builder.query(&req.params);
        }
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Transient("request timed out".to_string())
            } else {
                ApiError::Transient(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(Value::Null);
        Ok(ApiResponse { status, body })
    }
}

struct ClientInner<T> {
    base_url: String,
    cache_ttl: Duration,
    token: Mutex<Option<String>>,
    cache: RequestCache,
    transport: T,
}

/// Typed client for the Lingzhi REST backend.
pub struct ApiClient<T: ApiTransport = HttpTransport> {
    inner: Arc<ClientInner<T>>,
}

impl<T: ApiTransport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ApiClient<HttpTransport> {
    /// Client over the production HTTP transport.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: ApiTransport> ApiClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: config.base_url.clone(),
                cache_ttl: Duration::from_secs(config.cache_ttl_secs),
                token: Mutex::new(None),
                cache: RequestCache::new(),
                transport,
            }),
        }
    }

    /// Set the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: &str) {
        *self.inner.token.lock().unwrap() = Some(token.to_string());
    }

    /// Drop the bearer token and every cached response.
    pub fn clear_token(&self) {
        *self.inner.token.lock().unwrap() = None;
        self.inner.cache.clear();
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token.lock().unwrap().clone()
    }

    // ------------------------------------------------------------------
    // Auth surface (consumed by the session manager)
    // ------------------------------------------------------------------

    /// Exchange credentials for a token and profile. Does not attach a
    /// bearer; the caller decides whether to adopt the returned token.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginSuccess, ApiError> {
        let body = serde_json::json!({ "username": identifier, "password": secret });
        let value = self
            .send(Method::Post, LOGIN, &[], Some(body), None, true)
            .await?;
        decode(value)
    }

    /// Validate the current token against the backend.
    ///
    /// With `silent = true` this is a background revalidation: failures are
    /// logged at debug level only, and the caller (the session manager) is
    /// the one that decides whether a 401 destroys the session.
    pub async fn verify_token(&self, silent: bool) -> Result<UserProfile, ApiError> {
        let result = self.get(USER_ME).await.and_then(decode);
        if let Err(err) = &result {
            if silent {
                tracing::debug!("silent token verification failed: {err}");
            } else {
                tracing::warn!("token verification failed: {err}");
            }
        }
        result
    }

    /// Whether the profile still needs mandatory fields filled in.
    pub async fn check_require_complete(&self) -> Result<bool, ApiError> {
        #[derive(serde::Deserialize)]
        struct RequireComplete {
            #[serde(default)]
            require_complete: bool,
        }
        let value = self.get(REQUIRE_COMPLETE).await?;
        decode::<RequireComplete>(value).map(|r| r.require_complete)
    }

    // ------------------------------------------------------------------
    // Check-in
    // ------------------------------------------------------------------

    /// Today's check-in state, read through the short-TTL cache.
    pub async fn checkin_status(&self) -> Result<CheckinStatus, ApiError> {
        let key = cache_key(Method::Get.as_str(), CHECKIN_STATUS, &[]);
        if let Some(hit) = self.inner.cache.get(&key) {
            return decode(hit);
        }
        let value = self.get(CHECKIN_STATUS).await?;
        self.inner.cache.set(&key, value.clone(), self.inner.cache_ttl);
        decode(value)
    }

    /// Complete today's check-in. Invalidates cached check-in reads so the
    /// next status fetch sees the new streak.
    pub async fn complete_checkin(&self) -> Result<CheckinResult, ApiError> {
        let value = self
            .send(Method::Post, CHECKIN, &[], None, None, false)
            .await?;
        self.inner.cache.clear_matching("/checkin");
        decode(value)
    }

    // ------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------

    /// Resource marketplace page. The one listing with an explicit timeout.
    pub async fn resources(&self, page: u32) -> Result<Paged<Resource>, ApiError> {
        let params = page_params(page);
        let value = self
            .send(Method::Get, RESOURCES, &params, None, Some(LISTING_TIMEOUT), false)
            .await?;
        decode(value)
    }

    pub async fn projects(&self, page: u32) -> Result<Paged<Project>, ApiError> {
        let value = self
            .send(Method::Get, PROJECTS, &page_params(page), None, None, false)
            .await?;
        decode(value)
    }

    pub async fn merchants(&self) -> Result<Paged<Merchant>, ApiError> {
        self.get(MERCHANTS).await.and_then(decode)
    }

    pub async fn news(&self, page: u32) -> Result<Paged<NewsItem>, ApiError> {
        let value = self
            .send(Method::Get, NEWS, &page_params(page), None, None, false)
            .await?;
        decode(value)
    }

    pub async fn knowledge(&self, page: u32) -> Result<Paged<KnowledgeArticle>, ApiError> {
        let value = self
            .send(Method::Get, KNOWLEDGE, &page_params(page), None, None, false)
            .await?;
        decode(value)
    }

    pub async fn recharge_tiers(&self) -> Result<Vec<RechargeTier>, ApiError> {
        self.get(RECHARGE_TIERS).await.and_then(decode)
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::Get, path, &[], None, None, false).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<Value>,
        timeout: Option<Duration>,
        skip_bearer: bool,
    ) -> Result<Value, ApiError> {
        let req = ApiRequest {
            method,
            url: format!("{}{}", self.inner.base_url, path),
            params: params.to_vec(),
            bearer: if skip_bearer { None } else { self.token() },
            body,
            timeout,
        };
        let resp = self.inner.transport.send(req).await?;
        map_response(resp)
    }
}

fn page_params(page: u32) -> Vec<(String, String)> {
    vec![("page".to_string(), page.to_string())]
}

/// Map a completed exchange onto the error taxonomy.
fn map_response(resp: ApiResponse) -> Result<Value, ApiError> {
    match resp.status {
        200..=299 => Ok(resp.body),
        401 => Err(ApiError::Unauthorized),
        500..=599 => Err(ApiError::Transient(format!(
            "server error ({})",
            resp.status
        ))),
        code => {
            let message = resp
                .body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Err(ApiError::Status { code, message })
        }
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scripted transport: responses are handed out in push order, and every
    /// request is recorded. Clones share the same script and log.
    #[derive(Clone, Default)]
    pub(crate) struct MockTransport {
        responses: Arc<Mutex<VecDeque<Result<ApiResponse, ApiError>>>>,
        requests: Arc<Mutex<Vec<ApiRequest>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_status(&self, status: u16, body: Value) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(ApiResponse { status, body }));
        }

        pub fn push_err(&self, err: ApiError) {
            self.responses.lock().unwrap().push_back(Err(err));
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn request(&self, index: usize) -> ApiRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    impl ApiTransport for MockTransport {
        async fn send(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.lock().unwrap().push(req);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transient("mock: no response queued".to_string())))
        }
    }
}
