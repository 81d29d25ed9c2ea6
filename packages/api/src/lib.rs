//! # API crate - session, cache and REST client for the Lingzhi app
//!
//! Everything the Lingzhi frontends need to talk to the points-economy
//! backend lives here, UI-framework-free and unit-testable without a network.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | Typed REST client over the [`client::ApiTransport`] seam; attaches the bearer token, decodes responses, maps failures |
//! | [`session`] | Session lifecycle manager: freshness window, silent revalidation, 401-only destruction |
//! | [`cache`] | Short-TTL in-memory request cache with lazy expiry |
//! | [`retry`] | Bounded exponential backoff policy |
//! | [`models`] | Response models decoded at the client boundary |
//! | [`config`] | The timing constants (cache TTL, freshness window, retry) as explicit configuration |
//! | [`error`] | The client-perceived failure taxonomy |
//!
//! The crate deliberately exposes the 401 asymmetry in types: only
//! [`ApiError::Unauthorized`] may destroy a session, and only
//! [`SessionManager`] is allowed to do it.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod retry;
pub mod session;
mod time;

pub use cache::{cache_key, RequestCache};
pub use client::{ApiClient, ApiTransport, HttpTransport};
pub use config::{ClientConfig, RetryConfig};
pub use error::ApiError;
pub use models::{
    CheckinResult, CheckinStatus, KnowledgeArticle, LoginSuccess, Merchant, NewsItem, Paged,
    Project, RechargeTier, Resource, UserProfile,
};
pub use retry::RetryPolicy;
pub use session::{
    SessionManager, SessionPhase, SessionSnapshot, KEY_TOKEN, KEY_TOKEN_CACHED_AT, KEY_USER,
};
pub use time::now_ms;
