//! Shopdesk API - Request gateway for the catalog backend
//!
//! [`ApiClient`] is the single entry point for backend calls. It attaches the
//! stored bearer token, normalizes every failure into [`ApiError`] and owns
//! the login/register/logout lifecycle.

pub mod catalog;
pub mod client;
pub mod error;
pub mod payload;
pub mod response;
pub mod session;
pub mod transport;

pub use client::{endpoints, ApiClient};
pub use error::{ApiError, ApiResult, StoreError};
pub use payload::{Method, Payload};
pub use response::*;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, TOKEN_KEY, USER_KEY};
pub use shopdesk_core::{FormData, FormField, ImageFile};
pub use transport::{Body, OutgoingRequest, ReqwestTransport, Transport, TransportError, TransportResponse};
