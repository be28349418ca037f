//! # medimate-api
//!
//! The HTTP surface of the MediMate symptom checker.
//!
//! [`api_router`] returns an axum `Router` over an [`ApiContext`]; the
//! `medimate-server` binary wraps it with CORS and serves it. Request bodies
//! are verified before analysis and results are verified before they leave
//! the service.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod router;
pub mod session;

pub use config::ServiceConfig;
pub use context::ApiContext;
pub use error::ApiError;
pub use router::api_router;
pub use session::SessionRegistry;
