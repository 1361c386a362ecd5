//! # Ritmo Offers API
//!
//! HTTP server exposing companies and the financial offers extended to them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ritmo API Routes                                │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌──────────────────────────────────────┐  │
//! │  │  Companies             │  │  Offers                              │  │
//! │  │                        │  │                                      │  │
//! │  │ • GET  /companies/{id} │  │ • GET  /offers/{id}                  │  │
//! │  │ • POST /companies      │  │ • GET  /offers-company/{company_id}  │  │
//! │  │ • PUT  /companies/{id} │  │ • POST /offers                       │  │
//! │  └────────────────────────┘  │ • PUT  /offers/{id}/status           │  │
//! │                              │ • PUT  /offers/{id}/accepted         │  │
//! │  ┌────────────────────────┐  └──────────────────────────────────────┘  │
//! │  │ • GET /health          │                                            │
//! │  └────────────────────────┘                                            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                              │  │
//! │  │   ritmo-store: one Mutex<LocalStorage>, atomic storage.json      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `RITMO_BIND_ADDR` - Interface to bind (default: 0.0.0.0)
//! - `RITMO_PORT` - HTTP port (default: 8080)
//! - `RITMO_STORAGE_PATH` - Storage document (default: storage/storage.json)
//! - `RITMO_CREATE_STORAGE` - Create the document when missing (default: false)
//! - `RITMO_DISPLAY_CURRENCY` - EUR or USD (default: EUR)

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;

use axum::routing::{get, post, put};
use axum::Router;
use ritmo_core::CurrencyProfile;
use ritmo_store::Store;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub currency: CurrencyProfile,
}

impl AppState {
    pub fn new(store: Store, currency: CurrencyProfile) -> Self {
        AppState { store, currency }
    }
}

/// Builds the router with every route and the request tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/companies", post(handlers::companies::create_company))
        .route(
            "/companies/{id}",
            get(handlers::companies::get_company).put(handlers::companies::update_company),
        )
        .route("/offers", post(handlers::offers::create_offer))
        .route("/offers/{id}", get(handlers::offers::get_offer))
        .route(
            "/offers-company/{company_id}",
            get(handlers::offers::get_offer_by_company),
        )
        .route("/offers/{id}/status", put(handlers::offers::update_offer_status))
        .route("/offers/{id}/accepted", put(handlers::offers::update_offer_accepted))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
