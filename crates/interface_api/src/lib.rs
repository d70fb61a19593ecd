//! HTTP API Layer
//!
//! This crate provides the public content API and the admin back office
//! for the agency, using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for billing, clients, content, and sessions
//! - **Middleware**: Session authentication, rate limiting, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses; rejected drafts keep their figures
//!
//! Public reads live under `/api/v1/content`; everything under
//! `/api/v1/admin` requires a session cookie for an allow-listed
//! e-mail and sits behind a per-identity rate limit.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{config::ApiConfig, create_router};
//! use infra_store::MemoryStore;
//! use std::sync::Arc;
//!
//! let app = create_router(Arc::new(MemoryStore::new()), ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use domain_billing::BillingService;
use domain_client::ClientService;
use domain_content::ContentService;
use infra_store::MemoryStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{catalog, clients, content, health, invoices, quotes, session, site};
use crate::middleware::{audit_middleware, rate_limit_middleware, require_admin};
use crate::rate_limit::{FixedWindowStore, RateLimitStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub billing: Arc<BillingService>,
    pub clients: Arc<ClientService>,
    pub content: Arc<ContentService>,
    pub limiter: Arc<dyn RateLimitStore>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// Wires the domain services over the store, then hangs the public
/// content routes, the session exchange, and the protected admin
/// surface off one versioned prefix.
pub fn create_router(store: Arc<MemoryStore>, config: ApiConfig) -> Router {
    let billing = Arc::new(
        BillingService::new(store.clone()).with_numbering(config.numbering_mode()),
    );
    let clients_service = Arc::new(ClientService::new(store.clone()));
    let content_service = Arc::new(ContentService::new(store.clone()));
    let limiter: Arc<dyn RateLimitStore> = Arc::new(FixedWindowStore::new(
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    let state = AppState {
        store,
        billing,
        clients: clients_service,
        content: content_service,
        limiter,
        config,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Public site content
    let site_routes = Router::new()
        .route("/services", get(site::list_services))
        .route("/pricing", get(site::list_pricing))
        .route("/portfolio", get(site::list_portfolio))
        .route("/testimonials", get(site::list_testimonials))
        .route("/settings", get(site::get_settings))
        .route("/pages/:slug", get(site::get_landing_page));

    // Session exchange; throttled, but reachable without a session
    let session_routes = Router::new()
        .route("/session", post(session::start_session))
        .route("/session", get(session::current_session))
        .route("/session", delete(session::end_session))
        .layer(axum_middleware::from_fn_with_state(state.clone(), rate_limit_middleware));

    // Quote routes
    let quote_routes = Router::new()
        .route("/", post(quotes::create_quote))
        .route("/", get(quotes::list_quotes))
        .route("/preview", post(quotes::preview_quote))
        .route("/:id", get(quotes::get_quote))
        .route("/:id", put(quotes::update_quote))
        .route("/:id", delete(quotes::delete_quote))
        .route("/:id/send", post(quotes::send_quote))
        .route("/:id/accept", post(quotes::accept_quote))
        .route("/:id/decline", post(quotes::decline_quote))
        .route("/:id/convert", post(quotes::convert_quote));

    // Invoice routes
    let invoice_routes = Router::new()
        .route("/", post(invoices::create_invoice))
        .route("/", get(invoices::list_invoices))
        .route("/preview", post(invoices::preview_invoice))
        .route("/:id", get(invoices::get_invoice))
        .route("/:id", put(invoices::update_invoice))
        .route("/:id", delete(invoices::delete_invoice))
        .route("/:id/send", post(invoices::send_invoice))
        .route("/:id/pay", post(invoices::pay_invoice))
        .route("/:id/cancel", post(invoices::cancel_invoice));

    // Catalog routes
    let catalog_routes = Router::new()
        .route("/", post(catalog::create_item))
        .route("/", get(catalog::list_items))
        .route("/:id", get(catalog::get_item))
        .route("/:id", put(catalog::update_item))
        .route("/:id", delete(catalog::delete_item))
        .route("/:id/line-item", get(catalog::prefill_line_item));

    // Client routes
    let client_routes = Router::new()
        .route("/", post(clients::create_client))
        .route("/", get(clients::list_clients))
        .route("/:id", get(clients::get_client))
        .route("/:id", put(clients::update_client))
        .route("/:id", delete(clients::delete_client));

    // Admin content routes
    let content_routes = Router::new()
        .route("/:kind", get(content::list_documents))
        .route("/:kind", post(content::create_document))
        .route("/:kind/:id", get(content::get_document))
        .route("/:kind/:id", patch(content::patch_document))
        .route("/:kind/:id", delete(content::delete_document));

    // Protected admin routes; layers run outermost-last, so requests
    // pass the rate limit, then the session check, then audit logging
    let admin_routes = Router::new()
        .nest("/quotes", quote_routes)
        .nest("/invoices", invoice_routes)
        .nest("/catalog", catalog_routes)
        .nest("/clients", client_routes)
        .nest("/content", content_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_admin))
        .layer(axum_middleware::from_fn_with_state(state.clone(), rate_limit_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest(
            "/api/v1",
            Router::new()
                .nest("/content", site_routes)
                .nest("/auth", session_routes)
                .nest("/admin", admin_routes),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
