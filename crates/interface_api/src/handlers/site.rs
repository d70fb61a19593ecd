//! Public site content handlers
//!
//! Read-only endpoints the marketing site renders from. Every one of
//! them keeps working against an empty store by serving the built-in
//! samples, so a fresh deployment is never a blank page.

use axum::{
    extract::{Path, State},
    Json,
};
use domain_content::{ContentDoc, ContentKind, LandingPage, SiteSettings};

use crate::{error::ApiError, AppState};

/// Published service offerings in display order
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentDoc>>, ApiError> {
    Ok(Json(state.content.published(ContentKind::Service).await?))
}

/// Published pricing plans in display order
pub async fn list_pricing(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentDoc>>, ApiError> {
    Ok(Json(
        state.content.published(ContentKind::PricingPlan).await?,
    ))
}

/// Published portfolio projects in display order
pub async fn list_portfolio(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentDoc>>, ApiError> {
    Ok(Json(
        state
            .content
            .published(ContentKind::PortfolioProject)
            .await?,
    ))
}

/// Published testimonials in display order
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentDoc>>, ApiError> {
    Ok(Json(
        state.content.published(ContentKind::Testimonial).await?,
    ))
}

/// The site settings singleton
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>, ApiError> {
    Ok(Json(state.content.site_settings().await?))
}

/// A published landing page by slug
pub async fn get_landing_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LandingPage>, ApiError> {
    Ok(Json(state.content.landing_page(&slug).await?))
}
