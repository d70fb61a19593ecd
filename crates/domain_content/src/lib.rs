//! Content Domain - Site Content Behind a Headless Store
//!
//! Everything the public site renders comes out of a headless content
//! store: service offerings, pricing plans, portfolio projects,
//! testimonials, the site-settings singleton, and two white-label
//! landing pages. The store itself stays behind the [`ContentPort`]
//! trait; this crate owns the document schema and the read/write rules
//! around it.
//!
//! # Sample Content
//!
//! A fresh deployment ships with built-in sample records so the site
//! never renders empty. They are served whenever the store holds
//! nothing of a kind and vanish the moment real content of that kind
//! exists. Sample records carry [`DocId::Sample`] identities and are
//! read-only: edits and deletes aimed at them are rejected before any
//! store call.
//!
//! # Tax Defaults
//!
//! The site-settings document carries the default tax policy for new
//! billing documents. Those defaults are copied into each new draft at
//! creation time, never linked live, so editing them later leaves
//! existing quotes and invoices untouched.

pub mod documents;
pub mod error;
pub mod ports;
pub mod sample;
pub mod services;

pub use documents::{
    ContentDoc, ContentKind, DefaultTaxSettings, LandingPage, PageSection, PortfolioProject,
    PricingPlan, ServiceOffering, SiteSettings, Testimonial,
};
pub use error::ContentError;
pub use ports::{apply_merge_patch, ContentPort, ContentQuery};
pub use sample::{find_sample, sample_docs};
pub use services::ContentService;

pub use core_kernel::{DocId, DocumentId};
