//! Content document types
//!
//! Typed views of the records the headless CMS stores: everything the
//! public site renders and the admin area edits. The store itself is a
//! collaborator behind [`crate::ports::ContentPort`]; these types give
//! the rest of the system a schema to hold it to.
//!
//! Every document carries a [`DocId`], which distinguishes records
//! that live in the store from the built-in sample records served
//! while the store is still empty.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::DocId;

/// The kinds of document the CMS holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Service,
    PricingPlan,
    PortfolioProject,
    Testimonial,
    SiteSettings,
    LandingPage,
}

impl ContentKind {
    /// Every kind, in the order the admin navigation lists them
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Service,
        ContentKind::PricingPlan,
        ContentKind::PortfolioProject,
        ContentKind::Testimonial,
        ContentKind::SiteSettings,
        ContentKind::LandingPage,
    ];
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentKind::Service => "service",
            ContentKind::PricingPlan => "pricing-plan",
            ContentKind::PortfolioProject => "portfolio-project",
            ContentKind::Testimonial => "testimonial",
            ContentKind::SiteSettings => "site-settings",
            ContentKind::LandingPage => "landing-page",
        };
        f.write_str(label)
    }
}

/// A service the agency offers, shown on the services page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    /// Record identity
    pub id: DocId,
    /// URL fragment, unique per kind
    pub slug: String,
    /// Heading shown in listings
    pub title: String,
    /// One-paragraph pitch
    pub summary: String,
    /// Optional long-form detail
    #[serde(default)]
    pub body: Option<String>,
    /// Icon name from the site's icon set
    #[serde(default)]
    pub icon: Option<String>,
    /// Sort position in listings, ascending
    #[serde(default)]
    pub display_order: i32,
    /// Hidden from the public site until set
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A package on the pricing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Record identity
    pub id: DocId,
    /// URL fragment, unique per kind
    pub slug: String,
    /// Plan name
    pub name: String,
    /// Headline price in dollars
    pub price: Decimal,
    /// Cadence label shown beside the price ("per month", "one-time")
    #[serde(default)]
    pub price_note: Option<String>,
    /// Bullet points, in display order
    #[serde(default)]
    pub features: Vec<String>,
    /// Visually emphasized in the plan grid
    #[serde(default)]
    pub highlighted: bool,
    /// Sort position in listings, ascending
    #[serde(default)]
    pub display_order: i32,
    /// Hidden from the public site until set
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A delivered project on the portfolio page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProject {
    /// Record identity
    pub id: DocId,
    /// URL fragment, unique per kind
    pub slug: String,
    /// Project title
    pub title: String,
    /// Client the work was delivered for, if it may be named
    #[serde(default)]
    pub client_name: Option<String>,
    /// One-paragraph description
    pub summary: String,
    /// Service tags ("web", "branding", ...)
    #[serde(default)]
    pub services: Vec<String>,
    /// Cover image in the asset store
    #[serde(default)]
    pub image_url: Option<String>,
    /// Sort position in listings, ascending
    #[serde(default)]
    pub display_order: i32,
    /// Hidden from the public site until set
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A client quote shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Record identity
    pub id: DocId,
    /// Person being quoted
    pub author: String,
    /// Their company, if it may be named
    #[serde(default)]
    pub company: Option<String>,
    /// The quote itself
    pub body: String,
    /// Sort position in listings, ascending
    #[serde(default)]
    pub display_order: i32,
    /// Hidden from the public site until set
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The default tax policy new billing documents start from.
///
/// Stored with the site settings and copied into each new quote or
/// invoice draft; edits here never touch existing documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultTaxSettings {
    /// Whether new documents start with tax enabled
    pub tax_enabled: bool,
    /// Default rate, percent
    pub tax_rate_percent: Decimal,
    /// Whether the data-processing carve-out starts enabled
    pub data_processing_exemption: bool,
}

impl Default for DefaultTaxSettings {
    fn default() -> Self {
        Self {
            tax_enabled: false,
            tax_rate_percent: Decimal::ZERO,
            data_processing_exemption: false,
        }
    }
}

/// Site-wide settings, a singleton document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Record identity
    pub id: DocId,
    /// Site title used in page metadata
    pub site_title: String,
    /// Strapline under the logo
    #[serde(default)]
    pub tagline: Option<String>,
    /// Public contact e-mail
    pub contact_email: String,
    /// Public phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Office address shown in the footer
    #[serde(default)]
    pub address: Option<String>,
    /// Tax defaults copied into new billing documents
    #[serde(default)]
    pub default_tax: DefaultTaxSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A section of a landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    /// Section heading
    pub heading: String,
    /// Section copy
    pub body: String,
}

/// A white-label landing page for a partner brand.
///
/// These pages render under the partner's name with the agency's own
/// branding scrubbed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPage {
    /// Record identity
    pub id: DocId,
    /// URL fragment, unique per kind
    pub slug: String,
    /// Partner brand the page renders under
    pub brand_name: String,
    /// Partner logo in the asset store
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Hero heading
    pub hero_heading: String,
    /// Hero supporting copy
    #[serde(default)]
    pub hero_subheading: Option<String>,
    /// Body sections, in order
    #[serde(default)]
    pub sections: Vec<PageSection>,
    /// Contact e-mail shown on the page
    pub contact_email: String,
    /// Hidden until set
    #[serde(default)]
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Any content document, tagged by kind.
///
/// This is the unit the content port stores and returns; handlers and
/// templates match it back out into the typed variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentDoc {
    Service(ServiceOffering),
    PricingPlan(PricingPlan),
    PortfolioProject(PortfolioProject),
    Testimonial(Testimonial),
    SiteSettings(SiteSettings),
    LandingPage(LandingPage),
}

impl ContentDoc {
    /// The document's identity
    pub fn id(&self) -> &DocId {
        match self {
            ContentDoc::Service(doc) => &doc.id,
            ContentDoc::PricingPlan(doc) => &doc.id,
            ContentDoc::PortfolioProject(doc) => &doc.id,
            ContentDoc::Testimonial(doc) => &doc.id,
            ContentDoc::SiteSettings(doc) => &doc.id,
            ContentDoc::LandingPage(doc) => &doc.id,
        }
    }

    /// The document's kind tag
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentDoc::Service(_) => ContentKind::Service,
            ContentDoc::PricingPlan(_) => ContentKind::PricingPlan,
            ContentDoc::PortfolioProject(_) => ContentKind::PortfolioProject,
            ContentDoc::Testimonial(_) => ContentKind::Testimonial,
            ContentDoc::SiteSettings(_) => ContentKind::SiteSettings,
            ContentDoc::LandingPage(_) => ContentKind::LandingPage,
        }
    }

    /// The URL slug, for kinds that have one
    pub fn slug(&self) -> Option<&str> {
        match self {
            ContentDoc::Service(doc) => Some(&doc.slug),
            ContentDoc::PricingPlan(doc) => Some(&doc.slug),
            ContentDoc::PortfolioProject(doc) => Some(&doc.slug),
            ContentDoc::LandingPage(doc) => Some(&doc.slug),
            ContentDoc::Testimonial(_) | ContentDoc::SiteSettings(_) => None,
        }
    }

    /// Whether the public site may render this document.
    ///
    /// Site settings are always live; everything else carries an
    /// explicit flag.
    pub fn is_published(&self) -> bool {
        match self {
            ContentDoc::Service(doc) => doc.published,
            ContentDoc::PricingPlan(doc) => doc.published,
            ContentDoc::PortfolioProject(doc) => doc.published,
            ContentDoc::Testimonial(doc) => doc.published,
            ContentDoc::SiteSettings(_) => true,
            ContentDoc::LandingPage(doc) => doc.published,
        }
    }

    /// Sort position within the kind; kinds without an order sort flat
    pub fn display_order(&self) -> i32 {
        match self {
            ContentDoc::Service(doc) => doc.display_order,
            ContentDoc::PricingPlan(doc) => doc.display_order,
            ContentDoc::PortfolioProject(doc) => doc.display_order,
            ContentDoc::Testimonial(doc) => doc.display_order,
            ContentDoc::SiteSettings(_) | ContentDoc::LandingPage(_) => 0,
        }
    }

    /// True for built-in sample records
    pub fn is_sample(&self) -> bool {
        self.id().is_sample()
    }

    /// Creation timestamp, the tiebreaker within a display order
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            ContentDoc::Service(doc) => doc.created_at,
            ContentDoc::PricingPlan(doc) => doc.created_at,
            ContentDoc::PortfolioProject(doc) => doc.created_at,
            ContentDoc::Testimonial(doc) => doc.created_at,
            ContentDoc::SiteSettings(doc) => doc.created_at,
            ContentDoc::LandingPage(doc) => doc.created_at,
        }
    }

    /// Restamps the write timestamp; stores call this on every write.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        match self {
            ContentDoc::Service(doc) => doc.updated_at = at,
            ContentDoc::PricingPlan(doc) => doc.updated_at = at,
            ContentDoc::PortfolioProject(doc) => doc.updated_at = at,
            ContentDoc::Testimonial(doc) => doc.updated_at = at,
            ContentDoc::SiteSettings(doc) => doc.updated_at = at,
            ContentDoc::LandingPage(doc) => doc.updated_at = at,
        }
    }

    /// Returns every problem that blocks saving; empty means saveable.
    pub fn validation_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut require = |value: &str, what: &str| {
            if value.trim().is_empty() {
                issues.push(format!("{what} is required"));
            }
        };
        match self {
            ContentDoc::Service(doc) => {
                require(&doc.slug, "a slug");
                require(&doc.title, "a title");
            }
            ContentDoc::PricingPlan(doc) => {
                require(&doc.slug, "a slug");
                require(&doc.name, "a plan name");
                if doc.price < Decimal::ZERO {
                    issues.push("the price cannot be negative".to_string());
                }
            }
            ContentDoc::PortfolioProject(doc) => {
                require(&doc.slug, "a slug");
                require(&doc.title, "a title");
            }
            ContentDoc::Testimonial(doc) => {
                require(&doc.author, "an author");
                require(&doc.body, "the quote text");
            }
            ContentDoc::SiteSettings(doc) => {
                require(&doc.site_title, "a site title");
                require(&doc.contact_email, "a contact e-mail");
            }
            ContentDoc::LandingPage(doc) => {
                require(&doc.slug, "a slug");
                require(&doc.brand_name, "a brand name");
                require(&doc.contact_email, "a contact e-mail");
            }
        }
        issues
    }
}
