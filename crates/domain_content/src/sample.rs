//! Built-in sample content
//!
//! A fresh deployment has an empty content store, and an empty store
//! would render an empty site. These records stand in until real
//! content exists: read paths substitute them whenever the store has
//! nothing for a kind, and they disappear as soon as the first real
//! document of that kind is saved.
//!
//! Sample records never touch the store. They carry [`DocId::Sample`]
//! ids, so a write aimed at one is recognizable before any store call
//! and rejected as read-only.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use core_kernel::DocId;

use crate::documents::{
    ContentDoc, ContentKind, DefaultTaxSettings, LandingPage, PageSection, PortfolioProject,
    PricingPlan, ServiceOffering, SiteSettings, Testimonial,
};

/// Placeholder timestamp for sample records
const SAMPLE_EPOCH: DateTime<Utc> = DateTime::UNIX_EPOCH;

fn service(slug: &str, order: i32, title: &str, summary: &str, icon: &str) -> ContentDoc {
    ContentDoc::Service(ServiceOffering {
        id: DocId::sample(slug),
        slug: slug.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
        body: None,
        icon: Some(icon.to_string()),
        display_order: order,
        published: true,
        created_at: SAMPLE_EPOCH,
        updated_at: SAMPLE_EPOCH,
    })
}

fn plan(
    slug: &str,
    order: i32,
    name: &str,
    price: rust_decimal::Decimal,
    note: &str,
    features: &[&str],
    highlighted: bool,
) -> ContentDoc {
    ContentDoc::PricingPlan(PricingPlan {
        id: DocId::sample(slug),
        slug: slug.to_string(),
        name: name.to_string(),
        price,
        price_note: Some(note.to_string()),
        features: features.iter().map(|feature| feature.to_string()).collect(),
        highlighted,
        display_order: order,
        published: true,
        created_at: SAMPLE_EPOCH,
        updated_at: SAMPLE_EPOCH,
    })
}

fn project(slug: &str, order: i32, title: &str, summary: &str, tags: &[&str]) -> ContentDoc {
    ContentDoc::PortfolioProject(PortfolioProject {
        id: DocId::sample(slug),
        slug: slug.to_string(),
        title: title.to_string(),
        client_name: None,
        summary: summary.to_string(),
        services: tags.iter().map(|tag| tag.to_string()).collect(),
        image_url: None,
        display_order: order,
        published: true,
        created_at: SAMPLE_EPOCH,
        updated_at: SAMPLE_EPOCH,
    })
}

fn testimonial(slug: &str, order: i32, author: &str, company: &str, body: &str) -> ContentDoc {
    ContentDoc::Testimonial(Testimonial {
        id: DocId::sample(slug),
        author: author.to_string(),
        company: Some(company.to_string()),
        body: body.to_string(),
        display_order: order,
        published: true,
        created_at: SAMPLE_EPOCH,
        updated_at: SAMPLE_EPOCH,
    })
}

static SAMPLE_SERVICES: Lazy<Vec<ContentDoc>> = Lazy::new(|| {
    vec![
        service(
            "sample-web-design",
            1,
            "Web Design & Development",
            "Custom marketing sites and web apps, designed and built in-house.",
            "monitor",
        ),
        service(
            "sample-branding",
            2,
            "Branding & Identity",
            "Logos, type, and color systems that hold up across every surface.",
            "palette",
        ),
        service(
            "sample-seo",
            3,
            "SEO & Content",
            "Technical SEO audits and a content program that compounds.",
            "trending-up",
        ),
        service(
            "sample-maintenance",
            4,
            "Care Plans",
            "Hosting, updates, and small changes handled on a monthly retainer.",
            "shield",
        ),
    ]
});

static SAMPLE_PRICING: Lazy<Vec<ContentDoc>> = Lazy::new(|| {
    vec![
        plan(
            "sample-starter",
            1,
            "Starter",
            dec!(2500),
            "one-time",
            &[
                "Five-page marketing site",
                "Mobile-first design",
                "Launch checklist",
            ],
            false,
        ),
        plan(
            "sample-growth",
            2,
            "Growth",
            dec!(6500),
            "one-time",
            &[
                "Everything in Starter",
                "Custom design system",
                "CMS-backed content",
                "Analytics setup",
            ],
            true,
        ),
        plan(
            "sample-care",
            3,
            "Care Plan",
            dec!(150),
            "per month",
            &[
                "Managed hosting",
                "Software updates",
                "One hour of changes monthly",
            ],
            false,
        ),
    ]
});

static SAMPLE_PORTFOLIO: Lazy<Vec<ContentDoc>> = Lazy::new(|| {
    vec![
        project(
            "sample-hill-country-coffee",
            1,
            "Hill Country Coffee",
            "E-commerce relaunch for a roaster outgrowing its template shop.",
            &["web", "e-commerce"],
        ),
        project(
            "sample-lakeside-dental",
            2,
            "Lakeside Dental",
            "Brand refresh and a booking-first site for a two-office practice.",
            &["branding", "web"],
        ),
        project(
            "sample-summit-fitness",
            3,
            "Summit Fitness",
            "Membership site with class schedules pulled from their booking tool.",
            &["web", "integrations"],
        ),
    ]
});

static SAMPLE_TESTIMONIALS: Lazy<Vec<ContentDoc>> = Lazy::new(|| {
    vec![
        testimonial(
            "sample-testimonial-1",
            1,
            "Dana Whitfield",
            "Hill Country Coffee",
            "They rebuilt our shop in six weeks and online orders doubled the first month.",
        ),
        testimonial(
            "sample-testimonial-2",
            2,
            "Marcus Lee",
            "Lakeside Dental",
            "Clear process, no surprises, and the site finally looks like the practice we run.",
        ),
    ]
});

static SAMPLE_SETTINGS: Lazy<Vec<ContentDoc>> = Lazy::new(|| {
    vec![ContentDoc::SiteSettings(SiteSettings {
        id: DocId::sample("sample-site-settings"),
        site_title: "Your Agency".to_string(),
        tagline: Some("Design and development for growing businesses".to_string()),
        contact_email: "hello@example.com".to_string(),
        phone: None,
        address: None,
        default_tax: DefaultTaxSettings {
            tax_enabled: true,
            tax_rate_percent: dec!(8.25),
            data_processing_exemption: true,
        },
        created_at: SAMPLE_EPOCH,
        updated_at: SAMPLE_EPOCH,
    })]
});

static SAMPLE_LANDING_PAGES: Lazy<Vec<ContentDoc>> = Lazy::new(|| {
    vec![
        ContentDoc::LandingPage(LandingPage {
            id: DocId::sample("sample-partner-one"),
            slug: "partner-one".to_string(),
            brand_name: "Partner One".to_string(),
            logo_url: None,
            hero_heading: "Websites for your clients, built behind your brand".to_string(),
            hero_subheading: Some(
                "White-label design and development, delivered under your name.".to_string(),
            ),
            sections: vec![PageSection {
                heading: "How it works".to_string(),
                body: "You own the relationship; we build quietly in the background."
                    .to_string(),
            }],
            contact_email: "partners@example.com".to_string(),
            published: true,
            created_at: SAMPLE_EPOCH,
            updated_at: SAMPLE_EPOCH,
        }),
        ContentDoc::LandingPage(LandingPage {
            id: DocId::sample("sample-partner-two"),
            slug: "partner-two".to_string(),
            brand_name: "Partner Two".to_string(),
            logo_url: None,
            hero_heading: "A production team that scales with your agency".to_string(),
            hero_subheading: None,
            sections: vec![PageSection {
                heading: "What you get".to_string(),
                body: "Overflow capacity without overflow hires.".to_string(),
            }],
            contact_email: "partners@example.com".to_string(),
            published: true,
            created_at: SAMPLE_EPOCH,
            updated_at: SAMPLE_EPOCH,
        }),
    ]
});

/// Returns the built-in sample documents for a kind.
///
/// The returned records are clones; callers may sort or filter them
/// freely.
pub fn sample_docs(kind: ContentKind) -> Vec<ContentDoc> {
    let docs: &Lazy<Vec<ContentDoc>> = match kind {
        ContentKind::Service => &SAMPLE_SERVICES,
        ContentKind::PricingPlan => &SAMPLE_PRICING,
        ContentKind::PortfolioProject => &SAMPLE_PORTFOLIO,
        ContentKind::Testimonial => &SAMPLE_TESTIMONIALS,
        ContentKind::SiteSettings => &SAMPLE_SETTINGS,
        ContentKind::LandingPage => &SAMPLE_LANDING_PAGES,
    };
    docs.iter().cloned().collect()
}

/// Looks up a sample record by its id slug, across every kind.
pub fn find_sample(slug: &str) -> Option<ContentDoc> {
    ContentKind::ALL
        .into_iter()
        .flat_map(sample_docs)
        .find(|doc| matches!(doc.id(), DocId::Sample(id) if id == slug))
}
