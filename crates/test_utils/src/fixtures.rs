//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the
//! back-office. These fixtures are designed to be consistent and
//! predictable for unit tests; anything randomized says so in its name.

use chrono::NaiveDate;
use core_kernel::{CatalogItemId, ClientId, DocumentId, InvoiceId, QuoteId};
use domain_billing::TaxConfig;
use domain_client::ClientDraft;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for money amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// Typical one-time project price
    pub fn site_build() -> Decimal {
        dec!(3000)
    }

    /// Typical monthly retainer price
    pub fn care_plan_monthly() -> Decimal {
        dec!(150)
    }

    /// Typical hourly rate
    pub fn hourly_rate() -> Decimal {
        dec!(95)
    }

    /// Texas state plus local sales tax rate, percent
    pub fn texas_rate() -> Decimal {
        dec!(8.25)
    }
}

/// Fixture for tax policies
pub struct TaxFixtures;

impl TaxFixtures {
    /// Texas rate, every taxable row fully taxable
    pub fn texas() -> TaxConfig {
        TaxConfig::new(AmountFixtures::texas_rate())
    }

    /// Texas rate with the 20% data-processing carve-out applied
    pub fn texas_with_carve_out() -> TaxConfig {
        Self::texas().with_data_processing_exemption()
    }

    /// No tax charged at all
    pub fn disabled() -> TaxConfig {
        TaxConfig::disabled()
    }
}

/// Fixture for dates
///
/// Expiry and overdue are judged against the live business date, so
/// "future" fixtures sit far in the future and "past" fixtures far in
/// the past; neither side of 2026 flips during a test run.
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A validity date that will not expire during a test run
    pub fn valid_until() -> NaiveDate {
        NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()
    }

    /// A validity date that is already past
    pub fn expired_valid_until() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 31).unwrap()
    }

    /// A due date comfortably in the future
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2099, 1, 31).unwrap()
    }

    /// A due date that is already past
    pub fn overdue_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 2, 15).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic client ID for testing
    pub fn client_id() -> ClientId {
        ClientId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic quote ID for testing
    pub fn quote_id() -> QuoteId {
        QuoteId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic invoice ID for testing
    pub fn invoice_id() -> InvoiceId {
        InvoiceId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic catalog item ID for testing
    pub fn catalog_item_id() -> CatalogItemId {
        CatalogItemId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }

    /// Creates a deterministic content document ID for testing
    pub fn document_id() -> DocumentId {
        DocumentId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// First quote number a fresh deployment assigns
    pub fn quote_number() -> &'static str {
        "Q-001"
    }

    /// First invoice number a fresh deployment assigns
    pub fn invoice_number() -> &'static str {
        "INV-001"
    }

    /// Standard client name
    pub fn client_name() -> &'static str {
        "Maple & Co"
    }

    /// Standard client billing e-mail
    pub fn client_email() -> &'static str {
        "billing@maple.example"
    }

    /// Standard one-time item name
    pub fn one_time_item_name() -> &'static str {
        "Website build"
    }

    /// Standard recurring item name
    pub fn recurring_item_name() -> &'static str {
        "Care plan"
    }
}

/// Fixture for client drafts
pub struct ClientFixtures;

impl ClientFixtures {
    /// The deterministic client every seeded store starts with
    pub fn draft() -> ClientDraft {
        ClientDraft::named(StringFixtures::client_name())
            .with_email(StringFixtures::client_email())
            .with_company("Maple & Co Interiors")
    }

    /// A randomized but always-valid client draft
    pub fn fake_draft() -> ClientDraft {
        let mut draft = ClientDraft::named(Name().fake::<String>())
            .with_email(SafeEmail().fake::<String>())
            .with_company(CompanyName().fake::<String>());
        draft.phone = Some(PhoneNumber().fake::<String>());
        draft
    }

    /// A batch of randomized valid client drafts
    pub fn fake_drafts(count: usize) -> Vec<ClientDraft> {
        (0..count).map(|_| Self::fake_draft()).collect()
    }
}
