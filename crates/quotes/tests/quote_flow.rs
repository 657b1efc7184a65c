use chrono::{TimeZone, Utc};
use thiserror::Error;

use rigforge_builder::{BuildMode, BuilderSession};
use rigforge_catalog::{
    Category, InMemoryCatalogSource, Product, ProductRecord, load_catalog,
};
use rigforge_core::{Entity, Money};
use rigforge_quotes::{
    CompanyProfile, CustomerContact, InMemoryLeadSink, LeadPayload, LeadSink, LeadStatus,
    QuotationSheet, QuoteRates, Settings, SubmitError, compute_quote_with, submit_session,
};

fn catalog_records() -> Vec<ProductRecord> {
    vec![
        ProductRecord::new("cpu-am4", "Ryzen 5 5600", Category::Cpu, 18500)
            .with_brand("AMD")
            .with_compatibility_tags(&["socket-am4"]),
        ProductRecord::new("cpu-lga", "Core i5 12400F", Category::Cpu, 15000)
            .with_brand("Intel")
            .with_compatibility_tags(&["socket-lga1700"]),
        ProductRecord::new("mb-am4", "B550M Pro", Category::Motherboard, 9500)
            .with_compatibility_tags(&["socket-am4", "ram-ddr4"]),
        ProductRecord::new("mb-lga", "B760M", Category::Motherboard, 12000)
            .with_compatibility_tags(&["socket-lga1700", "ram-ddr5"]),
        ProductRecord::new("ram-ddr4", "16GB DDR4 3200", Category::Ram, 4500)
            .with_compatibility_tags(&["ram-ddr4"]),
        ProductRecord::new("ram-ddr5", "16GB DDR5 5600", Category::Ram, 6000)
            .with_compatibility_tags(&["ram-ddr5"]),
        ProductRecord::new("case-matx", "Mini Tower", Category::Case, 3000)
            .with_compatibility_tags(&["case-matx"]),
        ProductRecord::new("case-itx", "Cube", Category::Case, 3500)
            .with_compatibility_tags(&["case-itx"]),
        ProductRecord::new("ssd-gone", "Sold-out SSD", Category::Storage, 4000).out_of_stock(),
    ]
}

fn catalog() -> Vec<Product> {
    let ingest = load_catalog(&InMemoryCatalogSource::new(catalog_records())).unwrap();
    assert!(ingest.rejected.is_empty());
    ingest.catalog.products().to_vec()
}

fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id().to_string()).collect()
}

fn pick(catalog: &[Product], id: &str) -> Product {
    catalog
        .iter()
        .find(|p| p.id().as_str() == id)
        .cloned()
        .unwrap()
}

#[test]
fn build_filter_quote_and_submit() {
    rigforge_observability::init();
    let catalog = catalog();
    assert!(catalog.iter().all(|p| p.id().as_str() != "ssd-gone"));

    let mut session = BuilderSession::new(BuildMode::PartsOnly);
    assert_eq!(session.current_category(), Category::Cpu);
    session.select(&pick(&catalog, "cpu-am4")).unwrap();

    assert_eq!(session.next(), Category::Motherboard);
    let boards = session.candidates(&catalog).unwrap();
    assert_eq!(ids(&boards), vec!["mb-am4"]);
    session.select(&pick(&catalog, "mb-am4")).unwrap();

    assert_eq!(session.next(), Category::Ram);
    let ram = session.candidates(&catalog).unwrap();
    assert_eq!(ids(&ram), vec!["ram-ddr4"]);
    session.select(&pick(&catalog, "ram-ddr4")).unwrap();

    session.go_to(Category::Case).unwrap();
    let cases = session.candidates(&catalog).unwrap();
    assert_eq!(ids(&cases), vec!["case-matx", "case-itx"]);

    let settings = Settings::new()
        .with("gst_percentage", "18")
        .with("service_charge_percentage", "not a number");
    let rates = QuoteRates::load(&settings).unwrap();
    let quote = compute_quote_with(session.build(), &rates);
    assert_eq!(quote.subtotal, Money::new(32500));
    assert_eq!(quote.tax_amount, Money::new(5850));
    assert_eq!(quote.service_charge, Money::new(1625));
    assert_eq!(quote.total, Money::new(39975));

    let issued = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let sheet = QuotationSheet::new(
        &quote,
        rates,
        CompanyProfile::from_settings(&settings),
        "Asha Patel",
        issued,
    );
    assert!(sheet.number.as_str().starts_with("KQ-"));
    assert_eq!(sheet.lines.len(), 3);
    assert_eq!(sheet.lines[0].brand.as_deref(), Some("AMD"));
    assert_eq!(sheet.company, CompanyProfile::default());

    let sink = InMemoryLeadSink::new();
    let contact = CustomerContact::new("Asha Patel").with_email("asha@example.com");
    let receipt = submit_session(&sink, &mut session, &rates, &contact, issued).unwrap();
    assert_eq!(receipt, 1);

    let leads = sink.leads();
    assert_eq!(leads[0].total_amount, Money::new(39975));
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[0].items.len(), 3);

    assert_eq!(session.selected_count(), 0);
    assert_eq!(session.current_category(), Category::Cpu);
    assert!(!session.can_get_quote());
}

#[derive(Debug, Error)]
#[error("lead service returned 503")]
struct ServiceDown;

struct FlakySink;

impl LeadSink for FlakySink {
    type Receipt = String;
    type Error = ServiceDown;

    fn create_lead(&self, _payload: &LeadPayload) -> Result<String, ServiceDown> {
        Err(ServiceDown)
    }
}

#[test]
fn failed_submission_keeps_the_build() {
    let catalog = catalog();
    let mut session = BuilderSession::new(BuildMode::FullPc);
    session.select(&pick(&catalog, "cpu-lga")).unwrap();
    assert!(!session.is_complete());

    let contact = CustomerContact::new("Ravi").with_whatsapp("98765-43210");
    let err = submit_session(&FlakySink, &mut session, &QuoteRates::default(), &contact, Utc::now())
        .unwrap_err();

    assert!(matches!(err, SubmitError::Sink(ServiceDown)));
    assert_eq!(err.to_string(), "lead submission failed: lead service returned 503");
    assert_eq!(session.selected_count(), 1);
}

#[test]
fn deselecting_the_cpu_reopens_every_board() {
    let catalog = catalog();
    let mut session = BuilderSession::default();
    let cpu = pick(&catalog, "cpu-lga");

    session.select(&cpu).unwrap();
    session.next();
    assert_eq!(ids(&session.candidates(&catalog).unwrap()), vec!["mb-lga"]);

    session.prev();
    session.select(&cpu).unwrap();
    session.next();
    assert_eq!(ids(&session.candidates(&catalog).unwrap()), vec!["mb-am4", "mb-lga"]);
}
