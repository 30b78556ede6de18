//! Billing properties: total robustness, bridge idempotence, tax
//! policy, complimentary items, and legacy-shape migration.

mod common;

use common::{InspectionBlobBuilder, StoreBuilder};
use serde_json::json;

use shopledger::auth::{AuthContext, Role};
use shopledger::invoice::{format_currency, Invoice, TAX_RATE};
use shopledger::migrate::{self, FlatLineItem};
use shopledger::recommendation::{
    Decision, RecommendationLedger, RecommendationUpdate, StoredRecommendations,
};
use shopledger::reconcile;
use shopledger::service_job::ServiceJobList;
use shopledger::session::WorkSession;

fn advisor() -> AuthContext {
    AuthContext::new(Role::Advisor)
}

#[tokio::test]
async fn test_totals_survive_malformed_stored_lines() {
    // Every numeric field here is hostile: strings, nulls, objects,
    // missing keys, negative values.
    let store = StoreBuilder::new("job-1").vehicle_type("car").build();
    let record = InspectionBlobBuilder::new()
        .service_lines(json!([
            {
                "id": 0.123456,
                "title": "Mystery work",
                "labor": [
                    {"desc": "A", "hours": "two", "rate": null},
                    {"desc": "B", "hours": "1.5", "rate": "100"},
                    {"hours": -3}
                ],
                "parts": [
                    {"name": "C", "qty": {"x": 1}, "price": "19.99"},
                    {"name": "D", "qty": "2", "price": 10}
                ]
            },
            {"title": "Empty job"}
        ]))
        .build("job-1");
    store.seed_inspection(record);

    let session = WorkSession::load(&store, advisor(), "job-1").await.unwrap();
    let invoice = session.compile_invoice(TAX_RATE).unwrap();

    assert!(invoice.total.is_finite());
    assert_eq!(invoice.labor_subtotal, 150.0);
    assert_eq!(invoice.parts_subtotal, 20.0);
    assert_eq!(invoice.tax, 1.4);
    assert_eq!(invoice.total, 171.4);
}

#[test]
fn test_repeated_approval_never_duplicates_jobs() {
    let mut ledger =
        RecommendationLedger::load_or_init(&["Brake Pads/Rotors"], StoredRecommendations::new());
    ledger.update(
        "Brake Pads/Rotors",
        RecommendationUpdate::Service("Front brake overhaul".into()),
    );
    ledger.update("Brake Pads/Rotors", RecommendationUpdate::Labor(240.0));
    let mut jobs = ServiceJobList::new();

    for _ in 0..3 {
        reconcile::approve(&mut ledger, &mut jobs, "Brake Pads/Rotors");
    }

    assert_eq!(jobs.len(), 1);
    assert_eq!(
        jobs.jobs()
            .iter()
            .filter(|j| j.title == "Front brake overhaul")
            .count(),
        1
    );
}

#[test]
fn test_tax_applies_to_parts_subtotal_only() {
    let mut jobs = ServiceJobList::new();
    let id = jobs.add_job("Mixed work");
    jobs.add_labor_line(
        &id,
        shopledger::LaborLineInit {
            hours: 1.0,
            rate: 50.0,
            ..Default::default()
        },
    )
    .unwrap();
    jobs.add_part_line(
        &id,
        shopledger::PartLineInit {
            unit_price: 100.0,
            ..Default::default()
        },
    )
    .unwrap();

    let invoice = Invoice::compile(&jobs, 0.07);
    assert_eq!(invoice.labor_subtotal, 50.0);
    assert_eq!(invoice.parts_subtotal, 100.0);
    assert_eq!(invoice.tax, 7.00);
    assert_eq!(invoice.total, 157.00);
    assert_eq!(format_currency(invoice.total), "$157.00");
}

#[test]
fn test_no_cost_excluded_even_after_approval() {
    let mut ledger =
        RecommendationLedger::load_or_init(&["Wipers & Washers"], StoredRecommendations::new());
    ledger.update("Wipers & Washers", RecommendationUpdate::Parts(30.0));
    ledger.update("Wipers & Washers", RecommendationUpdate::Labor(20.0));
    ledger.update("Wipers & Washers", RecommendationUpdate::NoCost(true));

    // Amounts zeroed immediately.
    let rec = ledger.get("Wipers & Washers").unwrap();
    assert_eq!(rec.parts, 0.0);
    assert_eq!(rec.labor, 0.0);

    // Approval later still contributes nothing to the fallback invoice.
    ledger.set_decision("Wipers & Washers", Decision::Approved);
    let invoice = Invoice::compile_legacy(&ledger, TAX_RATE);
    assert_eq!(invoice.parts_subtotal, 0.0);
    assert_eq!(invoice.labor_subtotal, 0.0);
    assert_eq!(invoice.total, 0.0);
}

#[tokio::test]
async fn test_invoice_falls_back_to_recommendations_when_no_lines() {
    // A record written before service lines existed: recommendations
    // only, no service_lines key at all.
    let store = StoreBuilder::new("job-1").vehicle_type("car").build();
    let record = InspectionBlobBuilder::new()
        .recommendation(
            "Horn",
            json!({"service": "Replace horn", "parts": 40, "labor": 35, "decision": "approved"}),
        )
        .recommendation(
            "Fluid Levels",
            json!({"service": "Top off coolant", "parts": 12, "labor": 0, "decision": "denied"}),
        )
        .build("job-1");
    store.seed_inspection(record);

    let session = WorkSession::load(&store, advisor(), "job-1").await.unwrap();
    let invoice = session.compile_invoice(TAX_RATE).unwrap();

    // Only the approved item, synthesized with the legacy labels.
    assert_eq!(invoice.sections.len(), 1);
    assert_eq!(invoice.sections[0].job.title, "Replace horn");
    assert_eq!(invoice.sections[0].job.labor[0].description, "Service Labor");
    assert_eq!(invoice.sections[0].job.parts[0].name, "Service Parts");
    assert_eq!(invoice.labor_subtotal, 35.0);
    assert_eq!(invoice.parts_subtotal, 40.0);
    assert_eq!(invoice.tax, 2.8);
    assert_eq!(invoice.total, 77.8);
}

#[test]
fn test_migration_from_recommendations_preserves_totals() {
    let mut ledger = RecommendationLedger::load_or_init(
        &["Horn", "Exhaust System", "Spare"],
        StoredRecommendations::new(),
    );
    for (point, parts, labor) in [
        ("Horn", 40.0, 35.0),
        ("Exhaust System", 250.0, 180.0),
        ("Spare", 120.0, 0.0),
    ] {
        ledger.update(point, RecommendationUpdate::Parts(parts));
        ledger.update(point, RecommendationUpdate::Labor(labor));
        ledger.set_decision(point, Decision::Approved);
    }

    let migrated = migrate::jobs_from_recommendations(&ledger);
    assert_eq!(migrated.len(), 3);

    let legacy = Invoice::compile_legacy(&ledger, TAX_RATE);
    let canonical = Invoice::compile(&migrated, TAX_RATE);
    assert_eq!(legacy.labor_subtotal, canonical.labor_subtotal);
    assert_eq!(legacy.parts_subtotal, canonical.parts_subtotal);
    assert_eq!(legacy.tax, canonical.tax);
    assert_eq!(legacy.total, canonical.total);
}

#[test]
fn test_migration_from_flat_items_taxes_parts_only() {
    let items: Vec<FlatLineItem> = serde_json::from_value(json!([
        {"id": "1", "description": "Air dryer cartridge", "category": "part", "qty": 1, "price": 95},
        {"id": "2", "description": "Install cartridge", "category": "labor", "qty": 1, "price": 120},
        {"id": "3", "description": "Disposal fee", "category": "fee", "qty": 1, "price": 10}
    ]))
    .unwrap();

    let jobs = migrate::jobs_from_flat_items(&items);
    let invoice = Invoice::compile(&jobs, TAX_RATE);

    // Labor and fee stay out of the taxable base.
    assert_eq!(invoice.parts_subtotal, 95.0);
    assert_eq!(invoice.labor_subtotal, 130.0);
    assert_eq!(invoice.tax, 6.65);
    assert_eq!(invoice.total, 231.65);
}
