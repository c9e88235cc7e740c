//! Contrato de documentos con el store remoto: lecturas que aceptan fechas
//! nativas o wrappers de timestamp, y escrituras normalizadas (null
//! explícito, fechas siempre nativas).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use vehicle_registry::models::insurance::InsurancePolicy;
use vehicle_registry::models::person::PersonRef;
use vehicle_registry::models::service_entry::{ServiceEntry, ServiceKind};
use vehicle_registry::utils::sanitize;

#[test]
fn policy_document_reads_native_dates() {
    let raw = json!({
        "id": "1718000000000",
        "company": "GENERALI",
        "policy_number": "POL-42",
        "start_date": "2024-01-01",
        "end_date": "2024-12-31",
        "annual_cost": "450.00",
        "coverages": ["RCA"],
        "document": null
    });

    let policy: InsurancePolicy = serde_json::from_value(raw).unwrap();
    assert_eq!(policy.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(policy.end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert!(policy.document.is_none());
}

#[test]
fn policy_document_reads_timestamp_wrappers() {
    // el mismo documento puede llegar con wrappers de timestamp
    let raw = json!({
        "id": "1718000000000",
        "company": "GENERALI",
        "policy_number": "POL-42",
        "start_date": { "seconds": 1704067200, "nanoseconds": 0 },
        "end_date": { "seconds": 1735603200, "nanoseconds": 0 },
        "annual_cost": "450.00",
        "coverages": [],
        "document": {
            "file_name": "polizza.pdf",
            "url": "https://files.example.com/insurances/AB123CD/1_2.pdf",
            "size_bytes": 120000,
            "uploaded_at": { "seconds": 1704100000, "nanoseconds": 0 }
        }
    });

    let policy: InsurancePolicy = serde_json::from_value(raw).unwrap();
    assert_eq!(policy.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(policy.end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    assert!(policy.document.is_some());
}

#[test]
fn outgoing_policy_writes_native_dates_and_explicit_nulls() {
    let policy = InsurancePolicy {
        id: "1718000000000".to_string(),
        company: "GENERALI".to_string(),
        policy_number: "POL-42".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        annual_cost: Decimal::new(45000, 2),
        coverages: vec!["RCA".to_string()],
        document: None,
    };

    let value = sanitize::to_store_value(&vec![policy]).unwrap();

    // fechas nativas
    assert_eq!(value[0]["start_date"], json!("2024-01-01"));
    assert_eq!(value[0]["end_date"], json!("2024-12-31"));
    // el opcional ausente viaja como null explícito, no desaparece
    assert!(value[0].get("document").unwrap().is_null());
}

#[test]
fn sanitize_converts_wrappers_left_in_raw_documents() {
    let mut raw = json!([{
        "id": "1",
        "date": { "seconds": 1704067200, "nanoseconds": 0 },
        "notes": null
    }]);

    sanitize::normalize(&mut raw);

    assert_eq!(raw[0]["date"], json!("2024-01-01T00:00:00Z"));
    assert!(raw[0]["notes"].is_null());
}

#[test]
fn service_entry_kind_round_trips() {
    let entry = ServiceEntry {
        id: "1".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        mileage: 98_500,
        description: "CAMBIO OLIO E FILTRI".to_string(),
        cost: Decimal::new(18000, 2),
        kind: ServiceKind::Extraordinary,
    };

    let value = sanitize::to_store_value(&entry).unwrap();
    assert_eq!(value["kind"], json!("extraordinary"));

    let parsed: ServiceEntry = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, entry);
}

#[test]
fn embedded_person_optionals_are_explicit_nulls() {
    let person = PersonRef {
        id: uuid::Uuid::new_v4(),
        first_name: "MARIO".to_string(),
        last_name: "ROSSI".to_string(),
        tax_code: "RSSMRA80A01H501U".to_string(),
        email: None,
        birth_date: None,
        license_year: None,
    };

    let value = sanitize::to_store_value(&vec![person]).unwrap();
    let entry = &value[0];

    for field in ["email", "birth_date", "license_year"] {
        assert!(entry.get(field).unwrap().is_null(), "{} must be explicit null", field);
    }
}

#[test]
fn patching_identical_content_is_stable() {
    // idempotencia a nivel de documento: el mismo contenido produce
    // exactamente el mismo payload de patch
    let entry = ServiceEntry {
        id: "1".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        mileage: 98_500,
        description: "TAGLIANDO".to_string(),
        cost: Decimal::new(25000, 2),
        kind: ServiceKind::Ordinary,
    };

    let first = sanitize::to_store_value(&vec![entry.clone()]).unwrap();
    let second = sanitize::to_store_value(&vec![entry]).unwrap();
    assert_eq!(first, second);
}
