//! Escenarios de las reglas de negocio sobre colecciones en memoria:
//! pólizas activas, solapamientos, próxima revisión y copropietarios.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use vehicle_registry::models::inspection::{Inspection, InspectionOutcome, InspectionStatus};
use vehicle_registry::models::insurance::InsurancePolicy;
use vehicle_registry::models::person::PersonRef;
use vehicle_registry::services::{inspection_service, insurance_service, ownership_service};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn policy(id: &str, start: NaiveDate, end: NaiveDate) -> InsurancePolicy {
    InsurancePolicy {
        id: id.to_string(),
        company: "UNIPOL".to_string(),
        policy_number: format!("POL-{}", id).to_uppercase(),
        start_date: start,
        end_date: end,
        annual_cost: Decimal::new(52000, 2),
        coverages: vec!["RCA".to_string(), "FURTO".to_string()],
        document: None,
    }
}

fn inspection(id: &str, when: NaiveDate) -> Inspection {
    Inspection {
        id: id.to_string(),
        date: when,
        mileage: 80_000,
        outcome: InspectionOutcome::Passed,
        notes: None,
    }
}

fn person(tax_code: &str) -> PersonRef {
    PersonRef {
        id: Uuid::new_v4(),
        first_name: "MARIO".to_string(),
        last_name: "ROSSI".to_string(),
        tax_code: tax_code.to_string(),
        email: None,
        birth_date: None,
        license_year: None,
    }
}

#[test]
fn active_policy_is_unique_over_non_overlapping_ranges() {
    let policies = vec![
        policy("2022", date(2022, 2, 1), date(2023, 1, 31)),
        policy("2023", date(2023, 2, 1), date(2024, 1, 31)),
        policy("2024", date(2024, 2, 1), date(2025, 1, 31)),
    ];

    let today = date(2024, 6, 1);
    let active = insurance_service::active_policy(&policies, today).unwrap();
    assert_eq!(active.id, "2024");

    // el histórico no contiene la activa y queda ordenado por fin descendente
    let history = insurance_service::policy_history(&policies, today);
    let ids: Vec<&str> = history.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["2023", "2022"]);
}

#[test]
fn no_policy_covers_a_gap_between_ranges() {
    let policies = vec![
        policy("a", date(2022, 1, 1), date(2022, 12, 31)),
        policy("b", date(2024, 1, 1), date(2024, 12, 31)),
    ];
    assert!(insurance_service::active_policy(&policies, date(2023, 6, 1)).is_none());

    // sin activa, el histórico son todas las pólizas
    let history = insurance_service::policy_history(&policies, date(2023, 6, 1));
    assert_eq!(history.len(), 2);
}

#[test]
fn candidate_sharing_a_boundary_day_is_rejected() {
    // escenario del contrato: A [2024-01-01, 2024-12-31],
    // candidata B [2024-12-31, 2025-06-01] -> comparten un día -> rechazo
    let existing = vec![policy("a", date(2024, 1, 1), date(2024, 12, 31))];

    assert!(!insurance_service::can_add(date(2024, 12, 31), date(2025, 6, 1), &existing));
    assert!(insurance_service::validate_new_policy(
        date(2024, 12, 31),
        date(2025, 6, 1),
        &existing
    )
    .is_err());
}

#[test]
fn any_overlapping_candidate_is_rejected() {
    let existing = vec![
        policy("a", date(2023, 1, 1), date(2023, 12, 31)),
        policy("b", date(2024, 1, 1), date(2024, 12, 31)),
    ];

    // dentro de un rango existente
    assert!(!insurance_service::can_add(date(2024, 3, 1), date(2024, 4, 1), &existing));
    // envolviendo un rango existente
    assert!(!insurance_service::can_add(date(2022, 12, 1), date(2025, 2, 1), &existing));
    // hueco libre entre rangos: no hay hueco, va pegado -> rechazo por frontera
    assert!(!insurance_service::can_add(date(2023, 12, 31), date(2024, 1, 1), &existing));
}

#[test]
fn candidate_with_inverted_dates_is_rejected_before_overlap_check() {
    assert!(insurance_service::validate_new_policy(date(2024, 6, 1), date(2024, 6, 1), &[]).is_err());
    assert!(insurance_service::validate_new_policy(date(2024, 6, 2), date(2024, 6, 1), &[]).is_err());
}

#[test]
fn inspection_spec_scenario_purchase_2020_overdue_in_2024() {
    // compra 2020-01-10, hoy 2024-06-01, sin revisiones:
    // ~4.4 años -> próxima 2024-01-10 -> vencida
    let purchase = date(2020, 1, 10);
    let today = date(2024, 6, 1);

    assert_eq!(inspection_service::next_due(purchase, &[], today), date(2024, 1, 10));
    assert_eq!(
        inspection_service::status(Some(purchase), &[], today),
        InspectionStatus::Overdue
    );
}

#[test]
fn inspection_next_due_ignores_older_history_entries() {
    let purchase = date(2014, 3, 1);
    let today = date(2024, 6, 1);
    let history = vec![
        inspection("latest", date(2023, 9, 10)),
        inspection("previous", date(2021, 9, 1)),
        inspection("first", date(2018, 3, 1)),
    ];

    // siempre última + 2 años, las entradas antiguas no cuentan
    assert_eq!(
        inspection_service::next_due(purchase, &history, today),
        date(2025, 9, 10)
    );
    assert_eq!(
        inspection_service::status(Some(purchase), &history, today),
        InspectionStatus::Valid
    );
}

#[test]
fn inspection_states_cover_the_whole_window() {
    let purchase = date(2018, 1, 1);
    let today = date(2024, 6, 1);

    // vencida ayer
    let overdue = vec![inspection("i", date(2022, 5, 31))];
    assert_eq!(
        inspection_service::status(Some(purchase), &overdue, today),
        InspectionStatus::Overdue
    );

    // vence exactamente hoy: frontera deliberada, clasifica válida
    let due_today = vec![inspection("i", date(2022, 6, 1))];
    assert_eq!(
        inspection_service::status(Some(purchase), &due_today, today),
        InspectionStatus::Valid
    );

    // vence mañana: en ventana de 30 días
    let due_tomorrow = vec![inspection("i", date(2022, 6, 2))];
    assert_eq!(
        inspection_service::status(Some(purchase), &due_tomorrow, today),
        InspectionStatus::DueSoon
    );

    // vence en 31 días: fuera de ventana
    let due_later = vec![inspection("i", date(2022, 7, 2))];
    assert_eq!(
        inspection_service::status(Some(purchase), &due_later, today),
        InspectionStatus::Valid
    );
}

#[test]
fn young_vehicle_is_not_required_even_with_recorded_inspections() {
    let purchase = date(2022, 1, 1);
    let today = date(2024, 6, 1);
    let history = vec![inspection("voluntary", date(2023, 1, 1))];

    assert_eq!(
        inspection_service::status(Some(purchase), &history, today),
        InspectionStatus::NotRequired
    );
}

#[test]
fn co_owner_candidate_matching_owner_is_rejected() {
    // escenario del contrato: mismo código fiscal que el propietario
    let owner = person("RSSMRA80A01H501U");
    assert!(ownership_service::validate_candidate(&owner, &[], "RSSMRA80A01H501U").is_err());
}

#[test]
fn co_owner_add_then_remove_round_trips() {
    let original = vec![person("VRDLGI85M41H501Z")];

    let mut mutated = original.clone();
    let owner = person("RSSMRA80A01H501U");
    ownership_service::validate_candidate(&owner, &mutated, "BNCGNN90T10F205X").unwrap();
    mutated.push(person("BNCGNN90T10F205X"));

    let restored = ownership_service::remove_co_owner(&mutated, "BNCGNN90T10F205X");
    assert_eq!(restored, original);
}
