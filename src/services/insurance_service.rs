//! Reglas de negocio de pólizas de seguro
//!
//! Funciones puras sobre la colección en memoria de un vehículo: resolución
//! de la póliza activa, histórico ordenado y validación de solapamientos.
//!
//! "Activa" significa contención estricta del día de hoy en [inicio, fin]
//! a granularidad de día; una póliza que todavía no empezó no es activa
//! aunque su fin quede en el futuro.

use chrono::NaiveDate;

use crate::models::insurance::InsurancePolicy;
use crate::utils::dates::{days_until, DUE_SOON_DAYS};
use crate::utils::errors::{validation_error, AppResult};

/// Póliza cuyo rango [inicio, fin] contiene el día de hoy, si existe.
/// El invariante de no-solapamiento garantiza como mucho una.
pub fn active_policy(policies: &[InsurancePolicy], today: NaiveDate) -> Option<&InsurancePolicy> {
    policies
        .iter()
        .find(|policy| policy.start_date <= today && policy.end_date >= today)
}

/// Histórico: todas las pólizas no activas, ordenadas por fecha de fin
/// descendente (la expirada más reciente primero)
pub fn policy_history(policies: &[InsurancePolicy], today: NaiveDate) -> Vec<&InsurancePolicy> {
    let active_id = active_policy(policies, today).map(|policy| policy.id.as_str());

    let mut history: Vec<&InsurancePolicy> = policies
        .iter()
        .filter(|policy| active_id != Some(policy.id.as_str()))
        .collect();
    history.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    history
}

/// Vence dentro de 30 días (incluye el día de hoy)
pub fn is_due_soon(end_date: NaiveDate, today: NaiveDate) -> bool {
    let remaining = days_until(end_date, today);
    (0..=DUE_SOON_DAYS).contains(&remaining)
}

/// Ya vencida
pub fn is_expired(end_date: NaiveDate, today: NaiveDate) -> bool {
    end_date < today
}

/// Dos rangos [s1,e1] y [s2,e2] se solapan si s1 <= e2 y s2 <= e1.
/// Compartir un día de frontera cuenta como solapamiento.
pub fn ranges_overlap(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && s2 <= e1
}

/// El rango candidato no toca ninguno de los existentes
pub fn can_add(start: NaiveDate, end: NaiveDate, existing: &[InsurancePolicy]) -> bool {
    !existing
        .iter()
        .any(|policy| ranges_overlap(start, end, policy.start_date, policy.end_date))
}

/// La fecha de fin debe ser estrictamente posterior a la de inicio
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end <= start {
        return Err(validation_error(
            "end_date",
            "La fecha de fin debe ser posterior a la fecha de inicio",
        ));
    }
    Ok(())
}

/// Validación completa de una póliza nueva: orden de fechas y ausencia de
/// solapamiento con las existentes. Se aplica solo al alta, no a la edición.
pub fn validate_new_policy(
    start: NaiveDate,
    end: NaiveDate,
    existing: &[InsurancePolicy],
) -> AppResult<()> {
    validate_date_order(start, end)?;
    if !can_add(start, end, existing) {
        return Err(validation_error(
            "date_range",
            "Las fechas se solapan con otra póliza existente",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(id: &str, start: NaiveDate, end: NaiveDate) -> InsurancePolicy {
        InsurancePolicy {
            id: id.to_string(),
            company: "GENERALI".to_string(),
            policy_number: "POL-001".to_string(),
            start_date: start,
            end_date: end,
            annual_cost: Decimal::new(45000, 2),
            coverages: vec!["RCA".to_string()],
            document: None,
        }
    }

    #[test]
    fn test_active_policy_contains_today() {
        let policies = vec![
            policy("a", date(2022, 1, 1), date(2022, 12, 31)),
            policy("b", date(2024, 1, 1), date(2024, 12, 31)),
        ];
        let active = active_policy(&policies, date(2024, 6, 1)).unwrap();
        assert_eq!(active.id, "b");
    }

    #[test]
    fn test_active_policy_boundary_days_count() {
        let policies = vec![policy("a", date(2024, 1, 1), date(2024, 12, 31))];
        assert!(active_policy(&policies, date(2024, 1, 1)).is_some());
        assert!(active_policy(&policies, date(2024, 12, 31)).is_some());
        assert!(active_policy(&policies, date(2023, 12, 31)).is_none());
        assert!(active_policy(&policies, date(2025, 1, 1)).is_none());
    }

    #[test]
    fn test_not_yet_started_policy_is_not_active() {
        // el fin queda en el futuro pero el inicio también: no activa
        let policies = vec![policy("a", date(2025, 1, 1), date(2025, 12, 31))];
        assert!(active_policy(&policies, date(2024, 6, 1)).is_none());
    }

    #[test]
    fn test_history_excludes_active_and_sorts_by_end_desc() {
        let policies = vec![
            policy("old", date(2021, 1, 1), date(2021, 12, 31)),
            policy("older", date(2020, 1, 1), date(2020, 12, 31)),
            policy("active", date(2024, 1, 1), date(2024, 12, 31)),
        ];
        let history = policy_history(&policies, date(2024, 6, 1));
        let ids: Vec<&str> = history.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "older"]);
    }

    #[test]
    fn test_due_soon_includes_day_zero() {
        let today = date(2024, 6, 1);
        assert!(is_due_soon(today, today));
        assert!(is_due_soon(date(2024, 7, 1), today));
        assert!(!is_due_soon(date(2024, 7, 2), today));
        assert!(!is_due_soon(date(2024, 5, 31), today));
    }

    #[test]
    fn test_is_expired() {
        let today = date(2024, 6, 1);
        assert!(is_expired(date(2024, 5, 31), today));
        assert!(!is_expired(today, today));
    }

    #[test]
    fn test_overlap_on_shared_boundary_day() {
        // póliza A [2024-01-01, 2024-12-31], candidata B empieza el día que A termina
        let existing = vec![policy("a", date(2024, 1, 1), date(2024, 12, 31))];
        assert!(!can_add(date(2024, 12, 31), date(2025, 6, 1), &existing));
    }

    #[test]
    fn test_non_overlapping_candidate_accepted() {
        let existing = vec![policy("a", date(2024, 1, 1), date(2024, 12, 31))];
        assert!(can_add(date(2025, 1, 1), date(2025, 12, 31), &existing));
    }

    #[test]
    fn test_candidate_containing_existing_rejected() {
        let existing = vec![policy("a", date(2024, 3, 1), date(2024, 6, 30))];
        assert!(!can_add(date(2024, 1, 1), date(2024, 12, 31), &existing));
    }

    #[test]
    fn test_validate_date_order() {
        assert!(validate_date_order(date(2024, 1, 1), date(2024, 12, 31)).is_ok());
        assert!(validate_date_order(date(2024, 1, 1), date(2024, 1, 1)).is_err());
        assert!(validate_date_order(date(2024, 12, 31), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_at_most_one_active_among_disjoint_ranges() {
        let policies = vec![
            policy("a", date(2022, 1, 1), date(2022, 12, 31)),
            policy("b", date(2023, 1, 1), date(2023, 12, 31)),
            policy("c", date(2024, 1, 1), date(2024, 12, 31)),
        ];
        for day in [date(2022, 6, 1), date(2023, 6, 1), date(2024, 6, 1)] {
            let active = active_policy(&policies, day).unwrap();
            assert!(active.start_date <= day && active.end_date >= day);
        }
        assert!(active_policy(&policies, date(2025, 6, 1)).is_none());
    }
}
