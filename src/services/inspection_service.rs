//! Reglas de negocio de revisiones periódicas
//!
//! La primera revisión toca 4 años después de la compra; las siguientes,
//! 2 años después de la última registrada. Todo puro: el día de "hoy"
//! entra como parámetro.

use chrono::NaiveDate;

use crate::models::inspection::{Inspection, InspectionStatus};
use crate::utils::dates::{add_years, days_until, years_between, DUE_SOON_DAYS};

/// Años desde la compra hasta la primera revisión obligatoria
pub const FIRST_INSPECTION_YEARS: i32 = 4;

/// Intervalo entre revisiones sucesivas
pub const INSPECTION_INTERVAL_YEARS: i32 = 2;

/// Revisiones ordenadas por fecha descendente (la más reciente primero)
pub fn sorted_desc(inspections: &[Inspection]) -> Vec<&Inspection> {
    let mut sorted: Vec<&Inspection> = inspections.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Fecha de la próxima revisión.
///
/// Con menos de 4 años desde la compra el vehículo aún no está sujeto a
/// revisión; el valor devuelto (compra + 4 años) sirve solo para mostrar.
/// Con historial, manda únicamente la revisión más reciente.
pub fn next_due(
    purchase_date: NaiveDate,
    inspections: &[Inspection],
    today: NaiveDate,
) -> NaiveDate {
    if years_between(purchase_date, today) < FIRST_INSPECTION_YEARS as f64 {
        return add_years(purchase_date, FIRST_INSPECTION_YEARS);
    }

    match sorted_desc(inspections).first() {
        None => add_years(purchase_date, FIRST_INSPECTION_YEARS),
        Some(last) => add_years(last.date, INSPECTION_INTERVAL_YEARS),
    }
}

/// Variante para la vista: None cuando no hay fecha de compra
pub fn next_due_for_display(
    purchase_date: Option<NaiveDate>,
    inspections: &[Inspection],
    today: NaiveDate,
) -> Option<NaiveDate> {
    purchase_date.map(|purchase| next_due(purchase, inspections, today))
}

/// Clasificación del estado de revisión, en orden de prioridad:
/// sin fecha de compra o con menos de 4 años -> no requerida;
/// vencida -> overdue; a 30 días o menos (sin contar hoy) -> due soon;
/// resto -> válida. Una revisión que vence exactamente hoy clasifica
/// como válida (el umbral es estrictamente > 0).
pub fn status(
    purchase_date: Option<NaiveDate>,
    inspections: &[Inspection],
    today: NaiveDate,
) -> InspectionStatus {
    let purchase = match purchase_date {
        Some(purchase) => purchase,
        None => return InspectionStatus::NotRequired,
    };

    if years_between(purchase, today) < FIRST_INSPECTION_YEARS as f64 {
        return InspectionStatus::NotRequired;
    }

    let due = next_due(purchase, inspections, today);
    if due < today {
        return InspectionStatus::Overdue;
    }

    let remaining = days_until(due, today);
    if remaining > 0 && remaining <= DUE_SOON_DAYS {
        return InspectionStatus::DueSoon;
    }

    InspectionStatus::Valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::InspectionOutcome;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inspection(id: &str, when: NaiveDate) -> Inspection {
        Inspection {
            id: id.to_string(),
            date: when,
            mileage: 60_000,
            outcome: InspectionOutcome::Passed,
            notes: None,
        }
    }

    #[test]
    fn test_young_vehicle_not_required_with_display_date() {
        let purchase = date(2023, 3, 15);
        let today = date(2024, 6, 1);

        assert_eq!(status(Some(purchase), &[], today), InspectionStatus::NotRequired);
        assert_eq!(
            next_due_for_display(Some(purchase), &[], today),
            Some(date(2027, 3, 15))
        );
    }

    #[test]
    fn test_missing_purchase_date_not_required() {
        let today = date(2024, 6, 1);
        assert_eq!(status(None, &[], today), InspectionStatus::NotRequired);
        assert_eq!(next_due_for_display(None, &[], today), None);
    }

    #[test]
    fn test_spec_scenario_overdue() {
        // compra 2020-01-10, hoy 2024-06-01, sin revisiones:
        // ~4.4 años -> próxima 2024-01-10 -> vencida
        let purchase = date(2020, 1, 10);
        let today = date(2024, 6, 1);

        assert_eq!(next_due(purchase, &[], today), date(2024, 1, 10));
        assert_eq!(status(Some(purchase), &[], today), InspectionStatus::Overdue);
    }

    #[test]
    fn test_next_due_follows_most_recent_inspection_only() {
        let purchase = date(2015, 5, 1);
        let today = date(2024, 6, 1);
        let history = vec![
            inspection("new", date(2023, 4, 20)),
            inspection("mid", date(2021, 4, 10)),
            inspection("old", date(2019, 4, 1)),
        ];

        // solo cuenta la más reciente, las antiguas no influyen
        assert_eq!(next_due(purchase, &history, today), date(2025, 4, 20));
    }

    #[test]
    fn test_unsorted_history_is_sorted_internally() {
        let purchase = date(2015, 5, 1);
        let today = date(2024, 6, 1);
        let history = vec![
            inspection("old", date(2019, 4, 1)),
            inspection("new", date(2023, 4, 20)),
        ];
        assert_eq!(next_due(purchase, &history, today), date(2025, 4, 20));
    }

    #[test]
    fn test_due_soon_window() {
        let purchase = date(2018, 1, 1);
        let today = date(2024, 6, 1);
        // última revisión tal que la próxima cae dentro de 30 días
        let history = vec![inspection("last", date(2022, 6, 15))];

        // próxima: 2024-06-15, faltan 14 días
        assert_eq!(status(Some(purchase), &history, today), InspectionStatus::DueSoon);
    }

    #[test]
    fn test_due_exactly_today_is_valid() {
        // frontera deliberada: vencimiento hoy mismo clasifica como válida
        let purchase = date(2018, 1, 1);
        let today = date(2024, 6, 1);
        let history = vec![inspection("last", date(2022, 6, 1))];

        assert_eq!(next_due(purchase, &history, today), today);
        assert_eq!(status(Some(purchase), &history, today), InspectionStatus::Valid);
    }

    #[test]
    fn test_valid_when_far_from_due() {
        let purchase = date(2018, 1, 1);
        let today = date(2024, 6, 1);
        let history = vec![inspection("last", date(2024, 5, 1))];

        assert_eq!(status(Some(purchase), &history, today), InspectionStatus::Valid);
    }

    #[test]
    fn test_first_inspection_window_by_elapsed_years() {
        let purchase = date(2020, 7, 1);
        // a 3.9 años: no requerida; a 4.1 años: la primera ya venció
        assert_eq!(status(Some(purchase), &[], date(2024, 6, 1)), InspectionStatus::NotRequired);
        assert_eq!(status(Some(purchase), &[], date(2024, 8, 1)), InspectionStatus::Overdue);
    }
}
