//! Utilidades de fechas
//!
//! Todas las reglas de negocio comparan fechas a granularidad de día:
//! los timestamps se truncan antes de cualquier comparación.

use chrono::{Datelike, NaiveDate};

/// Días medios por año, incluyendo bisiestos
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Umbral de "próximo a vencer" para pólizas y revisiones
pub const DUE_SOON_DAYS: i64 = 30;

/// Truncar un datetime UTC al inicio del día
pub fn start_of_day(datetime: chrono::DateTime<chrono::Utc>) -> NaiveDate {
    datetime.date_naive()
}

/// Días que faltan hasta `date` (negativo si ya pasó)
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Años transcurridos entre dos fechas como fracción
pub fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

/// Sumar años de calendario. El 29 de febrero cae en 28 de febrero
/// cuando el año destino no es bisiesto.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let target_year = date.year() + years;
    NaiveDate::from_ymd_opt(target_year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(target_year, 2, 28).unwrap())
}
