//! Fechas flexibles en documentos del store
//!
//! Un campo de fecha dentro de un documento JSONB puede llegar como valor
//! nativo (`YYYY-MM-DD` o RFC3339) o como wrapper de timestamp
//! `{"seconds": i64, "nanoseconds": u32}`. Las lecturas aceptan ambas
//! representaciones; las escrituras emiten siempre el valor nativo.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawDate {
    Wrapper { seconds: i64, nanoseconds: u32 },
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl RawDate {
    fn into_datetime<E: serde::de::Error>(self) -> Result<DateTime<Utc>, E> {
        match self {
            RawDate::Wrapper { seconds, nanoseconds } => {
                DateTime::from_timestamp(seconds, nanoseconds)
                    .ok_or_else(|| E::custom("timestamp wrapper out of range"))
            }
            RawDate::DateTime(datetime) => Ok(datetime),
            RawDate::Date(date) => Ok(date.and_time(chrono::NaiveTime::MIN).and_utc()),
        }
    }

    fn into_date<E: serde::de::Error>(self) -> Result<NaiveDate, E> {
        Ok(self.into_datetime::<E>()?.date_naive())
    }
}

/// Campo `NaiveDate` con lectura flexible, escrito como `YYYY-MM-DD`
pub mod flexible_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        RawDate::deserialize(deserializer)?.into_date()
    }
}

/// Campo `Option<NaiveDate>` con lectura flexible, escrito como `null` o `YYYY-MM-DD`
pub mod flexible_date_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => flexible_date::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<RawDate>::deserialize(deserializer)?;
        raw.map(RawDate::into_date).transpose()
    }
}

/// Campo `DateTime<Utc>` con lectura flexible, escrito como RFC3339
pub mod flexible_datetime {
    use super::*;
    use chrono::SecondsFormat;

    pub fn serialize<S: Serializer>(
        datetime: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        RawDate::deserialize(deserializer)?.into_datetime()
    }
}
