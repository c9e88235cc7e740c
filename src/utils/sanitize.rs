//! Normalización de documentos salientes
//!
//! El contrato de escritura del store exige que todo campo opcional viaje
//! como `null` explícito (nunca ausente) y que las fechas se escriban siempre
//! como valores nativos. Los modelos serializan sus `Option` sin
//! `skip_serializing_if`, y este paso recursivo convierte cualquier wrapper
//! de timestamp `{seconds, nanoseconds}` que siga presente en un documento
//! en memoria antes de transmitirlo.

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::errors::{AppError, AppResult};

/// Serializar un valor al documento JSON que se envía al store
pub fn to_store_value<T: Serialize>(value: &T) -> AppResult<Value> {
    let mut json = serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Error serializing document: {}", e)))?;
    normalize(&mut json);
    Ok(json)
}

/// Paso recursivo sobre el árbol JSON completo
pub fn normalize(value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                normalize(item);
            }
        }
        Value::Object(map) => {
            if let Some(native) = timestamp_wrapper_to_native(map) {
                *value = native;
                return;
            }
            for entry in map.values_mut() {
                normalize(entry);
            }
        }
        _ => {}
    }
}

// Un objeto con exactamente {seconds, nanoseconds} es un wrapper de timestamp
fn timestamp_wrapper_to_native(map: &Map<String, Value>) -> Option<Value> {
    if map.len() != 2 {
        return None;
    }
    let seconds = map.get("seconds")?.as_i64()?;
    let nanoseconds = u32::try_from(map.get("nanoseconds")?.as_u64()?).ok()?;
    let datetime = chrono::DateTime::from_timestamp(seconds, nanoseconds)?;
    Some(Value::String(
        datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_wrapper_converted_to_native_date() {
        let mut doc = json!({
            "id": "1718000000000",
            "start_date": { "seconds": 1704067200_i64, "nanoseconds": 0 },
        });
        normalize(&mut doc);
        assert_eq!(doc["start_date"], json!("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_nested_wrappers_in_arrays() {
        let mut doc = json!([
            { "date": { "seconds": 1704067200_i64, "nanoseconds": 0 }, "notes": null }
        ]);
        normalize(&mut doc);
        assert_eq!(doc[0]["date"], json!("2024-01-01T00:00:00Z"));
        // los null explícitos se conservan
        assert!(doc[0]["notes"].is_null());
    }

    #[test]
    fn test_plain_objects_untouched() {
        let mut doc = json!({ "seconds": 3, "nanoseconds": 4, "label": "x" });
        let original = doc.clone();
        normalize(&mut doc);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_optional_fields_serialize_as_explicit_null() {
        #[derive(Serialize)]
        struct Entry {
            notes: Option<String>,
        }
        let value = to_store_value(&Entry { notes: None }).unwrap();
        assert_eq!(value, json!({ "notes": null }));
    }
}
