//! `;`-delimited product tables.
//!
//! The first record names the columns; every following record is one
//! product. Fields follow the usual CSV quoting rules (quoted fields may hold
//! `;` and line breaks). The `customerData` and `mbData` columns carry JSON
//! whose double quotes were doubled on export (`{""k"":1}`); they are decoded
//! into nested objects, every other column is kept as text.

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Map, Value};
use tracing::debug;

use shelfwatch_core::{InventoryError, InventoryResult};

use crate::item::CUSTOMER_DATA_FIELD;

pub const DELIMITER: u8 = b';';
/// Columns holding doubled-quote JSON.
pub const JSON_COLUMNS: &[&str] = &[CUSTOMER_DATA_FIELD, "mbData"];

/// Reverse the doubled-quote export convention: every `""` becomes `"`.
pub fn unescape_doubled_quotes(raw: &str) -> String {
    raw.replace("\"\"", "\"")
}

/// Decode a table into records, in row order.
///
/// Text without a `;`-separated header is not a table at all and is
/// reported as [`InventoryError::UnrecognizedFormat`]; once a header is
/// found, every row problem is a [`InventoryError::MalformedField`].
pub fn decode_table(text: &str) -> InventoryResult<Vec<Value>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header = reader.headers().map_err(row_error)?.clone();
    let header_location = line_of(&header);
    let columns: Vec<String> = header
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if columns.len() < 2 {
        return Err(InventoryError::unrecognized(
            "text is neither JSON nor a `;`-delimited table",
        ));
    }
    if !columns.iter().any(|c| c == CUSTOMER_DATA_FIELD) {
        return Err(InventoryError::malformed(
            header_location,
            CUSTOMER_DATA_FIELD,
            "missing column in table header",
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(row_error)?;
        let location = line_of(&row);

        let mut record = Map::with_capacity(columns.len());
        for (column, field) in columns.iter().zip(row.iter()) {
            let value = if JSON_COLUMNS.contains(&column.as_str()) {
                decode_json_field(&location, column, field)?
            } else {
                Value::String(field.to_string())
            };
            record.insert(column.clone(), value);
        }
        records.push(Value::Object(record));
    }

    debug!(columns = columns.len(), rows = records.len(), "decoded delimited table");
    Ok(records)
}

fn decode_json_field(location: &str, column: &str, raw: &str) -> InventoryResult<Value> {
    let unescaped = unescape_doubled_quotes(raw);
    match serde_json::from_str::<Value>(&unescaped) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(InventoryError::malformed(
            location,
            column,
            format!("expected a JSON object, got {}", crate::payload::json_kind(&other)),
        )),
        Err(e) => Err(InventoryError::malformed(location, column, e.to_string())),
    }
}

fn line_of(record: &StringRecord) -> String {
    record
        .position()
        .map_or_else(|| "table".to_string(), |pos| format!("line {}", pos.line()))
}

fn row_error(err: csv::Error) -> InventoryError {
    let location = err
        .position()
        .map_or_else(|| "table".to_string(), |pos| format!("line {}", pos.line()));

    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => InventoryError::malformed(
            location,
            "row",
            format!("expected {expected_len} fields, found {len}"),
        ),
        _ => InventoryError::malformed(location, "row", err.to_string()),
    }
}
