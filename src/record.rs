use serde_json::{Map, Value};

use crate::error::{RecordError, RecordResult};
use crate::value_conversion::{parse_integer_value, split_list_value};

/// One song row: column name to value, in CSV column order.
pub type Record = Map<String, Value>;

/// Fields holding comma-separated lists.
pub const LIST_FIELDS: [&str; 3] = ["vocalsLead", "vocalsBackup", "theme"];

/// Fields holding integers. Every record must carry all of them.
pub const INTEGER_FIELDS: [&str; 7] = [
    "id",
    "albumId",
    "length",
    "ukChartPeak",
    "ukChartWeeks",
    "usChartPeak",
    "usChartWeeks",
];

/// Normalizes a raw record in place and hands it back.
///
/// List fields are split into arrays; a list field missing from the record
/// is added as an empty array. Integer fields are parsed, with empty cells
/// becoming null; a missing integer field is an error. Other fields are left
/// untouched.
pub fn transform_record(mut record: Record) -> RecordResult<Record> {
    for field in LIST_FIELDS {
        let list = match record.get(field) {
            Some(value) => split_list_value(raw_text(field, value)?),
            None => Value::Array(Vec::new()),
        };
        record.insert(field.to_string(), list);
    }

    for field in INTEGER_FIELDS {
        let value = record
            .get_mut(field)
            .ok_or(RecordError::MissingField(field))?;
        let raw = raw_text(field, value)?;
        let parsed = parse_integer_value(raw).map_err(|source| RecordError::InvalidInteger {
            field,
            value: raw.to_string(),
            source,
        })?;
        *value = parsed;
    }

    Ok(record)
}

fn raw_text<'a>(field: &'static str, value: &'a Value) -> RecordResult<&'a str> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(RecordError::NotText(field)),
    }
}
