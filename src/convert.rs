//! CSV to JSON conversion: one object per record, keys in header order.

use crate::types::{RawTable, RawValue};
use serde_json::{Map, Number, Value};

fn cell_to_json(value: Option<&RawValue>) -> Value {
    match value {
        Some(RawValue::Number { value, .. }) => {
            if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                Value::from(*value as i64)
            } else {
                Number::from_f64(*value).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        Some(RawValue::Text(s)) => Value::String(s.clone()),
        Some(RawValue::Empty) | None => Value::Null,
    }
}

pub fn records_to_json(table: &RawTable) -> Value {
    let records = table
        .records
        .iter()
        .map(|r| {
            let obj: Map<String, Value> = table
                .headers
                .iter()
                .map(|h| (h.clone(), cell_to_json(r.get(h))))
                .collect();
            Value::Object(obj)
        })
        .collect();
    Value::Array(records)
}
