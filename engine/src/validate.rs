//! Shape validation for batch reorder requests.
//!
//! Runs on the raw JSON body before any store access. Every failure names the
//! offending entry so a caller can tell which pair was rejected.

use crate::{error::Result, Error, Order, OrderEntry, ReorderBatch};
use serde_json::Value;
use std::collections::HashSet;

/// Validate a reorder body of the form `{"sets": [{"id": .., "order": ..}, ..]}`.
///
/// Checks, in order: `sets` is an array, the array is non-empty, every entry
/// has a non-empty string `id` and an integral numeric `order`, and no id
/// appears twice.
pub fn validate_reorder(payload: &Value) -> Result<ReorderBatch> {
    let entries = match payload.get("sets") {
        Some(Value::Array(entries)) => entries,
        other => {
            return Err(Error::NotAnArray {
                received: other.cloned().unwrap_or(Value::Null),
            })
        }
    };

    if entries.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut sets = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let id = parse_id(index, entry)?;
        let order = parse_order(index, entry)?;

        if !seen.insert(id) {
            return Err(Error::DuplicateId {
                index,
                id: id.to_string(),
                entry: entry.clone(),
            });
        }

        sets.push(OrderEntry::new(id, order));
    }

    Ok(ReorderBatch { sets })
}

fn parse_id(index: usize, entry: &Value) -> Result<&str> {
    match entry.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id),
        other => Err(invalid(index, "id", other, entry)),
    }
}

fn parse_order(index: usize, entry: &Value) -> Result<Order> {
    let value = entry.get("order");
    let order = match value {
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };

    order.ok_or_else(|| invalid(index, "order", value, entry))
}

fn invalid(index: usize, field: &'static str, value: Option<&Value>, entry: &Value) -> Error {
    Error::InvalidEntry {
        index,
        field,
        received_value: value.cloned().unwrap_or(Value::Null),
        entry: entry.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_batch() {
        let batch = validate_reorder(&json!({
            "sets": [
                {"id": "b", "order": 0},
                {"id": "c", "order": 1},
                {"id": "a", "order": 2.0}
            ]
        }))
        .unwrap();

        assert_eq!(batch, ReorderBatch::from_ids(["b", "c", "a"]));
    }

    #[test]
    fn gaps_and_negative_orders_are_allowed() {
        let batch = validate_reorder(&json!({
            "sets": [{"id": "a", "order": -3}, {"id": "b", "order": 40}]
        }))
        .unwrap();

        assert_eq!(batch.sets[0].order, -3);
        assert_eq!(batch.sets[1].order, 40);
    }

    #[test]
    fn rejects_missing_or_non_array_sets() {
        assert_eq!(
            validate_reorder(&json!({})),
            Err(Error::NotAnArray {
                received: Value::Null
            })
        );
        assert_eq!(
            validate_reorder(&json!({"sets": "a,b"})),
            Err(Error::NotAnArray {
                received: json!("a,b")
            })
        );
        assert!(matches!(
            validate_reorder(&json!([{"id": "a", "order": 0}])),
            Err(Error::NotAnArray { .. })
        ));
    }

    #[test]
    fn rejects_empty_batch() {
        assert_eq!(
            validate_reorder(&json!({"sets": []})),
            Err(Error::EmptyBatch)
        );
    }

    #[test]
    fn names_entry_with_missing_id() {
        let err = validate_reorder(&json!({
            "sets": [{"id": "a", "order": 0}, {"order": 1}]
        }))
        .unwrap_err();

        assert_eq!(
            err,
            Error::InvalidEntry {
                index: 1,
                field: "id",
                received_value: Value::Null,
                entry: json!({"order": 1}),
            }
        );
    }

    #[test]
    fn rejects_non_string_or_empty_id() {
        for id in [json!(7), json!(""), json!(null)] {
            let err =
                validate_reorder(&json!({"sets": [{"id": id.clone(), "order": 0}]})).unwrap_err();
            assert!(
                matches!(err, Error::InvalidEntry { field: "id", .. }),
                "accepted id {}",
                id
            );
        }
    }

    #[test]
    fn rejects_non_numeric_or_fractional_order() {
        for order in [json!("1"), json!(1.5), json!(null), json!([1])] {
            let entry = json!({"id": "a", "order": order.clone()});
            let err = validate_reorder(&json!({"sets": [entry.clone()]})).unwrap_err();

            assert_eq!(
                err,
                Error::InvalidEntry {
                    index: 0,
                    field: "order",
                    received_value: order,
                    entry,
                }
            );
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = validate_reorder(&json!({
            "sets": [{"id": "a", "order": 0}, {"id": "a", "order": 1}]
        }))
        .unwrap_err();

        assert_eq!(
            err,
            Error::DuplicateId {
                index: 1,
                id: "a".into(),
                entry: json!({"id": "a", "order": 1}),
            }
        );
    }

    #[test]
    fn reports_first_violation_only() {
        let err = validate_reorder(&json!({
            "sets": [{"id": "a"}, {"order": 1}]
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidEntry {
                index: 0,
                field: "order",
                ..
            }
        ));
    }
}
