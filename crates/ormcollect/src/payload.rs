//! Raw fetch results before they are shaped into a collection.

use ormcollect_core::{Error, PayloadErrorKind, Result, Row};

use crate::origin::Origin;
use crate::pagination::PaginationMeta;

/// Result of a fetch as handed over by the query layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No rows
    #[default]
    Empty,
    /// Ordered row set
    Rows(Vec<Row>),
    /// One row
    Row(Row),
    /// `{data, pagination}` envelope from a paginated fetch; either half may
    /// be missing
    Envelope {
        data: Option<Vec<Row>>,
        pagination: Option<PaginationMeta>,
    },
}

impl Payload {
    /// Envelope with both halves present.
    pub fn paginated(data: Vec<Row>, pagination: PaginationMeta) -> Self {
        Payload::Envelope {
            data: Some(data),
            pagination: Some(pagination),
        }
    }

    /// Decode a JSON fetch result produced for `origin`.
    ///
    /// `null` and `[]` are empty and arrays hold rows. An object is a
    /// `{data, pagination}` envelope under the paginate origin and a single
    /// row under every other origin, whatever its column names.
    #[allow(clippy::result_large_err)]
    pub fn from_json(json: serde_json::Value, origin: Origin) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Payload::Empty),
            serde_json::Value::Array(items) if items.is_empty() => Ok(Payload::Empty),
            serde_json::Value::Array(items) => rows_from_json(items).map(Payload::Rows),
            serde_json::Value::Object(object) if origin.is_paginate() => envelope_from_json(object),
            serde_json::Value::Object(object) => Ok(Payload::Row(Row::from_json_object(object))),
            other => Err(Error::payload(
                PayloadErrorKind::InvalidRow,
                format!("expected rows or a row, found {}", other),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Empty => true,
            Payload::Rows(rows) => rows.is_empty(),
            Payload::Row(_) => false,
            Payload::Envelope { data, .. } => data.as_ref().is_none_or(Vec::is_empty),
        }
    }
}

#[allow(clippy::result_large_err)]
fn envelope_from_json(mut object: serde_json::Map<String, serde_json::Value>) -> Result<Payload> {
    let data = match object.remove("data") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Array(items)) => Some(rows_from_json(items)?),
        Some(_) => {
            return Err(Error::payload(
                PayloadErrorKind::MalformedEnvelope,
                "`data` must be an array of rows",
            ));
        }
    };
    let pagination = match object.remove("pagination") {
        None | Some(serde_json::Value::Null | serde_json::Value::Bool(false)) => None,
        Some(meta) => Some(PaginationMeta::from_json(meta)?),
    };
    Ok(Payload::Envelope { data, pagination })
}

#[allow(clippy::result_large_err)]
fn rows_from_json(items: Vec<serde_json::Value>) -> Result<Vec<Row>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Row::from_json(item).map_err(|e| match e {
                Error::Payload(mut p) => {
                    p.message = format!("row {}: {}", index, p.message);
                    Error::Payload(p)
                }
                other => other,
            })
        })
        .collect()
}

impl From<Vec<Row>> for Payload {
    fn from(rows: Vec<Row>) -> Self {
        if rows.is_empty() {
            Payload::Empty
        } else {
            Payload::Rows(rows)
        }
    }
}

impl From<Row> for Payload {
    fn from(row: Row) -> Self {
        Payload::Row(row)
    }
}

impl From<Option<Row>> for Payload {
    fn from(row: Option<Row>) -> Self {
        row.map_or(Payload::Empty, Payload::Row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::Operation;
    use ormcollect_core::Value;
    use serde_json::json;

    const PAGINATE: Origin = Origin::new(Operation::Paginate);

    #[test]
    fn decodes_shapes() {
        assert_eq!(Payload::from_json(json!(null), Operation::Get.into()).unwrap(), Payload::Empty);
        assert_eq!(Payload::from_json(json!([]), Operation::Get.into()).unwrap(), Payload::Empty);

        let rows = Payload::from_json(json!([{"id": 1}, {"id": 2}]), Operation::Get.into()).unwrap();
        match rows {
            Payload::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1].get_by_name("id"), Some(&Value::BigInt(2)));
            }
            other => panic!("unexpected payload: {other:?}"),
        }

        let row = Payload::from_json(json!({"id": 42}), Operation::First.into()).unwrap();
        assert_eq!(row, Payload::Row(Row::from_pairs([("id", 42i64)])));
    }

    #[test]
    fn decodes_envelopes() {
        let full = Payload::from_json(json!({
            "data": [{"id": 1}],
            "pagination": {"offset": 0, "total": 10, "perPage": 1}
        }), PAGINATE)
        .unwrap();
        assert_eq!(
            full,
            Payload::paginated(
                vec![Row::from_pairs([("id", 1i64)])],
                PaginationMeta::new(0, 10, 1)
            )
        );

        let no_meta = Payload::from_json(json!({"data": [], "pagination": false}), PAGINATE).unwrap();
        assert_eq!(
            no_meta,
            Payload::Envelope {
                data: Some(Vec::new()),
                pagination: None
            }
        );

        let no_data = Payload::from_json(json!({"pagination": {"total": 3, "perPage": 1}}), PAGINATE).unwrap();
        assert!(matches!(no_data, Payload::Envelope { data: None, pagination: Some(_) }));
        assert!(no_data.is_empty());
    }

    #[test]
    fn rejects_malformed_input() {
        let err = Payload::from_json(json!([{"id": 1}, 7]), PAGINATE).unwrap_err();
        assert_eq!(err.payload_kind(), Some(PayloadErrorKind::InvalidRow));
        assert!(err.to_string().contains("row 1"));

        let err = Payload::from_json(json!({"data": "rows"}), PAGINATE).unwrap_err();
        assert!(err.is_malformed_envelope());

        let err = Payload::from_json(json!({"data": [], "pagination": {"total": "many"}}), PAGINATE).unwrap_err();
        assert_eq!(err.payload_kind(), Some(PayloadErrorKind::InvalidPagination));

        assert!(Payload::from_json(json!(3), Origin::unknown()).is_err());
    }

    #[test]
    fn columns_named_like_envelope_keys_stay_columns() {
        let row = Payload::from_json(json!({"id": 7, "data": null}), Operation::First.into()).unwrap();
        assert_eq!(
            row,
            Payload::Row(Row::from_pairs([("id", Value::BigInt(7)), ("data", Value::Null)]))
        );

        let row = Payload::from_json(json!({"id": 7, "data": "blob"}), Operation::Find.into()).unwrap();
        match row {
            Payload::Row(row) => assert_eq!(row.get_by_name("data"), Some(&Value::Text("blob".into()))),
            other => panic!("unexpected payload: {other:?}"),
        }

        let row = Payload::from_json(json!({"id": 1, "pagination": 3}), Operation::Find.into()).unwrap();
        assert!(matches!(row, Payload::Row(ref r) if r.get_by_name("pagination") == Some(&Value::BigInt(3))));

        // The same object is an envelope only when paginating.
        let err = Payload::from_json(json!({"id": 1, "pagination": 3}), PAGINATE).unwrap_err();
        assert_eq!(err.payload_kind(), Some(PayloadErrorKind::InvalidPagination));
    }

    #[test]
    fn conversions() {
        assert_eq!(Payload::from(Vec::<Row>::new()), Payload::Empty);
        assert_eq!(Payload::from(None::<Row>), Payload::Empty);
        assert!(!Payload::from(Row::from_pairs([("a", 1i64)])).is_empty());
    }
}
