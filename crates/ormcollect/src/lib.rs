//! ormcollect - result collections for fetched rows.
//!
//! A fetch hands back one of a few shapes: a row set, a single row, or a
//! page of rows wrapped with pagination metadata. [`ResultCollection`]
//! normalizes all of them into one container with keyed access, lazy
//! per-row wrapping into [`RowMapper`]s, and pagination rendering.
//!
//! # Quick Start
//!
//! ```
//! use ormcollect::prelude::*;
//! use serde_json::json;
//!
//! let page = ResultCollection::from_json(
//!     json!({
//!         "data": [{"id": 11, "name": "k"}, {"id": 12, "name": "l"}],
//!         "pagination": {"offset": 10, "total": 57, "perPage": 10}
//!     }),
//!     Operation::Paginate,
//! )
//! .unwrap();
//!
//! for (index, row) in page.mappers().enumerate() {
//!     let number = page.numbers(index as u64);
//!     assert_eq!(row.get("id").and_then(Value::as_i64), Some(number as i64));
//! }
//! assert_eq!(page.showing(&RenderOptions::new()), "Showing 11-20 of 57 results");
//! ```
//!
//! # Origins
//!
//! The operation that produced a payload is passed explicitly as an
//! [`Origin`]. Callers that only have a chain of call names can recover one
//! with [`OriginClassifier`].

pub mod collection;
pub mod item;
pub mod mapper;
pub mod origin;
pub mod pagination;
pub mod payload;

pub use collection::{Iter, ResultCollection};
pub use item::{Element, Entry, ItemKey};
pub use mapper::RowMapper;
pub use origin::{Operation, OperationKind, Origin, OriginClassifier};
pub use pagination::{
    PaginationConfig, PaginationEnvelope, PaginationMeta, RenderOptions, View,
};
pub use payload::Payload;

pub use ormcollect_core::{
    ColumnInfo, Error, FromValue, PayloadErrorKind, Result, Row, Value,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Element, Entry, Error, ItemKey, Operation, Origin, OriginClassifier, PaginationConfig,
        PaginationMeta, Payload, RenderOptions, Result, ResultCollection, Row, RowMapper, Value,
        View,
    };
}
