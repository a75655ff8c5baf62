//! Read-only per-row view handed out during iteration.

use ormcollect_core::{FromValue, Result, Row, Value};

use crate::item::ItemKey;

/// A view over one row of a collection plus the key it is stored under.
///
/// Mappers are created on demand each time a row is read; they hold no
/// state of their own beyond the borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMapper<'a> {
    row: &'a Row,
    key: ItemKey,
}

impl<'a> RowMapper<'a> {
    pub fn new(row: &'a Row, key: ItemKey) -> Self {
        Self { row, key }
    }

    /// Key of this row in its collection.
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    /// Value of `column`, or `None` when the row has no such column.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.row.get_by_name(column)
    }

    /// Typed value of `column`.
    #[allow(clippy::result_large_err)]
    pub fn get_as<T: FromValue>(&self, column: &str) -> Result<T> {
        self.row.get_named(column)
    }

    pub fn has(&self, column: &str) -> bool {
        self.row.contains_column(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'a str> {
        self.row.column_names()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.row.iter()
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.row.to_json()
    }
}
