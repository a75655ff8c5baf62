//! Keys and entries stored in a collection.

use std::fmt;

use ormcollect_core::{Row, Value};

use crate::mapper::RowMapper;

/// Position or name of an entry in a collection.
///
/// Row sets are keyed by position, single-row collections by column name.
/// Names made only of decimal digits without a leading zero normalize to
/// positions, so `"3"` and `3` address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Index(usize),
    Name(String),
}

impl ItemKey {
    pub fn as_index(&self) -> Option<usize> {
        match self {
            ItemKey::Index(i) => Some(*i),
            ItemKey::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            ItemKey::Name(name) => Some(name),
            ItemKey::Index(_) => None,
        }
    }

    fn parse_index(name: &str) -> Option<usize> {
        let canonical = name == "0" || (!name.starts_with('0') && !name.is_empty());
        if canonical && name.bytes().all(|b| b.is_ascii_digit()) {
            name.parse().ok()
        } else {
            None
        }
    }
}

impl From<usize> for ItemKey {
    fn from(index: usize) -> Self {
        ItemKey::Index(index)
    }
}

impl From<&str> for ItemKey {
    fn from(name: &str) -> Self {
        Self::parse_index(name).map_or_else(|| ItemKey::Name(name.to_string()), ItemKey::Index)
    }
}

impl From<String> for ItemKey {
    fn from(name: String) -> Self {
        match Self::parse_index(&name) {
            Some(index) => ItemKey::Index(index),
            None => ItemKey::Name(name),
        }
    }
}

impl From<&ItemKey> for ItemKey {
    fn from(key: &ItemKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Index(i) => write!(f, "{}", i),
            ItemKey::Name(name) => f.write_str(name),
        }
    }
}

/// An owned collection entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Row(Row),
    Value(Value),
}

impl Entry {
    pub fn as_row(&self) -> Option<&Row> {
        match self {
            Entry::Row(row) => Some(row),
            Entry::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Row(_) => None,
        }
    }

    /// Wrap this entry for reading at `key`.
    pub fn element<'a>(&'a self, key: &ItemKey) -> Element<'a> {
        match self {
            Entry::Row(row) => Element::Row(RowMapper::new(row, key.clone())),
            Entry::Value(value) => Element::Value(value),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Entry::Row(row) => row.to_json(),
            Entry::Value(value) => value.to_json(),
        }
    }
}

impl From<Row> for Entry {
    fn from(row: Row) -> Self {
        Entry::Row(row)
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Entry::Value(value)
    }
}

/// A borrowed, resolved entry: rows come back wrapped in a [`RowMapper`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element<'a> {
    Row(RowMapper<'a>),
    Value(&'a Value),
}

impl<'a> Element<'a> {
    pub fn as_row(&self) -> Option<&RowMapper<'a>> {
        match self {
            Element::Row(mapper) => Some(mapper),
            Element::Value(_) => None,
        }
    }

    pub fn into_row(self) -> Option<RowMapper<'a>> {
        match self {
            Element::Row(mapper) => Some(mapper),
            Element::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Element::Value(value) => Some(value),
            Element::Row(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Element::Row(mapper) => mapper.to_json(),
            Element::Value(value) => value.to_json(),
        }
    }
}
