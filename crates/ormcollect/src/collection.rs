//! The result collection: a fetch result shaped for uniform access.
//!
//! A [`ResultCollection`] is built once per fetch from a [`Payload`] and the
//! [`Origin`] of the operation that produced it. The origin decides the
//! shape of the stored entries:
//!
//! - first-row and insert origins store one row as column-keyed values, so
//!   `get("name")` reads a column directly;
//! - the paginate origin unwraps a `{data, pagination}` envelope into
//!   position-keyed rows plus a [`PaginationEnvelope`];
//! - everything else stores position-keyed rows.
//!
//! Reads never fail. Missing keys resolve to `None`, and a malformed
//! pagination envelope leaves the collection empty with a warning logged.
//! [`ResultCollection::try_new`] reports that case as an error instead.

use std::collections::HashMap;

use ormcollect_core::{Error, PayloadErrorKind, Result, Row};

use crate::item::{Element, Entry, ItemKey};
use crate::mapper::RowMapper;
use crate::origin::Origin;
use crate::pagination::{PaginationConfig, PaginationEnvelope, RenderOptions};
use crate::payload::Payload;

/// A normalized, indexable, iterable fetch result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCollection {
    /// Entries in insertion order; keys are unique
    items: Vec<(ItemKey, Entry)>,
    origin: Origin,
    pagination: Option<PaginationEnvelope>,
}

/// Why a paginated payload could not be used as-is.
struct Degraded(&'static str);

impl ResultCollection {
    /// Shape `payload` for `origin` with the default pagination config.
    pub fn new(payload: impl Into<Payload>, origin: impl Into<Origin>) -> Self {
        Self::with_config(payload, origin, PaginationConfig::default())
    }

    /// Shape `payload` for `origin`, rendering pagination with `config`.
    ///
    /// A paginate origin whose payload lacks `data` or `pagination` yields
    /// empty items and/or no pagination; the problem is logged, not raised.
    pub fn with_config(
        payload: impl Into<Payload>,
        origin: impl Into<Origin>,
        config: PaginationConfig,
    ) -> Self {
        let origin = origin.into();
        let (collection, degraded) = Self::shape(payload.into(), origin, config);
        if let Some(Degraded(reason)) = degraded {
            tracing::warn!(
                operation = ?origin.operation(),
                reason,
                "Paginated fetch returned a malformed envelope; degrading"
            );
        }
        collection
    }

    /// Like [`with_config`](Self::with_config), but a malformed pagination
    /// envelope is an error.
    #[allow(clippy::result_large_err)]
    pub fn try_new(
        payload: impl Into<Payload>,
        origin: impl Into<Origin>,
        config: PaginationConfig,
    ) -> Result<Self> {
        match Self::shape(payload.into(), origin.into(), config) {
            (collection, None) => Ok(collection),
            (_, Some(Degraded(reason))) => {
                Err(Error::payload(PayloadErrorKind::MalformedEnvelope, reason))
            }
        }
    }

    /// Decode a JSON fetch result and shape it for `origin`.
    #[allow(clippy::result_large_err)]
    pub fn from_json(json: serde_json::Value, origin: impl Into<Origin>) -> Result<Self> {
        let origin = origin.into();
        Ok(Self::new(Payload::from_json(json, origin)?, origin))
    }

    #[tracing::instrument(level = "debug", skip(payload, config))]
    fn shape(
        payload: Payload,
        origin: Origin,
        config: PaginationConfig,
    ) -> (Self, Option<Degraded>) {
        let mut collection = Self {
            items: Vec::new(),
            origin,
            pagination: None,
        };

        if origin.is_single_row() {
            let row = match payload {
                Payload::Row(row) => Some(row),
                Payload::Rows(rows) => {
                    if rows.len() > 1 {
                        tracing::debug!(
                            rows = rows.len(),
                            "Single-row origin received a row set; keeping the first row"
                        );
                    }
                    rows.into_iter().next()
                }
                Payload::Envelope { data, .. } => data.and_then(|rows| rows.into_iter().next()),
                Payload::Empty => None,
            };
            if let Some(row) = row {
                collection.extend_columns(&row);
            }
            return (collection, None);
        }

        if origin.is_paginate() {
            let (data, pagination) = match payload {
                Payload::Envelope { data, pagination } => (data, pagination),
                Payload::Empty => (None, None),
                Payload::Rows(_) | Payload::Row(_) => {
                    return (collection, Some(Degraded("payload is not a pagination envelope")));
                }
            };
            let degraded = match (&data, &pagination) {
                (Some(_), Some(_)) => None,
                (None, Some(_)) => Some(Degraded("envelope has no `data` key")),
                (Some(_), None) => Some(Degraded("envelope has no `pagination` key")),
                (None, None) => Some(Degraded("envelope has neither `data` nor `pagination`")),
            };
            collection.extend_rows(data.unwrap_or_default());
            collection.pagination = pagination.map(|meta| PaginationEnvelope::new(meta, config));
            return (collection, degraded);
        }

        match payload {
            Payload::Rows(rows) => collection.extend_rows(rows),
            Payload::Row(row) => collection.extend_rows(vec![row]),
            Payload::Envelope { data, pagination } => {
                if pagination.is_some() {
                    tracing::debug!("Dropping pagination metadata from a non-paginated fetch");
                }
                collection.extend_rows(data.unwrap_or_default());
            }
            Payload::Empty => {}
        }
        (collection, None)
    }

    fn extend_rows(&mut self, rows: Vec<Row>) {
        self.items.extend(
            rows.into_iter()
                .enumerate()
                .map(|(index, row)| (ItemKey::Index(index), Entry::Row(row))),
        );
    }

    /// Store each column of `row` as a value keyed by its name. A repeated
    /// name keeps its first position and takes the later value.
    fn extend_columns(&mut self, row: &Row) {
        let mut seen: HashMap<ItemKey, usize> = HashMap::with_capacity(row.len());
        self.items.reserve(row.len());
        for (name, value) in row.iter() {
            let key = ItemKey::from(name);
            let entry = Entry::Value(value.clone());
            match seen.get(&key) {
                Some(&pos) => self.items[pos].1 = entry,
                None => {
                    seen.insert(key.clone(), self.items.len());
                    self.items.push((key, entry));
                }
            }
        }
    }

    fn position(&self, key: &ItemKey) -> Option<usize> {
        self.items.iter().position(|(k, _)| k == key)
    }

    /// The origin this collection was shaped for.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Pagination state, present only for paginated fetches that carried it.
    pub fn pagination(&self) -> Option<&PaginationEnvelope> {
        self.pagination.as_ref()
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `key` is a top-level entry.
    pub fn exists(&self, key: impl Into<ItemKey>) -> bool {
        self.position(&key.into()).is_some()
    }

    /// Alias of [`exists`](Self::exists).
    pub fn has(&self, key: impl Into<ItemKey>) -> bool {
        self.exists(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ItemKey> {
        self.items.iter().map(|(k, _)| k)
    }

    /// Resolve `key`: the entry stored under it, else column `key` of the
    /// row stored at position 0, else `None`.
    pub fn get(&self, key: impl Into<ItemKey>) -> Option<Element<'_>> {
        let key = key.into();
        if let Some((k, entry)) = self.items.iter().find(|(k, _)| *k == key) {
            return Some(entry.element(k));
        }
        let column = key.to_string();
        self.items
            .iter()
            .find(|(k, _)| *k == ItemKey::Index(0))
            .and_then(|(_, entry)| entry.as_row())
            .and_then(|row| row.get_by_name(&column))
            .map(Element::Value)
    }

    /// Indexed read; same resolution as [`get`](Self::get).
    pub fn offset_get(&self, key: impl Into<ItemKey>) -> Option<Element<'_>> {
        self.get(key)
    }

    /// Store `entry` under `key`, overwriting in place or appending.
    pub fn set(&mut self, key: impl Into<ItemKey>, entry: impl Into<Entry>) {
        let key = key.into();
        let entry = entry.into();
        match self.position(&key) {
            Some(pos) => self.items[pos].1 = entry,
            None => self.items.push((key, entry)),
        }
    }

    /// Indexed write; same as [`set`](Self::set).
    pub fn offset_set(&mut self, key: impl Into<ItemKey>, entry: impl Into<Entry>) {
        self.set(key, entry);
    }

    /// Append `entry` after the highest position in use and return its key.
    pub fn push(&mut self, entry: impl Into<Entry>) -> ItemKey {
        let next = self
            .items
            .iter()
            .filter_map(|(k, _)| k.as_index())
            .max()
            .map_or(0, |max| max + 1);
        let key = ItemKey::Index(next);
        self.items.push((key.clone(), entry.into()));
        key
    }

    /// Remove the entry under `key`. Remaining keys are not renumbered.
    pub fn offset_unset(&mut self, key: impl Into<ItemKey>) -> Option<Entry> {
        let pos = self.position(&key.into())?;
        Some(self.items.remove(pos).1)
    }

    /// First entry in iteration order.
    pub fn first(&self) -> Option<Element<'_>> {
        self.items.first().map(|(k, entry)| entry.element(k))
    }

    /// Iterate entries in order, wrapping rows as they are reached.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.items.iter(),
        }
    }

    /// Iterate only the row entries.
    pub fn mappers(&self) -> impl Iterator<Item = RowMapper<'_>> {
        self.iter().filter_map(Element::into_row)
    }

    /// Navigation links; empty without pagination state.
    pub fn links(&self, options: &RenderOptions) -> String {
        self.pagination
            .as_ref()
            .map(|p| p.links(options))
            .unwrap_or_default()
    }

    /// "Showing X-Y of T" summary; empty without pagination state.
    pub fn showing(&self, options: &RenderOptions) -> String {
        self.pagination
            .as_ref()
            .map(|p| p.showing(options))
            .unwrap_or_default()
    }

    /// Absolute 1-based row number for zero-based `key` on this page.
    ///
    /// Non-paginated collections return `key` unchanged. A paginated fetch
    /// without pagination state counts from offset 0.
    pub fn numbers(&self, key: u64) -> u64 {
        if !self.origin.is_paginate() {
            return key;
        }
        let offset = self.pagination.as_ref().map_or(0, PaginationEnvelope::offset);
        offset.saturating_add(key).saturating_add(1)
    }

    /// JSON form: an object for single-row collections, an array for
    /// position-keyed rows, `{data, pagination}` for paginated fetches.
    pub fn to_json(&self) -> serde_json::Value {
        let contiguous = self
            .items
            .iter()
            .enumerate()
            .all(|(i, (k, _))| *k == ItemKey::Index(i));
        let items = if contiguous && !self.origin.is_single_row() {
            serde_json::Value::Array(self.items.iter().map(|(_, e)| e.to_json()).collect())
        } else {
            serde_json::Value::Object(
                self.items
                    .iter()
                    .map(|(k, e)| (k.to_string(), e.to_json()))
                    .collect(),
            )
        };

        if !self.origin.is_paginate() {
            return items;
        }
        let pagination = self
            .pagination
            .as_ref()
            .and_then(|p| serde_json::to_value(p.meta()).ok())
            .unwrap_or(serde_json::Value::Null);
        serde_json::json!({ "data": items, "pagination": pagination })
    }
}

/// Iterator over a collection's entries.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (ItemKey, Entry)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, entry)| entry.element(k))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, entry)| entry.element(k))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = Element<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
