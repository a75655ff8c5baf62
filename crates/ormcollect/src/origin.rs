//! Which fetch operation produced a result payload.
//!
//! A collection shapes its payload differently depending on the operation
//! that produced it: `first`-style and `insert`-style fetches yield a single
//! row, `paginate` yields a `{data, pagination}` envelope, and everything
//! else yields a row set. The producing operation travels with the payload
//! as an explicit [`Origin`] value.
//!
//! [`OriginClassifier`] recovers an origin from a chain of call names for
//! callers that only know how they were reached (for example a builder
//! that records the chain of methods invoked on it).

use std::fmt;
use std::str::FromStr;

use ormcollect_core::Error;

/// Fetch and write operations known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    First,
    FirstOrIgnore,
    FirstOrCreate,
    FirstOrFail,
    Find,
    FindOrFail,
    Insert,
    InsertOrIgnore,
    Update,
    Delete,
    Get,
    All,
    Count,
    Paginate,
}

/// How an operation's payload is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// A single row (or nothing)
    FirstRow,
    /// The row that was written
    Insert,
    /// A `{data, pagination}` envelope
    Paginate,
    /// An ordered row set
    Rows,
}

impl Operation {
    /// Every registered operation, in registry order.
    pub const ALL: [Operation; 14] = [
        Operation::First,
        Operation::FirstOrIgnore,
        Operation::FirstOrCreate,
        Operation::FirstOrFail,
        Operation::Find,
        Operation::FindOrFail,
        Operation::Insert,
        Operation::InsertOrIgnore,
        Operation::Update,
        Operation::Delete,
        Operation::Get,
        Operation::All,
        Operation::Count,
        Operation::Paginate,
    ];

    /// Lowercase registry name.
    pub const fn name(self) -> &'static str {
        match self {
            Operation::First => "first",
            Operation::FirstOrIgnore => "firstorignore",
            Operation::FirstOrCreate => "firstorcreate",
            Operation::FirstOrFail => "firstorfail",
            Operation::Find => "find",
            Operation::FindOrFail => "findorfail",
            Operation::Insert => "insert",
            Operation::InsertOrIgnore => "insertorignore",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Get => "get",
            Operation::All => "all",
            Operation::Count => "count",
            Operation::Paginate => "paginate",
        }
    }

    /// Look up an operation by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }

    pub const fn kind(self) -> OperationKind {
        match self {
            Operation::First
            | Operation::FirstOrIgnore
            | Operation::FirstOrCreate
            | Operation::FirstOrFail
            | Operation::Find
            | Operation::FindOrFail => OperationKind::FirstRow,
            Operation::Insert | Operation::InsertOrIgnore => OperationKind::Insert,
            Operation::Paginate => OperationKind::Paginate,
            Operation::Update
            | Operation::Delete
            | Operation::Get
            | Operation::All
            | Operation::Count => OperationKind::Rows,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::Custom(format!("unknown operation '{}'", s)))
    }
}

/// The operation a payload came from, carried into collection construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    operation: Option<Operation>,
    is_paginate: bool,
}

impl Origin {
    /// Origin for a known operation.
    pub const fn new(operation: Operation) -> Self {
        Self {
            operation: Some(operation),
            is_paginate: matches!(operation.kind(), OperationKind::Paginate),
        }
    }

    /// No known operation: the payload is treated as a plain row set.
    pub const fn unknown() -> Self {
        Self {
            operation: None,
            is_paginate: false,
        }
    }

    pub const fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Payload shape implied by this origin.
    pub const fn kind(&self) -> OperationKind {
        match self.operation {
            Some(op) => op.kind(),
            None => OperationKind::Rows,
        }
    }

    /// First-row or insert origins collapse the payload to one row.
    pub const fn is_single_row(&self) -> bool {
        matches!(self.kind(), OperationKind::FirstRow | OperationKind::Insert)
    }

    pub const fn is_paginate(&self) -> bool {
        self.is_paginate
    }
}

impl From<Operation> for Origin {
    fn from(op: Operation) -> Self {
        Self::new(op)
    }
}

impl From<Option<Operation>> for Origin {
    fn from(op: Option<Operation>) -> Self {
        op.map_or_else(Self::unknown, Self::new)
    }
}

/// Classifies a chain of call names against the operation registry.
#[derive(Debug, Clone)]
pub struct OriginClassifier {
    registry: Vec<Operation>,
}

impl Default for OriginClassifier {
    fn default() -> Self {
        Self {
            registry: Operation::ALL.to_vec(),
        }
    }
}

impl OriginClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the registry to `operations`.
    pub fn with_operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.registry = operations.into_iter().collect();
        self
    }

    pub fn registry(&self) -> &[Operation] {
        &self.registry
    }

    /// Find the first frame, most recent first, whose name is a registered
    /// operation.
    ///
    /// Frame names are compared case-insensitively. Frames that name no
    /// registered operation are skipped; a chain with no match is
    /// `Origin::unknown()`.
    #[tracing::instrument(level = "trace", skip(self, frames))]
    pub fn classify<I, S>(&self, frames: I) -> Origin
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matched = frames.into_iter().find_map(|frame| {
            Operation::from_name(frame.as_ref()).filter(|op| self.registry.contains(op))
        });
        tracing::trace!(operation = ?matched, "Classified call origin");
        Origin::from(matched)
    }
}
