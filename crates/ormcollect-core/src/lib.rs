//! Core types for ormcollect.
//!
//! This crate provides the value-level building blocks that result
//! collections are made of:
//!
//! - `Value` for dynamically typed column values
//! - `Row` for an ordered column-name to value mapping
//! - `Error` and `Result` shared by every ormcollect crate

pub mod error;
pub mod row;
pub mod value;

pub use error::{ConfigError, Error, PayloadError, PayloadErrorKind, Result, TypeError};
pub use row::{ColumnInfo, FromValue, Row};
pub use value::Value;
