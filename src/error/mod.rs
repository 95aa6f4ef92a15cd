//! Error types for validation failures.
//!
//! This module provides the error record produced by rules and schemas, the
//! non-empty accumulation used by the [`Validation`](stillwater::Validation)
//! API, and the failure raised by `check`.

mod rule_error;

pub use rule_error::{CheckError, RuleError, SchemaErrors, DEFAULT_STATUS};
