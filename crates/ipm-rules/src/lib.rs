//! Rule evaluation engine
//!
//! A small interpreter of composable operations evaluated against a single
//! file in its tree context ([`FileContext`]):
//!
//! - [`FileOperation`] selects entries (`self`, `parent`, `children`,
//!   `ancestors`), optionally filtered by tests
//! - [`TestOperation`] produces truth values (`and`, `or`, `not`, `match`,
//!   `count`)
//! - [`ValueOperation`] produces strings (`literal`, `system-property`,
//!   `file-metadata`)
//!
//! Every operation is a pure function of its context to an ordered,
//! possibly empty list of results. A [`RuleSet`] binds tests to node types
//! and values to property types so the results feed type and property
//! assignment.

pub mod context;
pub mod error;
pub mod evaluator;
pub mod operation;
pub mod param;
pub mod record;
pub mod ruleset;

pub use context::FileContext;
pub use error::{Error, Result};
pub use evaluator::Evaluator;
pub use operation::{
    FileAttribute, FileOperation, MatchType, OpOutput, Operation, TestOperation, ValueOperation,
};
pub use param::Param;
pub use record::FileRecord;
pub use ruleset::{PropertyRule, RuleSet, TypeRule};
