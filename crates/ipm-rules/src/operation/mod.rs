//! Operation definitions
//!
//! Operations are plain data; [`crate::Evaluator`] gives them meaning. In
//! rule documents each operation is a table tagged by `op`:
//!
//! ```toml
//! op = "count"
//! min = 3
//! max = 3
//! operands = [{ op = "children", filters = [{ op = "match", pattern = "File", values = [{ op = "file-metadata", attribute = "type" }] }] }]
//! ```

mod file;
mod test;
mod value;

use ipm_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

pub use file::FileOperation;
pub use test::{MatchType, TestOperation};
pub use value::{FileAttribute, ValueOperation};

/// An operation of any kind, as accepted by `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operation {
    File(FileOperation),
    Test(TestOperation),
    Value(ValueOperation),
}

impl From<FileOperation> for Operation {
    fn from(op: FileOperation) -> Self {
        Self::File(op)
    }
}

impl From<TestOperation> for Operation {
    fn from(op: TestOperation) -> Self {
        Self::Test(op)
    }
}

impl From<ValueOperation> for Operation {
    fn from(op: ValueOperation) -> Self {
        Self::Value(op)
    }
}

/// Output of an operation of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutput {
    Files(Vec<NormalizedPath>),
    Booleans(Vec<bool>),
    Values(Vec<String>),
}

impl OpOutput {
    /// Cardinality of the result list.
    pub fn len(&self) -> usize {
        match self {
            Self::Files(files) => files.len(),
            Self::Booleans(values) => values.len(),
            Self::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
