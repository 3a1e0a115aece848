//! Operation parameters
//!
//! A parameter is either a literal string or the first value produced by a
//! nested [`ValueOperation`]. In a rule document a parameter may be written
//! as a bare string or number, or as a table:
//!
//! ```toml
//! pattern = "^IMG_"                                  # literal
//! pattern = { from = { op = "system-property", name = "pattern" } }
//! pattern = { value = "^IMG_", from = { ... } }       # literal wins
//! ```

use serde::{Deserialize, Serialize};

use crate::ValueOperation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParamRepr", into = "ParamRepr")]
pub enum Param {
    Literal(String),
    Computed(Box<ValueOperation>),
}

impl Param {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn computed(op: ValueOperation) -> Self {
        Self::Computed(Box::new(op))
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Self::literal(value.to_string())
    }
}

/// On-disk shape of a parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ParamRepr {
    Plain(String),
    Integer(i64),
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<Box<ValueOperation>>,
    },
}

impl TryFrom<ParamRepr> for Param {
    type Error = String;

    fn try_from(repr: ParamRepr) -> Result<Self, Self::Error> {
        match repr {
            ParamRepr::Plain(value) => Ok(Self::Literal(value)),
            ParamRepr::Integer(value) => Ok(Self::Literal(value.to_string())),
            ParamRepr::Table {
                value: Some(value), ..
            } => Ok(Self::Literal(value)),
            ParamRepr::Table {
                value: None,
                from: Some(op),
            } => Ok(Self::Computed(op)),
            ParamRepr::Table {
                value: None,
                from: None,
            } => Err("parameter needs a `value` or a `from` operation".to_string()),
        }
    }
}

impl From<Param> for ParamRepr {
    fn from(param: Param) -> Self {
        match param {
            Param::Literal(value) => ParamRepr::Plain(value),
            Param::Computed(op) => ParamRepr::Table {
                value: None,
                from: Some(op),
            },
        }
    }
}
