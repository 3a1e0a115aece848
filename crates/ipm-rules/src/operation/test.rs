use serde::{Deserialize, Serialize};

use super::{Operation, ValueOperation};
use crate::Param;

/// How `match` compares values against its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchType {
    #[default]
    Exact,
    /// The whole value must match the regular expression
    Regex,
}

impl std::str::FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" | "literal" | "equals" => Ok(Self::Exact),
            "regex" | "regexp" | "pattern" => Ok(Self::Regex),
            other => Err(format!("unknown match type '{}'", other)),
        }
    }
}

/// Produces one or more truth values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum TestOperation {
    /// Single value: every operand value is true
    And { operands: Vec<TestOperation> },
    /// Single value: some operand value is true
    Or { operands: Vec<TestOperation> },
    /// Every operand value negated
    Not { operands: Vec<TestOperation> },
    /// One value per compared string
    Match {
        /// `exact` (default) or `regex`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        match_type: Option<Param>,
        pattern: Param,
        /// Defaults to the context entry's name when empty
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        values: Vec<ValueOperation>,
    },
    /// Single value: total cardinality of operands within `[min, max]`
    Count {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Param>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Param>,
        operands: Vec<Operation>,
    },
}

impl TestOperation {
    pub fn and(operands: Vec<TestOperation>) -> Self {
        Self::And { operands }
    }

    pub fn or(operands: Vec<TestOperation>) -> Self {
        Self::Or { operands }
    }

    pub fn not(operand: TestOperation) -> Self {
        Self::Not {
            operands: vec![operand],
        }
    }

    /// Exact match of `values` against `pattern`.
    pub fn equals(pattern: impl Into<String>, values: Vec<ValueOperation>) -> Self {
        Self::Match {
            match_type: None,
            pattern: Param::literal(pattern),
            values,
        }
    }

    /// Regular-expression match of `values` against `pattern`.
    pub fn matches(pattern: impl Into<String>, values: Vec<ValueOperation>) -> Self {
        Self::Match {
            match_type: Some(Param::literal("regex")),
            pattern: Param::literal(pattern),
            values,
        }
    }

    pub fn count(min: Option<u64>, max: Option<u64>, operands: Vec<Operation>) -> Self {
        Self::Count {
            min: min.map(Param::from),
            max: max.map(Param::from),
            operands,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::And { .. } => "and",
            Self::Or { .. } => "or",
            Self::Not { .. } => "not",
            Self::Match { .. } => "match",
            Self::Count { .. } => "count",
        }
    }
}
