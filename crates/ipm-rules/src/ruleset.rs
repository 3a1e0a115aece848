//! Rule sets binding operations to node and property types
//!
//! ```toml
//! [[type_rules]]
//! node_type = "Folder"
//! when = { op = "match", pattern = "Directory", values = [{ op = "file-metadata", attribute = "type" }] }
//!
//! [[property_rules]]
//! property = "created"
//! node_type = "Item"
//! value = { op = "file-metadata", attribute = "modified" }
//! ```

use ipm_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Evaluator, FileContext, Result, TestOperation, ValueOperation};

/// A node type is only a candidate when one of its rules holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRule {
    pub node_type: String,
    pub when: TestOperation,
}

/// Values derived for a property of newly typed nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRule {
    pub property: String,
    /// Restricts the rule to one node type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub value: ValueOperation,
}

impl PropertyRule {
    pub fn new(property: impl Into<String>, value: ValueOperation) -> Self {
        Self {
            property: property.into(),
            node_type: None,
            value,
        }
    }

    pub fn for_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    fn applies_to(&self, node_type: &str) -> bool {
        self.node_type.as_deref().is_none_or(|t| t == node_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub type_rules: Vec<TypeRule>,
    #[serde(default)]
    pub property_rules: Vec<PropertyRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rule set from a TOML, JSON or YAML document.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let rules: RuleSet = ConfigStore::new().load(path)?;
        tracing::debug!(
            path = %path,
            type_rules = rules.type_rules.len(),
            property_rules = rules.property_rules.len(),
            "loaded rule set"
        );
        Ok(rules)
    }

    pub fn with_type_rule(mut self, node_type: impl Into<String>, when: TestOperation) -> Self {
        self.type_rules.push(TypeRule {
            node_type: node_type.into(),
            when,
        });
        self
    }

    pub fn with_property_rule(mut self, rule: PropertyRule) -> Self {
        self.property_rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.type_rules.is_empty() && self.property_rules.is_empty()
    }

    pub fn has_type_rules(&self, node_type: &str) -> bool {
        self.type_rules.iter().any(|r| r.node_type == node_type)
    }

    /// Whether `node_type` may be assigned to the entry in `ctx`.
    ///
    /// Types without rules are always admitted.
    pub fn admits_type(
        &self,
        evaluator: &Evaluator<'_>,
        ctx: &FileContext,
        node_type: &str,
    ) -> Result<bool> {
        let mut constrained = false;
        for rule in self.type_rules.iter().filter(|r| r.node_type == node_type) {
            constrained = true;
            if evaluator.holds(&rule.when, ctx)? {
                return Ok(true);
            }
        }
        Ok(!constrained)
    }

    /// `(property, value)` pairs derived for an entry of `node_type`, in
    /// rule order.
    pub fn derive_properties(
        &self,
        evaluator: &Evaluator<'_>,
        ctx: &FileContext,
        node_type: &str,
    ) -> Result<Vec<(String, String)>> {
        let mut derived = Vec::new();
        for rule in self.property_rules.iter().filter(|r| r.applies_to(node_type)) {
            for value in evaluator.eval_value(&rule.value, ctx)? {
                derived.push((rule.property.clone(), value));
            }
        }
        Ok(derived)
    }
}
