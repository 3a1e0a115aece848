//! Consistency checks for profiles
//!
//! Catches dangling references and impossible constraints before a
//! profile is used for type assignment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ProfileCatalog;

/// Severity of a profile issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Warning,
    Error,
}

impl std::fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileIssue {
    pub level: IssueLevel,
    /// Profile the issue was found in
    pub profile: String,
    pub message: String,
}

impl ProfileIssue {
    fn error(profile: &str, message: String) -> Self {
        Self {
            level: IssueLevel::Error,
            profile: profile.to_string(),
            message,
        }
    }

    fn warning(profile: &str, message: String) -> Self {
        Self {
            level: IssueLevel::Warning,
            profile: profile.to_string(),
            message,
        }
    }
}

/// Check every profile of the catalog; references may cross profiles.
pub fn validate_catalog(catalog: &ProfileCatalog) -> Vec<ProfileIssue> {
    let mut issues = Vec::new();

    if catalog.root_types().next().is_none() {
        issues.push(ProfileIssue::error(
            catalog.primary().id(),
            "No node type may root a tree.".to_string(),
        ));
    }

    for profile in catalog.profiles() {
        let id = profile.id();

        let mut seen = HashSet::new();
        for node_type in &profile.node_types {
            if !seen.insert(node_type.name.as_str()) {
                issues.push(ProfileIssue::error(
                    id,
                    format!("Duplicate node type '{}'.", node_type.name),
                ));
            }

            for child in &node_type.children {
                if catalog.node_type(child).is_none() {
                    issues.push(ProfileIssue::error(
                        id,
                        format!("Node type '{}' allows unknown child '{}'.", node_type.name, child),
                    ));
                }
            }
            for parent in &node_type.parents {
                if catalog.node_type(parent).is_none() {
                    issues.push(ProfileIssue::error(
                        id,
                        format!("Node type '{}' allows unknown parent '{}'.", node_type.name, parent),
                    ));
                }
            }

            let mut constrained = HashSet::new();
            for constraint in &node_type.properties {
                if catalog.property_type(&constraint.property).is_none() {
                    issues.push(ProfileIssue::error(
                        id,
                        format!(
                            "Node type '{}' constrains unknown property '{}'.",
                            node_type.name, constraint.property
                        ),
                    ));
                }
                if constraint.max.is_some_and(|max| max < constraint.min) {
                    issues.push(ProfileIssue::error(
                        id,
                        format!(
                            "Property '{}' on '{}' has min {} above max.",
                            constraint.property, node_type.name, constraint.min
                        ),
                    ));
                }
                if !constrained.insert(constraint.property.as_str()) {
                    issues.push(ProfileIssue::warning(
                        id,
                        format!(
                            "Property '{}' constrained twice on '{}'; the first wins.",
                            constraint.property, node_type.name
                        ),
                    ));
                }
            }
        }

        let mut seen_props = HashSet::new();
        for property in &profile.property_types {
            if !seen_props.insert(property.name.as_str()) {
                issues.push(ProfileIssue::error(
                    id,
                    format!("Duplicate property type '{}'.", property.name),
                ));
            }
            for member in &property.members {
                if catalog.property_type(member).is_none() {
                    issues.push(ProfileIssue::error(
                        id,
                        format!("Group '{}' has unknown member '{}'.", property.name, member),
                    ));
                }
            }
        }

        for transform in &profile.transforms {
            for end in [&transform.source, &transform.target] {
                if catalog.node_type(end).is_none() {
                    issues.push(ProfileIssue::error(
                        id,
                        format!("Transform {} names unknown node type '{}'.", transform, end),
                    ));
                }
            }
            if transform.source == transform.target {
                issues.push(ProfileIssue::warning(
                    id,
                    format!("Transform {} does not change the type.", transform),
                ));
            }
            for property in transform.property_map.keys().chain(transform.property_map.values()) {
                if catalog.property_type(property).is_none() {
                    issues.push(ProfileIssue::warning(
                        id,
                        format!("Transform {} maps unknown property '{}'.", transform, property),
                    ));
                }
            }
        }
    }

    issues
}
