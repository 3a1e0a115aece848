use serde::{Deserialize, Serialize};

use super::TestOperation;

/// Selects file-system entries relative to the context entry.
///
/// Entries are kept only when every filter yields all-true for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum FileOperation {
    /// The context entry itself
    #[serde(rename = "self")]
    Current {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<TestOperation>,
    },
    /// The containing directory; none for the tree root
    Parent {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<TestOperation>,
    },
    /// Direct children, sorted by name
    Children {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<TestOperation>,
    },
    /// Parent, grandparent, ... up to and including the tree root
    Ancestors {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<TestOperation>,
    },
}

impl FileOperation {
    pub fn current() -> Self {
        Self::Current {
            filters: Vec::new(),
        }
    }

    pub fn parent() -> Self {
        Self::Parent {
            filters: Vec::new(),
        }
    }

    pub fn children() -> Self {
        Self::Children {
            filters: Vec::new(),
        }
    }

    pub fn ancestors() -> Self {
        Self::Ancestors {
            filters: Vec::new(),
        }
    }

    pub fn filtered(mut self, filter: TestOperation) -> Self {
        match &mut self {
            Self::Current { filters }
            | Self::Parent { filters }
            | Self::Children { filters }
            | Self::Ancestors { filters } => filters.push(filter),
        }
        self
    }

    pub fn filters(&self) -> &[TestOperation] {
        match self {
            Self::Current { filters }
            | Self::Parent { filters }
            | Self::Children { filters }
            | Self::Ancestors { filters } => filters,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Current { .. } => "self",
            Self::Parent { .. } => "parent",
            Self::Children { .. } => "children",
            Self::Ancestors { .. } => "ancestors",
        }
    }
}
