use ipm_fs::{FileKind, NormalizedPath};
use ipm_rules::FileRecord;
use ipm_store::ObjectId;

/// Arena key of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One vertex of an IPM tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// File-system metadata and detected format
    pub record: FileRecord,
    /// Assigned node type, `None` until assignment
    pub node_type: Option<String>,
    /// Excluded from assignment, validation and packaging
    pub ignored: bool,
    /// Domain object mirroring this node, set once typed
    pub object_id: Option<ObjectId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(record: FileRecord, parent: Option<NodeId>) -> Self {
        Self {
            record,
            node_type: None,
            ignored: false,
            object_id: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.record.metadata.path
    }

    pub fn name(&self) -> &str {
        self.record.metadata.name()
    }

    pub fn kind(&self) -> FileKind {
        self.record.metadata.kind
    }

    pub fn is_dir(&self) -> bool {
        self.record.metadata.is_dir()
    }

    pub fn is_typed(&self) -> bool {
        self.node_type.is_some()
    }

    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in name order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
