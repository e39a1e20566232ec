// Tue Oct 13 2026 - Alex

use crate::frontend::TargetInfo;
use crate::typedb::Node;
use ahash::AHashMap;

/// Finished type database for one translation unit.
///
/// `nodes` is authoritative; `node_index` is derived from it by
/// [`TypeDb::build_indices`].
#[derive(Debug, Clone, Default)]
pub struct TypeDb {
    pub nodes: Vec<Node>,
    node_index: AHashMap<String, usize>,
    pub triple: String,
    pub pointer_width_bits: u32,
    pub char_width_bits: u32,
    pub long_width_bits: u32,
}

impl TypeDb {
    pub fn for_target(target: &TargetInfo) -> Self {
        Self {
            triple: target.triple.clone(),
            pointer_width_bits: target.pointer_width_bits,
            char_width_bits: target.char_width_bits,
            long_width_bits: target.long_width_bits,
            ..Self::default()
        }
    }

    pub fn build_indices(&mut self) {
        self.node_index.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.node_index.entry(node.name.clone()).or_insert(i);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.node_index.get(name).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}

/// Append-only node store used while building. Rejects a second node under
/// an existing name.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    names: AHashMap<String, usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Returns false, leaving the arena untouched, when the name is taken.
    pub fn push(&mut self, node: Node) -> bool {
        if self.names.contains_key(&node.name) {
            return false;
        }
        self.names.insert(node.name.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.names.get(name).map(|&idx| &self.nodes[idx])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typedb::NodeKind;

    #[test]
    fn test_arena_rejects_duplicate_names() {
        let mut arena = NodeArena::new();
        assert!(arena.push(Node::new("int", NodeKind::Builtin { name: "int".into() })));
        assert!(!arena.push(Node::new("int", NodeKind::Unknown { spelling: "int".into() })));
        assert_eq!(arena.len(), 1);
        assert!(matches!(arena.get("int").unwrap().kind, NodeKind::Builtin { .. }));
    }

    #[test]
    fn test_indices_are_rebuildable() {
        let mut db = TypeDb::for_target(&TargetInfo::msvc_x64());
        db.nodes.push(Node::new("A", NodeKind::Unknown { spelling: "A".into() }));
        assert!(!db.contains("A"));
        db.build_indices();
        assert!(db.contains("A"));
        assert_eq!(db.long_width_bits, 32);
    }
}
