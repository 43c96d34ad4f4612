//! Task tree
//!
//! The tree is an arena keyed by [`TaskId`]: parent and child relations are
//! identifier lookups, never back-pointers. Nodes without a declared record
//! are implicit placeholders synthesized for undeclared ancestors.

use std::collections::BTreeMap;

use tracing::debug;

use super::id::TaskId;
use super::task::{Deadline, Priority, TaskRecord, TaskStatus};
use crate::diagnostic::{Diagnostics, TaskError};

/// A node of the task tree
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    id: TaskId,
    record: Option<TaskRecord>,
    children: Vec<TaskId>,
    pub(crate) effective_priority: Option<Priority>,
    pub(crate) effective_deadline: Option<Deadline>,
}

impl TaskNode {
    fn implicit(id: TaskId) -> Self {
        Self {
            id,
            record: None,
            children: Vec::new(),
            effective_priority: None,
            effective_deadline: None,
        }
    }

    fn explicit(record: TaskRecord) -> Self {
        let mut node = Self::implicit(record.id.clone());
        node.record = Some(record);
        node
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// Parent identifier, or None for top-level tasks
    pub fn parent(&self) -> Option<TaskId> {
        self.id.parent()
    }

    /// Direct children in numeric identifier order
    pub fn children(&self) -> &[TaskId] {
        &self.children
    }

    /// Returns the declared record, or None for implicit nodes
    pub fn record(&self) -> Option<&TaskRecord> {
        self.record.as_ref()
    }

    /// Returns true if this node was synthesized for a descendant
    pub fn is_implicit(&self) -> bool {
        self.record.is_none()
    }

    pub fn label(&self) -> Option<&str> {
        self.record.as_ref().and_then(|r| r.label.as_deref())
    }

    /// Declared status, TODO when unset
    pub fn status(&self) -> TaskStatus {
        self.record
            .as_ref()
            .and_then(|r| r.status)
            .unwrap_or_default()
    }

    pub fn depends(&self) -> impl Iterator<Item = &TaskId> {
        self.record.iter().flat_map(|r| r.depends.iter())
    }

    pub fn notes(&self) -> &str {
        self.record.as_ref().map(|r| r.notes.as_str()).unwrap_or("")
    }

    /// Priority after inheritance
    pub fn priority(&self) -> Option<Priority> {
        self.effective_priority
    }

    /// Deadline after inheritance
    pub fn deadline(&self) -> Option<Deadline> {
        self.effective_deadline
    }
}

/// The task forest, rooted at a virtual node owning every top-level task
#[derive(Debug, Clone, Default)]
pub struct TaskTree {
    nodes: BTreeMap<TaskId, TaskNode>,
    roots: Vec<TaskId>,
}

impl TaskTree {
    /// Builds the tree from records, reporting duplicate identifiers
    pub fn build(
        records: impl IntoIterator<Item = TaskRecord>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut builder = TreeBuilder::default();
        for record in records {
            builder.insert(record, diagnostics);
        }
        builder.finish()
    }

    pub fn get(&self, id: &TaskId) -> Option<&TaskNode> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &TaskId) -> Option<&mut TaskNode> {
        self.nodes.get_mut(id)
    }

    /// Top-level identifiers in order
    pub fn roots(&self) -> &[TaskId] {
        &self.roots
    }

    /// All nodes in identifier order (depth-first, child order)
    pub fn iter(&self) -> impl Iterator<Item = &TaskNode> {
        self.nodes.values()
    }

    /// Depth-first walk yielding each node with its depth (0 for roots)
    ///
    /// The children of a node are visited only when `descend` returns true
    /// for it; the node itself is always yielded.
    pub fn walk<F>(&self, descend: F) -> Vec<(usize, &TaskNode)>
    where
        F: Fn(&TaskNode) -> bool,
    {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, &TaskId)> = self.roots.iter().rev().map(|id| (0, id)).collect();
        while let Some((depth, id)) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push((depth, node));
                if descend(node) {
                    stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Accumulates records, then computes the child index once
#[derive(Debug, Default)]
struct TreeBuilder {
    nodes: BTreeMap<TaskId, TaskNode>,
    implicit_created: usize,
}

impl TreeBuilder {
    fn insert(&mut self, record: TaskRecord, diagnostics: &mut Diagnostics) {
        let id = record.id.clone();

        if let Some(existing) = self.nodes.get_mut(&id) {
            match existing.record.as_ref().map(|r| r.location.clone()) {
                Some(first) => {
                    diagnostics.error(
                        Some(record.location.clone()),
                        TaskError::DuplicateIdentifier {
                            id,
                            first: Some(first),
                        },
                    );
                }
                None => existing.record = Some(record),
            }
            return;
        }

        for ancestor in id.ancestors() {
            if self.nodes.contains_key(&ancestor) {
                break;
            }
            self.nodes.insert(ancestor.clone(), TaskNode::implicit(ancestor));
            self.implicit_created += 1;
        }
        self.nodes.insert(id, TaskNode::explicit(record));
    }

    fn finish(mut self) -> TaskTree {
        let mut roots = Vec::new();
        let mut links = Vec::new();

        // BTreeMap order is numeric identifier order, so pushes stay sorted.
        for id in self.nodes.keys() {
            match id.parent() {
                Some(parent) => links.push((parent, id.clone())),
                None => roots.push(id.clone()),
            }
        }
        for (parent, child) in links {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.push(child);
            }
        }

        debug!(
            nodes = self.nodes.len(),
            implicit = self.implicit_created,
            roots = roots.len(),
            "built task tree"
        );

        TaskTree {
            nodes: self.nodes,
            roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Location;

    fn id(s: &str) -> TaskId {
        s.parse().unwrap()
    }

    fn record(s: &str, line: usize) -> TaskRecord {
        TaskRecord::new(id(s), Location::new("test.md", line))
    }

    fn child_ids(tree: &TaskTree, parent: &str) -> Vec<String> {
        tree.get(&id(parent))
            .unwrap()
            .children()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn children_sorted_numerically() {
        let mut diags = Diagnostics::new();
        let tree = TaskTree::build(
            vec![record("1", 1), record("1.2", 2), record("1.10", 3), record("1.3", 4)],
            &mut diags,
        );

        assert!(diags.is_empty());
        assert_eq!(child_ids(&tree, "1"), vec!["1.2", "1.3", "1.10"]);
    }

    #[test]
    fn synthesizes_implicit_ancestors() {
        let mut diags = Diagnostics::new();
        let tree = TaskTree::build(vec![record("1.1.2", 1)], &mut diags);

        assert!(!diags.has_errors());
        assert_eq!(tree.len(), 3);
        for implicit in ["1", "1.1"] {
            let node = tree.get(&id(implicit)).unwrap();
            assert!(node.is_implicit());
            assert_eq!(node.status(), TaskStatus::Todo);
            assert_eq!(node.label(), None);
        }
        assert_eq!(child_ids(&tree, "1"), vec!["1.1"]);
        assert_eq!(child_ids(&tree, "1.1"), vec!["1.1.2"]);
        assert_eq!(tree.roots(), &[id("1")]);
    }

    #[test]
    fn later_declaration_fills_implicit_node() {
        let mut diags = Diagnostics::new();
        let mut parent = record("2", 5);
        parent.label = Some("Parent".to_string());
        let tree = TaskTree::build(vec![record("2.1", 1), parent], &mut diags);

        assert!(diags.is_empty());
        let node = tree.get(&id("2")).unwrap();
        assert!(!node.is_implicit());
        assert_eq!(node.label(), Some("Parent"));
    }

    #[test]
    fn duplicate_declaration_is_reported() {
        let mut diags = Diagnostics::new();
        let tree = TaskTree::build(
            vec![record("1", 1), record("1.1", 3), record("1.1", 7)],
            &mut diags,
        );

        assert_eq!(diags.error_count(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.kind(), "invalid-identifier");
        assert_eq!(diag.location, Some(Location::new("test.md", 7)));
        assert!(diag.to_string().contains("1.1"));
        // first declaration wins
        assert_eq!(
            tree.get(&id("1.1")).unwrap().record().unwrap().location.line,
            3
        );
    }

    #[test]
    fn walk_is_depth_first_in_child_order() {
        let mut diags = Diagnostics::new();
        let tree = TaskTree::build(
            vec![record("2", 1), record("1.10", 2), record("1.2", 3), record("1.2.1", 4)],
            &mut diags,
        );

        let order: Vec<_> = tree
            .walk(|_| true)
            .into_iter()
            .map(|(depth, n)| format!("{}@{}", n.id(), depth))
            .collect();
        assert_eq!(order, vec!["1@0", "1.2@1", "1.2.1@2", "1.10@1", "2@0"]);

        let flat: Vec<_> = tree.iter().map(|n| n.id().to_string()).collect();
        assert_eq!(flat, vec!["1", "1.2", "1.2.1", "1.10", "2"]);
    }

    #[test]
    fn walk_skips_children_when_told_not_to_descend() {
        let mut diags = Diagnostics::new();
        let tree = TaskTree::build(
            vec![record("1", 1), record("1.1", 2), record("1.1.1", 3), record("2", 4)],
            &mut diags,
        );

        let order: Vec<_> = tree
            .walk(|n| n.id().to_string() != "1.1")
            .into_iter()
            .map(|(_, n)| n.id().to_string())
            .collect();
        assert_eq!(order, vec!["1", "1.1", "2"]);
    }
}
