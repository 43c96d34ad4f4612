//! Dependency graph for tasks
//!
//! `depends` entries are references, not ownership: the graph only checks
//! that every referenced identifier exists and reports cycles. It never
//! derives a status from the dependency structure.
//! Uses petgraph for graph operations.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use super::id::TaskId;
use super::tree::{TaskNode, TaskTree};
use crate::diagnostic::{Diagnostics, TaskError};

/// A dependency graph over the nodes of a task tree
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph; edge direction is dependency -> dependent
    graph: DiGraph<TaskId, ()>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Builds the graph, reporting every reference to a missing task
    ///
    /// Implicit nodes count as existing. All missing references are
    /// collected before returning.
    pub fn from_tree(tree: &TaskTree, diagnostics: &mut Diagnostics) -> Self {
        let mut graph = Self::default();

        // First pass: add all nodes
        for node in tree.iter() {
            let idx = graph.graph.add_node(node.id().clone());
            graph.node_map.insert(node.id().clone(), idx);
        }

        // Second pass: add all edges
        let mut checked = 0usize;
        for node in tree.iter() {
            for dep_id in node.depends() {
                checked += 1;
                match graph.node_map.get(dep_id) {
                    Some(&dep_idx) => {
                        let task_idx = graph.node_map[node.id()];
                        graph.graph.add_edge(dep_idx, task_idx, ());
                    }
                    None => diagnostics.error(
                        node.record().map(|r| r.location.clone()),
                        TaskError::MissingDependency {
                            task: node.id().clone(),
                            dependency: dep_id.clone(),
                        },
                    ),
                }
            }
        }

        debug!(references = checked, "validated dependency references");
        graph
    }

    /// Returns dependency cycles, each sorted by identifier
    ///
    /// A task depending on itself is a cycle of length one.
    pub fn cycles(&self) -> Vec<Vec<TaskId>> {
        let mut cycles: Vec<Vec<TaskId>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0])
            })
            .map(|scc| {
                let mut ids: Vec<_> = scc
                    .into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).cloned())
                    .collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Returns the direct dependencies of a task, in identifier order
    pub fn dependencies(&self, task_id: &TaskId) -> Vec<TaskId> {
        let task_idx = match self.node_map.get(task_id) {
            Some(idx) => *idx,
            None => return vec![],
        };

        let mut deps: Vec<_> = self
            .graph
            .neighbors_directed(task_idx, petgraph::Direction::Incoming)
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect();
        deps.sort();
        deps.dedup();
        deps
    }

    /// Returns the dependencies of `node` that are not yet DONE
    pub fn blockers<'a>(&self, tree: &'a TaskTree, node: &TaskNode) -> Vec<&'a TaskNode> {
        self.dependencies(node.id())
            .iter()
            .filter_map(|id| tree.get(id))
            .filter(|dep| !dep.status().is_complete())
            .collect()
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

/// Checks every `depends` reference and warns about dependency cycles
pub fn validate_references(tree: &TaskTree, diagnostics: &mut Diagnostics) -> DependencyGraph {
    let graph = DependencyGraph::from_tree(tree, diagnostics);
    for cycle in graph.cycles() {
        let location = cycle
            .first()
            .and_then(|id| tree.get(id))
            .and_then(|n| n.record())
            .map(|r| r.location.clone());
        diagnostics.warn(location, TaskError::DependencyCycle { cycle });
    }
    graph
}
