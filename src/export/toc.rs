//! Table of contents (the `simple` view)

use std::fmt::{self, Write};

use super::{heading, marker};
use crate::domain::{DependencyGraph, TaskNode, TaskStatus, TaskTree};

/// Returns true when the node has children and every direct child is DONE
///
/// Grandchildren are not consulted, so a non-DONE grandchild under a DONE
/// child is hidden along with the rest of the subtree.
pub fn is_foldable(tree: &TaskTree, node: &TaskNode) -> bool {
    !node.children().is_empty()
        && node
            .children()
            .iter()
            .filter_map(|id| tree.get(id))
            .all(|child| child.status().is_complete())
}

/// Writes one entry per node, depth first in child order
pub fn write_toc<W: Write>(
    out: &mut W,
    tree: &TaskTree,
    graph: &DependencyGraph,
    fold: bool,
) -> fmt::Result {
    writeln!(out, "# Table of Contents")?;
    writeln!(out)?;

    let is_folded = |node: &TaskNode| fold && is_foldable(tree, node);
    for (depth, node) in tree.walk(|node| !is_folded(node)) {
        write!(
            out,
            "{}- {} {}: {}",
            "  ".repeat(depth),
            marker(node.status()),
            heading(node),
            status_line(tree, graph, node)
        )?;
        if is_folded(node) {
            write!(out, " (+{} folded)", node.children().len())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Status word with its qualifier, then priority and dependency progress
fn status_line(tree: &TaskTree, graph: &DependencyGraph, node: &TaskNode) -> String {
    let status = node.status();
    let mut line = match (status, node.deadline()) {
        (TaskStatus::Blocked, _) => {
            let blockers: Vec<_> = graph
                .blockers(tree, node)
                .iter()
                .map(|b| b.id().to_string())
                .collect();
            if blockers.is_empty() {
                status.to_string()
            } else {
                format!("{} on {}", status, blockers.join(", "))
            }
        }
        (TaskStatus::Todo, Some(deadline)) => format!("{} by {}", status, deadline),
        (TaskStatus::InProgress, Some(deadline)) => format!("{} due by {}", status, deadline),
        _ => status.to_string(),
    };

    if let Some(priority) = node.priority() {
        line.push_str(&format!(", priority {}", priority));
    }

    let deps = graph.dependencies(node.id());
    if !deps.is_empty() && !matches!(status, TaskStatus::Blocked | TaskStatus::Done) {
        let done = deps
            .iter()
            .filter_map(|id| tree.get(id))
            .filter(|d| d.status().is_complete())
            .count();
        line.push_str(&format!(", {}/{} dependencies done", done, deps.len()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Diagnostics;
    use crate::document::{expand_includes, parse_blocks, MemoryLoader};
    use crate::domain::resolve_properties;
    use std::path::Path;

    fn load(text: &str) -> (TaskTree, DependencyGraph) {
        let mut diags = Diagnostics::new();
        let blocks = parse_blocks(text, "t.md", &mut diags);
        let records = expand_includes(blocks, &MemoryLoader::new(), Path::new("/"), None, &mut diags);
        let mut tree = TaskTree::build(records, &mut diags);
        resolve_properties(&mut tree);
        let graph = DependencyGraph::from_tree(&tree, &mut diags);
        assert!(!diags.has_errors(), "{:?}", diags);
        (tree, graph)
    }

    fn toc(text: &str, fold: bool) -> String {
        let (tree, graph) = load(text);
        let mut out = String::new();
        write_toc(&mut out, &tree, &graph, fold).unwrap();
        out
    }

    #[test]
    fn entries_in_child_order_with_indentation() {
        let out = toc(
            "---\ntask 1\nlabel Root\n---\n---\ntask 1.10\n---\n---\ntask 1.2\nlabel Two\nstatus done\n---\n",
            false,
        );
        assert_eq!(
            out,
            "# Table of Contents\n\n- [ ] 1 Root: TODO\n  - [x] 1.2 Two: DONE\n  - [ ] 1.10: TODO\n"
        );
    }

    #[test]
    fn qualifiers_follow_status() {
        let out = toc(
            "---\ntask 1\ndeadline 2020-02-01\npriority 2\n---\n\
             ---\ntask 2\nstatus IN-PROGRESS\ndeadline 2020-03-01\ndepends 1 3\n---\n\
             ---\ntask 3\nstatus DONE\n---\n\
             ---\ntask 4\nstatus BLOCKED\ndepends 1 3\n---\n",
            false,
        );
        assert!(out.contains("- [ ] 1: TODO by 2020-02-01, priority 2\n"));
        assert!(out.contains("- [~] 2: IN-PROGRESS due by 2020-03-01, 1/2 dependencies done\n"));
        assert!(out.contains("- [x] 3: DONE\n"));
        assert!(out.contains("- [!] 4: BLOCKED on 1\n"));
    }

    #[test]
    fn fold_hides_subtree_when_all_direct_children_done() {
        let text = "---\ntask 1\n---\n---\ntask 1.1\nstatus DONE\n---\n---\ntask 1.2\nstatus DONE\n---\n\
                    ---\ntask 2\n---\n---\ntask 2.1\nstatus DONE\n---\n---\ntask 2.2\nstatus IN-PROGRESS\n---\n\
                    ---\ntask 2.2.1\nstatus DONE\n---\n";
        let out = toc(text, true);

        assert!(out.contains("- [ ] 1: TODO (+2 folded)\n"));
        assert!(!out.contains("1.1"));
        assert!(out.contains("  - [~] 2.2: IN-PROGRESS (+1 folded)\n"));
        assert!(out.contains("  - [x] 2.1: DONE\n"));
        assert!(!out.contains("2.2.1"));
    }

    #[test]
    fn fold_ignores_grandchildren() {
        let text = "---\ntask 1\n---\n---\ntask 1.1\nstatus DONE\n---\n---\ntask 1.1.1\nstatus TODO\n---\n";
        let out = toc(text, true);
        assert!(!out.contains("1.1.1"));
    }

    #[test]
    fn no_folding_without_option() {
        let text = "---\ntask 1\n---\n---\ntask 1.1\nstatus DONE\n---\n";
        let out = toc(text, false);
        assert!(out.contains("1.1"));
        assert!(!out.contains("folded"));
    }
}
