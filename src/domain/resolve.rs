//! Property inheritance
//!
//! Priority and deadline flow down the tree: a node takes its own declared
//! value, or its parent's effective value when it declares nothing. A
//! declared `none` resolves to absent, and descendants inherit that absence
//! rather than anything from further up.

use tracing::debug;

use super::id::TaskId;
use super::task::{Deadline, Priority};
use super::tree::TaskTree;

/// Writes effective priority and deadline onto every node, parents first
pub fn resolve_properties(tree: &mut TaskTree) {
    let mut resolved = 0usize;
    let mut stack: Vec<(TaskId, Option<Priority>, Option<Deadline>)> = tree
        .roots()
        .iter()
        .rev()
        .map(|id| (id.clone(), None, None))
        .collect();

    while let Some((id, parent_priority, parent_deadline)) = stack.pop() {
        let Some(node) = tree.get_mut(&id) else {
            continue;
        };

        let (priority, deadline) = match node.record() {
            Some(record) => (
                record.priority.resolve(parent_priority),
                record.deadline.resolve(parent_deadline),
            ),
            None => (parent_priority, parent_deadline),
        };
        node.effective_priority = priority;
        node.effective_deadline = deadline;
        resolved += 1;

        stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child.clone(), priority, deadline)),
        );
    }

    debug!(nodes = resolved, "resolved inherited properties");
}
