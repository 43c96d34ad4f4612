//! Full task listing appended when `summary` is set

use std::fmt::{self, Write};

use super::heading;
use crate::domain::{TaskNode, TaskTree};

const UNASSIGNED: &str = "unassigned";

/// Writes every task's resolved properties and notes, in identifier order
pub fn write_listing<W: Write>(out: &mut W, tree: &TaskTree) -> fmt::Result {
    writeln!(out, "# Tasks")?;
    for node in tree.iter() {
        writeln!(out)?;
        write_task(out, node)?;
    }
    Ok(())
}

fn write_task<W: Write>(out: &mut W, node: &TaskNode) -> fmt::Result {
    writeln!(out, "## {}", heading(node))?;
    writeln!(out)?;
    writeln!(out, "- Status: {}", node.status())?;
    match node.priority() {
        Some(p) => writeln!(out, "- Priority: {}", p)?,
        None => writeln!(out, "- Priority: {}", UNASSIGNED)?,
    }
    match node.deadline() {
        Some(d) => writeln!(out, "- Deadline: {}", d)?,
        None => writeln!(out, "- Deadline: {}", UNASSIGNED)?,
    }
    let deps: Vec<_> = node.depends().map(|d| d.to_string()).collect();
    if deps.is_empty() {
        writeln!(out, "- Dependencies: none")?;
    } else {
        writeln!(out, "- Dependencies: {}", deps.join(", "))?;
    }

    let notes = node.notes().trim();
    if !notes.is_empty() {
        writeln!(out)?;
        writeln!(out, "### Notes")?;
        writeln!(out)?;
        writeln!(out, "{}", notes)?;
    }
    Ok(())
}
