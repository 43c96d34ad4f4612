//! Calendar agenda of unfinished tasks

use std::fmt::{self, Write};

use chrono::Datelike;

use super::{heading, marker};
use crate::domain::{Deadline, TaskNode, TaskTree};

/// Active (not DONE) tasks split by whether they carry an effective deadline
pub struct Agenda<'a> {
    /// Sorted by deadline, ties in identifier order
    pub dated: Vec<(Deadline, &'a TaskNode)>,
    /// Identifier order
    pub undated: Vec<&'a TaskNode>,
}

impl<'a> Agenda<'a> {
    pub fn from_tree(tree: &'a TaskTree) -> Self {
        let mut dated = Vec::new();
        let mut undated = Vec::new();
        for node in tree.iter().filter(|n| !n.status().is_complete()) {
            match node.deadline() {
                Some(deadline) => dated.push((deadline, node)),
                None => undated.push(node),
            }
        }
        // stable: equal deadlines keep identifier order
        dated.sort_by_key(|(deadline, _)| *deadline);
        Self { dated, undated }
    }
}

/// Writes the agenda grouped by month, then by day
pub fn write_calendar<W: Write>(out: &mut W, tree: &TaskTree) -> fmt::Result {
    let agenda = Agenda::from_tree(tree);

    writeln!(out, "# Calendar")?;
    writeln!(out)?;

    if agenda.dated.is_empty() {
        writeln!(out, "No active tasks have a deadline.")?;
        writeln!(out)?;
    }

    let mut current_month = None;
    let mut current_day = None;
    for (deadline, node) in &agenda.dated {
        let date = deadline.0;
        let month = (date.year(), date.month());
        if current_month != Some(month) {
            if current_month.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "## {}", date.format("%B %Y"))?;
            writeln!(out)?;
            current_month = Some(month);
            current_day = None;
        }
        if current_day != Some(date) {
            if current_day.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "### {} {}", deadline, date.format("%A"))?;
            writeln!(out)?;
            current_day = Some(date);
        }
        writeln!(out, "- {} {}", marker(node.status()), heading(node))?;
    }
    if !agenda.dated.is_empty() {
        writeln!(out)?;
    }

    if !agenda.undated.is_empty() {
        writeln!(out, "## No Deadline")?;
        writeln!(out)?;
        for node in &agenda.undated {
            writeln!(out, "- {} {}", marker(node.status()), heading(node))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
