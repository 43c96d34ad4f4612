//! Domain models for Task Burrito
//!
//! Contains the task model without any I/O concerns: identifiers, records,
//! the task tree, property inheritance and dependency validation.

mod id;
mod task;
mod tree;
mod resolve;
mod graph;

pub use id::{IdError, TaskId};
pub use task::{Deadline, Declared, Priority, TaskRecord, TaskStatus, NONE_SENTINEL};
pub use tree::{TaskNode, TaskTree};
pub use resolve::resolve_properties;
pub use graph::{validate_references, DependencyGraph};
