//! # Task Files
//!
//! Reading side of the pipeline: raw text in, flat task records out.
//!
//! ## File Format
//!
//! ```text
//! ---
//! task 1.2
//! label Write the report
//! status IN-PROGRESS
//! priority 2
//! deadline 2020-02-01
//! depends 1.1
//! ---
//! Notes for task 1.2, in Markdown.
//! ---
//! include chapters/part-two.md
//! ---
//! ```
//!
//! | Key | Value | Repeatable |
//! |-----|-------|------------|
//! | `task` | dotted positive integers | no |
//! | `label` | free text | no |
//! | `status` | `DONE`, `IN-PROGRESS`, `BLOCKED`, `TODO` | no |
//! | `priority` | `1`..`5` or `none` | no |
//! | `deadline` | `YYYY-MM-DD` or `none` | no |
//! | `depends` | space-separated identifiers | yes |
//! | `include` | path (include blocks only) | yes |

mod block;
mod include;
mod loader;

pub use block::{parse_blocks, Block, IncludeBlock};
pub use include::expand_includes;
pub use loader::{FsLoader, MemoryLoader, Source, SourceLoader};
