//! Include expansion
//!
//! Include blocks are replaced in place by the blocks of the files they
//! name, recursively, producing one flat record stream in declaration order.
//! Relative paths always resolve against the root document's base directory,
//! not against the including file.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::block::{parse_blocks, Block, IncludeBlock};
use super::loader::SourceLoader;
use crate::diagnostic::{Diagnostics, TaskError};
use crate::domain::TaskRecord;

struct Expander<'a> {
    loader: &'a dyn SourceLoader,
    base_dir: &'a Path,
    /// Identities of files currently being expanded (the include stack)
    in_progress: Vec<PathBuf>,
    files_read: usize,
}

/// Flattens `blocks` into task records, splicing in included files
///
/// `root` is the file `blocks` came from, if any; it seeds the cycle guard
/// so a file including itself is caught on the first step.
pub fn expand_includes(
    blocks: Vec<Block>,
    loader: &dyn SourceLoader,
    base_dir: &Path,
    root: Option<&Path>,
    diagnostics: &mut Diagnostics,
) -> Vec<TaskRecord> {
    let mut expander = Expander {
        loader,
        base_dir,
        in_progress: root.map(|p| loader.identity(p)).into_iter().collect(),
        files_read: 0,
    };

    let mut records = Vec::new();
    expander.expand(blocks, &mut records, diagnostics);

    debug!(
        files = expander.files_read,
        records = records.len(),
        "expanded includes"
    );
    records
}

impl Expander<'_> {
    fn expand(&mut self, blocks: Vec<Block>, out: &mut Vec<TaskRecord>, diagnostics: &mut Diagnostics) {
        for block in blocks {
            match block {
                Block::Task(record) => out.push(record),
                Block::Include(include) => self.include(include, out, diagnostics),
            }
        }
    }

    fn include(&mut self, include: IncludeBlock, out: &mut Vec<TaskRecord>, diagnostics: &mut Diagnostics) {
        for raw in &include.paths {
            let path = self.resolve(raw);
            let identity = self.loader.identity(&path);

            if self.in_progress.contains(&identity) {
                diagnostics.error(
                    Some(include.location.clone()),
                    TaskError::CyclicInclude { path },
                );
                continue;
            }

            let text = match self.loader.read(&path) {
                Ok(text) => text,
                Err(err) => {
                    diagnostics.error(
                        Some(include.location.clone()),
                        TaskError::MissingInclude {
                            path,
                            reason: err.to_string(),
                        },
                    );
                    continue;
                }
            };
            self.files_read += 1;

            let nested = parse_blocks(&text, &path.display().to_string(), diagnostics);
            self.in_progress.push(identity);
            self.expand(nested, out, diagnostics);
            self.in_progress.pop();
        }
    }

    fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
