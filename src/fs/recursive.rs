//! Recursive tree view: a pre-order walk of the current directory.
//!
//! Children are filtered and sorted the same way as the flat listing, so
//! both views agree on what a directory contains.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::fs::listing::sort_by_name;

/// Spaces per indent level in a rendered label.
const INDENT_WIDTH: usize = 4;

/// One row of the recursive view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursiveLine {
    pub depth: usize,
    pub name: String,
}

impl RecursiveLine {
    /// Name padded with spaces for its depth.
    pub fn label(&self) -> String {
        format!("{:indent$}{}", "", self.name, indent = self.depth * INDENT_WIDTH)
    }
}

/// One directory child as the walk sees it.
#[derive(Debug, Clone)]
struct Child {
    name: String,
    path: PathBuf,
    /// Real directory (not a symlink to one) that the walk enters.
    descend: bool,
}

/// A child waiting on the traversal stack.
struct Pending {
    child: Child,
    depth: usize,
}

/// Walk `root` depth-first in pre-order, children sorted case-insensitively
/// at every level, starting at indent `depth`.
///
/// `.` and `..` are never emitted or entered. Symlinked directories are
/// listed but not entered. Children that are neither directories nor regular
/// files are left out. A directory that can't be read contributes no lines
/// and the walk carries on with its siblings.
pub fn build_tree(root: &Path, depth: usize) -> Vec<RecursiveLine> {
    walk(root, depth, read_children)
}

fn walk<R>(root: &Path, depth: usize, mut read: R) -> Vec<RecursiveLine>
where
    R: FnMut(&Path) -> io::Result<Vec<Child>>,
{
    let mut lines = Vec::new();
    let mut stack = Vec::new();
    push_children(root, depth, &mut stack, &mut read);

    while let Some(Pending { child, depth }) = stack.pop() {
        if child.descend {
            push_children(&child.path, depth + 1, &mut stack, &mut read);
        }
        lines.push(RecursiveLine {
            depth,
            name: child.name,
        });
    }

    log::debug!("recursive view of {}: {} lines", root.display(), lines.len());
    lines
}

/// Read `dir` and push its children so the first in sort order pops first.
fn push_children<R>(dir: &Path, depth: usize, stack: &mut Vec<Pending>, read: &mut R)
where
    R: FnMut(&Path) -> io::Result<Vec<Child>>,
{
    let mut children = match read(dir) {
        Ok(children) => children,
        Err(e) => {
            log::warn!("skipping subtree {}: {}", dir.display(), e);
            return;
        }
    };

    sort_by_name(&mut children, |c| c.name.as_str());
    stack.extend(
        children
            .into_iter()
            .rev()
            .map(|child| Pending { child, depth }),
    );
}

/// Supported children of `dir`: directories and regular files, after
/// following symlinks.
fn read_children(dir: &Path) -> io::Result<Vec<Child>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "." || name == ".." {
            continue;
        }

        let path = entry.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() || meta.is_file() => {}
            Ok(_) => {
                log::debug!("unsupported entry type: {}", path.display());
                continue;
            }
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        }

        let descend = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        children.push(Child {
            name,
            path,
            descend,
        });
    }
    Ok(children)
}
