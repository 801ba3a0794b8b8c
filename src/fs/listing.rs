//! Flat directory listing.
//!
//! A listing is rebuilt from scratch on every navigation; entries are never
//! patched in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::fs::classify::{self, EntryKind};
use crate::fs::permissions;
use crate::hit::Region;

/// Name of the parent-directory entry kept at the top of every listing.
pub const PARENT_ENTRY: &str = "..";

/// One child of the listed directory, as shown in the flat view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerEntry {
    /// Raw file name, case preserved.
    pub name: String,
    /// Listed directory joined with `name`.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Size in bytes; not meaningful for directories.
    pub size: u64,
    /// `rwxrwxrwx`-style permission string.
    pub permissions: String,
    /// Screen region of the icon, written by the renderer each pass.
    pub icon_region: Option<Region>,
    /// Screen region of the name, written by the renderer each pass.
    pub name_region: Option<Region>,
}

impl ExplorerEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Size column text; directories show nothing.
    pub fn size_label(&self) -> String {
        if self.is_directory() {
            String::new()
        } else {
            self.size.to_string()
        }
    }

    /// Forget the regions from the previous render pass.
    pub fn clear_regions(&mut self) {
        self.icon_region = None;
        self.name_region = None;
    }
}

/// Stable, case-insensitive ordering by name. Names equal after case folding
/// keep their incoming order.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| name(a).to_lowercase().cmp(&name(b).to_lowercase()));
}

/// List the immediate children of `dir`.
///
/// `..` is always included as a navigable directory; `.` never is. Children
/// whose metadata can't be read, and children that are neither directories
/// nor regular files, are skipped.
pub fn list_directory(dir: &Path) -> Result<Vec<ExplorerEntry>> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(AppError::DirectoryNotFound(dir.to_path_buf())),
    }

    let read = fs::read_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::DirectoryNotFound(dir.to_path_buf()),
        _ => AppError::Io(e),
    })?;

    let mut children = vec![(PARENT_ENTRY.to_string(), dir.join(PARENT_ENTRY))];
    for entry in read {
        match entry {
            Ok(e) => children.push((e.file_name().to_string_lossy().to_string(), e.path())),
            Err(e) => log::warn!("skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    sort_by_name(&mut children, |(name, _)| name.as_str());

    let mut entries = Vec::with_capacity(children.len());
    for (name, path) in children {
        match read_entry(name, path) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => log::warn!("{}", e),
        }
    }

    log::debug!("listed {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Build the entry for `path`, displayed as `name`. `Ok(None)` means an
/// unsupported file type.
///
/// `name` may be a lossy rendering of the real file name, so metadata is
/// always read through `path`.
fn read_entry(name: String, path: PathBuf) -> Result<Option<ExplorerEntry>> {
    let metadata = fs::metadata(&path).map_err(|source| AppError::EntryRead {
        path: path.clone(),
        source,
    })?;

    let Some(kind) = classify::classify(&name, &metadata) else {
        log::debug!("unsupported entry type: {}", path.display());
        return Ok(None);
    };

    Ok(Some(ExplorerEntry {
        name,
        path,
        kind,
        size: metadata.len(),
        permissions: permissions::format_permissions(permissions::mode_of(&metadata)),
        icon_region: None,
        name_region: None,
    }))
}
