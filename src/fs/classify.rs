//! Entry classification: what kind of thing a listed name is.
//!
//! Directories win, then the owner execute bit, then the extension.

use std::fs::Metadata;

use crate::fs::permissions::{self, OWNER_EXECUTE};

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".tif", ".tiff", ".gif"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".mkv", ".avi", ".webm"];
const CODE_EXTENSIONS: &[&str] = &[".h", ".c", ".cpp", ".py", ".java", ".js"];

/// Semantic kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    Executable,
    Image,
    Video,
    CodeFile,
    Other,
}

impl EntryKind {
    /// Terminal glyph: a Nerd Font icon, or an ASCII tag when icons are off.
    pub fn glyph(self, use_icons: bool) -> &'static str {
        if use_icons {
            match self {
                EntryKind::Directory => " ",
                EntryKind::Executable => " ",
                EntryKind::Image => " ",
                EntryKind::Video => " ",
                EntryKind::CodeFile => " ",
                EntryKind::Other => " ",
            }
        } else {
            match self {
                EntryKind::Directory => "[D] ",
                EntryKind::Executable => "[X] ",
                EntryKind::Image => "[I] ",
                EntryKind::Video => "[V] ",
                EntryKind::CodeFile => "[C] ",
                EntryKind::Other => "[F] ",
            }
        }
    }
}

/// Extension of `name`: everything from the first `.` at or after the second
/// character. `None` when there is no such dot, so `.bashrc` has no extension
/// and `archive.tar.gz` has `.tar.gz`.
pub fn extension(name: &str) -> Option<&str> {
    name.char_indices()
        .skip(1)
        .find(|&(_, c)| c == '.')
        .map(|(i, _)| &name[i..])
}

/// Classify from raw facts. Returns `None` for entries that are neither
/// directories nor regular files; those are left out of listings.
pub fn classify_parts(name: &str, is_dir: bool, is_file: bool, mode: u32) -> Option<EntryKind> {
    if is_dir {
        return Some(EntryKind::Directory);
    }
    if !is_file {
        return None;
    }
    if mode & OWNER_EXECUTE != 0 {
        return Some(EntryKind::Executable);
    }

    let kind = match extension(name) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => EntryKind::Image,
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => EntryKind::Video,
        Some(ext) if CODE_EXTENSIONS.contains(&ext) => EntryKind::CodeFile,
        _ => EntryKind::Other,
    };
    Some(kind)
}

/// Classify an entry from its (symlink-followed) metadata.
pub fn classify(name: &str, metadata: &Metadata) -> Option<EntryKind> {
    classify_parts(
        name,
        metadata.is_dir(),
        metadata.is_file(),
        permissions::mode_of(metadata),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_wins_over_everything() {
        assert_eq!(
            classify_parts("photos.png", true, false, 0o755),
            Some(EntryKind::Directory)
        );
    }

    #[test]
    fn special_files_are_excluded() {
        assert_eq!(classify_parts("sock", false, false, 0o644), None);
    }

    #[test]
    fn execute_bit_beats_extension() {
        assert_eq!(
            classify_parts("script.py", false, true, 0o755),
            Some(EntryKind::Executable)
        );
        assert_eq!(
            classify_parts("script.py", false, true, 0o644),
            Some(EntryKind::CodeFile)
        );
    }

    #[test]
    fn only_owner_execute_counts() {
        assert_eq!(
            classify_parts("a.png", false, true, 0o645),
            Some(EntryKind::Image)
        );
    }

    #[test]
    fn extension_sets() {
        let cases = [
            ("a.jpg", EntryKind::Image),
            ("a.tiff", EntryKind::Image),
            ("clip.webm", EntryKind::Video),
            ("movie.mkv", EntryKind::Video),
            ("main.cpp", EntryKind::CodeFile),
            ("App.java", EntryKind::CodeFile),
            ("notes.txt", EntryKind::Other),
            ("README", EntryKind::Other),
        ];
        for (name, expected) in cases {
            assert_eq!(classify_parts(name, false, true, 0o644), Some(expected), "{name}");
        }
    }

    #[test]
    fn extensions_are_case_sensitive() {
        assert_eq!(
            classify_parts("IMG.PNG", false, true, 0o644),
            Some(EntryKind::Other)
        );
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(extension(".gitignore"), None);
        assert_eq!(extension(".bashrc"), None);
        assert_eq!(
            classify_parts(".gitignore", false, true, 0o644),
            Some(EntryKind::Other)
        );
    }

    #[test]
    fn first_interior_dot_starts_the_extension() {
        assert_eq!(extension("archive.tar.gz"), Some(".tar.gz"));
        assert_eq!(extension(".config.py"), Some(".py"));
        assert_eq!(extension("a.py"), Some(".py"));
        assert_eq!(
            classify_parts("backup.png.old", false, true, 0o644),
            Some(EntryKind::Other)
        );
    }

    #[test]
    fn extension_skips_multibyte_first_char() {
        assert_eq!(extension("é.c"), Some(".c"));
    }

    #[test]
    fn every_kind_has_a_glyph() {
        let kinds = [
            EntryKind::Directory,
            EntryKind::Executable,
            EntryKind::Image,
            EntryKind::Video,
            EntryKind::CodeFile,
            EntryKind::Other,
        ];
        for kind in kinds {
            assert!(!kind.glyph(true).is_empty());
            assert!(kind.glyph(false).starts_with('['));
        }
    }
}
