//! Symbolic `rwxrwxrwx` rendering of Unix permission bits.

use std::fs::Metadata;

/// Permission bits in display order: owner, group, other.
const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

/// Owner-execute bit.
pub const OWNER_EXECUTE: u32 = 0o100;

/// Format the low nine mode bits as a 9-character string, `-` for unset bits.
pub fn format_permissions(mode: u32) -> String {
    PERMISSION_BITS
        .iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

/// Raw permission bits of an entry.
#[cfg(unix)]
pub fn mode_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

/// Approximate mode bits on platforms without Unix permissions.
#[cfg(not(unix))]
pub fn mode_of(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
