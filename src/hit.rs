//! Click hit-testing against the last rendered layout.
//!
//! Nothing here keeps widget state: the renderer writes entry regions back
//! into each [`ExplorerEntry`] every frame, and a click is resolved against
//! whatever was drawn last. Fixed controls always take precedence.

use std::path::PathBuf;

use crate::fs::classify::EntryKind;
use crate::fs::listing::ExplorerEntry;

/// Inclusive screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: u16,
    pub x2: u16,
    pub y1: u16,
    pub y2: u16,
}

impl Region {
    pub const fn new(x1: u16, x2: u16, y1: u16, y2: u16) -> Self {
        Self { x1, x2, y1, y2 }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }
}

/// Permanently positioned controls in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedControl {
    Home,
    Desktop,
    RecursiveToggle,
}

impl FixedControl {
    pub fn label(self) -> &'static str {
        match self {
            FixedControl::Home => "Home",
            FixedControl::Desktop => "Desktop",
            FixedControl::RecursiveToggle => "Tree",
        }
    }
}

/// Width of the sidebar column holding the fixed controls.
pub const SIDEBAR_WIDTH: u16 = 12;

/// Fixed control regions in priority order. The sidebar widget draws its
/// buttons inside exactly these cells.
pub const CONTROL_REGIONS: [(FixedControl, Region); 3] = [
    (FixedControl::Home, Region::new(1, 10, 1, 3)),
    (FixedControl::Desktop, Region::new(1, 10, 5, 7)),
    (FixedControl::RecursiveToggle, Region::new(1, 10, 9, 11)),
];

/// Controls whose whole region lies left of column `right` and above row
/// `bottom`. A terminal too small for a button neither draws nor hit-tests it.
pub fn controls_within(right: u16, bottom: u16) -> Vec<(FixedControl, Region)> {
    CONTROL_REGIONS
        .into_iter()
        .filter(|(_, region)| region.x2 < right && region.y2 < bottom)
        .collect()
}

/// What a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Control(FixedControl),
    Entry { path: PathBuf, kind: EntryKind },
    None,
}

/// Resolve a click. Controls are tested first, then entries in list order;
/// an entry is hit through either its icon or its name region.
pub fn resolve(
    x: u16,
    y: u16,
    controls: &[(FixedControl, Region)],
    entries: &[ExplorerEntry],
) -> Target {
    if let Some((control, _)) = controls.iter().find(|(_, region)| region.contains(x, y)) {
        return Target::Control(*control);
    }

    entries
        .iter()
        .find(|entry| {
            [entry.icon_region, entry.name_region]
                .iter()
                .flatten()
                .any(|region| region.contains(x, y))
        })
        .map(|entry| Target::Entry {
            path: entry.path.clone(),
            kind: entry.kind,
        })
        .unwrap_or(Target::None)
}
