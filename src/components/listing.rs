use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::classify::EntryKind;
use crate::fs::listing::ExplorerEntry;
use crate::hit::Region;

/// Cells reserved for the kind glyph (wide enough for the ASCII tags).
const ICON_WIDTH: u16 = 4;
const SIZE_WIDTH: u16 = 12;
const PERMISSIONS_WIDTH: u16 = 11;

/// Column geometry of the flat listing inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    /// Header row.
    pub header: Rect,
    /// Rows available for entries.
    pub rows: Rect,
    pub name_width: u16,
}

impl Columns {
    pub fn new(area: Rect) -> Self {
        let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let rows = Rect::new(
            area.x,
            area.y.saturating_add(1),
            area.width,
            area.height.saturating_sub(1),
        );
        let name_width = area
            .width
            .saturating_sub(ICON_WIDTH + SIZE_WIDTH + PERMISSIONS_WIDTH);
        Self {
            header,
            rows,
            name_width,
        }
    }

    fn name_x(&self) -> u16 {
        self.rows.x + ICON_WIDTH
    }

    fn size_x(&self) -> u16 {
        self.name_x() + self.name_width
    }

    fn permissions_x(&self) -> u16 {
        self.size_x() + SIZE_WIDTH
    }
}

/// Give every visible entry its icon and name regions for this frame, one
/// row per entry in list order starting at `scroll`. Entries scrolled out of
/// view lose their regions.
pub fn layout_rows(entries: &mut [ExplorerEntry], columns: &Columns, scroll: usize) {
    let rows = columns.rows;
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.clear_regions();
        let Some(offset) = idx.checked_sub(scroll) else {
            continue;
        };
        if offset >= rows.height as usize || rows.width == 0 {
            continue;
        }

        let y = rows.y + offset as u16;
        entry.icon_region = Some(Region::new(rows.x, rows.x + ICON_WIDTH - 2, y, y));

        let name_cells = (Span::raw(entry.name.as_str()).width() as u16).min(columns.name_width);
        if name_cells > 0 {
            let x1 = columns.name_x();
            entry.name_region = Some(Region::new(x1, x1 + name_cells - 1, y, y));
        }
    }
}

fn kind_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::Directory => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        EntryKind::Executable => Style::default().fg(Color::Green),
        EntryKind::Image => Style::default().fg(Color::Magenta),
        EntryKind::Video => Style::default().fg(Color::Red),
        EntryKind::CodeFile => Style::default().fg(Color::Yellow),
        EntryKind::Other => Style::default(),
    }
}

/// Table of icon, name, size and permissions for the flat view.
pub struct ListingWidget<'a> {
    entries: &'a [ExplorerEntry],
    columns: Columns,
    scroll: usize,
    use_icons: bool,
}

impl<'a> ListingWidget<'a> {
    pub fn new(entries: &'a [ExplorerEntry], columns: Columns, scroll: usize, use_icons: bool) -> Self {
        Self {
            entries,
            columns,
            scroll,
            use_icons,
        }
    }
}

impl<'a> Widget for ListingWidget<'a> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let cols = self.columns;
        if cols.header.height == 0 {
            return;
        }

        let header_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let y = cols.header.y;
        buf.set_string(cols.name_x(), y, "Name", header_style);
        buf.set_string(cols.size_x(), y, "Size", header_style);
        buf.set_string(cols.permissions_x(), y, "Permissions", header_style);

        let visible = self
            .entries
            .iter()
            .skip(self.scroll)
            .take(cols.rows.height as usize);

        for (i, entry) in visible.enumerate() {
            let y = cols.rows.y + i as u16;
            let style = kind_style(entry.kind);

            let glyph = Line::from(Span::styled(entry.kind.glyph(self.use_icons), style));
            buf.set_line(cols.rows.x, y, &glyph, ICON_WIDTH);

            let name = Line::from(Span::styled(entry.name.as_str(), style));
            buf.set_line(cols.name_x(), y, &name, cols.name_width);

            buf.set_stringn(
                cols.size_x(),
                y,
                format!("{:>width$} ", entry.size_label(), width = SIZE_WIDTH as usize - 2),
                SIZE_WIDTH as usize,
                Style::default(),
            );
            buf.set_stringn(
                cols.permissions_x(),
                y,
                &entry.permissions,
                PERMISSIONS_WIDTH as usize,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}
