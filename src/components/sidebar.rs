use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::hit::{FixedControl, Region};
use crate::navigation::ViewMode;

/// The fixed Home / Desktop / Tree buttons, drawn exactly over the regions
/// the click handler tests.
pub struct SidebarWidget<'a> {
    mode: ViewMode,
    controls: &'a [(FixedControl, Region)],
}

impl<'a> SidebarWidget<'a> {
    pub fn new(mode: ViewMode, controls: &'a [(FixedControl, Region)]) -> Self {
        Self { mode, controls }
    }
}

impl<'a> Widget for SidebarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for &(control, region) in self.controls {
            let button = Rect::new(
                region.x1,
                region.y1,
                region.x2 - region.x1 + 1,
                region.y2 - region.y1 + 1,
            )
            .intersection(area);
            if button.is_empty() {
                continue;
            }

            let active = control == FixedControl::RecursiveToggle && self.mode == ViewMode::Recursive;
            let style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };

            Paragraph::new(control.label())
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL))
                .render(button, buf);
        }
    }
}
