use ratatui::{
    layout::{Constraint, Layout},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::components::listing::{self, Columns, ListingWidget};
use crate::components::recursive::RecursiveWidget;
use crate::components::sidebar::SidebarWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::hit::{self, SIDEBAR_WIDTH};
use crate::navigation::ViewMode;

/// Render the application UI.
///
/// The sidebar is pinned to the top-left corner so its buttons land on the
/// fixed control regions. In the flat view, entry regions are recomputed
/// here every frame before the listing is painted.
pub fn render(app: &mut App, frame: &mut Frame) {
    let [body, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)]).areas(body);

    app.controls = hit::controls_within(sidebar_area.right(), sidebar_area.bottom());
    frame.render_widget(SidebarWidget::new(app.nav.mode(), &app.controls), sidebar_area);

    let block = Block::default()
        .title(format!(" {} ", app.nav.current_dir().display()))
        .borders(Borders::ALL);
    let inner = block.inner(main_area);
    frame.render_widget(block, main_area);

    match app.nav.mode() {
        ViewMode::Flat => {
            let columns = Columns::new(inner);
            listing::layout_rows(app.nav.entries_mut(), &columns, app.scroll_offset);
            frame.render_widget(
                ListingWidget::new(app.nav.entries(), columns, app.scroll_offset, app.use_icons),
                inner,
            );
        }
        ViewMode::Recursive => {
            frame.render_widget(
                RecursiveWidget::new(
                    app.nav.recursive_lines(),
                    app.scroll_offset,
                    app.recursive_display_limit,
                ),
                inner,
            );
        }
    }

    let path_str = app.nav.current_dir().display().to_string();
    let view_info = format!("{} | {} items", app.nav.mode().label(), app.view_len());
    let mut status_bar = StatusBarWidget::new(&path_str, &view_info);
    if let Some(ref msg) = app.status_message {
        status_bar = status_bar.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status_bar, status_area);
}
