use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const KEY_HINTS: &str = " click:open  wheel:scroll  q:quit ";

/// Status bar widget that displays the current directory, view info, key
/// hints, or a transient status message.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    view_info: &'a str,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, view_info: &'a str) -> Self {
        Self {
            path_str,
            view_info,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

/// Keep the tail of `s` within `budget` characters, prefixed with "...".
fn truncate_front(s: &str, budget: usize) -> String {
    let len = s.chars().count();
    if len <= budget {
        return s.to_string();
    }
    if budget <= 3 {
        return s.chars().take(budget).collect();
    }
    let tail: String = s.chars().skip(len - (budget - 3)).collect();
    format!("...{tail}")
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default().bg(Color::Red).fg(Color::White)
            } else {
                Style::default().fg(Color::Green)
            };

            let display: String = if msg.chars().count() >= width {
                msg.chars().take(width).collect()
            } else {
                format!("{:<width$}", msg, width = width)
            };

            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [path] [view info] [key hints]
        let hints_len = KEY_HINTS.len();
        let remaining = width.saturating_sub(hints_len);
        let info_len = self.view_info.chars().count();
        let path_budget = remaining.saturating_sub(info_len).saturating_sub(1);

        let path_display = truncate_front(self.path_str, path_budget);
        let gap = remaining
            .saturating_sub(path_display.chars().count())
            .saturating_sub(info_len);

        let spans = vec![
            Span::styled(path_display, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(gap)),
            Span::styled(self.view_info, Style::default().fg(Color::Cyan)),
            Span::styled(
                KEY_HINTS,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ),
        ];

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
