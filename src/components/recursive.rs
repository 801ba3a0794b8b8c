use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::recursive::RecursiveLine;

/// Indented tree of the current directory, capped at `limit` lines.
pub struct RecursiveWidget<'a> {
    lines: &'a [RecursiveLine],
    scroll: usize,
    limit: usize,
}

impl<'a> RecursiveWidget<'a> {
    pub fn new(lines: &'a [RecursiveLine], scroll: usize, limit: usize) -> Self {
        Self {
            lines,
            scroll,
            limit,
        }
    }
}

impl<'a> Widget for RecursiveWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let shown = self.lines.len().min(self.limit);
        let hidden = self.lines.len() - shown;
        // Keep the last row for the truncation notice.
        let rows = if hidden > 0 {
            area.height.saturating_sub(1)
        } else {
            area.height
        } as usize;

        for (i, line) in self.lines[..shown].iter().skip(self.scroll).take(rows).enumerate() {
            let style = if line.depth == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let text = Line::from(Span::styled(line.label(), style));
            buf.set_line(area.x, area.y + i as u16, &text, area.width);
        }

        if hidden > 0 {
            let notice = Line::from(Span::styled(
                format!("… {hidden} more not shown"),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
            buf.set_line(area.x, area.y + area.height - 1, &notice, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<RecursiveLine> {
        ["a.txt", "sub", "b.txt", "c.txt"]
            .iter()
            .zip([0, 0, 1, 1])
            .map(|(name, depth)| RecursiveLine {
                depth,
                name: name.to_string(),
            })
            .collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_indented_labels() {
        let lines = lines();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        RecursiveWidget::new(&lines, 0, 100).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "a.txt");
        assert_eq!(row(&buf, 1), "sub");
        assert_eq!(row(&buf, 2), "    b.txt");
        assert_eq!(row(&buf, 4), "");
    }

    #[test]
    fn display_limit_adds_notice() {
        let lines = lines();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        RecursiveWidget::new(&lines, 0, 2).render(area, &mut buf);
        assert_eq!(row(&buf, 0), "a.txt");
        assert_eq!(row(&buf, 1), "sub");
        assert_eq!(row(&buf, 2), "");
        assert_eq!(row(&buf, 4), "… 2 more not shown");
    }
}
