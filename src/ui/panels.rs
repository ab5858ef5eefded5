//! Side panels: quick actions and campus service status

use crate::panels::{QuickAction, StatusCard};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Quick-action list with the function key bound to each entry
pub struct QuickActionsPanel<'a> {
    actions: &'a [QuickAction],
}

impl<'a> QuickActionsPanel<'a> {
    pub fn new(actions: &'a [QuickAction]) -> Self {
        Self { actions }
    }
}

impl Widget for QuickActionsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💬 Quick Actions");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            "Get instant help with common campus queries",
            Style::default().fg(Color::DarkGray),
        ))];
        for (index, action) in self.actions.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("F{} ", index + 1), Style::default().fg(Color::Cyan)),
                Span::raw(format!("{} ", action.icon)),
                Span::raw(action.label),
            ]));
        }

        for (i, line) in lines.iter().enumerate().take(inner.height as usize) {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

/// Display-only service status cards
pub struct StatusPanel<'a> {
    cards: &'a [StatusCard],
}

impl<'a> StatusPanel<'a> {
    pub fn new(cards: &'a [StatusCard]) -> Self {
        Self { cards }
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Campus Services");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            "Current status of key services",
            Style::default().fg(Color::DarkGray),
        ))];
        for card in self.cards {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", card.icon)),
                Span::styled(card.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(format!("[{}]", card.status), Style::default().fg(Color::Green)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", card.description),
                Style::default().fg(Color::DarkGray),
            )));
        }

        for (i, line) in lines.iter().enumerate().take(inner.height as usize) {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}

/// Title banner across the top of the screen
pub struct Banner;

impl Widget for Banner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = [
            Line::from(Span::styled(
                "✨ Smart Campus Assistant",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your AI-powered guide to campus life. Get instant answers about schedules, facilities, dining, and more.",
                Style::default().fg(Color::Gray),
            )),
        ];
        for (i, line) in lines.iter().enumerate().take(inner.height as usize) {
            buf.set_line(inner.x + 1, inner.y + i as u16, line, inner.width.saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{QUICK_ACTIONS, STATUS_CARDS};

    fn buffer_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf.get(x, y).symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn quick_actions_list_labels_with_keys() {
        let area = Rect::new(0, 0, 40, 9);
        let mut buf = Buffer::empty(area);
        QuickActionsPanel::new(&QUICK_ACTIONS).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("F1"));
        assert!(text.contains("Class Schedule"));
        assert!(text.contains("F6"));
        assert!(text.contains("Student Activities"));
    }

    #[test]
    fn status_panel_shows_each_status() {
        let area = Rect::new(0, 0, 50, 12);
        let mut buf = Buffer::empty(area);
        StatusPanel::new(&STATUS_CARDS).render(area, &mut buf);

        let text = buffer_text(&buf);
        for card in STATUS_CARDS.iter() {
            assert!(text.contains(card.title), "missing {}", card.title);
            assert!(text.contains(&format!("[{}]", card.status)));
        }
    }
}
