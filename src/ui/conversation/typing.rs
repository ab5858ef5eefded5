//! "Assistant is typing..." indicator shown while a reply is pending

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Typing indicator with animated dots
#[derive(Debug, Clone, Copy)]
pub struct TypingIndicator {
    is_typing: bool,
    pending: usize,
    frame: u128,
}

impl TypingIndicator {
    pub fn new(is_typing: bool, pending: usize) -> Self {
        let frame = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            / 300;
        Self { is_typing, pending, frame }
    }

    /// Pin the animation frame
    #[allow(dead_code)]
    pub fn with_frame(mut self, frame: u128) -> Self {
        self.frame = frame;
        self
    }

    fn dots(&self) -> &'static str {
        match self.frame % 4 {
            0 => ".",
            1 => "..",
            2 => "...",
            _ => "   ",
        }
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.is_typing || area.height == 0 {
            return;
        }

        let mut spans = vec![
            Span::styled("● ", Style::default().fg(Color::Cyan)),
            Span::styled("Assistant is typing", Style::default().fg(Color::Gray)),
            Span::styled(self.dots(), Style::default().fg(Color::Yellow)),
        ];
        if self.pending > 1 {
            spans.push(Span::styled(
                format!("  ({} queued)", self.pending - 1),
                Style::default().fg(Color::DarkGray),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf.get(x, y).symbol().to_string()).collect()
    }

    #[test]
    fn renders_only_while_typing() {
        let area = Rect::new(0, 0, 40, 1);

        let mut idle = Buffer::empty(area);
        TypingIndicator::new(false, 0).render(area, &mut idle);
        assert_eq!(row_text(&idle, 0).trim(), "");

        let mut busy = Buffer::empty(area);
        TypingIndicator::new(true, 1).with_frame(2).render(area, &mut busy);
        assert!(row_text(&busy, 0).contains("Assistant is typing..."));
    }

    #[test]
    fn shows_queued_count() {
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);
        TypingIndicator::new(true, 3).with_frame(0).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("(2 queued)"));
    }
}
