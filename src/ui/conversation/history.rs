//! Conversation history display component

use crate::events::ConversationRole;
use crate::session::Message;
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Read-only view over the session's messages
#[derive(Clone, Copy)]
pub struct ConversationHistory<'a> {
    messages: &'a [Message],
    notice: Option<&'a str>,
    show_timestamps: bool,
}

impl<'a> ConversationHistory<'a> {
    pub fn new(messages: &'a [Message]) -> Self {
        Self {
            messages,
            notice: None,
            show_timestamps: true,
        }
    }

    /// Transient text shown under the messages (command output)
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }
}

impl Widget for ConversationHistory<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💬 Campus Chat Assistant")
            .title(
                ratatui::widgets::block::Title::from(Span::styled(
                    " ● Online ",
                    Style::default().fg(Color::Green),
                ))
                .alignment(Alignment::Right),
            );

        let inner_area = block.inner(area);
        block.render(area, buf);

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let mut all_lines: Vec<Line> = Vec::new();
        for message in self.messages {
            all_lines.extend(self.render_message(message, inner_area.width));
            // spacing between messages
            all_lines.push(Line::from(""));
        }

        if let Some(notice) = self.notice {
            for text in wrap_text(notice, inner_area.width.saturating_sub(2) as usize) {
                all_lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(text, Style::default().fg(Color::Yellow)),
                ]));
            }
        }

        // Keep the newest lines in view
        let height = inner_area.height as usize;
        let start = all_lines.len().saturating_sub(height);
        for (i, line) in all_lines[start..].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

impl ConversationHistory<'_> {
    /// Render a single message into lines
    fn render_message(&self, message: &Message, width: u16) -> Vec<Line<'static>> {
        let role = message.role();
        let mut header = vec![Span::styled(
            role.display_name(),
            self.get_content_style(role).add_modifier(Modifier::BOLD),
        )];
        if self.show_timestamps {
            let timestamp = message.created_at.with_timezone(&Local).format("%H:%M").to_string();
            header.push(Span::styled(format!(" {}", timestamp), Style::default().fg(Color::DarkGray)));
        }

        let mut lines = vec![Line::from(header)];
        for content_line in wrap_text(&message.content, width.saturating_sub(2) as usize) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(content_line, self.get_content_style(role)),
            ]));
        }

        lines
    }

    /// Get content style based on role
    fn get_content_style(&self, role: ConversationRole) -> Style {
        match role {
            ConversationRole::User => Style::default().fg(Color::Blue),
            ConversationRole::Assistant => Style::default().fg(Color::Green),
        }
    }
}

/// Wrap text to `width` columns, keeping explicit line breaks and blank lines
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + word_len + 1 > width {
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
            }
            if current_len > 0 {
                current_line.push(' ');
                current_len += 1;
            }
            current_line.push_str(word);
            current_len += word_len;
        }

        lines.push(current_line);
    }

    lines
}
