use crate::ui::conversation::commands::{
    command_entries, parse_slash_command, CommandEntry, ParsedCommand, SlashCommand,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};
use std::cell::{Cell, RefCell};
use std::str::FromStr;

pub const PLACEHOLDER: &str = "Ask about schedules, facilities, dining, or anything else...";

/// Result returned when the user interacts with the conversation composer
#[derive(Debug, PartialEq)]
pub enum ConversationResult {
    Submitted(String),
    Command(ParsedCommand),
    None,
}

/// State for the text field within the composer. `cursor` is a byte
/// offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct TextAreaState {
    pub content: String,
    pub cursor: usize,
}

/// Single-line composer for user input
#[derive(Clone)]
pub struct ConversationComposer {
    state: RefCell<TextAreaState>,
    placeholder: String,
    has_focus: bool,
    command_entries: Vec<CommandEntry>,
    filtered_commands: RefCell<Vec<CommandEntry>>,
    show_command_palette: Cell<bool>,
    selected_command: Cell<Option<usize>>,
}

impl ConversationComposer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            state: RefCell::new(TextAreaState::default()),
            placeholder: placeholder.into(),
            has_focus: false,
            command_entries: command_entries(),
            filtered_commands: RefCell::new(Vec::new()),
            show_command_palette: Cell::new(false),
            selected_command: Cell::new(None),
        }
    }

    /// Handle key input
    pub fn handle_key(&self, key: KeyEvent) -> ConversationResult {
        if key.kind != KeyEventKind::Press {
            return ConversationResult::None;
        }

        let mut state = self.state.borrow_mut();

        match key.code {
            KeyCode::Enter => {
                if self.show_command_palette.get()
                    && !names_full_command(&state.content)
                    && self.apply_selected_command(&mut state)
                {
                    return ConversationResult::None;
                }
                if !state.content.trim().is_empty() {
                    let content = std::mem::take(&mut state.content);
                    state.cursor = 0;
                    self.close_command_palette();
                    drop(state);
                    return match parse_slash_command(&content) {
                        Some(command) => ConversationResult::Command(command),
                        None => ConversationResult::Submitted(content),
                    };
                }
            }
            KeyCode::Up => {
                if self.show_command_palette.get() {
                    self.move_command_selection(-1);
                }
            }
            KeyCode::Down => {
                if self.show_command_palette.get() {
                    self.move_command_selection(1);
                }
            }
            KeyCode::Esc => {
                if self.show_command_palette.get() {
                    self.close_command_palette();
                }
            }
            KeyCode::Tab => {
                if self.show_command_palette.get() {
                    self.apply_selected_command(&mut state);
                }
            }
            KeyCode::Char(c) => {
                self.insert_str(&mut state, c.encode_utf8(&mut [0; 4]));
                self.sync_command_palette(&state);
            }
            KeyCode::Backspace => {
                if self.backspace(&mut state) {
                    self.sync_command_palette(&state);
                }
            }
            KeyCode::Delete => {
                if self.delete(&mut state) {
                    self.sync_command_palette(&state);
                }
            }
            KeyCode::Left => {
                state.cursor = prev_boundary(&state.content, state.cursor);
            }
            KeyCode::Right => {
                state.cursor = next_boundary(&state.content, state.cursor);
            }
            KeyCode::Home => {
                state.cursor = 0;
            }
            KeyCode::End => {
                state.cursor = state.content.len();
            }
            _ => {}
        }

        ConversationResult::None
    }

    /// Insert pasted text at the cursor, flattening line breaks
    pub fn paste(&self, text: &str) {
        let flattened = text.replace(['\r', '\n'], " ");
        let mut state = self.state.borrow_mut();
        self.insert_str(&mut state, &flattened);
        self.sync_command_palette(&state);
    }

    fn insert_str(&self, state: &mut TextAreaState, text: &str) {
        let cursor = state.cursor;
        state.content.insert_str(cursor, text);
        state.cursor += text.len();
    }

    /// Delete character before cursor
    fn backspace(&self, state: &mut TextAreaState) -> bool {
        if state.cursor == 0 {
            return false;
        }
        let start = prev_boundary(&state.content, state.cursor);
        state.content.replace_range(start..state.cursor, "");
        state.cursor = start;
        true
    }

    /// Delete character at cursor
    fn delete(&self, state: &mut TextAreaState) -> bool {
        if state.cursor >= state.content.len() {
            return false;
        }
        let end = next_boundary(&state.content, state.cursor);
        state.content.replace_range(state.cursor..end, "");
        true
    }

    fn sync_command_palette(&self, state: &TextAreaState) {
        let typing_command = state.content.starts_with('/') && !state.content.contains(char::is_whitespace);
        if typing_command {
            if !self.show_command_palette.get() {
                self.show_command_palette.set(true);
                self.selected_command.set(Some(0));
            }
            self.refresh_command_palette(state);
        } else if self.show_command_palette.get() {
            self.close_command_palette();
        }
    }

    fn close_command_palette(&self) {
        self.show_command_palette.set(false);
        self.filtered_commands.borrow_mut().clear();
        self.selected_command.set(None);
    }

    fn refresh_command_palette(&self, state: &TextAreaState) {
        let query = state.content.trim_start_matches('/').to_lowercase();
        let mut filtered = self.filtered_commands.borrow_mut();
        filtered.clear();

        for entry in &self.command_entries {
            if query.is_empty() || entry.keyword.starts_with(&query) {
                filtered.push(*entry);
            }
        }

        if filtered.is_empty() {
            self.selected_command.set(None);
        } else {
            let index = self.selected_command.get().unwrap_or(0);
            self.selected_command.set(Some(index.min(filtered.len() - 1)));
        }
    }

    fn move_command_selection(&self, delta: isize) {
        let filtered = self.filtered_commands.borrow();
        if filtered.is_empty() {
            self.selected_command.set(None);
            return;
        }

        let len = filtered.len() as isize;
        let current = self.selected_command.get().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.selected_command.set(Some(next as usize));
    }

    fn apply_selected_command(&self, state: &mut TextAreaState) -> bool {
        let filtered = self.filtered_commands.borrow();
        let Some(entry) = self.selected_command.get().and_then(|index| filtered.get(index).copied()) else {
            return false;
        };
        drop(filtered);

        state.content = format!("/{} ", entry.keyword);
        state.cursor = state.content.len();
        self.close_command_palette();
        true
    }

    /// Set focus state
    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    /// Get current content
    pub fn content(&self) -> String {
        self.state.borrow().content.clone()
    }

    /// Replace the content and move the cursor to the end
    pub fn set_content(&self, content: &str) {
        let mut state = self.state.borrow_mut();
        state.content = content.to_string();
        state.cursor = state.content.len();
        drop(state);
        self.close_command_palette();
    }

    /// Clear content
    pub fn clear(&self) {
        self.set_content("");
    }

    pub fn is_palette_open(&self) -> bool {
        self.show_command_palette.get()
    }
}

impl Widget for &ConversationComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state.borrow();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("✏️ Ask the assistant")
            .style(if self.has_focus {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner_area = block.inner(area);
        block.render(area, buf);

        if state.content.is_empty() {
            let placeholder_line = Line::from(vec![Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )]);
            buf.set_line(inner_area.x, inner_area.y, &placeholder_line, inner_area.width);
        } else {
            let mut content = state.content.clone();
            if self.has_focus {
                content.insert(state.cursor.min(content.len()), '▌');
            }
            let line = Line::from(vec![Span::raw(content)]);
            buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
        }

        if self.show_command_palette.get() {
            let filtered = self.filtered_commands.borrow();
            let palette_height = (filtered.len().min(5) + 2) as u16;
            let palette_area = Rect {
                x: area.x,
                y: area.y.saturating_sub(palette_height),
                width: area.width,
                height: palette_height.min(area.y),
            };
            if palette_area.height == 0 {
                return;
            }

            Clear.render(palette_area, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .title("Commands")
                .style(Style::default().fg(Color::Blue));
            let inner = block.inner(palette_area);
            block.render(palette_area, buf);

            let selected = self.selected_command.get();
            for (index, entry) in filtered.iter().enumerate().take(inner.height as usize) {
                let style = if selected == Some(index) {
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                let line = Line::from(vec![
                    Span::styled(format!("/{}", entry.keyword), style),
                    Span::styled(" - ", Style::default().fg(Color::DarkGray)),
                    Span::styled(entry.description, Style::default().fg(Color::Gray)),
                ]);
                buf.set_line(inner.x, inner.y + index as u16, &line, inner.width);
            }
        }
    }
}

/// Input spells out a command's full name; aliases don't count, so the
/// palette selection wins over them
fn names_full_command(input: &str) -> bool {
    input
        .trim_start()
        .strip_prefix('/')
        .and_then(|rest| rest.split_whitespace().next())
        .is_some_and(|head| SlashCommand::from_str(head).is_ok())
}

fn prev_boundary(text: &str, cursor: usize) -> usize {
    text[..cursor].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_boundary(text: &str, cursor: usize) -> usize {
    text[cursor..].chars().next().map(|c| cursor + c.len_utf8()).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(composer: &ConversationComposer, text: &str) {
        for c in text.chars() {
            composer.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_and_clears() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        type_text(&composer, "food?");
        assert_eq!(
            composer.handle_key(press(KeyCode::Enter)),
            ConversationResult::Submitted("food?".to_string())
        );
        assert_eq!(composer.content(), "");
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        type_text(&composer, "   ");
        assert_eq!(composer.handle_key(press(KeyCode::Enter)), ConversationResult::None);
        assert_eq!(composer.content(), "   ");
    }

    #[test]
    fn editing_handles_multibyte_characters() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        type_text(&composer, "café");
        composer.handle_key(press(KeyCode::Left));
        composer.handle_key(press(KeyCode::Backspace));
        assert_eq!(composer.content(), "caé");
        composer.handle_key(press(KeyCode::Delete));
        assert_eq!(composer.content(), "ca");
        composer.handle_key(press(KeyCode::Home));
        type_text(&composer, "é");
        assert_eq!(composer.content(), "éca");
    }

    #[test]
    fn slash_input_opens_palette_and_submits_commands() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        type_text(&composer, "/he");
        assert!(composer.is_palette_open());

        composer.handle_key(press(KeyCode::Tab));
        assert_eq!(composer.content(), "/help ");
        assert!(!composer.is_palette_open());

        match composer.handle_key(press(KeyCode::Enter)) {
            ConversationResult::Command(parsed) => assert_eq!(parsed.command, SlashCommand::Help),
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn enter_on_complete_command_runs_it() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        type_text(&composer, "/bye");
        match composer.handle_key(press(KeyCode::Enter)) {
            ConversationResult::Command(parsed) => assert_eq!(parsed.command, SlashCommand::Bye),
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn palette_selection_wins_over_short_alias() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        type_text(&composer, "/q");
        assert!(composer.is_palette_open());

        assert_eq!(composer.handle_key(press(KeyCode::Enter)), ConversationResult::None);
        assert_eq!(composer.content(), "/quick ");

        type_text(&composer, "2");
        match composer.handle_key(press(KeyCode::Enter)) {
            ConversationResult::Command(parsed) => {
                assert_eq!(parsed.command, SlashCommand::Quick);
                assert_eq!(parsed.argument(), Some("2"));
            }
            other => panic!("expected command, got {other:?}"),
        }
    }

    #[test]
    fn paste_flattens_newlines() {
        let composer = ConversationComposer::new(PLACEHOLDER);
        composer.paste("dining\nhours");
        assert_eq!(composer.content(), "dining hours");
    }
}
