//! Terminal rendering of the assistant screen

pub mod conversation;
pub mod panels;

use crate::panels::{QUICK_ACTIONS, STATUS_CARDS};
use conversation::ConversationManager;
use panels::{Banner, QuickActionsPanel, StatusPanel};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
    Frame,
};

/// Draw the full screen: banner on top, panels left, chat right
pub fn draw(frame: &mut Frame, manager: &ConversationManager) {
    let area = frame.size();
    render_screen(manager, area, frame.buffer_mut());
}

pub fn render_screen(manager: &ConversationManager, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(10)])
        .split(area);

    Banner.render(rows[0], buf);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
        .split(rows[1]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(QUICK_ACTIONS.len() as u16 + 3),
            Constraint::Min(4),
        ])
        .split(columns[0]);

    QuickActionsPanel::new(&QUICK_ACTIONS).render(side[0], buf);
    StatusPanel::new(&STATUS_CARDS).render(side[1], buf);

    manager.render_conversation_ui(columns[1], buf);
}
