use crate::config::{Config, PendingPolicy};
use crate::events::ReplyReady;
use crate::panels::{quick_action, QuickAction, STATUS_CARDS};
use crate::scheduler::ReplyScheduler;
use crate::session::{ConversationSession, SubmitOutcome};
use crate::ui::conversation::composer::{ConversationResult, PLACEHOLDER};
use crate::ui::conversation::{
    get_help_text, ConversationComposer, ConversationHistory, ParsedCommand, SlashCommand, TypingIndicator,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};
use tokio::sync::mpsc;

/// Actions that can be requested by the conversation manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    Exit,
}

/// Owns the session and drives submissions, reply timers and commands
pub struct ConversationManager {
    session: ConversationSession,
    composer: ConversationComposer,
    scheduler: ReplyScheduler,
    ready_receiver: mpsc::UnboundedReceiver<ReplyReady>,
    notice: Option<String>,
    show_timestamps: bool,
}

impl ConversationManager {
    pub fn new(config: &Config) -> Self {
        let (scheduler, ready_receiver) = ReplyScheduler::new(config.reply_delay());
        let mut composer = ConversationComposer::new(PLACEHOLDER);
        composer.set_focus(true);

        Self {
            session: ConversationSession::new(config.pending_policy),
            composer,
            scheduler,
            ready_receiver,
            notice: None,
            show_timestamps: config.ui.show_timestamps,
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Submit text as the user and arm the reply timer when needed.
    /// A rejected submission leaves the composer and draft untouched.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let outcome = self.session.submit_user_message(text);
        match outcome {
            SubmitOutcome::Accepted { submission_id, arm_timer } => {
                self.notice = None;
                self.composer.clear();
                if arm_timer {
                    self.scheduler.schedule(submission_id);
                }
            }
            SubmitOutcome::Rejected => {
                self.notice = Some("Still answering your previous question. Try again in a moment.".to_string());
            }
            SubmitOutcome::Ignored => {}
        }
        outcome
    }

    /// Submit the question of the 1-based quick action `number`
    pub fn trigger_quick_action(&mut self, number: usize) -> Option<SubmitOutcome> {
        let action = quick_action(number)?;
        tracing::debug!(label = action.label, "quick action triggered");
        Some(self.submit(action.query))
    }

    /// Append replies whose timers have fired (called from the main loop)
    pub fn process_pending_replies(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(ReplyReady { submission_id }) = self.ready_receiver.try_recv() {
            self.scheduler.complete(submission_id);
            if let Some(completion) = self.session.complete_reply(submission_id) {
                tracing::debug!(message_id = %completion.message_id, "reply delivered to history");
                appended += 1;
                if let Some(next) = completion.next_submission {
                    self.scheduler.schedule(next);
                }
            }
        }
        appended
    }

    /// Wait for the next timer to fire and append its reply
    #[allow(dead_code)]
    pub async fn next_reply(&mut self) -> bool {
        if !self.session.is_composing() {
            return false;
        }
        let Some(ReplyReady { submission_id }) = self.ready_receiver.recv().await else {
            return false;
        };
        self.scheduler.complete(submission_id);
        match self.session.complete_reply(submission_id) {
            Some(completion) => {
                if let Some(next) = completion.next_submission {
                    self.scheduler.schedule(next);
                }
                true
            }
            None => false,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> ConversationAction {
        if key.kind != KeyEventKind::Press {
            return ConversationAction::None;
        }

        match key.code {
            KeyCode::F(n) if (1..=6).contains(&n) => {
                self.trigger_quick_action(n as usize);
                return ConversationAction::None;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ConversationAction::Exit;
            }
            KeyCode::Esc if !self.composer.is_palette_open() => {
                return ConversationAction::Exit;
            }
            _ => {}
        }

        let typed = self.composer.content();
        let action = match self.composer.handle_key(key) {
            ConversationResult::Submitted(input) => {
                if self.submit(&input) == SubmitOutcome::Rejected {
                    self.composer.set_content(&input);
                }
                ConversationAction::None
            }
            ConversationResult::Command(command) => self.handle_slash_command(command, &typed),
            ConversationResult::None => ConversationAction::None,
        };

        self.session.update_draft(self.composer.content());
        action
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.composer.paste(text);
        self.session.update_draft(self.composer.content());
    }

    /// Cancel outstanding timers before the UI goes away
    pub fn shutdown(&mut self) {
        if self.session.is_composing() {
            tracing::info!(pending = self.session.pending_replies(), "dropping pending replies on exit");
        }
        if !self.session.draft_input().is_empty() {
            tracing::debug!(chars = self.session.draft_input().chars().count(), "discarding unsent draft");
        }
        self.scheduler.cancel_all();
    }

    /// Handle slash commands. `typed` is the composer text that produced the
    /// command; it is put back when a `/quick` submission is rejected.
    fn handle_slash_command(&mut self, command: ParsedCommand, typed: &str) -> ConversationAction {
        match command.command {
            SlashCommand::Quick => {
                match command.quick_action_target() {
                    Some(action) => {
                        if self.submit(action.query) == SubmitOutcome::Rejected {
                            self.composer.set_content(typed);
                        }
                    }
                    None => self.notice = Some(quick_action_usage()),
                }
                ConversationAction::None
            }
            SlashCommand::Status => {
                self.notice = Some(status_summary());
                ConversationAction::None
            }
            SlashCommand::Help => {
                let mut help = get_help_text();
                if self.session.policy() == PendingPolicy::Reject {
                    help.push_str("\nNew questions are ignored until the current answer arrives.");
                }
                self.notice = Some(help);
                ConversationAction::None
            }
            SlashCommand::Bye => ConversationAction::Exit,
        }
    }

    /// Render history, typing indicator and composer
    pub fn render_conversation_ui(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // History
                Constraint::Length(1), // Typing indicator
                Constraint::Length(3), // Composer
            ])
            .split(area);

        ConversationHistory::new(self.session.messages())
            .notice(self.notice())
            .show_timestamps(self.show_timestamps)
            .render(chunks[0], buf);

        TypingIndicator::new(self.session.is_composing(), self.session.pending_replies()).render(chunks[1], buf);

        (&self.composer).render(chunks[2], buf);
    }
}

fn quick_action_usage() -> String {
    let mut usage = String::from("Usage: /quick <number>\n");
    for (index, action) in crate::panels::QUICK_ACTIONS.iter().enumerate() {
        usage.push_str(&format!("\n{}. {}", index + 1, describe_action(action)));
    }
    usage
}

fn describe_action(action: &QuickAction) -> String {
    format!("{} - \"{}\"", action.label, action.query)
}

fn status_summary() -> String {
    let mut summary = String::from("Campus services:\n");
    for card in STATUS_CARDS.iter() {
        summary.push_str(&format!("\n{}: {} ({})", card.title, card.status, card.description));
    }
    summary
}
