use anyhow::{Context, Result};

use crate::config::Config;
use crate::events::TuiEvent;
use crate::tui::{self, EventHandler, Tui};
use crate::ui::{self, conversation::{ConversationAction, ConversationManager}};

/// Interactive assistant session bound to the terminal
pub struct App {
    manager: ConversationManager,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            manager: ConversationManager::new(config),
            should_quit: false,
        }
    }

    /// Take over the terminal and run until the user exits
    pub async fn run(config: Config) -> Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init()?;

        let mut app = App::new(&config);
        let result = app.event_loop(&mut terminal, &config).await;

        app.manager.shutdown();
        tui::restore()?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui, config: &Config) -> Result<()> {
        let mut events = EventHandler::new(config.tick_rate());
        tracing::info!(
            delay_ms = config.reply_delay_ms,
            policy = ?config.pending_policy,
            "assistant session started"
        );

        self.draw(terminal)?;
        while !self.should_quit {
            let Some(event) = events.next().await else {
                break;
            };
            self.handle_event(event);
            self.draw(terminal)?;
        }

        tracing::info!(messages = self.manager.session().messages().len(), "assistant session ended");
        Ok(())
    }

    fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => {
                if self.manager.handle_key(key) == ConversationAction::Exit {
                    self.should_quit = true;
                }
            }
            TuiEvent::Paste(text) => self.manager.handle_paste(&text),
            TuiEvent::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
            }
            TuiEvent::Tick => {
                self.manager.process_pending_replies();
            }
        }
    }

    fn draw(&self, terminal: &mut Tui) -> Result<()> {
        terminal
            .draw(|frame| ui::draw(frame, &self.manager))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn ticks_deliver_replies_and_bye_quits() {
        let mut config = Config::default();
        config.reply_delay_ms = 100;
        let mut app = App::new(&config);

        for c in "/quick 1".chars() {
            app.handle_event(TuiEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
        }
        app.handle_event(TuiEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(app.manager.session().is_composing());

        tokio::time::sleep(Duration::from_millis(150)).await;
        app.handle_event(TuiEvent::Tick);
        assert!(!app.manager.session().is_composing());
        assert!(app.manager.session().last_message().unwrap().content.contains("Room A204"));

        app.handle_event(TuiEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit);
    }
}
