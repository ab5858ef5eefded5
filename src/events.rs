use uuid::Uuid;

/// Terminal-side events fed into the application loop
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press event
    Key(crossterm::event::KeyEvent),

    /// Paste event
    Paste(String),

    /// Terminal resize
    Resize(u16, u16),

    /// Periodic tick used for animations and draining finished replies
    Tick,
}

/// Sent by the reply scheduler once a submission's delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyReady {
    pub submission_id: Uuid,
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationRole {
    User,
    Assistant,
}

impl ConversationRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationRole::User => "You",
            ConversationRole::Assistant => "Assistant",
        }
    }
}
