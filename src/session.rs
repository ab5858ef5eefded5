use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::config::PendingPolicy;
use crate::events::ConversationRole;
use crate::resolver;

pub const GREETING: &str = "Hello! I'm your Smart Campus Assistant. I can help you with schedules, \
facilities, dining, library services, and administrative procedures. How can I assist you today?";

/// A single chat message. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub is_from_user: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(content: String, is_from_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            is_from_user,
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> ConversationRole {
        if self.is_from_user {
            ConversationRole::User
        } else {
            ConversationRole::Assistant
        }
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing changed
    Ignored,
    /// A reply is pending and the policy refuses overlapping submissions
    Rejected,
    /// The user message was appended. `arm_timer` is false when the reply
    /// was queued behind one whose timer is already running.
    Accepted { submission_id: Uuid, arm_timer: bool },
}

/// Result of appending a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyCompletion {
    pub message_id: Uuid,
    /// Queued submission whose timer should start now
    pub next_submission: Option<Uuid>,
}

#[derive(Debug, Clone)]
struct PendingReply {
    submission_id: Uuid,
    query: String,
}

/// Messages, draft and composing state for one UI session
#[derive(Debug, Clone)]
pub struct ConversationSession {
    messages: Vec<Message>,
    draft_input: String,
    pending: VecDeque<PendingReply>,
    policy: PendingPolicy,
}

impl ConversationSession {
    /// New session opened with the assistant's greeting
    pub fn new(policy: PendingPolicy) -> Self {
        let mut session = Self::empty(policy);
        session.messages.push(Message::new(GREETING.to_string(), false));
        session
    }

    /// New session without the greeting
    pub fn empty(policy: PendingPolicy) -> Self {
        Self {
            messages: Vec::new(),
            draft_input: String::new(),
            pending: VecDeque::new(),
            policy,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[allow(dead_code)]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True while at least one reply has not been appended yet
    pub fn is_composing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft_input = text.into();
    }

    pub fn policy(&self) -> PendingPolicy {
        self.policy
    }

    /// Append a user message and register its pending reply
    pub fn submit_user_message(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank submission");
            return SubmitOutcome::Ignored;
        }

        if self.is_composing() && self.policy == PendingPolicy::Reject {
            tracing::info!(pending = self.pending.len(), "rejecting submission while composing");
            return SubmitOutcome::Rejected;
        }

        let message = Message::new(text.to_string(), true);
        let submission_id = message.id;
        self.messages.push(message);
        self.draft_input.clear();

        let arm_timer = self.pending.is_empty();
        self.pending.push_back(PendingReply {
            submission_id,
            query: text.to_string(),
        });

        tracing::info!(%submission_id, queued = !arm_timer, "user message accepted");
        SubmitOutcome::Accepted { submission_id, arm_timer }
    }

    /// Resolve and append the reply for the oldest pending submission.
    /// Returns `None` when `submission_id` is not at the head of the queue.
    pub fn complete_reply(&mut self, submission_id: Uuid) -> Option<ReplyCompletion> {
        match self.pending.front() {
            Some(head) if head.submission_id == submission_id => {}
            _ => {
                tracing::warn!(%submission_id, "ignoring reply for unknown or out-of-order submission");
                return None;
            }
        }

        let pending = self.pending.pop_front()?;
        let reply = Message::new(resolver::resolve(&pending.query).to_string(), false);
        let message_id = reply.id;
        self.messages.push(reply);

        let next_submission = self.pending.front().map(|next| next.submission_id);
        tracing::info!(%submission_id, topic = resolver::classify(&pending.query).slug(), "assistant reply appended");

        Some(ReplyCompletion {
            message_id,
            next_submission,
        })
    }
}
