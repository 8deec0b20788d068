use chrono::{DateTime, Utc};
use uuid::Uuid;

use liachat_classify::classify;
use liachat_types::{Message, MessageKind, SessionFilter, SubmitError};

/// Seed content for a brand-new session.
const WELCOME: &str = "Welcome to LiaAI - Your AI-powered cyber assistant. \
I can help with chat, OS commands, and security queries.";

/// Seed content after a clear.
const CLEARED: &str = "Chat cleared. How can I assist you?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    AwaitingReply { seq: u64 },
}

/// Proof of an accepted submission.
///
/// Carries the epoch and submission sequence it was issued under, so a reply
/// arriving after a clear, or a duplicate completion, lands as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
    epoch: u64,
    seq: u64,
}

/// A single chat session: the ordered message log plus the idle/awaiting
/// state machine.
///
/// All mutators take `&mut self`; callers needing shared access serialize
/// through one lock (see [`crate::ChatClient`]). The log is append-only
/// except for [`ChatSession::clear`], which replaces it wholesale.
pub struct ChatSession {
    id: Uuid,
    messages: Vec<Message>,
    state: SessionState,
    epoch: u64,
    next_seq: u64,
    active_filter: SessionFilter,
    started_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            state: SessionState::Idle,
            epoch: 0,
            next_seq: 0,
            active_filter: SessionFilter::All,
            started_at: Utc::now(),
        };
        session.push(Message::new(MessageKind::System, WELCOME));
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current clear-generation. Bumped on every [`ChatSession::clear`].
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.state, SessionState::AwaitingReply { .. })
    }

    /// Append, keeping timestamps non-decreasing even if the wall clock
    /// steps backwards between captures.
    fn push(&mut self, mut message: Message) {
        if let Some(last) = self.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }
        self.messages.push(message);
    }

    /// Accept user text for one exchange.
    ///
    /// Rejected when the text trims to nothing or a reply is already in
    /// flight; a second submission is dropped, never queued. On acceptance
    /// the user message (untrimmed, as typed) is appended synchronously and
    /// the returned ticket must be redeemed with [`ChatSession::complete`].
    pub fn submit(&mut self, text: &str) -> Result<ReplyTicket, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.is_awaiting_reply() {
            return Err(SubmitError::Busy);
        }

        self.push(Message::new(MessageKind::User, text));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.state = SessionState::AwaitingReply { seq };
        Ok(ReplyTicket {
            epoch: self.epoch,
            seq,
        })
    }

    /// Deliver the reply for an accepted submission.
    ///
    /// The text is classified and appended, and the session returns to idle.
    /// Returns the appended message, or `None` when the ticket is stale: the
    /// session was cleared since it was issued, or this submission was
    /// already completed.
    pub fn complete(&mut self, ticket: ReplyTicket, text: &str) -> Option<&Message> {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                ticket_epoch = ticket.epoch,
                session_epoch = self.epoch,
                "discarding stale reply"
            );
            return None;
        }
        match self.state {
            SessionState::AwaitingReply { seq } if seq == ticket.seq => {}
            _ => return None,
        }

        self.push(Message::new(classify(text), text));
        self.state = SessionState::Idle;
        self.messages.last()
    }

    /// Reset to a single fresh system message and return to idle.
    ///
    /// Bumps the epoch so any in-flight reply is discarded on arrival; the
    /// underlying request is not aborted, its result just never lands.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.state = SessionState::Idle;
        self.messages.clear();
        self.push(Message::new(MessageKind::System, CLEARED));
    }

    pub fn active_filter(&self) -> SessionFilter {
        self.active_filter
    }

    /// Set the view filter. Purely a view parameter; the log is untouched.
    pub fn set_filter(&mut self, filter: SessionFilter) {
        self.active_filter = filter;
    }

    /// View through the active filter.
    pub fn filtered(&self) -> Vec<&Message> {
        self.filtered_with(self.active_filter)
    }

    /// View through an explicit filter. Under a specific kind, `user`
    /// messages are always included to preserve conversational context.
    pub fn filtered_with(&self, filter: SessionFilter) -> Vec<&Message> {
        match filter {
            SessionFilter::All => self.messages.iter().collect(),
            SessionFilter::Kind(kind) => self
                .messages
                .iter()
                .filter(|m| m.kind == kind || m.kind == MessageKind::User)
                .collect(),
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(session: &mut ChatSession, text: &str) -> ReplyTicket {
        session.submit(text).expect("submission accepted")
    }

    #[test]
    fn test_new_session_has_welcome_seed() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].kind, MessageKind::System);
        assert!(session.messages()[0].content.contains("Welcome to LiaAI"));
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn test_blank_submissions_never_append() {
        let mut session = ChatSession::new();
        assert_eq!(session.submit(""), Err(SubmitError::EmptyInput));
        assert_eq!(session.submit("   "), Err(SubmitError::EmptyInput));
        assert_eq!(session.submit("\n\t "), Err(SubmitError::EmptyInput));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_submit_appends_user_message_as_typed() {
        let mut session = ChatSession::new();
        submitted(&mut session, "  show processes  ");
        assert_eq!(session.messages().len(), 2);
        let user = &session.messages()[1];
        assert_eq!(user.kind, MessageKind::User);
        // Only the emptiness check trims; the log keeps the text as typed.
        assert_eq!(user.content, "  show processes  ");
        assert!(session.is_awaiting_reply());
    }

    #[test]
    fn test_second_submit_while_awaiting_is_rejected() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "first");
        assert_eq!(session.submit("second"), Err(SubmitError::Busy));
        assert_eq!(session.messages().len(), 2);

        session.complete(ticket, "hello");
        // One user message, one reply; the rejected submit left no trace.
        assert_eq!(session.messages().len(), 3);
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn test_complete_classifies_and_appends() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "show ports");
        let reply = session
            .complete(ticket, "🔍 Query: `SELECT port FROM listening_ports;`")
            .expect("reply lands");
        assert_eq!(reply.kind, MessageKind::Osquery);
        assert!(reply.content.starts_with("🔍 Query:"));
    }

    #[test]
    fn test_complete_is_single_shot() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "hi");
        assert!(session.complete(ticket, "hello").is_some());
        assert!(session.complete(ticket, "hello again").is_none());
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn test_clear_resets_to_single_seed() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "hi");
        session.complete(ticket, "hello");
        session.clear();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].kind, MessageKind::System);
        assert!(session.messages()[0].content.contains("Chat cleared"));
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn test_stale_reply_after_clear_is_discarded() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "hi");
        session.clear();
        assert!(session.complete(ticket, "late reply").is_none());
        assert_eq!(session.messages().len(), 1);

        // The session remains fully usable afterwards.
        let ticket = submitted(&mut session, "again");
        assert!(session.complete(ticket, "fresh reply").is_some());
    }

    #[test]
    fn test_clear_while_idle_still_bumps_epoch() {
        let mut session = ChatSession::new();
        let before = session.epoch();
        session.clear();
        assert_eq!(session.epoch(), before + 1);
    }

    #[test]
    fn test_filtered_view_keeps_user_messages() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "chat with me");
        session.complete(ticket, "sure, happy to chat");
        let ticket = submitted(&mut session, "show processes");
        session.complete(ticket, "🔍 Query: `SELECT pid FROM processes;`");

        let view = session.filtered_with(SessionFilter::Kind(MessageKind::Osquery));
        let kinds: Vec<MessageKind> = view.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::User,
                MessageKind::User,
                MessageKind::Osquery
            ]
        );
        // Session order is preserved.
        assert_eq!(view[0].content, "chat with me");
        assert_eq!(view[1].content, "show processes");
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "hello");
        session.complete(ticket, "hi");
        assert_eq!(session.filtered_with(SessionFilter::All).len(), 3);
    }

    #[test]
    fn test_active_filter_is_a_view_parameter() {
        let mut session = ChatSession::new();
        let ticket = submitted(&mut session, "hello");
        session.complete(ticket, "hi");

        session.set_filter(SessionFilter::Kind(MessageKind::Dashboard));
        assert_eq!(session.filtered().len(), 1); // just the user message
        assert_eq!(session.messages().len(), 3); // log untouched
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut session = ChatSession::new();
        for i in 0..5 {
            let ticket = submitted(&mut session, &format!("msg {i}"));
            session.complete(ticket, "ok");
        }
        let stamps: Vec<_> = session.messages().iter().map(|m| m.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }
}
