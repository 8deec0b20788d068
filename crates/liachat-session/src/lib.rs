//! Chat session state machine and driver for liachat
//!
//! This crate owns the session log: an append-only sequence of typed
//! messages, the idle/awaiting-reply state machine with epoch-guarded
//! cancellation, derived views (filtering, plain-text export), and the async
//! driver that feeds user text through a [`liachat_types::ResponseSource`].

pub mod driver;
pub mod export;
pub mod session;

pub use driver::{ChatClient, SendOutcome, SessionStatus, DEFAULT_REPLY_TIMEOUT};
pub use session::{ChatSession, ReplyTicket};
