#![deny(unsafe_code)]

/// Chat backend contract and reply decoding.
pub mod backend;
pub mod error;
/// Send-message flow shared by every view.
pub mod exchange;
/// Domain entities: senders, messages and the append-only transcript.
pub mod message;
pub mod wire;

pub use backend::{ChatBackend, LocalBoxFuture, decode_reply, encode_request};
pub use error::{ExchangeError, ExchangeResult};
pub use exchange::{ChatExchange, ChatView, SendOutcome};
pub use message::{ChatMessage, MessageId, Sender, Transcript};
pub use wire::{ChatReply, ChatRequest};
