use std::cell::{Ref, RefCell};

use crate::backend::ChatBackend;
use crate::message::{ChatMessage, MessageId, Sender, Transcript};
use crate::wire::ChatRequest;

/// Surface the exchange reads input from and renders messages into.
pub trait ChatView {
    fn input_value(&self) -> String;
    fn clear_input(&self);
    /// Appends one message and keeps the newest message in view.
    fn render(&self, message: &ChatMessage);
}

/// Result of one send attempt. Failures are already rendered, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing changed.
    Skipped,
    Replied(MessageId),
    Fallback(MessageId),
}

/// Owns the transcript and talks to the backend on behalf of one widget.
pub struct ChatExchange<B> {
    backend: B,
    transcript: RefCell<Transcript>,
    fallback_message: String,
}

impl<B: ChatBackend> ChatExchange<B> {
    pub fn new(backend: B, fallback_message: impl Into<String>) -> Self {
        Self {
            backend,
            transcript: RefCell::new(Transcript::new()),
            fallback_message: fallback_message.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn transcript(&self) -> Ref<'_, Transcript> {
        self.transcript.borrow()
    }

    /// Trims raw input; `None` means there is nothing to send.
    ///
    /// A byte order mark counts as whitespace, as it does for browser `trim()`.
    pub fn prepare(raw: &str) -> Option<String> {
        let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Sends the view's current input.
    ///
    /// The user message is rendered and the input cleared before the request is
    /// issued. Any backend failure renders the fallback bot message instead of a
    /// reply. There is no retry and no timeout beyond the transport's own.
    pub async fn send_message<V: ChatView + ?Sized>(&self, view: &V) -> SendOutcome {
        let Some(text) = Self::prepare(&view.input_value()) else {
            return SendOutcome::Skipped;
        };

        self.append(view, Sender::User, text.clone());
        view.clear_input();

        match self.backend.send(ChatRequest::new(text)).await {
            Ok(reply) => SendOutcome::Replied(self.append(view, Sender::Bot, reply.response)),
            Err(error) => {
                tracing::error!(
                    stage = error.stage(),
                    endpoint = self.backend.endpoint(),
                    "error sending message: {error}"
                );
                let fallback = self.fallback_message.clone();
                SendOutcome::Fallback(self.append(view, Sender::Bot, fallback))
            }
        }
    }

    fn append<V: ChatView + ?Sized>(&self, view: &V, sender: Sender, text: String) -> MessageId {
        // Release the borrow before rendering so views may read the transcript.
        let message = self.transcript.borrow_mut().push(sender, text).clone();
        view.render(&message);
        message.id
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use futures::executor::block_on;

    use super::*;
    use crate::backend::{LocalBoxFuture, decode_reply};
    use crate::error::{ExchangeError, ExchangeResult};
    use crate::wire::ChatReply;

    const FALLBACK: &str = "Sorry, I'm having trouble connecting to the server.";

    #[derive(Default)]
    struct ScriptedBackend {
        replies: RefCell<VecDeque<ExchangeResult<ChatReply>>>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn replying(reply: ExchangeResult<ChatReply>) -> Self {
            let backend = Self::default();
            backend.replies.borrow_mut().push_back(reply);
            backend
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn endpoint(&self) -> &str {
            "/chat"
        }

        fn send<'a>(
            &'a self,
            request: ChatRequest,
        ) -> LocalBoxFuture<'a, ExchangeResult<ChatReply>> {
            self.requests.borrow_mut().push(request);
            let reply = self
                .replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ExchangeError::transport("scripted", "/chat", "no reply")));
            Box::pin(std::future::ready(reply))
        }
    }

    #[derive(Default)]
    struct RecordingView {
        input: RefCell<String>,
        rendered: RefCell<Vec<ChatMessage>>,
    }

    impl RecordingView {
        fn with_input(input: &str) -> Self {
            let view = Self::default();
            *view.input.borrow_mut() = input.to_string();
            view
        }
    }

    impl ChatView for RecordingView {
        fn input_value(&self) -> String {
            self.input.borrow().clone()
        }

        fn clear_input(&self) {
            self.input.borrow_mut().clear();
        }

        fn render(&self, message: &ChatMessage) {
            self.rendered.borrow_mut().push(message.clone());
        }
    }

    fn ok_reply(text: &str) -> ExchangeResult<ChatReply> {
        Ok(ChatReply {
            response: text.to_string(),
        })
    }

    #[test]
    fn trimmed_input_is_sent_and_field_cleared() {
        let exchange = ChatExchange::new(ScriptedBackend::replying(ok_reply("Hello!")), FALLBACK);
        let view = RecordingView::with_input("   is this link safe?  \n");

        block_on(exchange.send_message(&view));

        assert_eq!(view.input_value(), "");
        let rendered = view.rendered.borrow();
        assert_eq!(rendered[0].sender, Sender::User);
        assert_eq!(rendered[0].text, "is this link safe?");
        assert_eq!(
            exchange.backend().requests.borrow().as_slice(),
            &[ChatRequest::new("is this link safe?")]
        );
    }

    #[test]
    fn whitespace_only_input_is_a_noop() {
        let exchange = ChatExchange::new(ScriptedBackend::replying(ok_reply("unused")), FALLBACK);
        let view = RecordingView::with_input(" \t  ");

        let outcome = block_on(exchange.send_message(&view));

        assert_eq!(outcome, SendOutcome::Skipped);
        assert_eq!(view.input_value(), " \t  ");
        assert!(view.rendered.borrow().is_empty());
        assert!(exchange.backend().requests.borrow().is_empty());
        assert!(exchange.transcript().is_empty());
    }

    #[test]
    fn byte_order_mark_only_input_is_a_noop() {
        let exchange = ChatExchange::new(ScriptedBackend::replying(ok_reply("unused")), FALLBACK);
        let view = RecordingView::with_input("\u{FEFF} ");

        let outcome = block_on(exchange.send_message(&view));

        assert_eq!(outcome, SendOutcome::Skipped);
        assert_eq!(view.input_value(), "\u{FEFF} ");
        assert!(view.rendered.borrow().is_empty());
        assert!(exchange.backend().requests.borrow().is_empty());
    }

    #[test]
    fn reply_is_appended_after_user_message() {
        let exchange = ChatExchange::new(ScriptedBackend::replying(ok_reply("Hello!")), FALLBACK);
        let view = RecordingView::with_input("hi");

        let outcome = block_on(exchange.send_message(&view));

        let rendered = view.rendered.borrow();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].sender, Sender::Bot);
        assert_eq!(rendered[1].text, "Hello!");
        assert_eq!(outcome, SendOutcome::Replied(rendered[1].id));
    }

    #[test]
    fn transport_failure_renders_single_fallback() {
        let exchange = ChatExchange::new(
            ScriptedBackend::replying(Err(ExchangeError::transport(
                "send-chat-request",
                "/chat",
                "NetworkError when attempting to fetch resource.",
            ))),
            FALLBACK,
        );
        let view = RecordingView::with_input("hello?");

        let outcome = block_on(exchange.send_message(&view));

        let rendered = view.rendered.borrow();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].sender, Sender::Bot);
        assert_eq!(rendered[1].text, FALLBACK);
        assert!(matches!(outcome, SendOutcome::Fallback(_)));
    }

    #[test]
    fn non_success_status_renders_fallback() {
        let exchange = ChatExchange::new(
            ScriptedBackend::replying(decode_reply(502, "Bad Gateway")),
            FALLBACK,
        );
        let view = RecordingView::with_input("hello?");

        block_on(exchange.send_message(&view));

        let bot_messages = view
            .rendered
            .borrow()
            .iter()
            .filter(|message| message.sender == Sender::Bot)
            .map(|message| message.text.clone())
            .collect::<Vec<_>>();
        assert_eq!(bot_messages, vec![FALLBACK.to_string()]);
    }

    #[test]
    fn transcript_mirrors_rendered_messages() {
        let backend = ScriptedBackend::replying(ok_reply("first"));
        backend
            .replies
            .borrow_mut()
            .push_back(decode_reply(200, "not json"));
        let exchange = ChatExchange::new(backend, FALLBACK);

        let view = RecordingView::with_input("one");
        block_on(exchange.send_message(&view));
        *view.input.borrow_mut() = "two".to_string();
        block_on(exchange.send_message(&view));

        let transcript = exchange.transcript();
        assert_eq!(transcript.messages(), view.rendered.borrow().as_slice());
        let texts = transcript
            .messages()
            .iter()
            .map(|message| message.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["one", "first", "two", FALLBACK]);
    }

    #[test]
    fn prepare_trims_and_rejects_blank() {
        assert_eq!(
            ChatExchange::<ScriptedBackend>::prepare("  a b  "),
            Some("a b".to_string())
        );
        assert_eq!(ChatExchange::<ScriptedBackend>::prepare("\n\t"), None);
        assert_eq!(ChatExchange::<ScriptedBackend>::prepare("\u{00A0}\u{3000}"), None);
        assert_eq!(
            ChatExchange::<ScriptedBackend>::prepare("\u{FEFF}hi\u{FEFF}"),
            Some("hi".to_string())
        );
    }
}
