use serde::Serialize;

/// Stable identifier for one rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageId(pub u64);

impl MessageId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Who a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Class that selects the sender-specific message style.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }
}

/// Immutable message entry. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn new(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
        }
    }

    /// Full class list for the rendered element.
    pub fn class_name(&self) -> String {
        format!("chat-message {}", self.sender.css_class())
    }
}

/// Append-only, unbounded message history in completion order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        self.next_id += 1;
        let index = self.messages.len();
        self.messages
            .push(ChatMessage::new(MessageId::new(self.next_id), sender, text));
        &self.messages[index]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_in_append_order() {
        let mut transcript = Transcript::new();
        let first = transcript.push(Sender::User, "hi").id;
        let second = transcript.push(Sender::Bot, "hello").id;

        assert!(first < second);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[1].text, "hello");
    }

    #[test]
    fn class_name_carries_sender_style() {
        let message = ChatMessage::new(MessageId::new(1), Sender::Bot, "ok");

        assert_eq!(message.class_name(), "chat-message bot-message");
        assert_eq!(Sender::User.css_class(), "user-message");
    }

    #[test]
    fn sender_serializes_lowercase() {
        let message = ChatMessage::new(MessageId::new(7), Sender::User, "ping");
        let value = serde_json::to_value(&message).expect("message serializes");

        assert_eq!(
            value,
            serde_json::json!({"id": 7, "sender": "user", "text": "ping"})
        );
    }
}
