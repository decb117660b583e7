use serde::Serialize;

/// Role in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: &str) -> Self {
        Self {
            role: MessageRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.to_string(),
        }
    }

    pub fn system(content: &str) -> Self {
        Self {
            role: MessageRole::System,
            content: content.to_string(),
        }
    }
}

/// Append-only conversation history sent as context on every request.
///
/// Starts with a single system message. Nothing is ever evicted, so the
/// context grows for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn add_user_message(&mut self, content: &str) {
        self.append(Message::user(content));
    }

    pub fn add_assistant_message(&mut self, content: &str) {
        self.append(Message::assistant(content));
    }

    /// All messages in insertion order, ready to be used as the request payload.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Message constructors ──────────────────────────────────────

    #[test]
    fn message_user() {
        let m = Message::user("hello");
        assert_eq!(m.role, MessageRole::User);
        assert_eq!(m.content, "hello");
    }

    #[test]
    fn message_assistant() {
        let m = Message::assistant("0.4");
        assert_eq!(m.role, MessageRole::Assistant);
        assert_eq!(m.content, "0.4");
    }

    // ── Conversation basics ───────────────────────────────────────

    #[test]
    fn new_conversation_holds_system_prompt() {
        let c = Conversation::new("rate it");
        assert_eq!(c.len(), 1);
        assert_eq!(c.snapshot()[0], Message::system("rate it"));
    }

    #[test]
    fn append_grows_by_one() {
        let mut c = Conversation::new("sys");
        c.add_user_message("test");
        assert_eq!(c.len(), 2);
        assert_eq!(c.last(), Some(&Message::user("test")));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut c = Conversation::new("sys");
        c.add_user_message("a");
        c.add_assistant_message("0.1");
        c.add_user_message("b");
        let roles: Vec<MessageRole> = c.snapshot().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
    }

    #[test]
    fn never_trims() {
        let mut c = Conversation::new("sys");
        for i in 0..500 {
            c.add_user_message(&i.to_string());
        }
        assert_eq!(c.len(), 501);
        assert_eq!(c.snapshot()[1].content, "0");
    }

    // ── Serialization ─────────────────────────────────────────────

    #[test]
    fn serializes_as_api_messages() {
        let mut c = Conversation::new("sys");
        c.add_user_message("hello");
        let api = serde_json::to_value(c.snapshot()).unwrap();
        assert_eq!(api[0]["role"], "system");
        assert_eq!(api[0]["content"], "sys");
        assert_eq!(api[1]["role"], "user");
        assert_eq!(api[1]["content"], "hello");
        assert_eq!(api[1].as_object().unwrap().len(), 2);
    }
}
