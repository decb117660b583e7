use super::client::{CompletionBackend, CompletionRequest};
use super::conversation::Conversation;
use super::error::SentimentError;
use crate::constants::{MAX_POLARITY, MIN_POLARITY, TEMPERATURE};

/// Asks the completion service to score each user line and keeps the
/// running conversation so the model sees earlier turns.
pub struct SentimentClient<B> {
    backend: B,
    conversation: Conversation,
    model: String,
    max_tokens: u32,
}

impl<B: CompletionBackend> SentimentClient<B> {
    pub fn new(backend: B, system_prompt: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            backend,
            conversation: Conversation::new(system_prompt),
            model: model.to_string(),
            max_tokens,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Score `user_text` in [-1, 1].
    ///
    /// The user turn is always recorded. The assistant turn is recorded
    /// whenever the service returned content, even if it fails validation.
    pub async fn request_sentiment(&mut self, user_text: &str) -> Result<f64, SentimentError> {
        self.conversation.add_user_message(user_text);

        let request = CompletionRequest {
            model: &self.model,
            messages: self.conversation.snapshot(),
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        };
        let reply = match self.backend.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "completion request failed");
                return Err(e.into());
            }
        };

        let reply = reply.trim();
        tracing::debug!(reply, "received completion");
        self.conversation.add_assistant_message(reply);

        parse_reply(reply).inspect_err(|e| tracing::warn!(error = %e, "rejected model reply"))
    }
}

/// Parse a trimmed model reply into a polarity in [-1, 1].
pub fn parse_reply(reply: &str) -> Result<f64, SentimentError> {
    let value: f64 = reply
        .parse()
        .map_err(|_| SentimentError::NonNumericReply {
            reply: reply.to_string(),
        })?;
    if (MIN_POLARITY..=MAX_POLARITY).contains(&value) {
        Ok(value)
    } else {
        Err(SentimentError::OutOfRangeReply { value })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::ai::conversation::{Message, MessageRole};
    use crate::ai::ServiceError;

    /// Backend that replays canned replies and records what it was sent.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedBackend {
        replies: Arc<Mutex<VecDeque<Result<String, ServiceError>>>>,
        pub(crate) requests: Arc<Mutex<Vec<Vec<Message>>>>,
    }

    impl ScriptedBackend {
        pub(crate) fn with_replies(replies: Vec<Result<String, ServiceError>>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into())),
                requests: Arc::default(),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionBackend for ScriptedBackend {
        async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ServiceError> {
            assert_eq!(request.temperature, 0.0);
            self.requests.lock().unwrap().push(request.messages.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ServiceError("no scripted reply".into())))
        }
    }

    fn client(replies: Vec<Result<String, ServiceError>>) -> SentimentClient<ScriptedBackend> {
        SentimentClient::new(
            ScriptedBackend::with_replies(replies),
            "rate sentiment",
            "gpt-3.5-turbo",
            10,
        )
    }

    // ── parse_reply ───────────────────────────────────────────────

    #[test]
    fn parse_accepts_range_bounds() {
        assert_eq!(parse_reply("-1"), Ok(-1.0));
        assert_eq!(parse_reply("1"), Ok(1.0));
        assert_eq!(parse_reply("0.35"), Ok(0.35));
    }

    #[test]
    fn parse_rejects_text() {
        assert_eq!(
            parse_reply("banana"),
            Err(SentimentError::NonNumericReply {
                reply: "banana".into()
            })
        );
        assert!(matches!(
            parse_reply(""),
            Err(SentimentError::NonNumericReply { .. })
        ));
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert_eq!(
            parse_reply("1.5"),
            Err(SentimentError::OutOfRangeReply { value: 1.5 })
        );
        assert!(matches!(
            parse_reply("-3"),
            Err(SentimentError::OutOfRangeReply { .. })
        ));
    }

    #[test]
    fn parse_rejects_nan() {
        assert!(matches!(
            parse_reply("NaN"),
            Err(SentimentError::OutOfRangeReply { .. })
        ));
    }

    // ── request_sentiment ─────────────────────────────────────────

    #[tokio::test]
    async fn success_appends_user_and_assistant() {
        let mut c = client(vec![Ok(" 0.8\n".into())]);
        assert_eq!(c.request_sentiment("I love this!").await, Ok(0.8));

        let history = c.conversation().snapshot();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], Message::user("I love this!"));
        assert_eq!(history[2], Message::assistant("0.8"));
    }

    #[tokio::test]
    async fn request_carries_full_history() {
        let mut c = client(vec![Ok("0.1".into()), Ok("-0.4".into())]);
        c.request_sentiment("first").await.unwrap();
        c.request_sentiment("second").await.unwrap();

        let requests = c.backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].len(), 2);
        assert_eq!(requests[1].len(), 4);
        assert_eq!(requests[1][0].role, MessageRole::System);
        assert_eq!(requests[1][3], Message::user("second"));
    }

    #[tokio::test]
    async fn service_error_keeps_only_user_turn() {
        let mut c = client(vec![Err(ServiceError("boom".into()))]);
        let result = c.request_sentiment("hello").await;

        assert_eq!(
            result,
            Err(SentimentError::Service(ServiceError("boom".into())))
        );
        assert_eq!(c.conversation().len(), 2);
        assert_eq!(c.conversation().last(), Some(&Message::user("hello")));
    }

    #[tokio::test]
    async fn non_numeric_reply_is_kept_in_history() {
        let mut c = client(vec![Ok("banana".into())]);
        let result = c.request_sentiment("hmm").await;

        assert!(matches!(result, Err(SentimentError::NonNumericReply { .. })));
        assert_eq!(c.conversation().len(), 3);
        assert_eq!(c.conversation().last(), Some(&Message::assistant("banana")));
    }

    #[tokio::test]
    async fn out_of_range_reply_is_kept_in_history() {
        let mut c = client(vec![Ok("7".into())]);
        let result = c.request_sentiment("wow").await;

        assert_eq!(result, Err(SentimentError::OutOfRangeReply { value: 7.0 }));
        assert_eq!(c.conversation().len(), 3);
        assert_eq!(c.conversation().last(), Some(&Message::assistant("7")));
    }

    #[tokio::test]
    async fn failed_turn_still_feeds_next_request() {
        let mut c = client(vec![Err(ServiceError("down".into())), Ok("0.5".into())]);
        let _ = c.request_sentiment("one").await;
        assert_eq!(c.request_sentiment("two").await, Ok(0.5));

        let requests = c.backend.requests.lock().unwrap();
        assert_eq!(requests[1].len(), 3);
        assert_eq!(requests[1][1], Message::user("one"));
        assert_eq!(requests[1][2], Message::user("two"));
    }
}
