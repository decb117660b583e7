use thiserror::Error;

/// Failure reported by the completion service itself (transport, HTTP
/// status, or an unusable response body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

/// Why a turn produced no sentiment score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SentimentError {
    /// The model answered with something that is not a number.
    #[error("non-numeric reply from the model: {reply:?}")]
    NonNumericReply { reply: String },
    /// The model answered with a number outside [-1, 1].
    #[error("reply {value} is out of range [-1, 1]")]
    OutOfRangeReply { value: f64 },
    #[error("completion service error: {0}")]
    Service(#[from] ServiceError),
}
