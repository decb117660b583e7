//! Polarity → label classification.
//!
//! A polarity in [-1, 1] is mapped onto one of eight buckets by scanning
//! [`RANGE_TABLE`] in order. Each bucket is half-open on the low side and
//! closed on the high side, `(lower, upper]`.

use crate::ui::{paint, ColorClass};

/// Sentiment buckets, from most negative to most positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    VeryNegative,
    Negative,
    SomewhatNegative,
    Neutral,
    SomewhatPositive,
    Positive,
    VeryPositive,
    ExtremelyPositive,
}

impl Sentiment {
    /// Localized label for this bucket.
    pub fn label(self, lang: &str) -> String {
        let text = match self {
            Sentiment::VeryNegative => t!("label.very_negative", locale = lang),
            Sentiment::Negative => t!("label.negative", locale = lang),
            Sentiment::SomewhatNegative => t!("label.somewhat_negative", locale = lang),
            Sentiment::Neutral => t!("label.neutral", locale = lang),
            Sentiment::SomewhatPositive => t!("label.somewhat_positive", locale = lang),
            Sentiment::Positive => t!("label.positive", locale = lang),
            Sentiment::VeryPositive => t!("label.very_positive", locale = lang),
            Sentiment::ExtremelyPositive => t!("label.extremely_positive", locale = lang),
        };
        text.into_owned()
    }
}

/// One row of the range table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentRange {
    /// Exclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
    pub sentiment: Sentiment,
    pub color: ColorClass,
}

impl SentimentRange {
    const fn new(lower: f64, upper: f64, sentiment: Sentiment, color: ColorClass) -> Self {
        Self {
            lower,
            upper,
            sentiment,
            color,
        }
    }

    pub fn contains(&self, polarity: f64) -> bool {
        self.lower < polarity && polarity <= self.upper
    }
}

/// Ordered bucket table. First match wins.
///
/// The `(0, 0]` neutral row is empty: zero is already claimed by the row
/// above it. It stays in the table so the ordering is explicit.
pub const RANGE_TABLE: [SentimentRange; 8] = [
    SentimentRange::new(-1.0, -0.6, Sentiment::VeryNegative, ColorClass::Red),
    SentimentRange::new(-0.6, -0.3, Sentiment::Negative, ColorClass::Red),
    SentimentRange::new(-0.3, 0.0, Sentiment::SomewhatNegative, ColorClass::Red),
    SentimentRange::new(0.0, 0.0, Sentiment::Neutral, ColorClass::Yellow),
    SentimentRange::new(0.0, 0.3, Sentiment::SomewhatPositive, ColorClass::Yellow),
    SentimentRange::new(0.3, 0.6, Sentiment::Positive, ColorClass::Green),
    SentimentRange::new(0.6, 0.9, Sentiment::VeryPositive, ColorClass::Green),
    SentimentRange::new(0.9, 1.0, Sentiment::ExtremelyPositive, ColorClass::Green),
];

/// Find the bucket for `polarity`, or `None` if it falls outside [-1, 1].
pub fn bucket(polarity: f64) -> Option<(Sentiment, ColorClass)> {
    if let Some(range) = RANGE_TABLE.iter().find(|r| r.contains(polarity)) {
        return Some((range.sentiment, range.color));
    }
    // -1 sits on the open end of the first row.
    if polarity == -1.0 {
        return Some((Sentiment::VeryNegative, ColorClass::Red));
    }
    None
}

/// Colorized label for `polarity`. Values outside the table get a red
/// "invalid polarity" label instead of an error.
pub fn classify(polarity: f64, lang: &str) -> String {
    match bucket(polarity) {
        Some((sentiment, color)) => paint(color, &sentiment.label(lang)),
        None => paint(ColorClass::Red, &t!("label.invalid", locale = lang)),
    }
}
