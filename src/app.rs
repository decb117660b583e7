//! The read–score–print loop.
//!
//! Each iteration walks `Prompting → Dispatching → Reporting` and either
//! comes back to the prompt or ends in a [`Stopped`] state. Errors inside an
//! iteration are printed and the loop keeps going; only an exit keyword, an
//! interrupt, or the end of input stop it.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::ai::{CompletionBackend, SentimentClient, SentimentError};
use crate::constants::{DEFAULT_LANG, EXIT_KEYWORDS, LANGUAGES};
use crate::sentiment::classify;
use crate::ui::{paint, ColorClass};
use crate::utils::format_score;

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stopped {
    /// The user typed an exit keyword.
    Exit,
    /// Ctrl-C while prompting or waiting on the model.
    Interrupted,
    /// stdin was closed.
    EndOfInput,
}

/// Outcome of one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    Empty,
    Exit,
    Scored(f64),
    Failed(SentimentError),
}

/// Whether `input` is one of the exit keywords (case-insensitive).
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(input))
}

/// Resolve a language code to one of the supported locales.
fn resolve_lang(lang: &str) -> &'static str {
    LANGUAGES
        .iter()
        .copied()
        .find(|l| *l == lang)
        .unwrap_or(DEFAULT_LANG)
}

pub struct App<B> {
    client: SentimentClient<B>,
    lang: &'static str,
}

impl<B: CompletionBackend> App<B> {
    pub fn new(client: SentimentClient<B>, lang: &str) -> Self {
        Self {
            client,
            lang: resolve_lang(lang),
        }
    }

    pub fn client(&self) -> &SentimentClient<B> {
        &self.client
    }

    /// Decide what a line means and, if it is real input, score it.
    pub async fn handle_line(&mut self, line: &str) -> Turn {
        let input = line.trim();
        if input.is_empty() {
            return Turn::Empty;
        }
        if is_exit_command(input) {
            return Turn::Exit;
        }
        match self.client.request_sentiment(input).await {
            Ok(score) => Turn::Scored(score),
            Err(e) => Turn::Failed(e),
        }
    }

    /// Text printed for a finished turn.
    pub fn render(&self, turn: &Turn) -> String {
        let lang = self.lang;
        match turn {
            Turn::Empty => paint(ColorClass::Red, &t!("empty_input", locale = lang)),
            Turn::Exit => paint(ColorClass::Yellow, &t!("farewell", locale = lang)),
            Turn::Scored(score) => {
                let label = classify(*score, lang);
                let value = format_score(*score);
                format!("{}\n", t!("result", locale = lang, label = label, value = value))
            }
            Turn::Failed(SentimentError::NonNumericReply { .. }) => {
                paint(ColorClass::Red, &t!("error.non_numeric", locale = lang))
            }
            Turn::Failed(SentimentError::OutOfRangeReply { .. }) => {
                paint(ColorClass::Red, &t!("error.out_of_range", locale = lang))
            }
            Turn::Failed(SentimentError::Service(e)) => {
                let detail = e.to_string();
                paint(ColorClass::Red, &t!("error.service", locale = lang, detail = detail))
            }
        }
    }

    /// Run until the user exits, `interrupt` resolves, or input ends.
    pub async fn run<R, W, I>(&mut self, input: R, out: &mut W, interrupt: I) -> Result<Stopped>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        I: Future<Output = ()>,
    {
        tokio::pin!(interrupt);
        let mut lines = input.lines();

        writeln!(out, "{}\n", paint(ColorClass::Yellow, &t!("banner", locale = self.lang)))
            .context("Failed to write banner")?;

        loop {
            match self.iteration(&mut lines, out, interrupt.as_mut()).await {
                Ok(None) => {}
                Ok(Some(stopped)) => {
                    tracing::debug!(?stopped, messages = self.client().conversation().len(), "loop stopped");
                    return Ok(stopped);
                }
                Err(e) => {
                    tracing::error!(error = %e, "unexpected error in loop iteration");
                    let error = format!("{:#}", e);
                    let msg = t!("unexpected_error", locale = self.lang, error = error);
                    writeln!(out, "{}", paint(ColorClass::Red, &msg))
                        .context("Failed to write error")?;
                }
            }
        }
    }

    async fn iteration<R, W, I>(
        &mut self,
        lines: &mut Lines<R>,
        out: &mut W,
        mut interrupt: Pin<&mut I>,
    ) -> Result<Option<Stopped>>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        I: Future<Output = ()>,
    {
        let lang = self.lang;

        // Prompting
        write!(out, "{}", paint(ColorClass::Yellow, &t!("prompt", locale = lang)))?;
        out.flush().context("Failed to flush prompt")?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            _ = interrupt.as_mut() => {
                print_interrupted(out, lang)?;
                return Ok(Some(Stopped::Interrupted));
            }
        };
        let Some(line) = line else {
            writeln!(out)?;
            return Ok(Some(Stopped::EndOfInput));
        };

        // Dispatching
        let turn = tokio::select! {
            turn = self.handle_line(&line) => turn,
            _ = interrupt.as_mut() => {
                print_interrupted(out, lang)?;
                return Ok(Some(Stopped::Interrupted));
            }
        };

        // Reporting
        writeln!(out, "{}", self.render(&turn))?;
        Ok(matches!(turn, Turn::Exit).then_some(Stopped::Exit))
    }
}

fn print_interrupted<W: Write>(out: &mut W, lang: &str) -> Result<()> {
    writeln!(out, "\n{}", paint(ColorClass::Yellow, &t!("interrupted", locale = lang)))?;
    Ok(())
}
