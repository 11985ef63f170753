//! Terminal notifier and confirmation prompt

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use bowl_client::{Confirm, Level, Notification, Notifier};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Prints toasts on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            Level::Info => "ℹ",
            Level::Success => "✔",
            Level::Warning => "⚠",
            Level::Error => "✘",
        };
        println!("{tag} {}", notification.message);
    }

    fn badge(&self, count: Option<u64>) {
        match count {
            Some(count) => println!("🔔 [{count} new] type `ack` to refresh the board"),
            None => tracing::debug!("badge cleared"),
        }
    }
}

/// Line reader shared by the command loop and confirmation prompts
///
/// Both must drain the same buffer, otherwise piped input meant as an
/// answer is swallowed by whichever reader filled its buffer first.
pub struct SharedInput<R> {
    lines: Arc<Mutex<Lines<R>>>,
}

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self {
            lines: self.lines.clone(),
        }
    }
}

impl<R: AsyncBufRead + Unpin + Send> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Arc::new(Mutex::new(reader.lines())),
        }
    }

    /// `None` at end of input
    pub async fn next_line(&self) -> io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

pub type StdinInput = SharedInput<BufReader<Stdin>>;

impl StdinInput {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

/// Asks y/N and reads the answer from the shell's input
pub struct LineConfirm<R> {
    input: SharedInput<R>,
    assume_yes: bool,
}

impl<R> LineConfirm<R> {
    pub fn new(input: SharedInput<R>, assume_yes: bool) -> Self {
        Self { input, assume_yes }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send + 'static> Confirm for LineConfirm<R> {
    async fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stdout = tokio::io::stdout();
        let prompt = format!("{question} [y/N] ");
        if stdout.write_all(prompt.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            return false;
        }
        match self.input.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => {
                tracing::debug!("input closed before confirmation");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
