//! Interactive prompts and notifications on the terminal

use async_trait::async_trait;
use gridcfg_core::DomainModel;
use gridcfg_interchange::OverwriteDecision;
use gridcfg_services::{ImportPrompt, Notifier};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Asks questions on stderr and reads answers from stdin.
///
/// End of input counts as "no" for confirmations and "abort" for overwrite
/// prompts.
pub struct TerminalPrompt {
    input: Mutex<BufReader<Stdin>>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn ask(&self, question: &str) -> Option<String> {
        let mut stderr = tokio::io::stderr();
        if let Err(e) = stderr.write_all(question.as_bytes()).await {
            tracing::warn!("Failed to write prompt: {}", e);
        }
        stderr.flush().await.ok();

        let mut line = String::new();
        match self.input.lock().await.read_line(&mut line).await {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
            Err(e) => {
                tracing::warn!("Failed to read answer: {}", e);
                None
            }
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImportPrompt for TerminalPrompt {
    async fn confirm(&self, message: &str) -> bool {
        loop {
            match self.ask(&format!("{message} [y/N] ")).await.as_deref() {
                Some("y" | "yes") => return true,
                Some("" | "n" | "no") | None => return false,
                Some(_) => continue,
            }
        }
    }

    async fn decide_overwrite(&self, _model: &DomainModel, message: &str) -> OverwriteDecision {
        loop {
            let answer = self
                .ask(&format!("{message} [o]verwrite / [s]kip / [a]bort "))
                .await;
            match parse_decision(answer.as_deref()) {
                Some(decision) => return decision,
                None => continue,
            }
        }
    }
}

/// `None` means the answer was not understood
fn parse_decision(answer: Option<&str>) -> Option<OverwriteDecision> {
    match answer {
        Some("o" | "overwrite" | "y" | "yes") => Some(OverwriteDecision::Overwrite),
        Some("s" | "skip" | "n" | "no") => Some(OverwriteDecision::Skip),
        Some("a" | "abort") | None => Some(OverwriteDecision::Abort),
        Some(_) => None,
    }
}

/// Prints notifications to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        tracing::debug!(message, "notification");
        eprintln!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::debug!(message, "error notification");
        eprintln!("error: {message}");
    }
}
