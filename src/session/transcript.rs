//! Simulated interviewer speech
//!
//! A question is "spoken" by revealing its text one character at a time.

use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::machine::Event;

/// Growing prefixes of a text, one character longer each step
///
/// The last item is the full text. An empty text yields nothing.
#[derive(Debug, Clone)]
pub struct Reveal {
    text: String,
    end: usize,
}

impl Reveal {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end: 0,
        }
    }
}

impl Iterator for Reveal {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let ch = self.text[self.end..].chars().next()?;
        self.end += ch.len_utf8();
        Some(self.text[..self.end].to_string())
    }
}

/// Reveal prefixes paced at `cadence`
pub fn reveal_stream(text: impl Into<String>, cadence: Duration) -> impl Stream<Item = String> {
    stream::iter(Reveal::new(text)).then(move |prefix| async move {
        sleep(cadence).await;
        prefix
    })
}

/// Spawn a reveal task tagged with `epoch`
///
/// Sends `RevealProgress` for each prefix, then `RevealFinished`. Aborting the
/// task stops the reveal; anything it already queued carries the old epoch.
pub(crate) fn spawn_reveal(
    epoch: u64,
    text: String,
    cadence: Duration,
    delay: Duration,
    tx: mpsc::Sender<Event>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if !delay.is_zero() {
            sleep(delay).await;
        }

        let mut prefixes = Box::pin(reveal_stream(text, cadence));
        while let Some(text) = prefixes.next().await {
            if tx.send(Event::RevealProgress { epoch, text }).await.is_err() {
                return;
            }
        }

        let _ = tx.send(Event::RevealFinished { epoch }).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_prefixes() {
        let prefixes: Vec<String> = Reveal::new("Hey").collect();
        assert_eq!(prefixes, vec!["H", "He", "Hey"]);
    }

    #[test]
    fn test_reveal_empty_text() {
        assert_eq!(Reveal::new("").count(), 0);
    }

    #[test]
    fn test_reveal_multibyte_characters() {
        let prefixes: Vec<String> = Reveal::new("né?").collect();
        assert_eq!(prefixes, vec!["n", "né", "né?"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_stream_paces_each_prefix() {
        let start = tokio::time::Instant::now();
        let prefixes: Vec<String> = reveal_stream("abcd", Duration::from_millis(30))
            .collect()
            .await;

        assert_eq!(prefixes.last().map(String::as_str), Some("abcd"));
        assert!(start.elapsed() >= Duration::from_millis(120));
        assert!(start.elapsed() < Duration::from_millis(200));
    }
}
