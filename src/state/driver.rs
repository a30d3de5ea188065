//! Async driver for the gallery state
//!
//! Effects run on tokio tasks and report back over an unbounded channel.
//! Only the owner of [`Gallery`] applies events, so state has one writer.
//!
//! Requests are not sequenced: if a second search starts before the first
//! returns, whichever response arrives last decides the displayed results.
//! The same holds for a detail response arriving after the panel was closed.

use std::future::Future;
use tokio::sync::mpsc;

use super::{Command, Effect, Event, UiState};
use crate::api::{GalleryError, WikiClient};
use crate::gallery::{self, DetailRecord};
use crate::query::Mode;

/// Gallery state plus the machinery to run its network effects
pub struct Gallery {
    client: WikiClient,
    state: UiState,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
}

impl Gallery {
    /// Create a gallery with mode `all`
    pub fn new(client: WikiClient) -> Self {
        Self::with_mode(client, Mode::default())
    }

    /// Create a gallery with a preselected mode
    pub fn with_mode(client: WikiClient, mode: Mode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            state: UiState::with_mode(mode),
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Whether any effect has not reported back yet
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Issue the initial search
    pub fn start(&mut self) {
        self.dispatch(Command::Search);
    }

    /// Apply a command and start its effect, if any
    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!("command: {:?}", command);
        let (next, effect) = self.state.handle(command);
        self.state = next;
        if let Some(effect) = effect {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let client = self.client.clone();
        match effect {
            Effect::FetchList(term) => {
                let fallback = Event::ListLoaded(Err(GalleryError::Transport(
                    "search task failed".to_string(),
                )));
                self.spawn_event(
                    async move { Event::ListLoaded(gallery::search(&client, &term).await) },
                    fallback,
                );
            }
            Effect::FetchDetail(record) => {
                let fallback = Event::DetailLoaded(DetailRecord::from_summary(&record));
                self.spawn_event(
                    async move { Event::DetailLoaded(gallery::open_detail(&client, &record).await) },
                    fallback,
                );
            }
        }
    }

    /// Run `work` on its own task. If that task dies before producing an
    /// event, `fallback` is sent instead so `in_flight` always drains.
    fn spawn_event<F>(&mut self, work: F, fallback: Event)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;

        let handle = tokio::spawn(work);
        tokio::spawn(async move {
            let event = handle.await.unwrap_or_else(|e| {
                tracing::error!("effect task failed: {}", e);
                fallback
            });
            // The receiver lives as long as the gallery; a send error only
            // means the gallery was dropped.
            let _ = tx.send(event);
        });
    }

    /// Wait for the next effect to complete and apply it. Returns `false`
    /// when nothing is in flight.
    pub async fn next_event(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.state = self.state.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply events until every effect has completed
    pub async fn settle(&mut self) -> &UiState {
        while self.next_event().await {}
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::SummaryRecord;
    use crate::state::{DetailView, ListStatus};

    async fn explode() -> Event {
        panic!("effect blew up")
    }

    #[tokio::test]
    async fn test_panicking_effect_still_settles() {
        let mut gallery = Gallery::new(WikiClient::new());
        gallery.spawn_event(
            explode(),
            Event::ListLoaded(Err(GalleryError::Transport("search task failed".into()))),
        );
        assert!(gallery.is_busy());

        let state = gallery.settle().await;
        assert_eq!(
            state.status,
            ListStatus::Failed("Failed to fetch. Try again.".to_string())
        );
        assert!(!gallery.is_busy());
    }

    #[tokio::test]
    async fn test_panicking_detail_falls_back_to_summary() {
        let record = SummaryRecord::new(4, "Reefer", Some("r.jpg".into()), "cold");
        let mut gallery = Gallery::new(WikiClient::new());
        gallery.spawn_event(
            explode(),
            Event::DetailLoaded(DetailRecord::from_summary(&record)),
        );

        let state = gallery.settle().await;
        assert_eq!(
            state.detail,
            DetailView::Open(DetailRecord::from_summary(&record))
        );
    }
}
