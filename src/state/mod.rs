//! Gallery state container
//!
//! [`UiState`] is immutable: every [`Command`] and every [`Event`] produces
//! a new state. Commands that need the network also return an [`Effect`],
//! which the [`Gallery`] driver runs on a task and turns into an [`Event`].

mod driver;

pub use driver::Gallery;

use crate::api::{GalleryError, PageId};
use crate::gallery::{DetailRecord, ResultSet, SummaryRecord};
use crate::query::{build_query, ComposedTerm, Mode};

/// List area status. Exactly one of these is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// A search is in flight
    Loading,
    /// The last search failed; holds the user-facing message
    Failed(String),
    /// The result set is current
    Loaded,
}

/// Detail panel state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Closed,
    Loading,
    Open(DetailRecord),
}

/// User actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit the search text
    SetQuery(String),
    /// Pick a transport mode; takes effect on the next search
    SelectMode(Mode),
    /// Search with the current text and mode
    Search,
    /// Clear text and mode, then search
    Reset,
    /// Open the detail view for a record in the current results
    OpenRecord(PageId),
    /// Close the detail view
    CloseDetail,
}

/// Network work requested by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchList(ComposedTerm),
    FetchDetail(SummaryRecord),
}

/// Completion of an effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ListLoaded(Result<ResultSet, GalleryError>),
    DetailLoaded(DetailRecord),
}

/// Everything the view renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub query: String,
    pub mode: Mode,
    pub results: ResultSet,
    pub status: ListStatus,
    pub detail: DetailView,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            query: String::new(),
            mode: Mode::default(),
            results: Vec::new(),
            status: ListStatus::Loaded,
            detail: DetailView::Closed,
        }
    }
}

impl UiState {
    /// State with a preselected mode
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Apply a user command
    pub fn handle(&self, command: Command) -> (UiState, Option<Effect>) {
        let mut next = self.clone();
        let effect = match command {
            Command::SetQuery(text) => {
                next.query = text;
                None
            }
            Command::SelectMode(mode) => {
                next.mode = mode;
                None
            }
            Command::Search => Some(next.begin_search()),
            Command::Reset => {
                next.query.clear();
                next.mode = Mode::All;
                Some(next.begin_search())
            }
            Command::OpenRecord(id) => match self.record(id) {
                Some(record) => {
                    next.detail = DetailView::Loading;
                    Some(Effect::FetchDetail(record.clone()))
                }
                None => {
                    tracing::debug!("ignoring open for page {} not in results", id);
                    None
                }
            },
            Command::CloseDetail => {
                next.detail = DetailView::Closed;
                None
            }
        };
        (next, effect)
    }

    /// Apply the completion of an effect
    pub fn apply(&self, event: Event) -> UiState {
        let mut next = self.clone();
        match event {
            Event::ListLoaded(Ok(results)) => {
                next.results = results;
                next.status = ListStatus::Loaded;
            }
            Event::ListLoaded(Err(e)) => {
                next.results.clear();
                next.status = ListStatus::Failed(e.user_message().to_string());
            }
            Event::DetailLoaded(record) => {
                next.detail = DetailView::Open(record);
            }
        }
        next
    }

    /// Clears the previous outcome before the request goes out
    fn begin_search(&mut self) -> Effect {
        self.status = ListStatus::Loading;
        self.results.clear();
        Effect::FetchList(build_query(&self.query, self.mode))
    }

    /// Find a record in the current results
    pub fn record(&self, id: PageId) -> Option<&SummaryRecord> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    /// `Loading…`, the error message, or `Results: N`
    pub fn status_line(&self) -> String {
        match &self.status {
            ListStatus::Loading => "Loading…".to_string(),
            ListStatus::Failed(message) => message.clone(),
            ListStatus::Loaded => format!("Results: {}", self.results.len()),
        }
    }
}
