//! Form state and request lifecycle for one tracker instance.

use ordertrack_client::{OrderSearch, SearchOutcome};
use ordertrack_core::Order;

use crate::format::DateFormatter;
use crate::present::{present_screen, Screen};

pub const EMPTY_INPUT_ERROR: &str = "Please enter an order number";

/// Monotonic tag of a search started by one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A search the view has started and is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub seq: RequestSeq,
    /// Trimmed, never empty.
    pub order_number: String,
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input was empty; the validation error is set and nothing is sent.
    Rejected,
    /// A search is already in flight; controls are disabled.
    Busy,
    Started(PendingSearch),
}

/// The mutually exclusive rendering phase derived from the state variables.
/// The screen is built from this and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Result(&'a Order),
    /// A rejected submit while an order is displayed: the validation error
    /// is shown above the order, which is left in place.
    ErrorOverResult { error: &'a str, order: &'a Order },
}

/// Tracker form state: input text, loading flag, error message, and the
/// current order. Reusable indefinitely.
#[derive(Debug, Default)]
pub struct TrackerView {
    input: String,
    order: Option<Order>,
    error: String,
    loading: bool,
    last_seq: u64,
    in_flight: Option<RequestSeq>,
}

impl TrackerView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// The current error message, `None` when empty.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn phase(&self) -> Phase<'_> {
        if self.loading {
            return Phase::Loading;
        }
        match (self.error(), self.order.as_ref()) {
            (Some(error), Some(order)) => Phase::ErrorOverResult { error, order },
            (Some(error), None) => Phase::Error(error),
            (None, Some(order)) => Phase::Result(order),
            (None, None) => Phase::Idle,
        }
    }

    /// Replaces the input text. Ignored while loading; returns whether the
    /// edit was applied.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if self.loading {
            return false;
        }
        self.input = text.into();
        true
    }

    /// Submits the form.
    ///
    /// Empty or whitespace-only input sets [`EMPTY_INPUT_ERROR`] and leaves
    /// order and loading untouched. Otherwise the previous order and error
    /// are cleared, loading starts, and the caller must run the returned
    /// search and hand its outcome to [`TrackerView::resolve`].
    pub fn submit(&mut self) -> Submission {
        if self.loading {
            return Submission::Busy;
        }

        let order_number = self.input.trim();
        if order_number.is_empty() {
            self.error = EMPTY_INPUT_ERROR.to_string();
            return Submission::Rejected;
        }
        let order_number = order_number.to_string();

        self.last_seq += 1;
        let seq = RequestSeq(self.last_seq);
        self.in_flight = Some(seq);
        self.loading = true;
        self.error.clear();
        self.order = None;

        Submission::Started(PendingSearch { seq, order_number })
    }

    /// Applies the outcome of search `seq`. Outcomes of any search other
    /// than the one in flight are discarded; returns whether it was applied.
    pub fn resolve(&mut self, seq: RequestSeq, outcome: SearchOutcome) -> bool {
        if self.in_flight != Some(seq) {
            tracing::debug!(
                seq = seq.get(),
                in_flight = ?self.in_flight.map(RequestSeq::get),
                "discarding stale search outcome"
            );
            return false;
        }

        self.in_flight = None;
        self.loading = false;
        match outcome {
            SearchOutcome::Found(order) => {
                self.error.clear();
                self.order = Some(order);
            }
            SearchOutcome::Failed(message) => {
                self.order = None;
                self.error = message;
            }
        }
        true
    }

    /// Submits and, when a search starts, runs it against `client` and
    /// applies the outcome. Returns what the submit did.
    pub async fn search_with<C: OrderSearch>(&mut self, client: &C) -> Submission {
        let submission = self.submit();
        if let Submission::Started(pending) = &submission {
            let outcome = client.fetch_order(&pending.order_number).await;
            self.resolve(pending.seq, outcome);
        }
        submission
    }

    #[must_use]
    pub fn screen(&self, dates: &DateFormatter) -> Screen {
        present_screen(self, dates)
    }
}
