use std::future::Future;

use ordertrack_core::Order;

/// Normalized result of one tracking request. Exactly one of order or error
/// is ever present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Order),
    Failed(String),
}

impl SearchOutcome {
    #[must_use]
    pub fn data(&self) -> Option<&Order> {
        match self {
            SearchOutcome::Found(order) => Some(order),
            SearchOutcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Failed(message) => Some(message),
        }
    }
}

/// Anything that can resolve a trimmed order number into a [`SearchOutcome`].
///
/// Implementations must never fail outside the outcome: every error path
/// resolves to [`SearchOutcome::Failed`].
pub trait OrderSearch {
    fn fetch_order(&self, order_number: &str) -> impl Future<Output = SearchOutcome> + Send;
}
