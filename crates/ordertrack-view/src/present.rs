//! Pure presentation: state and orders in, screen descriptions out.
//!
//! Nothing here performs I/O or mutates its input, so the display rules can
//! be tested directly against `Order` values.

use ordertrack_core::{EntryId, HistoryEntry, Order};

use crate::format::DateFormatter;
use crate::state::{Phase, TrackerView};

pub const TITLE: &str = "Order Tracking";
pub const SUBTITLE: &str = "Track your order in real-time";
pub const PLACEHOLDER: &str = "Enter your order number...";
pub const SEARCH_LABEL: &str = "SEARCH";
pub const SEARCHING_LABEL: &str = "SEARCHING...";
pub const IDLE_PROMPT: &str = "Enter your order number to track its status";
pub const DELAY_TITLE: &str = "Your order is on its way";
pub const DELAY_MESSAGE: &str =
    "We apologize for the delay. We're working to deliver your order as soon as possible.";

/// Everything the tracker shows for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub form: SearchForm,
    pub alert: Option<Alert>,
    pub card: Option<OrderCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub input: String,
    pub placeholder: &'static str,
    /// Input and button are both disabled while a search is in flight.
    pub disabled: bool,
    pub button_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Error(String),
    Info(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// `status-{status}`, with the backend code used verbatim.
    pub class: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayNotice {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCard {
    pub heading: String,
    pub badge: StatusBadge,
    pub delay_notice: Option<DelayNotice>,
    pub current_location: Option<String>,
    pub progress: Option<u8>,
    pub estimated_delivery: String,
    pub delivered_on: Option<String>,
    /// `None` when the order has no history; never `Some(vec![])`.
    pub timeline: Option<Vec<TimelineItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub key: EntryId,
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub date: String,
}

/// Builds the order card for `order`.
#[must_use]
pub fn present_order(order: &Order, dates: &DateFormatter) -> OrderCard {
    let timeline = if order.history.is_empty() {
        None
    } else {
        Some(
            order
                .history
                .iter()
                .map(|entry| present_entry(entry, dates))
                .collect(),
        )
    };

    OrderCard {
        heading: format!("Order #{}", order.order_number),
        badge: StatusBadge {
            class: format!("status-{}", order.status),
            label: order.status_display.clone(),
        },
        delay_notice: order.is_delayed.then_some(DelayNotice {
            title: DELAY_TITLE,
            message: DELAY_MESSAGE,
        }),
        current_location: order.current_location().map(str::to_owned),
        progress: order.progress_percentage.map(|p| p.min(100)),
        estimated_delivery: dates.format(order.estimated_delivery.as_deref()),
        delivered_on: order
            .is_delivered()
            .then(|| dates.format(order.delivered_at.as_deref())),
        timeline,
    }
}

fn present_entry(entry: &HistoryEntry, dates: &DateFormatter) -> TimelineItem {
    TimelineItem {
        key: entry.id.clone(),
        status: entry.status_display.clone(),
        location: non_empty(entry.location.as_deref()),
        description: non_empty(entry.description.as_deref()),
        date: dates.format(entry.timestamp.as_deref()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Builds the full screen for the current phase of `view`.
#[must_use]
pub fn present_screen(view: &TrackerView, dates: &DateFormatter) -> Screen {
    let phase = view.phase();
    let loading = phase == Phase::Loading;

    let (alert, order) = match phase {
        Phase::Idle => (Some(Alert::Info(IDLE_PROMPT)), None),
        Phase::Loading => (None, None),
        Phase::Error(error) => (Some(Alert::Error(error.to_string())), None),
        Phase::Result(order) => (None, Some(order)),
        Phase::ErrorOverResult { error, order } => {
            (Some(Alert::Error(error.to_string())), Some(order))
        }
    };

    Screen {
        title: TITLE,
        subtitle: SUBTITLE,
        form: SearchForm {
            input: view.input().to_string(),
            placeholder: PLACEHOLDER,
            disabled: loading,
            button_label: if loading { SEARCHING_LABEL } else { SEARCH_LABEL },
        },
        alert,
        card: order.map(|order| present_order(order, dates)),
    }
}
