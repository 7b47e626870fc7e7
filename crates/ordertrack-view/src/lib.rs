pub mod format;
pub mod present;
mod render;
pub mod state;

pub use format::{DateFormatter, NOT_AVAILABLE};
pub use present::{present_order, Alert, OrderCard, Screen, SearchForm, TimelineItem};
pub use state::{Phase, PendingSearch, RequestSeq, Submission, TrackerView, EMPTY_INPUT_ERROR};
