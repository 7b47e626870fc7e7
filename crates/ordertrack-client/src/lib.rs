pub mod client;
pub mod error;
pub mod outcome;

pub use client::{ClientConfig, LookupMode, TrackingClient};
pub use error::TrackingError;
pub use outcome::{OrderSearch, SearchOutcome};
