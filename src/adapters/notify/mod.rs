//! Notifier adapters.
//!
//! - **TracingNotifier** - logs notices (operator binary)
//! - **RecordingNotifier** - keeps notices in memory (tests, embedding hosts)

mod recording_notifier;
mod tracing_notifier;

pub use recording_notifier::RecordingNotifier;
pub use tracing_notifier::TracingNotifier;
