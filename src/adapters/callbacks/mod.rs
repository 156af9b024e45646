//! Completion callback adapters.

mod logging_callback;
mod recording_callback;

pub use logging_callback::LoggingCompletionCallback;
pub use recording_callback::RecordingCompletionCallback;
