//! Built-in reporters

mod console;
mod json;
mod recording;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use recording::{Event, RecordingReporter};
