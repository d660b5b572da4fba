//! Shared output between the recognizer and whatever presents its result
//!
//! Sinks may be cloned across tasks; concurrent runs resolve by
//! last-writer-wins.

pub mod sink;

pub use sink::{ConsoleSink, OutputSink};

#[cfg(test)]
pub use sink::SharedOutput;
