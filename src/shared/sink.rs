//! Output sinks for recognized text

#[cfg(test)]
use parking_lot::RwLock;
#[cfg(test)]
use std::sync::Arc;

/// Receives the final recognized text (or an error message)
pub trait OutputSink {
    fn display(&self, text: &str);
}

/// Writes recognized text to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn display(&self, text: &str) {
        println!("{}", text);
    }
}

/// Shared text slot; the most recent `display` wins
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct SharedOutput {
    text: Arc<RwLock<String>>,
}

#[cfg(test)]
impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot, as a UI label would start with placeholder text
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(text.into())),
        }
    }

    /// Current contents
    pub fn text(&self) -> String {
        self.text.read().clone()
    }
}

#[cfg(test)]
impl OutputSink for SharedOutput {
    fn display(&self, text: &str) {
        let mut slot = self.text.write();
        slot.clear();
        slot.push_str(text);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &S {
    fn display(&self, text: &str) {
        (**self).display(text)
    }
}
