use std::sync::Mutex;

use super::{Notifier, ResultSink};

/// In-memory result area.
#[derive(Default)]
pub struct MemorySink {
    text: Mutex<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.lock().expect("sink lock poisoned").clone()
    }
}

impl ResultSink for MemorySink {
    fn replace(&self, text: &str) {
        *self.text.lock().expect("sink lock poisoned") = text.to_string();
    }
}

/// Collects alerts in memory.
#[derive(Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn alert(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier lock poisoned")
            .push(message.to_string());
    }
}
