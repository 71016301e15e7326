pub mod descriptor;
pub mod engine;
pub mod fields;
pub mod render;
pub mod sinks;

pub use descriptor::{FieldSpec, FormDescriptor};
pub use engine::FormEngine;
pub use fields::FieldSet;

/// The designated result area of a form. Rendering replaces its full
/// content; nothing is ever appended across submissions.
pub trait ResultSink: Send + Sync {
    fn replace(&self, text: &str);
}

/// Blocking user-visible notification channel. The sole reporting mechanism
/// for failed submission cycles.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Terminal state of one submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response was decoded and written to the result sink.
    Rendered,
    /// The request or decode failed; the notifier carried the message.
    Notified,
    /// A cycle for this form was already in flight; nothing happened.
    Busy,
}

#[derive(Debug)]
pub struct FormError {
    pub message: String,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for FormError {
    fn from(s: String) -> Self {
        FormError { message: s }
    }
}

impl From<&str> for FormError {
    fn from(s: &str) -> Self {
        FormError {
            message: s.to_string(),
        }
    }
}
