use serde::Serialize;

/// Severity of a user-facing admin message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

/// Confirmation (or complaint) shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl AdminMessage {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }
}

/// Outcome of a bulk action: how many rows it touched and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub affected: usize,
    pub message: AdminMessage,
}

/// Shown when an action is invoked without any selected rows.
pub const NOTHING_SELECTED: &str =
    "Items must be selected in order to perform actions on them. No items have been changed.";
