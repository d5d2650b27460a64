use serde::{Deserialize, Serialize};

use crate::Username;

/// One human-readable progress line (retry notices and the like).
///
/// Appended by workers while a probe is still in flight; delivered to
/// the poller at most once and never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLine {
    /// The name the line refers to.
    pub username: Username,
    /// Progress text, e.g. `[RETRY 3/10] alice - status: 429, waiting 4.52s`.
    pub message: String,
}

impl StatusLine {
    pub fn new(username: impl Into<Username>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let line = StatusLine::new("bob", "[RETRY 1/10] bob - status: 500, waiting 2.13s");
        let json = serde_json::to_string(&line).unwrap();
        let back: StatusLine = serde_json::from_str(&json).unwrap();

        assert_eq!(back.username, line.username);
        assert_eq!(back.message, line.message);
    }
}
