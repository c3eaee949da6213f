//! The validation verdict attached to a [`crate::datapoint::Datapoint`].

use serde::{Deserialize, Serialize};

/// Outcome of validating a datapoint.
///
/// `SUCCESS` means ready to release; `WARNING` means unknown-but-non-blocking;
/// `FAIL` blocks release. Serialises as its upper-case name, the single
/// source of truth for the variant/string mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportScore {
    Success,
    Warning,
    Fail,
}

/// Immutable validation verdict: a score, a user-facing message, and
/// optional structured data. Equality is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub status: ReportScore,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Report {
    pub fn new(status: ReportScore, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ReportScore::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ReportScore::Warning, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(ReportScore::Fail, message)
    }

    pub fn with_data(mut self, data: serde_json::Map<String, serde_json::Value>) -> Self {
        self.data = Some(data);
        self
    }
}
