//! Status report: the JSON shape polled by upgrade UIs.
//!
//! Field names and `status` strings are a wire contract. Optional fields are
//! omitted entirely rather than serialized as `null`.

use serde::{Deserialize, Serialize};

use super::session::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Ok,
    NeedInstall,
    NeedUpdate,
    FinishInstall,
    FinishUpdate,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NeedInstall => "need-install",
            Self::NeedUpdate => "need-update",
            Self::FinishInstall => "finish-install",
            Self::FinishUpdate => "finish-update",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::FinishInstall | Self::FinishUpdate)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: ReportStatus,
    pub in_progress: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<f64>,
    /// Installed version, `-` when nothing is installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    /// Target version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<bool>,
}

impl StatusReport {
    /// A report carrying only the two mandatory fields.
    pub fn new(status: ReportStatus, in_progress: bool) -> Self {
        Self {
            status,
            in_progress,
            complete: None,
            current: None,
            next: None,
            result: None,
            reason: None,
            debug: None,
            time: None,
            manual: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.result == Some(Outcome::Error)
    }

    /// Copy without the bookkeeping fields, for comparisons that should not
    /// depend on the clock.
    pub fn without_bookkeeping(&self) -> Self {
        Self {
            time: None,
            manual: None,
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
