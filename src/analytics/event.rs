use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Parameter bag attached to an event.
pub type EventParams = serde_json::Map<String, serde_json::Value>;

/// Fixed event taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    LinkClick,
    ThemeChange,
    BrowserWarning,
    Error,
    AppInstall,
    Share,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageView => "page_view",
            Self::LinkClick => "link_click",
            Self::ThemeChange => "theme_change",
            Self::BrowserWarning => "browser_warning",
            Self::Error => "error",
            Self::AppInstall => "app_install",
            Self::Share => "share",
        }
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page_view" => Ok(Self::PageView),
            "link_click" => Ok(Self::LinkClick),
            "theme_change" => Ok(Self::ThemeChange),
            "browser_warning" => Ok(Self::BrowserWarning),
            "error" => Ok(Self::Error),
            "app_install" => Ok(Self::AppInstall),
            "share" => Ok(Self::Share),
            _ => Err(Error::UnknownEvent(s.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub params: EventParams,
}

impl AnalyticsEvent {
    pub fn param(&self, key: &str) -> Option<&serde_json::Value> {
        self.params.get(key)
    }
}

/// Outcome of an install prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Declined,
    Dismissed,
}

impl InstallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Dismissed => "dismissed",
        }
    }
}
