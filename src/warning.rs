use std::borrow::Cow;
use std::fmt;

use crate::types::BrowserInfo;

const INTERNET_EXPLORER: &str = "Internet Explorer";

/// Compatibility warning shown as a dismissible banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserWarning {
    /// Embedded web view: links cannot be opened from here.
    InAppBrowser,
    InternetExplorer,
    Unsupported { name: String, version: String },
    /// Mobile Safari-family browser on iOS.
    IosMobile,
}

impl BrowserWarning {
    /// Warning for `info`, if any.  In-app browsers take priority over every
    /// other condition, then unsupported versions, then the iOS nudge.
    pub fn for_browser(info: &BrowserInfo<'_>) -> Option<Self> {
        if info.is_in_app_browser {
            return Some(Self::InAppBrowser);
        }

        if !info.is_supported {
            if info.name == INTERNET_EXPLORER {
                return Some(Self::InternetExplorer);
            }
            return Some(Self::Unsupported {
                name: info.name.to_string(),
                version: info.version.to_string(),
            });
        }

        if info.is_ios_browser && info.is_mobile {
            return Some(Self::IosMobile);
        }

        None
    }

    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Self::InAppBrowser => {
                Cow::Borrowed("Please open this link in your default browser for the best experience.")
            }
            Self::InternetExplorer => Cow::Borrowed(
                "Internet Explorer is not supported. Please use a modern browser like Chrome, Firefox, Safari, or Edge.",
            ),
            Self::Unsupported { name, version } => Cow::Owned(format!(
                "Your version of {} ({}) is not supported. Please update to the latest version.",
                name, version
            )),
            Self::IosMobile => {
                Cow::Borrowed("For the best experience, please use Chrome or Firefox on iOS.")
            }
        }
    }

    /// Identifier reported with the `browser_warning` analytics event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InAppBrowser => "in_app_browser",
            Self::InternetExplorer => "internet_explorer",
            Self::Unsupported { .. } => "unsupported_version",
            Self::IosMobile => "ios_mobile",
        }
    }
}

impl fmt::Display for BrowserWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

pub fn browser_warning(info: &BrowserInfo<'_>) -> Option<BrowserWarning> {
    BrowserWarning::for_browser(info)
}

/// Banner text for `info`, if any.
pub fn warning_message(info: &BrowserInfo<'_>) -> Option<String> {
    browser_warning(info).map(|w| w.message().into_owned())
}
