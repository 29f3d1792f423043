use serde::Serialize;
use std::borrow::Cow;

use super::Platform;

/// Classification of one user-agent string.
///
/// Borrows from both the classifier (browser names, package ids) and the UA
/// (version numbers), so building one never copies rule data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserInfo<'a> {
    pub name: Cow<'a, str>,
    pub version: Cow<'a, str>,
    pub is_supported: bool,
    pub is_mobile: bool,
    pub is_in_app_browser: bool,
    pub is_ios_browser: bool,
    pub is_android_browser: bool,
    /// Android package id of the detected browser, used for intent URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_package: Option<&'a str>,
    /// Name of the app whose embedded web view was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_app_browser: Option<&'a str>,
}

impl<'a> BrowserInfo<'a> {
    pub fn platform(&self) -> Platform {
        if self.is_ios_browser {
            Platform::Ios
        } else if self.is_android_browser {
            Platform::Android
        } else if !self.is_mobile {
            Platform::Desktop
        } else {
            Platform::OtherMobile
        }
    }

    pub fn browser_package(&self) -> Option<&'a str> {
        self.browser_package
    }

    pub fn in_app_browser(&self) -> Option<&'a str> {
        self.in_app_browser
    }
}
