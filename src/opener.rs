use serde_json::json;

use crate::analytics::{Analytics, EventParams, EventType};
use crate::classifier::BrowserClassifier;
use crate::types::{BrowserInfo, Platform};

/// Navigation primitives provided by the host page.
pub trait Navigator {
    /// Replace the current location (`window.location.href = url`).
    fn assign_location(&mut self, url: &str);

    /// Open `url` in a new tab.  Returns `false` when the host refused, e.g.
    /// a popup blocker.
    fn open_new_tab(&mut self, url: &str) -> bool;

    /// Insert `anchor`, click it, and remove it again.
    fn click_anchor(&mut self, anchor: &Anchor);
}

/// Temporary anchor element used for the synthetic-click fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub target: &'static str,
    pub rel: &'static str,
}

impl Anchor {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: "_blank",
            rel: "noopener noreferrer",
        }
    }
}

/// How an outbound link will be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// In-app browser: nothing is opened.
    Blocked,
    Location(String),
    /// Android intent URL, assigned as the location.
    Intent(String),
    NewTab(String),
    Anchor(Anchor),
}

#[derive(Debug, Clone, Default)]
pub struct LinkOpenRequest {
    pub url: String,
    /// Event recorded before navigating, if any.
    pub event: Option<EventType>,
    pub params: EventParams,
}

impl LinkOpenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_event(mut self, event: EventType, params: EventParams) -> Self {
        self.event = Some(event);
        self.params = params;
        self
    }
}

/// `intent://<host+path>#Intent;package=<id>;scheme=https;end`
pub fn intent_url(url: &str, package: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    format!("intent://{}#Intent;package={};scheme=https;end", rest, package)
}

/// Decide how `url` is opened for a browser classified as `info`.
pub fn plan(url: &str, info: &BrowserInfo<'_>) -> Dispatch {
    if info.is_in_app_browser {
        return Dispatch::Blocked;
    }
    match (info.platform(), info.browser_package()) {
        (Platform::Ios, _) => Dispatch::Location(url.to_string()),
        (Platform::Android, Some(package)) => Dispatch::Intent(intent_url(url, package)),
        (Platform::Desktop, _) => Dispatch::NewTab(url.to_string()),
        _ => Dispatch::Anchor(Anchor::new(url)),
    }
}

pub struct LinkOpener<'c> {
    classifier: &'c BrowserClassifier,
}

impl<'c> LinkOpener<'c> {
    pub fn new(classifier: &'c BrowserClassifier) -> Self {
        Self { classifier }
    }

    /// Open `request.url` from a page running under `ua`.
    ///
    /// Returns `false` without navigating when `ua` is an in-app browser (the
    /// caller shows the warning banner instead).
    ///
    /// Location, intent and anchor dispatches always report `true`. A new tab
    /// reports whatever [`Navigator::open_new_tab`] returns, so a desktop
    /// visitor whose host blocks the popup gets `false` even though nothing
    /// else went wrong.
    pub fn open(
        &self,
        ua: &str,
        request: &LinkOpenRequest,
        navigator: &mut dyn Navigator,
        analytics: Option<&mut Analytics<'_>>,
    ) -> bool {
        let info = self.classifier.classify(ua);

        if let (Some(event), Some(analytics)) = (request.event, analytics) {
            let mut params = EventParams::new();
            params.insert("link_url".into(), json!(request.url));
            params.insert("browser_name".into(), json!(info.name));
            params.insert("browser_version".into(), json!(info.version));
            params.insert("is_mobile".into(), json!(info.is_mobile));
            params.insert("is_in_app".into(), json!(info.is_in_app_browser));
            params.extend(request.params.clone());
            analytics.track(event, params);
        }

        match plan(&request.url, &info) {
            Dispatch::Blocked => {
                log::debug!("in-app browser {:?}, not opening {}", info.in_app_browser(), request.url);
                false
            }
            Dispatch::Location(url) | Dispatch::Intent(url) => {
                navigator.assign_location(&url);
                true
            }
            Dispatch::NewTab(url) => {
                let opened = navigator.open_new_tab(&url);
                if !opened {
                    log::warn!("new tab for {} was blocked", url);
                }
                opened
            }
            Dispatch::Anchor(anchor) => {
                navigator.click_anchor(&anchor);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn info(platform: Platform) -> BrowserInfo<'static> {
        BrowserInfo {
            name: Cow::Borrowed("Chrome"),
            version: Cow::Borrowed("Unknown"),
            is_supported: true,
            is_mobile: platform != Platform::Desktop,
            is_in_app_browser: false,
            is_ios_browser: platform == Platform::Ios,
            is_android_browser: platform == Platform::Android,
            browser_package: (platform == Platform::Android).then_some("com.android.chrome"),
            in_app_browser: None,
        }
    }

    #[test]
    fn intent_url_strips_scheme() {
        assert_eq!(
            intent_url("https://ko-fi.com/someone?ref=bio", "org.mozilla.firefox"),
            "intent://ko-fi.com/someone?ref=bio#Intent;package=org.mozilla.firefox;scheme=https;end"
        );
        assert_eq!(
            intent_url("http://example.com", "com.android.chrome"),
            "intent://example.com#Intent;package=com.android.chrome;scheme=https;end"
        );
    }

    #[test]
    fn plan_by_platform() {
        let url = "https://example.com/";
        assert_eq!(plan(url, &info(Platform::Ios)), Dispatch::Location(url.into()));
        assert_eq!(
            plan(url, &info(Platform::Android)),
            Dispatch::Intent(intent_url(url, "com.android.chrome"))
        );
        assert_eq!(plan(url, &info(Platform::Desktop)), Dispatch::NewTab(url.into()));
        assert_eq!(
            plan(url, &info(Platform::OtherMobile)),
            Dispatch::Anchor(Anchor::new(url))
        );
    }

    #[test]
    fn in_app_is_blocked_on_every_platform() {
        for platform in [Platform::Ios, Platform::Android, Platform::Desktop, Platform::OtherMobile] {
            let i = BrowserInfo {
                is_in_app_browser: true,
                ..info(platform)
            };
            assert_eq!(plan("https://example.com/", &i), Dispatch::Blocked);
        }
    }

    #[test]
    fn android_without_package_uses_anchor() {
        let i = BrowserInfo {
            browser_package: None,
            ..info(Platform::Android)
        };
        assert!(matches!(plan("https://example.com/", &i), Dispatch::Anchor(_)));
    }

    #[test]
    fn anchor_attributes() {
        let a = Anchor::new("https://example.com/");
        assert_eq!(a.target, "_blank");
        assert_eq!(a.rel, "noopener noreferrer");
    }
}
