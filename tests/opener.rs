use biolink::analytics::params;
use biolink::{
    Analytics, AnalyticsConfig, Anchor, BrowserClassifier, BrowserWarning, EventType, HostContext,
    LinkOpenRequest, LinkOpener, Navigator,
};
use serde_json::json;

const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const FIREFOX_ANDROID: &str = "Mozilla/5.0 (Android 14; Mobile; rv:121.0) Gecko/121.0 Firefox/121.0";
const INSTAGRAM_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 Instagram 307.0.0.34.111";

#[derive(Default)]
struct Host {
    locations: Vec<String>,
    tabs: Vec<String>,
    anchors: Vec<Anchor>,
    block_popups: bool,
}

impl Navigator for Host {
    fn assign_location(&mut self, url: &str) {
        self.locations.push(url.to_string());
    }

    fn open_new_tab(&mut self, url: &str) -> bool {
        self.tabs.push(url.to_string());
        !self.block_popups
    }

    fn click_anchor(&mut self, anchor: &Anchor) {
        self.anchors.push(anchor.clone());
    }
}

impl Host {
    fn navigations(&self) -> usize {
        self.locations.len() + self.tabs.len() + self.anchors.len()
    }
}

fn host_context(ua: &str) -> HostContext {
    HostContext {
        user_agent: ua.to_string(),
        language: "en-GB".to_string(),
        ..HostContext::default()
    }
}

#[test]
fn desktop_opens_new_tab() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut host = Host::default();

    let opened = opener.open(
        CHROME_DESKTOP,
        &LinkOpenRequest::new("https://ko-fi.com/someone"),
        &mut host,
        None,
    );

    assert!(opened);
    assert_eq!(host.tabs, vec!["https://ko-fi.com/someone"]);
    assert!(host.locations.is_empty());
}

#[test]
fn blocked_popup_reports_failure() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut host = Host {
        block_popups: true,
        ..Host::default()
    };

    let opened = opener.open(
        CHROME_DESKTOP,
        &LinkOpenRequest::new("https://example.com/"),
        &mut host,
        None,
    );
    assert!(!opened);
    assert_eq!(host.tabs, vec!["https://example.com/"]);
}

#[test]
fn popup_blocker_only_affects_new_tabs() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut host = Host {
        block_popups: true,
        ..Host::default()
    };

    let opened = opener.open(
        FIREFOX_ANDROID,
        &LinkOpenRequest::new("https://example.com/"),
        &mut host,
        None,
    );
    assert!(opened);
    assert!(host.tabs.is_empty());
    assert_eq!(host.locations.len(), 1);
}

#[test]
fn android_firefox_uses_intent() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut host = Host::default();

    assert!(opener.open(
        FIREFOX_ANDROID,
        &LinkOpenRequest::new("https://github.com/someone"),
        &mut host,
        None,
    ));
    assert_eq!(host.locations.len(), 1);
    assert!(host.locations[0].starts_with("intent://github.com/someone#Intent;"));
    assert!(host.locations[0].contains("package=org.mozilla.firefox"));
}

#[test]
fn in_app_browser_never_navigates() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut host = Host::default();

    let opened = opener.open(
        INSTAGRAM_IOS,
        &LinkOpenRequest::new("https://example.com/"),
        &mut host,
        None,
    );
    assert!(!opened);
    assert_eq!(host.navigations(), 0);

    let info = classifier.classify(INSTAGRAM_IOS);
    assert_eq!(
        BrowserWarning::for_browser(&info),
        Some(BrowserWarning::InAppBrowser)
    );
}

#[test]
fn link_event_is_tracked_before_blocking() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut analytics = Analytics::new(
        AnalyticsConfig::default(),
        &classifier,
        host_context(INSTAGRAM_IOS),
    );
    let mut host = Host::default();

    let request = LinkOpenRequest::new("https://example.com/shop").with_event(
        EventType::LinkClick,
        params([("link_text", json!("Shop")), ("link_category", json!("store"))]),
    );
    let opened = opener.open(INSTAGRAM_IOS, &request, &mut host, Some(&mut analytics));

    assert!(!opened);
    let event = analytics.queue().back().expect("link event tracked");
    assert_eq!(event.kind, EventType::LinkClick);
    assert_eq!(event.param("link_url"), Some(&json!("https://example.com/shop")));
    assert_eq!(event.param("link_text"), Some(&json!("Shop")));
    assert_eq!(event.param("is_in_app"), Some(&json!(true)));
    assert_eq!(event.param("browser_language"), Some(&json!("en-GB")));
}

#[test]
fn no_event_without_event_name() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let opener = LinkOpener::new(&classifier);
    let mut analytics = Analytics::new(
        AnalyticsConfig::default(),
        &classifier,
        host_context(CHROME_DESKTOP),
    );
    let mut host = Host::default();

    opener.open(
        CHROME_DESKTOP,
        &LinkOpenRequest::new("https://example.com/"),
        &mut host,
        Some(&mut analytics),
    );
    assert!(analytics.queue().is_empty());
}

#[test]
fn every_in_app_signature_warns() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let base = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/60.0.0.0 Safari/537.36";
    for signature in [
        "Instagram 300.0",
        "FBAN/FBIOS",
        "FBAV/444.0",
        "Messenger",
        "Line/13.20.0",
        "Snapchat/12.60",
        "TikTok 32.0",
        "Reddit/Version 2023.50.0",
        "Twitter for iPhone",
    ] {
        let ua = format!("{} {}", base, signature);
        let info = classifier.classify(&ua);
        assert!(info.is_in_app_browser, "not in-app: {}", ua);
        // Outranks the unsupported Chrome 60 warning.
        assert_eq!(
            BrowserWarning::for_browser(&info),
            Some(BrowserWarning::InAppBrowser),
            "wrong warning for {}",
            ua
        );
    }
}

#[test]
fn old_chrome_warning_names_browser_and_version() {
    let classifier = BrowserClassifier::builtin().unwrap();
    let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/72.0.3626.121 Safari/537.36";
    let info = classifier.classify(ua);
    assert!(!info.is_supported);
    let message = BrowserWarning::for_browser(&info).unwrap().message();
    assert!(message.contains("Chrome"));
    assert!(message.contains("72"));
}
