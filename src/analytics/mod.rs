//! Analytics events: a fixed taxonomy, session ids, a bounded queue, and a
//! synchronous hand-off to the third-party tracker.

mod event;
mod session;

pub use event::*;

use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::classifier::BrowserClassifier;
use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::warning::BrowserWarning;
use session::Session;

/// Destination of analytics events (the tracker's global function).
pub trait EventSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()>;
}

impl<F> EventSink for F
where
    F: FnMut(&AnalyticsEvent) -> Result<()>,
{
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()> {
        self(event)
    }
}

/// Writes each event as one JSON line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)
            .map_err(|e| Error::Transport(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub trait Clock {
    fn now_millis(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// What the page knows about its environment.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    pub user_agent: String,
    pub language: String,
    pub page_path: String,
    pub page_title: String,
    pub page_referrer: String,
}

pub struct Analytics<'c> {
    config: AnalyticsConfig,
    classifier: &'c BrowserClassifier,
    host: HostContext,
    session: Session,
    queue: VecDeque<AnalyticsEvent>,
    sink: Option<Box<dyn EventSink + 'c>>,
    clock: Box<dyn Clock + 'c>,
}

impl<'c> Analytics<'c> {
    /// Pipeline without a sink: events are queued but go nowhere until one is
    /// attached.
    pub fn new(config: AnalyticsConfig, classifier: &'c BrowserClassifier, host: HostContext) -> Self {
        let session = Session::new(config.session_timeout_ms());
        let capacity = config.max_queue_size.min(1024);
        Self {
            config,
            classifier,
            host,
            session,
            queue: VecDeque::with_capacity(capacity),
            sink: None,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'c) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'c) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn set_sink(&mut self, sink: impl EventSink + 'c) {
        self.sink = Some(Box::new(sink));
    }

    pub fn host(&self) -> &HostContext {
        &self.host
    }

    /// Update on navigation (path, title, referrer).
    pub fn host_mut(&mut self) -> &mut HostContext {
        &mut self.host
    }

    pub fn queue(&self) -> &VecDeque<AnalyticsEvent> {
        &self.queue
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.id()
    }

    /// Record an event and hand it to the sink.
    ///
    /// `params` are merged with the timestamp, session id and the derived
    /// browser fields; derived fields win on key collisions.
    pub fn track(&mut self, kind: EventType, params: EventParams) {
        let now = self.clock.now_millis();
        let mut merged = params;
        merged.insert("timestamp".into(), json!(now));
        merged.insert(
            "session_id".into(),
            json!(self.session.touch(now).to_string()),
        );
        self.browser_fields(&mut merged);

        self.queue.push_back(AnalyticsEvent {
            kind,
            params: merged,
        });

        if let Some(event) = self.queue.back() {
            match self.sink.as_mut() {
                None => {
                    if self.config.debug {
                        log::warn!("analytics sink not initialized, {} event not sent", kind);
                    }
                }
                Some(sink) => match sink.send(event) {
                    Ok(()) => {
                        if self.config.debug {
                            log::debug!("analytics event sent: {:?}", event);
                        }
                    }
                    Err(e) => {
                        if self.config.debug {
                            log::error!("failed to send analytics event: {}", e);
                        }
                    }
                },
            }
        }

        while self.queue.len() > self.config.max_queue_size {
            self.queue.pop_front();
        }
    }

    fn browser_fields(&self, params: &mut EventParams) {
        let info = self.classifier.classify(&self.host.user_agent);
        let os_name = match (info.is_mobile, info.is_ios_browser) {
            (false, _) => "desktop",
            (true, true) => "iOS",
            (true, false) => "Android",
        };
        let fields = [
            ("browser_name", json!(info.name)),
            ("browser_version", json!(info.version)),
            ("browser_language", json!(self.host.language)),
            ("is_mobile", json!(info.is_mobile)),
            ("is_in_app", json!(info.is_in_app_browser)),
            (
                "device_type",
                json!(if info.is_mobile { "mobile" } else { "desktop" }),
            ),
            ("os_name", json!(os_name)),
            ("os_version", json!("unknown")),
            ("user_agent", json!(self.host.user_agent)),
        ];
        for (key, value) in fields {
            params.insert(key.into(), value);
        }
    }

    pub fn track_page_view(&mut self, params: EventParams) {
        let mut merged = EventParams::new();
        merged.insert("page_path".into(), json!(self.host.page_path));
        merged.insert("page_title".into(), json!(self.host.page_title));
        merged.insert("page_referrer".into(), json!(self.host.page_referrer));
        merged.extend(params);
        self.track(EventType::PageView, merged);
    }

    pub fn track_link_click(&mut self, params: EventParams) {
        self.track(EventType::LinkClick, params);
    }

    pub fn track_theme_change(&mut self, theme: &str) {
        self.track(EventType::ThemeChange, params([("theme", json!(theme))]));
    }

    pub fn track_browser_warning(&mut self, warning: &BrowserWarning) {
        self.track(
            EventType::BrowserWarning,
            params([("warning_type", json!(warning.kind()))]),
        );
    }

    /// `error_type` is the concrete error's name; `error_stack` carries the
    /// `source()` chain, outermost first.
    pub fn track_error<E>(&mut self, error: &E, context: Option<&str>)
    where
        E: std::error::Error + ?Sized,
    {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        let mut p = params([
            ("error_type", json!(error_name(error))),
            ("error_message", json!(error.to_string())),
            ("error_stack", json!(chain.join("\n"))),
        ]);
        if let Some(context) = context {
            p.insert("error_context".into(), json!(context));
        }
        self.track(EventType::Error, p);
    }

    pub fn track_app_install(&mut self, outcome: InstallOutcome) {
        self.track(
            EventType::AppInstall,
            params([("outcome", json!(outcome.as_str()))]),
        );
    }

    pub fn track_share(&mut self, platform: &str, content: &str) {
        self.track(
            EventType::Share,
            params([("platform", json!(platform)), ("content", json!(content))]),
        );
    }

    pub fn track_custom(&mut self, kind: EventType, params: EventParams) {
        self.track(kind, params);
    }
}

/// Name of the concrete error behind `error`, read from the head of its
/// `Debug` output so it survives `&dyn Error`.
fn error_name<E>(error: &E) -> String
where
    E: std::error::Error + ?Sized,
{
    let debug = format!("{:?}", error);
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        "Error".to_string()
    } else {
        name
    }
}

/// Build a parameter bag from literal pairs.
pub fn params<const N: usize>(pairs: [(&str, Value); N]) -> EventParams {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
