pub mod analytics;
mod classifier;
mod config;
mod db;
mod error;
mod helpers;
mod literal;
mod opener;
mod parser;
mod parser_data;
mod platform_gate;
mod types;
mod warning;

pub use analytics::{Analytics, AnalyticsEvent, EventParams, EventSink, EventType, HostContext};
pub use classifier::BrowserClassifier;
pub use config::{AnalyticsConfig, Config};
pub use error::{Error, Result};
pub use opener::{intent_url, plan, Anchor, Dispatch, LinkOpenRequest, LinkOpener, Navigator};
pub use types::*;
pub use warning::{browser_warning, warning_message, BrowserWarning};
